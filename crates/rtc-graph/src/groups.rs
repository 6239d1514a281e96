//! Partitioning assembled objects into control groups.

use std::collections::{HashMap, HashSet};

use rtc_core::ObjectId;

use crate::object::{ObjectRole, RtcObject};

/// Objects of one control group, partitioned by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlGroup {
    pub name: String,
    pub inputs: Vec<ObjectId>,
    pub outputs: Vec<ObjectId>,
    pub rules: Vec<ObjectId>,
    pub conditions: Vec<ObjectId>,
    pub signals: Vec<ObjectId>,
    pub mathematical_expressions: Vec<ObjectId>,
}

impl ControlGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Handles of the given role.
    pub fn role(&self, role: ObjectRole) -> &[ObjectId] {
        match role {
            ObjectRole::Input => &self.inputs,
            ObjectRole::Output => &self.outputs,
            ObjectRole::Rule => &self.rules,
            ObjectRole::Condition => &self.conditions,
            ObjectRole::Signal => &self.signals,
            ObjectRole::MathematicalExpression => &self.mathematical_expressions,
        }
    }

    fn role_mut(&mut self, role: ObjectRole) -> &mut Vec<ObjectId> {
        match role {
            ObjectRole::Input => &mut self.inputs,
            ObjectRole::Output => &mut self.outputs,
            ObjectRole::Rule => &mut self.rules,
            ObjectRole::Condition => &mut self.conditions,
            ObjectRole::Signal => &mut self.signals,
            ObjectRole::MathematicalExpression => &mut self.mathematical_expressions,
        }
    }

    /// All member handles, role by role.
    pub fn members(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .chain(&self.rules)
            .chain(&self.conditions)
            .chain(&self.signals)
            .chain(&self.mathematical_expressions)
            .copied()
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.members().any(|m| m == object)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
            + self.outputs.len()
            + self.rules.len()
            + self.conditions.len()
            + self.signals.len()
            + self.mathematical_expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds control groups in order of first appearance.
///
/// Each object joins exactly one group, the one its id names (connection
/// points carry the group of the object that referenced them). Adding the
/// same handle twice is a no-op.
#[derive(Debug, Default)]
pub struct ControlGroupBuilder {
    groups: Vec<ControlGroup>,
    positions: HashMap<String, usize>,
    placed: HashSet<ObjectId>,
}

impl ControlGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one object. Returns false if the handle was already placed.
    pub fn add(&mut self, handle: ObjectId, object: &RtcObject) -> bool {
        if !self.placed.insert(handle) {
            return false;
        }
        let name = object.control_group_name();
        let position = match self.positions.get(name) {
            Some(&position) => position,
            None => {
                self.groups.push(ControlGroup::new(name));
                self.positions.insert(name.to_owned(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[position].role_mut(object.role()).push(handle);
        true
    }

    pub fn build(self) -> Vec<ControlGroup> {
        self.groups
    }

    /// Group every object of an arena, in arena order.
    pub fn from_objects(objects: &[RtcObject]) -> Vec<ControlGroup> {
        let mut builder = Self::new();
        for (slot, object) in objects.iter().enumerate() {
            builder.add(ObjectId::from_slot(slot), object);
        }
        builder.build()
    }
}
