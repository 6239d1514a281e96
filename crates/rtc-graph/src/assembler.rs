//! Two-pass assembly of component descriptors into a [`ControlGraph`].
//!
//! The first pass allocates one arena object per distinct id and indexes it.
//! The second pass resolves every textual reference to a handle. Because
//! wiring only stores handles, shared and cyclic references need no special
//! treatment.

use std::collections::HashMap;
use std::rc::Rc;

use rtc_core::{ObjectId, RtcResult, tag};
use rtc_model::{ComponentDescriptor, ComponentKind, References};

use crate::graph::{ControlGraph, Relation, UnresolvedReference};
use crate::groups::ControlGroupBuilder;
use crate::index::{ReferenceIndex, Resolution};
use crate::object::{
    Condition, ConnectionPoint, MathematicalExpression, ObjectRole, RtcObject, Rule, Signal,
};
use crate::validate;

/// Assemble descriptors in one call.
pub fn assemble(descriptors: Vec<ComponentDescriptor>) -> RtcResult<ControlGraph> {
    let mut assembler = GraphAssembler::new();
    for descriptor in descriptors {
        assembler.add(descriptor)?;
    }
    assembler.build()
}

/// References of one object, wired in the second pass.
#[derive(Debug)]
struct Pending {
    handle: ObjectId,
    group: String,
    references: References,
}

/// Incremental graph assembler.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    objects: Vec<RtcObject>,
    index: ReferenceIndex,
    pending: Vec<Pending>,
    /// (role, group, reference) -> connection point.
    points: HashMap<(ObjectRole, String, String), ObjectId>,
    unresolved: Vec<UnresolvedReference>,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the object for one descriptor.
    ///
    /// Returns `None` when a descriptor with the same id was added before;
    /// the first one is kept. Fails when the arena is out of handles.
    pub fn add(&mut self, descriptor: ComponentDescriptor) -> RtcResult<Option<ObjectId>> {
        if self.index.contains(&descriptor.id) {
            tracing::debug!(id = %descriptor.id, "Skipping duplicate component");
            return Ok(None);
        }

        let handle = ObjectId::try_from_slot(self.objects.len())?;
        let name = descriptor.name().to_owned();
        let ComponentDescriptor {
            id,
            control_group_name,
            kind,
            references,
        } = descriptor;

        let mut aliases = Vec::new();
        let object = match kind {
            ComponentKind::Rule(kind) => RtcObject::Rule(Rule {
                id: id.clone(),
                name,
                kind,
                inputs: Vec::new(),
                outputs: Vec::new(),
                signals: Vec::new(),
            }),
            ComponentKind::Condition(kind) => RtcObject::Condition(Condition {
                id: id.clone(),
                name,
                kind,
                input: None,
                true_outputs: Vec::new(),
                false_outputs: Vec::new(),
            }),
            ComponentKind::Signal(kind) => RtcObject::Signal(Signal {
                id: id.clone(),
                name,
                kind,
                inputs: Vec::new(),
                rules: Vec::new(),
            }),
            ComponentKind::Expression(tree) => {
                let y_name = tree.y_name().to_owned();
                aliases.push(y_name.clone());
                RtcObject::MathematicalExpression(MathematicalExpression {
                    id: id.clone(),
                    name: y_name,
                    expression: String::new(),
                    inputs: Vec::new(),
                    tree,
                })
            }
        };

        let aliases: Vec<&str> = aliases.iter().map(String::as_str).collect();
        self.index.insert(&id, handle, object.role(), &aliases);
        self.objects.push(object);
        self.pending.push(Pending {
            handle,
            group: control_group_name,
            references,
        });
        Ok(Some(handle))
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Wire all references, group the objects and validate the result.
    pub fn build(mut self) -> RtcResult<ControlGraph> {
        for pending in std::mem::take(&mut self.pending) {
            self.wire(pending)?;
        }

        let groups = ControlGroupBuilder::from_objects(&self.objects);
        validate::validate_links(&self.objects)?;
        validate::validate_partition(&self.objects, &groups)?;

        for group in &groups {
            tracing::debug!(
                group = %group.name,
                rules = group.rules.len(),
                conditions = group.conditions.len(),
                signals = group.signals.len(),
                expressions = group.mathematical_expressions.len(),
                inputs = group.inputs.len(),
                outputs = group.outputs.len(),
                "Control group assembled"
            );
        }
        tracing::info!(
            objects = self.objects.len(),
            groups = groups.len(),
            unresolved = self.unresolved.len(),
            "Control graph assembled"
        );

        let ids = self
            .objects
            .iter()
            .enumerate()
            .filter_map(|(slot, object)| Some((object.id()?.to_owned(), ObjectId::from_slot(slot))))
            .collect();
        Ok(ControlGraph {
            objects: self.objects,
            groups,
            unresolved: self.unresolved,
            ids,
        })
    }

    fn wire(&mut self, pending: Pending) -> RtcResult<()> {
        let Pending {
            handle,
            group,
            references: refs,
        } = pending;
        let slot = handle.slot();

        match self.objects[slot].role() {
            ObjectRole::Rule => {
                let inputs = self.points_or_objects(ObjectRole::Input, &refs.input, &group)?;
                let outputs = self.points_or_objects(ObjectRole::Output, &refs.output, &group)?;
                let signals =
                    self.links(handle, Relation::Signal, &refs.signal, &group, Some(ObjectRole::Signal));
                for &signal in &signals {
                    if let RtcObject::Signal(s) = &mut self.objects[signal.slot()] {
                        if !s.rules.contains(&handle) {
                            s.rules.push(handle);
                        }
                    }
                }
                if let RtcObject::Rule(rule) = &mut self.objects[slot] {
                    rule.inputs = inputs;
                    rule.outputs = outputs;
                    rule.signals = signals;
                }
            }
            ObjectRole::Condition => {
                let input = refs
                    .input
                    .first()
                    .map(|r| self.point_or_object(ObjectRole::Input, r, &group))
                    .transpose()?;
                let true_outputs =
                    self.links(handle, Relation::TrueOutput, &refs.true_output, &group, None);
                let false_outputs =
                    self.links(handle, Relation::FalseOutput, &refs.false_output, &group, None);
                if let RtcObject::Condition(condition) = &mut self.objects[slot] {
                    condition.input = input;
                    condition.true_outputs = true_outputs;
                    condition.false_outputs = false_outputs;
                }
            }
            ObjectRole::Signal => {
                let inputs = self.points_or_objects(ObjectRole::Input, &refs.input, &group)?;
                if let RtcObject::Signal(signal) = &mut self.objects[slot] {
                    signal.inputs = inputs;
                }
            }
            ObjectRole::MathematicalExpression => {
                let inputs = self.points_or_objects(ObjectRole::Input, &refs.input, &group)?;
                let rendered = match &self.objects[slot] {
                    RtcObject::MathematicalExpression(e) => {
                        let root = Rc::clone(&e.tree.root);
                        let index = &self.index;
                        root.render_with(&|branch| index.contains(&branch.id))
                    }
                    _ => String::new(),
                };
                if let RtcObject::MathematicalExpression(expression) = &mut self.objects[slot] {
                    expression.inputs = inputs;
                    expression.expression = rendered;
                }
            }
            ObjectRole::Input | ObjectRole::Output => {}
        }
        Ok(())
    }

    fn points_or_objects(
        &mut self,
        role: ObjectRole,
        references: &[String],
        group: &str,
    ) -> RtcResult<Vec<ObjectId>> {
        let mut handles = Vec::with_capacity(references.len());
        for reference in references {
            let handle = self.point_or_object(role, reference, group)?;
            if !handles.contains(&handle) {
                handles.push(handle);
            }
        }
        Ok(handles)
    }

    /// Resolve an input or output reference; anything that is not a single
    /// known component becomes a connection point.
    fn point_or_object(&mut self, role: ObjectRole, reference: &str, group: &str) -> RtcResult<ObjectId> {
        if !tag::is_connection_point(reference) {
            if let Resolution::Found(handle) = self.index.resolve(reference, group) {
                return Ok(handle);
            }
        }

        let key = (role, group.to_owned(), reference.to_owned());
        if let Some(&handle) = self.points.get(&key) {
            return Ok(handle);
        }
        let handle = ObjectId::try_from_slot(self.objects.len())?;
        let point = ConnectionPoint {
            name: reference.to_owned(),
            control_group_name: group.to_owned(),
        };
        self.objects.push(match role {
            ObjectRole::Output => RtcObject::Output(point),
            _ => RtcObject::Input(point),
        });
        self.points.insert(key, handle);
        Ok(handle)
    }

    /// Resolve component-to-component links. References that match nothing,
    /// match several objects or match an object of the wrong role are left
    /// out and recorded.
    fn links(
        &mut self,
        from: ObjectId,
        relation: Relation,
        references: &[String],
        group: &str,
        expected: Option<ObjectRole>,
    ) -> Vec<ObjectId> {
        let mut handles = Vec::with_capacity(references.len());
        for reference in references {
            let resolution = self.index.resolve(reference, group);
            let found = resolution.found().filter(|handle| {
                expected.is_none_or(|role| self.objects[handle.slot()].role() == role)
            });
            match found {
                Some(handle) => {
                    if !handles.contains(&handle) {
                        handles.push(handle);
                    }
                }
                None => {
                    let ambiguous = matches!(resolution, Resolution::Ambiguous(_));
                    tracing::warn!(
                        from = %from,
                        %relation,
                        reference = %reference,
                        ambiguous,
                        "Unresolved reference"
                    );
                    self.unresolved.push(UnresolvedReference {
                        from,
                        relation,
                        reference: reference.clone(),
                        ambiguous,
                    });
                }
            }
        }
        handles
    }
}
