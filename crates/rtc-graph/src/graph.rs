//! The assembled control graph.

use std::collections::HashMap;
use std::fmt;

use rtc_core::ObjectId;

use crate::groups::ControlGroup;
use crate::object::RtcObject;

/// Relation a reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Input,
    Output,
    TrueOutput,
    FalseOutput,
    Signal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Input => "input",
            Relation::Output => "output",
            Relation::TrueOutput => "true output",
            Relation::FalseOutput => "false output",
            Relation::Signal => "signal",
        })
    }
}

/// A true/false/signal reference that matched no single object.
///
/// The link is left out of the graph; the entry lets callers report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub from: ObjectId,
    pub relation: Relation,
    pub reference: String,
    /// More than one object matched.
    pub ambiguous: bool,
}

/// Arena of assembled objects plus their control groups.
#[derive(Debug, Clone)]
pub struct ControlGraph {
    pub(crate) objects: Vec<RtcObject>,
    pub(crate) groups: Vec<ControlGroup>,
    pub(crate) unresolved: Vec<UnresolvedReference>,
    pub(crate) ids: HashMap<String, ObjectId>,
}

impl ControlGraph {
    pub fn objects(&self) -> &[RtcObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&RtcObject> {
        self.objects.get(id.slot())
    }

    /// Handles paired with their objects, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &RtcObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(slot, object)| (ObjectId::from_slot(slot), object))
    }

    /// Handle of the component with exactly this id.
    pub fn find(&self, id: &str) -> Option<ObjectId> {
        self.ids.get(id).copied()
    }

    pub fn groups(&self) -> &[ControlGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ControlGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// The group an object was placed in.
    pub fn group_of(&self, id: ObjectId) -> Option<&ControlGroup> {
        let name = self.object(id)?.control_group_name();
        self.group(name).filter(|g| g.contains(id))
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    /// Display name of a handle, for reports and logs.
    pub fn name_of(&self, id: ObjectId) -> &str {
        self.object(id).map(RtcObject::name).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
