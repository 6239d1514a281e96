//! Reference index: textual component references to arena handles.

use std::collections::HashMap;

use rtc_core::{ComponentId, ObjectId, tag};

use crate::object::ObjectRole;

/// Outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ObjectId),
    Ambiguous(Vec<ObjectId>),
    Missing,
}

impl Resolution {
    pub fn found(&self) -> Option<ObjectId> {
        match self {
            Resolution::Found(id) => Some(*id),
            _ => None,
        }
    }
}

/// Maps full component ids and (group, name) aliases to handles.
///
/// Aliases let a reference such as `[Signal]cg/SetPoint` find the signal
/// registered as `[LookupSignal]cg/SetPoint`, and let an expression be found
/// by its result name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    by_id: HashMap<String, (ObjectId, ObjectRole)>,
    by_name: HashMap<(String, String), Vec<(ObjectId, ObjectRole)>>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` and its aliases. Returns false if the id is already
    /// present; the earlier entry is kept.
    pub fn insert(&mut self, id: &str, handle: ObjectId, role: ObjectRole, aliases: &[&str]) -> bool {
        if self.by_id.contains_key(id) {
            return false;
        }
        self.by_id.insert(id.to_owned(), (handle, role));

        let parsed = ComponentId::parse(id);
        let names = std::iter::once(parsed.name).chain(aliases.iter().copied());
        for name in names {
            let entry = self
                .by_name
                .entry((parsed.group.to_owned(), name.to_owned()))
                .or_default();
            if !entry.iter().any(|(h, _)| *h == handle) {
                entry.push((handle, role));
            }
        }
        true
    }

    /// Handle registered under exactly `id`.
    pub fn get(&self, id: &str) -> Option<ObjectId> {
        self.by_id.get(id).map(|(handle, _)| *handle)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Resolve a reference written inside `context_group`.
    ///
    /// An exact id match wins. Otherwise the reference is split into group
    /// and name (an unqualified name uses the context group) and looked up by
    /// alias, keeping only candidates whose role fits the reference's tag.
    pub fn resolve(&self, reference: &str, context_group: &str) -> Resolution {
        if let Some(&(handle, _)) = self.by_id.get(reference) {
            return Resolution::Found(handle);
        }

        let parsed = ComponentId::parse(reference);
        let group = if reference.contains('/') {
            parsed.group
        } else {
            context_group
        };
        let wanted = expected_role(parsed.tag);
        let candidates: Vec<ObjectId> = self
            .by_name
            .get(&(group.to_owned(), parsed.name.to_owned()))
            .into_iter()
            .flatten()
            .filter(|(_, role)| wanted.is_none_or(|w| w == *role))
            .map(|(handle, _)| *handle)
            .collect();

        match candidates.as_slice() {
            [] => Resolution::Missing,
            [handle] => Resolution::Found(*handle),
            _ => Resolution::Ambiguous(candidates),
        }
    }
}

/// Role implied by a reference tag; untagged references match any role.
fn expected_role(reference_tag: Option<&str>) -> Option<ObjectRole> {
    match reference_tag? {
        tag::SIGNAL | tag::LOOKUP_SIGNAL => Some(ObjectRole::Signal),
        tag::TIME_RULE
        | tag::RELATIVE_TIME_RULE
        | tag::PID_RULE
        | tag::INTERVAL_RULE
        | tag::HYDRAULIC_RULE
        | tag::FACTOR_RULE => Some(ObjectRole::Rule),
        tag::STANDARD_CONDITION | tag::TIME_CONDITION | tag::DIRECTIONAL_CONDITION => {
            Some(ObjectRole::Condition)
        }
        _ => None,
    }
}
