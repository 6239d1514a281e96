//! Consistency checks on an assembled graph.

use std::collections::HashMap;

use rtc_core::{ObjectId, RtcResult};

use crate::error::GraphError;
use crate::groups::ControlGroup;
use crate::object::RtcObject;

/// Every link points into the arena and component ids are unique.
pub(crate) fn validate_links(objects: &[RtcObject]) -> RtcResult<()> {
    let mut seen: HashMap<&str, ObjectId> = HashMap::new();
    for (slot, object) in objects.iter().enumerate() {
        let from = ObjectId::from_slot(slot);
        for to in object.links() {
            if to.slot() >= objects.len() {
                return Err(GraphError::DanglingHandle { from, to }.into());
            }
        }
        if let Some(id) = object.id() {
            if seen.insert(id, from).is_some() {
                return Err(GraphError::DuplicateId { id: id.to_owned() }.into());
            }
        }
    }
    Ok(())
}

/// Groups partition the arena: each object sits in exactly one group, the
/// one it names.
pub(crate) fn validate_partition(objects: &[RtcObject], groups: &[ControlGroup]) -> RtcResult<()> {
    let mut owner: Vec<Option<&str>> = vec![None; objects.len()];
    for group in groups {
        for member in group.members() {
            let Some(slot) = owner.get_mut(member.slot()) else {
                return Err(GraphError::DanglingHandle {
                    from: member,
                    to: member,
                }
                .into());
            };
            if slot.is_some() {
                return Err(GraphError::GroupedTwice { object: member }.into());
            }
            *slot = Some(group.name.as_str());
        }
    }

    for (index, (object, group)) in objects.iter().zip(&owner).enumerate() {
        let handle = ObjectId::from_slot(index);
        match group {
            None => return Err(GraphError::NotGrouped { object: handle }.into()),
            Some(group) if *group != object.control_group_name() => {
                return Err(GraphError::WrongGroup {
                    object: handle,
                    group: (*group).to_owned(),
                }
                .into());
            }
            Some(_) => {}
        }
    }
    Ok(())
}
