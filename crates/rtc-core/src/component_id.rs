//! Structured view of a `[Tag]ControlGroupName/ComponentName` identifier.

use core::fmt;

use crate::tag::split_tag;

/// Borrowed parts of a component identifier.
///
/// Parsing never fails: an id without a `/` has an empty group and the whole
/// untagged text as its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId<'a> {
    pub tag: Option<&'a str>,
    pub group: &'a str,
    pub name: &'a str,
}

impl<'a> ComponentId<'a> {
    pub fn parse(id: &'a str) -> Self {
        let (tag, rest) = split_tag(id);
        match rest.split_once('/') {
            Some((group, name)) => Self { tag, group, name },
            None => Self {
                tag,
                group: "",
                name: rest,
            },
        }
    }
}

impl fmt::Display for ComponentId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag {
            f.write_str(tag)?;
        }
        if self.group.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{}/{}", self.group, self.name)
        }
    }
}

/// Control group name embedded in an id.
pub fn control_group_name(id: &str) -> &str {
    ComponentId::parse(id).group
}
