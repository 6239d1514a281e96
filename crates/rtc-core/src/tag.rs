//! Bracketed tags of the tools-config naming convention.
//!
//! Component ids and references carry a leading `[Tag]`, e.g.
//! `[PID]Weir control/pid rule` or `[Input]Weir1/CrestLevel`.

pub const TIME_RULE: &str = "[TimeRule]";
pub const RELATIVE_TIME_RULE: &str = "[RelativeTimeRule]";
pub const PID_RULE: &str = "[PID]";
pub const INTERVAL_RULE: &str = "[IntervalRule]";
pub const HYDRAULIC_RULE: &str = "[HydraulicRule]";
pub const FACTOR_RULE: &str = "[FactorRule]";
pub const LOOKUP_SIGNAL: &str = "[LookupSignal]";

pub const STANDARD_CONDITION: &str = "[StandardCondition]";
pub const TIME_CONDITION: &str = "[TimeCondition]";
pub const DIRECTIONAL_CONDITION: &str = "[DirectionalCondition]";

pub const INPUT: &str = "[Input]";
pub const OUTPUT: &str = "[Output]";
pub const SETPOINT: &str = "[SP]";
pub const SIGNAL: &str = "[Signal]";
pub const STATUS: &str = "[Status]";
pub const DELAYED: &str = "[Delayed]";
pub const INTEGRAL_PART: &str = "[IP]";
pub const DIFFERENTIAL_PART: &str = "[DP]";

/// Tags naming time series exchanged with the model rather than components.
const CONNECTION_POINT_TAGS: [&str; 7] = [
    INPUT,
    OUTPUT,
    SETPOINT,
    STATUS,
    DELAYED,
    INTEGRAL_PART,
    DIFFERENTIAL_PART,
];

/// Split a leading `[Tag]` off a string.
///
/// Returns the tag including brackets (if any) and the remainder.
pub fn split_tag(value: &str) -> (Option<&str>, &str) {
    if !value.starts_with('[') {
        return (None, value);
    }
    match value.find(']') {
        Some(end) => (Some(&value[..=end]), &value[end + 1..]),
        None => (None, value),
    }
}

/// The leading tag of a string, if it has one.
pub fn tag_of(value: &str) -> Option<&str> {
    split_tag(value).0
}

pub fn has_tag(value: &str) -> bool {
    tag_of(value).is_some()
}

/// Whether a reference names a connection point instead of a component.
pub fn is_connection_point(reference: &str) -> bool {
    tag_of(reference).is_some_and(|tag| CONNECTION_POINT_TAGS.contains(&tag))
}

/// Whether a connection-point reference is written by the control system.
pub fn is_output_point(reference: &str) -> bool {
    matches!(
        tag_of(reference),
        Some(OUTPUT | STATUS | INTEGRAL_PART | DIFFERENTIAL_PART)
    )
}
