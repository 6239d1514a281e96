//! Standard trigger elements to condition descriptors.

use rtc_core::{RtcError, RtcResult, tag};
use rtc_model::{
    ComponentDescriptor, ComponentKind, ConditionKind, Operation, ReferenceType,
    RelationalCondition,
};
use rtc_xml::{Operand, ReferenceKind, StandardTriggerElement, TriggerElement};

/// Build the descriptor of one standard trigger. Nested triggers are only
/// referenced here; the caller walks them.
pub(crate) fn convert_condition(e: &StandardTriggerElement) -> RtcResult<ComponentDescriptor> {
    let operation =
        Operation::from_xml(&e.condition.operator).ok_or_else(|| RtcError::Unsupported {
            what: "relational operator",
            id: e.id.clone(),
            found: e.condition.operator.clone(),
        })?;

    let reference = match &e.condition.x1 {
        Operand::Series(series) => match series.reference {
            Some(ReferenceKind::Explicit) => ReferenceType::Explicit,
            Some(ReferenceKind::Implicit) | None => ReferenceType::Implicit,
        },
        Operand::Value(_) => ReferenceType::Implicit,
    };

    let id_tag = tag::tag_of(&e.id);
    let kind = match id_tag {
        Some(tag::STANDARD_CONDITION) => ConditionKind::Standard(RelationalCondition {
            reference,
            operation,
            value: comparison_value(e)?,
        }),
        Some(tag::TIME_CONDITION) => ConditionKind::Time(RelationalCondition {
            reference,
            operation,
            value: comparison_value(e)?,
        }),
        Some(tag::DIRECTIONAL_CONDITION) => ConditionKind::Directional(RelationalCondition {
            reference,
            operation,
            value: 0.0,
        }),
        other => {
            return Err(RtcError::Unsupported {
                what: "condition tag",
                id: e.id.clone(),
                found: other.unwrap_or_default().to_owned(),
            });
        }
    };

    let mut d = ComponentDescriptor::new(&e.id, ComponentKind::Condition(kind));
    if reference == ReferenceType::Explicit {
        d.references.input.push(e.condition.x1.text().to_owned());
    }
    for output in &e.true_outputs {
        d.references.true_output.push(output_reference(output)?.to_owned());
    }
    for output in &e.false_outputs {
        d.references.false_output.push(output_reference(output)?.to_owned());
    }
    Ok(d)
}

fn comparison_value(e: &StandardTriggerElement) -> RtcResult<f64> {
    match &e.condition.x2 {
        Operand::Value(raw) => raw.trim().parse().map_err(|_| RtcError::InvalidValue {
            what: "x2Value",
            id: e.id.clone(),
            value: raw.clone(),
        }),
        // Compared against another series; there is no constant.
        Operand::Series(_) => Ok(0.0),
    }
}

/// Name under which a nested trigger is referenced from its parent.
pub(crate) fn output_reference(output: &TriggerElement) -> RtcResult<&str> {
    match output {
        TriggerElement::Standard(standard) => Ok(&standard.id),
        TriggerElement::Expression(expression) => Ok(&expression.id),
        TriggerElement::RuleReference(rule) => Ok(rule),
        TriggerElement::Unknown { element } => Err(RtcError::Unsupported {
            what: "trigger element",
            id: String::new(),
            found: element.clone(),
        }),
    }
}
