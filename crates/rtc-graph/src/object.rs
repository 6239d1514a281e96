//! Assembled control-graph objects.
//!
//! Objects refer to each other through [`ObjectId`] handles into the
//! [`ControlGraph`](crate::ControlGraph) arena, so a condition shared by two
//! parents or two conditions pointing at each other need no shared ownership.

use rtc_core::{ObjectId, control_group_name};
use rtc_model::{ConditionKind, ExpressionTree, RuleKind, SignalKind};

/// Role of an object inside its control group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRole {
    Input,
    Output,
    Rule,
    Condition,
    Signal,
    MathematicalExpression,
}

impl ObjectRole {
    pub fn label(self) -> &'static str {
        match self {
            ObjectRole::Input => "input",
            ObjectRole::Output => "output",
            ObjectRole::Rule => "rule",
            ObjectRole::Condition => "condition",
            ObjectRole::Signal => "signal",
            ObjectRole::MathematicalExpression => "mathematical expression",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub kind: RuleKind,
    pub inputs: Vec<ObjectId>,
    pub outputs: Vec<ObjectId>,
    /// Signals feeding this rule's setpoint.
    pub signals: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub id: String,
    pub name: String,
    pub kind: ConditionKind,
    pub input: Option<ObjectId>,
    pub true_outputs: Vec<ObjectId>,
    pub false_outputs: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub id: String,
    pub name: String,
    pub kind: SignalKind,
    pub inputs: Vec<ObjectId>,
    /// Rules that read this signal.
    pub rules: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathematicalExpression {
    pub id: String,
    /// Result name (`<y>`) of the expression.
    pub name: String,
    /// Infix rendering; operands that are objects of their own appear by name.
    pub expression: String,
    pub inputs: Vec<ObjectId>,
    pub tree: ExpressionTree,
}

/// A named input or output location the graph reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPoint {
    /// The reference text exactly as written, e.g. `[Input]Station/Level`.
    pub name: String,
    /// Group of the object that first referenced this point.
    pub control_group_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RtcObject {
    Input(ConnectionPoint),
    Output(ConnectionPoint),
    Rule(Rule),
    Condition(Condition),
    Signal(Signal),
    MathematicalExpression(MathematicalExpression),
}

impl RtcObject {
    pub fn role(&self) -> ObjectRole {
        match self {
            RtcObject::Input(_) => ObjectRole::Input,
            RtcObject::Output(_) => ObjectRole::Output,
            RtcObject::Rule(_) => ObjectRole::Rule,
            RtcObject::Condition(_) => ObjectRole::Condition,
            RtcObject::Signal(_) => ObjectRole::Signal,
            RtcObject::MathematicalExpression(_) => ObjectRole::MathematicalExpression,
        }
    }

    /// Component id; connection points have none.
    pub fn id(&self) -> Option<&str> {
        match self {
            RtcObject::Input(_) | RtcObject::Output(_) => None,
            RtcObject::Rule(o) => Some(&o.id),
            RtcObject::Condition(o) => Some(&o.id),
            RtcObject::Signal(o) => Some(&o.id),
            RtcObject::MathematicalExpression(o) => Some(&o.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RtcObject::Input(p) | RtcObject::Output(p) => &p.name,
            RtcObject::Rule(o) => &o.name,
            RtcObject::Condition(o) => &o.name,
            RtcObject::Signal(o) => &o.name,
            RtcObject::MathematicalExpression(o) => &o.name,
        }
    }

    /// The control group this object belongs to.
    pub fn control_group_name(&self) -> &str {
        match self {
            RtcObject::Input(p) | RtcObject::Output(p) => &p.control_group_name,
            _ => self.id().map(control_group_name).unwrap_or_default(),
        }
    }

    /// Every handle this object links to, in field order.
    pub fn links(&self) -> Vec<ObjectId> {
        match self {
            RtcObject::Input(_) | RtcObject::Output(_) => Vec::new(),
            RtcObject::Rule(o) => [&o.inputs, &o.outputs, &o.signals]
                .into_iter()
                .flatten()
                .copied()
                .collect(),
            RtcObject::Condition(o) => o
                .input
                .iter()
                .chain(&o.true_outputs)
                .chain(&o.false_outputs)
                .copied()
                .collect(),
            RtcObject::Signal(o) => o.inputs.iter().chain(&o.rules).copied().collect(),
            RtcObject::MathematicalExpression(o) => o.inputs.clone(),
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            RtcObject::Rule(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            RtcObject::Condition(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_signal(&self) -> Option<&Signal> {
        match self {
            RtcObject::Signal(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&MathematicalExpression> {
        match self {
            RtcObject::MathematicalExpression(o) => Some(o),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtc_core::Id;

    #[test]
    fn point_group_is_stored() {
        let point = RtcObject::Input(ConnectionPoint {
            name: "[Input]Station/Level".into(),
            control_group_name: "cg".into(),
        });
        assert_eq!(point.role(), ObjectRole::Input);
        assert_eq!(point.id(), None);
        assert_eq!(point.control_group_name(), "cg");
        assert!(point.links().is_empty());
    }

    #[test]
    fn rule_group_comes_from_id() {
        let rule = RtcObject::Rule(Rule {
            id: "[TimeRule]group1/A".into(),
            name: "A".into(),
            kind: RuleKind::Time,
            inputs: vec![Id::from_index(3)],
            outputs: vec![Id::from_index(4)],
            signals: vec![],
        });
        assert_eq!(rule.control_group_name(), "group1");
        assert_eq!(rule.links(), vec![Id::from_index(3), Id::from_index(4)]);
        assert!(rule.as_rule().is_some());
        assert!(rule.as_signal().is_none());
    }
}
