//! Component descriptors: one per parsed element, references still textual.

use rtc_core::{ComponentId, control_group_name};

use crate::condition::ConditionKind;
use crate::expression::ExpressionTree;
use crate::rule::RuleKind;
use crate::signal::SignalKind;

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Rule(RuleKind),
    Condition(ConditionKind),
    Signal(SignalKind),
    Expression(ExpressionTree),
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Rule(_) => "rule",
            ComponentKind::Condition(_) => "condition",
            ComponentKind::Signal(_) => "signal",
            ComponentKind::Expression(_) => "expression",
        }
    }
}

/// Names of referenced components, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    pub input: Vec<String>,
    pub output: Vec<String>,
    pub true_output: Vec<String>,
    pub false_output: Vec<String>,
    pub signal: Vec<String>,
}

impl References {
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
            && self.output.is_empty()
            && self.true_output.is_empty()
            && self.false_output.is_empty()
            && self.signal.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    pub id: String,
    pub control_group_name: String,
    pub kind: ComponentKind,
    pub references: References,
}

impl ComponentDescriptor {
    /// New descriptor with the group name taken from the id.
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        let id = id.into();
        let control_group_name = control_group_name(&id).to_owned();
        Self {
            id,
            control_group_name,
            kind,
            references: References::default(),
        }
    }

    /// Component name without tag and group.
    pub fn name(&self) -> &str {
        ComponentId::parse(&self.id).name
    }

    pub fn expression_tree(&self) -> Option<&ExpressionTree> {
        match &self.kind {
            ComponentKind::Expression(tree) => Some(tree),
            _ => None,
        }
    }
}
