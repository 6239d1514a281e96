//! Condition (trigger) kinds.

use serde::{Deserialize, Serialize};

/// Whether the compared series is taken explicitly from the model or implicitly
/// from the previous time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    Explicit,
    Implicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Equal,
    Unequal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operation {
    /// Map a `relationalOperator` value.
    pub fn from_xml(operator: &str) -> Option<Self> {
        match operator {
            "Equal" => Some(Self::Equal),
            "Unequal" => Some(Self::Unequal),
            "Less" => Some(Self::Less),
            "LessEqual" => Some(Self::LessEqual),
            "Greater" => Some(Self::Greater),
            "GreaterEqual" => Some(Self::GreaterEqual),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::Unequal => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationalCondition {
    pub reference: ReferenceType,
    pub operation: Operation,
    /// Comparison value; zero for directional conditions.
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "condition")]
pub enum ConditionKind {
    /// Compares an input against a constant.
    Standard(RelationalCondition),
    /// Compares a time series against a constant.
    Time(RelationalCondition),
    /// Compares the direction in which an input is changing.
    Directional(RelationalCondition),
}

impl ConditionKind {
    pub fn relation(&self) -> &RelationalCondition {
        match self {
            ConditionKind::Standard(r) | ConditionKind::Time(r) | ConditionKind::Directional(r) => r,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionKind::Standard(_) => "standard",
            ConditionKind::Time(_) => "time",
            ConditionKind::Directional(_) => "directional",
        }
    }
}
