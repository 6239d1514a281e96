//! Parsed component model for RTC tools-config imports.
//!
//! This crate holds the intermediate representation between the XML bindings
//! and the assembled object graph. Every parsed element becomes a
//! [`ComponentDescriptor`] that carries its identity, its kind-specific
//! configuration and the *names* of the components it references.
//!
//! # Architecture
//!
//! - Rules, conditions and signals are closed sum types ([`RuleKind`],
//!   [`ConditionKind`], [`SignalKind`]) filled by one dispatch during parsing
//! - Expressions are binary trees of [`ExpressionNode`]s whose shared
//!   sub-expressions are `Rc` nodes, so identity survives tree building
//! - Descriptors never own other descriptors; relations are string references
//!   resolved later by the graph assembler
//!
//! # Design Principles
//!
//! - **Plain data**: no I/O and no resolution logic lives here
//! - **Serializable kinds**: component parameters derive serde so reports can
//!   show them unchanged

pub mod condition;
pub mod descriptor;
pub mod expression;
pub mod rule;
pub mod signal;

pub use condition::{ConditionKind, Operation, ReferenceType, RelationalCondition};
pub use descriptor::{ComponentDescriptor, ComponentKind, References};
pub use expression::{BranchNode, ExpressionNode, ExpressionTree, Operator};
pub use rule::{
    DeadbandType, Extrapolation, Interpolation, IntervalType, LookupTable, RuleKind, Setpoint,
};
pub use signal::SignalKind;
