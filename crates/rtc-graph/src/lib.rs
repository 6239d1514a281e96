//! rtc-graph: assembled control graph for RTC tools-config imports.
//!
//! Provides:
//! - Reference index from component ids and (group, name) aliases to handles
//! - Two-pass graph assembler with connection points for unresolved
//!   inputs/outputs
//! - Control groups partitioning the assembled objects
//!
//! # Example
//!
//! ```
//! use rtc_graph::assemble;
//! use rtc_model::{ComponentDescriptor, ComponentKind, RuleKind};
//!
//! let mut rule = ComponentDescriptor::new("[TimeRule]group1/A", ComponentKind::Rule(RuleKind::Time));
//! rule.references.output.push("[Output]Weir/Crest level".into());
//! let graph = assemble(vec![rule]).unwrap();
//!
//! let group = graph.group("group1").unwrap();
//! assert_eq!(group.rules.len(), 1);
//! assert_eq!(group.outputs.len(), 1);
//! ```

pub mod assembler;
pub mod error;
pub mod graph;
pub mod groups;
pub mod index;
pub mod object;
pub(crate) mod validate;

pub use assembler::{GraphAssembler, assemble};
pub use error::GraphError;
pub use graph::{ControlGraph, Relation, UnresolvedReference};
pub use groups::{ControlGroup, ControlGroupBuilder};
pub use index::{ReferenceIndex, Resolution};
pub use object::{
    Condition, ConnectionPoint, MathematicalExpression, ObjectRole, RtcObject, Rule, Signal,
};
