//! Shared application service layer for RTC tools-config imports.
//!
//! This crate gives the CLI one interface for loading the import config,
//! turning a tools-config file into a control graph and reporting on it.

pub mod error;
pub mod import_service;
pub mod report;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use import_service::{
    GroupSummary, get_group, import_str, import_tools_config, list_groups, load_config,
};
pub use report::{
    ConditionReport, ExpressionReport, GraphReport, GroupReport, RuleReport, SignalReport,
    UnresolvedReport, build_report, group_report, render_report, save_report,
};
