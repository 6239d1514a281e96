//! Tools-config import: file to control graph.

use std::path::Path;

use rtc_config::ImportConfig;
use rtc_graph::{ControlGraph, ControlGroup};

use crate::error::{AppError, AppResult};

/// Summary of a control group for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    pub rule_count: usize,
    pub condition_count: usize,
    pub signal_count: usize,
    pub expression_count: usize,
    pub input_count: usize,
    pub output_count: usize,
}

/// Load the import config, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> AppResult<ImportConfig> {
    match path {
        Some(path) => Ok(rtc_config::load(path)?),
        None => Ok(ImportConfig::default()),
    }
}

/// Read, convert and assemble a tools-config document.
pub fn import_str(xml: &str, config: &ImportConfig) -> AppResult<ControlGraph> {
    let document = rtc_xml::read_tools_config(xml)?;
    let descriptors = rtc_convert::convert(&document, &config.converter_options())?;
    tracing::debug!(descriptors = descriptors.len(), "Converted tools config");
    Ok(rtc_graph::assemble(descriptors)?)
}

/// Read, convert and assemble a tools-config file.
pub fn import_tools_config(path: &Path, config: &ImportConfig) -> AppResult<ControlGraph> {
    tracing::info!(path = %path.display(), "Importing tools config");
    let xml = std::fs::read_to_string(path)?;
    import_str(&xml, config)
}

/// List all control groups with member counts.
pub fn list_groups(graph: &ControlGraph) -> Vec<GroupSummary> {
    graph
        .groups()
        .iter()
        .map(|group| GroupSummary {
            name: group.name.clone(),
            rule_count: group.rules.len(),
            condition_count: group.conditions.len(),
            signal_count: group.signals.len(),
            expression_count: group.mathematical_expressions.len(),
            input_count: group.inputs.len(),
            output_count: group.outputs.len(),
        })
        .collect()
}

/// Get a control group by name.
pub fn get_group<'a>(graph: &'a ControlGraph, name: &str) -> AppResult<&'a ControlGroup> {
    graph
        .group(name)
        .ok_or_else(|| AppError::GroupNotFound(name.to_string()))
}
