//! Serializable reports of an assembled control graph.

use serde::Serialize;

use rtc_config::{ReportDef, ReportFormat};
use rtc_core::ObjectId;
use rtc_graph::{ControlGraph, ControlGroup, RtcObject};
use rtc_model::{ConditionKind, RuleKind, SignalKind};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphReport {
    pub groups: Vec<GroupReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<UnresolvedReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupReport {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub rules: Vec<RuleReport>,
    pub conditions: Vec<ConditionReport>,
    pub signals: Vec<SignalReport>,
    pub mathematical_expressions: Vec<ExpressionReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuleReport {
    pub id: String,
    pub name: String,
    pub kind: RuleKind,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConditionReport {
    pub id: String,
    pub name: String,
    pub kind: ConditionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub true_outputs: Vec<String>,
    pub false_outputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignalReport {
    pub id: String,
    pub name: String,
    pub kind: SignalKind,
    pub inputs: Vec<String>,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpressionReport {
    pub id: String,
    pub name: String,
    pub expression: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnresolvedReport {
    pub from: String,
    pub relation: String,
    pub reference: String,
    pub ambiguous: bool,
}

/// Label of a linked object: its component id, or the point name.
fn label(graph: &ControlGraph, id: ObjectId) -> String {
    graph
        .object(id)
        .map(|object| object.id().unwrap_or(object.name()).to_owned())
        .unwrap_or_else(|| id.to_string())
}

fn labels(graph: &ControlGraph, ids: &[ObjectId]) -> Vec<String> {
    ids.iter().map(|&id| label(graph, id)).collect()
}

fn members<'g>(graph: &'g ControlGraph, ids: &[ObjectId]) -> Vec<&'g RtcObject> {
    ids.iter().filter_map(|&id| graph.object(id)).collect()
}

/// Report one control group with its members and their links.
pub fn group_report(graph: &ControlGraph, group: &ControlGroup) -> GroupReport {
    GroupReport {
        name: group.name.clone(),
        inputs: labels(graph, &group.inputs),
        outputs: labels(graph, &group.outputs),
        rules: members(graph, &group.rules)
            .into_iter()
            .filter_map(RtcObject::as_rule)
            .map(|rule| RuleReport {
                id: rule.id.clone(),
                name: rule.name.clone(),
                kind: rule.kind.clone(),
                inputs: labels(graph, &rule.inputs),
                outputs: labels(graph, &rule.outputs),
                signals: labels(graph, &rule.signals),
            })
            .collect(),
        conditions: members(graph, &group.conditions)
            .into_iter()
            .filter_map(RtcObject::as_condition)
            .map(|condition| ConditionReport {
                id: condition.id.clone(),
                name: condition.name.clone(),
                kind: condition.kind,
                input: condition.input.map(|id| label(graph, id)),
                true_outputs: labels(graph, &condition.true_outputs),
                false_outputs: labels(graph, &condition.false_outputs),
            })
            .collect(),
        signals: members(graph, &group.signals)
            .into_iter()
            .filter_map(RtcObject::as_signal)
            .map(|signal| SignalReport {
                id: signal.id.clone(),
                name: signal.name.clone(),
                kind: signal.kind.clone(),
                inputs: labels(graph, &signal.inputs),
                rules: labels(graph, &signal.rules),
            })
            .collect(),
        mathematical_expressions: members(graph, &group.mathematical_expressions)
            .into_iter()
            .filter_map(RtcObject::as_expression)
            .map(|expression| ExpressionReport {
                id: expression.id.clone(),
                name: expression.name.clone(),
                expression: expression.expression.clone(),
                inputs: labels(graph, &expression.inputs),
            })
            .collect(),
    }
}

/// Report every group, plus unresolved references when asked to.
pub fn build_report(graph: &ControlGraph, options: &ReportDef) -> GraphReport {
    let unresolved = if options.include_unresolved {
        graph
            .unresolved()
            .iter()
            .map(|u| UnresolvedReport {
                from: label(graph, u.from),
                relation: u.relation.to_string(),
                reference: u.reference.clone(),
                ambiguous: u.ambiguous,
            })
            .collect()
    } else {
        Vec::new()
    };

    GraphReport {
        groups: graph
            .groups()
            .iter()
            .map(|group| group_report(graph, group))
            .collect(),
        unresolved,
    }
}

pub fn render_report(report: &GraphReport, format: ReportFormat) -> AppResult<String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| AppError::Report(format!("Failed to serialize report: {}", e))),
        ReportFormat::Yaml => serde_yaml::to_string(report)
            .map_err(|e| AppError::Report(format!("Failed to serialize report: {}", e))),
    }
}

/// Write a rendered report to a file.
pub fn save_report(path: &std::path::Path, content: &str) -> AppResult<()> {
    std::fs::write(path, content).map_err(|e| AppError::ReportFileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
