//! Import configuration schema.

use serde::Deserialize;

use rtc_core::tag;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImportConfig {
    pub version: u32,
    #[serde(default)]
    pub expressions: ExpressionsDef,
    #[serde(default = "default_lookup_tables")]
    pub lookup_tables: Vec<LookupTableDef>,
    #[serde(default)]
    pub report: ReportDef,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            expressions: ExpressionsDef::default(),
            lookup_tables: default_lookup_tables(),
            report: ReportDef::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExpressionsDef {
    #[serde(default)]
    pub emission: EmissionDef,
    /// Version 0 switch, replaced by `emission`.
    #[serde(default)]
    pub fold_nested: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmissionDef {
    #[default]
    All,
    RootsOnly,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LookupTableDef {
    /// Id tag with brackets, e.g. `[HydraulicRule]`. Version 0 files wrote
    /// it bare.
    pub tag: String,
    pub kind: LookupTableKindDef,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LookupTableKindDef {
    HydraulicRule,
    FactorRule,
    LookupSignal,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportDef {
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "default_true")]
    pub include_unresolved: bool,
}

impl Default for ReportDef {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            include_unresolved: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

fn default_true() -> bool {
    true
}

fn default_lookup_tables() -> Vec<LookupTableDef> {
    [
        (tag::HYDRAULIC_RULE, LookupTableKindDef::HydraulicRule),
        (tag::FACTOR_RULE, LookupTableKindDef::FactorRule),
        (tag::LOOKUP_SIGNAL, LookupTableKindDef::LookupSignal),
    ]
    .into_iter()
    .map(|(tag, kind)| LookupTableDef {
        tag: tag.to_owned(),
        kind,
    })
    .collect()
}
