//! Import config to converter options.

use rtc_convert::{ConverterOptions, ExpressionEmission, LookupTableKind, LookupTableRegistry};

use crate::schema::{EmissionDef, ImportConfig, LookupTableKindDef};

impl From<LookupTableKindDef> for LookupTableKind {
    fn from(kind: LookupTableKindDef) -> Self {
        match kind {
            LookupTableKindDef::HydraulicRule => Self::HydraulicRule,
            LookupTableKindDef::FactorRule => Self::FactorRule,
            LookupTableKindDef::LookupSignal => Self::LookupSignal,
        }
    }
}

impl From<EmissionDef> for ExpressionEmission {
    fn from(emission: EmissionDef) -> Self {
        match emission {
            EmissionDef::All => Self::All,
            EmissionDef::RootsOnly => Self::RootsOnly,
        }
    }
}

impl ImportConfig {
    /// Options for the converter. The configured lookup-table tags replace
    /// the built-in registry.
    pub fn converter_options(&self) -> ConverterOptions {
        let mut lookup_tables = LookupTableRegistry::empty();
        for table in &self.lookup_tables {
            lookup_tables.insert(table.tag.clone(), table.kind.into());
        }
        ConverterOptions {
            expression_emission: self.expressions.emission.into(),
            lookup_tables,
        }
    }
}
