use serde::{Deserialize, Serialize};

use crate::rule::{Extrapolation, Interpolation, LookupTable};

/// Signal kinds. Signals feed rules instead of driving a structure directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SignalKind {
    Lookup {
        table: LookupTable,
        interpolation: Interpolation,
        extrapolation: Extrapolation,
    },
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Lookup { .. } => "lookup",
        }
    }
}
