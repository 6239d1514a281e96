//! Rule kinds and their formula parameters.

use serde::{Deserialize, Serialize};

/// Interpolation between table points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Step function (`BLOCK` in tools-config files).
    Constant,
    Linear,
}

impl Interpolation {
    /// Map an `interpolationOption` value.
    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "BLOCK" => Some(Self::Constant),
            "LINEAR" => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Extrapolation beyond the table range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolation {
    Constant,
    Linear,
}

impl Extrapolation {
    /// Map an `extrapolationOption` value.
    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "BLOCK" => Some(Self::Constant),
            "LINEAR" => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Piecewise function given as `(argument, value)` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    pub points: Vec<(f64, f64)>,
}

impl LookupTable {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// The two-point table a factor rule is stored as.
    pub fn factor(factor: f64) -> Self {
        Self::new(vec![(-1.0, -factor), (1.0, factor)])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Where a controller takes its setpoint from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Setpoint {
    Constant { value: f64 },
    /// A time series supplied with the model (`[SP]...`).
    TimeSeries { name: String },
    /// The output of a lookup signal (`[Signal]...`).
    Signal { reference: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IntervalType {
    /// `settingMaxStep`
    Fixed { max_step: f64 },
    /// `settingMaxSpeed`
    Variable { max_speed: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeadbandType {
    /// `deadbandSetpointAbsolute`
    Fixed { value: f64 },
    /// `deadbandSetpointRelative`
    PercentageDischarge { percentage: f64 },
}

/// Rule kind defines the formula and parameters of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuleKind {
    /// Setting read from a time series supplied with the model.
    Time,

    /// Setting read from a table relative to the time the rule became active.
    RelativeTime {
        /// Table is applied relative to the current value instead of absolute.
        from_value: bool,
        minimum_period: f64,
        interpolation: Interpolation,
        /// `(seconds, value)` points.
        table: LookupTable,
    },

    Pid {
        setting_min: f64,
        setting_max: f64,
        setting_max_speed: f64,
        kp: f64,
        ki: f64,
        kd: f64,
        setpoint: Setpoint,
    },

    Interval {
        setting_below: f64,
        setting_above: f64,
        interval: IntervalType,
        deadband: DeadbandType,
        setpoint: Setpoint,
    },

    Hydraulic {
        table: LookupTable,
        interpolation: Interpolation,
        extrapolation: Extrapolation,
    },

    /// Setting proportional to the input.
    Factor {
        factor: f64,
        table: LookupTable,
        interpolation: Interpolation,
        extrapolation: Extrapolation,
    },
}

impl RuleKind {
    /// Short human-readable name of the formula.
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Time => "time",
            RuleKind::RelativeTime { .. } => "relative time",
            RuleKind::Pid { .. } => "PID",
            RuleKind::Interval { .. } => "interval",
            RuleKind::Hydraulic { .. } => "hydraulic",
            RuleKind::Factor { .. } => "factor",
        }
    }

    pub fn setpoint(&self) -> Option<&Setpoint> {
        match self {
            RuleKind::Pid { setpoint, .. } | RuleKind::Interval { setpoint, .. } => Some(setpoint),
            _ => None,
        }
    }
}
