//! Rule elements to rule and signal descriptors.

use rtc_core::{RtcError, RtcResult, tag};
use rtc_model::{
    ComponentDescriptor, ComponentKind, DeadbandType, Extrapolation, Interpolation, IntervalType,
    LookupTable, RuleKind, Setpoint, SignalKind,
};
use rtc_xml::{
    Deadband, IntervalElement, IntervalLimit, LookupTableElement, PidElement, PidSetpoint,
    RuleElement, SeriesRef, TimeAbsoluteElement, TimeRelativeElement,
};

use crate::options::{ConverterOptions, LookupTableKind};

/// Convert one rule element.
///
/// Returns `Ok(None)` for helper elements that are not part of the control
/// graph (`unitDelay`).
pub(crate) fn convert_rule(
    element: &RuleElement,
    options: &ConverterOptions,
) -> RtcResult<Option<ComponentDescriptor>> {
    let descriptor = match element {
        RuleElement::TimeAbsolute(e) => time_absolute(e),
        RuleElement::TimeRelative(e) => time_relative(e)?,
        RuleElement::Pid(e) => pid(e)?,
        RuleElement::Interval(e) => interval(e)?,
        RuleElement::LookupTable(e) => lookup_table(e, options)?,
        RuleElement::UnitDelay(e) => {
            tracing::debug!(id = %e.id, "Skipping unit delay helper");
            return Ok(None);
        }
        RuleElement::Unknown { element, id } => {
            return Err(RtcError::Unsupported {
                what: "rule element",
                id: id.clone().unwrap_or_default(),
                found: element.clone(),
            });
        }
    };
    Ok(Some(descriptor))
}

fn time_absolute(e: &TimeAbsoluteElement) -> ComponentDescriptor {
    let mut d = ComponentDescriptor::new(&e.id, ComponentKind::Rule(RuleKind::Time));
    push_input(&mut d, e.input.as_ref());
    push_output(&mut d, e.output.as_deref());
    d
}

fn time_relative(e: &TimeRelativeElement) -> RtcResult<ComponentDescriptor> {
    let from_value = match e.value_option.as_deref() {
        None | Some("ABSOLUTE") => false,
        Some("RELATIVE") => true,
        Some(other) => {
            return Err(RtcError::Unsupported {
                what: "valueOption",
                id: e.id.clone(),
                found: other.to_owned(),
            });
        }
    };
    let kind = RuleKind::RelativeTime {
        from_value,
        minimum_period: e.maximum_period.unwrap_or(0.0),
        interpolation: interpolation(e.interpolation.as_deref(), &e.id)?,
        table: LookupTable::new(e.control_table.iter().map(|r| (r.time, r.value)).collect()),
    };
    let mut d = ComponentDescriptor::new(&e.id, ComponentKind::Rule(kind));
    push_output(&mut d, e.output.as_deref());
    Ok(d)
}

fn pid(e: &PidElement) -> RtcResult<ComponentDescriptor> {
    let setpoint = match &e.setpoint {
        Some(PidSetpoint::Value(value)) => Setpoint::Constant { value: *value },
        Some(PidSetpoint::Series(series)) => classify_setpoint(series),
        None => {
            return Err(RtcError::MissingField {
                what: "setpoint",
                id: e.id.clone(),
            });
        }
    };
    let kind = RuleKind::Pid {
        setting_min: e.setting_min,
        setting_max: e.setting_max,
        setting_max_speed: e.setting_max_speed,
        kp: e.kp,
        ki: e.ki,
        kd: e.kd,
        setpoint,
    };
    let mut d = ComponentDescriptor::new(&e.id, ComponentKind::Rule(kind));
    push_input(&mut d, e.input.as_ref());
    push_output(&mut d, e.output.as_deref());
    push_signal_setpoint(&mut d);
    Ok(d)
}

fn interval(e: &IntervalElement) -> RtcResult<ComponentDescriptor> {
    let text = e.setpoint.as_deref().ok_or_else(|| RtcError::MissingField {
        what: "setpoint",
        id: e.id.clone(),
    })?;
    // Interval rules follow a series or a signal, never a constant.
    let setpoint = match classify_setpoint(text) {
        Setpoint::Constant { .. } => {
            return Err(RtcError::InvalidValue {
                what: "setpoint",
                id: e.id.clone(),
                value: text.to_owned(),
            });
        }
        setpoint => setpoint,
    };
    let kind = RuleKind::Interval {
        setting_below: e.setting_below,
        setting_above: e.setting_above,
        interval: match e.limit {
            IntervalLimit::MaxStep(max_step) => IntervalType::Fixed { max_step },
            IntervalLimit::MaxSpeed(max_speed) => IntervalType::Variable { max_speed },
        },
        deadband: match e.deadband {
            Deadband::Absolute(value) => DeadbandType::Fixed { value },
            Deadband::Relative(percentage) => DeadbandType::PercentageDischarge { percentage },
        },
        setpoint,
    };
    let mut d = ComponentDescriptor::new(&e.id, ComponentKind::Rule(kind));
    push_input(&mut d, e.input.as_ref());
    push_output(&mut d, e.output.as_deref());
    push_signal_setpoint(&mut d);
    Ok(d)
}

fn lookup_table(
    e: &LookupTableElement,
    options: &ConverterOptions,
) -> RtcResult<ComponentDescriptor> {
    let id_tag = tag::tag_of(&e.id).unwrap_or_default();
    let kind = options
        .lookup_tables
        .get(id_tag)
        .ok_or_else(|| RtcError::Unsupported {
            what: "lookup table tag",
            id: e.id.clone(),
            found: id_tag.to_owned(),
        })?;

    let table = LookupTable::new(e.table.iter().map(|r| (r.x, r.y)).collect());
    let interpolation = interpolation(e.interpolation.as_deref(), &e.id)?;
    let extrapolation = extrapolation(e.extrapolation.as_deref(), &e.id)?;

    let component = match kind {
        LookupTableKind::HydraulicRule => ComponentKind::Rule(RuleKind::Hydraulic {
            table,
            interpolation,
            extrapolation,
        }),
        LookupTableKind::FactorRule => {
            let first = table.points.first().ok_or_else(|| RtcError::MissingField {
                what: "table record",
                id: e.id.clone(),
            })?;
            let factor = -first.1;
            ComponentKind::Rule(RuleKind::Factor {
                factor,
                table: LookupTable::factor(factor),
                interpolation,
                extrapolation,
            })
        }
        LookupTableKind::LookupSignal => ComponentKind::Signal(SignalKind::Lookup {
            table,
            interpolation,
            extrapolation,
        }),
    };

    let mut d = ComponentDescriptor::new(&e.id, component);
    push_input(&mut d, e.input.as_ref());
    // A signal's output names the signal itself; consumers reference it.
    if !matches!(d.kind, ComponentKind::Signal(_)) {
        push_output(&mut d, e.output.as_deref());
    }
    Ok(d)
}

/// `[Signal]...` is a signal, a finite number is a constant, anything else a
/// series.
fn classify_setpoint(text: &str) -> Setpoint {
    if tag::tag_of(text) == Some(tag::SIGNAL) {
        Setpoint::Signal {
            reference: text.to_owned(),
        }
    } else if let Some(value) = text.parse::<f64>().ok().filter(|v| v.is_finite()) {
        Setpoint::Constant { value }
    } else {
        Setpoint::TimeSeries {
            name: text.to_owned(),
        }
    }
}

fn interpolation(option: Option<&str>, id: &str) -> RtcResult<Interpolation> {
    match option {
        None => Ok(Interpolation::Linear),
        Some(raw) => Interpolation::from_option(raw).ok_or_else(|| RtcError::Unsupported {
            what: "interpolationOption",
            id: id.to_owned(),
            found: raw.to_owned(),
        }),
    }
}

fn extrapolation(option: Option<&str>, id: &str) -> RtcResult<Extrapolation> {
    match option {
        None => Ok(Extrapolation::Constant),
        Some(raw) => Extrapolation::from_option(raw).ok_or_else(|| RtcError::Unsupported {
            what: "extrapolationOption",
            id: id.to_owned(),
            found: raw.to_owned(),
        }),
    }
}

fn push_input(d: &mut ComponentDescriptor, input: Option<&SeriesRef>) {
    if let Some(series) = input.filter(|s| !s.value.is_empty()) {
        d.references.input.push(series.value.clone());
    }
}

fn push_output(d: &mut ComponentDescriptor, output: Option<&str>) {
    if let Some(output) = output {
        d.references.output.push(output.to_owned());
    }
}

fn push_signal_setpoint(d: &mut ComponentDescriptor) {
    let reference = match &d.kind {
        ComponentKind::Rule(kind) => match kind.setpoint() {
            Some(Setpoint::Signal { reference }) => Some(reference.clone()),
            _ => None,
        },
        _ => None,
    };
    d.references.signal.extend(reference);
}
