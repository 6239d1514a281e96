//! Typed bindings for the parts of `rtcToolsConfig` the importer reads.
//!
//! Decoding keeps values close to the document: operators, interpolation
//! options and tagged references stay strings, numbers become `f64`. Unknown
//! formula and trigger elements are kept as `Unknown` so the converter can
//! report them with context.

use crate::element::XmlElement;
use crate::error::{XmlError, XmlResult};

pub const ROOT_ELEMENT: &str = "rtcToolsConfig";

/// All rule and trigger elements of one document, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolsConfig {
    pub rules: Vec<RuleElement>,
    pub triggers: Vec<TriggerElement>,
}

/// `ref` attribute of a series element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Explicit,
    Implicit,
}

/// A time series reference such as `<x ref="EXPLICIT">[Input]a/b</x>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRef {
    pub value: String,
    pub reference: Option<ReferenceKind>,
}

/// An operand written either as `xNSeries` or as `xNValue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Series(SeriesRef),
    Value(String),
}

impl Operand {
    pub fn text(&self) -> &str {
        match self {
            Operand::Series(series) => &series.value,
            Operand::Value(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeValueRecord {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleElement {
    TimeAbsolute(TimeAbsoluteElement),
    TimeRelative(TimeRelativeElement),
    Pid(PidElement),
    Interval(IntervalElement),
    LookupTable(LookupTableElement),
    UnitDelay(UnitDelayElement),
    Unknown { element: String, id: Option<String> },
}

impl RuleElement {
    pub fn id(&self) -> Option<&str> {
        match self {
            RuleElement::TimeAbsolute(e) => Some(&e.id),
            RuleElement::TimeRelative(e) => Some(&e.id),
            RuleElement::Pid(e) => Some(&e.id),
            RuleElement::Interval(e) => Some(&e.id),
            RuleElement::LookupTable(e) => Some(&e.id),
            RuleElement::UnitDelay(e) => Some(&e.id),
            RuleElement::Unknown { id, .. } => id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAbsoluteElement {
    pub id: String,
    pub input: Option<SeriesRef>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRelativeElement {
    pub id: String,
    pub value_option: Option<String>,
    pub maximum_period: Option<f64>,
    pub interpolation: Option<String>,
    pub control_table: Vec<TimeValueRecord>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PidSetpoint {
    Series(String),
    Value(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PidElement {
    pub id: String,
    pub mode: Option<String>,
    pub setting_min: f64,
    pub setting_max: f64,
    pub setting_max_speed: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub input: Option<SeriesRef>,
    pub setpoint: Option<PidSetpoint>,
    pub output: Option<String>,
    pub integral_part: Option<String>,
    pub differential_part: Option<String>,
}

/// How far an interval rule may move its setting per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntervalLimit {
    MaxStep(f64),
    MaxSpeed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deadband {
    Absolute(f64),
    Relative(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalElement {
    pub id: String,
    pub setting_below: f64,
    pub setting_above: f64,
    pub limit: IntervalLimit,
    pub deadband: Deadband,
    pub input: Option<SeriesRef>,
    pub setpoint: Option<String>,
    pub output: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupTableElement {
    pub id: String,
    pub table: Vec<TableRecord>,
    pub interpolation: Option<String>,
    pub extrapolation: Option<String>,
    pub input: Option<SeriesRef>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitDelayElement {
    pub id: String,
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerElement {
    Standard(StandardTriggerElement),
    Expression(ExpressionElement),
    RuleReference(String),
    Unknown { element: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationalCondition {
    pub x1: Operand,
    pub operator: String,
    pub x2: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardTriggerElement {
    pub id: String,
    pub condition: RelationalCondition,
    pub true_outputs: Vec<TriggerElement>,
    pub false_outputs: Vec<TriggerElement>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionElement {
    pub id: String,
    pub x1: Operand,
    pub operator: String,
    pub x2: Operand,
    pub y: String,
}

impl ToolsConfig {
    pub fn decode(root: &XmlElement) -> XmlResult<Self> {
        if root.name != ROOT_ELEMENT {
            return Err(XmlError::UnexpectedRoot {
                expected: ROOT_ELEMENT,
                found: root.name.clone(),
            });
        }

        let mut rules = Vec::new();
        // Newer files put helper components under <components>.
        for (list, item) in [("rules", "rule"), ("components", "component")] {
            for wrapper in root.children_named(list) {
                for rule in wrapper.children_named(item) {
                    for formula in &rule.children {
                        rules.push(decode_rule(formula)?);
                    }
                }
            }
        }

        let mut triggers = Vec::new();
        for wrapper in root.children_named("triggers") {
            for trigger in wrapper.children_named("trigger") {
                triggers.extend(decode_trigger(trigger)?);
            }
        }

        Ok(Self { rules, triggers })
    }
}

fn decode_rule(formula: &XmlElement) -> XmlResult<RuleElement> {
    let rule = match formula.name.as_str() {
        "timeAbsolute" => {
            let id = id_of(formula)?;
            RuleElement::TimeAbsolute(TimeAbsoluteElement {
                input: input_series(formula, &id)?,
                output: output_text(formula, "y"),
                id,
            })
        }
        "timeRelative" => {
            let id = id_of(formula)?;
            let mut control_table = Vec::new();
            if let Some(table) = formula.child("controlTable") {
                for record in table.children_named("record") {
                    control_table.push(TimeValueRecord {
                        time: attr_number(record, "time", &id)?,
                        value: attr_number(record, "value", &id)?,
                    });
                }
            }
            RuleElement::TimeRelative(TimeRelativeElement {
                value_option: owned_text(formula, "valueOption"),
                maximum_period: number(formula, "maximumPeriod", &id)?,
                interpolation: owned_text(formula, "interpolationOption"),
                control_table,
                output: output_text(formula, "y"),
                id,
            })
        }
        "pid" => {
            let id = id_of(formula)?;
            let setpoint = match formula.child("input") {
                Some(input) => match (input.child_text("setpointSeries"), input.child("setpointValue")) {
                    (Some(series), _) => Some(PidSetpoint::Series(series.to_owned())),
                    (None, Some(_)) => number(input, "setpointValue", &id)?.map(PidSetpoint::Value),
                    (None, None) => None,
                },
                None => None,
            };
            RuleElement::Pid(PidElement {
                mode: owned_text(formula, "mode"),
                setting_min: required_number(formula, "settingMin", &id)?,
                setting_max: required_number(formula, "settingMax", &id)?,
                setting_max_speed: required_number(formula, "settingMaxSpeed", &id)?,
                kp: required_number(formula, "kp", &id)?,
                ki: required_number(formula, "ki", &id)?,
                kd: required_number(formula, "kd", &id)?,
                input: input_series(formula, &id)?,
                setpoint,
                output: output_text(formula, "y"),
                integral_part: output_text(formula, "integralPart"),
                differential_part: output_text(formula, "differentialPart"),
                id,
            })
        }
        "interval" => {
            let id = id_of(formula)?;
            let limit = match (
                number(formula, "settingMaxStep", &id)?,
                number(formula, "settingMaxSpeed", &id)?,
            ) {
                (Some(step), _) => IntervalLimit::MaxStep(step),
                (None, Some(speed)) => IntervalLimit::MaxSpeed(speed),
                (None, None) => return Err(missing(formula, "settingMaxStep", &id)),
            };
            let deadband = match (
                number(formula, "deadbandSetpointAbsolute", &id)?,
                number(formula, "deadbandSetpointRelative", &id)?,
            ) {
                (Some(absolute), _) => Deadband::Absolute(absolute),
                (None, Some(relative)) => Deadband::Relative(relative),
                (None, None) => return Err(missing(formula, "deadbandSetpointAbsolute", &id)),
            };
            RuleElement::Interval(IntervalElement {
                setting_below: required_number(formula, "settingBelow", &id)?,
                setting_above: required_number(formula, "settingAbove", &id)?,
                limit,
                deadband,
                input: input_series(formula, &id)?,
                setpoint: formula
                    .child("input")
                    .and_then(|input| input.child_text("setpoint"))
                    .map(str::to_owned),
                output: output_text(formula, "y"),
                status: output_text(formula, "status"),
                id,
            })
        }
        "lookupTable" => {
            let id = id_of(formula)?;
            let mut table = Vec::new();
            if let Some(records) = formula.child("table") {
                for record in records.children_named("record") {
                    table.push(TableRecord {
                        x: attr_number(record, "x", &id)?,
                        y: attr_number(record, "y", &id)?,
                    });
                }
            }
            RuleElement::LookupTable(LookupTableElement {
                table,
                interpolation: owned_text(formula, "interpolationOption"),
                extrapolation: owned_text(formula, "extrapolationOption"),
                input: input_series(formula, &id)?,
                output: output_text(formula, "y"),
                id,
            })
        }
        "unitDelay" => {
            let id = id_of(formula)?;
            RuleElement::UnitDelay(UnitDelayElement {
                input: formula
                    .child("input")
                    .and_then(|input| input.child_text("x"))
                    .map(str::to_owned),
                output: output_text(formula, "y"),
                id,
            })
        }
        other => RuleElement::Unknown {
            element: other.to_owned(),
            id: formula.attr("id").map(str::to_owned),
        },
    };
    Ok(rule)
}

/// Decode a `<trigger>` wrapper. Each wrapper normally holds one element.
fn decode_trigger(trigger: &XmlElement) -> XmlResult<Vec<TriggerElement>> {
    trigger.children.iter().map(decode_trigger_item).collect()
}

fn decode_trigger_item(item: &XmlElement) -> XmlResult<TriggerElement> {
    let decoded = match item.name.as_str() {
        "standard" => {
            let id = id_of(item)?;
            let condition = item
                .child("condition")
                .ok_or_else(|| missing(item, "condition", &id))?;
            let relational = RelationalCondition {
                x1: operand(condition, "x1", &id)?,
                operator: condition
                    .child_text("relationalOperator")
                    .ok_or_else(|| missing(condition, "relationalOperator", &id))?
                    .to_owned(),
                x2: operand(condition, "x2", &id)?,
            };
            TriggerElement::Standard(StandardTriggerElement {
                condition: relational,
                true_outputs: branch(item, "true")?,
                false_outputs: branch(item, "false")?,
                status: output_text(item, "status"),
                id,
            })
        }
        "expression" => {
            let id = id_of(item)?;
            TriggerElement::Expression(ExpressionElement {
                x1: operand(item, "x1", &id)?,
                operator: item
                    .child_text("mathematicalOperator")
                    .ok_or_else(|| missing(item, "mathematicalOperator", &id))?
                    .to_owned(),
                x2: operand(item, "x2", &id)?,
                y: item
                    .child_text("y")
                    .ok_or_else(|| missing(item, "y", &id))?
                    .to_owned(),
                id,
            })
        }
        "ruleReference" => TriggerElement::RuleReference(item.text().to_owned()),
        other => TriggerElement::Unknown {
            element: other.to_owned(),
        },
    };
    Ok(decoded)
}

fn branch(standard: &XmlElement, name: &str) -> XmlResult<Vec<TriggerElement>> {
    let mut outputs = Vec::new();
    if let Some(list) = standard.child(name) {
        for trigger in list.children_named("trigger") {
            outputs.extend(decode_trigger(trigger)?);
        }
    }
    Ok(outputs)
}

fn operand(parent: &XmlElement, prefix: &str, id: &str) -> XmlResult<Operand> {
    let series_name = format!("{prefix}Series");
    if let Some(series) = parent.child(&series_name) {
        return Ok(Operand::Series(series_ref(series, id)?));
    }
    let value_name = format!("{prefix}Value");
    if let Some(value) = parent.child_text(&value_name) {
        return Ok(Operand::Value(value.to_owned()));
    }
    Err(XmlError::MissingElement {
        element: parent.name.clone(),
        child: if prefix == "x1" { "x1Series" } else { "x2Series" },
        id: id.to_owned(),
    })
}

fn series_ref(series: &XmlElement, id: &str) -> XmlResult<SeriesRef> {
    let reference = match series.attr("ref") {
        None => None,
        Some("EXPLICIT") => Some(ReferenceKind::Explicit),
        Some("IMPLICIT") => Some(ReferenceKind::Implicit),
        Some(other) => {
            return Err(XmlError::InvalidValue {
                field: "ref",
                value: other.to_owned(),
                id: id.to_owned(),
            });
        }
    };
    Ok(SeriesRef {
        value: series.text().to_owned(),
        reference,
    })
}

fn input_series(formula: &XmlElement, id: &str) -> XmlResult<Option<SeriesRef>> {
    match formula.child("input").and_then(|input| input.child("x")) {
        Some(x) => series_ref(x, id).map(Some),
        None => Ok(None),
    }
}

fn output_text(formula: &XmlElement, name: &str) -> Option<String> {
    formula
        .child("output")
        .and_then(|output| output.child_text(name))
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn owned_text(parent: &XmlElement, name: &str) -> Option<String> {
    parent.child_text(name).map(str::to_owned)
}

fn id_of(element: &XmlElement) -> XmlResult<String> {
    element
        .attr("id")
        .map(str::to_owned)
        .ok_or_else(|| XmlError::MissingAttribute {
            element: element.name.clone(),
            attribute: "id",
        })
}

fn missing(element: &XmlElement, child: &'static str, id: &str) -> XmlError {
    XmlError::MissingElement {
        element: element.name.clone(),
        child,
        id: id.to_owned(),
    }
}

fn parse_number(field: &str, value: &str, id: &str) -> XmlResult<f64> {
    value.trim().parse::<f64>().map_err(|_| XmlError::InvalidNumber {
        field: field.to_owned(),
        value: value.to_owned(),
        id: id.to_owned(),
    })
}

fn number(parent: &XmlElement, name: &str, id: &str) -> XmlResult<Option<f64>> {
    parent
        .child_text(name)
        .map(|text| parse_number(name, text, id))
        .transpose()
}

fn required_number(parent: &XmlElement, name: &'static str, id: &str) -> XmlResult<f64> {
    number(parent, name, id)?.ok_or_else(|| missing(parent, name, id))
}

fn attr_number(record: &XmlElement, name: &'static str, id: &str) -> XmlResult<f64> {
    let value = record.attr(name).ok_or_else(|| XmlError::MissingAttribute {
        element: record.name.clone(),
        attribute: name,
    })?;
    parse_number(name, value, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::parse_document;

    fn decode(xml: &str) -> XmlResult<ToolsConfig> {
        ToolsConfig::decode(&parse_document(xml)?)
    }

    #[test]
    fn wrong_root_is_rejected() {
        assert!(matches!(
            decode("<rules/>"),
            Err(XmlError::UnexpectedRoot { .. })
        ));
    }

    #[test]
    fn interval_rule_fields() {
        let config = decode(
            r#"<rtcToolsConfig><rules><rule>
                <interval id="[IntervalRule]cg/Interval Test">
                  <settingBelow>0.2</settingBelow><settingAbove>0.3</settingAbove>
                  <settingMaxSpeed>0.05</settingMaxSpeed>
                  <deadbandSetpointRelative>10</deadbandSetpointRelative>
                  <input><x ref="EXPLICIT">[Input]Station/Water level</x><setpoint>[SP]cg/Interval Test</setpoint></input>
                  <output><y>[Output]Weir/Crest level</y><status>[Status]cg/Interval Test</status></output>
                </interval></rule></rules></rtcToolsConfig>"#,
        )
        .unwrap();

        let RuleElement::Interval(interval) = &config.rules[0] else {
            panic!("expected interval, got {:?}", config.rules[0]);
        };
        assert_eq!(interval.limit, IntervalLimit::MaxSpeed(0.05));
        assert_eq!(interval.deadband, Deadband::Relative(10.0));
        assert_eq!(
            interval.input.as_ref().unwrap().reference,
            Some(ReferenceKind::Explicit)
        );
        assert_eq!(interval.setpoint.as_deref(), Some("[SP]cg/Interval Test"));
        assert_eq!(interval.status.as_deref(), Some("[Status]cg/Interval Test"));
    }

    #[test]
    fn pid_setpoint_value() {
        let config = decode(
            r#"<rtcToolsConfig><rules><rule><pid id="[PID]cg/p">
                <mode>PIDVEL</mode><settingMin>1.1</settingMin><settingMax>1.2</settingMax>
                <settingMaxSpeed>1.3</settingMaxSpeed><kp>0.3</kp><ki>0.2</ki><kd>0.1</kd>
                <input><x>[Input]a/b</x><setpointValue>4.5</setpointValue></input>
                <output><y>[Output]w/c</y></output></pid></rule></rules></rtcToolsConfig>"#,
        )
        .unwrap();
        let RuleElement::Pid(pid) = &config.rules[0] else {
            panic!("expected pid");
        };
        assert_eq!(pid.setpoint, Some(PidSetpoint::Value(4.5)));
        assert_eq!(pid.kd, 0.1);
    }

    #[test]
    fn pid_missing_gain_is_error() {
        let err = decode(
            r#"<rtcToolsConfig><rules><rule><pid id="[PID]cg/p">
                <settingMin>1</settingMin><settingMax>2</settingMax><settingMaxSpeed>3</settingMaxSpeed>
                <kp>1</kp><ki>1</ki></pid></rule></rules></rtcToolsConfig>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XmlError::MissingElement { child: "kd", .. }));
    }

    #[test]
    fn bad_number_is_error() {
        let err = decode(
            r#"<rtcToolsConfig><rules><rule><lookupTable id="[HydraulicRule]cg/h">
                <table><record x="one" y="2"/></table></lookupTable></rule></rules></rtcToolsConfig>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XmlError::InvalidNumber { .. }));
    }

    #[test]
    fn nested_triggers() {
        let config = decode(
            r#"<rtcToolsConfig><triggers><trigger><standard id="[StandardCondition]cg/C1">
                <condition><x1Series ref="IMPLICIT">[Input]a/b</x1Series>
                  <relationalOperator>Greater</relationalOperator><x2Value>1.1</x2Value></condition>
                <true><trigger><standard id="[StandardCondition]cg/C2">
                  <condition><x1Series ref="IMPLICIT">[Input]a/b</x1Series>
                  <relationalOperator>Less</relationalOperator><x2Value>2.2</x2Value></condition>
                  <true><trigger><ruleReference>[PID]cg/p</ruleReference></trigger></true>
                </standard></trigger></true>
                <false><trigger><expression id="cg/E"><x1Value>1</x1Value>
                  <mathematicalOperator>+</mathematicalOperator><x2Series>[Input]a/b</x2Series><y>E</y></expression></trigger></false>
                <output><status>[Status]cg/C1</status></output>
              </standard></trigger></triggers></rtcToolsConfig>"#,
        )
        .unwrap();

        let TriggerElement::Standard(c1) = &config.triggers[0] else {
            panic!("expected standard trigger");
        };
        assert_eq!(c1.condition.operator, "Greater");
        assert_eq!(c1.condition.x2, Operand::Value("1.1".into()));
        assert_eq!(c1.status.as_deref(), Some("[Status]cg/C1"));

        let TriggerElement::Standard(c2) = &c1.true_outputs[0] else {
            panic!("expected nested standard trigger");
        };
        assert_eq!(
            c2.true_outputs,
            vec![TriggerElement::RuleReference("[PID]cg/p".into())]
        );

        let TriggerElement::Expression(e) = &c1.false_outputs[0] else {
            panic!("expected expression");
        };
        assert_eq!(e.x1, Operand::Value("1".into()));
        assert_eq!(e.x2.text(), "[Input]a/b");
        assert_eq!(e.y, "E");
    }

    #[test]
    fn unknown_elements_are_kept() {
        let config = decode(
            r#"<rtcToolsConfig><rules><rule><dateLookupTable id="x/y"/></rule></rules>
               <triggers><trigger><deadBand id="x/z"/></trigger></triggers></rtcToolsConfig>"#,
        )
        .unwrap();
        assert_eq!(
            config.rules[0],
            RuleElement::Unknown {
                element: "dateLookupTable".into(),
                id: Some("x/y".into())
            }
        );
        assert_eq!(
            config.triggers[0],
            TriggerElement::Unknown {
                element: "deadBand".into()
            }
        );
    }
}
