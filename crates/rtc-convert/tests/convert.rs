//! Conversion of rule and trigger element lists into descriptors.

use std::rc::Rc;

use rtc_convert::{ConverterOptions, ExpressionEmission, convert, convert_elements};
use rtc_model::{ComponentDescriptor, ComponentKind, ExpressionNode, ExpressionTree, RuleKind};
use rtc_xml::{
    Deadband, ExpressionElement, IntervalElement, IntervalLimit, Operand, ReferenceKind,
    RelationalCondition, RuleElement, SeriesRef, StandardTriggerElement, TimeAbsoluteElement,
    TriggerElement, read_tools_config,
};

const GROUP: &str = "control_group";
const LEAF: &str = "[Input]some_input";

fn series(value: &str) -> Operand {
    Operand::Series(SeriesRef {
        value: value.to_owned(),
        reference: None,
    })
}

fn expression(name: &str, y: &str, x1: &str, x2: &str) -> TriggerElement {
    TriggerElement::Expression(ExpressionElement {
        id: format!("{GROUP}/{name}"),
        x1: series(x1),
        operator: "+".into(),
        x2: series(x2),
        y: y.to_owned(),
    })
}

fn condition(name: &str, true_outputs: Vec<TriggerElement>, false_outputs: Vec<TriggerElement>) -> TriggerElement {
    TriggerElement::Standard(StandardTriggerElement {
        id: format!("[StandardCondition]{GROUP}/{name}"),
        condition: RelationalCondition {
            x1: Operand::Series(SeriesRef {
                value: "[Input]location/quantity".into(),
                reference: Some(ReferenceKind::Implicit),
            }),
            operator: "Greater".into(),
            x2: Operand::Value("1.1".into()),
        },
        true_outputs,
        false_outputs,
        status: None,
    })
}

fn time_rule(id: &str) -> RuleElement {
    RuleElement::TimeAbsolute(TimeAbsoluteElement {
        id: id.to_owned(),
        input: None,
        output: Some("[Output]Weir/Crest level".into()),
    })
}

fn interval_rule(id: &str) -> RuleElement {
    RuleElement::Interval(IntervalElement {
        id: id.to_owned(),
        setting_below: 0.2,
        setting_above: 0.3,
        limit: IntervalLimit::MaxStep(0.0),
        deadband: Deadband::Absolute(0.1),
        input: Some(SeriesRef {
            value: "[Input]MeasureStationA/Water level".into(),
            reference: Some(ReferenceKind::Explicit),
        }),
        setpoint: Some("[SP]group2/B".into()),
        output: Some("[Output]Weir/Crest level".into()),
        status: Some("[Status]group2/B".into()),
    })
}

fn ids(descriptors: &[ComponentDescriptor]) -> Vec<&str> {
    descriptors.iter().map(|d| d.id.as_str()).collect()
}

fn tree<'a>(descriptors: &'a [ComponentDescriptor], name: &str) -> &'a ExpressionTree {
    let id = format!("{GROUP}/{name}");
    descriptors
        .iter()
        .find(|d| d.id == id)
        .and_then(ComponentDescriptor::expression_tree)
        .unwrap_or_else(|| panic!("no expression tree {id}"))
}

#[test]
fn rules_in_two_groups() {
    let rules = [time_rule("[TimeRule]group1/A"), interval_rule("[IntervalRule]group2/B")];
    let descriptors = convert_elements(&rules, &[], &ConverterOptions::default()).unwrap();

    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].control_group_name, "group1");
    assert_eq!(descriptors[1].control_group_name, "group2");
    assert!(matches!(descriptors[0].kind, ComponentKind::Rule(RuleKind::Time)));
    assert_eq!(
        descriptors[1].references.input,
        vec!["[Input]MeasureStationA/Water level"]
    );
}

#[test]
fn duplicate_trigger_ids_yield_one_result() {
    let triggers = [condition("A", vec![], vec![]), condition("A", vec![], vec![])];
    let descriptors = convert_elements(&[], &triggers, &ConverterOptions::default()).unwrap();
    assert_eq!(ids(&descriptors), vec!["[StandardCondition]control_group/A"]);
}

#[test]
fn nested_condition_yields_two_results() {
    let triggers = [condition("A", vec![condition("B", vec![], vec![])], vec![])];
    let descriptors = convert_elements(&[], &triggers, &ConverterOptions::default()).unwrap();
    assert_eq!(
        ids(&descriptors),
        vec![
            "[StandardCondition]control_group/A",
            "[StandardCondition]control_group/B"
        ]
    );
    assert_eq!(
        descriptors[0].references.true_output,
        vec!["[StandardCondition]control_group/B"]
    );
}

#[test]
fn trigger_referenced_twice_is_kept_once() {
    // A true -> B, A false -> T, B false -> T
    let t = || condition("T", vec![], vec![]);
    let triggers = [condition(
        "A",
        vec![condition("B", vec![], vec![t()])],
        vec![t()],
    )];
    let descriptors = convert_elements(&[], &triggers, &ConverterOptions::default()).unwrap();
    assert_eq!(descriptors.len(), 3);
    assert_eq!(
        descriptors[0].references.false_output,
        vec!["[StandardCondition]control_group/T"]
    );
    assert_eq!(
        descriptors[1].references.false_output,
        vec!["[StandardCondition]control_group/T"]
    );
}

#[test]
fn expression_over_two_expressions() {
    let triggers = [
        expression("A", "A", LEAF, LEAF),
        expression("B", "B", LEAF, LEAF),
        expression("C", "C", "A", "B"),
    ];
    let descriptors = convert_elements(&[], &triggers, &ConverterOptions::default()).unwrap();
    assert_eq!(descriptors.len(), 3);

    let c = tree(&descriptors, "C").root_branch().unwrap();
    for (child, name) in [(&c.first, "A"), (&c.second, "B")] {
        let branch = child.as_branch().unwrap();
        assert_eq!(branch.y_name, name);
        assert_eq!(*branch.first, ExpressionNode::Parameter(LEAF.into()));
        assert_eq!(*branch.second, ExpressionNode::Parameter(LEAF.into()));
    }
    assert!(Rc::ptr_eq(&tree(&descriptors, "A").root, &c.first));
    assert!(Rc::ptr_eq(&tree(&descriptors, "B").root, &c.second));

    let c_descriptor = descriptors.iter().find(|d| d.id.ends_with("/C")).unwrap();
    assert_eq!(
        c_descriptor.references.input,
        vec!["control_group/A", "control_group/B"]
    );
}

fn complex_triggers() -> Vec<TriggerElement> {
    let condition2 = condition(
        "condition2",
        vec![expression("F_1", "F", "D", "G"), expression("G", "G", LEAF, LEAF)],
        vec![expression("F_2", "F", "D", LEAF)],
    );
    let condition1 = condition(
        "condition1",
        vec![condition2],
        vec![expression("H", "H", LEAF, LEAF)],
    );
    vec![
        expression("A", "A", LEAF, LEAF),
        expression("B", "B", LEAF, LEAF),
        expression("C", "C", "A", "B"),
        expression("D", "D", LEAF, LEAF),
        expression("E", "E", "F", LEAF),
        condition1,
    ]
}

#[test]
fn complex_example_emits_every_expression() {
    let descriptors =
        convert_elements(&[], &complex_triggers(), &ConverterOptions::default()).unwrap();
    // 9 expressions and 2 conditions
    assert_eq!(descriptors.len(), 11);

    // F is ambiguous (F_1 and F_2), so E keeps it as a parameter.
    let e = tree(&descriptors, "E").root_branch().unwrap();
    assert_eq!(*e.first, ExpressionNode::Parameter("F".into()));

    let f1 = tree(&descriptors, "F_1").root_branch().unwrap();
    assert!(Rc::ptr_eq(&f1.second, &tree(&descriptors, "G").root));
}

#[test]
fn complex_example_roots_only() {
    let options = ConverterOptions {
        expression_emission: ExpressionEmission::RootsOnly,
        ..ConverterOptions::default()
    };
    let descriptors = convert_elements(&[], &complex_triggers(), &options).unwrap();
    assert_eq!(descriptors.len(), 8);

    let names: Vec<&str> = descriptors.iter().map(|d| d.name()).collect();
    for folded in ["A", "B", "G"] {
        assert!(!names.contains(&folded), "{folded} should be folded");
    }

    // A and B are folded into C, so C reads their inputs directly.
    let c = descriptors.iter().find(|d| d.name() == "C").unwrap();
    assert_eq!(c.references.input, vec![LEAF]);
}

const RULE_READS_SUB_EXPRESSION: &str = r#"<rtcToolsConfig>
  <rules>
    <rule><lookupTable id="[HydraulicRule]cg/rule">
      <table><record x="0" y="1"/><record x="10" y="2"/></table>
      <input><x>S</x></input>
      <output><y>[Output]w/c</y></output></lookupTable></rule>
  </rules>
  <triggers>
    <trigger><expression id="cg/S"><x1Series>[Input]a</x1Series>
      <mathematicalOperator>/</mathematicalOperator><x2Series>[Input]b</x2Series><y>S</y></expression></trigger>
    <trigger><expression id="cg/R"><x1Series>[Input]c</x1Series>
      <mathematicalOperator>+</mathematicalOperator><x2Series>S</x2Series><y>R</y></expression></trigger>
    <trigger><standard id="[StandardCondition]cg/C">
      <condition><x1Series ref="EXPLICIT">R</x1Series><relationalOperator>Greater</relationalOperator><x2Value>1</x2Value></condition>
    </standard></trigger>
  </triggers>
</rtcToolsConfig>"#;

#[test]
fn roots_only_keeps_expression_read_by_rule() {
    let config = read_tools_config(RULE_READS_SUB_EXPRESSION).unwrap();
    let options = ConverterOptions {
        expression_emission: ExpressionEmission::RootsOnly,
        ..ConverterOptions::default()
    };
    let descriptors = convert(&config, &options).unwrap();
    assert_eq!(
        ids(&descriptors),
        vec!["[HydraulicRule]cg/rule", "[StandardCondition]cg/C", "cg/S", "cg/R"]
    );

    // S stays a component, so R reads it instead of its leaves.
    let r = descriptors.iter().find(|d| d.id == "cg/R").unwrap();
    assert_eq!(r.references.input, vec!["[Input]c", "cg/S"]);
}

#[test]
fn roots_only_keeps_expression_read_by_condition() {
    let triggers = [
        expression("A", "A", LEAF, LEAF),
        expression("B", "B", "A", LEAF),
        TriggerElement::Standard(StandardTriggerElement {
            id: format!("[StandardCondition]{GROUP}/C"),
            condition: RelationalCondition {
                x1: Operand::Series(SeriesRef {
                    value: format!("{GROUP}/A"),
                    reference: Some(ReferenceKind::Explicit),
                }),
                operator: "Less".into(),
                x2: Operand::Value("0".into()),
            },
            true_outputs: vec![],
            false_outputs: vec![],
            status: None,
        }),
    ];
    let options = ConverterOptions {
        expression_emission: ExpressionEmission::RootsOnly,
        ..ConverterOptions::default()
    };
    let descriptors = convert_elements(&[], &triggers, &options).unwrap();
    let names: Vec<&str> = descriptors.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn unknown_trigger_is_fatal() {
    let triggers = [TriggerElement::Unknown {
        element: "deadBand".into(),
    }];
    assert!(convert_elements(&[], &triggers, &ConverterOptions::default()).is_err());
}

#[test]
fn converts_document() {
    let xml = r#"<rtcToolsConfig>
      <rules>
        <rule><unitDelay id="pid_unitDelay"><input><x>[Output]w/c</x></input><output><y>[Output]w/c</y></output></unitDelay></rule>
        <rule><lookupTable id="[LookupSignal]cg/SetPoint">
          <table><record x="10" y="3"/><record x="100" y="6"/></table>
          <interpolationOption>LINEAR</interpolationOption><extrapolationOption>BLOCK</extrapolationOption>
          <input><x ref="IMPLICIT">[Input]Station/Discharge</x></input>
          <output><y>[Signal]cg/SetPoint</y></output></lookupTable></rule>
        <rule><pid id="[PID]cg/pid">
          <settingMin>1.1</settingMin><settingMax>1.2</settingMax><settingMaxSpeed>1.3</settingMaxSpeed>
          <kp>0.3</kp><ki>0.2</ki><kd>0.1</kd>
          <input><x>[Input]Station/Water level</x><setpointSeries>[Signal]cg/SetPoint</setpointSeries></input>
          <output><y>[Output]w/c</y></output></pid></rule>
      </rules>
      <triggers><trigger><standard id="[StandardCondition]cg/C1">
        <condition><x1Series ref="EXPLICIT">[Input]loc/q</x1Series><relationalOperator>Greater</relationalOperator><x2Value>1.1</x2Value></condition>
        <true><trigger><ruleReference>[PID]cg/pid</ruleReference></trigger></true>
      </standard></trigger></triggers>
    </rtcToolsConfig>"#;

    let config = read_tools_config(xml).unwrap();
    let descriptors = convert(&config, &ConverterOptions::default()).unwrap();
    assert_eq!(
        ids(&descriptors),
        vec!["[LookupSignal]cg/SetPoint", "[PID]cg/pid", "[StandardCondition]cg/C1"]
    );
    assert_eq!(descriptors[1].references.signal, vec!["[Signal]cg/SetPoint"]);
    assert_eq!(descriptors[2].references.input, vec!["[Input]loc/q"]);
    assert_eq!(descriptors[2].references.true_output, vec!["[PID]cg/pid"]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ids_are_unique_and_first_wins(picks in prop::collection::vec(0usize..4, 1..12)) {
            let names = ["P", "Q", "R", "S"];
            let triggers: Vec<TriggerElement> = picks
                .iter()
                .map(|&i| expression(names[i], names[i], LEAF, "1"))
                .collect();
            let descriptors = convert_elements(&[], &triggers, &ConverterOptions::default()).unwrap();

            let mut expected: Vec<String> = Vec::new();
            for &i in &picks {
                let id = format!("{GROUP}/{}", names[i]);
                if !expected.contains(&id) {
                    expected.push(id);
                }
            }
            let got: Vec<String> = descriptors.iter().map(|d| d.id.clone()).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
