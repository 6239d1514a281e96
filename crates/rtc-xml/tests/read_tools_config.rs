//! Reading complete tools-config documents.

use rtc_xml::{
    PidSetpoint, ReferenceKind, RuleElement, TriggerElement, XmlError, read_tools_config,
    read_tools_config_file,
};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rtcToolsConfig xmlns="http://www.wldelft.nl/fews" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <general><description>RTC Model</description><poolRoutingScheme>Theta</poolRoutingScheme><theta>0.5</theta></general>
  <rules>
    <rule>
      <unitDelay id="PIDRule Test_unitDelay">
        <input><x>[Output]WeirdWeir/Crest level</x></input>
        <output><y>[Output]WeirdWeir/Crest level</y></output>
      </unitDelay>
    </rule>
    <rule>
      <lookupTable id="[LookupSignal]control_group/SetPointForPID">
        <table><record x="10" y="3" /><record x="100" y="6" /></table>
        <interpolationOption>LINEAR</interpolationOption>
        <extrapolationOption>BLOCK</extrapolationOption>
        <input><x ref="IMPLICIT">[Input]MeasureStationB/Discharge</x></input>
        <output><y>[Signal]control_group/SetPointForPID</y></output>
      </lookupTable>
    </rule>
    <rule>
      <pid id="[PID]control_group/PIDRule Test">
        <mode>PIDVEL</mode><settingMin>1.1</settingMin><settingMax>1.2</settingMax><settingMaxSpeed>1.3</settingMaxSpeed>
        <kp>0.3</kp><ki>0.2</ki><kd>0.1</kd>
        <input><x>[Input]MeasureStationA/Water level</x><setpointSeries>[Signal]control_group/SetPointForPID</setpointSeries></input>
        <output><y>[Output]WeirdWeir/Crest level</y><integralPart>[IP]control_group/PIDRule Test</integralPart><differentialPart>[DP]control_group/PIDRule Test</differentialPart></output>
      </pid>
    </rule>
  </rules>
  <triggers>
    <trigger>
      <standard id="[StandardCondition]control_group/Trigger31">
        <condition>
          <x1Series ref="IMPLICIT">[Input]CondInputLocation/CondInputQuantityId</x1Series>
          <relationalOperator>Greater</relationalOperator>
          <x2Value>1.1</x2Value>
        </condition>
        <true><trigger><ruleReference>[PID]control_group/PIDRule Test</ruleReference></trigger></true>
        <output><status>[Status]control_group/Trigger31</status></output>
      </standard>
    </trigger>
  </triggers>
</rtcToolsConfig>"#;

#[test]
fn reads_rules_in_document_order() {
    let config = read_tools_config(DOCUMENT).unwrap();
    assert_eq!(config.rules.len(), 3);
    assert!(matches!(config.rules[0], RuleElement::UnitDelay(_)));
    assert_eq!(
        config.rules[1].id(),
        Some("[LookupSignal]control_group/SetPointForPID")
    );

    let RuleElement::LookupTable(lookup) = &config.rules[1] else {
        panic!("expected lookup table");
    };
    assert_eq!(lookup.table.len(), 2);
    assert_eq!(lookup.table[1].y, 6.0);
    assert_eq!(
        lookup.input.as_ref().unwrap().reference,
        Some(ReferenceKind::Implicit)
    );

    let RuleElement::Pid(pid) = &config.rules[2] else {
        panic!("expected pid");
    };
    assert_eq!(
        pid.setpoint,
        Some(PidSetpoint::Series(
            "[Signal]control_group/SetPointForPID".into()
        ))
    );
    assert_eq!(
        pid.integral_part.as_deref(),
        Some("[IP]control_group/PIDRule Test")
    );
}

#[test]
fn reads_trigger_with_rule_reference() {
    let config = read_tools_config(DOCUMENT).unwrap();
    let TriggerElement::Standard(trigger) = &config.triggers[0] else {
        panic!("expected standard trigger");
    };
    assert_eq!(trigger.id, "[StandardCondition]control_group/Trigger31");
    assert_eq!(
        trigger.true_outputs,
        vec![TriggerElement::RuleReference(
            "[PID]control_group/PIDRule Test".into()
        )]
    );
    assert!(trigger.false_outputs.is_empty());
}

#[test]
fn reads_file_from_disk() {
    let path = std::env::temp_dir().join("rtc_xml_read_tools_config.xml");
    std::fs::write(&path, DOCUMENT).unwrap();
    let config = read_tools_config_file(&path).unwrap();
    assert_eq!(config.triggers.len(), 1);
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_reports_path() {
    let path = std::env::temp_dir().join("rtc_xml_does_not_exist.xml");
    let err = read_tools_config_file(&path).unwrap_err();
    assert!(matches!(err, XmlError::Io { .. }));
    assert!(err.to_string().contains("rtc_xml_does_not_exist.xml"));
}
