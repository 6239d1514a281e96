//! Element lists to component descriptors.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use rtc_core::{ComponentId, RtcError, RtcResult};
use rtc_model::{ComponentDescriptor, ComponentKind, ExpressionNode, ExpressionTree};
use rtc_xml::{ExpressionElement, RuleElement, ToolsConfig, TriggerElement};

use crate::conditions::convert_condition;
use crate::expressions::ExpressionTreeBuilder;
use crate::options::{ConverterOptions, ExpressionEmission};
use crate::rules::convert_rule;

/// Convert a whole document.
pub fn convert(
    config: &ToolsConfig,
    options: &ConverterOptions,
) -> RtcResult<Vec<ComponentDescriptor>> {
    convert_elements(&config.rules, &config.triggers, options)
}

/// Convert rule and trigger element lists into descriptors.
///
/// Output order is rules, then conditions in depth-first document order, then
/// expression trees in first-seen order. Ids are unique in the result; the
/// first occurrence of an id wins.
pub fn convert_elements(
    rules: &[RuleElement],
    triggers: &[TriggerElement],
    options: &ConverterOptions,
) -> RtcResult<Vec<ComponentDescriptor>> {
    let mut descriptors = Vec::new();
    for rule in rules {
        descriptors.extend(convert_rule(rule, options)?);
    }

    let mut walker = TriggerWalker::default();
    for trigger in triggers {
        walker.visit(trigger)?;
    }
    descriptors.extend(walker.conditions);

    let trees = ExpressionTreeBuilder::new(walker.expressions).build_all()?;
    let trees = match options.expression_emission {
        ExpressionEmission::All => trees,
        ExpressionEmission::RootsOnly => {
            let read = read_by_components(&descriptors, &trees);
            fold_single_parent(trees, &read)
        }
    };
    let emitted: HashSet<String> = trees.iter().map(|t| t.id.clone()).collect();
    for tree in trees {
        let mut d = ComponentDescriptor::new(tree.id.clone(), ComponentKind::Expression(tree));
        if let ComponentKind::Expression(tree) = &d.kind {
            d.references.input = expression_inputs(tree, &emitted);
        }
        descriptors.push(d);
    }

    Ok(dedupe_by_id(descriptors))
}

/// Collects conditions and expressions from nested trigger lists.
#[derive(Default)]
struct TriggerWalker<'a> {
    seen: HashSet<&'a str>,
    conditions: Vec<ComponentDescriptor>,
    expressions: Vec<&'a ExpressionElement>,
}

impl<'a> TriggerWalker<'a> {
    fn visit(&mut self, trigger: &'a TriggerElement) -> RtcResult<()> {
        match trigger {
            TriggerElement::Standard(standard) => {
                if !self.seen.insert(&standard.id) {
                    tracing::debug!(id = %standard.id, "Skipping repeated trigger");
                    return Ok(());
                }
                self.conditions.push(convert_condition(standard)?);
                for nested in standard.true_outputs.iter().chain(&standard.false_outputs) {
                    self.visit(nested)?;
                }
            }
            TriggerElement::Expression(expression) => self.expressions.push(expression),
            TriggerElement::RuleReference(_) => {}
            TriggerElement::Unknown { element } => {
                return Err(RtcError::Unsupported {
                    what: "trigger element",
                    id: String::new(),
                    found: element.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ids of the trees a rule or condition names as an input, by id or by
/// result or id name within the group.
fn read_by_components(
    descriptors: &[ComponentDescriptor],
    trees: &[ExpressionTree],
) -> HashSet<String> {
    let mut read = HashSet::new();
    for d in descriptors {
        for reference in &d.references.input {
            let parsed = ComponentId::parse(reference);
            let group = if parsed.group.is_empty() {
                d.control_group_name.as_str()
            } else {
                parsed.group
            };
            for tree in trees {
                let by_name = tree.control_group_name == group
                    && (ComponentId::parse(tree.y_name()).name == parsed.name
                        || ComponentId::parse(&tree.id).name == parsed.name);
                if tree.id == *reference || by_name {
                    read.insert(tree.id.clone());
                }
            }
        }
    }
    read
}

/// Drop trees whose expression is a direct operand of exactly one other tree
/// and is not in `keep`.
fn fold_single_parent(trees: Vec<ExpressionTree>, keep: &HashSet<String>) -> Vec<ExpressionTree> {
    let mut parents: HashMap<&str, HashSet<&str>> = HashMap::new();
    for tree in &trees {
        let Some(root) = tree.root_branch() else {
            continue;
        };
        for child in root.children() {
            if let ExpressionNode::Branch(branch) = child.as_ref() {
                if branch.id != tree.id {
                    parents.entry(&branch.id).or_default().insert(&tree.id);
                }
            }
        }
    }

    let folded: HashSet<String> = parents
        .into_iter()
        .filter(|(id, p)| p.len() == 1 && !keep.contains(*id))
        .map(|(id, _)| id.to_owned())
        .collect();
    trees
        .into_iter()
        .filter(|tree| {
            let keep = !folded.contains(&tree.id);
            if !keep {
                tracing::debug!(id = %tree.id, "Folding expression into its parent");
            }
            keep
        })
        .collect()
}

/// Input references of an expression: parameter leaves and emitted operand
/// expressions. Operands that are not emitted contribute their own inputs.
fn expression_inputs(tree: &ExpressionTree, emitted: &HashSet<String>) -> Vec<String> {
    fn collect(node: &Rc<ExpressionNode>, emitted: &HashSet<String>, out: &mut Vec<String>) {
        match node.as_ref() {
            ExpressionNode::Parameter(name) => push_unique(out, name),
            ExpressionNode::Constant(_) => {}
            ExpressionNode::Branch(branch) if emitted.contains(&branch.id) => {
                push_unique(out, &branch.id)
            }
            ExpressionNode::Branch(branch) => {
                for child in branch.children() {
                    collect(child, emitted, out);
                }
            }
        }
    }

    let mut inputs = Vec::new();
    if let Some(root) = tree.root_branch() {
        for child in root.children() {
            collect(child, emitted, &mut inputs);
        }
    }
    inputs
}

fn push_unique(out: &mut Vec<String>, value: &str) {
    if !out.iter().any(|v| v == value) {
        out.push(value.to_owned());
    }
}

fn dedupe_by_id(descriptors: Vec<ComponentDescriptor>) -> Vec<ComponentDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .into_iter()
        .filter(|d| {
            let first = seen.insert(d.id.clone());
            if !first {
                tracing::debug!(id = %d.id, kind = d.kind.label(), "Dropping duplicate id");
            }
            first
        })
        .collect()
}
