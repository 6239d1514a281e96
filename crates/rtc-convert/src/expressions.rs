//! Expression tree building with memoized sub-expressions.
//!
//! Operands are classified as constants (`xNValue` or a finite numeric literal),
//! parameters (tagged references such as `[Input]a/b`) or names of other
//! expressions in the same control group. Named operands are built into nested
//! branches. Every expression element is built at most once, so an expression
//! used by several parents is one shared `Rc` node.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use rtc_core::{ComponentId, RtcError, RtcResult, control_group_name, tag};
use rtc_model::{BranchNode, ExpressionNode, ExpressionTree, Operator};
use rtc_xml::{ExpressionElement, Operand};

/// Builds expression trees for one set of expression elements.
///
/// Duplicate ids keep the first element.
#[derive(Debug)]
pub struct ExpressionTreeBuilder<'a> {
    elements: Vec<&'a ExpressionElement>,
    /// (group, result name) -> element indices.
    y_names: HashMap<(&'a str, &'a str), Vec<usize>>,
    /// (group, id name) -> element indices.
    id_names: HashMap<(&'a str, &'a str), Vec<usize>>,
    built: HashMap<usize, Rc<ExpressionNode>>,
    in_progress: HashSet<usize>,
}

impl<'a> ExpressionTreeBuilder<'a> {
    pub fn new(elements: impl IntoIterator<Item = &'a ExpressionElement>) -> Self {
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut unique: Vec<&'a ExpressionElement> = Vec::new();
        for element in elements {
            if seen.insert(element.id.as_str()) {
                unique.push(element);
            }
        }
        let elements = unique;

        let mut y_names: HashMap<(&'a str, &'a str), Vec<usize>> = HashMap::new();
        let mut id_names: HashMap<(&'a str, &'a str), Vec<usize>> = HashMap::new();
        for (index, &element) in elements.iter().enumerate() {
            let id = ComponentId::parse(&element.id);
            let y = ComponentId::parse(&element.y);
            let y_group = if y.group.is_empty() { id.group } else { y.group };
            for key in [(id.group, element.y.as_str()), (y_group, y.name)] {
                push_index(y_names.entry(key).or_default(), index);
            }
            push_index(id_names.entry((id.group, id.name)).or_default(), index);
        }

        Self {
            elements,
            y_names,
            id_names,
            built: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Number of distinct expression elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build one tree per distinct element, in first-seen order.
    pub fn build_all(mut self) -> RtcResult<Vec<ExpressionTree>> {
        let mut trees = Vec::with_capacity(self.elements.len());
        for index in 0..self.elements.len() {
            let root = self.build(index)?;
            let element = self.elements[index];
            trees.push(ExpressionTree {
                id: element.id.clone(),
                control_group_name: control_group_name(&element.id).to_owned(),
                root,
            });
        }
        Ok(trees)
    }

    fn build(&mut self, index: usize) -> RtcResult<Rc<ExpressionNode>> {
        if let Some(node) = self.built.get(&index) {
            return Ok(Rc::clone(node));
        }

        let element = self.elements[index];
        let operator =
            Operator::from_xml(&element.operator).ok_or_else(|| RtcError::Unsupported {
                what: "mathematical operator",
                id: element.id.clone(),
                found: element.operator.clone(),
            })?;

        self.in_progress.insert(index);
        let group = control_group_name(&element.id);
        let first = self.operand(&element.x1, group);
        let second = self.operand(&element.x2, group);
        self.in_progress.remove(&index);

        let node = Rc::new(ExpressionNode::Branch(BranchNode {
            id: element.id.clone(),
            y_name: element.y.clone(),
            operator,
            first: first?,
            second: second?,
        }));
        self.built.insert(index, Rc::clone(&node));
        Ok(node)
    }

    fn operand(&mut self, operand: &Operand, group: &str) -> RtcResult<Rc<ExpressionNode>> {
        let text = match operand {
            Operand::Value(value) => return Ok(Rc::new(ExpressionNode::Constant(value.clone()))),
            Operand::Series(series) => series.value.as_str(),
        };
        if tag::has_tag(text) {
            return Ok(Rc::new(ExpressionNode::Parameter(text.to_owned())));
        }
        if text.parse::<f64>().is_ok_and(f64::is_finite) {
            return Ok(Rc::new(ExpressionNode::Constant(text.to_owned())));
        }
        match self.lookup(text, group) {
            Some(index) => self.build(index),
            None => Ok(Rc::new(ExpressionNode::Parameter(text.to_owned()))),
        }
    }

    /// The single expression a bare name refers to in `group`, if any.
    ///
    /// Result names take precedence: id names are only consulted when no
    /// expression in the group has the name as its result. Ambiguous names
    /// and expressions currently being built are not resolvable.
    fn lookup(&self, name: &str, group: &str) -> Option<usize> {
        let parsed = ComponentId::parse(name);
        if !parsed.group.is_empty() && parsed.group != group {
            return None;
        }

        let keys = [(group, name), (group, parsed.name)];
        let mut candidates = Self::candidates(&self.y_names, &keys);
        if candidates.is_empty() {
            candidates = Self::candidates(&self.id_names, &keys);
        }
        match candidates.as_slice() {
            [index] if !self.in_progress.contains(index) => Some(*index),
            [_] => {
                tracing::debug!(name, group, "Expression reference cycle cut");
                None
            }
            [] => None,
            _ => {
                tracing::debug!(name, group, "Ambiguous expression name");
                None
            }
        }
    }

    fn candidates(
        names: &HashMap<(&'a str, &'a str), Vec<usize>>,
        keys: &[(&str, &str)],
    ) -> Vec<usize> {
        let mut candidates = Vec::new();
        for key in keys {
            for &index in names.get(key).into_iter().flatten() {
                push_index(&mut candidates, index);
            }
        }
        candidates
    }
}

fn push_index(indices: &mut Vec<usize>, index: usize) {
    if !indices.contains(&index) {
        indices.push(index);
    }
}
