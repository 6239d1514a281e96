//! Mathematical expression trees.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
}

impl Operator {
    /// Map a `mathematicalOperator` value. Symbols and names are both accepted.
    pub fn from_xml(operator: &str) -> Option<Self> {
        match operator {
            "+" | "Add" => Some(Self::Add),
            "-" | "Subtract" => Some(Self::Subtract),
            "*" | "Multiply" => Some(Self::Multiply),
            "/" | "Divide" => Some(Self::Divide),
            "min" | "Min" => Some(Self::Min),
            "max" | "Max" => Some(Self::Max),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    fn is_function(self) -> bool {
        matches!(self, Self::Min | Self::Max)
    }
}

/// A node of an expression tree.
///
/// Sub-expressions are held behind `Rc` so that an expression referenced from
/// several parents is one shared node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Branch(BranchNode),
    /// A named input, usually a tagged reference such as `[Input]a/b`.
    Parameter(String),
    /// A numeric literal, kept exactly as written.
    Constant(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    /// Id of the expression element this branch was built from.
    pub id: String,
    /// Name of the expression result (`<y>`), used by other expressions.
    pub y_name: String,
    pub operator: Operator,
    pub first: Rc<ExpressionNode>,
    pub second: Rc<ExpressionNode>,
}

impl BranchNode {
    pub fn children(&self) -> [&Rc<ExpressionNode>; 2] {
        [&self.first, &self.second]
    }
}

impl ExpressionNode {
    pub fn as_branch(&self) -> Option<&BranchNode> {
        match self {
            ExpressionNode::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, ExpressionNode::Branch(_))
    }

    /// Leaf text, `None` for branches.
    pub fn leaf_value(&self) -> Option<&str> {
        match self {
            ExpressionNode::Parameter(v) | ExpressionNode::Constant(v) => Some(v),
            ExpressionNode::Branch(_) => None,
        }
    }

    /// Render as infix text. Nested branches for which `by_name` returns true
    /// are written as their result name instead of being expanded.
    pub fn render_with(&self, by_name: &dyn Fn(&BranchNode) -> bool) -> String {
        match self {
            ExpressionNode::Branch(branch) => {
                let operand = |node: &ExpressionNode| match node {
                    ExpressionNode::Branch(child) if by_name(child) => child.y_name.clone(),
                    other => other.render_with(by_name),
                };
                let first = operand(&branch.first);
                let second = operand(&branch.second);
                if branch.operator.is_function() {
                    format!("{}({}, {})", branch.operator.symbol(), first, second)
                } else {
                    format!("({} {} {})", first, branch.operator.symbol(), second)
                }
            }
            ExpressionNode::Parameter(v) | ExpressionNode::Constant(v) => v.clone(),
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&|_| false))
    }
}

/// The tree built for one expression element.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    pub id: String,
    pub control_group_name: String,
    pub root: Rc<ExpressionNode>,
}

impl ExpressionTree {
    /// Result name of the root expression.
    pub fn y_name(&self) -> &str {
        match self.root.as_ref() {
            ExpressionNode::Branch(branch) => &branch.y_name,
            ExpressionNode::Parameter(v) | ExpressionNode::Constant(v) => v,
        }
    }

    pub fn root_branch(&self) -> Option<&BranchNode> {
        self.root.as_branch()
    }
}
