use serde::Serialize;

/// A symbolic expression, independent of any rendered notation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpressionNode {
    Symbol { name: String },
    Literal { text: String },
    /// Operator application. Argument order is significant.
    Apply {
        operator: String,
        args: Vec<ExpressionNode>,
    },
    /// An unfilled slot in an expression under construction
    Placeholder { id: i64, hint: String },
    Sequence { items: Vec<ExpressionNode> },
}

impl ExpressionNode {
    pub fn symbol(name: impl Into<String>) -> Self {
        ExpressionNode::Symbol { name: name.into() }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        ExpressionNode::Literal { text: text.into() }
    }

    pub fn apply(operator: impl Into<String>, args: Vec<ExpressionNode>) -> Self {
        ExpressionNode::Apply {
            operator: operator.into(),
            args,
        }
    }

    pub fn placeholder(id: i64, hint: impl Into<String>) -> Self {
        ExpressionNode::Placeholder {
            id,
            hint: hint.into(),
        }
    }

    pub fn sequence(items: Vec<ExpressionNode>) -> Self {
        ExpressionNode::Sequence { items }
    }

    /// Direct children, in order
    pub fn children(&self) -> &[ExpressionNode] {
        match self {
            ExpressionNode::Apply { args, .. } => args,
            ExpressionNode::Sequence { items } => items,
            _ => &[],
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(ExpressionNode::size).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(ExpressionNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Whether any placeholder is left in the tree
    pub fn has_placeholders(&self) -> bool {
        matches!(self, ExpressionNode::Placeholder { .. })
            || self.children().iter().any(ExpressionNode::has_placeholders)
    }
}
