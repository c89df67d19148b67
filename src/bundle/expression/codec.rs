//! Encoding and decoding of expression trees
//!
//! Both directions go through the generic [`Value`] tree, so nesting is handled by the
//! record grammar and the wire spelling by the value emitter.

use super::node::ExpressionNode;
use crate::bundle::parsing::{parse_value, Constructor, Value};

const SYMBOL: &str = "Symbol";
const LITERAL: &str = "Literal";
const APPLY: &str = "Apply";
const PLACEHOLDER: &str = "Placeholder";
const SEQUENCE: &str = "Sequence";

/// Convert a tree into its constructor value
pub fn to_value(node: &ExpressionNode) -> Value {
    let constructor = match node {
        ExpressionNode::Symbol { name } => Constructor::new(SYMBOL).arg(Value::text(name.as_str())),
        ExpressionNode::Literal { text } => {
            Constructor::new(LITERAL).arg(Value::text(text.as_str()))
        }
        ExpressionNode::Apply { operator, args } => Constructor::new(APPLY)
            .arg(Value::text(operator.as_str()))
            .arg(Value::list(args.iter().map(to_value))),
        ExpressionNode::Placeholder { id, hint } => Constructor::new(PLACEHOLDER)
            .arg(Value::integer(*id))
            .arg(Value::text(hint.as_str())),
        ExpressionNode::Sequence { items } => {
            Constructor::new(SEQUENCE).arg(Value::list(items.iter().map(to_value)))
        }
    };
    constructor.into()
}

/// Encode a tree as constructor text
pub fn encode(node: &ExpressionNode) -> String {
    to_value(node).to_string()
}

fn children(value: &Value) -> Option<Vec<ExpressionNode>> {
    value.as_list()?.iter().map(decode_value).collect()
}

/// Recover a tree from a parsed value
///
/// Returns `None` when the value, or any part of it, is not an expression constructor.
pub fn decode_value(value: &Value) -> Option<ExpressionNode> {
    let constructor = value.as_constructor()?;
    let args = &constructor.positional;
    match (constructor.name.as_str(), args.as_slice()) {
        (SYMBOL, [name]) => Some(ExpressionNode::symbol(name.as_str()?)),
        (LITERAL, [text]) => match text {
            // Hand-written files sometimes carry bare numbers
            Value::Number(raw) => Some(ExpressionNode::literal(raw.as_str())),
            other => Some(ExpressionNode::literal(other.as_str()?)),
        },
        (APPLY, [operator, list]) => Some(ExpressionNode::apply(
            operator.as_str()?,
            children(list)?,
        )),
        (APPLY, [operator]) => Some(ExpressionNode::apply(operator.as_str()?, Vec::new())),
        (PLACEHOLDER, [id, hint]) => Some(ExpressionNode::placeholder(
            id.as_i64()?,
            hint.as_str()?,
        )),
        (SEQUENCE, [list]) => Some(ExpressionNode::sequence(children(list)?)),
        _ => None,
    }
}

/// Decode constructor text into a tree
///
/// Unknown or malformed text yields `None`. Text after a complete tree is ignored.
pub fn decode(text: &str) -> Option<ExpressionNode> {
    decode_value(&parse_value(text.trim())?)
}
