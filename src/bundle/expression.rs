//! Expression trees and their textual constructor form
//!
//! An [`ExpressionNode`] is stored inside equation records as constructor text:
//!
//! ```text
//! Apply("equals", List(Symbol("x"), Literal("1")))
//! ```
//!
//! [`encode`] and [`decode`] are inverse to each other for every tree.

pub mod codec;
pub mod node;

pub use codec::{decode, decode_value, encode, to_value};
pub use node::ExpressionNode;
