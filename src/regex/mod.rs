pub mod ast;
pub mod lexer;
pub mod parser;
pub mod score;
pub mod tree;

pub use ast::{RegexNode, RegularExpression};
pub use parser::parse;
pub use score::score;

use thiserror::Error;

/// The single failure kind of the parser: the pattern is not valid
/// syntax. The message names the offending construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid syntax: {message}")]
pub struct SyntaxError {
    message: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        SyntaxError {
            message: message.into(),
        }
    }
}
