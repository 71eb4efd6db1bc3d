//! Parser for a PCRE-like pattern dialect. Builds a syntax tree that can
//! be serialized back to the exact source text, rendered as an indented
//! tree for diagnostics, and scored with a complexity heuristic. Never
//! matches patterns against text.

pub mod regex;

pub use regex::{RegexNode, RegularExpression, SyntaxError, parse, score};
