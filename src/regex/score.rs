//! Weighted-sum complexity heuristic over a parsed pattern.
//!
//! Pure fold over the node tree; every variant is matched exhaustively,
//! so a new variant cannot be added without choosing its weight here.

use super::ast::{
    ClassEntry, GroupKind, PredefinedClassKind, QuantifierKind, RegexNode, RegularExpression,
};

pub fn score(regex: &RegularExpression) -> f64 {
    score_node(regex.root())
}

fn score_node(node: &RegexNode) -> f64 {
    match node {
        RegexNode::Character { escaped, .. } => score_character(*escaped),
        RegexNode::Chain(children) => children.iter().map(score_node).sum(),
        RegexNode::Alternative(branches) => {
            let sum: f64 = branches.iter().map(score_node).sum();
            (branches.len() as f64 / 5.0).exp() * sum
        }
        RegexNode::Group {
            kind,
            name,
            flags,
            child,
        } => {
            let mut multiplier = match kind {
                GroupKind::Capturing => 1.0,
                GroupKind::NonCapturing => 2.0,
                GroupKind::Atomic => 5.0,
            };
            if name.is_some() {
                multiplier += 2.0;
            }
            if let Some(flags) = flags {
                multiplier += (flags.len() as f64).exp();
            }
            multiplier * score_node(child)
        }
        RegexNode::Quantifier { kind, child, .. } => {
            let multiplier = match kind {
                QuantifierKind::Optional | QuantifierKind::Star | QuantifierKind::Plus => 1.5,
                QuantifierKind::Exactly | QuantifierKind::AtLeast | QuantifierKind::Between => 2.0,
            };
            multiplier * score_node(child)
        }
        RegexNode::CharacterClass { negated, entries } => {
            let sum: f64 = entries.iter().map(score_entry).sum();
            if *negated { 2.0 * sum } else { sum }
        }
        RegexNode::PredefinedClass(kind) => match kind {
            PredefinedClassKind::Any | PredefinedClassKind::Digit | PredefinedClassKind::Word => {
                0.5
            }
            PredefinedClassKind::NonDigit
            | PredefinedClassKind::Whitespace
            | PredefinedClassKind::NonWord => 2.0,
            PredefinedClassKind::NonWhitespace
            | PredefinedClassKind::HorizontalWhitespace
            | PredefinedClassKind::NonHorizontalWhitespace
            | PredefinedClassKind::VerticalWhitespace
            | PredefinedClassKind::NonVerticalWhitespace => 5.0,
        },
        RegexNode::Boundary(_) => 1.0,
        RegexNode::CaptureGroupRef(_) => 5.0,
        RegexNode::Lookaround { child, .. } => 10.0 * score_node(child),
    }
}

fn score_entry(entry: &ClassEntry) -> f64 {
    match entry {
        ClassEntry::Character { escaped, .. } => score_character(*escaped),
        ClassEntry::Range { .. } => 3.0,
    }
}

fn score_character(escaped: bool) -> f64 {
    if escaped { 0.5 } else { 0.1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::ast::LookaroundKind;
    use crate::regex::parse;

    fn score_of(pattern: &str) -> f64 {
        score(&parse(pattern).unwrap())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn character_weights() {
        assert_close(score_of("a"), 0.1);
        assert_close(score_of("\\."), 0.5);
    }

    #[test]
    fn chain_sums_children() {
        assert_close(score_of("ab\\."), 0.1 + 0.1 + 0.5);
    }

    #[test]
    fn alternation_penalty_grows_with_branch_count() {
        assert_close(score_of("a|b"), (2.0_f64 / 5.0).exp() * 0.2);
        assert_close(score_of("a|b|c"), (3.0_f64 / 5.0).exp() * 0.3);
    }

    #[test]
    fn class_and_range_weights() {
        assert_close(score_of("[a-z]"), 3.0);
        assert_close(score_of("[^a-z]"), 6.0);
        assert_close(score_of("[ab]"), 0.2);
        assert_close(score_of("[]"), 0.0);
        assert_close(score_of("[^]"), 0.0);
    }

    #[test]
    fn predefined_class_weights() {
        assert_close(score_of("."), 0.5);
        assert_close(score_of("\\d"), 0.5);
        assert_close(score_of("\\w"), 0.5);
        assert_close(score_of("\\D"), 2.0);
        assert_close(score_of("\\s"), 2.0);
        assert_close(score_of("\\W"), 2.0);
        assert_close(score_of("\\S"), 5.0);
        assert_close(score_of("\\h"), 5.0);
        assert_close(score_of("\\V"), 5.0);
    }

    #[test]
    fn boundary_is_flat() {
        assert_close(score_of("^"), 1.0);
        assert_close(score_of("\\b"), 1.0);
        assert_close(score_of("^a$"), 1.0 + 0.1 + 1.0);
    }

    #[test]
    fn quantifier_multipliers() {
        assert_close(score_of("a?"), 0.15);
        assert_close(score_of("a*"), 0.15);
        assert_close(score_of("a+"), 0.15);
        assert_close(score_of("a{3}"), 0.2);
        assert_close(score_of("a{3,}"), 0.2);
        assert_close(score_of("a{3,5}"), 0.2);
    }

    #[test]
    fn group_multipliers() {
        assert_close(score_of("(a)"), 0.1);
        let child = parse("a").unwrap().root().clone();
        let non_capturing = RegexNode::Group {
            kind: GroupKind::NonCapturing,
            name: None,
            flags: None,
            child: Box::new(child.clone()),
        };
        assert_close(score_node(&non_capturing), 0.2);
        let atomic_named = RegexNode::Group {
            kind: GroupKind::Atomic,
            name: Some("n".to_string()),
            flags: None,
            child: Box::new(child.clone()),
        };
        assert_close(score_node(&atomic_named), 0.7);
        let flagged = RegexNode::Group {
            kind: GroupKind::Capturing,
            name: None,
            flags: Some("im".to_string()),
            child: Box::new(child),
        };
        assert_close(score_node(&flagged), (1.0 + 2.0_f64.exp()) * 0.1);
    }

    #[test]
    fn lookaround_multiplies_by_ten() {
        let child = parse("[a-z]").unwrap().root().clone();
        let base = score_node(&child);
        let wrapped = RegexNode::Lookaround {
            kind: LookaroundKind::Ahead,
            child: Box::new(child),
        };
        assert_close(score_node(&wrapped), 10.0 * base);
    }

    #[test]
    fn capture_reference_is_flat() {
        assert_close(score_node(&RegexNode::CaptureGroupRef(7)), 5.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let regex = parse("(foo|bar)+[^a-z0-9]{2,5}\\b").unwrap();
        let first = score(&regex);
        for _ in 0..10 {
            assert_eq!(score(&regex), first);
        }
    }
}
