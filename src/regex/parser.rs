use super::SyntaxError;
use super::ast::{
    BoundaryKind, ClassEntry, PredefinedClassKind, QuantifierKind, RegexNode, RegularExpression,
};
use super::lexer::{Lexer, TokenKind};

/// Parses a whole pattern. The entire input must form one complete
/// pattern; trailing characters are a syntax error.
pub fn parse(pattern: &str) -> Result<RegularExpression, SyntaxError> {
    let mut lexer = Lexer::new(pattern);
    let root = parse_alternatives(&mut lexer)?;
    lexer.expect(TokenKind::Eof)?;
    Ok(RegularExpression::new(root))
}

fn parse_alternatives(lexer: &mut Lexer) -> Result<RegexNode, SyntaxError> {
    let mut branches = vec![parse_chain(lexer)?];
    while lexer.peek_kind() == TokenKind::Or {
        lexer.consume_next()?;
        branches.push(parse_chain(lexer)?);
    }

    if branches.len() == 1 {
        Ok(branches.remove(0))
    } else {
        Ok(RegexNode::Alternative(branches))
    }
}

fn parse_chain(lexer: &mut Lexer) -> Result<RegexNode, SyntaxError> {
    let mut children = Vec::new();
    loop {
        match lexer.peek_kind() {
            TokenKind::Hat => {
                lexer.consume_next()?;
                children.push(RegexNode::Boundary(BoundaryKind::LineStart));
            }
            TokenKind::Dollar => {
                lexer.consume_next()?;
                children.push(RegexNode::Boundary(BoundaryKind::LineEnd));
            }
            TokenKind::Eof | TokenKind::GroupEnd | TokenKind::ClassEnd | TokenKind::Or => break,
            _ => children.push(parse_maybe_quantified(lexer)?),
        }
    }

    if children.len() == 1 {
        Ok(children.remove(0))
    } else {
        Ok(RegexNode::Chain(children))
    }
}

fn parse_maybe_quantified(lexer: &mut Lexer) -> Result<RegexNode, SyntaxError> {
    let child = match lexer.peek_kind() {
        TokenKind::Character | TokenKind::Number | TokenKind::Range => RegexNode::Character {
            content: lexer.consume_next()?,
            escaped: false,
        },
        TokenKind::Escape => parse_escaped(lexer)?,
        TokenKind::GroupStart => parse_group(lexer)?,
        TokenKind::ClassStart => parse_character_class(lexer)?,
        TokenKind::Dot => {
            lexer.consume_next()?;
            RegexNode::PredefinedClass(PredefinedClassKind::Any)
        }
        TokenKind::Hat => {
            lexer.consume_next()?;
            RegexNode::Boundary(BoundaryKind::LineStart)
        }
        _ => {
            return Err(match lexer.peek() {
                Some(c) => SyntaxError::new(format!("unexpected character '{c}'")),
                None => SyntaxError::new("unexpected end of pattern"),
            });
        }
    };

    // Quantifiers dispatch on the raw next character; '{' is an ordinary
    // character token and only becomes a quantifier if a complete bound
    // expression follows.
    let quantifier = match lexer.peek() {
        Some('?') => {
            lexer.consume_next()?;
            Some((QuantifierKind::Optional, 0, Some(1)))
        }
        Some('*') => {
            lexer.consume_next()?;
            Some((QuantifierKind::Star, 0, None))
        }
        Some('+') => {
            lexer.consume_next()?;
            Some((QuantifierKind::Plus, 1, None))
        }
        Some('{') => parse_braced_quantifier(lexer)?,
        _ => None,
    };

    match quantifier {
        Some((kind, min, max)) => Ok(RegexNode::Quantifier {
            kind,
            min,
            max,
            child: Box::new(child),
        }),
        None => Ok(child),
    }
}

type Bounds = (QuantifierKind, u32, Option<u32>);

/// Speculatively parses `{n}`, `{n,}` or `{n,m}`. On any malformed shape
/// the cursor is restored to the `{`, which the chain loop then consumes
/// as a literal character.
fn parse_braced_quantifier(lexer: &mut Lexer) -> Result<Option<Bounds>, SyntaxError> {
    lexer.mark();
    lexer.consume_next()?; // '{'

    if lexer.peek_kind() != TokenKind::Number {
        lexer.backtrack();
        return Ok(None);
    }
    let min = parse_number(lexer)?;

    match lexer.peek() {
        Some('}') => {
            lexer.consume_next()?;
            Ok(Some((QuantifierKind::Exactly, min, Some(min))))
        }
        Some(',') => {
            lexer.consume_next()?;
            if lexer.peek() == Some('}') {
                lexer.consume_next()?;
                Ok(Some((QuantifierKind::AtLeast, min, None)))
            } else if lexer.peek_kind() == TokenKind::Number {
                let max = parse_number(lexer)?;
                if lexer.peek() == Some('}') {
                    lexer.consume_next()?;
                    Ok(Some((QuantifierKind::Between, min, Some(max))))
                } else {
                    lexer.backtrack();
                    Ok(None)
                }
            } else {
                lexer.backtrack();
                Ok(None)
            }
        }
        _ => {
            lexer.backtrack();
            Ok(None)
        }
    }
}

fn parse_number(lexer: &mut Lexer) -> Result<u32, SyntaxError> {
    let mut digits = String::new();
    while lexer.peek_kind() == TokenKind::Number {
        digits.push(lexer.consume_next()?);
    }
    digits
        .parse()
        .map_err(|_| SyntaxError::new(format!("repetition count '{digits}' out of range")))
}

fn parse_escaped(lexer: &mut Lexer) -> Result<RegexNode, SyntaxError> {
    lexer.expect(TokenKind::Escape)?;
    let value = lexer.consume_next()?;
    let node = match value {
        'd' => RegexNode::PredefinedClass(PredefinedClassKind::Digit),
        'D' => RegexNode::PredefinedClass(PredefinedClassKind::NonDigit),
        'h' => RegexNode::PredefinedClass(PredefinedClassKind::HorizontalWhitespace),
        'H' => RegexNode::PredefinedClass(PredefinedClassKind::NonHorizontalWhitespace),
        's' => RegexNode::PredefinedClass(PredefinedClassKind::Whitespace),
        'S' => RegexNode::PredefinedClass(PredefinedClassKind::NonWhitespace),
        'v' => RegexNode::PredefinedClass(PredefinedClassKind::VerticalWhitespace),
        'V' => RegexNode::PredefinedClass(PredefinedClassKind::NonVerticalWhitespace),
        'w' => RegexNode::PredefinedClass(PredefinedClassKind::Word),
        'W' => RegexNode::PredefinedClass(PredefinedClassKind::NonWord),
        'b' => RegexNode::Boundary(BoundaryKind::WordBoundary),
        'B' => RegexNode::Boundary(BoundaryKind::NonWordBoundary),
        'A' => RegexNode::Boundary(BoundaryKind::InputStart),
        'G' => RegexNode::Boundary(BoundaryKind::MatchEnd),
        'Z' => RegexNode::Boundary(BoundaryKind::InputEndBeforeTerminator),
        'z' => RegexNode::Boundary(BoundaryKind::InputEnd),
        'R' => RegexNode::Boundary(BoundaryKind::Linebreak),
        '(' | ')' | '[' | ']' | '{' | '}' | '.' | '/' | '\\' => RegexNode::Character {
            content: value,
            escaped: true,
        },
        _ => {
            return Err(SyntaxError::new(format!(
                "unknown escape sequence '\\{value}'"
            )));
        }
    };
    Ok(node)
}

fn parse_group(lexer: &mut Lexer) -> Result<RegexNode, SyntaxError> {
    lexer.expect(TokenKind::GroupStart)?;
    let child = parse_alternatives(lexer)?;
    lexer.expect(TokenKind::GroupEnd)?;
    Ok(RegexNode::capturing_group(child))
}

fn parse_character_class(lexer: &mut Lexer) -> Result<RegexNode, SyntaxError> {
    lexer.expect(TokenKind::ClassStart)?;

    let negated = if lexer.peek_kind() == TokenKind::Hat {
        lexer.consume_next()?;
        true
    } else {
        false
    };

    let mut entries = Vec::new();
    loop {
        match lexer.peek_kind() {
            TokenKind::ClassEnd => break,
            TokenKind::Eof => {
                return Err(SyntaxError::new("unterminated character class"));
            }
            _ => {}
        }

        // A range needs three tokens: start, '-', and an end that is not
        // the closing bracket (so "[a-]" keeps the dash literal).
        if lexer.has_next(3)
            && lexer.peek_kind_at(1) == TokenKind::Range
            && lexer.peek_kind_at(2) != TokenKind::ClassEnd
        {
            let start = lexer.consume_next()?;
            lexer.expect(TokenKind::Range)?;
            let end = lexer.consume_next()?;
            entries.push(ClassEntry::Range { start, end });
        } else if lexer.peek_kind() == TokenKind::Escape {
            lexer.consume_next()?;
            entries.push(ClassEntry::Character {
                content: lexer.consume_next()?,
                escaped: true,
            });
        } else {
            entries.push(ClassEntry::Character {
                content: lexer.consume_next()?,
                escaped: false,
            });
        }
    }

    lexer.expect(TokenKind::ClassEnd)?;
    Ok(RegexNode::CharacterClass { negated, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::ast::GroupKind;

    fn root(pattern: &str) -> RegexNode {
        parse(pattern).unwrap().root().clone()
    }

    #[test]
    fn single_branch_and_single_element_collapse() {
        assert_eq!(
            root("a"),
            RegexNode::Character {
                content: 'a',
                escaped: false
            }
        );
        // No Alternative wrapper for one branch, no Chain for one element.
        match root("(a)") {
            RegexNode::Group { kind, child, .. } => {
                assert_eq!(kind, GroupKind::Capturing);
                assert_eq!(
                    *child,
                    RegexNode::Character {
                        content: 'a',
                        escaped: false
                    }
                );
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn alternation_collects_all_branches() {
        match root("foo|bar|baz") {
            RegexNode::Alternative(branches) => assert_eq!(branches.len(), 3),
            other => panic!("expected alternative, got {other:?}"),
        }
    }

    #[test]
    fn anchors_parse_in_chain_position() {
        match root("^a$") {
            RegexNode::Chain(children) => {
                assert_eq!(children[0], RegexNode::Boundary(BoundaryKind::LineStart));
                assert_eq!(children[2], RegexNode::Boundary(BoundaryKind::LineEnd));
            }
            other => panic!("expected chain, got {other:?}"),
        }
    }

    #[test]
    fn braced_quantifier_shapes() {
        match root("a{3}") {
            RegexNode::Quantifier { kind, min, max, .. } => {
                assert_eq!(kind, QuantifierKind::Exactly);
                assert_eq!((min, max), (3, Some(3)));
            }
            other => panic!("expected quantifier, got {other:?}"),
        }
        match root("a{4,}") {
            RegexNode::Quantifier { kind, min, max, .. } => {
                assert_eq!(kind, QuantifierKind::AtLeast);
                assert_eq!((min, max), (4, None));
            }
            other => panic!("expected quantifier, got {other:?}"),
        }
        match root("a{2,5}") {
            RegexNode::Quantifier { kind, min, max, .. } => {
                assert_eq!(kind, QuantifierKind::Between);
                assert_eq!((min, max), (2, Some(5)));
            }
            other => panic!("expected quantifier, got {other:?}"),
        }
    }

    #[test]
    fn malformed_brace_falls_back_to_literal() {
        match root("a{") {
            RegexNode::Chain(children) => {
                assert_eq!(children.len(), 2);
                assert_eq!(
                    children[1],
                    RegexNode::Character {
                        content: '{',
                        escaped: false
                    }
                );
            }
            other => panic!("expected chain, got {other:?}"),
        }
        // "{x}" never looked like a quantifier at all
        assert_eq!(parse("a{x}").unwrap().to_pattern_text(), "a{x}");
        // "{2,x}" backtracks after consuming the min
        assert_eq!(parse("a{2,x}").unwrap().to_pattern_text(), "a{2,x}");
    }

    #[test]
    fn oversized_repetition_count_is_an_error() {
        let err = parse("a{99999999999}").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn class_hat_is_only_special_up_front() {
        match root("[a-z^]") {
            RegexNode::CharacterClass { negated, entries } => {
                assert!(!negated);
                assert_eq!(
                    entries,
                    vec![
                        ClassEntry::Range {
                            start: 'a',
                            end: 'z'
                        },
                        ClassEntry::Character {
                            content: '^',
                            escaped: false
                        },
                    ]
                );
            }
            other => panic!("expected class, got {other:?}"),
        }
        match root("[^abc]") {
            RegexNode::CharacterClass { negated, entries } => {
                assert!(negated);
                assert_eq!(entries.len(), 3);
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn empty_class_is_permitted() {
        assert_eq!(
            root("[]"),
            RegexNode::CharacterClass {
                negated: false,
                entries: vec![]
            }
        );
    }

    #[test]
    fn trailing_dash_stays_literal() {
        assert_eq!(parse("[a-]").unwrap().to_pattern_text(), "[a-]");
    }

    #[test]
    fn escapes_accept_and_reject() {
        assert!(parse("\\.").is_ok());
        assert!(parse("\\(").is_ok());
        assert!(parse("\\d\\W\\h").is_ok());
        let err = parse("\\q").unwrap_err();
        assert!(err.to_string().contains("unknown escape"));
    }

    #[test]
    fn unterminated_constructs_fail() {
        assert!(parse("(abc").is_err());
        assert!(parse("[abc").is_err());
        assert!(parse("(abc)").is_ok());
        assert!(parse("[abc]").is_ok());
    }

    #[test]
    fn trailing_input_fails() {
        assert!(parse("a)").is_err());
        assert!(parse("ab]x)").is_err());
    }
}
