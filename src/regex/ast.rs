use super::tree::TreePrinter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Capturing,    // (abc)
    NonCapturing, // (?:abc)
    Atomic,       // (?>abc)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    Optional, // ?
    Star,     // *
    Plus,     // +
    Exactly,  // {n}
    AtLeast,  // {n,}
    Between,  // {n,m}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedClassKind {
    Any,                     // .
    Digit,                   // \d
    NonDigit,                // \D
    Word,                    // \w
    NonWord,                 // \W
    Whitespace,              // \s
    NonWhitespace,           // \S
    HorizontalWhitespace,    // \h
    NonHorizontalWhitespace, // \H
    VerticalWhitespace,      // \v
    NonVerticalWhitespace,   // \V
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    LineStart,                // ^
    LineEnd,                  // $
    WordBoundary,             // \b
    NonWordBoundary,          // \B
    InputStart,               // \A
    InputEnd,                 // \z
    InputEndBeforeTerminator, // \Z
    MatchEnd,                 // \G
    Linebreak,                // \R
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookaroundKind {
    Ahead,          // (?=abc)
    NegativeAhead,  // (?!abc)
    Behind,         // (?<=abc)
    NegativeBehind, // (?<!abc)
}

/// An entry inside a character class: a single character or a range.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassEntry {
    Character { content: char, escaped: bool },
    Range { start: char, end: char },
}

/// One node of a parsed pattern. The set is closed; every traversal
/// (serializer, tree rendering, scorer) matches exhaustively so that a
/// new variant breaks the build at each site that must handle it.
///
/// The parser only ever produces plain capturing groups and never
/// produces `Lookaround` or `CaptureGroupRef`; those variants exist for
/// construction by hand and for scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum RegexNode {
    Character {
        content: char,
        escaped: bool,
    },
    /// Concatenation. Never holds exactly one child; a singleton
    /// collapses to the child itself.
    Chain(Vec<RegexNode>),
    /// Alternation. Always holds at least two branches.
    Alternative(Vec<RegexNode>),
    Group {
        kind: GroupKind,
        name: Option<String>,
        flags: Option<String>,
        child: Box<RegexNode>,
    },
    Quantifier {
        kind: QuantifierKind,
        min: u32,
        /// `None` means unbounded.
        max: Option<u32>,
        child: Box<RegexNode>,
    },
    CharacterClass {
        negated: bool,
        entries: Vec<ClassEntry>,
    },
    PredefinedClass(PredefinedClassKind),
    Boundary(BoundaryKind),
    CaptureGroupRef(u32),
    Lookaround {
        kind: LookaroundKind,
        child: Box<RegexNode>,
    },
}

impl RegexNode {
    /// A plain capturing group, the only form the parser builds.
    pub fn capturing_group(child: RegexNode) -> RegexNode {
        RegexNode::Group {
            kind: GroupKind::Capturing,
            name: None,
            flags: None,
            child: Box::new(child),
        }
    }

    /// Serializes back to the exact source text this node was parsed from.
    pub fn to_pattern_text(&self) -> String {
        match self {
            RegexNode::Character { content, escaped } => character_text(*content, *escaped),
            RegexNode::Chain(children) => children.iter().map(RegexNode::to_pattern_text).collect(),
            RegexNode::Alternative(branches) => branches
                .iter()
                .map(RegexNode::to_pattern_text)
                .collect::<Vec<_>>()
                .join("|"),
            RegexNode::Group {
                kind,
                name,
                flags,
                child,
            } => {
                let inner = child.to_pattern_text();
                if let Some(name) = name {
                    format!("(?<{name}>{inner})")
                } else if let Some(flags) = flags {
                    format!("(?{flags}:{inner})")
                } else {
                    match kind {
                        GroupKind::Capturing => format!("({inner})"),
                        GroupKind::NonCapturing => format!("(?:{inner})"),
                        GroupKind::Atomic => format!("(?>{inner})"),
                    }
                }
            }
            RegexNode::Quantifier {
                kind,
                min,
                max,
                child,
            } => {
                let suffix = match kind {
                    QuantifierKind::Optional => "?".to_string(),
                    QuantifierKind::Star => "*".to_string(),
                    QuantifierKind::Plus => "+".to_string(),
                    QuantifierKind::Exactly => format!("{{{min}}}"),
                    QuantifierKind::AtLeast => format!("{{{min},}}"),
                    QuantifierKind::Between => format!("{{{min},{}}}", max.unwrap_or(0)),
                };
                format!("{}{suffix}", child.to_pattern_text())
            }
            RegexNode::CharacterClass { negated, entries } => {
                let mut out = String::from("[");
                if *negated {
                    out.push('^');
                }
                for entry in entries {
                    out.push_str(&entry.to_pattern_text());
                }
                out.push(']');
                out
            }
            RegexNode::PredefinedClass(kind) => {
                let text = match kind {
                    PredefinedClassKind::Any => ".",
                    PredefinedClassKind::Digit => "\\d",
                    PredefinedClassKind::NonDigit => "\\D",
                    PredefinedClassKind::Word => "\\w",
                    PredefinedClassKind::NonWord => "\\W",
                    PredefinedClassKind::Whitespace => "\\s",
                    PredefinedClassKind::NonWhitespace => "\\S",
                    PredefinedClassKind::HorizontalWhitespace => "\\h",
                    PredefinedClassKind::NonHorizontalWhitespace => "\\H",
                    PredefinedClassKind::VerticalWhitespace => "\\v",
                    PredefinedClassKind::NonVerticalWhitespace => "\\V",
                };
                text.to_string()
            }
            RegexNode::Boundary(kind) => {
                let text = match kind {
                    BoundaryKind::LineStart => "^",
                    BoundaryKind::LineEnd => "$",
                    BoundaryKind::WordBoundary => "\\b",
                    BoundaryKind::NonWordBoundary => "\\B",
                    BoundaryKind::InputStart => "\\A",
                    BoundaryKind::InputEnd => "\\z",
                    BoundaryKind::InputEndBeforeTerminator => "\\Z",
                    BoundaryKind::MatchEnd => "\\G",
                    BoundaryKind::Linebreak => "\\R",
                };
                text.to_string()
            }
            RegexNode::CaptureGroupRef(index) => format!("\\{index}"),
            RegexNode::Lookaround { kind, child } => {
                let open = match kind {
                    LookaroundKind::Ahead => "(?=",
                    LookaroundKind::NegativeAhead => "(?!",
                    LookaroundKind::Behind => "(?<=",
                    LookaroundKind::NegativeBehind => "(?<!",
                };
                format!("{open}{})", child.to_pattern_text())
            }
        }
    }

    pub fn to_tree(&self, printer: &mut TreePrinter) {
        match self {
            RegexNode::Character { content, escaped } => {
                printer.add_line(character_tree_line(*content, *escaped));
            }
            RegexNode::Chain(children) => {
                printer.add_line("Chain");
                printer.indent();
                for child in children {
                    child.to_tree(printer);
                }
                printer.unindent();
            }
            RegexNode::Alternative(branches) => {
                printer.add_line("Alternative");
                printer.indent();
                for branch in branches {
                    branch.to_tree(printer);
                }
                printer.unindent();
            }
            RegexNode::Group {
                kind,
                name,
                flags,
                child,
            } => {
                let mut line = match kind {
                    GroupKind::Capturing => "Group".to_string(),
                    GroupKind::NonCapturing => "Group (non-capturing)".to_string(),
                    GroupKind::Atomic => "Group (atomic)".to_string(),
                };
                if let Some(name) = name {
                    line.push_str(&format!(" (name = {name})"));
                }
                if let Some(flags) = flags {
                    line.push_str(&format!(" (flags = {flags})"));
                }
                printer.add_line(line);
                printer.indent();
                child.to_tree(printer);
                printer.unindent();
            }
            RegexNode::Quantifier {
                min, max, child, ..
            } => {
                let upper = match max {
                    Some(max) => max.to_string(),
                    None => "unbounded".to_string(),
                };
                printer.add_line(format!("Quantifier ({min} to {upper})"));
                printer.indent();
                child.to_tree(printer);
                printer.unindent();
            }
            RegexNode::CharacterClass { negated, entries } => {
                if *negated {
                    printer.add_line("Character Class (negated)");
                } else {
                    printer.add_line("Character Class");
                }
                printer.indent();
                for entry in entries {
                    entry.to_tree(printer);
                }
                printer.unindent();
            }
            RegexNode::PredefinedClass(kind) => {
                let desc = match kind {
                    PredefinedClassKind::Any => "any",
                    PredefinedClassKind::Digit => "digit",
                    PredefinedClassKind::NonDigit => "non-digit",
                    PredefinedClassKind::Word => "word",
                    PredefinedClassKind::NonWord => "non-word",
                    PredefinedClassKind::Whitespace => "whitespace",
                    PredefinedClassKind::NonWhitespace => "non-whitespace",
                    PredefinedClassKind::HorizontalWhitespace => "horizontal whitespace",
                    PredefinedClassKind::NonHorizontalWhitespace => "non-horizontal whitespace",
                    PredefinedClassKind::VerticalWhitespace => "vertical whitespace",
                    PredefinedClassKind::NonVerticalWhitespace => "non-vertical whitespace",
                };
                printer.add_line(format!("Predefined Class ({desc})"));
            }
            RegexNode::Boundary(kind) => {
                let desc = match kind {
                    BoundaryKind::LineStart => "line start",
                    BoundaryKind::LineEnd => "line end",
                    BoundaryKind::WordBoundary => "word boundary",
                    BoundaryKind::NonWordBoundary => "non-word boundary",
                    BoundaryKind::InputStart => "input start",
                    BoundaryKind::InputEnd => "input end",
                    BoundaryKind::InputEndBeforeTerminator => "input end before terminator",
                    BoundaryKind::MatchEnd => "previous match end",
                    BoundaryKind::Linebreak => "linebreak",
                };
                printer.add_line(format!("Boundary ({desc})"));
            }
            RegexNode::CaptureGroupRef(index) => {
                printer.add_line(format!("Capture Group Ref (n = {index})"));
            }
            RegexNode::Lookaround { kind, child } => {
                let desc = match kind {
                    LookaroundKind::Ahead => "ahead",
                    LookaroundKind::NegativeAhead => "negative ahead",
                    LookaroundKind::Behind => "behind",
                    LookaroundKind::NegativeBehind => "negative behind",
                };
                printer.add_line(format!("Lookaround ({desc})"));
                printer.indent();
                child.to_tree(printer);
                printer.unindent();
            }
        }
    }
}

impl ClassEntry {
    pub fn to_pattern_text(&self) -> String {
        match self {
            ClassEntry::Character { content, escaped } => character_text(*content, *escaped),
            ClassEntry::Range { start, end } => format!("{start}-{end}"),
        }
    }

    pub fn to_tree(&self, printer: &mut TreePrinter) {
        match self {
            ClassEntry::Character { content, escaped } => {
                printer.add_line(character_tree_line(*content, *escaped));
            }
            ClassEntry::Range { start, end } => {
                printer.add_line(format!("Range ('{start}' to '{end}')"));
            }
        }
    }
}

fn character_text(content: char, escaped: bool) -> String {
    if escaped {
        format!("\\{content}")
    } else {
        content.to_string()
    }
}

fn character_tree_line(content: char, escaped: bool) -> String {
    if escaped {
        format!("{content} (escaped)")
    } else {
        content.to_string()
    }
}

/// A fully parsed pattern, owned by the caller and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularExpression {
    root: RegexNode,
}

impl RegularExpression {
    pub fn new(root: RegexNode) -> Self {
        RegularExpression { root }
    }

    pub fn root(&self) -> &RegexNode {
        &self.root
    }

    /// Exact round-trip back to the source pattern.
    pub fn to_pattern_text(&self) -> String {
        self.root.to_pattern_text()
    }

    /// Indented one-line-per-node rendering for diagnostics.
    pub fn to_tree_text(&self) -> String {
        let mut printer = TreePrinter::new();
        self.root.to_tree(&mut printer);
        printer.finish()
    }
}
