use super::SyntaxError;

/// Lexical classification of a single pattern character. Classification
/// depends only on the character itself; the cursor is the only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Character,
    Number,
    Range,
    Escape,
    Hat,
    Dollar,
    Dot,
    GroupStart,
    GroupEnd,
    ClassStart,
    ClassEnd,
    Or,
    Eof,
}

impl TokenKind {
    fn classify(c: char) -> TokenKind {
        match c {
            '0'..='9' => TokenKind::Number,
            '-' => TokenKind::Range,
            '\\' => TokenKind::Escape,
            '^' => TokenKind::Hat,
            '$' => TokenKind::Dollar,
            '.' => TokenKind::Dot,
            '(' => TokenKind::GroupStart,
            ')' => TokenKind::GroupEnd,
            '[' => TokenKind::ClassStart,
            ']' => TokenKind::ClassEnd,
            '|' => TokenKind::Or,
            _ => TokenKind::Character,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Character => "a character",
            TokenKind::Number => "a digit",
            TokenKind::Range => "'-'",
            TokenKind::Escape => "'\\'",
            TokenKind::Hat => "'^'",
            TokenKind::Dollar => "'$'",
            TokenKind::Dot => "'.'",
            TokenKind::GroupStart => "'('",
            TokenKind::GroupEnd => "')'",
            TokenKind::ClassStart => "'['",
            TokenKind::ClassEnd => "']'",
            TokenKind::Or => "'|'",
            TokenKind::Eof => "end of pattern",
        }
    }
}

/// Cursor over the pattern characters with lookahead and a save/restore
/// mark for speculative parsing. Owned exclusively by one parse call.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    mark: usize,
}

impl Lexer {
    pub fn new(pattern: &str) -> Self {
        Lexer {
            chars: pattern.chars().collect(),
            pos: 0,
            mark: 0,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek_kind_at(0)
    }

    pub fn peek_kind_at(&self, offset: usize) -> TokenKind {
        match self.peek_at(offset) {
            Some(c) => TokenKind::classify(c),
            None => TokenKind::Eof,
        }
    }

    pub fn has_next(&self, n: usize) -> bool {
        self.pos + n <= self.chars.len()
    }

    pub fn consume_next(&mut self) -> Result<char, SyntaxError> {
        match self.chars.get(self.pos).copied() {
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
            None => Err(SyntaxError::new("unexpected end of pattern")),
        }
    }

    /// Consumes the current character only if it has the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<char, SyntaxError> {
        let found = self.peek_kind();
        if found == kind {
            if kind == TokenKind::Eof {
                return Ok('\0');
            }
            self.consume_next()
        } else {
            Err(SyntaxError::new(format!(
                "expected {}, found {}",
                kind.describe(),
                found.describe()
            )))
        }
    }

    /// Remembers the current position for a later `backtrack`.
    pub fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Restores the position saved by the last `mark`, discarding
    /// everything consumed since.
    pub fn backtrack(&mut self) {
        self.pos = self.mark;
    }
}
