//! Token types for the fuzzy rule language lexer.

use std::fmt;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text the token was matched from.
    pub text: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    If,
    Then,
    And,
    Or,
    Not,
    Is,
    Domain,
    From,
    To,
    Vars,
    Rules,

    // `in` / `out`, reserved before identifiers are matched
    Direction,

    // Literals
    Ident,
    Number,

    // Delimiters
    Assign, // :=
    End,    // ;
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Colon,
    Equals,

    // Special
    Eof,
}

/// Reserved words, re-tagged from identifiers after they are matched.
pub const KEYWORDS: [(&str, TokenKind); 11] = [
    ("if", TokenKind::If),
    ("then", TokenKind::Then),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("is", TokenKind::Is),
    ("domain", TokenKind::Domain),
    ("from", TokenKind::From),
    ("to", TokenKind::To),
    ("vars", TokenKind::Vars),
    ("rules", TokenKind::Rules),
];

/// Words matched as [`TokenKind::Direction`] ahead of the identifier pattern.
pub const DIRECTIONS: [&str; 2] = ["in", "out"];

impl TokenKind {
    /// Look up the keyword kind for an identifier's text.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, kind)| *kind)
    }

    /// Human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::Is => "'is'",
            TokenKind::Domain => "'domain'",
            TokenKind::From => "'from'",
            TokenKind::To => "'to'",
            TokenKind::Vars => "'vars'",
            TokenKind::Rules => "'rules'",
            TokenKind::Direction => "direction",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::Assign => "':='",
            TokenKind::End => "';'",
            TokenKind::Comma => "','",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Colon => "':'",
            TokenKind::Equals => "'='",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
