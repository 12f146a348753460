//! Error types for the fuzzy rule translator.

use std::fmt;

use super::token::Token;

/// An error that occurred while translating a rule file.
///
/// Lexical errors carry only a position. Syntax errors always carry the
/// offending token. Semantic errors raised by the symbol tables start without
/// one and get the parser's lookahead attached via [`CompileError::or_token`].
#[derive(Debug, Clone)]
pub struct CompileError {
    pub message: String,
    pub token: Option<Token>,
    pub line: usize,
    pub col: usize,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    SyntaxError,
    SemanticError,
    /// The output sink refused a write.
    OutputError,
}

impl CompileError {
    pub fn lex(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            token: None,
            line,
            col,
            kind: ErrorKind::LexError,
        }
    }

    pub fn syntax(message: impl Into<String>, token: &Token) -> Self {
        Self::at(ErrorKind::SyntaxError, message, token)
    }

    /// A semantic error located at `token`.
    pub fn semantic(message: impl Into<String>, token: &Token) -> Self {
        Self::at(ErrorKind::SemanticError, message, token)
    }

    /// A semantic error with no location yet.
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: None,
            line: 0,
            col: 0,
            kind: ErrorKind::SemanticError,
        }
    }

    fn at(kind: ErrorKind, message: impl Into<String>, token: &Token) -> Self {
        Self {
            message: message.into(),
            token: Some(token.clone()),
            line: token.line,
            col: token.col,
            kind,
        }
    }

    /// Attach `token` as the location unless the error already has one.
    pub fn or_token(mut self, token: &Token) -> Self {
        if self.token.is_none() && self.kind != ErrorKind::LexError {
            self.line = token.line;
            self.col = token.col;
            self.token = Some(token.clone());
        }
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {:?}: {}",
            self.line, self.col, self.kind, self.message
        )
    }
}

impl std::error::Error for CompileError {}

impl From<fmt::Error> for CompileError {
    fn from(_: fmt::Error) -> Self {
        Self {
            message: "output sink rejected generated text".to_string(),
            token: None,
            line: 0,
            col: 0,
            kind: ErrorKind::OutputError,
        }
    }
}
