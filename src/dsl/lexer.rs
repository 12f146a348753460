//! Lexer for the fuzzy rule language.
//!
//! Converts source text into a stream of [`Token`]s. Patterns are tried in a
//! fixed priority order at each position: numbers, `:=`, `;`, `,`, the
//! direction words, identifiers, line breaks, whitespace, then the single
//! character delimiters.

use tracing::debug;

use super::error::CompileError;
use super::token::{Token, TokenKind, DIRECTIONS};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.line, self.col));
                break;
            }

            let ch = self.peek();

            if ch == '\n' {
                self.advance();
                self.line += 1;
                self.col = 1;
                continue;
            }

            let token = match ch {
                '0'..='9' => self.lex_number(),
                ':' if self.peek_next() == Some('=') => {
                    let line = self.line;
                    let col = self.col;
                    self.advance();
                    self.advance();
                    Token::new(TokenKind::Assign, ":=", line, col)
                }
                ';' => self.single_char(TokenKind::End),
                ',' => self.single_char(TokenKind::Comma),
                'a'..='z' | 'A'..='Z' => self.lex_word(),
                '{' => self.single_char(TokenKind::LBrace),
                '}' => self.single_char(TokenKind::RBrace),
                '(' => self.single_char(TokenKind::LParen),
                ')' => self.single_char(TokenKind::RParen),
                ':' => self.single_char(TokenKind::Colon),
                '=' => self.single_char(TokenKind::Equals),
                _ => {
                    return Err(CompileError::lex(
                        format!("unexpected character '{ch}' on line {}", self.line),
                        self.line,
                        self.col,
                    ));
                }
            };

            tokens.push(token);
        }

        debug!(count = tokens.len(), lines = self.line, "tokenized source");
        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn previous(&self) -> Option<char> {
        self.pos.checked_sub(1).map(|i| self.chars[i])
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch != '\n' {
            self.col += 1;
        }
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            let ch = self.peek();
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let col = self.col;
        let ch = self.advance();
        Token::new(kind, ch.to_string(), line, col)
    }

    /// `digits ['.' digits*]`, kept as source text.
    fn lex_number(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut s = String::new();

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            s.push(self.advance());
        }

        if !self.is_at_end() && self.peek() == '.' {
            s.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                s.push(self.advance());
            }
        }

        Token::new(TokenKind::Number, s, line, col)
    }

    /// Identifiers, keywords, and the direction words.
    ///
    /// `in` and `out` only count as directions on word boundaries, the way a
    /// `\b` anchored pattern would see them, so `3in` lexes as a number
    /// followed by the identifier `in`.
    fn lex_word(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let starts_on_boundary = !self.previous().is_some_and(is_word_char);
        let mut s = String::new();

        while !self.is_at_end() && self.peek().is_ascii_alphanumeric() {
            s.push(self.advance());
        }

        let ends_on_boundary = self.is_at_end() || !is_word_char(self.peek());
        let kind = if DIRECTIONS.contains(&s.as_str()) && starts_on_boundary && ends_on_boundary {
            TokenKind::Direction
        } else {
            TokenKind::keyword(&s).unwrap_or(TokenKind::Ident)
        };

        Token::new(kind, s, line, col)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A consumable view over the lexer's output.
///
/// Supports re-querying the next token without consuming it and pushing back
/// exactly one consumed token.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    pushed: Option<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            pushed: None,
        }
    }

    /// The token `next` would return, without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.pushed.as_ref().or_else(|| self.tokens.get(self.pos))
    }

    /// Return a consumed token to the front of the stream.
    pub fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushed.is_none(), "only one token can be pushed back");
        self.pushed = Some(token);
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    /// Consume the next token. Returns `None` once the stream is exhausted.
    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pushed.take() {
            return Some(token);
        }
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}
