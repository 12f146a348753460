//! Parser for the fuzzy rule language.
//!
//! Recursive descent with one token of lookahead. The [`Program`] symbol
//! tables are filled in while parsing, so undeclared or duplicate names are
//! reported at the point they appear.
//!
//! ```text
//! program     := { domain } [ varsBlock ] [ rulesBlock ]
//! domain      := "domain" ID "from" NUM "to" NUM "{" { categoryDef } "}"
//! categoryDef := ID "=" curveDef { "," curveDef } ";"
//! curveDef    := ID "(" NUM { "," NUM } ")"
//! varsBlock   := "vars" "{" { ID { "," ID } ":" ("in"|"out") ID ";" } "}"
//! rulesBlock  := "rules" "{" { rule } "}"
//! rule        := "if" expr "then" consequent { "," consequent } ";"
//! expr        := disjunct { "or" disjunct }
//! disjunct    := conjunct { "and" conjunct }
//! conjunct    := "(" expr ")" | term
//! term        := ID "is" [ "not" ] [ hedge ] ID
//! consequent  := ID ":=" ID
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use super::ast::*;
use super::error::CompileError;
use super::hedge::Hedge;
use super::lexer::TokenStream;
use super::token::{Token, TokenKind};

pub struct Parser {
    stream: TokenStream,
    /// Returned once the stream is exhausted.
    eof: Token,
    program: Program,
    curve_arity: BTreeMap<String, usize>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => Token::new(TokenKind::Eof, "", last.line, last.col),
            None => Token::new(TokenKind::Eof, "", 1, 1),
        };
        Self {
            stream: TokenStream::new(tokens),
            eof,
            program: Program::new(),
            curve_arity: BTreeMap::new(),
        }
    }

    /// Require curves with these function names to take exactly this many
    /// parameters. Curves not listed are left unchecked.
    pub fn with_curve_arity(mut self, curve_arity: BTreeMap<String, usize>) -> Self {
        self.curve_arity = curve_arity;
        self
    }

    pub fn parse(mut self) -> Result<Program, CompileError> {
        if let Err(err) = self.parse_program() {
            return Err(err.or_token(self.lookahead()));
        }

        debug!(
            domains = self.program.domain_count(),
            variables = self.program.variables().count(),
            rules = self.program.rules().len(),
            "parsed program"
        );
        Ok(self.program)
    }

    fn parse_program(&mut self) -> Result<(), CompileError> {
        while self.check(TokenKind::Domain) {
            self.parse_domain()?;
        }
        if self.check(TokenKind::Vars) {
            self.parse_vars()?;
        }
        if self.check(TokenKind::Rules) {
            self.parse_rules()?;
        }
        self.expect(TokenKind::Eof)?;
        Ok(())
    }

    fn parse_domain(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Domain)?;
        let name = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::From)?;
        let min = self.expect_number()?;
        self.expect(TokenKind::To)?;
        let max = self.expect_number()?;

        // Duplicate names surface without a token and pick up the lookahead.
        let domain = self.program.add_domain(&name.text, min, max)?;

        self.expect(TokenKind::LBrace)?;
        while self.check(TokenKind::Ident) {
            self.parse_category(domain)?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_category(&mut self, domain: DomainId) -> Result<(), CompileError> {
        let name = self.expect(TokenKind::Ident)?;
        let index = self
            .program
            .domain_mut(domain)
            .add_category(&name.text)
            .map_err(|e| e.or_token(&name))?;

        self.expect(TokenKind::Equals)?;
        self.parse_curve(domain, index)?;
        while self.check(TokenKind::Comma) {
            self.advance();
            self.parse_curve(domain, index)?;
        }
        self.expect(TokenKind::End)?;
        Ok(())
    }

    fn parse_curve(&mut self, domain: DomainId, category: usize) -> Result<(), CompileError> {
        let function = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::LParen)?;
        let mut params = vec![self.expect_number()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            params.push(self.expect_number()?);
        }
        self.expect(TokenKind::RParen)?;

        if let Some(&arity) = self.curve_arity.get(&function.text) {
            if params.len() != arity {
                return Err(CompileError::semantic(
                    format!(
                        "Curve '{}' takes {arity} parameters, got {}",
                        function.text,
                        params.len()
                    ),
                    &function,
                ));
            }
        }

        self.program.domain_mut(domain).add_curve(
            category,
            Curve {
                function: function.text,
                params,
            },
        );
        Ok(())
    }

    fn parse_vars(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Vars)?;
        self.expect(TokenKind::LBrace)?;
        while self.check(TokenKind::Ident) {
            let mut names = vec![self.expect(TokenKind::Ident)?];
            while self.check(TokenKind::Comma) {
                self.advance();
                names.push(self.expect(TokenKind::Ident)?);
            }
            self.expect(TokenKind::Colon)?;
            let direction = self.expect_direction()?;
            let domain = self.expect(TokenKind::Ident)?;
            self.expect(TokenKind::End)?;

            if self.program.domain_by_name(&domain.text).is_none() {
                return Err(CompileError::semantic(
                    format!("Domain '{}' not declared", domain.text),
                    &domain,
                ));
            }
            for name in &names {
                self.program
                    .add_variable(&name.text, direction, &domain.text)
                    .map_err(|e| e.or_token(name))?;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_rules(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Rules)?;
        self.expect(TokenKind::LBrace)?;
        while self.check(TokenKind::If) {
            self.parse_rule()?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_rule(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::If)?;
        let antecedent = self.parse_expr()?;
        self.expect(TokenKind::Then)?;

        let mut consequents = vec![self.parse_consequent()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            consequents.push(self.parse_consequent()?);
        }
        self.expect(TokenKind::End)?;

        self.program.add_rule(Rule {
            antecedent,
            consequents,
        });
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        let mut root = self.parse_disjunct()?;
        while self.check(TokenKind::Or) {
            self.advance();
            let rhs = self.parse_disjunct()?;
            root = Expr::or(root, rhs);
        }
        Ok(root)
    }

    fn parse_disjunct(&mut self) -> Result<Expr, CompileError> {
        let mut root = self.parse_conjunct()?;
        while self.check(TokenKind::And) {
            self.advance();
            let rhs = self.parse_conjunct()?;
            root = Expr::and(root, rhs);
        }
        Ok(root)
    }

    fn parse_conjunct(&mut self) -> Result<Expr, CompileError> {
        if self.check(TokenKind::LParen) {
            self.advance();
            let expr = self.parse_expr()?;
            self.expect(TokenKind::RParen)?;
            Ok(expr)
        } else {
            self.parse_term()
        }
    }

    /// `var is [not] [hedge] category`
    fn parse_term(&mut self) -> Result<Expr, CompileError> {
        let variable = self.expect(TokenKind::Ident)?;
        let domain = self.resolve_variable(&variable)?;
        self.expect(TokenKind::Is)?;

        let negated = self.check(TokenKind::Not);
        if negated {
            self.advance();
        }

        let word = self.expect(TokenKind::Ident)?;

        // A hedge word only acts as a hedge when a category of this domain
        // follows it; otherwise it is read as the category itself and the
        // token after it goes back on the stream.
        let (hedge, category) = match Hedge::from_word(&word.text) {
            Some(hedge) => {
                let next = self.advance();
                let categories = self.program.domain(domain);
                if next.kind == TokenKind::Ident && categories.contains(&next.text) {
                    (Some(hedge), next)
                } else if next.kind == TokenKind::Ident && !categories.contains(&word.text) {
                    return Err(self.unknown_category(domain, &variable, &next));
                } else {
                    self.stream.push_back(next);
                    (None, word)
                }
            }
            None => (None, word),
        };

        let term = Term {
            variable: variable.text.clone(),
            category: self.resolve_category(domain, &variable, &category)?,
        };
        let expr = match hedge {
            Some(hedge) => Expr::HedgedTerm(term, hedge),
            None => Expr::Term(term),
        };
        Ok(if negated { Expr::not(expr) } else { expr })
    }

    fn parse_consequent(&mut self) -> Result<Consequent, CompileError> {
        let variable = self.expect(TokenKind::Ident)?;
        let domain = self.resolve_variable(&variable)?;
        self.expect(TokenKind::Assign)?;
        let category = self.expect(TokenKind::Ident)?;
        Ok(Consequent {
            variable: variable.text.clone(),
            category: self.resolve_category(domain, &variable, &category)?,
        })
    }

    fn resolve_variable(&self, variable: &Token) -> Result<DomainId, CompileError> {
        self.program
            .variable(&variable.text)
            .map(|v| v.domain)
            .ok_or_else(|| {
                CompileError::semantic(
                    format!("Variable '{}' is undefined", variable.text),
                    variable,
                )
            })
    }

    fn resolve_category(
        &self,
        domain: DomainId,
        variable: &Token,
        category: &Token,
    ) -> Result<CategoryRef, CompileError> {
        match self.program.domain(domain).category(&category.text) {
            Some(c) => Ok(CategoryRef {
                domain,
                index: c.index,
            }),
            None => Err(self.unknown_category(domain, variable, category)),
        }
    }

    fn unknown_category(&self, domain: DomainId, variable: &Token, category: &Token) -> CompileError {
        CompileError::semantic(
            format!(
                "Category '{}' not in domain '{}' of variable '{}'",
                category.text,
                self.program.domain(domain).name,
                variable.text
            ),
            category,
        )
    }

    // --- Utility methods ---

    fn lookahead(&self) -> &Token {
        self.stream.peek().unwrap_or(&self.eof)
    }

    fn advance(&mut self) -> Token {
        self.stream.next().unwrap_or_else(|| self.eof.clone())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.lookahead().kind == kind
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.lookahead();
            Err(CompileError::syntax(
                format!("expected {kind}, found {}", found(token)),
                token,
            ))
        }
    }

    fn expect_number(&mut self) -> Result<Number, CompileError> {
        let token = self.expect(TokenKind::Number)?;
        Ok(Number::from_literal(&token.text))
    }

    fn expect_direction(&mut self) -> Result<Direction, CompileError> {
        match Direction::from_word(&self.lookahead().text) {
            Some(direction) if self.check(TokenKind::Direction) => {
                self.advance();
                Ok(direction)
            }
            _ => {
                let token = self.lookahead();
                Err(CompileError::syntax(
                    format!("expected 'in' or 'out', found {}", found(token)),
                    token,
                ))
            }
        }
    }
}

fn found(token: &Token) -> String {
    match token.kind {
        TokenKind::Ident | TokenKind::Number | TokenKind::Direction => {
            format!("{} '{}'", token.kind, token.text)
        }
        kind => kind.to_string(),
    }
}
