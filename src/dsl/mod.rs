//! Fuzzy rule translator: source text → tokens → AST → C++ header and body.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod hedge;
pub mod lexer;
pub mod parser;
pub mod token;

use std::collections::BTreeMap;

use tracing::debug;

pub use ast::*;
pub use codegen::{generate_body, generate_header, CodegenOptions, FnSink};
pub use error::CompileError;
pub use hedge::Hedge;

use lexer::Lexer;
use parser::Parser;

/// Settings applied while translating one source file.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub codegen: CodegenOptions,
    /// Expected parameter count per curve function name.
    pub curve_arity: BTreeMap<String, usize>,
}

/// Both generated artifacts, complete and in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub header: String,
    pub body: String,
}

/// The rule translator.
///
/// Parses source text through lexer → parser → AST, then generates both
/// artifacts. Nothing is produced unless every stage succeeds.
pub struct Compiler;

impl Compiler {
    /// Parse source into a validated Program.
    pub fn parse(source: &str) -> Result<Program, CompileError> {
        Self::parse_with(source, &BTreeMap::new())
    }

    /// Parse source, checking curve parameter counts against `curve_arity`.
    pub fn parse_with(
        source: &str,
        curve_arity: &BTreeMap<String, usize>,
    ) -> Result<Program, CompileError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Parser::new(tokens)
            .with_curve_arity(curve_arity.clone())
            .parse()
    }

    /// Parse source and generate the header and body text.
    pub fn translate(source: &str, options: &TranslateOptions) -> Result<Artifacts, CompileError> {
        let program = Self::parse_with(source, &options.curve_arity)?;
        let artifacts = Self::generate(&program, &options.codegen)?;
        debug!(
            header_bytes = artifacts.header.len(),
            body_bytes = artifacts.body.len(),
            "generated artifacts"
        );
        Ok(artifacts)
    }

    /// Generate both artifacts for an already parsed program.
    pub fn generate(program: &Program, options: &CodegenOptions) -> Result<Artifacts, CompileError> {
        let mut header = String::new();
        generate_header(program, options, &mut header)?;
        let mut body = String::new();
        generate_body(program, options, &mut body)?;
        Ok(Artifacts { header, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::error::ErrorKind;

    #[test]
    fn translate_produces_both_artifacts() {
        let artifacts = Compiler::translate(
            "domain D from 0 to 1 { a = f(1); } vars { x : in D; y : out D; } \
             rules { if x is a then y := a; }",
            &TranslateOptions::default(),
        )
        .unwrap();
        assert!(artifacts.header.contains("class D : public FuzzyVariable"));
        assert!(artifacts.body.contains("y.addMembership(D::A, m);"));
    }

    #[test]
    fn translate_stops_at_first_error() {
        let err = Compiler::translate("domain D from 0 to 1 { a = f(1) }", &TranslateOptions::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert_eq!(err.message, "expected ';', found '}'");
    }

    #[test]
    fn translate_applies_curve_arity() {
        let options = TranslateOptions {
            curve_arity: BTreeMap::from([("f".to_string(), 2)]),
            ..TranslateOptions::default()
        };
        assert!(Compiler::translate("domain D from 0 to 1 { a = f(1); }", &options).is_err());
        assert!(Compiler::translate("domain D from 0 to 1 { a = f(1, 2); }", &options).is_ok());
    }

    #[test]
    fn generate_is_idempotent() {
        let program = Compiler::parse(
            "domain B from 0 to 1 { a = f(1); } domain A from 0 to 9 { z = g(1), h(2); y = g(3); }\n\
             vars { p, q : in A; r : out B; }\n\
             rules { if p is very z or q is y then r := a; }",
        )
        .unwrap();
        let options = CodegenOptions::default();
        let first = Compiler::generate(&program, &options).unwrap();
        let second = Compiler::generate(&program, &options).unwrap();
        assert_eq!(first, second);
    }
}
