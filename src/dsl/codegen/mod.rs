//! C++ code generation: turns a parsed [`Program`] into a declaration
//! artifact (header) and a definition artifact (body) targeting the `fuzzy.h`
//! runtime.
//!
//! Both generators write through [`std::fmt::Write`], so callers can collect
//! into a `String`, wrap a callback in [`FnSink`], or adapt any other sink.

mod body;
mod header;

use std::fmt;

pub use body::generate_body;
pub use header::generate_header;

use super::ast::*;

/// Names the generated artifacts refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Runtime header included by the declaration artifact.
    pub runtime_header: String,
    /// File name of the declaration artifact, included by the body.
    pub header_name: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            runtime_header: "fuzzy.h".to_string(),
            header_name: "fuzzy_engine.h".to_string(),
        }
    }
}

/// Adapts a `FnMut(&str)` callback into a [`fmt::Write`] sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str)> fmt::Write for FnSink<F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(s);
        Ok(())
    }
}

/// `Domain::CONSTANT` for a category reference.
fn qualified(program: &Program, category: CategoryRef) -> String {
    format!(
        "{}::{}",
        program.domain(category.domain).name,
        program.category(category).constant()
    )
}

/// `Wrapper<Domain> name`, shared by the extern and storage declarations.
fn declaration(program: &Program, variable: &Variable) -> String {
    format!(
        "{}<{}> {}",
        variable.direction.wrapper(),
        program.domain(variable.domain).name,
        variable.name
    )
}

/// Translate an antecedent into a C++ expression evaluating its truth value.
pub fn translate_expr(program: &Program, expr: &Expr) -> String {
    match expr {
        Expr::Logical(logical) => match logical {
            Logical::And(lhs, rhs) | Logical::Or(lhs, rhs) => format!(
                "FuzzyLogic::f_{}({}, {})",
                logical.op(),
                translate_expr(program, lhs),
                translate_expr(program, rhs)
            ),
            Logical::Not(operand) => format!(
                "FuzzyLogic::f_{}({})",
                logical.op(),
                translate_expr(program, operand)
            ),
        },
        Expr::Term(term) => format!(
            "{}.is({})",
            term.variable,
            qualified(program, term.category)
        ),
        Expr::HedgedTerm(term, hedge) => format!(
            "{}.is(FuzzyVariable::{},{})",
            term.variable,
            hedge.runtime_name(),
            qualified(program, term.category)
        ),
    }
}

/// Translate a consequent into the statement storing `m` into its variable.
pub fn translate_consequent(program: &Program, consequent: &Consequent) -> String {
    format!(
        "{}.addMembership({}, m);",
        consequent.variable,
        qualified(program, consequent.category)
    )
}
