//! Declaration artifact: one class per domain, extern variables, and the
//! engine entry point.

use std::fmt::{self, Write};

use super::{declaration, CodegenOptions};
use crate::dsl::ast::Program;

/// Emit the declaration artifact. Domains are sorted by name, variables keep
/// declaration order.
pub fn generate_header<W: Write>(
    program: &Program,
    options: &CodegenOptions,
    out: &mut W,
) -> fmt::Result {
    write!(out, "#include <{}>\n\n", options.runtime_header)?;

    for domain in program.domains_by_name() {
        write!(
            out,
            "\nclass {} : public FuzzyVariable\n{{\npublic:\n",
            domain.name
        )?;
        for category in domain.categories() {
            writeln!(
                out,
                "    static const int {} = {};",
                category.constant(),
                category.index
            )?;
        }
        out.write_str(
            "\n    int minRange() const;\
             \n    int maxRange() const;\
             \n    float membership(int crispValue, int category) const;\
             \n};\n\n",
        )?;
    }

    for variable in program.variables() {
        writeln!(out, "extern {};", declaration(program, variable))?;
    }

    out.write_str("\nvoid runFuzzyEngine();\n")
}
