//! Definition artifact: variable storage, per-domain membership functions,
//! and the rule evaluation loop.

use std::fmt::{self, Write};

use super::{declaration, translate_consequent, translate_expr, CodegenOptions};
use crate::dsl::ast::{Direction, Domain, Program};

/// Emit the definition artifact.
pub fn generate_body<W: Write>(
    program: &Program,
    options: &CodegenOptions,
    out: &mut W,
) -> fmt::Result {
    write!(out, "#include \"{}\"\n\n", options.header_name)?;

    for variable in program.variables() {
        writeln!(out, "{};", declaration(program, variable))?;
    }

    for domain in program.domains_by_name() {
        write_domain(domain, out)?;
    }

    write_engine(program, out)
}

fn write_domain<W: Write>(domain: &Domain, out: &mut W) -> fmt::Result {
    write!(
        out,
        "\n/*\n * DOMAIN {name}\n */\n\
         int {name}::minRange() const {{ return {min}; }}\n\n\
         int {name}::maxRange() const {{ return {max}; }}\n\n\
         float {name}::membership(int crispValue, int category) const\n\
         {{\n    float m = 0;\n",
        name = domain.name,
        min = domain.min,
        max = domain.max,
    )?;

    // Curves of other categories are guarded out, so `m` ends up as the max
    // over the queried category's curves only.
    for category in domain.categories() {
        for curve in &category.curves {
            let params: Vec<&str> = curve.params.iter().map(|p| p.0.as_str()).collect();
            writeln!(
                out,
                "    m = fmax(m, category=={} ? {}(crispValue, {}) : 0);",
                category.constant(),
                curve.function,
                params.join(", ")
            )?;
        }
    }

    out.write_str("    return m;\n}\n")
}

fn write_engine<W: Write>(program: &Program, out: &mut W) -> fmt::Result {
    out.write_str("\nvoid runFuzzyEngine()\n{\n    float m;\n\n")?;

    let mut reset_any = false;
    for variable in program
        .variables()
        .filter(|v| v.direction == Direction::Output)
    {
        writeln!(out, "    {}.reset();", variable.name)?;
        reset_any = true;
    }
    if reset_any {
        out.write_str("\n")?;
    }

    for rule in program.rules() {
        writeln!(out, "    m = {};", translate_expr(program, &rule.antecedent))?;
        for consequent in &rule.consequents {
            writeln!(out, "    {}", translate_consequent(program, consequent))?;
        }
    }

    out.write_str("}\n")
}
