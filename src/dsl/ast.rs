//! Abstract Syntax Tree and symbol tables for the fuzzy rule language.
//!
//! Domains live in an arena owned by [`Program`] and are referenced by
//! [`DomainId`]; categories are referenced by their index inside the owning
//! domain. Nothing in the tree holds a pointer into another node.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;

use super::error::CompileError;
use super::hedge::Hedge;

/// A complete translated program. Read-only once parsing finishes.
#[derive(Debug, Clone, Default)]
pub struct Program {
    domains: Vec<Domain>,
    domain_names: BTreeMap<String, DomainId>,
    variables: IndexMap<String, Variable>,
    rules: Vec<Rule>,
}

/// Stable index of a domain in its [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainId(pub usize);

/// A numeric literal, kept exactly as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(pub String);

impl Number {
    /// Build from a lexed literal. Leading zeros of the integer part are
    /// dropped, since C++ reads `010` as octal; the rest is kept as written.
    pub fn from_literal(text: &str) -> Self {
        let (int, rest) = text.split_at(text.find('.').unwrap_or(text.len()));
        let int = match int.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        Number(format!("{int}{rest}"))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named numeric range partitioned into categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub min: Number,
    pub max: Number,
    categories: IndexMap<String, Category>,
}

/// A fuzzy set within a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub index: usize,
    pub curves: Vec<Curve>,
}

/// A membership curve: runtime function name plus its literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub function: String,
    pub params: Vec<Number>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub direction: Direction,
    pub domain: DomainId,
}

/// Points at one category of one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRef {
    pub domain: DomainId,
    pub index: usize,
}

/// A rule antecedent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Logical(Logical),
    Term(Term),
    HedgedTerm(Term, Hedge),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Logical {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

/// `variable is category`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub variable: String,
    pub category: CategoryRef,
}

/// `variable := category`
#[derive(Debug, Clone, PartialEq)]
pub struct Consequent {
    pub variable: String,
    pub category: CategoryRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Expr,
    pub consequents: Vec<Consequent>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty domain.
    pub fn add_domain(
        &mut self,
        name: &str,
        min: Number,
        max: Number,
    ) -> Result<DomainId, CompileError> {
        if self.domain_names.contains_key(name) {
            return Err(CompileError::unlocated(format!(
                "Domain '{name}' already declared"
            )));
        }
        let id = DomainId(self.domains.len());
        self.domains.push(Domain::new(name, min, max));
        self.domain_names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Declare a variable over an already-declared domain.
    pub fn add_variable(
        &mut self,
        name: &str,
        direction: Direction,
        domain_name: &str,
    ) -> Result<(), CompileError> {
        let Some(&domain) = self.domain_names.get(domain_name) else {
            return Err(CompileError::unlocated(format!(
                "Domain '{domain_name}' not declared"
            )));
        };
        if self.variables.contains_key(name) {
            return Err(CompileError::unlocated(format!(
                "Variable '{name}' already declared"
            )));
        }
        self.variables.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                direction,
                domain,
            },
        );
        Ok(())
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn domain(&self, id: DomainId) -> &Domain {
        &self.domains[id.0]
    }

    pub(crate) fn domain_mut(&mut self, id: DomainId) -> &mut Domain {
        &mut self.domains[id.0]
    }

    pub fn domain_by_name(&self, name: &str) -> Option<&Domain> {
        self.domain_names.get(name).map(|id| self.domain(*id))
    }

    /// Domains ordered by name.
    pub fn domains_by_name(&self) -> impl Iterator<Item = &Domain> {
        self.domain_names.values().map(|id| self.domain(*id))
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn category(&self, category: CategoryRef) -> &Category {
        self.domain(category.domain).category_at(category.index)
    }
}

impl Domain {
    pub fn new(name: &str, min: Number, max: Number) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
            categories: IndexMap::new(),
        }
    }

    /// Append a category, assigning it the next index.
    ///
    /// Names are unique, and so are the constants they upper-case to.
    pub fn add_category(&mut self, name: &str) -> Result<usize, CompileError> {
        if self.categories.contains_key(name) {
            return Err(CompileError::unlocated(format!(
                "Category '{name}' already declared in domain '{}'",
                self.name
            )));
        }
        let constant = name.to_uppercase();
        if let Some(existing) = self.categories().find(|c| c.constant() == constant) {
            return Err(CompileError::unlocated(format!(
                "Category '{name}' clashes with '{}' as constant {constant} in domain '{}'",
                existing.name, self.name
            )));
        }
        let index = self.categories.len();
        self.categories.insert(
            name.to_string(),
            Category {
                name: name.to_string(),
                index,
                curves: Vec::new(),
            },
        );
        Ok(index)
    }

    pub(crate) fn add_curve(&mut self, index: usize, curve: Curve) {
        if let Some((_, category)) = self.categories.get_index_mut(index) {
            category.curves.push(curve);
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn category_at(&self, index: usize) -> &Category {
        &self.categories[index]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Categories in index order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }
}

impl Category {
    /// The C++ constant naming this category.
    pub fn constant(&self) -> String {
        self.name.to_uppercase()
    }
}

impl Direction {
    pub fn from_word(word: &str) -> Option<Direction> {
        match word {
            "in" => Some(Direction::Input),
            "out" => Some(Direction::Output),
            _ => None,
        }
    }

    /// Runtime template wrapping variables of this direction.
    pub fn wrapper(self) -> &'static str {
        match self {
            Direction::Input => "FuzzyInput",
            Direction::Output => "FuzzyOutput",
        }
    }
}

impl Expr {
    pub fn and(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Logical(Logical::And(Box::new(lhs), Box::new(rhs)))
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Logical(Logical::Or(Box::new(lhs), Box::new(rhs)))
    }

    pub fn not(operand: Expr) -> Expr {
        Expr::Logical(Logical::Not(Box::new(operand)))
    }
}

impl Logical {
    /// Operator name as used by the runtime's `FuzzyLogic::f_<op>`.
    pub fn op(&self) -> &'static str {
        match self {
            Logical::And(..) => "and",
            Logical::Or(..) => "or",
            Logical::Not(_) => "not",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number(s.to_string())
    }

    #[test]
    fn category_indices_follow_declaration_order() {
        let mut domain = Domain::new("Speed", num("0"), num("255"));
        assert_eq!(domain.add_category("stopped").unwrap(), 0);
        assert_eq!(domain.add_category("fast").unwrap(), 1);
        assert_eq!(domain.add_category("medium").unwrap(), 2);
        let names: Vec<_> = domain.categories().map(|c| (c.name.as_str(), c.index)).collect();
        assert_eq!(names, vec![("stopped", 0), ("fast", 1), ("medium", 2)]);
    }

    #[test]
    fn duplicate_category_rejected() {
        let mut domain = Domain::new("Speed", num("0"), num("255"));
        domain.add_category("slow").unwrap();
        let err = domain.add_category("slow").unwrap_err();
        assert!(err.message.contains("already declared"));
        assert!(err.token.is_none());
    }

    #[test]
    fn categories_sharing_a_constant_rejected() {
        let mut domain = Domain::new("D", num("0"), num("1"));
        domain.add_category("cold").unwrap();
        let err = domain.add_category("COLD").unwrap_err();
        assert_eq!(
            err.message,
            "Category 'COLD' clashes with 'cold' as constant COLD in domain 'D'"
        );
        assert!(domain.add_category("Cold").is_err());
        assert_eq!(domain.categories().count(), 1);
    }

    #[test]
    fn literal_leading_zeros_dropped() {
        let cases = [
            ("010", "10"),
            ("08", "8"),
            ("00.5", "0.5"),
            ("0", "0"),
            ("000", "0"),
            ("0.50", "0.50"),
            ("7.", "7."),
            ("100", "100"),
        ];
        for (text, expected) in cases {
            assert_eq!(Number::from_literal(text), num(expected), "{text}");
        }
    }

    #[test]
    fn duplicate_domain_rejected() {
        let mut program = Program::new();
        program.add_domain("Temp", num("0"), num("100")).unwrap();
        let err = program.add_domain("Temp", num("0"), num("1")).unwrap_err();
        assert_eq!(err.message, "Domain 'Temp' already declared");
    }

    #[test]
    fn variable_requires_declared_domain() {
        let mut program = Program::new();
        let err = program.add_variable("t", Direction::Input, "Temp").unwrap_err();
        assert_eq!(err.message, "Domain 'Temp' not declared");
    }

    #[test]
    fn duplicate_variable_rejected() {
        let mut program = Program::new();
        program.add_domain("Temp", num("0"), num("100")).unwrap();
        program.add_variable("t", Direction::Input, "Temp").unwrap();
        let err = program.add_variable("t", Direction::Output, "Temp").unwrap_err();
        assert_eq!(err.message, "Variable 't' already declared");
    }

    #[test]
    fn domains_iterate_by_name() {
        let mut program = Program::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            program.add_domain(name, num("0"), num("1")).unwrap();
        }
        let names: Vec<_> = program.domains_by_name().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
        assert_eq!(program.domain(DomainId(0)).name, "Zeta");
    }

    #[test]
    fn variables_iterate_in_declaration_order() {
        let mut program = Program::new();
        program.add_domain("D", num("0"), num("1")).unwrap();
        for name in ["z", "a", "m"] {
            program.add_variable(name, Direction::Output, "D").unwrap();
        }
        let names: Vec<_> = program.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn category_ref_resolves() {
        let mut program = Program::new();
        let id = program.add_domain("Temp", num("0"), num("100")).unwrap();
        program.domain_mut(id).add_category("cold").unwrap();
        let hot = program.domain_mut(id).add_category("hot").unwrap();
        let category = program.category(CategoryRef { domain: id, index: hot });
        assert_eq!(category.name, "hot");
        assert_eq!(category.constant(), "HOT");
    }

    #[test]
    fn logical_op_names() {
        let term = || {
            Expr::Term(Term {
                variable: "t".into(),
                category: CategoryRef {
                    domain: DomainId(0),
                    index: 0,
                },
            })
        };
        let Expr::Logical(and) = Expr::and(term(), term()) else {
            panic!("expected logical");
        };
        assert_eq!(and.op(), "and");
        let Expr::Logical(not) = Expr::not(term()) else {
            panic!("expected logical");
        };
        assert_eq!(not.op(), "not");
    }
}
