//! Linguistic hedges (`very`, `somewhat`, ...) applied to membership tests.

/// A hedge modifier on a term, e.g. `speed is very fast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hedge {
    ALittle,
    Slightly,
    Very,
    Extremely,
    VeryVery,
    Somewhat,
    Indeed,
}

/// Source spelling and runtime enumerator for every hedge.
pub const HEDGES: [(&str, &str, Hedge); 7] = [
    ("aLittle", "A_LITTLE", Hedge::ALittle),
    ("slightly", "SLIGHTLY", Hedge::Slightly),
    ("very", "VERY", Hedge::Very),
    ("extremely", "EXTREMELY", Hedge::Extremely),
    ("veryVery", "VERY_VERY", Hedge::VeryVery),
    ("somewhat", "SOMEWHAT", Hedge::Somewhat),
    ("indeed", "INDEED", Hedge::Indeed),
];

impl Hedge {
    /// Parse a hedge from its source spelling.
    pub fn from_word(word: &str) -> Option<Hedge> {
        HEDGES
            .iter()
            .find(|(spelling, _, _)| *spelling == word)
            .map(|(_, _, hedge)| *hedge)
    }

    fn entry(self) -> &'static (&'static str, &'static str, Hedge) {
        // Every variant has exactly one row in HEDGES.
        &HEDGES[self as usize]
    }

    pub fn word(self) -> &'static str {
        self.entry().0
    }

    /// The `FuzzyVariable::Hedge` enumerator name in the runtime.
    pub fn runtime_name(self) -> &'static str {
        self.entry().1
    }
}
