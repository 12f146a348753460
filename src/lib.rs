//! Translates fuzzy rule specifications into a C++ inference engine.

pub mod config;
pub mod dsl;
pub mod logging;
pub mod output;
