//! Translator configuration, loaded from ~/.fuzzygen/config.yaml.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dsl::{CodegenOptions, TranslateOptions};

/// Translator settings. Every field may be omitted from the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base path for the generated files when `--output` is not given.
    #[serde(default = "default_output_base")]
    pub output_base: String,
    /// Runtime header included by the generated header.
    #[serde(default = "default_runtime_header")]
    pub runtime_header: String,
    /// Expected parameter count per curve function, e.g. `tri: 3`.
    #[serde(default)]
    pub curve_arity: BTreeMap<String, usize>,
}

fn default_output_base() -> String {
    "fuzzy_engine".to_string()
}

fn default_runtime_header() -> String {
    "fuzzy.h".to_string()
}

impl Config {
    /// The standard config location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fuzzygen").join("config.yaml"))
    }

    /// Load config from the standard path.
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load() -> Option<Self> {
        let path = Self::default_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load config from an explicit path, reporting why it failed.
    pub fn load_from(path: &Path) -> Result<Self, io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Translation settings for a header that will be written as `header_name`.
    pub fn translate_options(&self, header_name: impl Into<String>) -> TranslateOptions {
        TranslateOptions {
            codegen: CodegenOptions {
                runtime_header: self.runtime_header.clone(),
                header_name: header_name.into(),
            },
            curve_arity: self.curve_arity.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_base: default_output_base(),
            runtime_header: default_runtime_header(),
            curve_arity: BTreeMap::new(),
        }
    }
}
