//! Artifact files: naming and writing the generated header and body.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::dsl::{Artifacts, CompileError, Compiler};

pub const HEADER_EXTENSION: &str = "h";
pub const BODY_EXTENSION: &str = "cpp";

/// Where the two artifacts for one base path go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub body: PathBuf,
}

impl OutputPaths {
    /// `BASE.h` and `BASE.cpp`. The extension is appended, never substituted,
    /// so `build/engine.v2` yields `build/engine.v2.h`.
    pub fn from_base(base: &Path) -> Self {
        Self {
            header: with_suffix(base, HEADER_EXTENSION),
            body: with_suffix(base, BODY_EXTENSION),
        }
    }

    /// File name the body uses to include the header.
    pub fn header_name(&self) -> String {
        self.header
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_os_string();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Write both artifacts, creating parent directories as needed.
///
/// Each file is first written next to its target and only renamed into place
/// once both writes succeeded. Each rename is atomic but the pair is not: if
/// the body rename fails, the new header stays in place next to the old body.
/// Staged files are removed on every failure path.
pub fn write_artifacts(paths: &OutputPaths, artifacts: &Artifacts) -> Result<(), io::Error> {
    let staged = [
        (&paths.header, &artifacts.header),
        (&paths.body, &artifacts.body),
    ];

    for (path, _) in &staged {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut written = Vec::with_capacity(staged.len());
    for (path, text) in &staged {
        let temp = with_suffix(path, "tmp");
        if let Err(err) = std::fs::write(&temp, text.as_bytes()) {
            discard(&written);
            let _ = std::fs::remove_file(&temp);
            return Err(err);
        }
        written.push(temp);
    }

    for (i, ((path, text), temp)) in staged.iter().zip(&written).enumerate() {
        if let Err(err) = std::fs::rename(temp, path) {
            discard(&written[i..]);
            return Err(err);
        }
        info!(path = %path.display(), bytes = text.len(), "wrote artifact");
    }
    Ok(())
}

fn discard(staged: &[PathBuf]) {
    for temp in staged {
        if let Err(err) = std::fs::remove_file(temp) {
            debug!(path = %temp.display(), "cannot remove staged file: {err}");
        }
    }
}

/// Failure while translating a file on disk.
#[derive(Debug)]
pub enum TranslateError {
    Read(PathBuf, io::Error),
    Compile(CompileError),
    Write(io::Error),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::Read(path, e) => write!(f, "cannot read {}: {e}", path.display()),
            TranslateError::Compile(e) => write!(f, "{e}"),
            TranslateError::Write(e) => write!(f, "cannot write output: {e}"),
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::Read(_, e) | TranslateError::Write(e) => Some(e),
            TranslateError::Compile(e) => Some(e),
        }
    }
}

impl From<CompileError> for TranslateError {
    fn from(e: CompileError) -> Self {
        TranslateError::Compile(e)
    }
}

/// Read `source`, translate it, and write both artifacts for `base`.
/// Nothing is written if translation fails.
pub fn translate_file(
    source: &Path,
    base: &Path,
    config: &Config,
) -> Result<OutputPaths, TranslateError> {
    let text = std::fs::read_to_string(source)
        .map_err(|e| TranslateError::Read(source.to_path_buf(), e))?;
    debug!(path = %source.display(), bytes = text.len(), "read source");

    let paths = OutputPaths::from_base(base);
    let options = config.translate_options(paths.header_name());
    let artifacts = Compiler::translate(&text, &options)?;
    write_artifacts(&paths, &artifacts).map_err(TranslateError::Write)?;
    Ok(paths)
}
