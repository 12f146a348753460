//! Compile a `.fzy` rule file into `BASE.h` and `BASE.cpp`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use fuzzygen::config::Config;
use fuzzygen::logging;
use fuzzygen::output::translate_file;

/// Translate a fuzzy rule specification into a C++ inference engine.
#[derive(Parser, Debug)]
#[command(name = "fuzzygen", version, about, long_about = None)]
struct Args {
    /// Fuzzy rule source file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Root filename for .h and .cpp output files
    #[arg(short, long, value_name = "BASE_PATH")]
    output: Option<PathBuf>,

    /// Configuration file (default: ~/.fuzzygen/config.yaml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                error!("cannot load config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Config::load().unwrap_or_default(),
    };
    debug!(?config, "configuration");

    let base = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output_base));

    match translate_file(&args.source, &base, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
