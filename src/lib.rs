//! Cableway inspection report generator
//!
//! Form snapshot + photos → paginated PDF. The layout itself lives in
//! `cableway-common`; this crate adds rendering, file output and the CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form_entry;
pub mod scanner;

pub use cableway_common::{FormSnapshot, ImageList};
pub use error::{ReportError, Result};
pub use export::{generate_report, generate_report_with, GeneratedReport};

/// Install the tracing subscriber used by the binaries.
/// `RUST_LOG` wins; otherwise `info`, or `debug` when `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "cableway_report=debug,cableway_common=debug"
    } else {
        "cableway_report=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
