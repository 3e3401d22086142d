//! Command-line interface for pyreview.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::analyzer;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static Python code analyzer.
///
/// Pyreview parses a Python snippet and runs a fixed battery of rule checks
/// (naming, complexity, best practices, performance, style), printing
/// prioritized, line-addressed suggestions. A snippet that does not parse
/// is reported as a single high-severity syntax finding.
#[derive(Parser)]
#[command(name = "pyreview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Python file to analyze ("-" or omitted reads stdin)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    pub format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Run an analysis per the CLI arguments. Exits non-zero when any
/// must-fix finding is present.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let source = read_input(cli.file.as_deref())?;
    let result = analyzer::analyze_bytes(&source)?;

    match cli.format {
        Format::Json => report::write_json(&result)?,
        Format::Pretty => report::write_text(&result),
    }

    Ok(if result.has_high_severity() {
        EXIT_FINDINGS
    } else {
        EXIT_SUCCESS
    })
}

fn read_input(file: Option<&std::path::Path>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
