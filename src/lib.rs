//! Pyreview - static Python code analyzer.
//!
//! Pyreview parses a Python snippet into a syntax tree and runs a fixed,
//! ordered battery of rule checks, producing prioritized, line-addressable
//! suggestions plus a severity-bucketed summary.
//!
//! # Architecture
//!
//! - `parse`: tree-sitter parser adapter; reports syntax faults with a line
//! - `checks`: the five rule checks (naming, complexity, best practices,
//!   performance, style) and the static ordered table that runs them
//! - `analyzer`: the facade - `analyze` never fails for text input; a parse
//!   fault becomes a single high-severity finding
//! - `report`: output formatting (pretty text, flat JSON record)
//! - `cli`: thin command-line wrapper around the facade
//!
//! Every call is a pure function of its input string: no state is retained
//! across invocations, and concurrent calls need no coordination.
//!
//! # Example
//!
//! ```
//! let result = pyreview::analyze("def f(x=[]):\n    x.append(1)\n");
//! assert!(result.findings.iter().any(|f| f.severity == pyreview::Severity::High));
//! ```

pub mod analyzer;
pub mod checks;
pub mod cli;
pub mod parse;
pub mod report;

pub use analyzer::{analyze, analyze_bytes, AnalysisResult, AnalyzeError};
pub use checks::{Category, Finding, Severity};
pub use parse::{ParsedSource, SyntaxFault};
