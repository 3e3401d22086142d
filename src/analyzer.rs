//! Analyzer facade: parse, run the checks, aggregate the result.
//!
//! [`analyze`] never fails for text input. A snippet that does not parse is
//! converted into a single high-severity syntax finding rather than an error,
//! so callers always get findings back. The only outward failure is
//! [`analyze_bytes`] rejecting input that is not valid UTF-8.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::checks::{self, Category, Finding, Severity};
use crate::parse;

/// The one failure `analyze_bytes` can surface.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("input is not valid UTF-8 text: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

/// The aggregate produced by one analyzer invocation. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// The original input, echoed back untouched.
    pub source: String,
    /// Findings grouped by category in check order, ascending line within.
    pub findings: Vec<Finding>,
    /// Severity-bucketed summary; never empty.
    pub summary: String,
    /// Stamped once at construction.
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Number of findings in one severity bucket.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Whether any finding is must-fix.
    pub fn has_high_severity(&self) -> bool {
        self.count(Severity::High) > 0
    }
}

/// Analyze one Python snippet. Always returns a result.
pub fn analyze(source: &str) -> AnalysisResult {
    let findings = match parse::parse(source) {
        Ok(parsed) => checks::run_all(&parsed),
        Err(fault) => vec![Finding::new(
            Category::SyntaxError,
            Severity::High,
            fault.message,
            fault.line,
        )],
    };

    let summary = summarize(&findings);
    AnalysisResult {
        source: source.to_string(),
        findings,
        summary,
        timestamp: Utc::now(),
    }
}

/// Analyze raw bytes, rejecting non-text input up front.
pub fn analyze_bytes(source: &[u8]) -> Result<AnalysisResult, AnalyzeError> {
    let text = std::str::from_utf8(source)?;
    Ok(analyze(text))
}

/// Render the severity-bucketed summary. Zero buckets are omitted; an empty
/// finding list reads "No issues found", never an empty string.
fn summarize(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No issues found".to_string();
    }

    let buckets = [
        (Severity::High, "high"),
        (Severity::Medium, "medium"),
        (Severity::Low, "low"),
    ];
    let parts: Vec<String> = buckets
        .iter()
        .filter_map(|(severity, label)| {
            let n = findings.iter().filter(|f| f.severity == *severity).count();
            (n > 0).then(|| format!("{} {}", n, label))
        })
        .collect();

    format!(
        "Found {} suggestion(s): {} priority",
        findings.len(),
        parts.join(", ")
    )
}
