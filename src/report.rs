//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the flat record `{findings: [{type, severity, message, line}], summary}`

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;
use crate::checks::{Finding, Severity};

/// Flat serializable record of one analysis.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub findings: Vec<JsonFinding>,
    pub summary: String,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    #[serde(rename = "type")]
    pub category: String,
    pub severity: String,
    pub message: String,
    pub line: usize,
}

/// Build the flat record from a result.
pub fn to_json_report(result: &AnalysisResult) -> JsonReport {
    JsonReport {
        findings: result.findings.iter().map(finding_to_json).collect(),
        summary: result.summary.clone(),
    }
}

fn finding_to_json(f: &Finding) -> JsonFinding {
    JsonFinding {
        category: f.category.as_str().to_string(),
        severity: f.severity.to_string(),
        message: f.message.clone(),
        line: f.line,
    }
}

/// Write the result as pretty-printed JSON to stdout.
pub fn write_json(result: &AnalysisResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json_report(result))?;
    println!("{}", json);
    Ok(())
}

/// Write a colored human-readable report to stdout.
pub fn write_text(result: &AnalysisResult) {
    for finding in &result.findings {
        let severity = match finding.severity {
            Severity::High => "high".red().bold(),
            Severity::Medium => "medium".yellow(),
            Severity::Low => "low".blue(),
        };
        let location = if finding.line > 0 {
            format!("line {:>4}", finding.line)
        } else {
            "        -".to_string()
        };
        println!(
            "{}  [{}] {}: {}",
            location.dimmed(),
            severity,
            finding.category.as_str(),
            finding.message
        );
    }

    if !result.findings.is_empty() {
        println!();
    }
    println!("{}", result.summary.as_str().bold());
}
