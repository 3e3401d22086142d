//! Core types for analysis findings.

use serde::{Deserialize, Serialize};

/// Severity buckets for findings, ordered: low is advisory, high is must-fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Closed set of finding categories. One category per finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "naming")]
    Naming,
    #[serde(rename = "complexity")]
    Complexity,
    #[serde(rename = "best_practice")]
    BestPractice,
    #[serde(rename = "performance")]
    Performance,
    #[serde(rename = "style")]
    Style,
    #[serde(rename = "syntax_error")]
    SyntaxError,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Naming => "naming",
            Category::Complexity => "complexity",
            Category::BestPractice => "best_practice",
            Category::Performance => "performance",
            Category::Style => "style",
            Category::SyntaxError => "syntax_error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "naming" => Some(Category::Naming),
            "complexity" => Some(Category::Complexity),
            "best_practice" => Some(Category::BestPractice),
            "performance" => Some(Category::Performance),
            "style" => Some(Category::Style),
            "syntax_error" => Some(Category::SyntaxError),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single reported issue.
///
/// `line` is 1-based; 0 means the finding is not line-addressable
/// (for example a whole-snippet issue). Messages are self-contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
}

impl Finding {
    pub fn new(category: Category, severity: Severity, message: impl Into<String>, line: usize) -> Self {
        Self {
            category,
            severity,
            message: message.into(),
            line,
        }
    }
}
