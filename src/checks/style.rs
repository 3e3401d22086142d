//! Style check over raw source lines.
//!
//! Text-level rules in the PEP 8 spirit: line length, trailing whitespace,
//! operator spacing, mixed indentation, and statement separators. Findings
//! are per line; one line can yield several.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parse::ParsedSource;

use super::{Category, Finding, Severity};

const MAX_LINE_LENGTH: usize = 100;

/// Operators whose embedded '=' must not trip the assignment-spacing rule.
const COMPOUND_OPS: &[&str] = &[
    "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "//=", "%=", "**=", ":=",
];

static ASSIGN_NO_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w=[^=\s]|[^=\s]=\w").unwrap());
static BINARY_NO_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w([+\-*/%<>])\w").unwrap());

pub fn check(parsed: &ParsedSource) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    for (i, line) in parsed.text().lines().enumerate() {
        let lineno = i + 1;
        let stripped = line.trim_start();
        let is_comment = stripped.starts_with('#');

        let width = line.chars().count();
        if width > MAX_LINE_LENGTH {
            findings.push(Finding::new(
                Category::Style,
                Severity::Low,
                format!("Line exceeds {} characters ({})", MAX_LINE_LENGTH, width),
                lineno,
            ));
        }

        if line.ends_with(' ') || line.ends_with('\t') {
            findings.push(Finding::new(
                Category::Style,
                Severity::Low,
                "Trailing whitespace",
                lineno,
            ));
        }

        let indent = &line[..line.len() - stripped.len()];
        if indent.contains(' ') && indent.contains('\t') {
            findings.push(Finding::new(
                Category::Style,
                Severity::Medium,
                "Indentation mixes tabs and spaces",
                lineno,
            ));
        }

        if is_comment {
            continue;
        }

        if line.contains(';') {
            findings.push(Finding::new(
                Category::Style,
                Severity::Low,
                "Multiple statements on one line; split at ';'",
                lineno,
            ));
        }

        if line.contains('=')
            && !COMPOUND_OPS.iter().any(|op| line.contains(op))
            && ASSIGN_NO_SPACE.is_match(line)
        {
            findings.push(Finding::new(
                Category::Style,
                Severity::Low,
                "Missing whitespace around '='",
                lineno,
            ));
        }

        if let Some(caps) = BINARY_NO_SPACE.captures(line) {
            findings.push(Finding::new(
                Category::Style,
                Severity::Low,
                format!("Missing whitespace around '{}'", &caps[1]),
                lineno,
            ));
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn run(source: &str) -> Vec<Finding> {
        check(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_clean_source_passes() {
        let findings = run("def add(a, b):\n    return a + b\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_long_line_flagged() {
        let source = format!("x = \"{}\"\n", "a".repeat(110));
        let findings = run(&source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0].message.contains("exceeds 100"));
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn test_trailing_whitespace_flagged() {
        let findings = run("x = 1 \ny = 2\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("Trailing whitespace"));
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn test_missing_space_around_assignment() {
        let findings = run("x=1\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("'='"));
    }

    #[test]
    fn test_augmented_assignment_not_flagged_as_assignment() {
        let findings = run("x = 1\nx += 2\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_missing_space_around_plus() {
        let findings = run("def f(a, b):\n    return a+b\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("'+'"));
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn test_mixed_indentation_flagged() {
        let findings = run("def f():\n\t x = 1\n\t return x\n");
        let mixed: Vec<_> = findings
            .iter()
            .filter(|f| f.message.contains("mixes tabs"))
            .collect();
        assert_eq!(mixed.len(), 2);
        assert!(mixed.iter().all(|f| f.severity == Severity::Medium));
    }

    #[test]
    fn test_semicolon_flagged() {
        let findings = run("x = 1; y = 2\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0].message.contains("';'"));
    }

    #[test]
    fn test_comment_lines_skip_operator_rules() {
        let findings = run("# a comment with x=1; y=2 inside\nx = 1\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_multiple_issues_on_one_line() {
        let findings = run("x=1; y=2\n");
        // Semicolon plus missing assignment spacing.
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.line == 1));
    }
}
