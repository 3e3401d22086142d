//! Naming convention check.
//!
//! Functions and methods must be snake_case, classes PascalCase. Module-level
//! constants (literal-valued assignments with an uppercase letter in the name)
//! must be UPPER_SNAKE_CASE.

use once_cell::sync::Lazy;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

use crate::parse::{self, line_of, ParsedSource};

use super::{Category, Finding, Severity};

const DECLARATION_QUERY: &str = r#"
(function_definition name: (identifier) @func_name)
(class_definition name: (identifier) @class_name)
"#;

static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_*[a-z][a-z0-9_]*$").unwrap());
static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());
static UPPER_SNAKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

pub fn check(parsed: &ParsedSource) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    let query = Query::new(&parse::language(), DECLARATION_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.tree.root_node(), parsed.source_bytes());

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let name = parsed.node_text(capture.node);
            let line = line_of(capture.node);
            match query.capture_names()[capture.index as usize] {
                "func_name" => {
                    // Dunder names like __init__ follow their own convention.
                    if !name.starts_with("__") && !SNAKE_CASE.is_match(name) {
                        findings.push(Finding::new(
                            Category::Naming,
                            Severity::Medium,
                            format!("Function '{}' should use snake_case naming", name),
                            line,
                        ));
                    }
                }
                "class_name" => {
                    if !PASCAL_CASE.is_match(name) {
                        findings.push(Finding::new(
                            Category::Naming,
                            Severity::Medium,
                            format!("Class '{}' should use PascalCase naming", name),
                            line,
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    check_constants(parsed, &mut findings);
    Ok(findings)
}

/// Flag module-level constant-like assignments that are not UPPER_SNAKE_CASE.
///
/// An assignment counts as constant-like when the target is a bare identifier
/// with at least one uppercase letter and the value is a literal. Plain
/// lowercase names are ordinary variables and are left alone.
fn check_constants(parsed: &ParsedSource, findings: &mut Vec<Finding>) {
    let root = parsed.tree.root_node();
    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        if stmt.kind() != "expression_statement" {
            continue;
        }
        let Some(assign) = stmt.named_child(0).filter(|n| n.kind() == "assignment") else {
            continue;
        };
        let Some(target) = assign.child_by_field_name("left") else {
            continue;
        };
        if target.kind() != "identifier" {
            continue;
        }
        let Some(value) = assign.child_by_field_name("right") else {
            continue;
        };
        if !is_literal(value.kind()) {
            continue;
        }

        let name = parsed.node_text(target);
        if name.chars().any(|c| c.is_ascii_uppercase()) && !UPPER_SNAKE.is_match(name) {
            findings.push(Finding::new(
                Category::Naming,
                Severity::Low,
                format!("Constant '{}' should use UPPER_SNAKE_CASE naming", name),
                line_of(target),
            ));
        }
    }
}

fn is_literal(kind: &str) -> bool {
    matches!(
        kind,
        "integer" | "float" | "string" | "concatenated_string" | "true" | "false" | "none" | "tuple"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn run(source: &str) -> Vec<Finding> {
        check(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_conforming_names_pass() {
        let findings = run("def snake_case_name():\n    pass\n\nclass GoodClass:\n    pass\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_camel_case_function_flagged() {
        let findings = run("def getValue():\n    return 1\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Naming);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].message.contains("getValue"));
        assert!(findings[0].message.contains("snake_case"));
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn test_lowercase_class_flagged() {
        let findings = run("class my_class:\n    pass\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("PascalCase"));
    }

    #[test]
    fn test_dunder_names_exempt() {
        let findings = run("class Widget:\n    def __init__(self):\n        pass\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_mixed_case_constant_flagged() {
        let findings = run("MaxRetries = 5\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0].message.contains("UPPER_SNAKE_CASE"));
    }

    #[test]
    fn test_proper_constant_and_variable_pass() {
        let findings = run("MAX_RETRIES = 5\ntimeout = 30\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_method_names_checked() {
        let findings = run("class Widget:\n    def DoWork(self):\n        pass\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("DoWork"));
        assert_eq!(findings[0].line, 2);
    }
}
