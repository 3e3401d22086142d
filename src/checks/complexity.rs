//! Structural complexity check.
//!
//! Scores each function body with an approximation of cyclomatic complexity:
//! start at 1, add 1 for every branching construct (if/elif, loops, except
//! clauses, conditional expressions, boolean and/or). Nested functions score
//! on their own; their branches do not count against the enclosing function.

use tree_sitter::Node;

use crate::parse::{line_of, visit, ParsedSource};

use super::{Category, Finding, Severity};

/// Scores above this are reported; above twice this they are must-fix.
const COMPLEXITY_THRESHOLD: i32 = 10;

/// Functions spanning more lines than this get a "too long" finding.
const MAX_FUNCTION_LINES: usize = 50;

pub fn check(parsed: &ParsedSource) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    visit(parsed.tree.root_node(), &mut |node| {
        if node.kind() != "function_definition" {
            return true;
        }

        let name = node
            .child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();
        let line = line_of(node);

        let score = score_function(node);
        if score > COMPLEXITY_THRESHOLD {
            let severity = if score > 2 * COMPLEXITY_THRESHOLD {
                Severity::High
            } else {
                Severity::Medium
            };
            findings.push(Finding::new(
                Category::Complexity,
                severity,
                format!(
                    "Function '{}' has high cyclomatic complexity ({}); consider refactoring",
                    name, score
                ),
                line,
            ));
        }

        let span_lines = node.end_position().row - node.start_position().row;
        if span_lines > MAX_FUNCTION_LINES {
            findings.push(Finding::new(
                Category::Complexity,
                Severity::Medium,
                format!(
                    "Function '{}' is too long ({} lines); consider breaking it up",
                    name, span_lines
                ),
                line,
            ));
        }

        // Descend so nested functions get their own entries.
        true
    });

    Ok(findings)
}

/// Complexity score for one function's own body.
fn score_function(func: Node) -> i32 {
    let mut score = 1;
    let Some(body) = func.child_by_field_name("body") else {
        return score;
    };
    visit(body, &mut |node| {
        match node.kind() {
            // Nested functions score separately.
            "function_definition" => return false,
            "if_statement" | "elif_clause" | "for_statement" | "while_statement"
            | "except_clause" | "conditional_expression" | "boolean_operator" => score += 1,
            _ => {}
        }
        true
    });
    score
}
