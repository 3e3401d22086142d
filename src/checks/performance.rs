//! Performance anti-pattern check.
//!
//! Looks inside loop bodies for structurally recognizable inefficiencies:
//! piecewise concatenation with `+`/`+=`, membership tests against sequence
//! literals, and loop-invariant pattern compilation. Nested loops are scanned
//! once each, at their own level.

use tree_sitter::Node;

use crate::parse::{line_of, visit, ParsedSource};

use super::{Category, Finding, Severity};

pub fn check(parsed: &ParsedSource) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    visit(parsed.tree.root_node(), &mut |node| {
        if matches!(node.kind(), "for_statement" | "while_statement") {
            if let Some(body) = node.child_by_field_name("body") {
                scan_loop_body(parsed, body, &mut findings);
            }
        }
        true
    });

    Ok(findings)
}

fn scan_loop_body(parsed: &ParsedSource, body: Node, findings: &mut Vec<Finding>) {
    visit(body, &mut |node| {
        match node.kind() {
            // Inner loops and nested functions are scanned on their own.
            "for_statement" | "while_statement" | "function_definition" => return false,
            "augmented_assignment" => check_augmented_concat(parsed, node, findings),
            "assignment" => check_self_concat(parsed, node, findings),
            "comparison_operator" => check_membership(parsed, node, findings),
            "call" => check_invariant_compile(parsed, node, findings),
            _ => {}
        }
        true
    });
}

/// `acc += part` in a loop rebuilds the accumulator each iteration.
/// Numeric increments are fine; everything else is worth flagging.
fn check_augmented_concat(parsed: &ParsedSource, node: Node, findings: &mut Vec<Finding>) {
    let mut has_plus = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "+=" {
            has_plus = true;
        }
    }
    if !has_plus {
        return;
    }
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    if left.kind() != "identifier" {
        return;
    }
    if let Some(right) = node.child_by_field_name("right") {
        if matches!(right.kind(), "integer" | "float") {
            return;
        }
    }
    findings.push(Finding::new(
        Category::Performance,
        Severity::Medium,
        format!(
            "Concatenation with '+=' on '{}' inside a loop; collect parts and join once instead",
            parsed.node_text(left)
        ),
        line_of(node),
    ));
}

/// `x = x + part` is the spelled-out form of the same pattern.
fn check_self_concat(parsed: &ParsedSource, node: Node, findings: &mut Vec<Finding>) {
    let Some(target) = node.child_by_field_name("left") else {
        return;
    };
    if target.kind() != "identifier" {
        return;
    }
    let Some(value) = node.child_by_field_name("right") else {
        return;
    };
    if value.kind() != "binary_operator" {
        return;
    }

    let mut has_plus = false;
    let mut cursor = value.walk();
    for child in value.children(&mut cursor) {
        if child.kind() == "+" {
            has_plus = true;
        }
    }
    if !has_plus {
        return;
    }

    let operand = value.child_by_field_name("left");
    let addend = value.child_by_field_name("right");
    let target_name = parsed.node_text(target);
    let is_self = operand.is_some_and(|n| parsed.node_text(n) == target_name);
    let adds_number = addend.is_some_and(|n| matches!(n.kind(), "integer" | "float"));

    if is_self && !adds_number {
        findings.push(Finding::new(
            Category::Performance,
            Severity::Medium,
            format!(
                "Building '{}' with repeated '+' inside a loop; collect parts and join once instead",
                target_name
            ),
            line_of(node),
        ));
    }
}

/// `x in [a, b, c]` scans the sequence on every iteration.
fn check_membership(_parsed: &ParsedSource, node: Node, findings: &mut Vec<Finding>) {
    let mut has_in = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "in" {
            has_in = true;
        }
    }
    if !has_in {
        return;
    }

    let mut named_cursor = node.walk();
    let Some(haystack) = node.named_children(&mut named_cursor).last() else {
        return;
    };
    if matches!(haystack.kind(), "list" | "tuple") {
        findings.push(Finding::new(
            Category::Performance,
            Severity::Medium,
            format!(
                "Membership test against a {} literal inside a loop; use a set",
                haystack.kind()
            ),
            line_of(node),
        ));
    }
}

/// `re.compile(<literal>)` inside a loop is loop-invariant work.
fn check_invariant_compile(parsed: &ParsedSource, call: Node, findings: &mut Vec<Finding>) {
    let Some(func) = call.child_by_field_name("function") else {
        return;
    };
    if func.kind() != "attribute" {
        return;
    }
    let object = func.child_by_field_name("object");
    let attribute = func.child_by_field_name("attribute");
    let is_re_compile = object.is_some_and(|n| parsed.node_text(n) == "re")
        && attribute.is_some_and(|n| parsed.node_text(n) == "compile");
    if !is_re_compile {
        return;
    }

    let Some(args) = call.child_by_field_name("arguments") else {
        return;
    };
    let mut cursor = args.walk();
    let all_literal = args
        .named_children(&mut cursor)
        .all(|n| matches!(n.kind(), "string" | "concatenated_string" | "integer" | "float"));
    if all_literal {
        findings.push(Finding::new(
            Category::Performance,
            Severity::Medium,
            "'re.compile' with a constant pattern inside a loop; compile it once outside",
            line_of(call),
        ));
    }
}
