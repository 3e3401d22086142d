//! Best-practice anti-pattern check.
//!
//! Pattern-matches the tree for known Python hazards: mutable default
//! arguments, exception handlers that swallow everything, eval/exec,
//! `global` statements, equality comparison against singletons, and
//! unreachable code.

use tree_sitter::Node;

use crate::parse::{line_of, visit, ParsedSource};

use super::{Category, Finding, Severity};

pub fn check(parsed: &ParsedSource) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    visit(parsed.tree.root_node(), &mut |node| {
        match node.kind() {
            "function_definition" => check_mutable_defaults(parsed, node, &mut findings),
            "except_clause" => check_except_clause(parsed, node, &mut findings),
            "call" => check_dynamic_eval(parsed, node, &mut findings),
            "global_statement" => check_global(node, &mut findings),
            "comparison_operator" => check_singleton_comparison(parsed, node, &mut findings),
            "block" => check_unreachable(parsed, node, &mut findings),
            _ => {}
        }
        true
    });

    Ok(findings)
}

/// Mutable default arguments share one instance across calls.
fn check_mutable_defaults(parsed: &ParsedSource, func: Node, findings: &mut Vec<Finding>) {
    let Some(params) = func.child_by_field_name("parameters") else {
        return;
    };
    let name = func
        .child_by_field_name("name")
        .map(|n| parsed.node_text(n))
        .unwrap_or("");

    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        if !matches!(param.kind(), "default_parameter" | "typed_default_parameter") {
            continue;
        }
        let Some(value) = param.child_by_field_name("value") else {
            continue;
        };
        if matches!(
            value.kind(),
            "list"
                | "dictionary"
                | "set"
                | "list_comprehension"
                | "dictionary_comprehension"
                | "set_comprehension"
        ) {
            findings.push(Finding::new(
                Category::BestPractice,
                Severity::High,
                format!(
                    "Mutable default argument in function '{}'; default to None and assign inside",
                    name
                ),
                line_of(param),
            ));
        }
    }
}

/// Bare `except:` and `except Exception: pass` swallow every error silently.
fn check_except_clause(parsed: &ParsedSource, clause: Node, findings: &mut Vec<Finding>) {
    let mut cursor = clause.walk();
    let named: Vec<Node> = clause
        .named_children(&mut cursor)
        .filter(|n| !matches!(n.kind(), "comment" | "block"))
        .collect();

    if named.is_empty() {
        findings.push(Finding::new(
            Category::BestPractice,
            Severity::High,
            "Bare 'except:' swallows all errors; catch specific exception types",
            line_of(clause),
        ));
        return;
    }

    // `except Exception as e:` wraps the type in an as_pattern, so take the
    // leading word of the clause's type expression.
    let type_text = parsed.node_text(named[0]);
    let head = type_text.split_whitespace().next().unwrap_or("");
    if (head == "Exception" || head == "BaseException") && handler_is_pass_only(clause) {
        findings.push(Finding::new(
            Category::BestPractice,
            Severity::High,
            format!(
                "'except {}:' with only 'pass' silently swallows errors; handle or re-raise",
                head
            ),
            line_of(clause),
        ));
    }
}

fn handler_is_pass_only(clause: Node) -> bool {
    let mut cursor = clause.walk();
    let Some(block) = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "block")
    else {
        return false;
    };
    let mut block_cursor = block.walk();
    let statements: Vec<Node> = block
        .named_children(&mut block_cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    !statements.is_empty() && statements.iter().all(|n| n.kind() == "pass_statement")
}

/// eval/exec run arbitrary code from data.
fn check_dynamic_eval(parsed: &ParsedSource, call: Node, findings: &mut Vec<Finding>) {
    let Some(func) = call.child_by_field_name("function") else {
        return;
    };
    if func.kind() != "identifier" {
        return;
    }
    let name = parsed.node_text(func);
    if name == "eval" || name == "exec" {
        findings.push(Finding::new(
            Category::BestPractice,
            Severity::High,
            format!("Call to '{}' evaluates arbitrary code; avoid dynamic evaluation", name),
            line_of(call),
        ));
    }
}

/// `global` couples functions through hidden module state.
fn check_global(node: Node, findings: &mut Vec<Finding>) {
    findings.push(Finding::new(
        Category::BestPractice,
        Severity::Medium,
        "Avoid 'global'; pass state explicitly through parameters or attributes",
        line_of(node),
    ));
}

/// `== None` style comparisons should use identity.
fn check_singleton_comparison(parsed: &ParsedSource, cmp: Node, findings: &mut Vec<Finding>) {
    let mut operator = None;
    let mut singleton = None;

    let mut cursor = cmp.walk();
    for child in cmp.children(&mut cursor) {
        match child.kind() {
            "==" | "!=" => operator = Some(child.kind()),
            "none" | "true" | "false" => singleton = Some(parsed.node_text(child).to_string()),
            _ => {}
        }
    }

    if let (Some(op), Some(value)) = (operator, singleton) {
        let replacement = if op == "==" { "is" } else { "is not" };
        findings.push(Finding::new(
            Category::BestPractice,
            Severity::Medium,
            format!(
                "Comparison to '{}' with '{}'; use '{}' instead",
                value, op, replacement
            ),
            line_of(cmp),
        ));
    }
}

const TERMINATORS: &[(&str, &str)] = &[
    ("return_statement", "return"),
    ("raise_statement", "raise"),
    ("break_statement", "break"),
    ("continue_statement", "continue"),
];

/// Statements after an unconditional jump never run. One finding per block,
/// at the first unreachable statement.
fn check_unreachable(_parsed: &ParsedSource, block: Node, findings: &mut Vec<Finding>) {
    let mut cursor = block.walk();
    let statements: Vec<Node> = block
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();

    for (i, stmt) in statements.iter().enumerate() {
        let Some((_, keyword)) = TERMINATORS.iter().find(|(kind, _)| *kind == stmt.kind()) else {
            continue;
        };
        if let Some(next) = statements.get(i + 1) {
            findings.push(Finding::new(
                Category::BestPractice,
                Severity::Medium,
                format!("Unreachable code after '{}'", keyword),
                line_of(*next),
            ));
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn run(source: &str) -> Vec<Finding> {
        check(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_clean_function_passes() {
        let findings = run("def fetch(items=None):\n    if items is None:\n        items = []\n    return items\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_mutable_default_list() {
        let findings = run("def f(x=[]):\n    x.append(1)\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::BestPractice);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].message.contains("Mutable default"));
        assert!(findings[0].message.contains("'f'"));
    }

    #[test]
    fn test_mutable_default_dict_with_annotation() {
        let findings = run("def f(cache: dict = {}):\n    return cache\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("Mutable default"));
    }

    #[test]
    fn test_bare_except() {
        let findings = run("try:\n    work()\nexcept:\n    pass\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].message.contains("Bare 'except:'"));
        assert_eq!(findings[0].line, 3);
    }

    #[test]
    fn test_broad_except_with_pass() {
        let findings = run("try:\n    work()\nexcept Exception as e:\n    pass\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("silently swallows"));
    }

    #[test]
    fn test_broad_except_with_handling_passes() {
        let findings = run("try:\n    work()\nexcept Exception as e:\n    log(e)\n    raise\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_specific_except_passes() {
        let findings = run("try:\n    work()\nexcept ValueError:\n    pass\n");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_eval_flagged() {
        let findings = run("def f(expr):\n    return eval(expr)\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].message.contains("'eval'"));
    }

    #[test]
    fn test_global_statement_flagged() {
        let findings = run("def f():\n    global counter\n    counter = 1\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::BestPractice);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].message.contains("'global'"));
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn test_none_equality_flagged() {
        let findings = run("def f(x):\n    if x == None:\n        return 1\n    return 0\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].message.contains("'is'"));
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn test_not_equal_true_flagged() {
        let findings = run("def f(flag):\n    return flag != True\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("is not"));
    }

    #[test]
    fn test_identity_comparison_passes() {
        let findings = run("def f(x):\n    return x is None\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unreachable_after_return() {
        let findings = run("def f():\n    return 1\n    print('never')\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].message.contains("Unreachable"));
        assert_eq!(findings[0].line, 3);
    }

    #[test]
    fn test_unreachable_after_break() {
        let findings = run("def f(items):\n    for x in items:\n        break\n        x += '!'\n");
        assert!(findings.iter().any(|f| f.message.contains("'break'")));
    }

    #[test]
    fn test_return_as_last_statement_passes() {
        let findings = run("def f():\n    x = 1\n    return x\n");
        assert!(findings.is_empty());
    }
}
