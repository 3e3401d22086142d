//! Rule checks that consume a parsed snippet and emit findings.
//!
//! Each check is a stateless pure function from the parsed source to a
//! sequence of findings. The checks run in the fixed order of [`CHECKS`];
//! that order only affects presentation, never correctness, and is kept
//! static so repeated analysis of the same input is reproducible.

mod best_practices;
mod complexity;
mod naming;
mod performance;
mod style;
pub mod types;

pub use types::{Category, Finding, Severity};

use crate::parse::ParsedSource;

/// A single rule check.
pub type CheckFn = fn(&ParsedSource) -> anyhow::Result<Vec<Finding>>;

/// The ordered check table. Never mutated at runtime.
pub static CHECKS: &[(&str, CheckFn)] = &[
    ("naming", naming::check),
    ("complexity", complexity::check),
    ("best_practices", best_practices::check),
    ("performance", performance::check),
    ("style", style::check),
];

/// Run every check and collect findings, grouped per check in table order
/// and sorted by ascending line within each group.
///
/// A check that fails internally is logged at debug level and skipped;
/// no error escapes this boundary.
pub fn run_all(parsed: &ParsedSource) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, check) in CHECKS {
        match check(parsed) {
            Ok(mut batch) => {
                batch.sort_by_key(|f| f.line);
                findings.append(&mut batch);
            }
            Err(e) => {
                tracing::debug!(check = *name, error = %e, "check failed; skipping");
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_check_order_is_stable() {
        let names: Vec<&str> = CHECKS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["naming", "complexity", "best_practices", "performance", "style"]
        );
    }

    #[test]
    fn test_findings_grouped_by_category_then_line() {
        // Naming issue on line 4, style issues on lines 1 and 2.
        let source = "x=1\ny=2 \n\ndef BadName():\n    return 1\n";
        let parsed = parse(source).unwrap();
        let findings = run_all(&parsed);

        let naming_pos = findings
            .iter()
            .position(|f| f.category == Category::Naming)
            .expect("naming finding");
        let first_style = findings
            .iter()
            .position(|f| f.category == Category::Style)
            .expect("style finding");
        assert!(naming_pos < first_style, "naming group comes first: {:?}", findings);

        let style_lines: Vec<usize> = findings
            .iter()
            .filter(|f| f.category == Category::Style)
            .map(|f| f.line)
            .collect();
        let mut sorted = style_lines.clone();
        sorted.sort_unstable();
        assert_eq!(style_lines, sorted);
    }

    #[test]
    fn test_clean_snippet_yields_nothing() {
        let source = "def greet(name):\n    return 'hello ' + name\n";
        let parsed = parse(source).unwrap();
        assert!(run_all(&parsed).is_empty());
    }
}
