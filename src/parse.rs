//! Parser adapter: turns a Python source string into a syntax tree.
//!
//! Parsing is a pure function of the input string. A snippet that does not
//! conform to the Python grammar is reported as a `SyntaxFault` carrying the
//! 1-based line of the first offending node; callers decide how to surface it.

use tree_sitter::{Language, Node, Parser, Tree};

/// Reported when a snippet is not syntactically valid Python.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFault {
    /// 1-based line of the first error node (0 when unknown).
    pub line: usize,
    pub message: String,
}

/// A successfully parsed snippet: the tree plus the source it was built from.
///
/// The source is kept alongside the tree because tree-sitter nodes only hold
/// byte offsets; text extraction needs the original bytes.
#[derive(Debug)]
pub struct ParsedSource {
    pub tree: Tree,
    text: String,
}

impl ParsedSource {
    /// The original source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The source as bytes, for tree-sitter query cursors.
    pub fn source_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Text covered by a node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }
}

/// The Python grammar.
pub fn language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

/// 1-based source line a node starts on.
pub fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

/// Parse a snippet, or report where it stops being valid Python.
pub fn parse(source: &str) -> Result<ParsedSource, SyntaxFault> {
    let mut parser = Parser::new();
    parser.set_language(&language()).map_err(|e| SyntaxFault {
        line: 0,
        message: format!("Syntax error: parser initialization failed: {}", e),
    })?;

    let tree = parser.parse(source, None).ok_or_else(|| SyntaxFault {
        line: 0,
        message: "Syntax error: failed to parse source".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(match first_error(root) {
            Some(node) if node.is_missing() => SyntaxFault {
                line: line_of(node),
                message: format!("Syntax error: missing {}", node.kind()),
            },
            Some(node) => SyntaxFault {
                line: line_of(node),
                message: "Syntax error: invalid syntax".to_string(),
            },
            None => SyntaxFault {
                line: 0,
                message: "Syntax error: invalid syntax".to_string(),
            },
        });
    }

    Ok(ParsedSource {
        tree,
        text: source.to_string(),
    })
}

/// Preorder walk over a subtree. The callback returns whether to descend
/// into the node's children.
pub fn visit<'t>(node: Node<'t>, f: &mut dyn FnMut(Node<'t>) -> bool) {
    if !f(node) {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}

/// Find the first ERROR or MISSING node in a subtree.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        if let Some(err) = first_error(child) {
            return Some(err);
        }
    }
    None
}
