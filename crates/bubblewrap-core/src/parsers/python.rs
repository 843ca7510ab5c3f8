//! Python import extraction using native tree-sitter
//!
//! Collects every name a module imports, at any nesting depth:
//! `import a.b`, `import a as b`, `from x.y import z`, `from . import z`.
//! For from-imports both the source module and the imported names are
//! reported, since either may name a first-party module.

use std::collections::BTreeSet;
use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::errors::ScanError;

/// Python import parser. Holds one tree-sitter parser, so it is cheap to
/// reuse and should be kept per thread.
pub struct ImportParser {
    parser: Parser,
}

impl ImportParser {
    /// Create a new parser with the Python grammar loaded.
    pub fn new() -> Result<Self, ScanError> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| ScanError::Grammar {
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Parse `source` and return the sorted, de-duplicated imported names.
    ///
    /// `path` is only used for error reporting. Source with syntax errors is
    /// rejected rather than partially mined.
    pub fn parse(&mut self, path: &Path, source: &str) -> Result<Vec<String>, ScanError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ScanError::Unparseable {
                path: path.to_path_buf(),
                message: "parser produced no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ScanError::Unparseable {
                path: path.to_path_buf(),
                message: first_error_location(root),
            });
        }

        let bytes = source.as_bytes();
        let mut imports = BTreeSet::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_statement" => collect_imported_names(node, bytes, &mut imports),
                "import_from_statement" => {
                    if let Some(module) = node.child_by_field_name("module_name") {
                        if let Some(name) = module_name(module, bytes) {
                            imports.insert(name);
                        }
                    }
                    collect_imported_names(node, bytes, &mut imports);
                }
                _ => {
                    let mut cursor = node.walk();
                    stack.extend(node.named_children(&mut cursor));
                }
            }
        }

        Ok(imports.into_iter().collect())
    }
}

/// Read `path` and extract its imports with a fresh parser.
pub fn extract_imports(path: &Path) -> Result<Vec<String>, ScanError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScanError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    ImportParser::new()?.parse(path, &source)
}

/// Names bound by the `name:` fields of an import statement.
fn collect_imported_names(node: Node, source: &[u8], out: &mut BTreeSet<String>) {
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        let target = match child.kind() {
            "aliased_import" => child.child_by_field_name("name"),
            _ => Some(child),
        };
        if let Some(text) = target.and_then(|t| t.utf8_text(source).ok()) {
            out.insert(text.to_string());
        }
    }
}

/// The dotted module of a from-import; `None` for a bare `from . import x`.
fn module_name(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "dotted_name" => node.utf8_text(source).ok().map(str::to_string),
        "relative_import" => {
            let mut cursor = node.walk();
            let dotted = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "dotted_name");
            dotted.and_then(|d| d.utf8_text(source).ok().map(str::to_string))
        }
        _ => None,
    }
}

fn first_error_location(root: Node) -> String {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return format!("invalid syntax at line {}, column {}", pos.row + 1, pos.column + 1);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    "invalid syntax".to_string()
}
