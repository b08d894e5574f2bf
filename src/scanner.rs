//! Import extraction from source files
//!
//! The guard only needs an ordered list of `(path, line)` pairs per file, so the
//! language-specific part lives behind [`ImportScanner`]. [`GoImportScanner`]
//! implements it for Go with the tree-sitter grammar.

use crate::error::{GuardError, Result};
use crate::types::{ImportReference, SourceContent, SourceFile, SourcePosition};
use tracing::debug;
use tree_sitter::{Node, Parser};

/// Turns the text of one source file into its import references, in file order
pub trait ImportScanner {
    /// Extract imports from already loaded source bytes
    fn scan_source(&mut self, file_name: &str, source: &[u8]) -> Result<Vec<ImportReference>>;

    /// Extract imports from a source file, failing with `FileUnreadable` when it has no content
    fn scan_file(&mut self, file: &SourceFile) -> Result<Vec<ImportReference>> {
        match &file.content {
            SourceContent::Loaded(bytes) => self.scan_source(&file.name, bytes),
            SourceContent::Unreadable(reason) => {
                Err(GuardError::file_unreadable(&file.name, reason.as_str()))
            }
        }
    }
}

/// Scanner for Go source files
pub struct GoImportScanner {
    parser: Parser,
}

impl GoImportScanner {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| GuardError::config(format!("Failed to load Go grammar: {}", e)))?;

        Ok(Self { parser })
    }
}

impl ImportScanner for GoImportScanner {
    fn scan_source(&mut self, file_name: &str, source: &[u8]) -> Result<Vec<ImportReference>> {
        let text = std::str::from_utf8(source).map_err(|e| {
            GuardError::syntax_invalid(file_name, format!("source is not valid UTF-8: {}", e))
        })?;

        let tree = self
            .parser
            .parse(text, None)
            .ok_or_else(|| GuardError::syntax_invalid(file_name, "parser produced no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let reason = match first_error(root) {
                Some(node) => format!(
                    "{}:{}:{}: syntax error",
                    file_name,
                    node.start_position().row + 1,
                    node.start_position().column + 1
                ),
                None => format!("{}: syntax error", file_name),
            };
            return Err(GuardError::syntax_invalid(file_name, reason));
        }

        let mut cursor = root.walk();
        let has_package_clause = root
            .named_children(&mut cursor)
            .any(|child| child.kind() == "package_clause");
        if !has_package_clause {
            return Err(GuardError::syntax_invalid(
                file_name,
                format!("{}:1:1: expected 'package' clause", file_name),
            ));
        }

        let mut imports = Vec::new();
        let mut cursor = root.walk();
        for decl in root.named_children(&mut cursor) {
            if decl.kind() != "import_declaration" {
                continue;
            }
            collect_specs(decl, text, file_name, &mut imports);
        }

        debug!("Found {} imports in {}", imports.len(), file_name);
        Ok(imports)
    }
}

/// Gather `import_spec` nodes of one declaration, covering both the single and grouped forms
fn collect_specs(node: Node<'_>, text: &str, file_name: &str, out: &mut Vec<ImportReference>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                if let Some(import) = import_from_spec(child, text, file_name) {
                    out.push(import);
                }
            }
            "import_spec_list" => collect_specs(child, text, file_name, out),
            _ => {}
        }
    }
}

fn import_from_spec(spec: Node<'_>, text: &str, file_name: &str) -> Option<ImportReference> {
    let path_node = spec.child_by_field_name("path")?;
    let raw = path_node.utf8_text(text.as_bytes()).ok()?;
    let path = raw.trim_matches(|c| c == '"' || c == '`').trim();

    Some(ImportReference {
        path: path.to_string(),
        position: SourcePosition {
            file: file_name.to_string(),
            line: spec.start_position().row + 1,
        },
    })
}

/// First error or missing node in document order
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Result<Vec<ImportReference>> {
        let mut scanner = GoImportScanner::new().unwrap();
        scanner.scan_source("main.go", source.as_bytes())
    }

    fn paths_and_lines(imports: &[ImportReference]) -> Vec<(&str, usize)> {
        imports
            .iter()
            .map(|i| (i.path.as_str(), i.position.line))
            .collect()
    }

    #[test]
    fn test_single_import() {
        let imports = scan("package main\n\nimport \"github.com/foo/bar\"\n").unwrap();
        assert_eq!(paths_and_lines(&imports), vec![("github.com/foo/bar", 3)]);
        assert_eq!(imports[0].position.file, "main.go");
    }

    #[test]
    fn test_grouped_and_aliased_imports_in_file_order() {
        let source = r#"package main

import (
	"fmt"
	log "github.com/sirupsen/logrus"
	_ "github.com/lib/pq"
	. "github.com/onsi/gomega/format"
)

import `github.com/raw/path`

func main() { fmt.Println(log.New()) }
"#;
        let imports = scan(source).unwrap();
        assert_eq!(
            paths_and_lines(&imports),
            vec![
                ("fmt", 4),
                ("github.com/sirupsen/logrus", 5),
                ("github.com/lib/pq", 6),
                ("github.com/onsi/gomega/format", 7),
                ("github.com/raw/path", 10),
            ]
        );
    }

    #[test]
    fn test_no_imports() {
        let imports = scan("package lib\n\nfunc Add(a, b int) int { return a + b }\n").unwrap();
        assert!(imports.is_empty());
    }

    #[test]
    fn test_corrupt_source_is_syntax_invalid() {
        let err = scan("package main\n\nimport (\n\t\"fmt\"\n\nfunc {{{\n").unwrap_err();
        assert!(matches!(err, GuardError::SyntaxInvalid { .. }));
        assert!(err.to_string().starts_with("invalid syntax, file cannot be linted"));
    }

    #[test]
    fn test_missing_package_clause_is_syntax_invalid() {
        let err = scan("").unwrap_err();
        assert!(matches!(err, GuardError::SyntaxInvalid { .. }));
    }

    #[test]
    fn test_non_utf8_is_syntax_invalid() {
        let mut scanner = GoImportScanner::new().unwrap();
        let err = scanner.scan_source("bad.go", &[0x70, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, GuardError::SyntaxInvalid { .. }));
    }

    #[test]
    fn test_unreadable_file() {
        let mut scanner = GoImportScanner::new().unwrap();
        let file = SourceFile::unreadable("gone.go", "permission denied");
        let err = scanner.scan_file(&file).unwrap_err();
        assert!(matches!(err, GuardError::FileUnreadable { ref file, .. } if file == "gone.go"));
        assert_eq!(
            err.to_string(),
            "unable to read file, file cannot be linted (permission denied)"
        );
    }
}
