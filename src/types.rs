//! Core data types shared across the pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A source file handed to the guard, with its content or the reason it could not be loaded
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: SourceContent,
}

/// Content of a source file
#[derive(Debug, Clone)]
pub enum SourceContent {
    Loaded(Vec<u8>),
    Unreadable(String),
}

impl SourceFile {
    /// A file whose bytes are already in memory
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: SourceContent::Loaded(bytes.into()),
        }
    }

    /// A file that could not be loaded
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: SourceContent::Unreadable(reason.into()),
        }
    }

    /// Read a file from disk; read failures are kept as `Unreadable`
    pub fn read(path: &Path) -> Self {
        let name = path.display().to_string();
        match std::fs::read(path) {
            Ok(bytes) => Self::new(name, bytes),
            Err(e) => Self::unreadable(name, e.to_string()),
        }
    }
}

/// Position of an import in its source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub file: String,
    /// 1-based line
    pub line: usize,
}

/// A single import declaration found by a scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    /// Import path without quotes, e.g. `github.com/owner/repo/sub`
    pub path: String,
    pub position: SourcePosition,
}

/// Normalized `host/owner/repo` address of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRepo {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl CanonicalRepo {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Public page of the repository
    pub fn url(&self) -> String {
        format!("https://{}", self)
    }
}

impl fmt::Display for CanonicalRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A position-tagged finding reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file_name: String,
    /// 1-based line, 0 for file-scope findings
    pub line_number: usize,
    pub reason: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// A finding that concerns the whole file
    pub fn file_scope(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            line_number: 0,
            reason: reason.into(),
            severity: Severity::Error,
        }
    }

    /// A finding attached to an import
    pub fn at(position: &SourcePosition, reason: impl Into<String>, severity: Severity) -> Self {
        Self {
            file_name: position.file.clone(),
            line_number: position.line,
            reason: reason.into(),
            severity,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file_name, self.line_number, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_repo_url() {
        let repo = CanonicalRepo::new("github.com", "foo", "bar");
        assert_eq!(repo.to_string(), "github.com/foo/bar");
        assert_eq!(repo.url(), "https://github.com/foo/bar");
    }

    #[test]
    fn test_diagnostic_display() {
        let pos = SourcePosition {
            file: "main.go".to_string(),
            line: 7,
        };
        let diag = Diagnostic::at(&pos, "too few stars", Severity::Warning);
        assert_eq!(diag.to_string(), "main.go:7: too few stars");
        assert_eq!(Diagnostic::file_scope("a.go", "broken").line_number, 0);
    }

    #[test]
    fn test_read_missing_file_is_unreadable() {
        let file = SourceFile::read(Path::new("/definitely/not/here.go"));
        assert!(matches!(file.content, SourceContent::Unreadable(_)));
    }
}
