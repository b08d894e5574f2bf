//! Discovery of Go source files from command-line path arguments

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const RECURSIVE_SUFFIX: &str = "...";

/// Resolve path arguments to a sorted, deduplicated list of Go files
///
/// `dir/...` walks `dir` recursively, a plain directory contributes only its
/// own files, and a named file is kept if it passes the same Go and test
/// filters. Relative arguments are
/// resolved against `cwd`, and results under `cwd` are returned relative to it.
pub fn find_go_files(cwd: &Path, args: &[String], skip_tests: bool) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();

    for arg in args {
        let (target, recursive) = match arg.strip_suffix(RECURSIVE_SUFFIX) {
            Some(base) => (base.trim_end_matches('/'), true),
            None => (arg.as_str(), false),
        };
        let target = target.trim_start_matches("./");
        let path = if target.is_empty() || target == "." {
            cwd.to_path_buf()
        } else {
            cwd.join(target)
        };

        if path.is_file() {
            if is_go_source(&path, skip_tests) {
                found.insert(path);
            }
            continue;
        }

        let walker = WalkDir::new(&path)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_go_source(entry.path(), skip_tests) {
                found.insert(entry.into_path());
            }
        }
    }

    found
        .into_iter()
        .map(|p| match p.strip_prefix(cwd) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => p,
        })
        .collect()
}

fn is_go_source(path: &Path, skip_tests: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !name.ends_with(".go") {
        return false;
    }
    !(skip_tests && name.ends_with("_test.go"))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "vendor" || name == "testdata"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for file in [
            "main.go",
            "main_test.go",
            "README.md",
            "pkg/util/util.go",
            "pkg/util/util_test.go",
            "vendor/github.com/x/y/y.go",
            "testdata/fixture.go",
            ".git/hooks/hook.go",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "package x\n").unwrap();
        }
        dir
    }

    fn names(files: Vec<PathBuf>) -> Vec<String> {
        files
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_recursive_pattern() {
        let dir = layout();
        let files = find_go_files(dir.path(), &["./...".to_string()], false);
        assert_eq!(
            names(files),
            vec![
                "main.go",
                "main_test.go",
                "pkg/util/util.go",
                "pkg/util/util_test.go"
            ]
        );
    }

    #[test]
    fn test_skip_tests() {
        let dir = layout();
        let files = find_go_files(dir.path(), &["./...".to_string()], true);
        assert_eq!(names(files), vec!["main.go", "pkg/util/util.go"]);
    }

    #[test]
    fn test_plain_directory_is_not_recursive() {
        let dir = layout();
        let files = find_go_files(dir.path(), &[".".to_string()], true);
        assert_eq!(names(files), vec!["main.go"]);
    }

    #[test]
    fn test_explicit_file_and_dedup() {
        let dir = layout();
        let args = vec!["pkg/util/util.go".to_string(), "pkg/...".to_string()];
        let files = find_go_files(dir.path(), &args, true);
        assert_eq!(names(files), vec!["pkg/util/util.go"]);
    }

    #[test]
    fn test_named_files_are_filtered() {
        let dir = layout();
        let args = vec![
            "main_test.go".to_string(),
            "README.md".to_string(),
        ];
        assert!(find_go_files(dir.path(), &args, true).is_empty());
        assert_eq!(names(find_go_files(dir.path(), &args, false)), vec!["main_test.go"]);
    }
}
