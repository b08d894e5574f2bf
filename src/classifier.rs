//! Decide which import paths name a queryable hosted repository

use crate::types::CanonicalRepo;

/// Host whose repository pages carry a star counter
pub const GITHUB_HOST: &str = "github.com";

/// Normalize an import path to `host/owner/repo`
///
/// Returns `None` for paths on other hosts (standard library, other forges) and
/// for `github.com` paths without both an owner and a repository segment.
/// Anything after the repository segment is a sub-package and is dropped.
pub fn classify(import_path: &str) -> Option<CanonicalRepo> {
    let mut segments = import_path.trim().split('/');

    if segments.next()? != GITHUB_HOST {
        return None;
    }

    let owner = segments.next().filter(|s| !s.is_empty())?;
    let name = segments.next().filter(|s| !s.is_empty())?;

    Some(CanonicalRepo::new(GITHUB_HOST, owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_packages_are_dropped() {
        let repo = classify("github.com/foo/bar/sub/pkg").unwrap();
        assert_eq!(repo.to_string(), "github.com/foo/bar");
        assert_eq!(repo.owner, "foo");
        assert_eq!(repo.name, "bar");
    }

    #[test]
    fn test_exact_repository() {
        assert_eq!(
            classify("github.com/spf13/cobra"),
            Some(CanonicalRepo::new("github.com", "spf13", "cobra"))
        );
    }

    #[test]
    fn test_too_few_segments() {
        assert_eq!(classify("github.com/foo"), None);
        assert_eq!(classify("github.com/foo/"), None);
        assert_eq!(classify("github.com"), None);
        assert_eq!(classify("github.com//bar"), None);
    }

    #[test]
    fn test_other_hosts_not_applicable() {
        assert_eq!(classify("fmt"), None);
        assert_eq!(classify("net/http"), None);
        assert_eq!(classify("golang.org/x/net/html"), None);
        assert_eq!(classify("gitlab.com/foo/bar"), None);
        assert_eq!(classify("github.company.io/foo/bar"), None);
    }
}
