//! Star count threshold evaluation

use crate::config::GuardConfig;
use crate::types::Severity;

/// Outcome of a threshold check that crossed a limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub severity: Severity,
    pub reason: String,
}

/// Compare a repository's star count against the configured thresholds
///
/// The error threshold is checked first and wins; both comparisons are strict,
/// so a count equal to a threshold passes it.
pub fn evaluate(import_path: &str, stars: u64, config: &GuardConfig) -> Option<Verdict> {
    if stars < u64::from(config.error) {
        return Some(Verdict {
            severity: Severity::Error,
            reason: format!(
                "import {} has {} stars, below the error threshold of {}",
                import_path, stars, config.error
            ),
        });
    }

    if stars < u64::from(config.warn) {
        return Some(Verdict {
            severity: Severity::Warning,
            reason: format!(
                "import {} has {} stars, below the warn threshold of {}",
                import_path, stars, config.warn
            ),
        });
    }

    None
}
