//! Main guard orchestration logic

use crate::classifier::classify;
use crate::config::GuardConfig;
use crate::error::Result;
use crate::evaluator::evaluate;
use crate::fetcher::{GitHubPageFetcher, StarSource};
use crate::scanner::{GoImportScanner, ImportScanner};
use crate::types::{Diagnostic, Severity, SourceFile};
use std::path::PathBuf;
use tracing::{debug, info};

/// Runs the scan, classify, fetch and evaluate steps over a set of files
pub struct StarGuard<S, F> {
    scanner: S,
    source: F,
}

impl<S: ImportScanner, F: StarSource> StarGuard<S, F> {
    pub fn new(scanner: S, source: F) -> Self {
        Self { scanner, source }
    }

    /// Check every file in order and return the diagnostics in file-then-import order
    ///
    /// Failures are reported as diagnostics and never stop the run. Every import
    /// occurrence is fetched on its own, including repeats of the same repository.
    pub async fn check_files(&mut self, files: &[SourceFile], config: &GuardConfig) -> Vec<Diagnostic> {
        info!("Checking {} files", files.len());

        let mut diagnostics = Vec::new();
        for file in files {
            self.check_file(file, config, &mut diagnostics).await;
        }

        info!("Check complete: {} issues found", diagnostics.len());
        diagnostics
    }

    async fn check_file(
        &mut self,
        file: &SourceFile,
        config: &GuardConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let imports = match self.scanner.scan_file(file) {
            Ok(imports) => imports,
            Err(e) => {
                debug!("Skipping {}: {}", file.name, e);
                diagnostics.push(Diagnostic::file_scope(&file.name, e.to_string()));
                return;
            }
        };

        for import in imports {
            let Some(repo) = classify(&import.path) else {
                continue;
            };

            debug!("Imported package {} resolves to {}", import.path, repo);
            if let Some(exception) = config.exception_for(&repo) {
                debug!("{} is listed as an exception: {}", repo, exception.reason);
            }

            let stars = match self.source.fetch_stars(&repo).await {
                Ok(stars) => stars,
                Err(e) => {
                    debug!("Failed to fetch stars for {}: {}", import.path, e);
                    diagnostics.push(Diagnostic::at(&import.position, e.to_string(), Severity::Error));
                    continue;
                }
            };

            if let Some(verdict) = evaluate(&import.path, stars, config) {
                diagnostics.push(Diagnostic::at(&import.position, verdict.reason, verdict.severity));
            }
        }
    }
}

/// Read the given Go files from disk and check them against GitHub
pub async fn check_paths(paths: &[PathBuf], config: &GuardConfig) -> Result<Vec<Diagnostic>> {
    let files: Vec<SourceFile> = paths.iter().map(|p| SourceFile::read(p)).collect();

    let scanner = GoImportScanner::new()?;
    let fetcher = GitHubPageFetcher::new(&config.network)?;
    let mut guard = StarGuard::new(scanner, fetcher);

    Ok(guard.check_files(&files, config).await)
}
