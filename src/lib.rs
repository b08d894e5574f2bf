//! # repo_star_guard
//!
//! A lint gate for Go code bases that checks how popular the GitHub repositories
//! behind your imports are:
//! - **Import scanning**: extract import paths and their lines from Go sources
//! - **Classification**: reduce `github.com/owner/repo/sub/pkg` to `github.com/owner/repo`
//! - **Popularity**: read the star counter from the repository's public page
//! - **Thresholds**: report imports below the configured warn/error star counts
//!
//! ## Quick Start
//!
//! ```no_run
//! use repo_star_guard::{check_paths, GuardConfig};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = GuardConfig::builder().warn(100).error(10).build();
//! let diagnostics = check_paths(&[PathBuf::from("main.go")], &config).await?;
//!
//! for diag in diagnostics {
//!     println!("{}", diag);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Failures while reading a file, parsing it or fetching a page never abort a run;
//! they are returned as diagnostics next to the threshold findings.

mod classifier;
mod config;
mod error;
mod evaluator;
mod fetcher;
mod files;
mod guard;
mod report;
mod scanner;
mod types;

// Re-export public API
pub use classifier::{classify, GITHUB_HOST};
pub use config::{Exception, GuardConfig, GuardConfigBuilder, NetworkConfig};
pub use error::{GuardError, Result};
pub use evaluator::{evaluate, Verdict};
pub use fetcher::{find_star_counter, parse_star_count, GitHubPageFetcher, StarSource, STAR_COUNTER_ID};
pub use files::find_go_files;
pub use guard::{check_paths, StarGuard};
pub use report::{render, to_checkstyle, to_json, write_report, ReportFormat};
pub use scanner::{GoImportScanner, ImportScanner};
pub use types::{
    CanonicalRepo, Diagnostic, ImportReference, Severity, SourceContent, SourceFile, SourcePosition,
};
