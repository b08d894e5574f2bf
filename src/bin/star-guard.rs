//! CLI tool that fails when Go imports point at unpopular GitHub repositories

use anyhow::{bail, Context};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use repo_star_guard::{
    check_paths, find_go_files, write_report, Diagnostic, GuardConfig, ReportFormat, Severity,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_FILE: &str = ".star-guard.toml";

#[derive(Parser)]
#[command(name = "star-guard")]
#[command(about = "Flag Go imports of GitHub repositories with too few stars", long_about = None)]
#[command(version)]
struct Cli {
    /// Files or directories to lint; `dir/...` recurses
    #[arg(default_value = "./...")]
    paths: Vec<String>,

    /// Don't lint test files
    #[arg(short = 'n', long)]
    no_test: bool,

    /// Report results in this format (checkstyle or json); requires --file
    #[arg(short = 'r', long, requires = "file")]
    report: Option<ReportFormat>,

    /// Write the report to this file; requires --report
    #[arg(short = 'f', long, requires = "report")]
    file: Option<PathBuf>,

    /// Exit code when issues were found
    #[arg(short = 'i', long, default_value = "2")]
    issues_exit_code: i32,

    /// Path to the configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config_path = locate_config(cli.config.as_deref())?;
    let config = GuardConfig::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    info!("Loaded configuration from {}", config_path.display());

    let cwd = std::env::current_dir().context("unable to determine working directory")?;
    let files = find_go_files(&cwd, &cli.paths, cli.no_test);
    if files.is_empty() {
        bail!("no Go files found for {}", cli.paths.join(" "));
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Checking {} files...", files.len()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = check_paths(&files, &config).await;

    spinner.finish_and_clear();
    let diagnostics = result?;

    eprintln!("info: found {} issues", diagnostics.len());

    if let (Some(format), Some(path)) = (cli.report, &cli.file) {
        write_report(path, format, &diagnostics)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    for diag in &diagnostics {
        println!("{}", format_diagnostic(diag));
    }

    if diagnostics.is_empty() {
        Ok(0)
    } else {
        Ok(cli.issues_exit_code)
    }
}

/// Explicit path, then the working directory, then the home directory
fn locate_config(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Ok(local);
    }

    if let Some(home) = dirs::home_dir() {
        let in_home = home.join(CONFIG_FILE);
        if in_home.is_file() {
            return Ok(in_home);
        }
        bail!("could not find config file: {} {}", CONFIG_FILE, in_home.display());
    }

    bail!("could not find config file: {}", CONFIG_FILE)
}

fn format_diagnostic(diag: &Diagnostic) -> String {
    let tag = match diag.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };
    format!("{} [{}]", diag, tag)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
