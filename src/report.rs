//! Structured report output for diagnostics

use crate::error::{GuardError, Result};
use crate::types::Diagnostic;
use std::path::Path;
use std::str::FromStr;

const CHECKSTYLE_SOURCE: &str = "star-guard";

/// Supported report file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Checkstyle,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checkstyle" => Ok(ReportFormat::Checkstyle),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("invalid report type '{}'", s)),
        }
    }
}

/// Render the diagnostics in the given format
pub fn render(format: ReportFormat, diagnostics: &[Diagnostic]) -> Result<String> {
    match format {
        ReportFormat::Checkstyle => Ok(to_checkstyle(diagnostics)),
        ReportFormat::Json => to_json(diagnostics),
    }
}

/// Render and write a report file
pub fn write_report(path: &Path, format: ReportFormat, diagnostics: &[Diagnostic]) -> Result<()> {
    let content = render(format, diagnostics)?;
    std::fs::write(path, content).map_err(GuardError::from)
}

/// Checkstyle XML, one `<file>` element per file in first-seen order
pub fn to_checkstyle(diagnostics: &[Diagnostic]) -> String {
    let mut files: Vec<(&str, Vec<&Diagnostic>)> = Vec::new();
    for diag in diagnostics {
        match files.iter_mut().find(|(name, _)| *name == diag.file_name) {
            Some((_, entries)) => entries.push(diag),
            None => files.push((diag.file_name.as_str(), vec![diag])),
        }
    }

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<checkstyle version=\"5.0\">\n");

    for (name, entries) in files {
        xml.push_str(&format!("  <file name=\"{}\">\n", escape_xml(name)));
        for diag in entries {
            xml.push_str(&format!(
                "    <error line=\"{}\" column=\"1\" severity=\"{}\" message=\"{}\" source=\"{}\"></error>\n",
                diag.line_number,
                diag.severity,
                escape_xml(&diag.reason),
                CHECKSTYLE_SOURCE
            ));
        }
        xml.push_str("  </file>\n");
    }

    xml.push_str("</checkstyle>\n");
    xml
}

/// Pretty-printed JSON array of diagnostics
pub fn to_json(diagnostics: &[Diagnostic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(diagnostics)?)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
