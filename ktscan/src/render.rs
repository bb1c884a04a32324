//! Template rendering for CLI output using outstanding

use std::path::{Path, PathBuf};

use console::Style;
use ktscanlib::SourceRegistry;
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;

/// Include template at compile time
const SOURCES_TABLE_TEMPLATE: &str = include_str!("../templates/sources_table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Width of the source column before names get truncated
const NAME_WIDTH: usize = 72;

/// Map the `--output` argument to an output mode
pub fn output_mode_from_arg(value: &str) -> OutputMode {
    match value {
        "json" => OutputMode::Json,
        "text" => OutputMode::Text,
        _ => OutputMode::Auto,
    }
}

/// Serializable summary of one scan
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Workspace root that was scanned
    pub root: PathBuf,
    /// Registered sources, relative to the root
    pub sources: Vec<String>,
    /// Number of registered sources
    pub total: usize,
    /// Registration calls received, duplicates included
    pub updates: usize,
}

impl ScanReport {
    pub fn new(root: &Path, registry: &SourceRegistry) -> Self {
        let sources: Vec<String> = registry
            .sources()
            .map(|p| make_relative(p, root))
            .collect();

        Self {
            root: root.to_path_buf(),
            total: sources.len(),
            sources,
            updates: registry.update_count(),
        }
    }
}

/// Data context for the sources table template
#[derive(Debug, Serialize)]
struct SourcesTableContext {
    /// Column header
    header: String,
    /// Separator line (dashes)
    separator: String,
    /// Pre-truncated source rows
    rows: Vec<String>,
    /// Total row
    total: String,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Convert a path to a relative path from the base directory
fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

/// Render the sources table using outstanding
fn render_sources_table(
    report: &ScanReport,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();

    let context = SourcesTableContext {
        header: "Source".to_string(),
        separator: "-".repeat(NAME_WIDTH),
        rows: report
            .sources
            .iter()
            .map(|s| truncate_name(s, NAME_WIDTH))
            .collect(),
        total: format!("Total ({} sources)", report.total),
    };

    let mut rendered = render_with_output(SOURCES_TABLE_TEMPLATE, &context, &theme, output_mode)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    Ok(rendered)
}

/// Render a scan report; JSON goes through outstanding's auto dispatch
pub fn render(
    report: &ScanReport,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    if matches!(output_mode, OutputMode::Json) {
        let theme = create_theme();
        let mut rendered = render_auto(SOURCES_TABLE_TEMPLATE, report, &theme, output_mode)?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        return Ok(rendered);
    }

    render_sources_table(report, output_mode)
}
