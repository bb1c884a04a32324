//! # ktscan
//!
//! A CLI that scans a workspace of Kotlin projects and lists the sources a
//! source-model manager would be told about.
//!
//! ## Overview
//!
//! ktscan is built on top of ktscanlib. Every top-level directory of the
//! workspace is a project; every `.kt` file reachable through non-derived
//! folders is registered.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the workspace in the current directory
//! ktscan .
//!
//! # Include Kotlin scripts and skip generated code
//! ktscan ~/workspace --scripts --exclude "**/generated/**"
//!
//! # Only directories with an Eclipse .project file are projects
//! ktscan ~/workspace --require-marker
//!
//! # Output as JSON
//! ktscan . --output json
//! ```
//!
//! Set `KTSCAN_LOG` (e.g. `KTSCAN_LOG=debug`) to see scan diagnostics on stderr.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use ktscanlib::{scan_workspace, FilterConfig, ScanOptions, WorkspaceOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::{OutputMode, ScanReport};

/// Environment variable holding the log filter
const LOG_ENV: &str = "KTSCAN_LOG";

/// Arguments shared by the root command and `scan`
fn scan_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .help("Workspace directory to scan (defaults to current directory)")
            .default_value("."),
    )
    .arg(
        Arg::new("include")
            .short('i')
            .long("include")
            .action(ArgAction::Append)
            .help("Include files matching glob pattern"),
    )
    .arg(
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .action(ArgAction::Append)
            .help("Exclude files matching glob pattern"),
    )
    .arg(
        Arg::new("scripts")
            .short('s')
            .long("scripts")
            .action(ArgAction::SetTrue)
            .help("Also register Kotlin scripts (.kts)"),
    )
    .arg(
        Arg::new("require-marker")
            .long("require-marker")
            .action(ArgAction::SetTrue)
            .help("Only treat directories containing a .project file as projects"),
    )
    .arg(
        Arg::new("derived")
            .short('d')
            .long("derived")
            .action(ArgAction::Append)
            .help("Directory name to skip as derived output (replaces the defaults)"),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(["table", "text", "json"])
            .default_value("table")
            .help("Output format (text is the table without styling)"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    scan_args(
        Command::new("ktscan")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Lists the Kotlin sources found in a workspace of projects"),
    )
    .subcommand(scan_args(
        Command::new("scan").about("Scan a workspace (default command)"),
    ))
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if matches.get_flag("scripts") {
        filter = filter.with_scripts();
    }

    let includes: Vec<&str> = matches
        .get_many::<String>("include")
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_default();
    let excludes: Vec<&str> = matches
        .get_many::<String>("exclude")
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_default();

    filter = filter.include_many(&includes)?.exclude_many(&excludes)?;

    Ok(filter)
}

/// Build workspace listing options from matches
fn build_workspace_options(matches: &ArgMatches) -> WorkspaceOptions {
    let mut options =
        WorkspaceOptions::new().require_project_marker(matches.get_flag("require-marker"));

    if let Some(derived) = matches.get_many::<String>("derived") {
        options = options.derived_dirs(derived.cloned().collect());
    }

    options
}

/// Handler for the scan command
fn scan_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let mode = matches
        .get_one::<String>("output")
        .map(|s| render::output_mode_from_arg(s))
        .unwrap_or(OutputMode::Auto);

    let options = ScanOptions::new()
        .filter(build_filter(matches)?)
        .workspace(build_workspace_options(matches));

    let root = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
    debug!(root = %root.display(), "scanning workspace");

    let registry = scan_workspace(&root, &options)?;
    let report = ScanReport::new(&root, &registry);

    render::render(&report, mode).map_err(|e| anyhow::anyhow!("failed to render output: {e}"))
}

/// Install a stderr subscriber filtered by `KTSCAN_LOG` (default `warn`)
fn setup_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    setup_tracing();

    let matches = build_command().get_matches();
    let scan_matches = match matches.subcommand() {
        Some(("scan", sub)) => sub,
        _ => &matches,
    };

    match scan_handler(scan_matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_root_and_subcommand_share_args() {
        let root = build_command().get_matches_from(["ktscan", "ws", "--scripts"]);
        assert!(root.get_flag("scripts"));

        let matches = build_command().get_matches_from(["ktscan", "scan", "ws", "-o", "json"]);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "scan");
        assert_eq!(sub.get_one::<String>("path").unwrap(), "ws");
        assert_eq!(sub.get_one::<String>("output").unwrap(), "json");
    }

    #[test]
    fn test_build_filter_from_args() {
        let matches = build_command().get_matches_from([
            "ktscan",
            "--scripts",
            "--exclude",
            "**/generated/**",
        ]);
        let filter = build_filter(&matches).unwrap();

        assert_eq!(filter.extensions, vec!["kt", "kts"]);
        assert_eq!(filter.exclude.len(), 1);
        assert!(filter.include.is_empty());
    }

    #[test]
    fn test_build_filter_invalid_glob() {
        let matches = build_command().get_matches_from(["ktscan", "--include", "[bad"]);

        assert!(build_filter(&matches).is_err());
    }

    #[test]
    fn test_build_workspace_options() {
        let matches = build_command().get_matches_from([
            "ktscan",
            "--require-marker",
            "-d",
            "gen",
            "-d",
            "dist",
        ]);
        let options = build_workspace_options(&matches);

        assert!(options.require_project_marker);
        assert_eq!(options.derived_dirs, vec!["gen", "dist"]);
    }

    #[test]
    fn test_default_workspace_options() {
        let matches = build_command().get_matches_from(["ktscan"]);

        assert_eq!(build_workspace_options(&matches), WorkspaceOptions::default());
    }
}
