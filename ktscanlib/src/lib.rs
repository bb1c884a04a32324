//! # ktscanlib
//!
//! Finds the Kotlin sources in a workspace of projects and reports each one to
//! a source-model manager.
//!
//! ## Overview
//!
//! A workspace is a list of projects, each a tree of folders and files. The
//! scanner walks every project depth-first and asks a compatibility predicate
//! about each resource it meets:
//!
//! - **Compatible**: registered with the manager as added, not descended into
//! - **Incompatible folder**: its direct members are visited in order
//! - **Incompatible file**: skipped
//!
//! The host workspace, the predicate and the manager are traits, so an IDE
//! host or a test double can stand in for the filesystem implementations
//! shipped here.
//!
//! Scanning is best-effort: a failure while listing the workspace stops the
//! scan, gets logged through `tracing`, and is never returned to the caller.
//!
//! ## Example
//!
//! ```rust
//! use ktscanlib::{scan_workspace, FilterConfig, ScanOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Set up a workspace with one project
//! let dir = tempdir().unwrap();
//! fs::create_dir_all(dir.path().join("app/src/sub")).unwrap();
//! fs::write(dir.path().join("app/src/A.kt"), "class A").unwrap();
//! fs::write(dir.path().join("app/src/B.txt"), "notes").unwrap();
//! fs::write(dir.path().join("app/src/sub/C.kt"), "class C").unwrap();
//!
//! let registry = scan_workspace(dir.path(), &ScanOptions::new()).unwrap();
//! assert_eq!(registry.len(), 2);
//!
//! // Scan with filtering
//! let filter = FilterConfig::new().exclude("**/sub/**").unwrap();
//! let registry = scan_workspace(dir.path(), &ScanOptions::new().filter(filter)).unwrap();
//! assert_eq!(registry.len(), 1);
//! ```

pub mod collector;
pub mod error;
pub mod manager;
pub mod options;
pub mod source;

pub use collector::{collect_for_parsing, scan_workspace, FilesCollector};
pub use error::ScanError;
pub use manager::{ChangeKind, SourceModelManager, SourceRegistry};
pub use options::{ScanOptions, WorkspaceOptions};
pub use source::{
    CompatibilityPredicate, FilterConfig, FsWorkspace, Resource, ResourceKind, WorkspaceTree,
};

/// Result type for ktscanlib operations
pub type Result<T> = std::result::Result<T, ScanError>;
