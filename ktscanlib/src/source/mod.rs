//! Source discovery: the workspace model the scanner walks.
//!
//! This module holds the collaborators the scanner consults:
//!
//! - **Resources**: handles for projects, folders and files
//! - **Workspace hosts**: list projects and the direct members of containers
//! - **Compatibility predicates**: decide which files are Kotlin sources
//!
//! ## Example
//!
//! ```rust,ignore
//! use ktscanlib::source::{FilterConfig, FsWorkspace, WorkspaceTree};
//! use ktscanlib::WorkspaceOptions;
//!
//! let workspace = FsWorkspace::open(".", WorkspaceOptions::default())?;
//! let filter = FilterConfig::new().exclude("**/generated/**")?;
//! ```

pub mod filter;
pub mod resource;
pub mod workspace;

pub use filter::{CompatibilityPredicate, FilterConfig};
pub use resource::{Resource, ResourceKind};
pub use workspace::{FsWorkspace, WorkspaceTree};
