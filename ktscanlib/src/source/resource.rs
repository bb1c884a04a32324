//! Resource handles surfaced by a workspace host.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What kind of node a [`Resource`] is in the host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Top-level container owned by the workspace
    Project,
    /// Container nested inside a project
    Folder,
    /// Leaf
    File,
}

/// A node in the host's file/folder tree, identified by its path.
///
/// Resources are transient handles: the host creates them when listing a
/// container and the scanner drops them once visited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Path identifying the resource
    pub path: PathBuf,
    /// Node kind
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(path: impl Into<PathBuf>, kind: ResourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn project(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ResourceKind::Project)
    }

    pub fn folder(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ResourceKind::Folder)
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ResourceKind::File)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or an empty string for root-like paths.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ResourceKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == ResourceKind::File
    }

    /// Whether the resource can have members (projects and folders).
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ResourceKind::Project | ResourceKind::Folder)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
