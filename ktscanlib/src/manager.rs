//! Source-model managers: the receivers of scan notifications.
//!
//! A manager maintains parsed-source state keyed by resource. The scanner only
//! ever tells it that a source was [`ChangeKind::Added`]; hosts that watch the
//! file system also report changes and removals through the same entry point.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::source::resource::Resource;

/// How a resource changed since the manager last heard about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}

/// Receives source registrations.
pub trait SourceModelManager {
    /// Register or update a source resource.
    fn register_source(&mut self, resource: &Resource, kind: ChangeKind);
}

/// In-memory manager tracking the set of known source paths.
///
/// Keyed by path, so registering the same file twice leaves one entry.
/// `update_count` still counts every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRegistry {
    sources: BTreeSet<PathBuf>,
    updates: usize,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered source paths, in path order.
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(|p| p.as_path())
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.sources.contains(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of notifications received, duplicates included.
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl SourceModelManager for SourceRegistry {
    fn register_source(&mut self, resource: &Resource, kind: ChangeKind) {
        self.updates += 1;
        match kind {
            ChangeKind::Added | ChangeKind::Changed => {
                self.sources.insert(resource.path.clone());
            }
            ChangeKind::Removed => {
                self.sources.remove(&resource.path);
            }
        }
    }
}
