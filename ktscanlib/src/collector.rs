//! Workspace scanning: find Kotlin sources and hand them to a manager.
//!
//! The walk is depth-first and pre-order over the members of every project.
//! A compatible resource is registered and treated as a leaf; an incompatible
//! folder is descended into; anything else is skipped. Listing failures abort
//! the scan, are logged, and never reach the caller.

use std::path::Path;

use tracing::{debug, error, trace};

use crate::manager::{ChangeKind, SourceModelManager, SourceRegistry};
use crate::options::ScanOptions;
use crate::source::filter::CompatibilityPredicate;
use crate::source::resource::Resource;
use crate::source::workspace::{FsWorkspace, WorkspaceTree};
use crate::Result;

/// Counters for a completed scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScanSummary {
    projects: usize,
    folders: usize,
    sources: usize,
}

/// Scans a workspace and reports every compatible resource to a manager.
///
/// The collector holds no state of its own between calls: each
/// [`collect_for_parsing`](FilesCollector::collect_for_parsing) is an
/// independent pass. Calling it twice registers the same sources twice;
/// deduplication is up to the manager.
pub struct FilesCollector<'a, W: ?Sized, P: ?Sized> {
    workspace: &'a W,
    predicate: &'a P,
}

impl<'a, W, P> FilesCollector<'a, W, P>
where
    W: WorkspaceTree + ?Sized,
    P: CompatibilityPredicate + ?Sized,
{
    pub fn new(workspace: &'a W, predicate: &'a P) -> Self {
        Self {
            workspace,
            predicate,
        }
    }

    /// Register every compatible resource of every project as
    /// [`ChangeKind::Added`].
    ///
    /// Never fails: if listing a project or folder fails, the scan stops,
    /// the error is logged, and sources registered so far stay registered.
    pub fn collect_for_parsing<M>(&self, manager: &mut M)
    where
        M: SourceModelManager + ?Sized,
    {
        match self.add_files_to_parse(manager) {
            Ok(summary) => debug!(
                projects = summary.projects,
                folders = summary.folders,
                sources = summary.sources,
                "workspace scan complete"
            ),
            Err(err) => error!(error = %err, "workspace scan aborted"),
        }
    }

    fn add_files_to_parse<M>(&self, manager: &mut M) -> Result<ScanSummary>
    where
        M: SourceModelManager + ?Sized,
    {
        let mut summary = ScanSummary::default();

        for project in self.workspace.projects()? {
            summary.projects += 1;
            let members = self.workspace.members(&project)?;
            self.scan_for_files(members, manager, &mut summary)?;
        }

        Ok(summary)
    }

    fn scan_for_files<M>(
        &self,
        roots: Vec<Resource>,
        manager: &mut M,
        summary: &mut ScanSummary,
    ) -> Result<()>
    where
        M: SourceModelManager + ?Sized,
    {
        // Children are pushed reversed so they pop in listing order.
        let mut pending: Vec<Resource> = roots.into_iter().rev().collect();

        while let Some(resource) = pending.pop() {
            if self.predicate.is_compatible(&resource) {
                trace!(path = %resource, "registering source");
                manager.register_source(&resource, ChangeKind::Added);
                summary.sources += 1;
                continue;
            }

            if !resource.is_folder() {
                continue;
            }

            summary.folders += 1;
            let members = self.workspace.members(&resource)?;
            pending.extend(members.into_iter().rev());
        }

        Ok(())
    }
}

/// Scan `workspace` with `predicate`, registering sources with `manager`.
///
/// Shorthand for [`FilesCollector::collect_for_parsing`].
pub fn collect_for_parsing<W, P, M>(workspace: &W, predicate: &P, manager: &mut M)
where
    W: WorkspaceTree + ?Sized,
    P: CompatibilityPredicate + ?Sized,
    M: SourceModelManager + ?Sized,
{
    FilesCollector::new(workspace, predicate).collect_for_parsing(manager);
}

/// Scan a directory-backed workspace into a fresh [`SourceRegistry`].
///
/// Errors only when the workspace cannot be opened. Failures during the
/// scan itself are logged and yield whatever was registered before them.
///
/// # Example
///
/// ```rust,ignore
/// use ktscanlib::{scan_workspace, FilterConfig, ScanOptions};
///
/// let filter = FilterConfig::new().exclude("**/generated/**")?;
/// let registry = scan_workspace("~/workspace", &ScanOptions::new().filter(filter))?;
/// for source in registry.sources() {
///     println!("{}", source.display());
/// }
/// ```
pub fn scan_workspace(path: impl AsRef<Path>, options: &ScanOptions) -> Result<SourceRegistry> {
    let workspace = FsWorkspace::open(path, options.workspace.clone())?;
    let mut registry = SourceRegistry::new();

    collect_for_parsing(&workspace, &options.filter, &mut registry);

    Ok(registry)
}
