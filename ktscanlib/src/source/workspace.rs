//! Workspace hosts: where projects and their members come from.
//!
//! The scanner only needs two capabilities from a host, expressed by
//! [`WorkspaceTree`]. [`FsWorkspace`] provides them for a directory on disk
//! where every top-level sub-directory is a project.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::options::{WorkspaceOptions, PROJECT_MARKER};
use crate::source::resource::{Resource, ResourceKind};
use crate::Result;

/// Read-only view of a workspace of projects.
pub trait WorkspaceTree {
    /// Projects currently open, in the order the host exposes them.
    fn projects(&self) -> Result<Vec<Resource>>;

    /// Direct members of a project or folder. Never recursive.
    fn members(&self, container: &Resource) -> Result<Vec<Resource>>;
}

/// A workspace backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    /// Root directory of the workspace
    pub root: PathBuf,
    /// Listing options
    pub options: WorkspaceOptions,
}

impl FsWorkspace {
    /// Open the workspace rooted at `root`.
    pub fn open(root: impl AsRef<Path>, options: WorkspaceOptions) -> Result<Self> {
        let root = root.as_ref();

        if !root.is_dir() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }

        Ok(Self {
            root: root.to_path_buf(),
            options,
        })
    }

    /// List the direct entries of `dir`, sorted by file name, derived ones
    /// and directory symlinks that loop back to an ancestor left out.
    fn list(&self, dir: &Path) -> Result<Vec<(PathBuf, bool)>> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let is_dir = entry.file_type().is_dir();
            let name = entry.file_name().to_string_lossy();
            if self.options.is_derived(&name, is_dir) {
                continue;
            }
            if is_dir && entry.path_is_symlink() && self.is_symlink_loop(entry.path())? {
                debug!(path = %entry.path().display(), "skipping symlink loop");
                continue;
            }
            entries.push((entry.into_path(), is_dir));
        }

        Ok(entries)
    }

    /// Whether the directory symlink at `link` resolves to one of its own
    /// ancestors inside the workspace.
    ///
    /// Each listing is a separate one-level walk, so walkdir's own loop
    /// detection never sees the ancestors.
    fn is_symlink_loop(&self, link: &Path) -> Result<bool> {
        let target = fs::canonicalize(link).map_err(|e| ScanError::access(link, e))?;

        for ancestor in link.ancestors().skip(1) {
            if !ancestor.starts_with(&self.root) {
                break;
            }
            let resolved =
                fs::canonicalize(ancestor).map_err(|e| ScanError::access(ancestor, e))?;
            if resolved == target {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl WorkspaceTree for FsWorkspace {
    fn projects(&self) -> Result<Vec<Resource>> {
        let projects = self
            .list(&self.root)?
            .into_iter()
            .filter(|(_, is_dir)| *is_dir)
            .filter(|(path, _)| {
                !self.options.require_project_marker || path.join(PROJECT_MARKER).is_file()
            })
            .map(|(path, _)| Resource::project(path))
            .collect();

        Ok(projects)
    }

    fn members(&self, container: &Resource) -> Result<Vec<Resource>> {
        if !container.is_container() {
            return Ok(Vec::new());
        }

        let members = self
            .list(container.path())?
            .into_iter()
            .map(|(path, is_dir)| {
                let kind = if is_dir {
                    ResourceKind::Folder
                } else {
                    ResourceKind::File
                };
                Resource::new(path, kind)
            })
            .collect();

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_workspace(root: &Path) {
        fs::create_dir_all(root.join("beta/src")).unwrap();
        fs::create_dir_all(root.join("alpha/src/sub")).unwrap();
        fs::create_dir_all(root.join("alpha/build/classes")).unwrap();
        fs::create_dir_all(root.join("alpha/.idea")).unwrap();
        fs::create_dir_all(root.join(".metadata")).unwrap();

        fs::write(root.join("alpha/.project"), "<projectDescription/>").unwrap();
        fs::write(root.join("alpha/src/B.kt"), "class B").unwrap();
        fs::write(root.join("alpha/src/A.kt"), "class A").unwrap();
        fs::write(root.join("alpha/build/classes/Gen.kt"), "class Gen").unwrap();
        fs::write(root.join("beta/src/C.kt"), "class C").unwrap();
        fs::write(root.join("notes.txt"), "not a project").unwrap();
    }

    fn names(resources: &[Resource]) -> Vec<String> {
        resources.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_projects_sorted_and_directories_only() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let projects = ws.projects().unwrap();

        assert_eq!(names(&projects), vec!["alpha", "beta"]);
        assert!(projects.iter().all(|p| p.kind == ResourceKind::Project));
    }

    #[test]
    fn test_projects_require_marker() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());

        let options = WorkspaceOptions::new().require_project_marker(true);
        let ws = FsWorkspace::open(temp.path(), options).unwrap();

        assert_eq!(names(&ws.projects().unwrap()), vec!["alpha"]);
    }

    #[test]
    fn test_members_hide_derived() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let alpha = Resource::project(temp.path().join("alpha"));
        let members = ws.members(&alpha).unwrap();

        // .project, .idea and build/ are derived
        assert_eq!(names(&members), vec!["src"]);
        assert!(members[0].is_folder());
    }

    #[test]
    fn test_members_are_direct_and_sorted() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let src = Resource::folder(temp.path().join("alpha/src"));
        let members = ws.members(&src).unwrap();

        assert_eq!(names(&members), vec!["A.kt", "B.kt", "sub"]);
        assert!(members[0].is_file());
        assert!(members[2].is_folder());
    }

    #[test]
    fn test_members_of_file_is_empty() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let file = Resource::file(temp.path().join("alpha/src/A.kt"));

        assert!(ws.members(&file).unwrap().is_empty());
    }

    #[test]
    fn test_members_of_missing_folder_is_access_error() {
        let temp = tempdir().unwrap();
        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let gone = Resource::folder(temp.path().join("gone"));

        let result = ws.members(&gone);
        assert!(matches!(result, Err(ScanError::WorkspaceAccess { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_members_skip_symlink_to_ancestor() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());
        let src = temp.path().join("alpha/src");
        std::os::unix::fs::symlink("..", src.join("up")).unwrap();
        std::os::unix::fs::symlink(".", src.join("self")).unwrap();

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let members = ws.members(&Resource::folder(&src)).unwrap();

        assert_eq!(names(&members), vec!["A.kt", "B.kt", "sub"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_members_skip_indirect_symlink_loop() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());
        let alpha_src = temp.path().join("alpha/src");
        // alpha/src/sub/other -> beta, beta/src/back -> alpha/src
        std::os::unix::fs::symlink(temp.path().join("beta"), alpha_src.join("sub/other"))
            .unwrap();
        std::os::unix::fs::symlink(&alpha_src, temp.path().join("beta/src/back")).unwrap();

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();

        // Reached through the link, back points at an ancestor of itself
        let via_link = Resource::folder(alpha_src.join("sub/other/src"));
        assert_eq!(names(&ws.members(&via_link).unwrap()), vec!["C.kt"]);

        // From beta itself, back is an ordinary directory link
        let direct = Resource::folder(temp.path().join("beta/src"));
        assert_eq!(names(&ws.members(&direct).unwrap()), vec!["C.kt", "back"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_members_keep_symlink_to_sibling() {
        let temp = tempdir().unwrap();
        create_workspace(temp.path());
        let shared = temp.path().join("beta/src");
        std::os::unix::fs::symlink(&shared, temp.path().join("alpha/shared")).unwrap();

        let ws = FsWorkspace::open(temp.path(), WorkspaceOptions::default()).unwrap();
        let alpha = Resource::project(temp.path().join("alpha"));
        let members = ws.members(&alpha).unwrap();

        assert_eq!(names(&members), vec!["shared", "src"]);
        assert!(members[0].is_folder());
    }

    #[test]
    fn test_open_nonexistent() {
        let result = FsWorkspace::open("/nonexistent/workspace", WorkspaceOptions::default());

        assert!(matches!(result, Err(ScanError::PathNotFound(_))));
    }
}
