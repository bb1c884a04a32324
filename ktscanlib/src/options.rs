//! Input options for scanning a directory-backed workspace.

use serde::{Deserialize, Serialize};

use crate::source::filter::FilterConfig;

/// Directory names treated as derived (build output) and hidden from members.
pub const DEFAULT_DERIVED_DIRS: &[&str] = &["bin", "build", "out", "target"];

/// Marker file identifying a project directory.
pub const PROJECT_MARKER: &str = ".project";

/// Options controlling how a filesystem workspace is exposed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceOptions {
    /// Directory names omitted from member listings
    pub derived_dirs: Vec<String>,
    /// Only treat directories containing a `.project` file as projects
    pub require_project_marker: bool,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            derived_dirs: DEFAULT_DERIVED_DIRS.iter().map(|s| s.to_string()).collect(),
            require_project_marker: false,
        }
    }
}

impl WorkspaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: replace the derived directory names
    pub fn derived_dirs(mut self, names: Vec<String>) -> Self {
        self.derived_dirs = names;
        self
    }

    /// Builder: require a `.project` marker for projects
    pub fn require_project_marker(mut self, require: bool) -> Self {
        self.require_project_marker = require;
        self
    }

    /// Whether a member with this name is derived and should be hidden.
    pub fn is_derived(&self, name: &str, is_dir: bool) -> bool {
        name.starts_with('.') || (is_dir && self.derived_dirs.iter().any(|d| d == name))
    }
}

/// Everything needed to scan a directory-backed workspace.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// How the workspace tree is listed
    pub workspace: WorkspaceOptions,
    /// Which files count as Kotlin sources
    pub filter: FilterConfig,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set workspace listing options.
    pub fn workspace(mut self, workspace: WorkspaceOptions) -> Self {
        self.workspace = workspace;
        self
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_derived_dirs() {
        let opts = WorkspaceOptions::default();

        assert!(opts.is_derived("build", true));
        assert!(opts.is_derived("target", true));
        assert!(opts.is_derived(".gradle", true));
        assert!(opts.is_derived(".hidden.kt", false));
        assert!(!opts.is_derived("src", true));
        // Only directories are derived by name
        assert!(!opts.is_derived("build", false));
    }

    #[test]
    fn test_custom_derived_dirs() {
        let opts = WorkspaceOptions::new()
            .derived_dirs(vec!["gen".to_string()])
            .require_project_marker(true);

        assert!(opts.is_derived("gen", true));
        assert!(!opts.is_derived("build", true));
        assert!(opts.require_project_marker);
    }

    #[test]
    fn test_scan_options_builder() {
        let filter = FilterConfig::new().with_scripts();
        let opts = ScanOptions::new()
            .filter(filter)
            .workspace(WorkspaceOptions::new().require_project_marker(true));

        assert!(opts.filter.extensions.contains(&"kts".to_string()));
        assert!(opts.workspace.require_project_marker);
    }
}
