//! Compatibility predicates: which resources are Kotlin sources to track.
//!
//! The scanner never decides this itself. It asks a [`CompatibilityPredicate`],
//! and [`FilterConfig`] is the glob-configurable Kotlin implementation.

use std::path::Path;

use glob::Pattern;

use crate::error::ScanError;
use crate::source::resource::Resource;
use crate::Result;

/// Extension of Kotlin source files.
pub const KOTLIN_EXTENSION: &str = "kt";

/// Extension of Kotlin script files.
pub const KOTLIN_SCRIPT_EXTENSION: &str = "kts";

/// Decides whether a resource is a source file the manager should track.
pub trait CompatibilityPredicate {
    fn is_compatible(&self, resource: &Resource) -> bool;
}

impl<F> CompatibilityPredicate for F
where
    F: Fn(&Resource) -> bool,
{
    fn is_compatible(&self, resource: &Resource) -> bool {
        self(resource)
    }
}

/// Configuration for matching Kotlin source files.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Accepted file extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Glob patterns to include (if empty, include every matching extension)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec![KOTLIN_EXTENSION.to_string()],
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Create a new filter config matching all `.kt` files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept Kotlin scripts (`.kts`).
    pub fn with_scripts(mut self) -> Self {
        if !self.extensions.iter().any(|e| e == KOTLIN_SCRIPT_EXTENSION) {
            self.extensions.push(KOTLIN_SCRIPT_EXTENSION.to_string());
        }
        self
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. Its extension is one of the configured extensions
    /// 2. It doesn't match any exclude pattern
    /// 3. It matches at least one include pattern (or include is empty)
    pub fn matches(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| ext == e.as_str()));
        if !has_extension {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

impl CompatibilityPredicate for FilterConfig {
    /// Only files can be Kotlin sources; folders named `foo.kt` are not.
    fn is_compatible(&self, resource: &Resource) -> bool {
        resource.is_file() && self.matches(resource.path())
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| ScanError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
