// src/resolver.rs

//! Resolution of logical repository names to physical root directories
//!
//! Components take a resolver as an explicit constructor argument rather than
//! sharing a mutable global service, so tests substitute their own
//! implementations without touching shared state.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Maps a logical repository name to the absolute path of its root directory
pub trait PathResolver {
    /// Resolve a repository name to its physical root directory
    ///
    /// Fails with [`Error::RepositoryNotFound`] if the name is unknown or
    /// malformed. Existence of the returned path is checked by the caller,
    /// which knows whether a missing root is a source or destination failure.
    fn resolve(&self, repository_name: &str) -> Result<PathBuf>;
}

/// Resolver for the static layout convention: one subdirectory per
/// repository under a fixed base directory
pub struct StaticDirResolver {
    base_dir: PathBuf,
}

impl StaticDirResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl PathResolver for StaticDirResolver {
    fn resolve(&self, repository_name: &str) -> Result<PathBuf> {
        // A repository name is a single path component; anything else could
        // escape the base directory.
        if repository_name.is_empty()
            || repository_name == "."
            || repository_name == ".."
            || repository_name.contains(std::path::is_separator)
        {
            return Err(Error::RepositoryNotFound {
                name: repository_name.to_string(),
            });
        }

        Ok(self.base_dir.join(repository_name))
    }
}
