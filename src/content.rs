// src/content.rs

//! Read-only enumeration of repository contents
//!
//! A repository root contains one subdirectory per architecture plus the
//! reserved `repodata` metadata directory. Enumeration reads the directory
//! tree fresh on every call; nothing is cached between calls.

use crate::error::{Error, Result};
use crate::resolver::PathResolver;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Reserved metadata directory, never an architecture partition
pub const REPODATA_DIR: &str = "repodata";

/// A single package found during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Name of the architecture partition the package lives in
    pub architecture: String,
    /// Absolute path of the package file
    pub path: PathBuf,
}

/// An architecture partition that could not be listed
#[derive(Debug)]
pub struct PartitionFailure {
    pub architecture: String,
    pub reason: std::io::Error,
}

/// Result of enumerating one repository
///
/// Enumeration is best-effort: partitions that fail to list are reported in
/// `failed_partitions` rather than aborting the partitions that did list,
/// and are never silently omitted.
#[derive(Debug, Default)]
pub struct RepositoryListing {
    pub packages: Vec<PackageEntry>,
    pub failed_partitions: Vec<PartitionFailure>,
}

impl RepositoryListing {
    pub fn is_complete(&self) -> bool {
        self.failed_partitions.is_empty()
    }
}

/// Walks a repository's directory tree and produces the set of
/// (architecture, package path) pairs it contains
pub struct ContentEnumerator<'a> {
    resolver: &'a dyn PathResolver,
}

impl<'a> ContentEnumerator<'a> {
    pub fn new(resolver: &'a dyn PathResolver) -> Self {
        Self { resolver }
    }

    /// List every package in the repository, grouped by architecture
    ///
    /// Reads one level below each architecture partition; an entry inside a
    /// partition that is itself a directory is included as-is by path. No
    /// ordering guarantee is made; callers requiring determinism must sort.
    pub fn list_packages(&self, repository_name: &str) -> Result<RepositoryListing> {
        let root = self.resolver.resolve(repository_name)?;

        if !root.is_dir() {
            return Err(Error::RepositoryNotFound {
                name: repository_name.to_string(),
            });
        }

        let entries = fs::read_dir(&root).map_err(|e| Error::RepositoryUnreadable {
            path: root.clone(),
            source: e,
        })?;

        let mut listing = RepositoryListing::default();

        for entry in entries {
            let entry = entry.map_err(|e| Error::RepositoryUnreadable {
                path: root.clone(),
                source: e,
            })?;

            let architecture = entry.file_name().to_string_lossy().to_string();
            if architecture == REPODATA_DIR {
                continue;
            }

            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                // Stray files directly under the root are not partitions.
                continue;
            }

            match fs::read_dir(entry.path()) {
                Ok(packages) => {
                    for package in packages {
                        match package {
                            Ok(package) => listing.packages.push(PackageEntry {
                                architecture: architecture.clone(),
                                path: package.path(),
                            }),
                            Err(e) => {
                                warn!(
                                    "Failed to read an entry in partition '{}': {}",
                                    architecture, e
                                );
                                listing.failed_partitions.push(PartitionFailure {
                                    architecture: architecture.clone(),
                                    reason: e,
                                });
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to list partition '{}': {}", architecture, e);
                    listing.failed_partitions.push(PartitionFailure {
                        architecture,
                        reason: e,
                    });
                }
            }
        }

        debug!(
            "Enumerated repository '{}': {} packages, {} failed partitions",
            repository_name,
            listing.packages.len(),
            listing.failed_partitions.len()
        );

        Ok(listing)
    }
}
