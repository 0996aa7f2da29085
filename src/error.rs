// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for Repostage
///
/// Every failure names the repository, package, or architecture involved so
/// an operator can tell which precondition or step failed.
#[derive(Error, Debug)]
pub enum Error {
    /// The path resolver does not know this repository name
    #[error("Repository '{name}' is not known to the path resolver")]
    RepositoryNotFound { name: String },

    /// The source repository root does not exist on disk
    #[error("Source repository '{name}' does not exist at {}", path.display())]
    SourceRepositoryNotFound { name: String, path: PathBuf },

    /// The destination repository root does not exist on disk
    #[error("Destination repository '{name}' does not exist at {}", path.display())]
    DestinationRepositoryNotFound { name: String, path: PathBuf },

    /// The package file is absent from the source architecture partition
    #[error("Package '{package}' not found in repository '{repository}' under architecture '{architecture}'")]
    PackageNotFound {
        package: String,
        repository: String,
        architecture: String,
    },

    /// The destination has no partition for this architecture
    ///
    /// Partitions are provisioned externally; propagation never creates them.
    #[error("Repository '{repository}' has no architecture partition '{architecture}' at {}", path.display())]
    DestinationArchitectureNotFound {
        repository: String,
        architecture: String,
        path: PathBuf,
    },

    /// A package with the same file name already exists at the destination
    #[error("Package '{package}' already exists in repository '{repository}' under architecture '{architecture}'")]
    DestinationPackageAlreadyExists {
        package: String,
        repository: String,
        architecture: String,
    },

    /// The package payload is not a well-formed package
    #[error("Invalid package at {}: {reason}", path.display())]
    InvalidPackage { path: PathBuf, reason: String },

    /// The repository root could not be listed
    #[error("Repository directory {} could not be read", path.display())]
    RepositoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The relocation step itself failed
    ///
    /// Reports both paths touched so partial state can be reconciled by hand.
    #[error("Failed to relocate package from {} to {}", from.display(), to.display())]
    RelocationFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using Repostage's Error type
pub type Result<T> = std::result::Result<T, Error>;
