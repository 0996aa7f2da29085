// src/propagate.rs

//! Propagation of a single package between repositories
//!
//! Moves one package file from its architecture partition under a source
//! repository to the same partition under a destination repository,
//! preserving the file name. All preconditions are checked before anything
//! is touched: propagation either passes every check and performs a single
//! relocation, or mutates nothing.

use crate::error::{Error, Result};
use crate::fsops;
use crate::packages::PackageValidator;
use crate::resolver::PathResolver;
use std::path::PathBuf;
use tracing::{debug, info};

/// Moves a package from one repository's architecture partition to another's
pub struct Propagator<'a> {
    resolver: &'a dyn PathResolver,
    validator: &'a dyn PackageValidator,
    overwrite: bool,
}

impl<'a> Propagator<'a> {
    pub fn new(resolver: &'a dyn PathResolver, validator: &'a dyn PackageValidator) -> Self {
        Self {
            resolver,
            validator,
            overwrite: false,
        }
    }

    /// Allow replacing an existing destination package
    ///
    /// Off by default: a name collision at the destination is refused with
    /// [`Error::DestinationPackageAlreadyExists`] rather than overwritten.
    pub fn allow_overwrite(mut self, allow: bool) -> Self {
        self.overwrite = allow;
        self
    }

    /// Propagate `package_name` from the source repository to the
    /// destination repository under the given architecture
    ///
    /// Returns the unchanged package file name on success: the package is
    /// then present at the destination and absent from the source.
    ///
    /// Two concurrent calls for the same (repository, architecture, package)
    /// triple race at the filesystem layer; callers must serialize them with
    /// an external per-package lock. Repository metadata (repodata) is not
    /// regenerated here; the caller triggers that after a successful move.
    pub fn propagate(
        &self,
        package_name: &str,
        source_repository: &str,
        destination_repository: &str,
        architecture: &str,
    ) -> Result<String> {
        info!(
            "Propagating '{}' ({}) from '{}' to '{}'",
            package_name, architecture, source_repository, destination_repository
        );

        let source_root = self.repository_root(source_repository, RepositoryRole::Source)?;
        let destination_root =
            self.repository_root(destination_repository, RepositoryRole::Destination)?;

        let source_path = source_root.join(architecture).join(package_name);
        if !source_path.is_file() {
            return Err(Error::PackageNotFound {
                package: package_name.to_string(),
                repository: source_repository.to_string(),
                architecture: architecture.to_string(),
            });
        }

        // Destination partitions are provisioned externally; a missing one
        // is a configuration error, not something to repair here.
        let destination_dir = destination_root.join(architecture);
        if !destination_dir.is_dir() {
            return Err(Error::DestinationArchitectureNotFound {
                repository: destination_repository.to_string(),
                architecture: architecture.to_string(),
                path: destination_dir,
            });
        }

        let destination_path = destination_dir.join(package_name);
        if destination_path.exists() && !self.overwrite {
            return Err(Error::DestinationPackageAlreadyExists {
                package: package_name.to_string(),
                repository: destination_repository.to_string(),
                architecture: architecture.to_string(),
            });
        }

        // Last guard before mutation: refuse to move a corrupt payload.
        let package = self.validator.validate(&source_path)?;
        debug!(
            "Payload is a well-formed package: {} {}",
            package.name, package.version
        );

        fsops::relocate(&source_path, &destination_path)?;

        info!(
            "Propagated '{}' to {}",
            package_name,
            destination_path.display()
        );
        Ok(package_name.to_string())
    }

    fn repository_root(&self, name: &str, role: RepositoryRole) -> Result<PathBuf> {
        let root = self.resolver.resolve(name)?;
        if root.is_dir() {
            return Ok(root);
        }
        Err(match role {
            RepositoryRole::Source => Error::SourceRepositoryNotFound {
                name: name.to_string(),
                path: root,
            },
            RepositoryRole::Destination => Error::DestinationRepositoryNotFound {
                name: name.to_string(),
                path: root,
            },
        })
    }
}

#[derive(Clone, Copy)]
enum RepositoryRole {
    Source,
    Destination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::ValidatedPackage;
    use crate::resolver::StaticDirResolver;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    struct PermissiveValidator;

    impl PackageValidator for PermissiveValidator {
        fn validate(&self, _path: &Path) -> Result<ValidatedPackage> {
            Ok(ValidatedPackage {
                name: "pkg".to_string(),
                version: "1.0".to_string(),
                architecture: Some("x86_64".to_string()),
            })
        }
    }

    struct RejectingValidator;

    impl PackageValidator for RejectingValidator {
        fn validate(&self, path: &Path) -> Result<ValidatedPackage> {
            Err(Error::InvalidPackage {
                path: path.to_path_buf(),
                reason: "rejected by test validator".to_string(),
            })
        }
    }

    /// Two repositories under one base dir, each with an x86_64 partition,
    /// and pkg-1.0.rpm present in the source.
    fn fixture() -> (TempDir, StaticDirResolver) {
        let base = tempfile::tempdir().unwrap();
        for repo in ["source-repo", "dest-repo"] {
            fs::create_dir_all(base.path().join(repo).join("x86_64")).unwrap();
        }
        let mut pkg =
            File::create(base.path().join("source-repo/x86_64/pkg-1.0.rpm")).unwrap();
        pkg.write_all(b"package payload").unwrap();

        let resolver = StaticDirResolver::new(base.path());
        (base, resolver)
    }

    #[test]
    fn test_returns_unchanged_package_name() {
        let (_base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);

        let name = propagator
            .propagate("pkg-1.0.rpm", "source-repo", "dest-repo", "x86_64")
            .unwrap();
        assert_eq!(name, "pkg-1.0.rpm");
    }

    #[test]
    fn test_moves_not_copies() {
        let (base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);

        propagator
            .propagate("pkg-1.0.rpm", "source-repo", "dest-repo", "x86_64")
            .unwrap();

        assert!(!base.path().join("source-repo/x86_64/pkg-1.0.rpm").exists());
        assert_eq!(
            fs::read(base.path().join("dest-repo/x86_64/pkg-1.0.rpm")).unwrap(),
            b"package payload"
        );
    }

    #[test]
    fn test_missing_source_repository() {
        let (_base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);

        let result = propagator.propagate("pkg-1.0.rpm", "no-such-repo", "dest-repo", "x86_64");
        assert!(matches!(
            result,
            Err(Error::SourceRepositoryNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_destination_repository() {
        let (_base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);

        let result =
            propagator.propagate("pkg-1.0.rpm", "source-repo", "no-such-repo", "x86_64");
        assert!(matches!(
            result,
            Err(Error::DestinationRepositoryNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_package_fails_closed() {
        let (base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);

        let result = propagator.propagate("ghost.rpm", "source-repo", "dest-repo", "x86_64");
        assert!(matches!(result, Err(Error::PackageNotFound { .. })));

        // Nothing was touched.
        assert!(base.path().join("source-repo/x86_64/pkg-1.0.rpm").exists());
        assert!(!base.path().join("dest-repo/x86_64/ghost.rpm").exists());
    }

    #[test]
    fn test_missing_destination_partition_is_not_created() {
        let (base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);
        fs::create_dir_all(base.path().join("source-repo/noarch")).unwrap();
        File::create(base.path().join("source-repo/noarch/pkg-2.0.rpm")).unwrap();

        let result = propagator.propagate("pkg-2.0.rpm", "source-repo", "dest-repo", "noarch");
        assert!(matches!(
            result,
            Err(Error::DestinationArchitectureNotFound { .. })
        ));
        assert!(!base.path().join("dest-repo/noarch").exists());
        assert!(base.path().join("source-repo/noarch/pkg-2.0.rpm").exists());
    }

    #[test]
    fn test_destination_collision_refused_by_default() {
        let (base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator);
        let mut existing =
            File::create(base.path().join("dest-repo/x86_64/pkg-1.0.rpm")).unwrap();
        existing.write_all(b"already here").unwrap();

        let result = propagator.propagate("pkg-1.0.rpm", "source-repo", "dest-repo", "x86_64");
        assert!(matches!(
            result,
            Err(Error::DestinationPackageAlreadyExists { .. })
        ));

        // Source untouched, destination content unchanged.
        assert!(base.path().join("source-repo/x86_64/pkg-1.0.rpm").exists());
        assert_eq!(
            fs::read(base.path().join("dest-repo/x86_64/pkg-1.0.rpm")).unwrap(),
            b"already here"
        );
    }

    #[test]
    fn test_destination_collision_allowed_with_overwrite() {
        let (base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &PermissiveValidator).allow_overwrite(true);
        File::create(base.path().join("dest-repo/x86_64/pkg-1.0.rpm")).unwrap();

        propagator
            .propagate("pkg-1.0.rpm", "source-repo", "dest-repo", "x86_64")
            .unwrap();

        assert!(!base.path().join("source-repo/x86_64/pkg-1.0.rpm").exists());
        assert_eq!(
            fs::read(base.path().join("dest-repo/x86_64/pkg-1.0.rpm")).unwrap(),
            b"package payload"
        );
    }

    #[test]
    fn test_invalid_payload_aborts_before_mutation() {
        let (base, resolver) = fixture();
        let propagator = Propagator::new(&resolver, &RejectingValidator);

        let result = propagator.propagate("pkg-1.0.rpm", "source-repo", "dest-repo", "x86_64");
        assert!(matches!(result, Err(Error::InvalidPackage { .. })));

        assert!(base.path().join("source-repo/x86_64/pkg-1.0.rpm").exists());
        assert!(!base.path().join("dest-repo/x86_64/pkg-1.0.rpm").exists());
    }
}
