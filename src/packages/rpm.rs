// src/packages/rpm.rs

//! RPM package format validation

use crate::error::{Error, Result};
use crate::packages::traits::{PackageValidator, ValidatedPackage};
use rpm::Package;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Validator that parses payloads as RPM packages
#[derive(Debug, Default, Clone, Copy)]
pub struct RpmValidator;

impl RpmValidator {
    pub fn new() -> Self {
        Self
    }
}

impl PackageValidator for RpmValidator {
    fn validate(&self, path: &Path) -> Result<ValidatedPackage> {
        debug!("Validating RPM package: {}", path.display());

        let file = File::open(path).map_err(|e| Error::InvalidPackage {
            path: path.to_path_buf(),
            reason: format!("failed to open payload: {}", e),
        })?;

        let mut buf_reader = BufReader::new(file);

        let pkg = Package::parse(&mut buf_reader).map_err(|e| Error::InvalidPackage {
            path: path.to_path_buf(),
            reason: format!("failed to parse RPM: {}", e),
        })?;

        let name = pkg
            .metadata
            .get_name()
            .map_err(|e| Error::InvalidPackage {
                path: path.to_path_buf(),
                reason: format!("failed to read package name: {}", e),
            })?
            .to_string();

        let version = pkg
            .metadata
            .get_version()
            .map_err(|e| Error::InvalidPackage {
                path: path.to_path_buf(),
                reason: format!("failed to read package version: {}", e),
            })?
            .to_string();

        let architecture = pkg.metadata.get_arch().ok().map(|s| s.to_string());

        debug!(
            "Validated RPM: {} version {} ({})",
            name,
            version,
            architecture.as_deref().unwrap_or("noarch")
        );

        Ok(ValidatedPackage {
            name,
            version,
            architecture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_package_validator_trait_implemented() {
        fn assert_implements_package_validator<T: PackageValidator>() {}
        assert_implements_package_validator::<RpmValidator>();
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let result = RpmValidator::new().validate(Path::new("/nonexistent/file.rpm"));
        assert!(matches!(result, Err(Error::InvalidPackage { .. })));
    }

    #[test]
    fn test_validate_garbage_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.rpm");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"this is not an rpm package").unwrap();

        let result = RpmValidator::new().validate(&path);
        assert!(matches!(result, Err(Error::InvalidPackage { .. })));
    }

    #[test]
    fn test_invalid_package_error_names_the_path() {
        let err = RpmValidator::new()
            .validate(Path::new("/nonexistent/file.rpm"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/file.rpm"));
    }
}
