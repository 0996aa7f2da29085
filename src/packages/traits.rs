// src/packages/traits.rs

//! Common traits for package format validators

use crate::error::Result;
use std::path::Path;

/// Metadata read from a successfully validated package payload
#[derive(Debug, Clone)]
pub struct ValidatedPackage {
    pub name: String,
    pub version: String,
    pub architecture: Option<String>,
}

/// Interface for package-format validation
///
/// Implementations open and parse the payload at the given path and fail
/// with [`crate::Error::InvalidPackage`] if it is not a well-formed package.
pub trait PackageValidator {
    fn validate(&self, path: &Path) -> Result<ValidatedPackage>;
}
