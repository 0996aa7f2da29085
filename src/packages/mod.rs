// src/packages/mod.rs

//! Package format validation for Repostage
//!
//! Propagation parses the package payload before any filesystem mutation;
//! a corrupt or truncated file never leaves its source repository.

pub mod rpm;
pub mod traits;

pub use rpm::RpmValidator;
pub use traits::{PackageValidator, ValidatedPackage};
