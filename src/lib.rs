// src/lib.rs

//! Repostage
//!
//! Filesystem-backed yum repository manager: enumerate the packages a
//! repository contains and propagate a package from one repository to
//! another, preserving the architecture-partitioned layout.
//!
//! # Layout
//!
//! `repository_root/{architecture}/{package_file}` — each repository root
//! holds one subdirectory per architecture (`x86_64`, `noarch`, ...) plus
//! the reserved `repodata` metadata directory, which is never treated as
//! an architecture.
//!
//! # Design
//!
//! - Enumeration is read-only and fresh on every call; nothing is cached
//! - Propagation checks every precondition before touching the filesystem,
//!   then performs a single relocation (atomic rename where possible,
//!   verified copy-then-delete across volumes, preferring a duplicated
//!   package over a lost one)
//! - Collaborators (path resolution, package validation) are injected
//!   through traits, not shared global state

pub mod content;
mod error;
pub mod fsops;
pub mod packages;
pub mod propagate;
pub mod resolver;

pub use content::{ContentEnumerator, PackageEntry, RepositoryListing};
pub use error::{Error, Result};
pub use propagate::Propagator;
pub use resolver::{PathResolver, StaticDirResolver};
