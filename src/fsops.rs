// src/fsops.rs

//! Filesystem relocation primitive
//!
//! `relocate` moves a file with rename-first semantics: an atomic
//! `fs::rename` within a volume, falling back to a verified copy-then-delete
//! when source and destination are on different volumes. The fallback writes
//! a temporary sibling of the destination, fsyncs it, verifies its SHA-256
//! digest against the source, renames it into place, and only then deletes
//! the source. A crash between that rename and the delete leaves a duplicate
//! of the package, never a loss.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suffix for in-flight copies during cross-volume relocation
const PARTIAL_SUFFIX: &str = ".part";

/// Move a file from `src` to `dst`, preserving content
pub fn relocate(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => {
            debug!("Renamed {} to {}", src.display(), dst.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!(
                "Rename of {} crosses devices, falling back to copy-then-delete",
                src.display()
            );
            copy_then_delete(src, dst)
        }
        Err(e) => Err(Error::RelocationFailed {
            from: src.to_path_buf(),
            to: dst.to_path_buf(),
            source: e,
        }),
    }
}

/// Cross-volume fallback: verified copy into place, then delete the source
fn copy_then_delete(src: &Path, dst: &Path) -> Result<()> {
    let tmp = partial_path(dst);

    let relocation_failed = |source: io::Error| Error::RelocationFailed {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    if let Err(e) = write_verified_copy(src, &tmp) {
        // Never leave a stray partial file behind on a failed copy.
        if let Err(cleanup) = fs::remove_file(&tmp)
            && cleanup.kind() != ErrorKind::NotFound
        {
            warn!("Failed to remove partial file {}: {}", tmp.display(), cleanup);
        }
        return Err(relocation_failed(e));
    }

    // The temp file is a sibling of the destination, so this rename stays on
    // one volume and is atomic: the package appears at the destination fully
    // written or not at all.
    fs::rename(&tmp, dst).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        relocation_failed(e)
    })?;

    // Source delete comes last. If it fails the package is duplicated, not
    // lost; the error carries both paths for manual reconciliation.
    fs::remove_file(src).map_err(relocation_failed)?;

    debug!("Copied {} to {} and removed source", src.display(), dst.display());
    Ok(())
}

/// Copy `src` to `tmp`, fsync, and verify the digest matches the source
fn write_verified_copy(src: &Path, tmp: &Path) -> io::Result<()> {
    fs::copy(src, tmp)?;

    let copy = File::open(tmp)?;
    copy.sync_all()?;

    let expected = sha256_digest(src)?;
    let actual = sha256_digest(tmp)?;
    if actual != expected {
        return Err(io::Error::other(format!(
            "copy verification failed: expected digest {}, got {}",
            expected, actual
        )));
    }

    Ok(())
}

fn partial_path(dst: &Path) -> PathBuf {
    let mut name = dst.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    dst.with_file_name(name)
}

/// Streaming SHA-256 digest of a file, as lowercase hex
fn sha256_digest(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
