//! File materialization: writes, subtree suppression, single-file pruning.
//!
//! Generation runs are not incremental; re-running regenerates everything,
//! so `write` always overwrites. Directory creation is the only implicit
//! ordering the materializer provides.

use std::io;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::Error;

/// Write rendered text to its final location, creating parent directories
/// as needed and overwriting any existing file.
pub async fn write(path: &Path, text: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| Error::write(parent, e))?;
    }
    fs::write(path, text).await.map_err(|e| Error::write(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "materialized file");
    Ok(())
}

/// Recursively delete a feature subtree from the target tree.
///
/// Succeeds silently when the subtree does not exist. Callers must let this
/// finish before spawning any writer into the same subtree.
pub async fn suppress(subtree: &Path) -> Result<(), Error> {
    match fs::remove_dir_all(subtree).await {
        Ok(()) => {
            debug!(path = %subtree.display(), "suppressed subtree");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::write(subtree, e)),
    }
}

/// Delete a single generated file.
///
/// Used by the write-then-prune rule for single-role messaging selection;
/// the file is expected to exist because it was just written.
pub async fn prune(path: &Path) -> Result<(), Error> {
    fs::remove_file(path).await.map_err(|e| Error::write(path, e))?;
    debug!(path = %path.display(), "pruned file");
    Ok(())
}
