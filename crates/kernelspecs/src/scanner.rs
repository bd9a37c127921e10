//! Directory scanner: turns a `kernels/` directory into kernel candidates.

use std::path::Path;

use crate::error::{KernelspecError, Result};
use crate::types::KernelInfo;

/// List the kernel candidates in `directory`.
///
/// Every immediate subdirectory (symlinks are followed) becomes a
/// [`KernelInfo`] named after the subdirectory.  Plain files and entries with
/// non UTF-8 names are skipped.  Results are sorted by name.
///
/// Fails with [`KernelspecError::Io`] when `directory` cannot be read; the
/// resolver treats that as "no candidates here".
pub async fn get_kernel_infos(directory: &Path) -> Result<Vec<KernelInfo>> {
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(|e| KernelspecError::io(directory, e))?;

    let mut infos = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| KernelspecError::io(directory, e))?
    {
        let path = entry.path();

        let Ok(name) = entry.file_name().into_string() else {
            tracing::trace!(path = %path.display(), "skipping non UTF-8 entry");
            continue;
        };

        // `metadata` follows symlinks, `DirEntry::file_type` does not.
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => infos.push(KernelInfo::new(name, path)),
            Ok(_) => {
                tracing::trace!(path = %path.display(), "not a directory, skipping");
            }
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "unreadable entry, skipping");
            }
        }
    }

    infos.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %directory.display(), count = infos.len(), "scanned kernels directory");
    Ok(infos)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
