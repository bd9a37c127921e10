//! Resource loader: reads a candidate's `kernel.json` into a
//! [`KernelResource`].

use crate::error::{KernelspecError, Result};
use crate::types::{KERNEL_DESCRIPTOR, KernelInfo, KernelResource};

/// Load the kernel resources for one candidate.
///
/// The candidate directory must contain an entry named exactly
/// `kernel.json`.  Its contents are parsed as JSON but not validated against
/// any schema.  The returned `files` list holds every entry of the directory,
/// not just the descriptor.
///
/// # Errors
///
/// - [`KernelspecError::Io`] if the directory or descriptor cannot be read.
/// - [`KernelspecError::DescriptorMissing`] if there is no `kernel.json`.
/// - [`KernelspecError::DescriptorInvalid`] if `kernel.json` is not JSON.
pub async fn get_kernel_resources(info: &KernelInfo) -> Result<KernelResource> {
    let dir = &info.resource_dir;
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| KernelspecError::io(dir, e))?;

    let mut file_names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| KernelspecError::io(dir, e))?
    {
        file_names.push(entry.file_name());
    }

    if !file_names.iter().any(|n| n == KERNEL_DESCRIPTOR) {
        return Err(KernelspecError::DescriptorMissing { dir: dir.clone() });
    }

    let descriptor = dir.join(KERNEL_DESCRIPTOR);
    let data = tokio::fs::read(&descriptor)
        .await
        .map_err(|e| KernelspecError::io(&descriptor, e))?;
    let spec: serde_json::Value =
        serde_json::from_slice(&data).map_err(|source| KernelspecError::DescriptorInvalid {
            path: descriptor.clone(),
            source,
        })?;

    // Relative data directories (e.g. from JUPYTER_PATH) resolve against the cwd.
    let resources_dir = std::path::absolute(dir).unwrap_or_else(|_| dir.clone());
    file_names.sort();
    let files = file_names.iter().map(|n| resources_dir.join(n)).collect();

    Ok(KernelResource {
        name: info.name.clone(),
        files,
        resources_dir,
        spec,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
