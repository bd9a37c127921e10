//! Error types for kernelspec discovery.
//!
//! Every failure that can happen while scanning or loading a single kernel
//! candidate is a [`KernelspecError`].  The resolver absorbs these per
//! candidate; they only reach callers who use the building blocks
//! ([`get_kernel_infos`](crate::get_kernel_infos),
//! [`get_kernel_resources`](crate::get_kernel_resources)) directly.

use std::path::PathBuf;

/// Kernelspec-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum KernelspecError {
    /// A directory or file could not be read (missing, permission denied, or
    /// removed while the scan was in progress).
    #[error("io error at `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The kernel directory has no `kernel.json`.
    #[error("kernel.json not found in `{dir}`")]
    DescriptorMissing { dir: PathBuf },

    /// `kernel.json` exists but is not valid JSON.
    #[error("invalid kernel.json at `{path}`: {source}")]
    DescriptorInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration in `{path}`: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl KernelspecError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KernelspecError>;
