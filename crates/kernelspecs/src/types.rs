//! Kernelspec type definitions.
//!
//! A kernelspec is a directory named after the kernel that holds a
//! `kernel.json` descriptor plus any supporting resources (logos, helper
//! scripts).  Discovery produces a [`KernelInfo`] per candidate directory and
//! a [`KernelResource`] per candidate whose descriptor parses.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// File name of the kernel descriptor inside a kernel's resource directory.
pub const KERNEL_DESCRIPTOR: &str = "kernel.json";

/// Name of the subdirectory of a data directory that holds kernelspecs.
pub const KERNELS_SUBDIR: &str = "kernels";

/// A candidate kernel: a name and the directory expected to describe it.
///
/// Only lives for the duration of one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelInfo {
    /// Kernel name (the directory name, or the requested name for lookups).
    pub name: String,

    /// Directory that should contain `kernel.json`.
    pub resource_dir: PathBuf,
}

impl KernelInfo {
    pub fn new(name: impl Into<String>, resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            resource_dir: resource_dir.into(),
        }
    }
}

/// A resolved, usable kernelspec.
///
/// Serializes to the same shape the Jupyter kernelspecs API returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KernelResource {
    /// Kernel name.
    pub name: String,

    /// Every entry of the resource directory as an absolute path, sorted by
    /// file name.  Always includes the descriptor itself.
    pub files: Vec<PathBuf>,

    /// The kernel's resource directory.
    pub resources_dir: PathBuf,

    /// The parsed `kernel.json`, uninterpreted.
    pub spec: serde_json::Value,
}

impl KernelResource {
    /// The descriptor's `display_name`, if present and a string.
    pub fn display_name(&self) -> Option<&str> {
        self.spec_str("display_name")
    }

    /// The descriptor's `language`, if present and a string.
    pub fn language(&self) -> Option<&str> {
        self.spec_str("language")
    }

    fn spec_str(&self, key: &str) -> Option<&str> {
        self.spec.get(key).and_then(|v| v.as_str())
    }
}

/// Resolved kernels keyed by name.
pub type KernelResources = BTreeMap<String, KernelResource>;
