//! Discovery configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables.  The TOML file uses a single `[paths]` table:
//!
//! ```toml
//! [paths]
//! jupyter_path = ["/opt/kernels/share/jupyter"]
//! data_dir = "/home/me/.local/share/jupyter"
//! sys_prefix = "/opt/conda"      # or "detect" / "none"
//! with_sys_prefix = true
//! ```
//!
//! Recognised environment variables are `JUPYTER_PATH`, `JUPYTER_DATA_DIR`
//! and `KERNELSPECS_SYS_PREFIX`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{KernelspecError, Result};

/// Extra data directories searched before all others.
pub const ENV_JUPYTER_PATH: &str = "JUPYTER_PATH";
/// Overrides the per-user data directory.
pub const ENV_JUPYTER_DATA_DIR: &str = "JUPYTER_DATA_DIR";
/// Python prefix whose `share/jupyter` is searched (`detect`, `none`, or a path).
pub const ENV_SYS_PREFIX: &str = "KERNELSPECS_SYS_PREFIX";

/// How the Python `sys.prefix` data directory is located.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SysPrefix {
    /// Ask the Python interpreter on `PATH`.
    #[default]
    Detect,
    /// Use this prefix.
    Fixed(PathBuf),
    /// Never include a prefix directory.
    Disabled,
}

impl SysPrefix {
    /// Parse a config / environment value.
    ///
    /// `detect` selects detection, `none` or an empty value disables the
    /// prefix, anything else is taken as a path.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "detect" => Self::Detect,
            "" | "none" => Self::Disabled,
            other => Self::Fixed(PathBuf::from(other)),
        }
    }
}

/// Where and how to look for kernelspecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Directories searched first, in order.
    pub jupyter_path: Vec<PathBuf>,

    /// Per-user data directory override.  `None` uses the platform default.
    pub data_dir: Option<PathBuf>,

    /// Python prefix handling.
    pub sys_prefix: SysPrefix,

    /// Whether lookups include the `sys.prefix` data directory.
    pub with_sys_prefix: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            jupyter_path: Vec::new(),
            data_dir: None,
            sys_prefix: SysPrefix::Detect,
            with_sys_prefix: true,
        }
    }
}

impl DiscoveryConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Load a TOML file on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KernelspecError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Parse TOML content on top of the defaults.
    ///
    /// `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let file: FileConfig = toml::from_str(content).map_err(|e| KernelspecError::Config {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::default();
        let paths = file.paths;
        if let Some(jupyter_path) = paths.jupyter_path {
            config.jupyter_path = jupyter_path;
        }
        if paths.data_dir.is_some() {
            config.data_dir = paths.data_dir;
        }
        if let Some(prefix) = paths.sys_prefix {
            config.sys_prefix = SysPrefix::parse(&prefix);
        }
        if let Some(with_sys_prefix) = paths.with_sys_prefix {
            config.with_sys_prefix = with_sys_prefix;
        }
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Empty variables are treated as unset.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(value) = get(ENV_JUPYTER_PATH) {
            self.jupyter_path = std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        if let Some(value) = get(ENV_JUPYTER_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = get(ENV_SYS_PREFIX) {
            self.sys_prefix = SysPrefix::parse(&value);
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    paths: PathsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathsSection {
    jupyter_path: Option<Vec<PathBuf>>,
    data_dir: Option<PathBuf>,
    sys_prefix: Option<String>,
    with_sys_prefix: Option<bool>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
