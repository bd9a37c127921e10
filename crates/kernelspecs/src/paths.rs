//! Path providers: where kernelspecs may be installed.
//!
//! A [`PathProvider`] yields Jupyter data directories in priority order.
//! Each data directory may hold a `kernels/` subdirectory; the resolver takes
//! care of that suffix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::{DiscoveryConfig, SysPrefix};

/// Source of candidate data directories.
#[async_trait]
pub trait PathProvider: Send + Sync {
    /// Data directories, highest priority first.
    ///
    /// `with_sys_prefix` asks the provider to include the data directory of
    /// the active Python installation when it knows one.
    async fn data_dirs(&self, with_sys_prefix: bool) -> Vec<PathBuf>;
}

/// A fixed, caller-supplied list of data directories.
#[derive(Debug, Clone, Default)]
pub struct StaticPaths(pub Vec<PathBuf>);

impl StaticPaths {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(dirs.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PathProvider for StaticPaths {
    async fn data_dirs(&self, _with_sys_prefix: bool) -> Vec<PathBuf> {
        self.0.clone()
    }
}

/// Platform locations that do not come from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Default per-user data directory, if a home directory is known.
    pub user_data_dir: Option<PathBuf>,

    /// System-wide data directories, in priority order.
    pub system_data_dirs: Vec<PathBuf>,
}

impl PlatformDirs {
    /// Locations for the current platform and process environment.
    pub fn current() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Locations for the current platform, reading variables via `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        if cfg!(windows) {
            return Self {
                user_data_dir: get("APPDATA").map(|d| d.join("jupyter")),
                system_data_dirs: get("PROGRAMDATA")
                    .map(|d| vec![d.join("jupyter")])
                    .unwrap_or_default(),
            };
        }

        let home = get("HOME");
        let user_data_dir = if cfg!(target_os = "macos") {
            home.map(|h| h.join("Library").join("Jupyter"))
        } else {
            get("XDG_DATA_HOME")
                .or_else(|| home.map(|h| h.join(".local").join("share")))
                .map(|d| d.join("jupyter"))
        };

        Self {
            user_data_dir,
            system_data_dirs: vec![
                PathBuf::from("/usr/local/share/jupyter"),
                PathBuf::from("/usr/share/jupyter"),
            ],
        }
    }
}

/// The standard Jupyter data path search order.
///
/// 1. `jupyter_path` entries (`JUPYTER_PATH`)
/// 2. the user data directory (`JUPYTER_DATA_DIR` or the platform default)
/// 3. `<sys.prefix>/share/jupyter`, when requested and known
/// 4. system-wide directories
///
/// Later duplicates are dropped.
#[derive(Debug, Clone)]
pub struct JupyterPaths {
    config: DiscoveryConfig,
    platform: PlatformDirs,
}

impl JupyterPaths {
    /// Provider for `config` on the current platform.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self::with_platform(config, PlatformDirs::current())
    }

    pub fn with_platform(config: DiscoveryConfig, platform: PlatformDirs) -> Self {
        Self { config, platform }
    }

    /// The per-user data directory, if one can be determined.
    pub fn user_data_dir(&self) -> Option<&Path> {
        self.config
            .data_dir
            .as_deref()
            .or(self.platform.user_data_dir.as_deref())
    }

    async fn sys_prefix(&self) -> Option<PathBuf> {
        match &self.config.sys_prefix {
            SysPrefix::Fixed(prefix) => Some(prefix.clone()),
            SysPrefix::Detect => detect_sys_prefix().await,
            SysPrefix::Disabled => None,
        }
    }
}

#[async_trait]
impl PathProvider for JupyterPaths {
    async fn data_dirs(&self, with_sys_prefix: bool) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self.config.jupyter_path.clone();

        if let Some(user) = self.user_data_dir() {
            dirs.push(user.to_path_buf());
        }

        if with_sys_prefix {
            if let Some(prefix) = self.sys_prefix().await {
                dirs.push(prefix.join("share").join("jupyter"));
            }
        }

        dirs.extend(self.platform.system_data_dirs.iter().cloned());
        dedup_preserving_order(dirs)
    }
}

fn dedup_preserving_order(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !out.contains(&dir) {
            out.push(dir);
        }
    }
    out
}

/// Ask the Python interpreter on `PATH` for `sys.prefix`.
///
/// Tries `python3` then `python`.  Any failure yields `None`.
pub async fn detect_sys_prefix() -> Option<PathBuf> {
    for interpreter in ["python3", "python"] {
        let output = tokio::process::Command::new(interpreter)
            .args(["-c", "import sys; print(sys.prefix)"])
            .stdin(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                let prefix = String::from_utf8_lossy(&out.stdout).trim().to_owned();
                if !prefix.is_empty() {
                    tracing::debug!(interpreter, prefix = %prefix, "detected python sys.prefix");
                    return Some(PathBuf::from(prefix));
                }
            }
            Ok(out) => {
                tracing::trace!(interpreter, status = %out.status, "sys.prefix query failed");
            }
            Err(e) => {
                tracing::trace!(interpreter, error = %e, "python interpreter not available");
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
