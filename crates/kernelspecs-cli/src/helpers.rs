//! Shared helpers for the `kernelspecs` binary.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use kernelspecs::{DiscoveryConfig, KernelResource, KernelResources};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.  Logs go to stderr so
/// that stdout only carries command output.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Build the discovery configuration: file (if any), then environment.
pub fn load_config(path: Option<&Path>, no_sys_prefix: bool) -> Result<DiscoveryConfig> {
    let base = match path {
        Some(path) => DiscoveryConfig::load(path)
            .with_context(|| format!("failed to load config `{}`", path.display()))?,
        None => DiscoveryConfig::default(),
    };

    let mut config = base.with_env(|key| std::env::var(key).ok());
    if no_sys_prefix {
        config.with_sys_prefix = false;
    }
    Ok(config)
}

/// Render kernels as an aligned plain-text table.
pub fn format_table(kernels: &KernelResources) -> String {
    if kernels.is_empty() {
        return "No kernels found.\n".to_owned();
    }

    let name_width = kernels.keys().map(|n| n.len()).max().unwrap_or(0).max(4);
    let display_width = kernels
        .values()
        .map(|k| k.display_name().unwrap_or("-").len())
        .max()
        .unwrap_or(0)
        .max(12);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<display_width$}  {:<10}  RESOURCES",
        "NAME", "DISPLAY NAME", "LANGUAGE"
    );
    for (name, kernel) in kernels {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<display_width$}  {:<10}  {}",
            name,
            kernel.display_name().unwrap_or("-"),
            kernel.language().unwrap_or("-"),
            kernel.resources_dir.display()
        );
    }
    out
}

/// Render one kernel as `key: value` lines.
pub fn format_kernel(kernel: &KernelResource) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:          {}", kernel.name);
    let _ = writeln!(
        out,
        "display name:  {}",
        kernel.display_name().unwrap_or("-")
    );
    let _ = writeln!(out, "language:      {}", kernel.language().unwrap_or("-"));
    let _ = writeln!(out, "resources:     {}", kernel.resources_dir.display());
    let _ = writeln!(out, "files:");
    for file in &kernel.files {
        let _ = writeln!(out, "  {}", file.display());
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
