//! Resolver: find-all aggregation and single-name lookup.
//!
//! Both operations end in the same merge: every candidate is loaded
//! concurrently, failed candidates are dropped, and the surviving resources
//! are folded into a map where the first resource seen for a name wins.
//! Candidate order follows the provider's directory order, so the highest
//! priority data directory decides which duplicate installation is used.

use std::path::{Component, Path, PathBuf};

use futures::future::join_all;

use crate::config::DiscoveryConfig;
use crate::loader::get_kernel_resources;
use crate::paths::{JupyterPaths, PathProvider};
use crate::scanner::get_kernel_infos;
use crate::types::{KERNELS_SUBDIR, KernelInfo, KernelResource, KernelResources};

/// Discovers kernelspecs in the directories supplied by a [`PathProvider`].
#[derive(Debug, Clone)]
pub struct KernelspecResolver<P = JupyterPaths> {
    provider: P,
    with_sys_prefix: bool,
}

impl KernelspecResolver<JupyterPaths> {
    /// Resolver over the standard Jupyter search path described by `config`.
    pub fn from_config(config: DiscoveryConfig) -> Self {
        let with_sys_prefix = config.with_sys_prefix;
        Self::new(JupyterPaths::new(config)).with_sys_prefix(with_sys_prefix)
    }
}

impl<P: PathProvider> KernelspecResolver<P> {
    /// Create a resolver that asks `provider` for data directories including
    /// the Python prefix.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            with_sys_prefix: true,
        }
    }

    /// Set whether the provider is asked for the Python prefix directory.
    pub fn with_sys_prefix(mut self, with_sys_prefix: bool) -> Self {
        self.with_sys_prefix = with_sys_prefix;
        self
    }

    /// The data directories this resolver searches, in priority order.
    pub async fn data_dirs(&self) -> Vec<PathBuf> {
        self.provider.data_dirs(self.with_sys_prefix).await
    }

    /// Resolve one kernel by name.
    ///
    /// Looks only at `<data dir>/kernels/<name>` in each data directory; the
    /// `kernels` directories are not enumerated.  A kernel installed under a
    /// different directory name is therefore not found here even though
    /// [`find_all`](Self::find_all) lists it.
    ///
    /// Returns `None` when no data directory holds a loadable kernelspec under
    /// that name, or when `name` cannot be a single directory name.
    pub async fn find(&self, name: &str) -> Option<KernelResource> {
        if !is_valid_kernel_name(name) {
            tracing::debug!(name, "not a valid kernel directory name");
            return None;
        }

        let infos = self
            .data_dirs()
            .await
            .iter()
            .map(|dir| KernelInfo::new(name, dir.join(KERNELS_SUBDIR).join(name)))
            .collect();

        let found = extract_kernel_resources(infos).await.remove(name);
        if found.is_none() {
            tracing::debug!(name, "kernelspec not found");
        }
        found
    }

    /// Resolve every kernel installed in any data directory.
    ///
    /// Never fails: unreadable directories and broken kernelspecs are
    /// skipped.
    pub async fn find_all(&self) -> KernelResources {
        let dirs = self.data_dirs().await;

        let scans = dirs.iter().map(|dir| async move {
            let kernels_dir = dir.join(KERNELS_SUBDIR);
            match get_kernel_infos(&kernels_dir).await {
                Ok(infos) => infos,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping kernels directory");
                    Vec::new()
                }
            }
        });
        let infos: Vec<KernelInfo> = join_all(scans).await.into_iter().flatten().collect();

        let kernels = extract_kernel_resources(infos).await;
        tracing::debug!(
            dirs = dirs.len(),
            count = kernels.len(),
            "resolved kernelspecs"
        );
        kernels
    }
}

/// Load every candidate and merge the successes, first occurrence wins.
///
/// Loads run concurrently; the merge follows the order of `infos`.
pub async fn extract_kernel_resources(infos: Vec<KernelInfo>) -> KernelResources {
    let results = join_all(infos.iter().map(get_kernel_resources)).await;

    let resources = results.into_iter().filter_map(|result| match result {
        Ok(resource) => Some(resource),
        Err(e) => {
            tracing::debug!(error = %e, "skipping kernel candidate");
            None
        }
    });

    merge_first_seen(resources)
}

/// Fold resources into a map keeping the first resource for each name.
pub fn merge_first_seen<I>(resources: I) -> KernelResources
where
    I: IntoIterator<Item = KernelResource>,
{
    let mut kernels = KernelResources::new();
    for resource in resources {
        if let Some(existing) = kernels.get(&resource.name) {
            tracing::debug!(
                name = %resource.name,
                kept = %existing.resources_dir.display(),
                shadowed = %resource.resources_dir.display(),
                "duplicate kernelspec ignored"
            );
            continue;
        }
        kernels.insert(resource.name.clone(), resource);
    }
    kernels
}

/// Whether `name` can name exactly one subdirectory on this platform.
fn is_valid_kernel_name(name: &str) -> bool {
    // `components` drops trailing separators, so check for them separately.
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.chars().any(std::path::is_separator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
