//! Discovery of installed Jupyter kernel specifications.
//!
//! This crate provides:
//!
//! - **Path providers** -- the ordered Jupyter data directories to search
//!   ([`JupyterPaths`]) or any fixed list ([`StaticPaths`]).
//!
//! - **Directory scanner** -- lists the kernel directories under a data
//!   directory's `kernels/` folder ([`get_kernel_infos`]).
//!
//! - **Resource loader** -- reads and parses a kernel's `kernel.json`
//!   ([`get_kernel_resources`]).
//!
//! - **Resolver** -- [`KernelspecResolver::find_all`] and
//!   [`KernelspecResolver::find`], merging results so the first data
//!   directory providing a kernel name wins.
//!
//! Broken or missing kernelspecs never make discovery fail; they are simply
//! left out of the result.
//!
//! # Example
//!
//! ```rust,no_run
//! use kernelspecs::{DiscoveryConfig, KernelspecResolver};
//!
//! # async fn run() {
//! let resolver = KernelspecResolver::from_config(DiscoveryConfig::from_env());
//!
//! for (name, kernel) in resolver.find_all().await {
//!     println!("{name}: {}", kernel.resources_dir.display());
//! }
//!
//! if let Some(python) = resolver.find("python3").await {
//!     println!("{:?}", python.display_name());
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod paths;
pub mod resolver;
pub mod scanner;
pub mod types;

pub use config::{DiscoveryConfig, SysPrefix};
pub use error::{KernelspecError, Result};
pub use loader::get_kernel_resources;
pub use paths::{JupyterPaths, PathProvider, PlatformDirs, StaticPaths, detect_sys_prefix};
pub use resolver::{KernelspecResolver, extract_kernel_resources, merge_first_seen};
pub use scanner::get_kernel_infos;
pub use types::{KERNEL_DESCRIPTOR, KERNELS_SUBDIR, KernelInfo, KernelResource, KernelResources};
