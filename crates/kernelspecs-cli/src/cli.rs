//! CLI argument definitions for `kernelspecs`.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// kernelspecs -- list and locate installed Jupyter kernels.
#[derive(Parser)]
#[command(
    name = "kernelspecs",
    version,
    about = "List and locate installed Jupyter kernel specifications",
    long_about = "Searches the Jupyter data directories (JUPYTER_PATH, the user data \
                  directory, the Python prefix and system locations) for kernels/<name>/kernel.json."
)]
pub struct Cli {
    /// TOML configuration file with a `[paths]` table.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Do not search the Python `sys.prefix` data directory.
    #[arg(long, global = true)]
    pub no_sys_prefix: bool,

    /// Default log level when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every installed kernel.
    List {
        /// Print the full resources map as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one kernel by name.
    Find {
        /// Kernel name (its directory name under `kernels/`).
        name: String,

        /// Print the resource as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the data directories that are searched, highest priority first.
    Paths,
}
