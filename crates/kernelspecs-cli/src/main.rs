//! CLI entry point for kernelspec discovery.
//!
//! This binary provides the `kernelspecs` command with subcommands for
//! listing installed kernels, looking one up by name, and showing the
//! directories that are searched.

mod cli;
mod helpers;

use anyhow::{Context, Result, bail};
use clap::Parser;
use kernelspecs::KernelspecResolver;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::helpers::{format_kernel, format_table, init_tracing, load_config};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A missing `.env` is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config(cli.config.as_deref(), cli.no_sys_prefix)?;
    info!(?config, "configuration loaded");
    let resolver = KernelspecResolver::from_config(config);

    match cli.command {
        Commands::List { json } => cmd_list(&resolver, json).await,
        Commands::Find { name, json } => cmd_find(&resolver, &name, json).await,
        Commands::Paths => cmd_paths(&resolver).await,
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn cmd_list(resolver: &KernelspecResolver, json: bool) -> Result<()> {
    let kernels = resolver.find_all().await;
    info!(count = kernels.len(), "kernels discovered");

    if json {
        let text =
            serde_json::to_string_pretty(&kernels).context("failed to serialize kernels")?;
        println!("{text}");
    } else {
        print!("{}", format_table(&kernels));
    }
    Ok(())
}

async fn cmd_find(resolver: &KernelspecResolver, name: &str, json: bool) -> Result<()> {
    let Some(kernel) = resolver.find(name).await else {
        bail!("no kernel named `{name}` found");
    };

    if json {
        let text = serde_json::to_string_pretty(&kernel).context("failed to serialize kernel")?;
        println!("{text}");
    } else {
        print!("{}", format_kernel(&kernel));
    }
    Ok(())
}

async fn cmd_paths(resolver: &KernelspecResolver) -> Result<()> {
    for dir in resolver.data_dirs().await {
        let marker = if dir.join(kernelspecs::KERNELS_SUBDIR).is_dir() {
            ""
        } else {
            "  (no kernels/)"
        };
        println!("{}{marker}", dir.display());
    }
    Ok(())
}
