// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pyhost - host and run scripts with their dependencies and secrets

mod adapters;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{list, run, upload};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::HostArgs;

#[derive(Parser)]
#[command(
    name = "pyhost",
    version,
    about = "pyhost - upload, run and re-run hosted scripts"
)]
struct Cli {
    #[command(flatten)]
    host: HostArgs,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a script (with optional requirements and .env) and run it
    Upload(upload::UploadArgs),
    /// Re-run a hosted script by name
    Run(run::RunArgs),
    /// List hosted scripts
    List(list::ListArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = setup_logging(cli.log_file.as_deref())?;

    let host = config::load(&cli.host)?;
    let identity = cli.host.identity(&host);
    tracing::debug!(identity, root = %host.root.display(), mode = host.mode.name(), "configured");

    match cli.command {
        Commands::Upload(args) => upload::handle(args, host, &identity).await,
        Commands::Run(args) => run::handle(args, host, &identity).await,
        Commands::List(args) => list::handle(args, host, &identity).await,
    }
}

/// Logs go to stderr (default level `warn`, override with `RUST_LOG`), and
/// additionally to `log_file` when given.
fn setup_logging(
    log_file: Option<&std::path::Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid log file path: {}", path.display()))?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(Some(guard))
}
