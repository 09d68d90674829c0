// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pyhost run <name>` - Re-run a hosted script

use crate::adapters::make_runtime;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use pyhost_core::HostConfig;
use std::process::ExitCode;

#[derive(Args)]
pub struct RunArgs {
    /// Script name, with or without its extension (e.g. "hello" or "hello.py")
    pub name: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub async fn handle(args: RunArgs, host: HostConfig, identity: &str) -> Result<ExitCode> {
    let runtime = make_runtime(host, args.output);
    match runtime.rerun(identity, &args.name).await {
        Ok(result) => {
            output::print(&result, args.output)?;
            Ok(output::exit_code(&result))
        }
        Err(e) => super::refused(e),
    }
}
