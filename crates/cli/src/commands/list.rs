// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pyhost list` - List hosted scripts

use crate::adapters::make_runtime;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use pyhost_core::HostConfig;
use std::process::ExitCode;

#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub async fn handle(args: ListArgs, host: HostConfig, identity: &str) -> Result<ExitCode> {
    let runtime = make_runtime(host, args.output);
    match runtime.list(identity).await {
        Ok(names) => {
            output::print(&names, args.output)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => super::refused(e),
    }
}
