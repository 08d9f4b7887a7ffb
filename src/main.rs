// Copyright (c) 2025 Sean McNamara <smcnam@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod cli;
mod commands;
mod config;
mod constants;
mod context;
mod git;
mod history;
mod llm;
mod logger;
mod parser;
mod prompts;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::cli::{Cli, Commands};
use crate::commands::RunOptions;
use crate::config::Config;
use crate::constants::{
    DEFAULT_HISTORY_FILE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_WORKSPACE,
};

fn main() -> Result<()> {
    // Handle Ctrl+C gracefully
    ctrlc::set_handler(|| {
        println!("\nInterrupted. Exiting.");
        std::process::exit(0);
    })
    .context("Error setting Ctrl-C handler")?;

    let cli = Cli::parse();

    // Load config from specified path or default codeloom.toml
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("codeloom.toml"));
    let config = Config::load(&config_path)?;

    let merged_model = config.merge_with_cli(
        cli.model.clone(),
        config.model.clone(),
        DEFAULT_MODEL.to_string(),
    );
    let merged_max_tokens =
        config.merge_with_cli(cli.max_tokens, config.max_tokens, DEFAULT_MAX_TOKENS);
    let merged_workspace = config.merge_with_cli(
        cli.workspace.clone(),
        config.workspace.clone(),
        DEFAULT_WORKSPACE.to_string(),
    );
    let merged_history_file = config.merge_with_cli(
        cli.history_file.clone(),
        config.history_file.clone(),
        DEFAULT_HISTORY_FILE.to_string(),
    );
    let merged_log_file =
        config.merge_with_cli(cli.log_file.clone(), config.log_file.clone().map(Some), None);

    let opts = RunOptions {
        model: merged_model,
        max_tokens: merged_max_tokens,
        workspace: PathBuf::from(merged_workspace),
        history_file: PathBuf::from(merged_history_file),
        log_file: merged_log_file,
    };

    match cli.command {
        None => commands::cmd_non_interactive(opts),
        Some(Commands::Interactive) => commands::cmd_interactive(opts),
        Some(Commands::Query {
            instruction,
            workspace,
        }) => commands::cmd_query(&instruction, &workspace, opts),
    }
}
