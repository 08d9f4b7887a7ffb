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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_HISTORY_FILE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_WORKSPACE,
};

#[derive(Parser)]
#[command(name = "codeloom")]
#[command(about = "LLM code helper: prompts with your workspace, writes the reply back to files")]
#[command(version)]
#[command(
    after_help = "Environment: ANTHROPIC_API_KEY is required; CODELOOM_TASK supplies the task for bare runs."
)]
pub struct Cli {
    /// Path to config file (defaults to codeloom.toml in current directory if it exists)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace directory serialized into the prompt
    #[arg(long, global = true, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    /// Completion model to request
    #[arg(long, global = true, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum tokens to sample per completion
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Path of the conversation history file
    #[arg(long, global = true, default_value = DEFAULT_HISTORY_FILE)]
    pub history_file: String,

    /// Log file path for session diagnostics
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// With no subcommand, one completion cycle is run from the task
    /// description environment variable.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read instructions from the terminal until the exit word; "PR" commits
    /// staged changes and pushes
    Interactive,

    /// Run one completion cycle with an explicit instruction and workspace
    Query {
        /// Instruction to send alongside the serialized workspace
        instruction: String,

        /// Workspace directory to serialize into the prompt
        #[arg(id = "query_workspace", value_name = "WORKSPACE")]
        workspace: PathBuf,
    },
}
