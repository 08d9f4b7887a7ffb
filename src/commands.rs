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

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::history::HistoryStore;
use crate::llm::CompletionClient;
use crate::logger::Logger;
use crate::session::{Session, SessionOptions};

/// Options resolved from CLI flags and the config file.
pub struct RunOptions {
    pub model: String,
    pub max_tokens: u32,
    pub workspace: PathBuf,
    pub history_file: PathBuf,
    pub log_file: Option<String>,
}

fn build_session(opts: &RunOptions) -> Result<Session> {
    let client = CompletionClient::from_env()?;
    let history = HistoryStore::new(opts.history_file.clone());
    let options = SessionOptions {
        model: opts.model.clone(),
        max_tokens: opts.max_tokens,
        workspace: opts.workspace.clone(),
    };
    Ok(Session::new(client, history, options))
}

pub fn cmd_non_interactive(opts: RunOptions) -> Result<()> {
    let mut logger = Logger::new(opts.log_file.as_deref(), true);
    let session = build_session(&opts)?;
    session.run_non_interactive(&mut logger)
}

pub fn cmd_interactive(opts: RunOptions) -> Result<()> {
    let mut logger = Logger::new(opts.log_file.as_deref(), true);
    let session = build_session(&opts)?;
    session.run_interactive(&mut logger)
}

pub fn cmd_query(instruction: &str, workspace: &Path, opts: RunOptions) -> Result<()> {
    // Debug output stays off the console here: the caller consumes stdout
    // directly and only wants the completion.
    let mut logger = Logger::new(opts.log_file.as_deref(), false);
    let session = build_session(&opts)?;
    session.run_query(instruction, workspace, &mut logger)
}
