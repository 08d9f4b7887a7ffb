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

//! Completion orchestration: prompt assembly, the service call, and the
//! write-back of the response.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants::{
    ASSISTANT_TURN, HUMAN_TURN, INTERACTIVE_EXIT_WORD, PR_KEYWORD, TASK_ENV,
};
use crate::context::build_code_context;
use crate::git;
use crate::history::HistoryStore;
use crate::llm::{CompletionClient, UsageEstimate};
use crate::logger::Logger;
use crate::parser::{parse_file_blocks, write_blocks};
use crate::prompts;

/// Sampling and workspace settings resolved from CLI and config.
pub struct SessionOptions {
    pub model: String,
    pub max_tokens: u32,
    pub workspace: PathBuf,
}

/// One orchestration session over a workspace.
pub struct Session {
    client: CompletionClient,
    history: HistoryStore,
    options: SessionOptions,
}

impl Session {
    pub fn new(client: CompletionClient, history: HistoryStore, options: SessionOptions) -> Self {
        Self {
            client,
            history,
            options,
        }
    }

    /// One cycle driven by the task description environment variable, with
    /// no prior history.
    pub fn run_non_interactive(&self, logger: &mut Logger) -> Result<()> {
        let task = env::var(TASK_ENV).map_err(|_| {
            anyhow!(
                "The {} environment variable must be set for non-interactive runs",
                TASK_ENV
            )
        })?;

        let instruction = prompts::render_user_turn(&task);
        self.completion_cycle("", &instruction, &self.options.workspace, logger)
    }

    /// Read loop over terminal input. The exit word ends the loop; the PR
    /// keyword asks for a commit title, hands off to the git collaborator,
    /// and ends the loop; anything else is an instruction for one cycle.
    pub fn run_interactive(&self, logger: &mut Logger) -> Result<()> {
        loop {
            let input = match read_user_line(&prompts::interactive_help_text())? {
                Some(line) => line,
                None => break, // EOF on stdin ends the session like the exit word
            };

            if input == INTERACTIVE_EXIT_WORD {
                break;
            }

            if input == PR_KEYWORD {
                let title = read_user_line("Pull request title: ")?.unwrap_or_default();
                logger.debug(&format!("Creating a pull request titled \"{}\"...", title));
                git::commit_and_push(&title, logger)?;
                break;
            }

            let history = self.history.load()?.unwrap_or_default();
            let instruction = prompts::render_user_turn(&input);
            self.completion_cycle(&history, &instruction, &self.options.workspace, logger)?;
        }

        Ok(())
    }

    /// Programmatic single cycle with an explicit instruction and workspace.
    pub fn run_query(&self, instruction: &str, workspace: &Path, logger: &mut Logger) -> Result<()> {
        let history = self.history.load()?.unwrap_or_default();
        let user_turn = prompts::render_user_turn(instruction);
        self.completion_cycle(&history, &user_turn, workspace, logger)
    }

    /// The shared completion cycle: build context, assemble the prompt, call
    /// the service, echo the raw completion, apply file blocks, persist
    /// history, and log the usage estimate.
    fn completion_cycle(
        &self,
        history: &str,
        instruction: &str,
        workspace: &Path,
        logger: &mut Logger,
    ) -> Result<()> {
        let code_context = build_code_context(workspace, logger)?;

        let full_prompt = format!(
            "{}{} {}{}{}{}",
            history,
            HUMAN_TURN,
            instruction,
            prompts::CONTEXT_PREAMBLE,
            code_context,
            ASSISTANT_TURN
        );

        let completion =
            self.client
                .complete(&full_prompt, &self.options.model, self.options.max_tokens)?;

        // Echo to stdout before any filesystem side effect, so a wrapping
        // tool sees the completion even if a write fails afterwards.
        println!("{}", completion);

        let blocks = parse_file_blocks(&completion, logger);
        write_blocks(&blocks, workspace, logger)?;

        // Only the newest turn is retained: no prior history (already spent)
        // and no code context (rebuilt from disk on every cycle).
        let turn_record = format!("{} {}{}", HUMAN_TURN, instruction, ASSISTANT_TURN);
        self.history.save(&turn_record, &completion)?;

        let usage = UsageEstimate::for_exchange(&full_prompt, &completion);
        logger.debug(&usage.summary());

        Ok(())
    }
}

/// Print a prompt on stdout and read one line. `None` means EOF.
fn read_user_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let bytes = io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if bytes == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
