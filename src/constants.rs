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

/// Opens a file block; the file path follows after ": ".
pub const BEGIN_FILE_MARKER: &str = "--BEGIN-FILE:";

/// Closes the most recently opened file block.
pub const END_FILE_MARKER: &str = "--END-FILE--";

/// Turn markers understood by the completions endpoint. The human marker
/// doubles as the stop sequence so the model cannot fabricate a multi-turn
/// exchange inside a single response.
pub const HUMAN_TURN: &str = "\n\nHuman:";
pub const ASSISTANT_TURN: &str = "\n\nAssistant:";

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const TASK_ENV: &str = "CODELOOM_TASK";
pub const API_BASE_ENV: &str = "CODELOOM_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-v1.3-100k";
pub const DEFAULT_MAX_TOKENS: u32 = 10_000;
pub const DEFAULT_WORKSPACE: &str = ".";
pub const DEFAULT_HISTORY_FILE: &str = "codeloom-history.txt";

/// Published per-token completion rates, USD.
pub const PROMPT_TOKEN_RATE: f64 = 0.000_011_02;
pub const COMPLETION_TOKEN_RATE: f64 = 0.000_032_68;

pub const INTERACTIVE_EXIT_WORD: &str = "thanks";
pub const PR_KEYWORD: &str = "PR";
