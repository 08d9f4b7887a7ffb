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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Completion model to request
    pub model: Option<String>,

    /// Maximum tokens to sample per completion
    pub max_tokens: Option<u32>,

    /// Default workspace directory to serialize into prompts
    pub workspace: Option<String>,

    /// Path of the conversation history file
    pub history_file: Option<String>,

    /// Log file path for session diagnostics
    pub log_file: Option<String>,
}

impl Config {
    /// Load config from a file, or return default if file doesn't exist
    pub fn load(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Merge this config with CLI args, where CLI args take precedence
    pub fn merge_with_cli<T>(&self, cli_value: T, config_value: Option<T>, default_value: T) -> T
    where
        T: PartialEq + Clone,
    {
        // If CLI value differs from default, use CLI value
        if cli_value != default_value {
            cli_value
        } else if let Some(config_val) = config_value {
            // Otherwise use config value if present
            config_val
        } else {
            // Fall back to default
            default_value
        }
    }
}
