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

//! Single-turn conversation history, overwritten on every cycle.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persisted record of the most recent exchange.
///
/// Holds its own file path so separate sessions (and tests) can point at
/// separate records. The record keeps exactly one turn: the last user turn
/// without the injected code context, then the last completion. Code context
/// is rebuilt from disk on every cycle, so storing it would only grow stale.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous exchange, if one has been recorded.
    ///
    /// Content comes back line-normalized: every line terminated with a
    /// newline, matching the form it is spliced into the next prompt.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file {}", self.path.display()))?;

        let mut history = String::new();
        for line in content.lines() {
            history.push_str(line);
            history.push('\n');
        }
        Ok(Some(history))
    }

    /// Overwrite the record with the latest exchange.
    pub fn save(&self, prompt_without_context: &str, completion: &str) -> Result<()> {
        let record = format!("{}\n\n{}", prompt_without_context, completion);
        atomic_write(&self.path, &record)
    }
}

/// Atomically replace a file using temp file + rename.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let mut temp_file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist temp file to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_before_first_save_is_none() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.txt"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.txt"));

        store.save("\n\nHuman: add a test\n\nAssistant:", "done").unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.contains("add a test"));
        assert!(loaded.contains("done"));
    }

    #[test]
    fn second_save_replaces_the_first() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.txt"));

        store.save("\n\nHuman: first request\n\nAssistant:", "first reply").unwrap();
        store.save("\n\nHuman: second request\n\nAssistant:", "second reply").unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.contains("second request"));
        assert!(loaded.contains("second reply"));
        assert!(!loaded.contains("first request"));
        assert!(!loaded.contains("first reply"));
    }

    #[test]
    fn loaded_history_ends_with_newline() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.txt"));

        store.save("\n\nHuman: hi\n\nAssistant:", "hello").unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.ends_with('\n'));
    }
}
