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

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

/// Logger for diagnostics on stderr plus an optional append-mode log file.
///
/// Diagnostics stay off stdout so that a wrapping tool consuming the raw
/// completion never has to untangle the two streams. The debug tier is
/// suppressed on the console in query mode but always lands in the file.
pub struct Logger {
    file: Option<BufWriter<std::fs::File>>,
    debug_enabled: bool,
}

impl Logger {
    pub fn new(log_path: Option<&str>, debug_enabled: bool) -> Self {
        let file = log_path.and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(BufWriter::with_capacity(8192, file)),
                Err(e) => {
                    eprintln!("Warning: Failed to open log file '{}': {}", path, e);
                    eprintln!("Continuing without logging to file.");
                    None
                }
            }
        });

        Self {
            file,
            debug_enabled,
        }
    }

    pub fn info(&mut self, message: &str) {
        eprintln!("{}", message);
        self.write_file(message);
    }

    pub fn warn(&mut self, message: &str) {
        eprintln!("Warning: {}", message);
        self.write_file(&format!("Warning: {}", message));
    }

    pub fn debug(&mut self, message: &str) {
        if self.debug_enabled {
            eprintln!("{}", message);
        }
        self.write_file(message);
    }

    fn write_file(&mut self, message: &str) {
        if let Some(writer) = self.file.as_mut() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(writer, "[{}] {}", timestamp, message);
            // Flush per line to keep the file useful while a call is in flight
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_logging_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.log");
        let path_str = path.to_str().unwrap();

        let mut logger = Logger::new(Some(path_str), true);
        logger.info("first");
        logger.debug("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));
    }

    #[test]
    fn debug_lines_reach_file_even_when_console_quiet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiet.log");
        let path_str = path.to_str().unwrap();

        let mut logger = Logger::new(Some(path_str), false);
        logger.debug("cost estimate");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("cost estimate"));
    }

    #[test]
    fn missing_log_file_is_not_fatal() {
        let mut logger = Logger::new(Some("/nonexistent-dir/x/y.log"), true);
        logger.info("still fine");
    }
}
