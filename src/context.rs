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

//! Workspace serialization into the marker-delimited prompt format.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::constants::{BEGIN_FILE_MARKER, END_FILE_MARKER};
use crate::logger::Logger;

/// Lines that would collide with the block delimiters if echoed back.
static MARKER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--(?:BEGIN-FILE:|END-FILE--)").unwrap());

/// Serialize every regular file under `workspace` into one delimited blob.
///
/// Paths are emitted relative to the workspace root and sorted
/// lexicographically, so the same tree always produces the same blob. Each
/// file contributes a begin-marker line, its content with the final newline
/// normalized to present, an end-marker line, and a blank separator line.
/// No filtering is applied; callers exclude files at the filesystem level.
pub fn build_code_context(workspace: &Path, logger: &mut Logger) -> Result<String> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(workspace) {
        let entry = entry
            .with_context(|| format!("Failed to walk workspace {}", workspace.display()))?;
        if entry.file_type().is_file() {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();

    let mut blob = String::new();
    for path in &paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // Delimiters are not escaped on the wire; call out files that would
        // confuse the parser on the way back.
        if content.lines().any(|line| MARKER_LINE.is_match(line)) {
            logger.warn(&format!(
                "{} contains a literal file-block delimiter; round-tripping it may split the block",
                path.display()
            ));
        }

        let display_path = path.strip_prefix(workspace).unwrap_or(path);
        blob.push_str(&format!("{} {}\n", BEGIN_FILE_MARKER, display_path.display()));
        for line in content.lines() {
            blob.push_str(line);
            blob.push('\n');
        }
        blob.push_str(END_FILE_MARKER);
        blob.push_str("\n\n");
    }

    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn quiet_logger() -> Logger {
        Logger::new(None, false)
    }

    #[test]
    fn single_file_blob_is_exact() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "a.txt", "hello");

        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        assert_eq!(blob, "--BEGIN-FILE: a.txt\nhello\n--END-FILE--\n\n");
    }

    #[test]
    fn one_marker_pair_per_file() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "a.txt", "alpha\n");
        create_test_file(dir.path(), "b.txt", "beta\n");
        create_test_file(dir.path(), "nested/c.txt", "gamma\n");

        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        assert_eq!(blob.matches(BEGIN_FILE_MARKER).count(), 3);
        assert_eq!(blob.matches(END_FILE_MARKER).count(), 3);
    }

    #[test]
    fn paths_are_sorted_lexicographically() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "zebra.txt", "z\n");
        create_test_file(dir.path(), "apple.txt", "a\n");

        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        let apple = blob.find("apple.txt").unwrap();
        let zebra = blob.find("zebra.txt").unwrap();
        assert!(apple < zebra);
    }

    #[test]
    fn missing_trailing_newline_is_normalized() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "no_newline.txt", "line one\nline two");

        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        assert!(blob.contains("line two\n--END-FILE--"));
    }

    #[test]
    fn nested_directories_are_walked() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "deep/deeper/d.txt", "depths\n");

        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        assert!(blob.contains("deep/deeper/d.txt"));
        assert!(blob.contains("depths"));
    }

    #[test]
    fn missing_workspace_is_an_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("not-here");
        assert!(build_code_context(&gone, &mut quiet_logger()).is_err());
    }

    #[test]
    fn marker_in_content_is_passed_through() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "tricky.txt", "--END-FILE--\n");

        // Guarded with a warning, not mutated.
        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        assert!(blob.contains("--END-FILE--\n--END-FILE--\n\n"));
    }
}
