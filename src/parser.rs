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

//! Extraction of file blocks from a completion and their application to disk.
//!
//! Parsing is deliberately lenient: a completion is free-form model output,
//! so malformed blocks are dropped with a warning instead of failing the
//! whole cycle. The policies for the two malformed shapes are explicit:
//! a begin marker inside an open block discards the open block and starts
//! the new one; an open block at end of input is discarded.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{BEGIN_FILE_MARKER, END_FILE_MARKER};
use crate::logger::Logger;

/// One file captured from a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlock {
    pub path: String,
    pub content: String,
}

/// Scan a completion for delimited file blocks.
///
/// A block opens on a line containing the begin marker (the path is the text
/// after the marker's ": " separator) and closes on the next line containing
/// the end marker. Lines in between are captured verbatim, each terminated
/// with a newline.
pub fn parse_file_blocks(response: &str, logger: &mut Logger) -> Vec<FileBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<FileBlock> = None;

    for line in response.split('\n') {
        if line.contains(BEGIN_FILE_MARKER) {
            if let Some(dropped) = open.take() {
                logger.warn(&format!(
                    "Discarding unterminated block for {}: new block opened before it was closed",
                    dropped.path
                ));
            }

            let path = line
                .splitn(2, ": ")
                .nth(1)
                .map(|p| p.trim().to_string())
                .unwrap_or_default();
            if path.is_empty() {
                logger.warn("Ignoring begin marker with no file path");
                continue;
            }

            open = Some(FileBlock {
                path,
                content: String::new(),
            });
        } else if line.contains(END_FILE_MARKER) {
            // An end marker with no open block is ignored.
            if let Some(block) = open.take() {
                blocks.push(block);
            }
        } else if let Some(block) = open.as_mut() {
            block.content.push_str(line);
            block.content.push('\n');
        }
    }

    if let Some(dropped) = open {
        logger.warn(&format!(
            "Discarding unterminated block for {} at end of response",
            dropped.path
        ));
    }

    blocks
}

/// Write captured blocks to disk, resolving relative paths against `root`.
///
/// Parent directories are created as needed. Existing files are overwritten;
/// files the completion does not mention are left untouched.
pub fn write_blocks(blocks: &[FileBlock], root: &Path, logger: &mut Logger) -> Result<()> {
    for block in blocks {
        let target = resolve_target(&block.path, root);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&target, &block.content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        logger.debug(&format!("Wrote file: {}", target.display()));
    }

    Ok(())
}

fn resolve_target(path: &str, root: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::build_code_context;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn quiet_logger() -> Logger {
        Logger::new(None, false)
    }

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn single_block_is_captured() {
        let response = "--BEGIN-FILE: a.txt\nhello world\n--END-FILE--\n";
        let blocks = parse_file_blocks(response, &mut quiet_logger());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].path, "a.txt");
        assert_eq!(blocks[0].content, "hello world\n");
    }

    #[test]
    fn prose_around_blocks_is_ignored() {
        let response = "Here is the change you asked for:\n\n--BEGIN-FILE: src/lib.rs\nfn answer() -> u32 { 42 }\n--END-FILE--\n\nLet me know if anything else is needed.";
        let blocks = parse_file_blocks(response, &mut quiet_logger());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].path, "src/lib.rs");
        assert_eq!(blocks[0].content, "fn answer() -> u32 { 42 }\n");
    }

    #[test]
    fn unterminated_block_yields_nothing() {
        let response = "--BEGIN-FILE: a.txt\npartial content\nmore content";
        let blocks = parse_file_blocks(response, &mut quiet_logger());
        assert!(blocks.is_empty());
    }

    #[test]
    fn nested_begin_discards_the_open_block() {
        let response =
            "--BEGIN-FILE: first.txt\nlost\n--BEGIN-FILE: second.txt\nkept\n--END-FILE--\n";
        let blocks = parse_file_blocks(response, &mut quiet_logger());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].path, "second.txt");
        assert_eq!(blocks[0].content, "kept\n");
    }

    #[test]
    fn stray_end_marker_is_ignored() {
        let response = "--END-FILE--\n--BEGIN-FILE: a.txt\nok\n--END-FILE--\n";
        let blocks = parse_file_blocks(response, &mut quiet_logger());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "ok\n");
    }

    #[test]
    fn begin_marker_without_path_is_ignored() {
        let response = "--BEGIN-FILE:\norphan line\n--END-FILE--\n";
        let blocks = parse_file_blocks(response, &mut quiet_logger());
        assert!(blocks.is_empty());
    }

    #[test]
    fn builder_output_round_trips() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "a.txt", "alpha\n");
        create_test_file(dir.path(), "sub/b.txt", "beta\ngamma\n");

        let blob = build_code_context(dir.path(), &mut quiet_logger()).unwrap();
        let blocks = parse_file_blocks(&blob, &mut quiet_logger());

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].path, "a.txt");
        assert_eq!(blocks[0].content, "alpha\n");
        assert_eq!(blocks[1].path, "sub/b.txt");
        assert_eq!(blocks[1].content, "beta\ngamma\n");
    }

    #[test]
    fn write_blocks_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let blocks = vec![FileBlock {
            path: "brand/new/file.txt".to_string(),
            content: "fresh\n".to_string(),
        }];

        write_blocks(&blocks, dir.path(), &mut quiet_logger()).unwrap();

        let written = fs::read_to_string(dir.path().join("brand/new/file.txt")).unwrap();
        assert_eq!(written, "fresh\n");
    }

    #[test]
    fn write_blocks_overwrites_existing_files() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "a.txt", "old\n");

        let blocks = vec![FileBlock {
            path: "a.txt".to_string(),
            content: "new\n".to_string(),
        }];
        write_blocks(&blocks, dir.path(), &mut quiet_logger()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "new\n");
    }

    #[test]
    fn unmentioned_files_are_left_alone() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "keep.txt", "untouched\n");

        let blocks = vec![FileBlock {
            path: "other.txt".to_string(),
            content: "added\n".to_string(),
        }];
        write_blocks(&blocks, dir.path(), &mut quiet_logger()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("keep.txt")).unwrap(),
            "untouched\n"
        );
    }
}
