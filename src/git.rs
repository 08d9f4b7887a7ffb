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
use std::process::Command;

use crate::logger::Logger;

/// Commit whatever is already staged and push to the current remote/branch.
///
/// Commit message in, best-effort outcome out: non-zero git exits are
/// reported as warnings rather than failing the session, since the most
/// common causes (nothing staged, no upstream) are recoverable by hand.
pub fn commit_and_push(message: &str, logger: &mut Logger) -> Result<()> {
    match Command::new("git").args(["commit", "-m", message]).status() {
        Ok(status) if status.success() => {
            logger.info(&format!("Committed with message: {}", message));
        }
        Ok(status) => {
            logger.warn(&format!(
                "git commit returned status {} (likely no staged changes)",
                status
            ));
            return Ok(());
        }
        Err(e) => {
            logger.warn(&format!("failed to run git commit: {}", e));
            return Ok(());
        }
    }

    match Command::new("git").arg("push").status() {
        Ok(status) if status.success() => {
            logger.info("Pushed to remote.");
        }
        Ok(status) => {
            logger.warn(&format!("git push returned status {}", status));
        }
        Err(e) => {
            logger.warn(&format!("failed to run git push: {}", e));
        }
    }

    Ok(())
}
