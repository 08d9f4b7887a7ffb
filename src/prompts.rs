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

use crate::constants::INTERACTIVE_EXIT_WORD;

/// Standing instructions appended to every user request. The delimiter
/// description here must agree with the markers in `constants`.
pub const STANDING_INSTRUCTIONS: &str = r#"Generate code only if necessary. Any generated code must be accompanied by thorough test cases that verify its correctness.
You will be provided the contents of the existing code files.
The contents of each file begin with "--BEGIN-FILE:" followed by the file path.
The contents of each file end with "--END-FILE--".
Use the same delimiters for each new file as in the input you are given below.
In your response, each line of code must be on a newline.
Unless explicitly requested, do not remove existing code that is unrelated to the change.
Reuse the existing code where possible, and follow the existing patterns, logical organization, and separation of concerns when adding new changes."#;

/// Separates the instruction from the serialized workspace in the prompt.
pub const CONTEXT_PREAMBLE: &str = "\nThe existing code files are below:\n";

pub fn render_user_turn(request: &str) -> String {
    format!(
        "\nNow, respond to the following request: {}.\n{}\n",
        request, STANDING_INSTRUCTIONS
    )
}

pub fn interactive_help_text() -> String {
    format!(
        "\nHow can I help (type \"{}\" to exit)? ",
        INTERACTIVE_EXIT_WORD
    )
}
