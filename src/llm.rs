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

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::constants::{
    API_BASE_ENV, API_KEY_ENV, COMPLETION_TOKEN_RATE, DEFAULT_API_BASE, HUMAN_TURN,
    PROMPT_TOKEN_RATE,
};

/// Completions endpoint request/response types
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    max_tokens_to_sample: u32,
    temperature: f32,
    stop_sequences: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    completion: String,
}

/// Blocking client for the text-completions service.
///
/// The API key is read once at construction and construction fails if it is
/// absent, so a misconfigured run dies before any network traffic.
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CompletionClient {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| anyhow!("The {} environment variable must be set", API_KEY_ENV))?;
        let base_url =
            env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(api_key, base_url)
    }

    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Send one completion request with deterministic sampling.
    ///
    /// The human turn marker is the stop sequence, so the model cannot
    /// continue into a fabricated next turn.
    pub fn complete(&self, prompt: &str, model: &str, max_tokens: u32) -> Result<String> {
        let request = CompletionRequest {
            prompt,
            model,
            max_tokens_to_sample: max_tokens,
            temperature: 0.0,
            stop_sequences: vec![HUMAN_TURN],
        };

        let url = format!("{}/v1/complete", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .context("Failed to call completion service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Completion service returned error {}: {}", status, body);
        }

        let body = response
            .text()
            .context("Failed to read completion response body")?;
        let parsed: CompletionResponse = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse completion response: {}", body))?;

        Ok(parsed.completion)
    }
}

/// Rough token count, about four characters per token.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Approximate token and dollar figures for one exchange. Observability
/// only; nothing reads these back into control flow.
#[derive(Debug)]
pub struct UsageEstimate {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub prompt_cost: f64,
    pub completion_cost: f64,
}

impl UsageEstimate {
    pub fn for_exchange(prompt: &str, completion: &str) -> Self {
        let prompt_tokens = estimate_tokens(prompt);
        let completion_tokens = estimate_tokens(completion);
        Self {
            prompt_tokens,
            completion_tokens,
            prompt_cost: prompt_tokens as f64 * PROMPT_TOKEN_RATE,
            completion_cost: completion_tokens as f64 * COMPLETION_TOKEN_RATE,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Cost of interaction:\nPrompt tokens={}, cost=${:.6}\nCompletion tokens={}, cost=${:.6}",
            self.prompt_tokens, self.prompt_cost, self.completion_tokens, self.completion_cost
        )
    }
}
