//! OpenAI-compatible chat-completions analyzer.
//!
//! Works against OpenAI, Azure, vLLM, Ollama, or any endpoint that follows
//! the chat completions API shape. Configuration comes entirely from the
//! environment; without an API key the analyzer simply does not exist and
//! callers stay on their heuristic paths.

use crate::analysis::{DemoVerdict, ReadmeAnalyzer};
use crate::config::LlmConfig;
use crate::network::HttpClient;
use crate::{Result, ScoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// READMEs are truncated before prompting; the judgment does not improve
/// past a few thousand words and tokens cost latency.
const MAX_PROMPT_CHARS: usize = 12_000;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Chat-completions client implementing [`ReadmeAnalyzer`].
pub struct LlmAnalyzer {
    http: Arc<HttpClient>,
    config: LlmConfig,
}

impl LlmAnalyzer {
    /// Build an analyzer from the environment, or `None` when no API key
    /// is configured.
    pub fn from_env(http: Arc<HttpClient>) -> Option<Self> {
        let config = LlmConfig::from_env()?;
        debug!("LLM analysis enabled with model {}", config.model);
        Some(Self { http, config })
    }

    /// Build an analyzer from explicit configuration.
    pub fn with_config(http: Arc<HttpClient>, config: LlmConfig) -> Self {
        Self { http, config }
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        };

        let response = self
            .http
            .post_json(&url, &self.config.api_key, &request)
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreError::Llm {
                message: format!("Completion endpoint returned {}", status),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| ScoreError::Llm {
            message: format!("Failed to parse completion response: {}", e),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ScoreError::Llm {
                message: "Completion response had no choices".to_string(),
            })
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Pull the first decimal number out of a completion.
fn extract_score(completion: &str) -> Option<f64> {
    let mut number = String::new();
    for c in completion.chars() {
        if c.is_ascii_digit() || (c == '.' && !number.is_empty()) {
            number.push(c);
        } else if !number.is_empty() {
            break;
        }
    }
    number.parse().ok()
}

#[async_trait]
impl ReadmeAnalyzer for LlmAnalyzer {
    async fn rate_onboarding(&self, readme: &str) -> Result<f64> {
        let prompt = format!(
            "Rate the following project README for how quickly a new user \
             could get the project running, considering installation steps, \
             usage examples, and quickstart documentation. Answer with a \
             single number between 0.0 and 1.0 and nothing else.\n\n{}",
            truncate(readme, MAX_PROMPT_CHARS)
        );

        let completion = self.complete(prompt).await?;
        let score = extract_score(&completion).ok_or_else(|| ScoreError::Llm {
            message: format!("Unparseable onboarding rating: {:?}", completion),
        })?;
        Ok(score.clamp(0.0, 1.0))
    }

    async fn classify_demo(&self, readme: &str) -> Result<DemoVerdict> {
        let prompt = format!(
            "The following model card may contain Python demo code. Classify \
             whether that code would run as written. Answer with exactly one \
             word: RUNS if it would run cleanly, DEBUG if it would need \
             fixes, NONE if there is no usable demo code.\n\n{}",
            truncate(readme, MAX_PROMPT_CHARS)
        );

        let completion = self.complete(prompt).await?;
        let answer = completion.trim().to_uppercase();
        if answer.contains("RUNS") {
            Ok(DemoVerdict::RunsClean)
        } else if answer.contains("DEBUG") {
            Ok(DemoVerdict::NeedsDebugging)
        } else if answer.contains("NONE") {
            Ok(DemoVerdict::NoDemo)
        } else {
            Err(ScoreError::Llm {
                message: format!("Unparseable demo verdict: {:?}", completion),
            })
        }
    }
}
