//! Google Gemini `generateContent` client.
//!
//! Request shape:
//!
//! ```json
//! {
//!   "contents": [
//!     { "role": "user",  "parts": [{ "text": "Analyze the sentiment ..." }] },
//!     { "role": "model", "parts": [{ "text": "positive" }] },
//!     { "role": "user",  "parts": [{ "text": "Generate a short thank-you ..." }] }
//!   ],
//!   "generationConfig": { "temperature": 1.0, "maxOutputTokens": 8192, "responseMimeType": "text/plain" }
//! }
//! ```
//!
//! No retries: any failure is returned to the caller as-is.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerationConfig, GenerativeService, Role, Turn};
use crate::config::Config;
use crate::error::{AiError, AiResult};
use crate::logs::log_info_indent;

/// Gemini API client, configured once per run
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: Role,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn new(role: Role, text: &'a str) -> Self {
        Self { role, parts: [Part { text }] }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini error body
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate(
        &self,
        config: &GenerationConfig,
        history: &[Turn],
        prompt: &str,
    ) -> AiResult<String> {
        let contents = history
            .iter()
            .map(|turn| Content::new(turn.role, &turn.text))
            .chain(std::iter::once(Content::new(Role::User, prompt)))
            .collect::<Vec<_>>();

        let turn = contents.len().div_ceil(2);
        log_info_indent(
            format!("📡 {} (turn {}, temperature {})", self.model, turn, config.temperature),
            1,
        );

        let request = GenerateRequest { contents, generation_config: config };

        let response = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AiError::Api { status: status.as_u16(), message });
        }

        parse_reply(&body)
    }
}

/// Extract the first candidate's text from a response body.
fn parse_reply(body: &str) -> AiResult<String> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AiError::InvalidJson(e.to_string()))?;

    let candidate = response.candidates.into_iter().next().ok_or(AiError::NoCandidates)?;

    // A candidate without text (e.g. stopped on a safety filter) reads as empty
    let text = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    Ok(text)
}
