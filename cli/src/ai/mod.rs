//! Generative text service abstraction.
//!
//! The enrichment code talks to a [`GenerativeService`] through per-record
//! [`ChatSession`]s; [`GeminiClient`] is the production implementation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailreview::ai::{prompt, ChatSession, GeminiClient, GenerativeService};
//! use mailreview::Config;
//!
//! let client = GeminiClient::new(&Config::from_env()?);
//! let mut session = client.start_chat(prompt::summary_config());
//! let summary = session.send_message(&client, &prompt::summary_prompt(body)).await?;
//! ```

pub mod enrich;
pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AiResult;

pub use enrich::{is_positive, Enricher, Extraction, SentimentResult};
pub use gemini::GeminiClient;

/// Sampling parameters sent with every prompt of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One exchange half within a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// A text-generation backend.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Open an empty session that will use `config` for every prompt.
    fn start_chat(&self, config: GenerationConfig) -> ChatSession {
        ChatSession::new(config)
    }

    /// Generate a reply to `prompt`, conditioned on the prior `history`.
    ///
    /// Returns the raw (untrimmed) reply text.
    async fn generate(
        &self,
        config: &GenerationConfig,
        history: &[Turn],
        prompt: &str,
    ) -> AiResult<String>;
}

/// Conversational context for one record.
///
/// The service sees every earlier prompt and reply of the session, so a
/// follow-up prompt is conditioned on the previous answer without the
/// caller restating it.
#[derive(Debug, Clone)]
pub struct ChatSession {
    config: GenerationConfig,
    history: Vec<Turn>,
}

impl ChatSession {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config, history: Vec::new() }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Send a prompt within this session and return the trimmed reply.
    pub async fn send_message<S>(&mut self, service: &S, prompt: &str) -> AiResult<String>
    where
        S: GenerativeService + ?Sized,
    {
        let reply = service.generate(&self.config, &self.history, prompt).await?;
        self.history.push(Turn::user(prompt));
        self.history.push(Turn::model(reply.clone()));
        Ok(reply.trim().to_string())
    }
}

/// Deterministic stand-in for the network service.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// A recorded `generate` call
    #[derive(Debug, Clone)]
    pub struct Call {
        pub config: GenerationConfig,
        pub history: Vec<Turn>,
        pub prompt: String,
    }

    type Responder = Box<dyn Fn(&str, &[Turn]) -> AiResult<String> + Send + Sync>;

    pub struct ScriptedService {
        responder: Responder,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedService {
        pub fn new<F>(responder: F) -> Self
        where
            F: Fn(&str, &[Turn]) -> AiResult<String> + Send + Sync + 'static,
        {
            Self { responder: Box::new(responder), calls: Mutex::new(Vec::new()) }
        }

        /// Replies by keyword, the way a cooperative model would.
        pub fn canned() -> Self {
            Self::new(|prompt, _| Ok(canned_reply(prompt)))
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeService for ScriptedService {
        async fn generate(
            &self,
            config: &GenerationConfig,
            history: &[Turn],
            prompt: &str,
        ) -> AiResult<String> {
            self.calls.lock().unwrap().push(Call {
                config: config.clone(),
                history: history.to_vec(),
                prompt: prompt.to_string(),
            });
            (self.responder)(prompt, history)
        }
    }

    pub fn canned_reply(prompt: &str) -> String {
        let lower = prompt.to_lowercase();
        if lower.starts_with("analyze the sentiment") {
            if lower.contains("amazing") || lower.contains("love") {
                " Positive\n".to_string()
            } else {
                "negative".to_string()
            }
        } else if lower.contains("thank-you") {
            "Thank you for your kind review!".to_string()
        } else if lower.contains("apology") {
            "We are sorry the product let you down.".to_string()
        } else if lower.contains("purchased item") {
            if lower.contains("mystery") { String::new() } else { "Galaxy phone".to_string() }
        } else if lower.contains("company name") {
            if lower.contains("mystery") { "  ".to_string() } else { "Samsung".to_string() }
        } else if lower.starts_with("summarize") {
            "Customer asks about an order.".to_string()
        } else if lower.starts_with("translate") {
            "El cliente pregunta por un pedido del año pasado; señal recibida.".to_string()
        } else {
            "?".to_string()
        }
    }
}
