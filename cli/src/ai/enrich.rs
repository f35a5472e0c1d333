//! Enrichment client: one purpose-specific call per derived field.
//!
//! Every operation opens a fresh [`ChatSession`], so nothing leaks from one
//! record into the next.

use serde::Serialize;

use super::{prompt, GenerativeService};
use crate::error::AiResult;
use crate::models::or_unknown;

/// Classification plus the drafted reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentResult {
    pub sentiment: String,
    pub response_message: String,
}

/// Purchased item and its manufacturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub item: String,
    pub company: String,
}

/// Whether a classification reads as positive.
///
/// Case-insensitive substring match: anything else, including "mixed",
/// "neutral" or an empty reply, routes to the apology branch.
pub fn is_positive(sentiment: &str) -> bool {
    sentiment.to_lowercase().contains("positive")
}

/// Owns the generative service for the duration of a run.
pub struct Enricher<S> {
    service: S,
}

impl<S: GenerativeService> Enricher<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Classify a review, then draft a thank-you or apology in the same session.
    pub async fn analyze_sentiment(&self, body: &str) -> AiResult<SentimentResult> {
        let mut session = self.service.start_chat(prompt::sentiment_config());

        let sentiment = session
            .send_message(&self.service, &prompt::sentiment_prompt(body))
            .await?;

        let message_prompt = if is_positive(&sentiment) {
            prompt::thank_you_prompt(body)
        } else {
            prompt::apology_prompt(body)
        };
        let response_message = session.send_message(&self.service, &message_prompt).await?;

        Ok(SentimentResult { sentiment, response_message })
    }

    /// Extract the purchased item and its maker; empty answers become "unknown".
    pub async fn extract_item_and_company(&self, body: &str) -> AiResult<Extraction> {
        let mut session = self.service.start_chat(prompt::extraction_config());

        let item = session.send_message(&self.service, &prompt::item_prompt(body)).await?;
        let company = session.send_message(&self.service, &prompt::company_prompt(body)).await?;

        Ok(Extraction {
            item: or_unknown(&item),
            company: or_unknown(&company),
        })
    }

    pub async fn summarize(&self, body: &str) -> AiResult<String> {
        let mut session = self.service.start_chat(prompt::summary_config());
        session.send_message(&self.service, &prompt::summary_prompt(body)).await
    }

    /// Translate arbitrary text to Spanish.
    pub async fn translate(&self, text: &str) -> AiResult<String> {
        let mut session = self.service.start_chat(prompt::translation_config());
        session.send_message(&self.service, &prompt::translation_prompt(text)).await
    }
}
