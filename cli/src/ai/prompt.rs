//! Prompt templates and generation settings for each enrichment task.
//!
//! Classification and extraction run cooler than free-text generation.

use super::GenerationConfig;

/// Output budget shared by every task
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Plain text replies only
pub const RESPONSE_MIME_TYPE: &str = "text/plain";

/// Target language of [`translation_prompt`]
pub const TARGET_LANGUAGE: &str = "Spanish";

fn config(temperature: f64) -> GenerationConfig {
    GenerationConfig {
        temperature,
        max_output_tokens: MAX_OUTPUT_TOKENS,
        response_mime_type: RESPONSE_MIME_TYPE.to_string(),
    }
}

/// Sentiment classification followed by a drafted reply
pub fn sentiment_config() -> GenerationConfig {
    config(1.0)
}

/// Item and manufacturer extraction
pub fn extraction_config() -> GenerationConfig {
    config(0.7)
}

pub fn summary_config() -> GenerationConfig {
    config(1.0)
}

pub fn translation_config() -> GenerationConfig {
    config(0.5)
}

// =============================================================================
// Reviews
// =============================================================================

pub fn sentiment_prompt(body: &str) -> String {
    format!(
        "Analyze the sentiment of the following review. Respond with only 'positive' or 'negative':\n\n{}\n",
        body
    )
}

pub fn thank_you_prompt(body: &str) -> String {
    format!(
        "Generate a short thank-you message for the following positive review:\n\n{}\n",
        body
    )
}

pub fn apology_prompt(body: &str) -> String {
    format!(
        "Generate a short apology message for the following negative review:\n\n{}\n",
        body
    )
}

pub fn item_prompt(body: &str) -> String {
    format!(
        "Just identify the purchased item in the following review. Respond with only the item name, such as 'Samsung phone':\n\n{}\n",
        body
    )
}

pub fn company_prompt(body: &str) -> String {
    format!(
        "Just identify the company name that made the item in the following review. Respond with only the company name, such as 'Samsung':\n\n{}\n",
        body
    )
}

// =============================================================================
// Emails
// =============================================================================

pub fn summary_prompt(body: &str) -> String {
    format!("Summarize the following email in short:\n\n{}\n", body)
}

pub fn translation_prompt(text: &str) -> String {
    format!("Translate the following text to {}:\n\n{}\n", TARGET_LANGUAGE, text)
}
