//! Domain models for the enrichment pipelines.
//!
//! - [`EmailRecord`] - An email split into header fields and body
//! - [`ReviewRow`] - One enriched review, as written to the review table
//! - [`EmailRow`] - One enriched email, as written to the email table
//! - [`TableRow`] - Fixed column layout shared by both row types

use serde::{Deserialize, Serialize};

/// Sentinel written when a field cannot be resolved.
pub const UNKNOWN: &str = "unknown";

/// Replace an empty (or whitespace-only) value with [`UNKNOWN`].
pub fn or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Input Records
// =============================================================================

/// An email parsed from its fixed-position header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

// =============================================================================
// Output Rows
// =============================================================================

/// A record with a fixed, ordered set of output columns.
pub trait TableRow {
    /// Column names, in output order.
    const HEADERS: &'static [&'static str];

    /// Field values, in the same order as [`TableRow::HEADERS`].
    fn fields(&self) -> Vec<&str>;
}

/// An enriched review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub item: String,
    pub company: String,
    pub sentiment: String,
    pub response_message: String,
}

impl TableRow for ReviewRow {
    const HEADERS: &'static [&'static str] = &["Item", "Company", "Sentiment", "Response Message"];

    fn fields(&self) -> Vec<&str> {
        vec![&self.item, &self.company, &self.sentiment, &self.response_message]
    }
}

/// An enriched email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRow {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub summary: String,
    pub summary_spanish: String,
}

impl TableRow for EmailRow {
    const HEADERS: &'static [&'static str] = &["to", "from", "subject", "summary", "summary_spanish"];

    fn fields(&self) -> Vec<&str> {
        vec![&self.to, &self.from, &self.subject, &self.summary, &self.summary_spanish]
    }
}
