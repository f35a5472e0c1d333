//! High-level pipelines: load, enrich, compose, write.
//!
//! Both pipelines are sequential and single-pass. Rows accumulate in
//! memory and the output file is written once, after every record has been
//! enriched, so a failed run leaves no partial output behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailreview::{pipeline, Config, Enricher, GeminiClient, PipelineOptions};
//!
//! let enricher = Enricher::new(GeminiClient::new(&Config::from_env()?));
//! let summary = pipeline::run_reviews(
//!     &enricher,
//!     "reviews.txt".as_ref(),
//!     "review_output.csv".as_ref(),
//!     &PipelineOptions::default(),
//! )
//! .await?;
//! println!("{} rows written", summary.written);
//! ```

use serde::Serialize;
use std::path::Path;

use crate::ai::{Enricher, Extraction, GenerativeService, SentimentResult};
use crate::error::{AiResult, PipelineResult};
use crate::logs::{log_info, log_record, log_record_warning, log_success};
use crate::models::{or_unknown, EmailRecord, EmailRow, ReviewRow};
use crate::parser::{parse_emails, read_input, split_records, DEFAULT_SEPARATOR};
use crate::writer::write_table;

/// Options shared by both pipelines
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOptions {
    /// Literal token between records
    pub separator: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { separator: DEFAULT_SEPARATOR.to_string() }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Non-empty records found in the input
    pub records: usize,
    /// Records dropped as malformed
    pub skipped: usize,
    /// Data rows written (header excluded)
    pub written: usize,
}

// =============================================================================
// Field Composer
// =============================================================================

/// Assemble a review row. Item and company are never left empty.
pub fn compose_review(extraction: Extraction, sentiment: SentimentResult) -> ReviewRow {
    ReviewRow {
        item: or_unknown(&extraction.item),
        company: or_unknown(&extraction.company),
        sentiment: sentiment.sentiment,
        response_message: sentiment.response_message,
    }
}

pub fn compose_email(email: EmailRecord, summary: String, summary_spanish: String) -> EmailRow {
    EmailRow {
        to: email.to,
        from: email.from,
        subject: email.subject,
        summary,
        summary_spanish,
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// Enrich every review record in `content`.
pub async fn process_reviews<S: GenerativeService>(
    enricher: &Enricher<S>,
    content: &str,
    separator: &str,
) -> AiResult<Vec<ReviewRow>> {
    let records: Vec<&str> = split_records(content, separator).collect();
    log_success(format!("Found {} reviews", records.len()));

    let mut rows = Vec::with_capacity(records.len());
    for (i, body) in records.iter().enumerate() {
        log_record(i + 1, records.len(), "Enriching review...");

        let extraction = enricher.extract_item_and_company(body).await?;
        let sentiment = enricher.analyze_sentiment(body).await?;

        rows.push(compose_review(extraction, sentiment));
    }

    Ok(rows)
}

/// Review pipeline: read `input`, enrich, write `output`.
pub async fn run_reviews<S: GenerativeService>(
    enricher: &Enricher<S>,
    input: &Path,
    output: &Path,
    options: &PipelineOptions,
) -> PipelineResult<RunSummary> {
    log_info(format!("📖 Reading reviews from {}", input.display()));
    let loaded = read_input(input)?;
    log_success(format!("Detected encoding: {}", loaded.encoding));

    let rows = process_reviews(enricher, &loaded.content, &options.separator).await?;

    log_info(format!("💾 Writing {} rows to {}", rows.len(), output.display()));
    write_table(output, &rows)?;

    let summary = RunSummary { records: rows.len(), skipped: 0, written: rows.len() };
    log_success(format!("Reviews processed and saved to {}", output.display()));
    Ok(summary)
}

// =============================================================================
// Emails
// =============================================================================

/// Enrich every email record in `content`.
///
/// Returns the rows and the number of malformed records that were skipped.
pub async fn process_emails<S: GenerativeService>(
    enricher: &Enricher<S>,
    content: &str,
    separator: &str,
) -> AiResult<(Vec<EmailRow>, usize)> {
    let batch = parse_emails(content, separator);
    log_success(format!("Found {} emails", batch.records.len()));
    let chunks = batch.records.len() + batch.skipped.len();
    for skipped in &batch.skipped {
        log_record_warning(
            skipped.position,
            chunks,
            format!("Skipping record: {} line(s), expected at least 4", skipped.line_count),
        );
    }

    let total = batch.records.len();
    let mut rows = Vec::with_capacity(total);
    for (i, email) in batch.records.into_iter().enumerate() {
        log_record(i + 1, total, format!("Summarizing \"{}\"...", email.subject));

        let summary = enricher.summarize(&email.body).await?;
        let summary_spanish = enricher.translate(&summary).await?;

        rows.push(compose_email(email, summary, summary_spanish));
    }

    Ok((rows, batch.skipped.len()))
}

/// Email pipeline: read `input`, summarize and translate, write `output`.
pub async fn run_emails<S: GenerativeService>(
    enricher: &Enricher<S>,
    input: &Path,
    output: &Path,
    options: &PipelineOptions,
) -> PipelineResult<RunSummary> {
    log_info(format!("📖 Reading emails from {}", input.display()));
    let loaded = read_input(input)?;
    log_success(format!("Detected encoding: {}", loaded.encoding));

    let (rows, skipped) = process_emails(enricher, &loaded.content, &options.separator).await?;

    log_info(format!("💾 Writing {} rows to {}", rows.len(), output.display()));
    write_table(output, &rows)?;

    let summary = RunSummary { records: rows.len() + skipped, skipped, written: rows.len() };
    log_success(format!("Emails have been saved to {}", output.display()));
    Ok(summary)
}
