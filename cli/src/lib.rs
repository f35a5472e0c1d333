//! # Mailreview - generative enrichment of reviews and emails
//!
//! Mailreview reads batches of free-text records from flat files, asks a
//! Gemini model for derived fields, and writes the enriched records to CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Text File  │────▶│   Loader    │────▶│  Enricher   │────▶│  CSV Table  │
//! │ (END-split) │     │ (auto-enc)  │     │  (Gemini)   │     │   (UTF-8)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Two pipelines share that shape:
//!
//! - **Reviews**: item, company, sentiment, drafted reply
//! - **Emails**: headers, summary, Spanish summary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailreview::{run_emails, Config, Enricher, GeminiClient, PipelineOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let enricher = Enricher::new(GeminiClient::new(&Config::from_env()?));
//!     let summary = run_emails(
//!         &enricher,
//!         "sample_mails.txt".as_ref(),
//!         "emails.csv".as_ref(),
//!         &PipelineOptions::default(),
//!     )
//!     .await?;
//!     println!("Wrote {} rows", summary.written);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Credential and endpoint configuration
//! - [`logs`] - Broadcast pipeline logging
//! - [`models`] - Input records and output rows
//! - [`parser`] - Record loader with encoding detection
//! - [`ai`] - Generative service, Gemini client, prompts, enricher
//! - [`pipeline`] - Field composer and pipeline drivers
//! - [`writer`] - CSV table writer

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// AI
pub mod ai;

// Orchestration
pub mod pipeline;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Errors & Config
// =============================================================================

pub use config::Config;
pub use error::{AiError, ConfigError, LoadError, PipelineError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{EmailRecord, EmailRow, ReviewRow, TableRow, UNKNOWN};

// =============================================================================
// Re-exports - Loader
// =============================================================================

pub use parser::{
    parse_email,
    parse_emails,
    read_input,
    split_records,
    EmailBatch,
    LoadedFile,
    DEFAULT_SEPARATOR,
};

// =============================================================================
// Re-exports - AI
// =============================================================================

pub use ai::{
    is_positive,
    ChatSession,
    Enricher,
    GeminiClient,
    GenerationConfig,
    GenerativeService,
};

// =============================================================================
// Re-exports - Pipeline & Writer
// =============================================================================

pub use pipeline::{
    compose_email,
    compose_review,
    process_emails,
    process_reviews,
    run_emails,
    run_reviews,
    PipelineOptions,
    RunSummary,
};

pub use writer::{write_table, write_table_to};
