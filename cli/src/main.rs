//! Mailreview CLI - enrich reviews and emails with Gemini
//!
//! # Main Commands
//!
//! ```bash
//! mailreview reviews                 # reviews.txt -> review_output.csv
//! mailreview emails                  # sample_mails.txt -> emails.csv
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! mailreview parse sample_mails.txt --kind emails   # Just split/parse, print JSON
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use mailreview::logs::log_error;
use mailreview::{
    parse_emails, read_input, run_emails, run_reviews, split_records, Config, Enricher,
    GeminiClient, PipelineError, PipelineOptions, RunSummary,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mailreview")]
#[command(about = "Enrich customer reviews and emails with a generative language model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract item/company, classify sentiment and draft a reply per review
    Reviews {
        /// Input text file, records separated by the separator token
        #[arg(short, long, default_value = "reviews.txt")]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long, default_value = "review_output.csv")]
        output: PathBuf,

        /// Record separator token
        #[arg(long, default_value = "END")]
        separator: String,

        /// Model identifier (overrides GEMINI_MODEL)
        #[arg(long)]
        model: Option<String>,
    },

    /// Summarize each email and translate the summary to Spanish
    Emails {
        /// Input text file, records separated by the separator token
        #[arg(short, long, default_value = "sample_mails.txt")]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long, default_value = "emails.csv")]
        output: PathBuf,

        /// Record separator token
        #[arg(long, default_value = "END")]
        separator: String,

        /// Model identifier (overrides GEMINI_MODEL)
        #[arg(long)]
        model: Option<String>,
    },

    /// Split an input file into records and print them as JSON
    Parse {
        /// Input text file
        input: PathBuf,

        /// How to interpret each record
        #[arg(short, long, value_enum, default_value_t = RecordKind::Reviews)]
        kind: RecordKind,

        /// Record separator token
        #[arg(long, default_value = "END")]
        separator: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordKind {
    Reviews,
    Emails,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reviews { input, output, separator, model } => {
            cmd_reviews(&input, &output, separator, model.as_deref()).await
        }

        Commands::Emails { input, output, separator, model } => {
            cmd_emails(&input, &output, separator, model.as_deref()).await
        }

        Commands::Parse { input, kind, separator, output } => {
            cmd_parse(&input, kind, &separator, output.as_deref())
        }
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

/// Build the enricher; fails before any input is read if the key is missing.
fn build_enricher(model: Option<&str>) -> Result<Enricher<GeminiClient>, PipelineError> {
    let mut config = Config::from_env()?;
    if let Some(model) = model {
        config = config.with_model(model);
    }
    let client = GeminiClient::new(&config);
    eprintln!("🤖 Model: {}", client.model());
    Ok(Enricher::new(client))
}

async fn cmd_reviews(
    input: &Path,
    output: &Path,
    separator: String,
    model: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let enricher = build_enricher(model)?;
    let options = PipelineOptions { separator };

    let summary = run_reviews(&enricher, input, output, &options).await?;
    print_summary(&summary);
    Ok(())
}

async fn cmd_emails(
    input: &Path,
    output: &Path,
    separator: String,
    model: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let enricher = build_enricher(model)?;
    let options = PipelineOptions { separator };

    let summary = run_emails(&enricher, input, output, &options).await?;
    print_summary(&summary);
    Ok(())
}

fn cmd_parse(
    input: &Path,
    kind: RecordKind,
    separator: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing: {}", input.display());

    let loaded = read_input(input)?;
    eprintln!("   Encoding: {}", loaded.encoding);

    let value = match kind {
        RecordKind::Reviews => {
            let records: Vec<&str> = split_records(&loaded.content, separator).collect();
            eprintln!("✅ Parsed {} reviews", records.len());
            json!(records)
        }
        RecordKind::Emails => {
            let batch = parse_emails(&loaded.content, separator);
            eprintln!(
                "✅ Parsed {} emails ({} skipped)",
                batch.records.len(),
                batch.skipped.len()
            );
            json!({ "records": batch.records, "skipped": batch.skipped })
        }
    };

    let rendered = serde_json::to_string_pretty(&value)?;
    write_output(&rendered, output)?;
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    eprintln!(
        "\n✨ Done: {} record(s), {} skipped, {} row(s) written",
        summary.records, summary.skipped, summary.written
    );
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
