//! # tablecheck-cli
//!
//! Command-line front end: loads or fetches a document, runs the table
//! analysis and renders both reports.

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tablecheck_analysis::{AnalysisReport, TableAnalyzer, TableStatistics, UnmatchedFields};
use tablecheck_core::{
    AnalyzerConfig, AppConfig, Document, MatchMetric, OrdinalScope, TableCheckError,
};
use tablecheck_http::DocumentClient;
use tracing_subscriber::EnvFilter;

const XBRL_MESSAGE: &str = "Document is in XBRL format, which is not supported for this analysis.";
const NO_TABLE_CATEGORY_MESSAGE: &str = "The provided document object has no tables under the key";
const NO_TABLE_STATS_MESSAGE: &str = "There are no tagged tables in this documents";
const NO_UNMATCHED_MESSAGE: &str = "There are no fields tagged outside of tables";

/// tablecheck - find fields outside tables and summarise table contents
#[derive(Parser)]
#[command(name = "tablecheck")]
#[command(author, version, about = "Field-to-table analysis for extracted documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML configuration file
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short = 'f', long = "format", default_value = "table", global = true)]
    format: OutputFormat,

    #[command(flatten)]
    analysis: AnalysisArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a document stored as JSON on disk
    Analyze {
        /// Document file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Fetch a document from the document service and analyse it
    Fetch {
        /// Recipe ID
        #[arg(long)]
        recipe_id: String,

        /// Document ID
        #[arg(long)]
        document_id: String,

        /// Document service host
        #[arg(long, env = "TABLECHECK_API_HOST")]
        api_host: Option<String>,

        /// Document service token
        #[arg(long, env = "TABLECHECK_AUTH_TOKEN", hide_env_values = true)]
        auth_token: Option<String>,
    },
}

/// Overrides for the analyzer configuration.
#[derive(Args, Default)]
struct AnalysisArgs {
    /// Category holding the detected tables
    #[arg(long, global = true)]
    table_category: Option<String>,

    /// Minimum similarity for a field to lie in a table (0-1)
    #[arg(short = 't', long, global = true)]
    threshold: Option<f64>,

    /// Table ordinal numbering
    #[arg(long, global = true)]
    ordinal_scope: Option<ScopeArg>,

    /// Similarity measure
    #[arg(long, global = true)]
    metric: Option<MetricArg>,

    /// Column position to skip when collecting values (repeatable)
    #[arg(long = "ignore-column", global = true, value_name = "INDEX")]
    ignored_columns: Vec<usize>,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ScopeArg {
    PerPage,
    Global,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MetricArg {
    Overlap,
    Iou,
}

/// What the boundary layer shows for one run.
#[derive(Debug)]
enum Outcome {
    Unsupported,
    NoTableCategory,
    Report(AnalysisReport),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::default(),
    };
    apply_overrides(&mut config.analysis, &cli.analysis);

    let document = match cli.command {
        Command::Analyze { file } => Document::from_path(&file)
            .with_context(|| format!("Failed to read document: {}", file.display()))?,
        Command::Fetch {
            recipe_id,
            document_id,
            api_host,
            auth_token,
        } => {
            if let Some(host) = api_host {
                config.api.api_host = host;
            }
            if let Some(token) = auth_token {
                config.api.auth_token = token;
            }
            let client = DocumentClient::new(config.api.clone())
                .context("Please fill in the required fields to retrieve the document")?;
            client
                .fetch_document(&recipe_id, &document_id)
                .await
                .with_context(|| format!("Failed to fetch document {document_id}"))?
        }
    };

    tracing::info!("Analysing document {}", document.id);
    match run_analysis(&document, &config.analysis)? {
        Outcome::Unsupported => print_error(XBRL_MESSAGE),
        Outcome::NoTableCategory => print_error(NO_TABLE_CATEGORY_MESSAGE),
        Outcome::Report(report) => print_report(&report, cli.format)?,
    }

    Ok(())
}

/// Apply command-line overrides on top of file configuration.
fn apply_overrides(config: &mut AnalyzerConfig, args: &AnalysisArgs) {
    if let Some(category) = &args.table_category {
        config.table_category_name = category.clone();
    }
    if let Some(threshold) = args.threshold {
        config.similarity_threshold = threshold;
    }
    if let Some(scope) = args.ordinal_scope {
        config.ordinal_scope = match scope {
            ScopeArg::PerPage => OrdinalScope::PerPage,
            ScopeArg::Global => OrdinalScope::Global,
        };
    }
    if let Some(metric) = args.metric {
        config.match_metric = match metric {
            MetricArg::Overlap => MatchMetric::Overlap,
            MetricArg::Iou => MatchMetric::Iou,
        };
    }
    if !args.ignored_columns.is_empty() {
        config.ignored_columns = args.ignored_columns.clone();
    }
}

/// Gate the document and run the analysis, turning expected failures into outcomes.
fn run_analysis(document: &Document, config: &AnalyzerConfig) -> Result<Outcome> {
    if document.is_xbrl {
        return Ok(Outcome::Unsupported);
    }

    let mut analyzer = TableAnalyzer::new(config.clone()).context("Invalid analysis configuration")?;
    match analyzer.analyze(document) {
        Ok(report) => Ok(Outcome::Report(report)),
        Err(TableCheckError::MissingCategory { .. }) => Ok(Outcome::NoTableCategory),
        Err(e) => Err(e.into()),
    }
}

fn print_error(message: &str) {
    eprintln!("{} {message}", "Error:".red().bold());
}

/// Print both reports, or the empty-state message for either.
fn print_report(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", "Mean and Standard Deviation of Tables:".cyan().bold());
    if report.table_statistics.is_empty() {
        print_error(NO_TABLE_STATS_MESSAGE);
    } else {
        print!("{}", render_statistics(&report.table_statistics, format)?);
    }

    println!("{}", "Fields Outside of Tables:".cyan().bold());
    if report.unmatched_fields.is_empty() {
        print_error(NO_UNMATCHED_MESSAGE);
    } else {
        print!("{}", render_unmatched(&report.unmatched_fields, format)?);
    }

    Ok(())
}

fn render_statistics(stats: &TableStatistics, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let batch = stats.to_record_batch()?;
            Ok(format!("{}\n", pretty_format_batches(&[batch])?))
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in &stats.rows {
                writer.serialize(row)?;
            }
            csv_to_string(writer)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)? + "\n"),
    }
}

fn render_unmatched(unmatched: &UnmatchedFields, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let batch = unmatched.to_record_batch()?;
            Ok(format!("{}\n", pretty_format_batches(&[batch])?))
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["python_name", "page", "field_value"])?;
            for (category, entries) in &unmatched.entries {
                let pages: Vec<_> = entries.iter().map(|(page, _)| page.to_string()).collect();
                let values: Vec<_> = entries.iter().map(|(_, value)| value.to_string()).collect();
                let pages = format!("[{}]", pages.join(", "));
                let values = format!("[{}]", values.join(", "));
                writer.write_record([category.as_str(), pages.as_str(), values.as_str()])?;
            }
            csv_to_string(writer)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(unmatched)? + "\n"),
    }
}

fn csv_to_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}
