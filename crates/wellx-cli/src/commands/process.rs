//! Process command - extract a record from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use wellx_core::models::{Field, WellRecord};
use wellx_core::{ExtractionResult, WellParser, WellRecordParser};

use crate::source::{load_document, LoadOptions};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip OCR and use only the PDF text layer
    #[arg(long)]
    no_ocr: bool,

    /// Show which strategy produced each field
    #[arg(long)]
    show_sources: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message("Reading document...");

    let options = LoadOptions { no_ocr: args.no_ocr };
    let document = load_document(&args.input, &config, options).await?;

    pb.set_message("Extracting record...");
    let parser = WellRecordParser::new().with_config(config);
    let result = parser.parse(&document);

    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_sources {
        print_sources(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_sources(result: &ExtractionResult) {
    eprintln!();
    for (field, source) in &result.sources {
        let line = match source.position {
            Some((start, _)) => format!(" @{}", start),
            None => String::new(),
        };
        eprintln!(
            "{} {:<34} {:?} {:.2}{}",
            style("ℹ").blue(),
            field.as_str(),
            source.strategy,
            source.confidence,
            line
        );
    }
    eprintln!(
        "{} {} fields missing, {}ms",
        style("ℹ").blue(),
        result.missing_fields.len(),
        result.processing_time_ms
    );
}

pub fn format_record(record: &WellRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Column names in output order.
pub fn csv_header() -> Vec<&'static str> {
    Field::ALL.iter().map(|f| f.as_str()).collect()
}

/// One CSV row; absent fields are empty cells.
pub fn csv_row(record: &WellRecord) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|f| record.display(*f).unwrap_or_default())
        .collect()
}

fn format_csv(record: &WellRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(csv_header())?;
    wtr.write_record(csv_row(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &WellRecord) -> String {
    let mut output = String::new();

    let title = record.well_name_number.as_deref().unwrap_or("(unnamed well)");
    output.push_str(&format!("Well: {}\n", title));
    if let Some(api) = &record.api_number {
        output.push_str(&format!("API:  {}\n", api));
    }
    output.push('\n');

    for field in Field::ALL {
        if matches!(field, Field::WellNameNumber | Field::ApiNumber | Field::Details) {
            continue;
        }
        if let Some(value) = record.display(field) {
            output.push_str(&format!("  {:<34} {}\n", field.as_str(), value));
        }
    }

    if let Some(details) = &record.details {
        output.push_str(&format!("\nDetails:\n  {}\n", details));
    }

    let missing = record.missing_fields();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|f| f.as_str()).collect();
        output.push_str(&format!("\nMissing: {}\n", names.join(", ")));
    }

    output
}
