//! Batch processing command for multiple files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use wellx_core::models::WellRecord;
use wellx_core::{WellParser, WellRecordParser, WellxConfig};

use super::process::{csv_header, csv_row, format_record, OutputFormat};
use crate::source::{load_document, LoadOptions, SourceKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (PDF and text files)
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file records
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Also write every record as JSON Lines to this path
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip OCR and use only the PDF text layer
    #[arg(long)]
    no_ocr: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<WellRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(super::load_config(config_path)?);

    let files = collect_files(&args.input, &config.pdf.skip_prefix)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(WellRecordParser::new().with_config(config.as_ref().clone()));
    let options = LoadOptions { no_ocr: args.no_ocr };

    // `buffered` yields in input order while running up to `jobs` files at once.
    let mut outcomes = stream::iter(files.into_iter().map(|path| {
        let config = Arc::clone(&config);
        let parser = Arc::clone(&parser);
        async move { process_single_file(path, config, parser, options).await }
    }))
    .buffered(args.jobs.max(1));

    let mut results = Vec::new();
    while let Some(result) = outcomes.next().await {
        if let Some(message) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), message);
            } else {
                error!("Failed to process {}: {}", result.path.display(), message);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), message);
            }
        }

        if let (Some(record), Some(output_dir)) = (&result.record, &args.output_dir) {
            write_record(output_dir, &result.path, record, args.format)?;
        }

        overall_pb.inc(1);
        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if let Some(jsonl_path) = &args.jsonl {
        write_jsonl(jsonl_path, &results)?;
        eprintln!(
            "{} Records written to {}",
            style("✓").green(),
            jsonl_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Expand the glob, keeping supported files whose names lack `skip_prefix`.
fn collect_files(pattern: &str, skip_prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| SourceKind::from_path(p).is_some())
        .filter(|p| {
            let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let skip = !skip_prefix.is_empty() && name.starts_with(skip_prefix);
            if skip {
                debug!("Skipping {}", p.display());
            }
            !skip
        })
        .collect();
    Ok(files)
}

async fn process_single_file(
    path: PathBuf,
    config: Arc<WellxConfig>,
    parser: Arc<WellRecordParser>,
    options: LoadOptions,
) -> ProcessResult {
    let file_start = Instant::now();

    let outcome = match load_document(&path, &config, options).await {
        Ok(document) => tokio::task::spawn_blocking(move || parser.parse(&document).record)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    let processing_time_ms = file_start.elapsed().as_millis() as u64;
    debug!("{} done in {}ms", path.display(), processing_time_ms);

    match outcome {
        Ok(record) => ProcessResult {
            path,
            record: Some(record),
            error: None,
            processing_time_ms,
        },
        Err(error) => ProcessResult {
            path,
            record: None,
            error: Some(error),
            processing_time_ms,
        },
    }
}

fn write_record(
    output_dir: &Path,
    path: &Path,
    record: &WellRecord,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("record");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    fs::write(&output_path, format_record(record, format)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(csv_header());
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let mut row = vec![file_name(&result.path).to_string()];
        match &result.record {
            Some(record) => {
                row.push("success".to_string());
                row.extend(csv_row(record));
            }
            None => {
                row.push("error".to_string());
                row.extend(csv_header().iter().map(|_| String::new()));
            }
        }
        row.push(result.processing_time_ms.to_string());
        row.push(result.error.clone().unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_jsonl(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut file = std::io::BufWriter::new(fs::File::create(path)?);

    for result in results {
        let line = serde_json::json!({
            "filename": file_name(&result.path),
            "status": if result.record.is_some() { "success" } else { "error" },
            "record": result.record,
            "error": result.error,
        });
        writeln!(file, "{}", serde_json::to_string(&line)?)?;
    }

    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files_skips_prefix_and_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.txt", "ocr_a.pdf", "c.png"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let pattern = format!("{}/*", dir.path().display());
        let files = collect_files(&pattern, "ocr_").unwrap();

        let names: Vec<_> = files.iter().map(|p| file_name(p).to_string()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt"]);
    }

    #[test]
    fn test_summary_rows_for_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let results = vec![
            ProcessResult {
                path: PathBuf::from("ok.txt"),
                record: Some(WellRecord {
                    api_number: Some("33-053-12345".to_string()),
                    ..WellRecord::default()
                }),
                error: None,
                processing_time_ms: 3,
            },
            ProcessResult {
                path: PathBuf::from("bad.txt"),
                record: None,
                error: Some("boom".to_string()),
                processing_time_ms: 1,
            },
        ];

        write_summary(&path, &results).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 2 + csv_header().len() + 2);

        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "ok.txt");
        assert_eq!(&rows[0][1], "success");
        assert_eq!(&rows[0][4], "33-053-12345");
        assert_eq!(&rows[1][1], "error");
        assert_eq!(&rows[1][headers.len() - 1], "boom");
    }
}
