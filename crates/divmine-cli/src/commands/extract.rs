//! Extract command - mine fields from statement page dumps.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use divmine_core::statement::rules::format_german_amount;
use divmine_core::{
    extract_statement, AnchorPolicy, DivmineConfig, ExtractionResult, FieldValue, JsonPageDecoder,
};

use super::load_config;

/// Profile selector that picks the profile by document marker.
const AUTO_BANK: &str = "auto";

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Page dump files (JSON) or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Bank profile, e.g. "DB", or "auto" to detect it from the document
    #[arg(short, long)]
    bank: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write one output file per input into this directory (default: stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write a summary CSV with one row per input
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Skip position-based fields when the document-type marker is missing
    #[arg(long)]
    lenient: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (field,value)
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
}

#[derive(Serialize)]
struct FileOutput<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a ExtractionResult,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.lenient {
        config.extraction.anchor_policy = AnchorPolicy::SkipOffsetFields;
    }

    // Fail early on an unknown bank
    if !args.bank.eq_ignore_ascii_case(AUTO_BANK) {
        config.profile(&args.bank)?;
    }

    let files = expand_inputs(&args.files)?;
    info!("Processing {} files with profile {}", files.len(), args.bank);

    let pb = if files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        match process_single_file(&path, &config, &args.bank) {
            Ok(result) => {
                for warning in &result.warnings {
                    warn!("{}: {}", path.display(), warning);
                }
                results.push(FileResult {
                    path,
                    result: Some(result),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing {} failed: {}", path.display(), error_msg);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    write_outputs(&results, &args)?;

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results, &config)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    if results.len() > 1 || !failed.is_empty() {
        eprintln!(
            "{} Processed {} files in {:?}: {} successful, {} failed",
            style("✓").green(),
            results.len(),
            start.elapsed(),
            style(results.len() - failed.len()).green(),
            style(failed.len()).red()
        );
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

/// Expand glob patterns; plain paths must exist.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let matched: Vec<PathBuf> = glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();

        if matched.is_empty() {
            anyhow::bail!("Input file not found: {}", input);
        }
        files.extend(matched);
    }

    Ok(files)
}

fn process_single_file(
    path: &Path,
    config: &DivmineConfig,
    bank: &str,
) -> anyhow::Result<ExtractionResult> {
    let data = fs::read(path)?;
    let profile_id = (!bank.eq_ignore_ascii_case(AUTO_BANK)).then_some(bank);

    debug!("{}: using profile {}", path.display(), profile_id.unwrap_or(AUTO_BANK));
    Ok(extract_statement(config, &JsonPageDecoder::new(), &data, profile_id)?)
}

/// Output file stems, one per input. Inputs sharing a stem get a `-2`, `-3`,
/// ... suffix in input order.
fn output_stems(paths: &[&Path]) -> Vec<String> {
    let mut used = HashSet::new();
    let mut stems = Vec::with_capacity(paths.len());

    for path in paths {
        let base = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("statement");

        let mut stem = base.to_string();
        let mut n = 1;
        while !used.insert(stem.clone()) {
            n += 1;
            stem = format!("{}-{}", base, n);
        }
        if n > 1 {
            warn!("{}: output renamed to {}", path.display(), stem);
        }
        stems.push(stem);
    }

    stems
}

fn write_outputs(results: &[FileResult], args: &ExtractArgs) -> anyhow::Result<()> {
    let successful: Vec<(&Path, &ExtractionResult)> = results
        .iter()
        .filter_map(|r| r.result.as_ref().map(|res| (r.path.as_path(), res)))
        .collect();

    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;

        let paths: Vec<&Path> = successful.iter().map(|(path, _)| *path).collect();
        let stems = output_stems(&paths);

        for ((path, result), stem) in successful.iter().zip(&stems) {
            let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

            let content = match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&FileOutput {
                    file: path.display().to_string(),
                    result,
                })?,
                OutputFormat::Csv => format_result_csv(result)?,
                OutputFormat::Text => format_result_text(result),
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }

        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_dir.display()
        );
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            let outputs: Vec<FileOutput<'_>> = successful
                .iter()
                .map(|(path, result)| FileOutput {
                    file: path.display().to_string(),
                    result,
                })
                .collect();

            let json = match outputs.as_slice() {
                [single] => serde_json::to_string_pretty(single)?,
                many => serde_json::to_string_pretty(many)?,
            };
            println!("{}", json);
        }
        OutputFormat::Csv | OutputFormat::Text => {
            for (path, result) in &successful {
                if successful.len() > 1 {
                    println!("== {} ==", path.display());
                }
                match args.format {
                    OutputFormat::Csv => print!("{}", format_result_csv(result)?),
                    _ => print!("{}", format_result_text(result)),
                }
            }
        }
    }

    Ok(())
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Amount(d) => format_german_amount(*d),
        FieldValue::Text(s) => s.clone(),
    }
}

fn format_result_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value"])?;
    for (name, value) in result.values.iter() {
        wtr.write_record([name, value.to_string().as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_result_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Profile: {}\n", result.profile));
    let width = result.values.keys().map(str::len).max().unwrap_or(0);
    for (name, value) in result.values.iter() {
        output.push_str(&format!("  {:<width$}  {}\n", name, format_value(value), width = width));
    }

    if !result.missing_fields.is_empty() {
        output.push_str(&format!("Not present: {}\n", result.missing_fields.join(", ")));
    }

    output
}

fn write_summary(path: &Path, results: &[FileResult], config: &DivmineConfig) -> anyhow::Result<()> {
    // Columns: every field of every profile that produced a result
    let mut columns: Vec<String> = Vec::new();
    for result in results.iter().filter_map(|r| r.result.as_ref()) {
        if let Ok(profile) = config.profile(&result.profile) {
            for name in profile.field_names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
    }

    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename".to_string(), "status".to_string(), "profile".to_string()];
    header.extend(columns.iter().cloned());
    header.push("error".to_string());
    wtr.write_record(&header)?;

    for file in results {
        let filename = file
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &file.result {
            Some(result) => {
                record.push("success".to_string());
                record.push(result.profile.clone());
                record.extend(columns.iter().map(|c| {
                    result
                        .values
                        .get(c)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                }));
                record.push(String::new());
            }
            None => {
                record.push("error".to_string());
                record.push(String::new());
                record.extend(columns.iter().map(|_| String::new()));
                record.push(file.error.clone().unwrap_or_default());
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
