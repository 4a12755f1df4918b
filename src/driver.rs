//! Subcommand implementations. Library errors are wrapped with context here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use labsift_lib::config::LabsiftConfig;
use labsift_lib::intelligence::{learn, RangeInterpreter, ReferenceRangeTable, RowAssessor};
use labsift_lib::models::Verdict;
use labsift_lib::pipeline::extraction::{
    default_pdf_extractor, open_source, DocumentSource, DocumentTextAssembler,
};
use labsift_lib::pipeline::parsing::{ParameterExtractor, PlausibilityFilter};
use labsift_lib::pipeline::processor::ReportProcessor;
use labsift_lib::pipeline::report_store::save_report;

use crate::cli::{ReportsArgs, TableArgs};

pub struct ReportsSummary {
    pub processed: usize,
    pub read_failures: usize,
    pub write_failures: usize,
    pub output_dir: PathBuf,
}

pub fn run_reports(args: &ReportsArgs) -> Result<ReportsSummary> {
    let config = LabsiftConfig::resolve(args.config.as_deref())?;
    let mut table = config.reference_table();
    let assembler = DocumentTextAssembler::new(default_pdf_extractor());

    if let Some(dir) = &args.guidelines {
        learn_guidelines(dir, &assembler, &mut table)?;
    }

    let sources = open_sources(&args.reports_dir, &assembler)?;
    let processor = ReportProcessor::new(
        ParameterExtractor::default(),
        RangeInterpreter::new(&table),
    );
    let batch = processor.process_batch(sources.iter().map(|s| &**s));

    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output_dir());
    let mut write_failures = 0;
    for report in &batch.reports {
        let path = match save_report(report, &output_dir) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(file = %report.file, error = %e, "Could not save report");
                write_failures += 1;
                continue;
            }
        };
        let flagged = report
            .interpreted
            .values()
            .filter(|v| matches!(v.flag, Verdict::Low | Verdict::High))
            .count();
        println!(
            "{}: {} values, {} flagged -> {}",
            report.file,
            report.parsed_simple.len(),
            flagged,
            path.display()
        );
    }

    Ok(ReportsSummary {
        processed: batch.reports.len(),
        read_failures: batch.read_failures.len(),
        write_failures,
        output_dir,
    })
}

/// Learn ranges from every readable guideline and merge them before any
/// report is interpreted. A missing folder leaves `table` unchanged.
fn learn_guidelines(
    dir: &Path,
    assembler: &DocumentTextAssembler,
    table: &mut ReferenceRangeTable,
) -> Result<()> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Guideline folder not found, using current ranges");
        return Ok(());
    }
    let sources = open_sources(dir, assembler)?;
    let texts: Vec<String> = sources
        .iter()
        .filter_map(|source| match source.text_of() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(file = source.name(), error = %e, "Skipping unreadable guideline");
                None
            }
        })
        .collect();

    let delta = learn(&texts);
    tracing::info!(
        documents = texts.len(),
        learned = delta.len(),
        "Guideline learning complete"
    );
    table.merge_learned(&delta);
    Ok(())
}

/// Supported documents in `dir`, in file name order.
fn open_sources<'a>(
    dir: &Path,
    assembler: &'a DocumentTextAssembler,
) -> Result<Vec<Box<dyn DocumentSource + 'a>>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read dir: {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("read dir entry: {}", dir.display()))?
            .path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        match open_source(&path, assembler) {
            Ok(source) => sources.push(source),
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "Skipping file"),
        }
    }
    Ok(sources)
}

pub struct TableSummary {
    pub rows: usize,
    pub rows_with_issues: usize,
}

/// Print one JSON line per CSV row with its column findings.
pub fn run_table(args: &TableArgs) -> Result<TableSummary> {
    let config = LabsiftConfig::resolve(args.config.as_deref())?;
    let table = config.reference_table();
    let plausibility = PlausibilityFilter::default();
    let assessor = RowAssessor::new(RangeInterpreter::new(&table), &plausibility);

    let rows = read_csv_rows(&args.csv)?;
    let mut rows_with_issues = 0;
    for (index, row) in rows.iter().enumerate() {
        let assessment = assessor.assess_row(row, args.sex_column.as_deref());
        if assessment.issues().next().is_some() {
            rows_with_issues += 1;
        }
        let line = serde_json::json!({ "row": index + 1, "assessment": assessment });
        println!("{line}");
    }

    Ok(TableSummary {
        rows: rows.len(),
        rows_with_issues,
    })
}

/// Read a CSV file into row maps keyed by trimmed header.
fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read headers: {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| {
                (
                    header.trim_matches('\u{feff}').trim().to_string(),
                    value.trim().to_string(),
                )
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
