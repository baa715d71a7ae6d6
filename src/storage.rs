//! Durable artifacts of a run: the raw wide extraction table, the cleaned
//! long dataset, the dashboard subsets and the run summary. All tabular
//! files are plain single-sheet CSV, which is the contract the dashboard
//! depends on.

use crate::constants::{COMMODITY_COLUMN, TRADE_VALUE_COLUMN, YEAR_TAG_COLUMN};
use crate::error::{Result, ScraperError};
use crate::pipeline::RunSummary;
use crate::types::{LongRecord, TradeDirection, WideTable};
use std::fs;
use std::path::{Path, PathBuf};

pub fn raw_artifact_path(output_dir: &str, direction: TradeDirection) -> PathBuf {
    Path::new(output_dir).join(format!("{}_trade_data.csv", direction.label()))
}

pub fn cleaned_dataset_path(output_dir: &str, direction: TradeDirection) -> PathBuf {
    Path::new(output_dir).join(format!("cleaned_{}_trade_data.csv", direction.label()))
}

pub fn run_summary_path(output_dir: &str, direction: TradeDirection) -> PathBuf {
    Path::new(output_dir).join(format!("{}_run_summary.json", direction.label()))
}

pub fn total_subset_path(output_dir: &str, direction: TradeDirection) -> PathBuf {
    Path::new(output_dir).join(format!("{}_total.csv", direction.label()))
}

pub fn commodity_subset_path(output_dir: &str, direction: TradeDirection) -> PathBuf {
    Path::new(output_dir).join(format!("{}_commodities.csv", direction.label()))
}

/// Write the cumulative wide table as the raw extraction artifact.
pub fn write_wide_csv(path: &Path, table: &WideTable) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a raw extraction artifact back for the cleaning stage.
pub fn read_wide_csv(path: &Path) -> Result<WideTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(WideTable { columns, rows })
}

/// Write the validated long dataset.
pub fn write_long_csv(path: &Path, records: &[LongRecord]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        // serialize() only emits headers alongside the first record, so an
        // empty dataset still needs the column contract written out.
        writer.write_record([COMMODITY_COLUMN, YEAR_TAG_COLUMN, TRADE_VALUE_COLUMN])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a cleaned long dataset, e.g. for the dashboard subset stage.
pub fn read_long_csv(path: &Path) -> Result<Vec<LongRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Persist the run summary beside the data artifacts.
pub fn write_run_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        ScraperError::Config(format!("output path '{}' has no parent directory", path.display()))
    })?;
    fs::create_dir_all(parent)?;
    Ok(())
}
