use crate::cleaning;
use crate::dataset;
use crate::error::Result;
use crate::storage;
use crate::types::{TradeDirection, TradePortal, WideTable};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

/// Result of one extraction run across all reporting years
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub direction: String,
    pub years_attempted: usize,
    pub years_with_data: usize,
    pub empty_years: Vec<String>,
    pub errors: Vec<String>,
    pub total_rows: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub raw_artifact: String,
}

/// Result of one cleaning pass over a raw artifact
#[derive(Debug, Serialize)]
pub struct CleanSummary {
    pub direction: String,
    pub records: usize,
    pub output_file: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Drive the portal across every reporting year it offers, folding each
    /// year's table into the cumulative wide artifact. A year that times
    /// out or comes back empty is logged and skipped; the run never aborts
    /// for a single year.
    pub async fn run_extraction(
        portal: &dyn TradePortal,
        output_dir: &str,
    ) -> Result<RunSummary> {
        let direction = portal.direction();
        let started_at = Utc::now();
        info!("Starting {} extraction run", direction);

        let years = portal.reporting_years().await?;
        info!("Extracting {} reporting years", years.len());

        let mut wide = WideTable::new();
        let mut years_with_data = 0;
        let mut empty_years = Vec::new();
        let mut errors = Vec::new();

        for year in &years {
            match portal.fetch_year_table(year).await {
                Ok(table) if table.is_empty() => {
                    warn!("No data found for the year {}", year);
                    println!("   No data found for the year {year}.");
                    empty_years.push(year.clone());
                }
                Ok(table) => {
                    info!("Year {}: {} rows extracted", year, table.rows.len());
                    wide.append_year(&table, year);
                    years_with_data += 1;
                }
                Err(e) => {
                    error!("Error extracting table for the year {}: {}", year, e);
                    errors.push(format!("year {year}: {e}"));
                }
            }
        }

        let raw_path = storage::raw_artifact_path(output_dir, direction);
        storage::write_wide_csv(&raw_path, &wide)?;
        info!("Wrote raw artifact to {}", raw_path.display());

        let summary = RunSummary {
            direction: direction.to_string(),
            years_attempted: years.len(),
            years_with_data,
            empty_years,
            errors,
            total_rows: wide.rows.len(),
            started_at,
            finished_at: Utc::now(),
            raw_artifact: raw_path.to_string_lossy().to_string(),
        };
        storage::write_run_summary(&storage::run_summary_path(output_dir, direction), &summary)?;

        Ok(summary)
    }

    /// Clean a previously written raw artifact into the validated long
    /// dataset. A malformed value cell is fatal here, with the offending
    /// column and value named in the error.
    pub fn run_clean(direction: TradeDirection, output_dir: &str) -> Result<CleanSummary> {
        let raw_path = storage::raw_artifact_path(output_dir, direction);
        info!("Cleaning {}", raw_path.display());
        let wide = storage::read_wide_csv(&raw_path)?;

        let records = cleaning::clean(&wide)?;
        let cleaned_path = storage::cleaned_dataset_path(output_dir, direction);
        storage::write_long_csv(&cleaned_path, &records)?;
        info!("Wrote {} cleaned records to {}", records.len(), cleaned_path.display());

        Ok(CleanSummary {
            direction: direction.to_string(),
            records: records.len(),
            output_file: cleaned_path.to_string_lossy().to_string(),
        })
    }

    /// Split a cleaned dataset into the Total and per-commodity subsets the
    /// dashboard consumes.
    pub fn run_subset(direction: TradeDirection, output_dir: &str) -> Result<()> {
        let cleaned_path = storage::cleaned_dataset_path(output_dir, direction);
        let records = storage::read_long_csv(&cleaned_path)?;
        let (total, commodities) = dataset::split_total(&records);

        let total_path = storage::total_subset_path(output_dir, direction);
        let commodities_path = storage::commodity_subset_path(output_dir, direction);
        storage::write_long_csv(&total_path, &total)?;
        storage::write_long_csv(&commodities_path, &commodities)?;
        info!(
            "Split {} records into {} total and {} commodity rows",
            records.len(),
            total.len(),
            commodities.len()
        );
        Ok(())
    }
}
