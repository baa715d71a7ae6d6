use crate::constants::{self, YEAR_TAG_COLUMN};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable period in the portal's year control. The control's option
/// values are opaque codes; the year ranges themselves only appear later as
/// column names of the extracted tables.
pub type ReportingYear = String;

/// The two report flavours the portal offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Import,
    Export,
}

impl TradeDirection {
    /// CLI name as accepted by `--directions`
    pub fn cli_name(&self) -> &'static str {
        match self {
            TradeDirection::Import => constants::IMPORT_DIRECTION,
            TradeDirection::Export => constants::EXPORT_DIRECTION,
        }
    }

    /// Capitalized label used in artifact file names and diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            TradeDirection::Import => "Import",
            TradeDirection::Export => "Export",
        }
    }

    pub fn from_cli_name(name: &str) -> Option<Self> {
        match name {
            constants::IMPORT_DIRECTION => Some(TradeDirection::Import),
            constants::EXPORT_DIRECTION => Some(TradeDirection::Export),
            _ => None,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One rendered results table, reduced to text cells. Row 0 of the rendered
/// table is the header; the remaining rows align positionally to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// A table with no data rows is the explicit "no data for this year"
    /// signal, regardless of whether a header row was rendered.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cumulative wide table built up across reporting years. Columns are
/// unioned by name, so a year that introduces a previously unseen range
/// column grows every existing row with an empty (missing) cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WideTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fold one year's extracted table into the accumulation, tagging every
    /// row with its reporting year. Rows keep their commodity cell, so
    /// alignment across years is by commodity name, never by position.
    pub fn append_year(&mut self, table: &RawTable, year: &ReportingYear) {
        if table.is_empty() {
            return;
        }
        let indices: Vec<usize> = table
            .header
            .iter()
            .map(|name| self.ensure_column(name))
            .collect();
        let year_idx = self.ensure_column(YEAR_TAG_COLUMN);
        for row in &table.rows {
            let mut cells = vec![String::new(); self.columns.len()];
            for (i, cell) in row.iter().enumerate() {
                if let Some(&idx) = indices.get(i) {
                    cells[idx] = cell.clone();
                }
            }
            cells[year_idx] = year.clone();
            self.rows.push(cells);
        }
    }

    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }
}

/// One validated row of the long dataset. Every persisted record has a year
/// matching the four-digit range pattern and a non-missing numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    #[serde(rename = "Commodity")]
    pub commodity: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Trade Value (USD)")]
    pub trade_value: f64,
}

/// Core trait the extraction pipeline drives. The live implementation walks
/// the portal form through a WebDriver session; tests inject a fake that
/// replays canned per-year tables.
#[async_trait::async_trait]
pub trait TradePortal: Send + Sync {
    /// Which report this portal session is scoped to
    fn direction(&self) -> TradeDirection;

    /// Enumerate the year control's available options, once per run
    async fn reporting_years(&self) -> Result<Vec<ReportingYear>>;

    /// Re-apply the dependent selections for one year, submit, and extract
    /// the rendered results table. An empty table means "no data for this
    /// year"; an error means the iteration failed and should be skipped.
    async fn fetch_year_table(&self, year: &ReportingYear) -> Result<RawTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_year_unions_columns_by_name() {
        let mut wide = WideTable::new();
        wide.append_year(
            &RawTable {
                header: vec!["S.No.".into(), "HSCode".into(), "Commodity".into(), "2020-2021".into()],
                rows: vec![vec!["1".into(), "07".into(), "Onions".into(), "10.5".into()]],
            },
            &"2021".to_string(),
        );
        wide.append_year(
            &RawTable {
                header: vec!["S.No.".into(), "HSCode".into(), "Commodity".into(), "2021-2022".into()],
                rows: vec![vec!["1".into(), "07".into(), "Onions".into(), "12.0".into()]],
            },
            &"2122".to_string(),
        );

        assert_eq!(
            wide.columns,
            vec!["S.No.", "HSCode", "Commodity", "2020-2021", "Year", "2021-2022"]
        );
        assert_eq!(wide.rows.len(), 2);
        // The first row gained an empty cell for the later year's column.
        assert_eq!(wide.rows[0], vec!["1", "07", "Onions", "10.5", "2021", ""]);
        assert_eq!(wide.rows[1], vec!["1", "07", "Onions", "", "2122", "12.0"]);
    }

    #[test]
    fn append_year_ignores_empty_tables() {
        let mut wide = WideTable::new();
        wide.append_year(&RawTable::default(), &"2021".to_string());
        assert!(wide.is_empty());
        assert!(wide.columns.is_empty());
    }
}
