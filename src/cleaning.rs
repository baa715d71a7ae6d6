//! Wide-to-long reshape and validation of the extraction artifact.
//!
//! Everything here is a pure function of its input: the same wide table
//! always cleans to the same long dataset.

use crate::constants::{COMMODITY_COLUMN, IDENTITY_COLUMNS, MISSING_PLACEHOLDER};
use crate::error::{Result, ScraperError};
use crate::types::{LongRecord, WideTable};
use once_cell::sync::Lazy;
use regex::Regex;

/// Proper year columns are named as four-digit–dash–four-digit ranges,
/// e.g. "2020-2021". Anything else ("Total", "%Growth", the appended Year
/// tag) is a summary column the validation filter excludes.
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{4}").unwrap());

pub fn is_year_range(label: &str) -> bool {
    YEAR_RANGE.is_match(label)
}

/// One melted cell, before validation. A `None` value is a missing cell
/// (placeholder dash, or padding from the column union).
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedRow {
    pub commodity: String,
    pub year: String,
    pub value: Option<f64>,
}

/// Coerce one raw value cell into a number or an explicit missing marker.
///
/// Thousands separators are stripped first; a lone dash (and the empty cell
/// left behind by the column union) is missing. Anything else that still
/// fails to parse is a fatal input-format error, never silently coerced.
pub fn parse_trade_value(column: &str, raw: &str) -> Result<Option<f64>> {
    let stripped = raw.replace(',', "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() || trimmed == MISSING_PLACEHOLDER {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ScraperError::CellFormat {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Melt every value column into long form: one row per (commodity, value
/// column) pair, with the column name becoming the year field. The first
/// columns of the wide table are identity columns and are not melted.
pub fn melt(wide: &WideTable) -> Result<Vec<MeltedRow>> {
    let commodity_idx = wide
        .columns
        .iter()
        .position(|c| c == COMMODITY_COLUMN)
        .ok_or_else(|| {
            ScraperError::PortalStructure(format!(
                "wide table has no '{}' column",
                COMMODITY_COLUMN
            ))
        })?;

    let mut melted = Vec::new();
    for row in &wide.rows {
        let commodity = row.get(commodity_idx).cloned().unwrap_or_default();
        for (idx, column) in wide.columns.iter().enumerate().skip(IDENTITY_COLUMNS) {
            let raw = row.get(idx).map(String::as_str).unwrap_or("");
            let value = parse_trade_value(column, raw)?;
            melted.push(MeltedRow {
                commodity: commodity.clone(),
                year: column.clone(),
                value,
            });
        }
    }
    Ok(melted)
}

/// Keep a melted row only if its year label is a proper range and its value
/// is present. Dropping is silent: this is the designed mechanism for
/// excluding the Year tag, growth and summary columns, never an error.
/// Applying the filter to its own output drops nothing further.
pub fn retain_valid(melted: Vec<MeltedRow>) -> Vec<LongRecord> {
    melted
        .into_iter()
        .filter_map(|row| match row.value {
            Some(value) if is_year_range(&row.year) => Some(LongRecord {
                commodity: row.commodity,
                year: row.year,
                trade_value: value,
            }),
            _ => None,
        })
        .collect()
}

/// The full reshape/validate stage: melt, then filter.
pub fn clean(wide: &WideTable) -> Result<Vec<LongRecord>> {
    Ok(retain_valid(melt(wide)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_separated_numbers() {
        assert_eq!(parse_trade_value("2020-2021", "1234.5").unwrap(), Some(1234.5));
        assert_eq!(parse_trade_value("2020-2021", "1,234.5").unwrap(), Some(1234.5));
        // Indian-style grouping strips the same way.
        assert_eq!(
            parse_trade_value("2020-2021", "12,34,567.89").unwrap(),
            Some(1234567.89)
        );
    }

    #[test]
    fn dash_and_empty_are_missing() {
        assert_eq!(parse_trade_value("2020-2021", "-").unwrap(), None);
        assert_eq!(parse_trade_value("2020-2021", "").unwrap(), None);
    }

    #[test]
    fn negative_values_are_not_placeholders() {
        assert_eq!(parse_trade_value("2020-2021", "-12.5").unwrap(), Some(-12.5));
    }

    #[test]
    fn garbage_cells_are_fatal() {
        let err = parse_trade_value("2020-2021", "n.a.").unwrap_err();
        match err {
            ScraperError::CellFormat { column, value } => {
                assert_eq!(column, "2020-2021");
                assert_eq!(value, "n.a.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn year_range_pattern() {
        assert!(is_year_range("2020-2021"));
        assert!(!is_year_range("Total"));
        assert!(!is_year_range("%Growth"));
        assert!(!is_year_range("Year"));
    }
}
