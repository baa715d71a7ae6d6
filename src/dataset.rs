//! Dashboard-facing views over the cleaned long dataset.
//!
//! The dashboard splits every direction's dataset into the "Total" aggregate
//! series and the per-commodity breakdown, then resolves its two filter
//! controls into one of four views. Both operations are pure filters so any
//! consumer reproduces them exactly from the same dataset.

use crate::constants::TOTAL_COMMODITY;
use crate::types::LongRecord;

/// Partition the cleaned dataset into (Total series, per-commodity series).
/// The two subsets are disjoint and their union is the input.
pub fn split_total(records: &[LongRecord]) -> (Vec<LongRecord>, Vec<LongRecord>) {
    let mut total = Vec::new();
    let mut commodities = Vec::new();
    for record in records {
        if record.commodity == TOTAL_COMMODITY {
            total.push(record.clone());
        } else {
            commodities.push(record.clone());
        }
    }
    (total, commodities)
}

/// The state of the dashboard's two independent filter controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub commodity: Option<String>,
    pub year: Option<String>,
}

/// What the dashboard renders for a given filter selection
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No filter selected: the Total aggregate as a time series
    TotalSeries { points: Vec<LongRecord> },
    /// Commodity selected: that commodity's time series, with the value
    /// axis scaled to its own maximum
    CommoditySeries {
        commodity: String,
        points: Vec<LongRecord>,
        axis_max: f64,
    },
    /// Year selected: a bar per commodity for that year
    YearBreakdown { year: String, bars: Vec<LongRecord> },
    /// Both filters selected: the dashboard deliberately shows a
    /// "select one dimension" placeholder instead of an intersection.
    Placeholder,
}

/// Resolve a filter selection against the cleaned dataset.
pub fn select_view(records: &[LongRecord], selection: &FilterSelection) -> DashboardView {
    let (total, commodities) = split_total(records);
    match (&selection.commodity, &selection.year) {
        (None, None) => DashboardView::TotalSeries { points: total },
        (Some(commodity), None) => {
            let points: Vec<LongRecord> = commodities
                .into_iter()
                .filter(|r| &r.commodity == commodity)
                .collect();
            let axis_max = points
                .iter()
                .map(|r| r.trade_value)
                .fold(0.0_f64, f64::max)
                * 1.1;
            DashboardView::CommoditySeries {
                commodity: commodity.clone(),
                points,
                axis_max,
            }
        }
        (None, Some(year)) => {
            let bars: Vec<LongRecord> = commodities
                .into_iter()
                .filter(|r| &r.year == year)
                .collect();
            DashboardView::YearBreakdown {
                year: year.clone(),
                bars,
            }
        }
        (Some(_), Some(_)) => DashboardView::Placeholder,
    }
}
