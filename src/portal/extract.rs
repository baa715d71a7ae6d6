//! Record extraction: one rendered results table into structured rows.
//!
//! Pure text extraction. Row 0 is the header, rows 1..N are data rows
//! aligned positionally to it; no numeric interpretation happens here.

use crate::types::RawTable;
use scraper::{ElementRef, Html, Selector};

/// Parse the captured results-table HTML into a header plus data rows.
/// Zero rendered rows yields the empty table, the explicit "no data for
/// this year" signal. The column count is whatever the server rendered;
/// it varies by how many year columns the report includes.
pub fn parse_results_table(html: &str) -> RawTable {
    let row_selector = Selector::parse("tr").unwrap();
    let header_selector = Selector::parse("th").unwrap();
    let data_selector = Selector::parse("td").unwrap();

    // The captured handle is the table body. Fragment parsing happens in a
    // body context, where stray table-section tags get dropped by the tree
    // builder, so the markup must be re-rooted under a table first.
    let fragment = Html::parse_fragment(&format!("<table>{html}</table>"));
    let mut header = Vec::new();
    let mut rows = Vec::new();

    for (i, row) in fragment.select(&row_selector).enumerate() {
        if i == 0 {
            header = cell_texts(&row, &header_selector);
            if header.is_empty() {
                // Some report pages render the header row with plain cells.
                header = cell_texts(&row, &data_selector);
            }
        } else {
            let cells = cell_texts(&row, &data_selector);
            if !cells.is_empty() {
                rows.push(cells);
            }
        }
    }

    RawTable { header, rows }
}

fn cell_texts(row: &ElementRef, selector: &Selector) -> Vec<String> {
    row.select(selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}
