use eidb_scraper::cleaning::{clean, melt, retain_valid, MeltedRow};
use eidb_scraper::error::ScraperError;
use eidb_scraper::types::{RawTable, WideTable};

fn wide_table(columns: &[&str], rows: &[&[&str]]) -> WideTable {
    WideTable {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

#[test]
fn worked_example_produces_exactly_one_record() {
    // A Total row with one real value and one placeholder dash.
    let wide = wide_table(
        &["S.No.", "HSCode", "Commodity", "2020-2021", "2021-2022", "Year"],
        &[&["1", "", "Total", "1,234.5", "-", "2021"]],
    );

    let records = clean(&wide).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].commodity, "Total");
    assert_eq!(records[0].year, "2020-2021");
    assert_eq!(records[0].trade_value, 1234.5);
}

#[test]
fn placeholder_dash_never_becomes_zero() {
    let wide = wide_table(
        &["S.No.", "HSCode", "Commodity", "2020-2021", "2021-2022"],
        &[
            &["1", "07", "Onions", "-", "15.0"],
            &["2", "08", "Cashews", "3.5", "-"],
        ],
    );

    let records = clean(&wide).unwrap();
    // The dash cells are absent from the output, not present as zero.
    assert!(!records
        .iter()
        .any(|r| r.commodity == "Onions" && r.year == "2020-2021"));
    assert!(!records
        .iter()
        .any(|r| r.commodity == "Cashews" && r.year == "2021-2022"));
    assert!(!records.iter().any(|r| r.trade_value == 0.0));
    assert_eq!(records.len(), 2);
}

#[test]
fn non_year_columns_never_produce_records() {
    // The aggregator's Year tag and the portal's summary columns are value
    // columns positionally, but their names are not year ranges.
    let wide = wide_table(
        &["S.No.", "HSCode", "Commodity", "2020-2021", "%Growth", "Year"],
        &[&["1", "07", "Onions", "10.5", "42.0", "2021"]],
    );

    let records = clean(&wide).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].year, "2020-2021");
    assert!(!records.iter().any(|r| r.year == "%Growth"));
    assert!(!records.iter().any(|r| r.year == "Year"));
}

#[test]
fn unparseable_cell_aborts_with_column_and_value() {
    let wide = wide_table(
        &["S.No.", "HSCode", "Commodity", "2020-2021"],
        &[&["1", "07", "Onions", "no data"]],
    );

    match clean(&wide) {
        Err(ScraperError::CellFormat { column, value }) => {
            assert_eq!(column, "2020-2021");
            assert_eq!(value, "no data");
        }
        other => panic!("expected a cell-format error, got {other:?}"),
    }
}

#[test]
fn missing_commodity_column_is_a_structure_error() {
    let wide = wide_table(&["S.No.", "HSCode", "Item", "2020-2021"], &[]);
    assert!(matches!(
        clean(&wide),
        Err(ScraperError::PortalStructure(_))
    ));
}

#[test]
fn cells_padded_by_the_column_union_are_missing() {
    // Rows appended from different years lack each other's range columns;
    // the union pads them with empty cells, which clean like dashes.
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

    let records = clean(&wide).unwrap();
    assert_eq!(records.len(), 2);
    // Both years survive under the same commodity name.
    assert!(records
        .iter()
        .any(|r| r.commodity == "Onions" && r.year == "2020-2021" && r.trade_value == 10.5));
    assert!(records
        .iter()
        .any(|r| r.commodity == "Onions" && r.year == "2021-2022" && r.trade_value == 12.0));
}

#[test]
fn validation_filter_is_idempotent() {
    let wide = wide_table(
        &["S.No.", "HSCode", "Commodity", "2020-2021", "2021-2022", "Year"],
        &[
            &["1", "07", "Onions", "10.5", "-", "2021"],
            &["2", "", "Total", "1,234.5", "99.9", "2021"],
        ],
    );

    let first_pass = retain_valid(melt(&wide).unwrap());
    // Feed the validated output straight back through the filter.
    let as_melted: Vec<MeltedRow> = first_pass
        .iter()
        .map(|r| MeltedRow {
            commodity: r.commodity.clone(),
            year: r.year.clone(),
            value: Some(r.trade_value),
        })
        .collect();
    let second_pass = retain_valid(as_melted);

    assert_eq!(first_pass, second_pass);
}
