/// Direction name constants to ensure consistency across the codebase.
/// These are the user-facing names accepted by the CLI.

pub const IMPORT_DIRECTION: &str = "import";
pub const EXPORT_DIRECTION: &str = "export";

/// Get all supported trade directions, in the order a default run executes them
pub fn supported_directions() -> Vec<&'static str> {
    vec![IMPORT_DIRECTION, EXPORT_DIRECTION]
}

// Portal form control ids. The tradestat form names its dependent dropdowns
// out of order: select2 is the year control, select3 the country control and
// select1 the commodity-granularity control.
pub const YEAR_SELECT_ID: &str = "select2";
pub const COUNTRY_SELECT_ID: &str = "select3";
pub const COMMODITY_LEVEL_SELECT_ID: &str = "select1";
pub const ALL_COMMODITIES_RADIO_ID: &str = "radioDAll";
pub const USD_RADIO_ID: &str = "radiousd";
pub const SUBMIT_BUTTON_ID: &str = "button1";

/// Option index of the fixed commodity granularity (2-digit HS level)
pub const COMMODITY_LEVEL_INDEX: u32 = 1;

/// Where the results table body lands after a successful submission
pub const RESULTS_TABLE_XPATH: &str = "/html/body/div/div[2]/div/table/tbody";

// Column names shared between the aggregator, the cleaning stage and the
// persisted artifacts.
pub const COMMODITY_COLUMN: &str = "Commodity";
pub const YEAR_TAG_COLUMN: &str = "Year";
pub const TRADE_VALUE_COLUMN: &str = "Trade Value (USD)";

/// Number of leading identity columns in an extracted table (S.No., HSCode,
/// Commodity); everything after these is a value column.
pub const IDENTITY_COLUMNS: usize = 3;

/// Reserved commodity name for the aggregate-across-all-commodities series
pub const TOTAL_COMMODITY: &str = "Total";

/// Cell text the portal renders where no trade took place
pub const MISSING_PLACEHOLDER: &str = "-";
