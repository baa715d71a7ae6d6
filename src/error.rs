use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Portal structure error: {0}")]
    PortalStructure(String),

    #[error("Invalid trade value '{value}' in column '{column}'")]
    CellFormat { column: String, value: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;
