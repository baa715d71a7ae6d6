use crate::error::{Result, ScraperError};
use crate::types::TradeDirection;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub portal: PortalConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    pub webdriver_url: String,
    pub headless: bool,
    /// Option value of the fixed target country in the dependent dropdown
    pub country_value: String,
    pub wait_timeout_seconds: u64,
    pub poll_interval_ms: u64,
    /// Pause after selecting a year, while the country control repopulates
    pub settle_delay_ms: u64,
    /// Pause after navigating back to the form between iterations
    pub back_delay_ms: u64,
    pub import: ReportConfig,
    pub export: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// XPath of the landing-page link that opens this report's form
    pub report_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

impl PortalConfig {
    pub fn report_link(&self, direction: TradeDirection) -> &str {
        match direction {
            TradeDirection::Import => &self.import.report_link,
            TradeDirection::Export => &self.export.report_link,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
