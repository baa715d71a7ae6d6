//! Navigation of the EIDB portal form.
//!
//! The portal renders its report through a multi-step form whose country
//! and granularity controls only become valid after a year is selected, and
//! whose results page is scoped to the server session. The navigator walks
//! FormReady → YearSelected → DependentsReady → Submitted → ResultsReady
//! for every reporting year, with each transition bounded by the configured
//! wait timeout, and returns to FormReady after every iteration because the
//! session resets navigation context each time.

pub mod extract;

use crate::config::PortalConfig;
use crate::constants::{
    ALL_COMMODITIES_RADIO_ID, COMMODITY_LEVEL_INDEX, COMMODITY_LEVEL_SELECT_ID, COUNTRY_SELECT_ID,
    RESULTS_TABLE_XPATH, SUBMIT_BUTTON_ID, USD_RADIO_ID, YEAR_SELECT_ID,
};
use crate::error::Result;
use crate::types::{RawTable, ReportingYear, TradeDirection, TradePortal};
use std::time::Duration;
use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;
use tracing::{debug, info, warn};

pub struct EidbNavigator {
    driver: WebDriver,
    direction: TradeDirection,
    config: PortalConfig,
}

impl EidbNavigator {
    /// Start a WebDriver session and open the direction's report form.
    /// The session is quit before returning if the form cannot be reached.
    pub async fn connect(config: &PortalConfig, direction: TradeDirection) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        if config.headless {
            caps.add_arg("--headless=new")?;
        }

        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        let navigator = Self {
            driver,
            direction,
            config: config.clone(),
        };
        match navigator.open_report().await {
            Ok(()) => Ok(navigator),
            Err(e) => {
                navigator.shutdown().await;
                Err(e)
            }
        }
    }

    /// Quit the WebDriver session. Called on every exit path of a scrape
    /// run; a killed session would otherwise linger server-side.
    pub async fn shutdown(self) {
        if let Err(e) = self.driver.quit().await {
            warn!("Failed to shut down WebDriver session: {}", e);
        }
    }

    async fn open_report(&self) -> Result<()> {
        info!("Opening {} report at {}", self.direction, self.config.base_url);
        self.driver.goto(&self.config.base_url).await?;
        let link = self
            .wait_for(By::XPath(self.config.report_link(self.direction)))
            .await?;
        link.click().await?;
        // FormReady: the year control is the root of the dependent chain.
        self.wait_for(By::Id(YEAR_SELECT_ID)).await?;
        Ok(())
    }

    /// Select the year, re-apply the dependent selections, submit, and
    /// capture the rendered results table.
    async fn submit_year(&self, year: &ReportingYear) -> Result<String> {
        debug!("Selecting reporting year {}", year);
        let year_control = self.wait_for(By::Id(YEAR_SELECT_ID)).await?;
        SelectElement::new(&year_control)
            .await?
            .select_by_value(year)
            .await?;

        // The country control repopulates once the year changes.
        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        let country_control = self.wait_for(By::Id(COUNTRY_SELECT_ID)).await?;
        SelectElement::new(&country_control)
            .await?
            .select_by_value(&self.config.country_value)
            .await?;

        let level_control = self.driver.find(By::Id(COMMODITY_LEVEL_SELECT_ID)).await?;
        SelectElement::new(&level_control)
            .await?
            .select_by_index(COMMODITY_LEVEL_INDEX)
            .await?;

        self.driver
            .find(By::Id(ALL_COMMODITIES_RADIO_ID))
            .await?
            .click()
            .await?;
        self.driver.find(By::Id(USD_RADIO_ID)).await?.click().await?;
        self.driver
            .find(By::Id(SUBMIT_BUTTON_ID))
            .await?
            .click()
            .await?;

        let table = self.wait_for(By::XPath(RESULTS_TABLE_XPATH)).await?;
        Ok(table.outer_html().await?)
    }

    /// Return to FormReady for the next iteration.
    async fn reset_form(&self) -> Result<()> {
        self.driver.back().await?;
        tokio::time::sleep(Duration::from_millis(self.config.back_delay_ms)).await;
        self.wait_for(By::Id(YEAR_SELECT_ID)).await?;
        Ok(())
    }

    async fn wait_for(&self, by: By) -> Result<WebElement> {
        let element = self
            .driver
            .query(by)
            .wait(self.wait_timeout(), self.poll_interval())
            .first()
            .await?;
        Ok(element)
    }

    fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.config.wait_timeout_seconds)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }
}

#[async_trait::async_trait]
impl TradePortal for EidbNavigator {
    fn direction(&self) -> TradeDirection {
        self.direction
    }

    async fn reporting_years(&self) -> Result<Vec<ReportingYear>> {
        let year_control = self.wait_for(By::Id(YEAR_SELECT_ID)).await?;
        let select = SelectElement::new(&year_control).await?;
        let mut years = Vec::new();
        for option in select.options().await? {
            if let Some(value) = option.attr("value").await? {
                if !value.is_empty() {
                    years.push(value);
                }
            }
        }
        info!("Portal offers {} reporting years", years.len());
        Ok(years)
    }

    async fn fetch_year_table(&self, year: &ReportingYear) -> Result<RawTable> {
        let outcome = self.submit_year(year).await;
        // The form must be re-entered whether or not the submission worked;
        // the next iteration starts from FormReady either way.
        if let Err(e) = self.reset_form().await {
            warn!("Failed to return to the report form after year {}: {}", year, e);
        }
        let html = outcome?;
        Ok(extract::parse_results_table(&html))
    }
}
