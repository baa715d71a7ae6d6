use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use eidb_scraper::config::Config;
use eidb_scraper::constants;
use eidb_scraper::logging;
use eidb_scraper::pipeline::{Pipeline, RunSummary};
use eidb_scraper::portal::EidbNavigator;
use eidb_scraper::types::TradeDirection;

#[derive(Parser)]
#[command(name = "eidb_scraper")]
#[command(about = "India-Australia trade data scraper for the tradestat EIDB portal")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the portal and write the raw wide artifact
    Scrape {
        /// Trade directions to run (comma-separated). Available: import, export
        #[arg(long)]
        directions: Option<String>,
    },
    /// Clean a previously scraped raw artifact into the long dataset
    Clean {
        /// Trade directions to clean (comma-separated)
        #[arg(long)]
        directions: Option<String>,
    },
    /// Run scrape and clean sequentially
    Run {
        /// Trade directions to run (comma-separated)
        #[arg(long)]
        directions: Option<String>,
    },
    /// Split a cleaned dataset into the dashboard's Total and commodity subsets
    Subset {
        /// Trade directions to split (comma-separated)
        #[arg(long)]
        directions: Option<String>,
    },
}

fn parse_directions(arg: Option<String>) -> Vec<TradeDirection> {
    let names: Vec<String> = match arg {
        Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
        None => constants::supported_directions()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let mut directions = Vec::new();
    for name in &names {
        match TradeDirection::from_cli_name(name) {
            Some(direction) => directions.push(direction),
            None => {
                warn!("Unknown trade direction specified");
                println!("⚠️  Unknown direction: {name}");
            }
        }
    }
    directions
}

fn print_run_summary(summary: &RunSummary) {
    println!("\n📊 Extraction Results for {}:", summary.direction);
    println!("   Years attempted: {}", summary.years_attempted);
    println!("   Years with data: {}", summary.years_with_data);
    println!("   Empty years: {}", summary.empty_years.len());
    println!("   Errors: {}", summary.errors.len());
    println!("   Rows extracted: {}", summary.total_rows);
    println!("   Raw artifact: {}", summary.raw_artifact);

    if !summary.errors.is_empty() {
        warn!("{} years failed during the extraction run", summary.errors.len());
        println!("\n⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("   - {error}");
        }
    }
}

/// Scrape one direction. Per-year failures are already absorbed inside the
/// pipeline; a failure to reach the report at all is logged and skipped so
/// the other direction still runs.
async fn scrape_direction(config: &Config, direction: TradeDirection) {
    let span = tracing::info_span!("Scraping direction", direction = %direction);
    let _enter = span.enter();

    println!("🔄 Scraping {} trade data...", direction);
    let navigator = match EidbNavigator::connect(&config.portal, direction).await {
        Ok(navigator) => navigator,
        Err(e) => {
            error!("Failed to open the {} report: {}", direction, e);
            println!("⚠️  Failed to open the {direction} report: {e}");
            return;
        }
    };

    // The browser session is shut down before the outcome is inspected,
    // error path included.
    let outcome = Pipeline::run_extraction(&navigator, &config.output.dir).await;
    navigator.shutdown().await;

    match outcome {
        Ok(summary) => {
            info!("Extraction run finished");
            print_run_summary(&summary);
        }
        Err(e) => {
            error!("Extraction run failed: {}", e);
            println!("⚠️  Extraction run for {direction} failed: {e}");
        }
    }
}

fn clean_direction(config: &Config, direction: TradeDirection) -> anyhow::Result<()> {
    println!("🧹 Cleaning {} trade data...", direction);
    let summary = Pipeline::run_clean(direction, &config.output.dir)?;
    println!(
        "✅ Wrote {} records to {}",
        summary.records, summary.output_file
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Scrape { directions } => {
            for direction in parse_directions(directions) {
                scrape_direction(&config, direction).await;
            }
        }
        Commands::Clean { directions } => {
            for direction in parse_directions(directions) {
                // A cell-format error is fatal for the run; the offending
                // column and value are in the diagnostic.
                clean_direction(&config, direction)?;
            }
        }
        Commands::Run { directions } => {
            let directions = parse_directions(directions);
            for direction in &directions {
                scrape_direction(&config, *direction).await;
            }
            for direction in &directions {
                clean_direction(&config, *direction)?;
            }
        }
        Commands::Subset { directions } => {
            for direction in parse_directions(directions) {
                println!("📂 Splitting {} dataset for the dashboard...", direction);
                Pipeline::run_subset(direction, &config.output.dir)?;
            }
        }
    }

    Ok(())
}
