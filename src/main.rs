use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use yc_scraper::common::constants::DEFAULT_CONFIG_PATH;
use yc_scraper::config::Config;
use yc_scraper::infra::FsSnapshotStore;
use yc_scraper::observability::{self, TracingObserver};
use yc_scraper::pipeline::ingestion::crawler::{CrawlReport, Crawler};
use yc_scraper::pipeline::ingestion::seeds::read_seed_urls;
use yc_scraper::pipeline::output::{prepare_output_dir, write_companies};
use yc_scraper::pipeline::processing::locator::StateLocator;
use yc_scraper::pipeline::{Aggregator, RunSummary};

#[derive(Parser)]
#[command(name = "yc_scraper")]
#[command(about = "Extract structured company records from Y Combinator company pages")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every seed URL and store page snapshots
    Crawl {
        /// CSV file with a "YC URL" column
        #[arg(long)]
        seeds: Option<PathBuf>,
        /// Snapshot directory
        #[arg(long)]
        storage: Option<PathBuf>,
    },
    /// Extract companies from stored snapshots and write the JSON output
    Extract {
        /// Snapshot directory
        #[arg(long)]
        storage: Option<PathBuf>,
        /// Output JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Crawl, then extract
    Run {
        #[arg(long)]
        seeds: Option<PathBuf>,
        #[arg(long)]
        storage: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

async fn crawl(config: &Config) -> anyhow::Result<CrawlReport> {
    let urls = read_seed_urls(&config.paths.seeds_path, &config.crawl.url_column)?;
    let store = FsSnapshotStore::new(&config.paths.storage_dir);
    // Each crawl starts from an empty dataset so stale pages don't leak into the output
    store.reset().await?;
    let crawler = Crawler::new(&config.crawl, store, config.extraction.max_concurrency)?;
    Ok(crawler.crawl(urls).await?)
}

async fn extract(config: &Config) -> anyhow::Result<RunSummary> {
    let locator = StateLocator::new(&config.extraction.marker_attribute)?;
    let aggregator = Aggregator::new(
        Arc::new(FsSnapshotStore::new(&config.paths.storage_dir)),
        Arc::new(TracingObserver),
        locator,
    )
    .with_max_concurrency(config.extraction.max_concurrency);

    // A listing failure still produces an (empty) output file
    let (companies, summary) = match aggregator.try_process_dataset().await {
        Ok(run) => (run.companies, Some(run.summary)),
        Err(e) => {
            error!("Extraction aborted: {}", e);
            (Vec::new(), None)
        }
    };

    prepare_output_dir(&config.paths.output_dir)?;
    let output_path = config.output_path();
    write_companies(&output_path, &companies)?;
    println!("💾 Data written to {}", output_path.display());

    summary.with_context(|| {
        format!(
            "could not list snapshots in {}",
            config.paths.storage_dir.display()
        )
    })
}

fn print_crawl_report(report: &CrawlReport) {
    println!("\n🕸️  Crawl results:");
    println!("   Requested: {}", report.requested);
    println!("   Stored: {}", report.stored);
    println!("   Failed: {}", report.failed);
}

fn print_summary(summary: &RunSummary) {
    println!("\n📊 Extraction results:");
    println!("   Snapshots: {}", summary.listed);
    println!("   Companies: {}", summary.extracted);
    println!("   Skipped: {}", summary.skipped);
    println!("   Failed: {}", summary.failed);
    println!(
        "   Duration: {}ms",
        (summary.finished_at - summary.started_at).num_milliseconds()
    );
}

fn apply_cli_paths(
    config: &mut Config,
    seeds: Option<PathBuf>,
    storage: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(seeds) = seeds {
        config.paths.seeds_path = seeds;
    }
    if let Some(storage) = storage {
        config.paths.storage_dir = storage;
    }
    if let Some(output) = output {
        config.set_output_path(&output)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = observability::init_logging()?;

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Crawl { seeds, storage } => {
            apply_cli_paths(&mut config, seeds, storage, None)?;
            println!("🔄 Crawling seed URLs...");
            let report = crawl(&config).await?;
            print_crawl_report(&report);
        }
        Commands::Extract { storage, output } => {
            apply_cli_paths(&mut config, None, storage, output)?;
            println!("🔨 Extracting companies...");
            let summary = extract(&config).await?;
            print_summary(&summary);
        }
        Commands::Run {
            seeds,
            storage,
            output,
        } => {
            apply_cli_paths(&mut config, seeds, storage, output)?;
            println!("🚀 Running full pipeline (crawl + extract)...");

            println!("\n📥 Step 1: Crawling...");
            let report = crawl(&config).await?;
            print_crawl_report(&report);

            println!("\n🔨 Step 2: Extracting...");
            let summary = extract(&config).await?;
            print_summary(&summary);
        }
    }

    info!("Done");
    Ok(())
}
