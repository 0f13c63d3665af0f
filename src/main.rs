// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, filtered with RUST_LOG, default "info")
// 2. Parse command-line arguments, prompting for the seed URL if missing
// 3. Crawl the site, saving every page as we go
// 4. Print every visited URL (or the JSON report)
// 5. Exit 0 once the crawl has run, even if some pages (or the seed
//    itself) failed; exit 2 only if we could not read the seed URL or
//    build the HTTP client
// =============================================================================

mod cli;
mod crawl;
mod extract;
mod fetch;
mod save;
mod scope;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use crawl::{CrawlReport, Crawler};
use fetch::HttpFetcher;
use save::FsStore;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run() -> Result<()> {
    // Step 1: Parse command-line arguments
    let config = Cli::parse().into_config();

    // Step 2: Get the seed URL, asking on the terminal if it wasn't given.
    // It is not validated here: a bad seed shows up as a failed page.
    let seed = match config.seed_url {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("Enter a website URL")
            .interact_text()
            .context("could not read the seed URL")?,
    };

    // Step 3: Build the HTTP client and the output store
    let fetcher = HttpFetcher::new(config.timeout).context("could not build the HTTP client")?;
    let store = FsStore::new(&config.output_dir);
    info!("Saving pages under {}", store.base().display());

    // Step 4: Crawl. Per-page failures are already logged and in the report.
    let crawler = Crawler::new(fetcher, store);
    let report = crawler.crawl(&seed).await;

    // Step 5: Show what was visited
    print_report(&report, config.json)
}

// Prints the visited URLs, or the whole report as JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nScraping complete! URLs visited:");
    for url in report.urls() {
        println!("{}", url);
    }

    info!(
        saved = report.saved_count(),
        unsaved = report.unsaved_count(),
        failed = report.failed_count(),
        "Summary"
    );

    Ok(())
}
