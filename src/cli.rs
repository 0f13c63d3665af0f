// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Everything is optional: run `doc-scraper` with no arguments and it asks for
// the URL to start from, then saves under ./scraped.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "doc-scraper",
    version,
    about = "Crawl one section of a website and save each page's main text",
    long_about = "doc-scraper starts at a URL, follows every link that stays under that URL's \
                  path on the same host, and saves the main text of each page (code blocks \
                  verbatim) to a file tree that mirrors the site's paths."
)]
pub struct Cli {
    /// URL to start from (e.g., https://example.com/docs)
    ///
    /// Also the crawl boundary: only links under this URL are followed.
    /// If omitted you will be prompted for it.
    pub seed_url: Option<String>,

    /// Directory to save pages under
    #[arg(long, short, default_value = "scraped")]
    pub output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Print the crawl report as JSON instead of a URL list
    #[arg(long)]
    pub json: bool,
}

/// Settings the crawl runs with, fixed for its whole lifetime
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// None means "ask on the terminal"
    pub seed_url: Option<String>,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub json: bool,
}

impl Cli {
    // Consumes the parsed arguments; nothing reads them after this
    pub fn into_config(self) -> CrawlConfig {
        CrawlConfig {
            seed_url: self.seed_url,
            output_dir: self.output,
            timeout: Duration::from_secs(self.timeout),
            json: self.json,
        }
    }
}
