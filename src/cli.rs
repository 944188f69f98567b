// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::Result;
use crate::browser::WebDriverBrowser;
use crate::config::AppOptions;
use crate::config::consts::{ENV_CHROME, ENV_CHROMEDRIVER, ENV_ONCE};
use crate::runner::{self, RunMode};

#[derive(Debug, Parser)]
#[command(name = "job_scraper", version, about = "Watch ytjobs.co for new job postings")]
pub struct Args {
    /// TOML options file (default: ./job_scraper.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long, env = ENV_ONCE)]
    pub once: bool,

    /// Seconds between cycles
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Listings page to start from
    #[arg(long)]
    pub url: Option<String>,

    /// Use a running WebDriver server instead of spawning chromedriver
    #[arg(long, value_name = "URL")]
    pub webdriver_url: Option<String>,

    #[arg(long, value_name = "PATH", env = ENV_CHROMEDRIVER)]
    pub chromedriver: Option<PathBuf>,

    /// Chrome binary passed to chromedriver
    #[arg(long, value_name = "PATH", env = ENV_CHROME)]
    pub chrome: Option<PathBuf>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Show the browser window
    #[arg(long)]
    pub no_headless: bool,

    #[arg(long, value_name = "PATH")]
    pub listings: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub today: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn mode(&self) -> RunMode {
        if self.once { RunMode::Once } else { RunMode::Watch }
    }

    /// Flags win over the options file.
    pub fn apply(&self, opts: &mut AppOptions) {
        if let Some(v) = self.interval { opts.check_interval_secs = v; }
        if let Some(v) = &self.url { opts.scrape.url = v.clone(); }
        if let Some(v) = &self.webdriver_url { opts.driver.webdriver_url = Some(v.clone()); }
        if let Some(v) = &self.chromedriver { opts.driver.chromedriver = v.clone(); }
        if let Some(v) = &self.chrome { opts.driver.chrome_binary = Some(v.clone()); }
        if let Some(v) = self.port { opts.driver.port = v; }
        if self.no_headless { opts.driver.headless = false; }
        if let Some(v) = &self.listings { opts.store.listings = v.clone(); }
        if let Some(v) = &self.today { opts.store.today = v.clone(); }
        if let Some(v) = &self.log_file { opts.store.log_file = v.clone(); }
    }
}

pub fn run(args: Args) -> Result<()> {
    let (mut options, source) = AppOptions::load(args.config.as_deref())?;
    args.apply(&mut options);

    crate::log::init(&options.store.log_file)?;
    if let Some(path) = &source {
        info!("Loaded options from {}", path.display());
    }
    info!("Starting job_scraper for {} ({:?})", options.scrape.url, args.mode());

    let driver = options.driver.clone();
    let summary = runner::run(&options, || WebDriverBrowser::launch(&driver), args.mode())?;
    info!(
        "Cycle done: {} link(s), {} new job(s), {} posted today.",
        summary.links, summary.new_jobs, summary.todays_jobs
    );
    Ok(())
}
