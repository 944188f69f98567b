// src/runner.rs
use std::collections::HashSet;
use std::thread;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use crate::Result;
use crate::browser::Browser;
use crate::config::AppOptions;
use crate::progress::Progress;
use crate::scrape::{CycleSummary, Scraper};
use crate::store::ListingStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// One cycle; its failure is returned to the caller.
    Once,
    /// Cycle, sleep, repeat. Failures are logged and the loop goes on.
    Watch,
}

/// Titles already on disk. A file that cannot be read counts as empty.
pub fn load_known_titles(store: &ListingStore) -> HashSet<String> {
    match store.known_titles() {
        Ok(titles) => {
            if !titles.is_empty() {
                info!("Loaded {} previously scraped jobs.", titles.len());
            }
            titles
        }
        Err(e) => {
            error!("Error reading {}: {e}", store.path().display());
            HashSet::new()
        }
    }
}

/// Open a browser, run one cycle, close the browser whatever happened.
pub fn run_once<B, F>(
    scraper: &mut Scraper,
    factory: &mut F,
    today: NaiveDate,
    progress: Option<&mut dyn Progress>,
) -> Result<CycleSummary>
where
    B: Browser,
    F: FnMut() -> Result<B>,
{
    let mut browser = factory().inspect_err(|e| error!("Failed to start browser: {e}"))?;

    let outcome = scraper.run_cycle(&mut browser, today, progress);
    if let Err(e) = &outcome {
        error!("An error occurred during scraping: {e}");
    }
    if let Err(e) = browser.quit() {
        warn!("Failed to close browser: {e}");
    }
    outcome
}

/// Top-level loop. `factory` is called once per cycle for a fresh browser.
/// In `Watch` mode this only returns on a setup error.
pub fn run<B, F>(options: &AppOptions, mut factory: F, mode: RunMode) -> Result<CycleSummary>
where
    B: Browser,
    F: FnMut() -> Result<B>,
{
    let store = ListingStore::new(&options.store.listings);
    let mut scraper = Scraper::new(options, load_known_titles(&store))?;

    loop {
        let today = Local::now().date_naive();
        let outcome = run_once(&mut scraper, &mut factory, today, None);

        match mode {
            RunMode::Once => return outcome,
            RunMode::Watch => {
                info!("Sleeping for {} seconds...", options.check_interval_secs);
                thread::sleep(options.check_interval());
            }
        }
    }
}
