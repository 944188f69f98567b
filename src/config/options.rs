// src/config/options.rs
//! Runtime options. Every field has a default from `consts`, and a TOML file
//! (`job_scraper.toml` unless told otherwise) may override any subset.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Pause between two monitoring cycles.
    pub check_interval_secs: u64,
    pub scrape: ScrapeOptions,
    pub driver: DriverOptions,
    pub store: StoreOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            check_interval_secs: CHECK_INTERVAL_SECS,
            scrape: ScrapeOptions::default(),
            driver: DriverOptions::default(),
            store: StoreOptions::default(),
        }
    }
}

impl AppOptions {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// The options file that applies: `explicit`, which must exist, else
    /// `implicit` when it is a file, else none.
    pub fn locate(explicit: Option<&Path>, implicit: &Path) -> Result<Option<PathBuf>> {
        match explicit {
            Some(p) if !p.exists() => Err(Error::MissingConfig(p.to_path_buf())),
            Some(p) => Ok(Some(p.to_path_buf())),
            None => Ok(implicit.is_file().then(|| implicit.to_path_buf())),
        }
    }

    /// Options from the located file (or the defaults) and the file they came from.
    pub fn load_from(explicit: Option<&Path>, implicit: &Path) -> Result<(Self, Option<PathBuf>)> {
        let source = Self::locate(explicit, implicit)?;
        let opts = match &source {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Ok((opts, source))
    }

    /// `load_from` with `job_scraper.toml` in the working directory as the implicit file.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        Self::load_from(explicit, Path::new(CONFIG_FILE))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub url: String,
    pub load_more_xpath: String,
    pub job_card_selector: String,
    pub description_selector: String,
    pub load_more_timeout_secs: u64,
    pub load_more_pause_secs: u64,
    pub detail_timeout_secs: u64,
    pub detail_pause_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(LISTINGS_URL),
            load_more_xpath: s!(LOAD_MORE_XPATH),
            job_card_selector: s!(JOB_CARD_SELECTOR),
            description_selector: s!(DESCRIPTION_SELECTOR),
            load_more_timeout_secs: LOAD_MORE_TIMEOUT_SECS,
            load_more_pause_secs: LOAD_MORE_PAUSE_SECS,
            detail_timeout_secs: DETAIL_TIMEOUT_SECS,
            detail_pause_secs: DETAIL_PAUSE_SECS,
        }
    }
}

impl ScrapeOptions {
    pub fn load_more_timeout(&self) -> Duration { Duration::from_secs(self.load_more_timeout_secs) }
    pub fn load_more_pause(&self) -> Duration { Duration::from_secs(self.load_more_pause_secs) }
    pub fn detail_timeout(&self) -> Duration { Duration::from_secs(self.detail_timeout_secs) }
    pub fn detail_pause(&self) -> Duration { Duration::from_secs(self.detail_pause_secs) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Attach to an already running WebDriver server instead of spawning chromedriver.
    pub webdriver_url: Option<String>,
    pub chromedriver: PathBuf,
    pub port: u16,
    /// Chrome binary handed to chromedriver; its own lookup is used when unset.
    pub chrome_binary: Option<PathBuf>,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub poll_interval_ms: u64,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            webdriver_url: None,
            chromedriver: PathBuf::from(CHROMEDRIVER_BIN),
            port: CHROMEDRIVER_PORT,
            chrome_binary: None,
            headless: true,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

impl DriverOptions {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub listings: PathBuf,
    pub today: PathBuf,
    pub log_file: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            listings: PathBuf::from(LISTINGS_FILE),
            today: PathBuf::from(TODAY_FILE),
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}
