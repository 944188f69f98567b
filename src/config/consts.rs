// src/config/consts.rs

// Site
pub const LISTINGS_URL: &str = "https://ytjobs.co";
pub const LOAD_MORE_XPATH: &str = "//button[contains(text(), 'Load More')]";
pub const JOB_CARD_SELECTOR: &str = "div[data-testid='jobCardElement']";
pub const DESCRIPTION_SELECTOR: &str = "div.ql-editor";
pub const TITLE_TAG: &str = "h1";
pub const POSTED_ON: &str = "Posted on:";

// Timing
pub const CHECK_INTERVAL_SECS: u64 = 3600;
pub const LOAD_MORE_TIMEOUT_SECS: u64 = 10;
pub const LOAD_MORE_PAUSE_SECS: u64 = 3; // let new cards render
pub const DETAIL_TIMEOUT_SECS: u64 = 10;
pub const DETAIL_PAUSE_SECS: u64 = 1;
pub const POLL_INTERVAL_MS: u64 = 500;
pub const HTTP_TIMEOUT_SECS: u64 = 60;
pub const DRIVER_STARTUP_SECS: u64 = 20;

// Driver
pub const CHROMEDRIVER_BIN: &str = "chromedriver";
pub const CHROMEDRIVER_PORT: u16 = 9515;
pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;
pub const USER_AGENT: &str = concat!("job_scraper/", env!("CARGO_PKG_VERSION"));

// Files
pub const LISTINGS_FILE: &str = "job_listings.csv";
pub const TODAY_FILE: &str = "today_jobs.csv";
pub const LOG_FILE: &str = "job_scraper.log";
pub const CONFIG_FILE: &str = "job_scraper.toml";

// Environment (flag equivalents for runs without arguments)
pub const ENV_ONCE: &str = "JOB_SCRAPER_ONCE";
pub const ENV_CHROME: &str = "JOB_SCRAPER_CHROME";
pub const ENV_CHROMEDRIVER: &str = "JOB_SCRAPER_CHROMEDRIVER";

// Output
pub const CSV_SEP: char = ',';
pub const NOT_AVAILABLE: &str = "N/A";
pub const DATE_FORMAT: &str = "%m-%d-%Y";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
