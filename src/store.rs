// src/store.rs
//! The two CSV files the scraper appends to.
//!
//! - `ListingStore`: every newly seen job; its Title column is the dedup key
//!   across runs.
//! - `TodayStore`: jobs posted on the day they were scraped; deduplicated by
//!   Application URL.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::Result;
use crate::config::consts::CSV_SEP;
use crate::csv::first_column;
use crate::file::append_rows;
use crate::job::{Job, LISTING_HEADERS, TODAY_HEADERS};

fn read_first_column(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let text = fs::read_to_string(path)?;
    Ok(first_column(&text, CSV_SEP).into_iter().collect())
}

#[derive(Clone, Debug)]
pub struct ListingStore {
    path: PathBuf,
}

impl ListingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Titles already recorded. Empty when the file does not exist yet.
    pub fn known_titles(&self) -> Result<HashSet<String>> {
        read_first_column(&self.path)
    }

    pub fn append(&self, jobs: &[Job], scraped_at: &str) -> Result<usize> {
        let rows: Vec<Vec<String>> = jobs.iter().map(|j| j.listing_row(scraped_at)).collect();
        append_rows(&self.path, &LISTING_HEADERS, &rows, CSV_SEP)?;
        info!("Saved {} new job(s) to {}.", rows.len(), self.path.display());
        Ok(rows.len())
    }
}

#[derive(Clone, Debug)]
pub struct TodayStore {
    path: PathBuf,
}

impl TodayStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn known_urls(&self) -> Result<HashSet<String>> {
        read_first_column(&self.path)
    }

    /// Append the jobs whose URL is neither in the file nor earlier in `jobs`.
    /// An unreadable file is logged and treated as empty.
    pub fn append_new(&self, jobs: &[Job]) -> Result<usize> {
        let mut existing = match self.known_urls() {
            Ok(urls) => {
                if self.path.exists() {
                    info!("Loaded {} existing job URLs from {}.", urls.len(), self.path.display());
                }
                urls
            }
            Err(e) => {
                error!("Error reading {}: {e}", self.path.display());
                HashSet::new()
            }
        };

        let mut rows = Vec::new();
        for job in jobs {
            if existing.insert(job.link.clone()) {
                info!("Added today's job: {} ({})", job.title, job.link);
                rows.push(job.today_row());
            } else {
                info!("Job already exists in {}. Skipping: {}", self.path.display(), job.link);
            }
        }

        append_rows(&self.path, &TODAY_HEADERS, &rows, CSV_SEP)?;
        info!("Saved {} today's job(s) to {}.", rows.len(), self.path.display());
        Ok(rows.len())
    }
}
