// src/job.rs
use chrono::NaiveDate;

use crate::config::consts::NOT_AVAILABLE;
use crate::dates::format_date;

/// `job_listings.csv` columns.
pub const LISTING_HEADERS: [&str; 5] = ["Title", "Link", "Date", "Description", "Scrape Timestamp"];
/// `today_jobs.csv` columns.
pub const TODAY_HEADERS: [&str; 3] = ["Application URL", "Name", "Date Posted"];

/// One job posting as read from its detail page.
/// Fields the page did not provide hold `N/A`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub title: String,
    pub link: String,
    pub date: Option<NaiveDate>,
    pub description: String,
}

impl Job {
    /// Record kept for a detail page that could not be read.
    pub fn placeholder(link: &str) -> Self {
        Self {
            title: s!(NOT_AVAILABLE),
            link: s!(link),
            date: None,
            description: s!(NOT_AVAILABLE),
        }
    }

    pub fn posted_on(&self, day: NaiveDate) -> bool {
        self.date == Some(day)
    }

    pub fn date_text(&self) -> String {
        format_date(self.date)
    }

    pub fn listing_row(&self, scraped_at: &str) -> Vec<String> {
        vec![
            self.title.clone(),
            self.link.clone(),
            self.date_text(),
            self.description.clone(),
            s!(scraped_at),
        ]
    }

    pub fn today_row(&self) -> Vec<String> {
        vec![self.link.clone(), self.title.clone(), self.date_text()]
    }
}
