// src/specs/job_detail.rs
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::Result;
use crate::config::consts::{POSTED_ON, TITLE_TAG};
use crate::core::html::{first, first_with_string, selector, stripped_text};
use crate::dates::parse_posted_date;
use crate::job::Job;

pub struct JobDetailSpec {
    title: Selector,
    div: Selector,
    description: Selector,
}

impl JobDetailSpec {
    pub fn new(description_css: &str) -> Result<Self> {
        Ok(Self {
            title: selector(TITLE_TAG)?,
            div: selector("div")?,
            description: selector(description_css)?,
        })
    }

    /// Text is "stripped text": every text node trimmed, blanks dropped, the
    /// rest concatenated with no separator. Inner whitespace is kept.
    ///
    /// - title: first `h1` (empty when the `h1` has no text)
    /// - date: first `div` whose own string contains "Posted on:"
    /// - description: first description block
    pub fn parse(&self, page: &str, link: &str, today: NaiveDate) -> Job {
        let doc = Html::parse_document(page);
        let mut job = Job::placeholder(link);

        if let Some(h1) = first(&doc, &self.title) {
            job.title = stripped_text(h1, "");
        }

        match first_with_string(&doc, &self.div, POSTED_ON) {
            Some(div) => {
                let raw = stripped_text(div, "");
                job.date = parse_posted_date(&raw, today);
                info!("Extracted raw date for job '{}': {raw}", job.title);
            }
            None => warn!("Date element not found for job '{}' at {link}", job.title),
        }

        if let Some(desc) = first(&doc, &self.description) {
            job.description = stripped_text(desc, "");
        }

        info!("Scraped job: {} from {link}", job.title);
        job
    }
}
