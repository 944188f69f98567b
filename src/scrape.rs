// src/scrape.rs
//! One monitoring cycle: expand the listings page, visit every job, store
//! what is new.
use std::collections::HashSet;
use std::thread;

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::browser::{Browser, Locator};
use crate::config::consts::{TIMESTAMP_FORMAT, TITLE_TAG};
use crate::config::{AppOptions, ScrapeOptions};
use crate::job::Job;
use crate::progress::Progress;
use crate::specs::job_detail::JobDetailSpec;
use crate::specs::listings::ListingSpec;
use crate::store::{ListingStore, TodayStore};
use crate::Result;

/// What one cycle found and wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub links: usize,
    pub new_jobs: usize,
    pub todays_jobs: usize,
    pub listings_written: usize,
    pub today_written: usize,
}

pub struct Scraper {
    options: ScrapeOptions,
    listing: ListingSpec,
    detail: JobDetailSpec,
    listings: ListingStore,
    today: TodayStore,
    /// Titles seen in this process or loaded from the listings file.
    known_titles: HashSet<String>,
}

impl Scraper {
    pub fn new(options: &AppOptions, known_titles: HashSet<String>) -> Result<Self> {
        let scrape = options.scrape.clone();
        Ok(Self {
            listing: ListingSpec::new(&scrape.url, &scrape.job_card_selector)?,
            detail: JobDetailSpec::new(&scrape.description_selector)?,
            listings: ListingStore::new(&options.store.listings),
            today: TodayStore::new(&options.store.today),
            options: scrape,
            known_titles,
        })
    }

    pub fn known_titles(&self) -> &HashSet<String> {
        &self.known_titles
    }

    /// Click "Load More" until it stops becoming clickable. Returns the number of clicks.
    pub fn load_all_jobs(&self, browser: &mut dyn Browser) -> usize {
        let button = Locator::XPath(self.options.load_more_xpath.clone());
        let mut clicks = 0;
        loop {
            info!("Attempting to click 'Load More' button...");
            match browser.click_when_clickable(&button, self.options.load_more_timeout()) {
                Ok(()) => {
                    clicks += 1;
                    info!("Clicked 'Load More' button.");
                    thread::sleep(self.options.load_more_pause());
                }
                Err(e) if e.is_timeout() => {
                    info!("No more 'Load More' button found. All jobs loaded.");
                    break;
                }
                Err(e) => {
                    error!("Error while loading more jobs: {e}");
                    break;
                }
            }
        }
        clicks
    }

    pub fn collect_job_links(&self, browser: &mut dyn Browser) -> Vec<String> {
        match browser.page_source() {
            Ok(page) => self.listing.collect_job_links(&page),
            Err(e) => {
                error!("Error collecting job links: {e}");
                Vec::new()
            }
        }
    }

    /// Never fails: a page that cannot be read yields `Job::placeholder`.
    pub fn scrape_job_details(&self, browser: &mut dyn Browser, link: &str, today: NaiveDate) -> Job {
        match self.read_detail_page(browser, link) {
            Ok(page) => self.detail.parse(&page, link, today),
            Err(e) if e.is_timeout() => {
                error!("Timeout while loading job detail page: {link}");
                Job::placeholder(link)
            }
            Err(e) => {
                error!("Error scraping job details from {link}: {e}");
                Job::placeholder(link)
            }
        }
    }

    fn read_detail_page(&self, browser: &mut dyn Browser, link: &str) -> Result<String> {
        browser.goto(link)?;
        info!("Navigated to job detail page: {link}");
        browser.wait_for_presence(&Locator::Tag(s!(TITLE_TAG)), self.options.detail_timeout())?;
        info!("Job title found for: {link}");
        thread::sleep(self.options.detail_pause());
        browser.page_source()
    }

    pub fn run_cycle(
        &mut self,
        browser: &mut dyn Browser,
        today: NaiveDate,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<CycleSummary> {
        browser.goto(&self.options.url)?;
        info!("Loading all jobs...");
        self.load_all_jobs(browser);

        info!("Collecting job links...");
        let links = self.collect_job_links(browser);
        if let Some(p) = progress.as_deref_mut() {
            p.begin(links.len());
        }

        let mut taken: HashSet<String> = HashSet::new();
        let mut new_jobs: Vec<Job> = Vec::new();
        let mut todays_jobs: Vec<Job> = Vec::new();

        for link in &links {
            if !taken.insert(link.clone()) {
                info!("Duplicate job link found. Skipping: {link}");
                continue;
            }

            let job = self.scrape_job_details(browser, link, today);
            if self.known_titles.insert(job.title.clone()) {
                if job.posted_on(today) {
                    todays_jobs.push(job.clone());
                }
                new_jobs.push(job);
            } else {
                info!("Job already exists. Skipping: {}", job.title);
            }

            if let Some(p) = progress.as_deref_mut() {
                p.item_done(link);
            }
        }

        let mut summary = CycleSummary {
            links: links.len(),
            new_jobs: new_jobs.len(),
            todays_jobs: todays_jobs.len(),
            ..CycleSummary::default()
        };

        if new_jobs.is_empty() {
            info!("No new jobs found.");
        } else {
            info!("Found {} new job(s). Saving to CSV...", new_jobs.len());
            let scraped_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
            match self.listings.append(&new_jobs, &scraped_at) {
                Ok(n) => summary.listings_written = n,
                Err(e) => error!("Error saving jobs to {}: {e}", self.listings.path().display()),
            }
        }

        if todays_jobs.is_empty() {
            info!("No jobs posted today.");
        } else {
            info!(
                "Found {} job(s) posted today. Saving to {}...",
                todays_jobs.len(),
                self.today.path().display()
            );
            match self.today.append_new(&todays_jobs) {
                Ok(n) => summary.today_written = n,
                Err(e) => error!("Error saving today's jobs to {}: {e}", self.today.path().display()),
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        Ok(summary)
    }
}
