// tests/cycle.rs
//
// Full scrape cycles against an in-memory browser: no Chrome, no network.
//
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;
use job_scraper::browser::{Browser, Locator};
use job_scraper::config::AppOptions;
use job_scraper::job::Job;
use job_scraper::progress::Progress;
use job_scraper::runner::{self, RunMode};
use job_scraper::scrape::Scraper;
use job_scraper::store::ListingStore;
use job_scraper::{Error, Result};

const SITE: &str = "https://ytjobs.co";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
}

fn detail(title: &str, posted: &str) -> String {
    format!(
        r#"<html><body>
             <h1>{title}</h1>
             <div class="meta"><div>Remote</div><div>Posted on: {posted}</div></div>
             <div class="ql-editor"><p>About</p><p>{title}</p></div>
           </body></html>"#
    )
}

/// Listing page shows two cards, and one more per "Load More" click.
struct FakeBrowser {
    cards: Vec<String>,
    pages: HashMap<String, String>,
    current: Option<String>,
    clicks: usize,
    click_error: Option<&'static str>,
    source_error: bool,
    quits: Rc<Cell<usize>>,
}

impl FakeBrowser {
    fn new(cards: &[&str], pages: &[(&str, String)], quits: Rc<Cell<usize>>) -> Self {
        Self {
            cards: cards.iter().map(|c| c.to_string()).collect(),
            pages: pages.iter().map(|(u, p)| (u.to_string(), p.clone())).collect(),
            current: None,
            clicks: 0,
            click_error: None,
            source_error: false,
            quits,
        }
    }

    fn visible_cards(&self) -> usize {
        (2 + self.clicks).min(self.cards.len())
    }

    fn listing_html(&self) -> String {
        let cards: String = self.cards[..self.visible_cards()]
            .iter()
            .map(|href| format!(r#"<div data-testid="jobCardElement"><a href="{href}">Job</a></div>"#))
            .collect();
        format!("<html><body>{cards}<button>Load More</button></body></html>")
    }
}

impl Browser for FakeBrowser {
    fn goto(&mut self, url: &str) -> Result<()> {
        if url != SITE && !self.pages.contains_key(url) {
            return Err(Error::WebDriver {
                error: "unknown error".into(),
                message: format!("net::ERR_NAME_NOT_RESOLVED {url}"),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    fn click_when_clickable(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        if let Some(code) = self.click_error {
            return Err(Error::WebDriver { error: code.into(), message: "overlay".into() });
        }
        if self.visible_cards() < self.cards.len() {
            self.clicks += 1;
            Ok(())
        } else {
            Err(Error::Timeout { timeout, what: locator.to_string() })
        }
    }

    fn wait_for_presence(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        let has_h1 = self.page_source()?.contains("<h1");
        if has_h1 { Ok(()) } else { Err(Error::Timeout { timeout, what: locator.to_string() }) }
    }

    fn page_source(&mut self) -> Result<String> {
        if self.source_error {
            return Err(Error::WebDriver { error: "no such window".into(), message: "target window already closed".into() });
        }
        match self.current.as_deref() {
            Some(SITE) => Ok(self.listing_html()),
            Some(url) => Ok(self.pages[url].clone()),
            None => Ok(String::from("<html></html>")),
        }
    }

    fn quit(&mut self) -> Result<()> {
        self.quits.set(self.quits.get() + 1);
        Ok(())
    }
}

fn options(dir: &Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.url = SITE.into();
    opts.scrape.load_more_pause_secs = 0;
    opts.scrape.detail_pause_secs = 0;
    opts.store.listings = dir.join("job_listings.csv");
    opts.store.today = dir.join("today_jobs.csv");
    opts
}

fn board() -> (Vec<&'static str>, Vec<(&'static str, String)>) {
    let cards = vec!["/job/editor-1", "/job/thumbs-2", "/job/editor-1", "/job/writer-3"];
    let pages = vec![
        ("https://ytjobs.co/job/editor-1", detail("Video Editor", "Today")),
        ("https://ytjobs.co/job/thumbs-2", detail("Thumbnail Designer", "Yesterday")),
        ("https://ytjobs.co/job/writer-3", detail("Scriptwriter", "Jan 03 2025")),
    ];
    (cards, pages)
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(String::from).collect()
}

#[test]
fn first_cycle_writes_new_and_todays_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let (cards, pages) = board();
    let quits = Rc::new(Cell::new(0));

    let mut scraper = Scraper::new(&opts, Default::default()).unwrap();
    let mut factory = || -> Result<FakeBrowser> { Ok(FakeBrowser::new(&cards, &pages, quits.clone())) };
    let summary = runner::run_once(&mut scraper, &mut factory, today(), None).unwrap();

    assert_eq!(summary.links, 3);
    assert_eq!(summary.new_jobs, 3);
    assert_eq!(summary.todays_jobs, 2);
    assert_eq!(summary.listings_written, 3);
    assert_eq!(summary.today_written, 2);
    assert_eq!(quits.get(), 1);

    let listings = lines(&opts.store.listings);
    assert_eq!(listings[0], "Title,Link,Date,Description,Scrape Timestamp");
    assert_eq!(listings.len(), 4);
    assert!(listings[1].starts_with("Video Editor,https://ytjobs.co/job/editor-1,01-03-2025,AboutVideo Editor,"));
    assert!(listings[2].starts_with("Thumbnail Designer,https://ytjobs.co/job/thumbs-2,01-02-2025,"));

    assert_eq!(lines(&opts.store.today), vec![
        "Application URL,Name,Date Posted",
        "https://ytjobs.co/job/editor-1,Video Editor,01-03-2025",
        "https://ytjobs.co/job/writer-3,Scriptwriter,01-03-2025",
    ]);
}

#[test]
fn known_titles_are_not_written_twice() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let (cards, pages) = board();
    let quits = Rc::new(Cell::new(0));
    let mut factory = || -> Result<FakeBrowser> { Ok(FakeBrowser::new(&cards, &pages, quits.clone())) };

    let mut scraper = Scraper::new(&opts, Default::default()).unwrap();
    runner::run_once(&mut scraper, &mut factory, today(), None).unwrap();

    // Same process: the in-memory title set already has them.
    let again = runner::run_once(&mut scraper, &mut factory, today(), None).unwrap();
    assert_eq!(again.new_jobs, 0);
    assert_eq!(again.listings_written, 0);

    // Fresh process: titles come back from the listings file.
    let known = runner::load_known_titles(&ListingStore::new(&opts.store.listings));
    assert_eq!(known.len(), 3);
    let mut restarted = Scraper::new(&opts, known).unwrap();
    let third = runner::run_once(&mut restarted, &mut factory, today(), None).unwrap();
    assert_eq!(third.new_jobs, 0);

    assert_eq!(lines(&opts.store.listings).len(), 4);
    assert_eq!(lines(&opts.store.today).len(), 3);
    assert_eq!(quits.get(), 3);
}

#[test]
fn unreadable_detail_page_becomes_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let cards = ["/job/gone-1", "/job/gone-2"];
    let pages = [
        ("https://ytjobs.co/job/gone-1", String::from("<html><body><p>Removed</p></body></html>")),
        ("https://ytjobs.co/job/gone-2", String::from("<html><body><p>Removed</p></body></html>")),
    ];
    let quits = Rc::new(Cell::new(0));
    let mut factory = || -> Result<FakeBrowser> { Ok(FakeBrowser::new(&cards, &pages, quits.clone())) };

    let mut scraper = Scraper::new(&opts, Default::default()).unwrap();
    let summary = runner::run_once(&mut scraper, &mut factory, today(), None).unwrap();

    // Both pages time out; the second placeholder shares the first's "N/A" title.
    assert_eq!(summary.links, 2);
    assert_eq!(summary.new_jobs, 1);
    assert_eq!(summary.todays_jobs, 0);
    assert!(lines(&opts.store.listings)[1].starts_with("N/A,https://ytjobs.co/job/gone-1,N/A,N/A,"));
    assert!(!opts.store.today.exists());
}

#[test]
fn listing_failure_is_returned_and_browser_still_closed() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.scrape.url = "https://ytjobs.invalid".into();
    let quits = Rc::new(Cell::new(0));
    let mut factory = || -> Result<FakeBrowser> { Ok(FakeBrowser::new(&[], &[], quits.clone())) };

    let mut scraper = Scraper::new(&opts, Default::default()).unwrap();
    let err = runner::run_once(&mut scraper, &mut factory, today(), None).unwrap_err();

    assert!(matches!(err, Error::WebDriver { .. }));
    assert_eq!(quits.get(), 1);
    assert!(!opts.store.listings.exists());
}

#[test]
fn browser_start_failure_fails_a_single_run() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let factory = || -> Result<FakeBrowser> { Err(Error::DriverStartup("http://127.0.0.1:9515".into())) };

    let err = runner::run(&opts, factory, RunMode::Once).unwrap_err();
    assert!(matches!(err, Error::DriverStartup(_)));
}

#[test]
fn load_more_stops_on_click_errors() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let (cards, pages) = board();
    let mut browser = FakeBrowser::new(&cards, &pages, Rc::new(Cell::new(0)));
    browser.click_error = Some("element click intercepted");

    let scraper = Scraper::new(&opts, Default::default()).unwrap();
    assert_eq!(scraper.load_all_jobs(&mut browser), 0);

    browser.click_error = None;
    assert_eq!(scraper.load_all_jobs(&mut browser), 2);
    assert_eq!(browser.visible_cards(), 4);
}

#[test]
fn detail_navigation_failure_becomes_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let (cards, pages) = board();
    let mut browser = FakeBrowser::new(&cards, &pages, Rc::new(Cell::new(0)));

    let scraper = Scraper::new(&opts, Default::default()).unwrap();
    let link = "https://ytjobs.co/job/deleted-9";
    assert_eq!(scraper.scrape_job_details(&mut browser, link, today()), Job::placeholder(link));
}

#[test]
fn unreadable_listing_page_yields_no_links() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let (cards, pages) = board();
    let mut browser = FakeBrowser::new(&cards, &pages, Rc::new(Cell::new(0)));
    browser.goto(SITE).unwrap();

    let scraper = Scraper::new(&opts, Default::default()).unwrap();
    assert_eq!(scraper.collect_job_links(&mut browser).len(), 2);

    browser.source_error = true;
    assert!(scraper.collect_job_links(&mut browser).is_empty());
}

#[test]
fn watch_mode_keeps_going_after_browser_start_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.check_interval_secs = 0;
    let calls = Cell::new(0);

    let factory = || -> Result<FakeBrowser> {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            Err(Error::DriverStartup("http://127.0.0.1:9515".into()))
        } else {
            panic!("second cycle reached");
        }
    };

    // Watch never returns on its own; the second factory call ends the test.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| runner::run(&opts, factory, RunMode::Watch)));
    assert!(outcome.is_err());
    assert_eq!(calls.get(), 2);
    assert!(!opts.store.listings.exists());
}

#[derive(Default)]
struct Counting {
    total: usize,
    done: Vec<String>,
    finished: usize,
}

impl Progress for Counting {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, link: &str) { self.done.push(link.to_string()); }
    fn finish(&mut self) { self.finished += 1; }
}

#[test]
fn progress_sees_every_detail_page() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let (cards, pages) = board();
    let mut browser = FakeBrowser::new(&cards, &pages, Rc::new(Cell::new(0)));
    let mut progress = Counting::default();

    let mut scraper = Scraper::new(&opts, Default::default()).unwrap();
    scraper.run_cycle(&mut browser, today(), Some(&mut progress)).unwrap();

    assert_eq!(progress.total, 3);
    assert_eq!(progress.done, vec![
        "https://ytjobs.co/job/editor-1",
        "https://ytjobs.co/job/thumbs-2",
        "https://ytjobs.co/job/writer-3",
    ]);
    assert_eq!(progress.finished, 1);
    assert!(scraper.known_titles().contains("Scriptwriter"));
}
