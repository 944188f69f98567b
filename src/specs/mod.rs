// src/specs/mod.rs
//! # Page specs
//!
//! One module per page of the job board. A spec knows **where the data lives
//! in the HTML** and how to pull it out; it never touches the browser, the
//! filesystem or the clock. Callers hand it a page source and get plain values
//! back, so every spec can be exercised offline against saved markup.
//!
//! - `listings` – job card links on the listings page (after all "Load More"
//!   clicks have run).
//! - `job_detail` – title, posting date and description of one job page.
//!
//! Selectors come from `ScrapeOptions` so a markup change on the site is a
//! config edit rather than a rebuild.
pub mod job_detail;
pub mod listings;
