// src/dates.rs
//! "Posted on:" parsing. The board shows either a relative day
//! ("Today", "Yesterday") or an absolute date in one of a few layouts.
use chrono::NaiveDate;
use tracing::warn;

use crate::config::consts::{DATE_FORMAT, NOT_AVAILABLE, POSTED_ON};

/// Tried in order; the first that parses wins.
pub const DATE_LAYOUTS: [&str; 4] = ["%b %d %Y", "%B %d %Y", "%m/%d/%Y", "%m-%d-%Y"];

pub fn parse_posted_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let stripped = raw.replace(POSTED_ON, "");
    let date_str = stripped.trim();

    if date_str.contains("Today") {
        return Some(today);
    }
    if date_str.contains("Yesterday") {
        return today.pred_opt();
    }

    let parsed = DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(date_str, layout).ok());
    if parsed.is_none() {
        warn!("Unrecognized date format: {date_str}");
    }
    parsed
}

/// `MM-DD-YYYY`, or `N/A` for an unknown date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DATE_FORMAT).to_string(),
        None => s!(NOT_AVAILABLE),
    }
}
