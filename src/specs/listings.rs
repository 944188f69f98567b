// src/specs/listings.rs
use std::collections::HashSet;

use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{error, info, warn};

use crate::core::html::selector;
use crate::{Error, Result};

pub struct ListingSpec {
    base: Url,
    card: Selector,
    anchor: Selector,
}

impl ListingSpec {
    pub fn new(base_url: &str, card_css: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Url { url: s!(base_url), reason: e.to_string() })?;
        Ok(Self { base, card: selector(card_css)?, anchor: selector("a")? })
    }

    /// Absolute link of the first anchor in each job card, first occurrence
    /// order, duplicates dropped. Cards without a usable link are skipped.
    pub fn collect_job_links(&self, page: &str) -> Vec<String> {
        let doc = Html::parse_document(page);
        let cards: Vec<_> = doc.select(&self.card).collect();
        info!("Found {} job cards.", cards.len());

        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for (idx, card) in cards.into_iter().enumerate() {
            let idx = idx + 1;
            let Some(anchor) = card.select(&self.anchor).next() else {
                warn!("No link found in job card {idx}. Skipping.");
                continue;
            };
            let Some(href) = anchor.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
                continue;
            };
            let link = match self.base.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    error!("Error extracting link from job card {idx}: {e}");
                    continue;
                }
            };
            if seen.insert(link.clone()) {
                info!("Collected job link {idx}: {link}");
                links.push(link);
            }
        }
        links
    }
}
