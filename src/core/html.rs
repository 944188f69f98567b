// src/core/html.rs
use scraper::{ElementRef, Html, Selector};

use crate::core::sanitize::join_stripped;
use crate::{Error, Result};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e}")))
}

/// All descendant text nodes, each trimmed, blanks dropped, joined with `sep`.
pub fn stripped_text(el: ElementRef<'_>, sep: &str) -> String {
    join_stripped(el.text(), sep)
}

/// The element's single string: its only child is text, or its only child is an
/// element that itself has a single string. Anything else has none.
pub fn single_string(el: ElementRef<'_>) -> Option<String> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    if let Some(text) = only.value().as_text() {
        return Some(String::from(&**text));
    }
    ElementRef::wrap(only).and_then(single_string)
}

pub fn first<'a>(doc: &'a Html, sel: &Selector) -> Option<ElementRef<'a>> {
    doc.select(sel).next()
}

/// First element matched by `sel` whose single string contains `needle`.
pub fn first_with_string<'a>(doc: &'a Html, sel: &Selector, needle: &str) -> Option<ElementRef<'a>> {
    doc.select(sel)
        .find(|el| single_string(*el).is_some_and(|s| s.contains(needle)))
}
