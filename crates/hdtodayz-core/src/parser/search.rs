//! Search and listing page parser
//!
//! Both page kinds show the same item cards, so one builder serves both.

use scraper::{ElementRef, Html};

use crate::adapter::SiteAdapter;
use crate::extract::{extract_text, extract_url, select_all};
use crate::types::{MediaType, SearchResult};

/// Parses every item card on a search or listing page
///
/// Cards without a title or a resolvable URL are dropped; the rest keep
/// document order.
pub fn parse_search_results(document: &Html, adapter: &SiteAdapter) -> Vec<SearchResult> {
    select_all(document.root_element(), &adapter.selectors.card)
        .into_iter()
        .filter_map(|card| parse_card(card, adapter))
        .collect()
}

/// Parses a single item card
fn parse_card(card: ElementRef<'_>, adapter: &SiteAdapter) -> Option<SearchResult> {
    let selectors = &adapter.selectors;

    let title = extract_text(card, &selectors.card_title)?;
    let url = extract_url(card, &selectors.card_url, &adapter.base_url)?;
    let media_type = adapter.classify(&url);

    let poster_url = extract_url(card, &selectors.card_poster, &adapter.base_url);
    let quality = extract_text(card, &selectors.card_quality);
    let episode_label = match media_type {
        MediaType::Series => extract_text(card, &selectors.card_episode_label),
        MediaType::Movie => None,
    };

    Some(SearchResult {
        title,
        url,
        poster_url,
        media_type,
        quality,
        episode_label,
    })
}
