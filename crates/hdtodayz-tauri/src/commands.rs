//! Tauri commands for the HDTodayZ scrapers
//!
//! Scraping never fails at this layer: failed fetches arrive as empty
//! lists, `null` or an unsuccessful link set. The only error is an
//! unknown site name.

use hdtodayz_core::{
    Category, Details, LinkSet, ListingPage, MediaType, SearchResult, SiteScraper,
};
use serde::Serialize;
use tauri::State;

use crate::ScraperState;

/// What the frontend needs to present a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub base_url: String,
    pub lang: String,
    pub supported_types: Vec<MediaType>,
    /// Main-page sections; the index is the `category` argument of `main_page`
    pub categories: Vec<Category>,
}

impl From<&SiteScraper> for SiteInfo {
    fn from(scraper: &SiteScraper) -> Self {
        let adapter = scraper.adapter();
        Self {
            name: adapter.name.clone(),
            base_url: adapter.base_url.clone(),
            lang: adapter.lang.clone(),
            supported_types: adapter.supported_types.clone(),
            categories: adapter.categories.clone(),
        }
    }
}

/// List the available sites
#[tauri::command]
pub fn list_sites(state: State<'_, ScraperState>) -> Vec<SiteInfo> {
    state.sites()
}

/// Search a site
///
/// # Errors
/// Returns error message as String for an unknown site
#[tauri::command]
pub async fn search(
    state: State<'_, ScraperState>,
    site: String,
    query: String,
) -> Result<Vec<SearchResult>, String> {
    let scraper = state.get(&site)?;
    Ok(scraper.search(&query).await)
}

/// One page of a listing URL (1-based `page`)
#[tauri::command]
pub async fn get_listing(
    state: State<'_, ScraperState>,
    site: String,
    url: String,
    page: u32,
) -> Result<Vec<SearchResult>, String> {
    let scraper = state.get(&site)?;
    Ok(scraper.get_listing(&url, page).await)
}

/// One page of a main-page category, `null` for an unknown category
#[tauri::command]
pub async fn main_page(
    state: State<'_, ScraperState>,
    site: String,
    category: usize,
    page: u32,
) -> Result<Option<ListingPage>, String> {
    let scraper = state.get(&site)?;
    Ok(scraper.main_page(category, page).await)
}

#[tauri::command]
pub async fn load_details(
    state: State<'_, ScraperState>,
    site: String,
    url: String,
) -> Result<Option<Details>, String> {
    let scraper = state.get(&site)?;
    Ok(scraper.load_details(&url).await)
}

/// Playable links for an episode URL or a movie's data URL
#[tauri::command]
pub async fn load_links(
    state: State<'_, ScraperState>,
    site: String,
    url: String,
) -> Result<LinkSet, String> {
    let scraper = state.get(&site)?;
    Ok(scraper.resolve_playable_links(&url).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdtodayz_core::sites;

    #[test]
    fn test_site_info_from_scraper() {
        let scraper = SiteScraper::new(sites::hdtodayz_netflix()).unwrap();
        let info = SiteInfo::from(&scraper);

        assert_eq!(info.name, sites::HDTODAYZ_NETFLIX);
        assert_eq!(info.lang, "ar");
        assert_eq!(info.supported_types, vec![MediaType::Movie, MediaType::Series]);
        assert_eq!(info.categories.len(), 7);
        assert_eq!(info.categories[0].path, "/movies");
    }

    #[test]
    fn test_site_info_serializes() {
        let scraper = SiteScraper::new(sites::hdtodayz()).unwrap();
        let json = serde_json::to_value(SiteInfo::from(&scraper)).unwrap();

        assert_eq!(json["name"], "HDTodayZ");
        assert_eq!(json["base_url"], "https://hdtodayz.com");
        assert!(json["categories"].as_array().unwrap().is_empty());
    }
}
