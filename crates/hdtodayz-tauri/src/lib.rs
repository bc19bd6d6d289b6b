//! HDTodayZ Tauri Integration
//!
//! Provides a Tauri plugin exposing the built-in HDTodayZ site scrapers to
//! the frontend.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(hdtodayz_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend. Every command except
//! `list_sites` takes the site's display name:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const sites = await invoke('plugin:hdtodayz|list_sites');
//! const site = sites[1].name;
//!
//! const results = await invoke('plugin:hdtodayz|search', { site, query: 'lost' });
//! const details = await invoke('plugin:hdtodayz|load_details', { site, url: results[0].url });
//! const links = await invoke('plugin:hdtodayz|load_links', { site, url: details.content.data_url });
//! const trending = await invoke('plugin:hdtodayz|main_page', { site, category: 2, page: 1 });
//! ```

use std::sync::Arc;

use hdtodayz_core::{SiteScraper, sites};
use tauri::{
    Manager, Runtime,
    plugin::{Builder, TauriPlugin},
};

mod commands;

pub use commands::SiteInfo;

/// The scrapers of every built-in site
///
/// Scrapers take `&self` and hold no mutable state besides the fetcher's
/// rate limiter, so they are shared through `Arc` without a lock.
pub struct ScraperState {
    scrapers: Vec<Arc<SiteScraper>>,
}

impl ScraperState {
    /// Create scrapers for all built-in sites
    ///
    /// # Errors
    /// Returns error string if any scraper fails to initialize
    pub fn new() -> Result<Self, String> {
        let scrapers = sites::builtin()
            .into_iter()
            .map(|adapter| SiteScraper::new(adapter).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;

        Ok(Self { scrapers })
    }

    /// Looks up a scraper by site name (case-insensitive)
    pub fn get(&self, site: &str) -> Result<Arc<SiteScraper>, String> {
        let site = site.trim();
        self.scrapers
            .iter()
            .find(|scraper| scraper.name().eq_ignore_ascii_case(site))
            .cloned()
            .ok_or_else(|| format!("Unknown site: {}", site))
    }

    pub fn sites(&self) -> Vec<SiteInfo> {
        self.scrapers
            .iter()
            .map(|scraper| SiteInfo::from(scraper.as_ref()))
            .collect()
    }
}

/// Initialize the hdtodayz plugin
///
/// # Example
/// ```ignore
/// tauri::Builder::default()
///     .plugin(hdtodayz_tauri::init())
///     .run(tauri::generate_context!())
///     .expect("error while running tauri application");
/// ```
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("hdtodayz")
        .invoke_handler(tauri::generate_handler![
            commands::list_sites,
            commands::search,
            commands::get_listing,
            commands::main_page,
            commands::load_details,
            commands::load_links
        ])
        .setup(|app, _api| {
            let state = ScraperState::new().map_err(Box::<dyn std::error::Error>::from)?;
            app.manage(state);
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use hdtodayz_core::{Details, LinkSet, ListingPage, SearchResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_state_creation() {
        let state = ScraperState::new();
        assert!(state.is_ok());
    }

    #[test]
    fn test_get_known_site() {
        let state = ScraperState::new().unwrap();
        let scraper = state.get(" hdtodayz (netflix style) ").unwrap();
        assert_eq!(scraper.name(), sites::HDTODAYZ_NETFLIX);
    }

    #[test]
    fn test_get_unknown_site() {
        let state = ScraperState::new().unwrap();
        let err = state.get("nope").err().unwrap();
        assert_eq!(err, "Unknown site: nope");
    }

    #[test]
    fn test_sites_listing_order() {
        let state = ScraperState::new().unwrap();
        let names: Vec<String> = state.sites().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec![sites::HDTODAYZ, sites::HDTODAYZ_NETFLIX]);
    }
}
