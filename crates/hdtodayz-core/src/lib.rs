//! HDTodayZ Scraper Core Library
//!
//! Adapter-driven scraping for HDTodayZ-style streaming aggregator sites:
//! search, category listings, title details with episode lists, and
//! playable links.
//!
//! # Overview
//!
//! One generic pipeline does the work for every site:
//! - [`Fetcher`] downloads a page ([`HttpFetcher`] by default: rate limited,
//!   retries transient failures)
//! - the page is parsed and handed to a record builder in [`parser`]
//! - builders read fields through the ordered candidate lists in [`extract`]
//!
//! Everything site-specific lives in a [`SiteAdapter`] value. Two adapters
//! ship in [`sites`]; more can be loaded with [`SiteAdapter::from_json`].
//!
//! # Example
//!
//! ```no_run
//! use hdtodayz_core::{sites, Result, SiteScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = SiteScraper::new(sites::hdtodayz_netflix())?;
//!
//!     let results = scraper.search("dune").await;
//!     for item in &results {
//!         println!("{} ({:?}): {}", item.title, item.media_type, item.url);
//!     }
//!
//!     if let Some(first) = results.first()
//!         && let Some(details) = scraper.load_details(&first.url).await
//!     {
//!         for episode in details.episodes() {
//!             let links = scraper.resolve_playable_links(&episode.url).await;
//!             println!("{}: {} links", episode.name, links.links.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! The pipeline operations do not return errors. Network failures and
//! layout changes show up as empty lists, `None`, or a [`LinkSet`] with
//! `success == false`, and are logged through `tracing`.

pub mod adapter;
mod client;
mod error;
pub mod extract;
pub mod parser;
mod pipeline;
pub mod sites;
mod types;
pub mod url;

pub use adapter::{Category, EpisodeOrder, LinkStrategy, QualityTier, SelectorTable, SiteAdapter};

pub use client::{ClientConfig, Fetcher, HttpFetcher, RateLimiter};

pub use error::{Result, ScrapeError};

pub use extract::{Candidate, FieldSpec, Source};

pub use parser::{parse_details, parse_playable_links, parse_search_results};

pub use pipeline::{SiteScraper, Stage};

pub use types::{
    Content, Details, Episode, LinkSet, ListingPage, MediaType, PlayableLink, Quality,
    SearchResult, SubtitleTrack,
};

pub use self::url::{absolutize, build_listing_url, build_search_url};
