//! Site adapter configuration
//!
//! A [`SiteAdapter`] is everything the generic pipeline needs to know about
//! one site: where it lives, how its URLs are shaped, which selectors find
//! each field, and a few policy flags. Adding a site means writing a new
//! adapter value (in code, see [`crate::sites`], or as JSON), not new code.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::extract::{FieldSpec, compile};
use crate::types::{MediaType, Quality};
use crate::url::{QUERY_PLACEHOLDER, absolutize, build_search_url, classify};

/// A browsable section of the site (label + path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Path or absolute URL of the section's first page
    pub path: String,
}

impl Category {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Label attached to one synthesized link in fan-out mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityTier {
    pub quality: Quality,
    pub label: String,
}

impl QualityTier {
    pub fn new(quality: Quality, label: impl Into<String>) -> Self {
        Self {
            quality,
            label: label.into(),
        }
    }
}

/// How playable links are found on an episode or movie page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LinkStrategy {
    /// Every anchor matching `anchors` is a server; its text is the label
    /// and its href the playable URL.
    DirectLinks { anchors: String },

    /// The first player iframe's `src` is emitted once per tier. The site
    /// exposes a single stream, so the tiers are labels only.
    IframeFanout {
        iframe: String,
        tiers: Vec<QualityTier>,
    },
}

/// Order in which the site lists episodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOrder {
    #[default]
    Chronological,
    /// Newest episode first; reversed before returning
    NewestFirst,
}

/// Per-field candidate lists
///
/// `card` and `episode_item` select the repeated nodes; every other field
/// is evaluated relative to such a node (card fields, episode fields) or
/// to the whole details page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    pub card: String,
    pub card_title: FieldSpec,
    pub card_url: FieldSpec,
    pub card_poster: FieldSpec,
    pub card_quality: FieldSpec,
    pub card_episode_label: FieldSpec,

    pub title: FieldSpec,
    pub poster: FieldSpec,
    pub background: FieldSpec,
    pub year: FieldSpec,
    pub plot: FieldSpec,
    pub tags: FieldSpec,
    pub rating: FieldSpec,

    /// Episode list items on a series page; empty when the site has none
    pub episode_item: String,
    pub episode_name: FieldSpec,
    pub episode_url: FieldSpec,
}

/// Static configuration of one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAdapter {
    /// Display name, also used as the source of produced links
    pub name: String,
    pub base_url: String,
    /// Language tag of the site's content (e.g. "en")
    pub lang: String,
    #[serde(default = "default_supported_types")]
    pub supported_types: Vec<MediaType>,

    /// Search path template containing `{query}`
    pub search_path: String,
    #[serde(default)]
    pub categories: Vec<Category>,

    pub selectors: SelectorTable,

    /// Substring that marks series URLs; without one everything is a movie
    #[serde(default)]
    pub series_marker: Option<String>,
    #[serde(default)]
    pub episode_order: EpisodeOrder,

    /// When set, a movie has no episode list and its details URL is the
    /// playable target. Otherwise a single "Full Movie" episode is emitted.
    #[serde(default)]
    pub single_file_mode: bool,

    pub links: LinkStrategy,

    /// Selector for subtitle `<track>`-like nodes on the player page
    #[serde(default)]
    pub subtitle_tracks: Option<String>,
}

fn default_supported_types() -> Vec<MediaType> {
    vec![MediaType::Movie]
}

impl SiteAdapter {
    /// Loads and validates an adapter from its JSON form
    ///
    /// # Errors
    /// - `InvalidConfig` if the JSON is malformed or fails [`Self::validate`]
    pub fn from_json(json: &str) -> Result<Self> {
        let adapter: SiteAdapter =
            serde_json::from_str(json).map_err(|e| ScrapeError::InvalidConfig(e.to_string()))?;
        adapter.validate()?;
        Ok(adapter)
    }

    /// Checks the parts of the configuration the pipeline cannot degrade around
    ///
    /// # Errors
    /// - `InvalidConfig` for a non-http(s) base URL, a search path without
    ///   `{query}`, an unparseable card selector, an empty tier list, or a
    ///   series marker on a site that does not support series
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("name cannot be empty".to_string()));
        }

        let base = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::InvalidConfig(format!("base_url {}: {}", self.base_url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidConfig(format!(
                "base_url must be http(s): {}",
                self.base_url
            )));
        }

        if !self.search_path.contains(QUERY_PLACEHOLDER) {
            return Err(ScrapeError::InvalidConfig(format!(
                "search_path must contain {}: {}",
                QUERY_PLACEHOLDER, self.search_path
            )));
        }

        if compile(&self.selectors.card).is_none() {
            return Err(ScrapeError::InvalidConfig(format!(
                "invalid card selector: {:?}",
                self.selectors.card
            )));
        }

        if let LinkStrategy::IframeFanout { tiers, .. } = &self.links
            && tiers.is_empty()
        {
            return Err(ScrapeError::InvalidConfig(
                "iframe fan-out needs at least one quality tier".to_string(),
            ));
        }

        if self.series_marker.is_some() && !self.supports(MediaType::Series) {
            return Err(ScrapeError::InvalidConfig(
                "series_marker set but Series is not a supported type".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolves a link found on this site to an absolute URL
    pub fn resolve(&self, href: &str) -> Option<String> {
        absolutize(&self.base_url, href)
    }

    /// Movie or series, judged by the series marker
    pub fn classify(&self, url: &str) -> MediaType {
        classify(url, self.series_marker.as_deref())
    }

    /// Absolute URL of a page the pipeline is asked to load
    ///
    /// # Errors
    /// - `InvalidUrl` if `href` does not resolve to an http(s) URL
    pub fn page_url(&self, href: &str) -> Result<String> {
        self.resolve(href)
            .ok_or_else(|| ScrapeError::InvalidUrl(href.to_string()))
    }

    /// # Errors
    /// - `InvalidUrl` if the filled-in search path does not resolve
    pub fn search_url(&self, query: &str) -> Result<String> {
        build_search_url(&self.base_url, &self.search_path, query)
            .ok_or_else(|| ScrapeError::InvalidUrl(self.search_path.replace(QUERY_PLACEHOLDER, query)))
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn supports(&self, media_type: MediaType) -> bool {
        self.supported_types.contains(&media_type)
    }
}
