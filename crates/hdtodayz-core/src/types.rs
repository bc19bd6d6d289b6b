//! Core data types for the HDTodayZ scrapers
//!
//! Every record is a read-only value built fresh per pipeline invocation.
//! All types implement Serialize and Deserialize for Tauri compatibility.

use serde::{Deserialize, Serialize};

/// Kind of title a page or card points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Series,
}

/// A title card from a search or listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title, never empty
    pub title: String,

    /// Absolute URL of the details page, never empty
    pub url: String,

    /// Absolute poster image URL
    pub poster_url: Option<String>,

    pub media_type: MediaType,

    /// Quality badge shown on the card (e.g. "HD")
    pub quality: Option<String>,

    /// Latest episode badge (e.g. "EPS 8"), only kept for series
    pub episode_label: Option<String>,
}

/// A playable unit of a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,

    /// Absolute URL handed to link resolution
    pub url: String,
}

/// Movie or series specific part of [`Details`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// A movie. `data_url` is the page to resolve links from; `episodes`
    /// holds a single "Full Movie" entry or is empty in single-file mode.
    Movie {
        data_url: String,
        episodes: Vec<Episode>,
    },
    /// A series with its episodes in on-air order
    Series { episodes: Vec<Episode> },
}

/// Metadata of a title as shown on its details page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub title: String,
    pub url: String,
    pub poster_url: Option<String>,
    pub background_url: Option<String>,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub tags: Vec<String>,

    /// Rating on a 0-100 scale
    pub rating: Option<u8>,

    pub content: Content,
}

impl Details {
    pub fn media_type(&self) -> MediaType {
        match self.content {
            Content::Movie { .. } => MediaType::Movie,
            Content::Series { .. } => MediaType::Series,
        }
    }

    pub fn episodes(&self) -> &[Episode] {
        match &self.content {
            Content::Movie { episodes, .. } | Content::Series { episodes } => episodes,
        }
    }
}

/// Resolution label attached to a playable link
///
/// Ordered from lowest to highest; `Unknown` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    Unknown,
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "1440p")]
    P1440,
    #[serde(rename = "2160p")]
    P2160,
}

impl Quality {
    /// Vertical resolution in pixels, 0 for `Unknown`
    pub fn height(self) -> u32 {
        match self {
            Quality::Unknown => 0,
            Quality::P360 => 360,
            Quality::P480 => 480,
            Quality::P720 => 720,
            Quality::P1080 => 1080,
            Quality::P1440 => 1440,
            Quality::P2160 => 2160,
        }
    }
}

/// A stream or embed URL the host can hand to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableLink {
    /// Name of the site adapter that produced the link
    pub source: String,
    pub label: String,
    pub url: String,
    /// Referer header the player must send
    pub referer: String,
    pub quality: Quality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub label: String,
    pub url: String,
}

/// Outcome of link resolution
///
/// `success` is false when no link was found, so the host can show its
/// "no sources" state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    pub links: Vec<PlayableLink>,
    pub subtitles: Vec<SubtitleTrack>,
    pub success: bool,
}

impl LinkSet {
    pub fn new(links: Vec<PlayableLink>, subtitles: Vec<SubtitleTrack>) -> Self {
        let success = !links.is_empty();
        Self {
            links,
            subtitles,
            success,
        }
    }

    /// Result of a failed resolution
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One page of a browsable category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Category label as configured on the adapter
    pub name: String,
    pub items: Vec<SearchResult>,
    /// Current page number (1-based)
    pub page: u32,
    /// Whether loading the next page is worth trying
    pub has_next_page: bool,
}
