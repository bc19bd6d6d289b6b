//! Error types for the HDTodayZ scrapers
//!
//! Errors only travel between the fetcher, configuration loading and the
//! pipeline. The public pipeline operations never return them: they log
//! the error and degrade to an empty or absent result instead.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for fetcher and configuration operations
///
/// Implements Display for human-readable messages and Serialize
/// for Tauri command compatibility.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// A page or search URL does not resolve to an http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on server (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Site adapter configuration is unusable
    #[error("Invalid site configuration: {0}")]
    InvalidConfig(String),
}

impl Serialize for ScrapeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper plumbing
pub type Result<T> = std::result::Result<T, ScrapeError>;
