//! Extraction pipeline
//!
//! [`SiteScraper`] runs the four host operations for one site adapter:
//! fetch the page, parse it, hand it to the matching record builder.
//!
//! Operations never return errors. A failed fetch is logged and degrades
//! to an empty list, an absent value or an unsuccessful [`LinkSet`].

use std::fmt;
use std::sync::Arc;

use scraper::Html;

use crate::adapter::{Category, SiteAdapter};
use crate::client::{ClientConfig, Fetcher, HttpFetcher};
use crate::error::{Result, ScrapeError};
use crate::parser::{parse_details, parse_playable_links, parse_search_results};
use crate::types::{Details, LinkSet, ListingPage, SearchResult};
use crate::url::build_listing_url;

/// Where a single operation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Parsing,
    Extracting,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Extracting => "extracting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of records an operation produced, for the `done` trace
trait RecordCount {
    fn record_count(&self) -> usize;
}

impl<T> RecordCount for Vec<T> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<T> RecordCount for Option<T> {
    fn record_count(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl RecordCount for LinkSet {
    fn record_count(&self) -> usize {
        self.links.len()
    }
}

/// Tracks and traces the stage of one operation
struct Invocation<'a> {
    site: &'a str,
    operation: &'static str,
    url: &'a str,
    stage: Stage,
}

impl<'a> Invocation<'a> {
    fn new(site: &'a str, operation: &'static str, url: &'a str) -> Self {
        Self {
            site,
            operation,
            url,
            stage: Stage::Idle,
        }
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!(
            site = self.site,
            operation = self.operation,
            url = self.url,
            from = %self.stage,
            to = %stage,
            "pipeline stage"
        );
        self.stage = stage;
    }

    fn fail(&mut self, error: &ScrapeError) {
        tracing::warn!(
            site = self.site,
            operation = self.operation,
            url = self.url,
            stage = %self.stage,
            error = %error,
            "operation degraded"
        );
        self.stage = Stage::Failed;
    }

    fn done(&mut self, records: usize) {
        self.advance(Stage::Done);
        tracing::debug!(
            site = self.site,
            operation = self.operation,
            url = self.url,
            records,
            "operation finished"
        );
    }
}

/// Scraper for one site
///
/// Cheap to share: every operation takes `&self`, the adapter is immutable
/// and the fetcher sits behind an `Arc`.
pub struct SiteScraper {
    adapter: SiteAdapter,
    fetcher: Arc<dyn Fetcher>,
}

impl SiteScraper {
    /// Create a scraper with an [`HttpFetcher`] tuned to the site's language
    ///
    /// # Errors
    /// - `InvalidConfig` if the adapter fails validation
    /// - `HttpError` if the HTTP client cannot be built
    ///
    /// # Example
    /// ```
    /// use hdtodayz_core::{sites, SiteScraper};
    /// let scraper = SiteScraper::new(sites::hdtodayz_netflix()).unwrap();
    /// assert_eq!(scraper.categories().len(), 7);
    /// ```
    pub fn new(adapter: SiteAdapter) -> Result<Self> {
        let config = ClientConfig::for_language(&adapter.lang);
        Self::with_config(adapter, config)
    }

    /// Create a scraper with custom fetcher configuration
    pub fn with_config(adapter: SiteAdapter, config: ClientConfig) -> Result<Self> {
        let fetcher = HttpFetcher::with_config(config)?;
        Self::with_fetcher(adapter, Arc::new(fetcher))
    }

    /// Create a scraper around any [`Fetcher`]
    ///
    /// # Errors
    /// - `InvalidConfig` if the adapter fails validation
    pub fn with_fetcher(adapter: SiteAdapter, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        adapter.validate()?;
        Ok(Self { adapter, fetcher })
    }

    pub fn adapter(&self) -> &SiteAdapter {
        &self.adapter
    }

    pub fn name(&self) -> &str {
        &self.adapter.name
    }

    /// Browsable categories of the site's main page
    pub fn categories(&self) -> &[Category] {
        &self.adapter.categories
    }

    /// Unwraps the URL an operation will fetch, logging it as failed when
    /// the input did not resolve
    fn target(&self, operation: &'static str, input: &str, url: Result<String>) -> Option<String> {
        match url {
            Ok(url) => Some(url),
            Err(e) => {
                Invocation::new(&self.adapter.name, operation, input).fail(&e);
                None
            }
        }
    }

    /// Fetch `url`, parse it and run `build` on the document
    ///
    /// `None` when the fetch failed. The document is created after the last
    /// await, which keeps the returned future `Send`.
    async fn run<T, F>(&self, operation: &'static str, url: &str, build: F) -> Option<T>
    where
        T: RecordCount,
        F: FnOnce(&Html) -> T,
    {
        let mut invocation = Invocation::new(&self.adapter.name, operation, url);

        invocation.advance(Stage::Fetching);
        let markup = match self.fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(e) => {
                invocation.fail(&e);
                return None;
            }
        };

        invocation.advance(Stage::Parsing);
        let document = Html::parse_document(&markup);

        invocation.advance(Stage::Extracting);
        let value = build(&document);

        invocation.done(value.record_count());
        Some(value)
    }

    /// Search the site
    ///
    /// Empty or whitespace-only queries return no results without a request.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let Some(url) = self.target("search", query, self.adapter.search_url(query)) else {
            return Vec::new();
        };

        self.run("search", &url, |document| {
            parse_search_results(document, &self.adapter)
        })
        .await
        .unwrap_or_default()
    }

    /// One page of a listing (category, genre, filter)
    ///
    /// # Arguments
    /// * `source_url` - Listing URL, absolute or relative to the site
    /// * `page` - 1-based page number; 0 returns no results
    pub async fn get_listing(&self, source_url: &str, page: u32) -> Vec<SearchResult> {
        if page == 0 {
            return Vec::new();
        }

        let Some(source_url) = self.target("listing", source_url, self.adapter.page_url(source_url))
        else {
            return Vec::new();
        };
        let url = build_listing_url(&source_url, page);

        self.run("listing", &url, |document| {
            parse_search_results(document, &self.adapter)
        })
        .await
        .unwrap_or_default()
    }

    /// One page of a main-page category
    ///
    /// `None` for an unknown category index. Pages keep loading while they
    /// produce items.
    pub async fn main_page(&self, category_index: usize, page: u32) -> Option<ListingPage> {
        let category = self.adapter.category(category_index)?;
        let items = self.get_listing(&category.path, page).await;

        Some(ListingPage {
            name: category.name.clone(),
            has_next_page: !items.is_empty(),
            items,
            page,
        })
    }

    /// Load a title's details page
    pub async fn load_details(&self, url: &str) -> Option<Details> {
        let url = self.target("details", url, self.adapter.page_url(url))?;

        self.run("details", &url, |document| {
            parse_details(document, &url, &self.adapter)
        })
        .await
        .flatten()
    }

    /// Resolve the playable links behind an episode or movie URL
    pub async fn resolve_playable_links(&self, url: &str) -> LinkSet {
        let Some(url) = self.target("links", url, self.adapter.page_url(url)) else {
            return LinkSet::empty();
        };

        self.run("links", &url, |document| {
            parse_playable_links(document, &self.adapter)
        })
        .await
        .unwrap_or_else(LinkSet::empty)
    }
}
