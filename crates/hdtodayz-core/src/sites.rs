//! Built-in site adapters
//!
//! Two flavours of the same aggregator:
//! - [`hdtodayz`]: the classic English site. Movies only, a flat server
//!   list on the player page, and a single "Full Movie" episode per title.
//! - [`hdtodayz_netflix`]: the Arabic "Netflix style" mirror with browsable
//!   categories, series, and one player iframe fanned out into quality tiers.

use crate::adapter::{
    Category, EpisodeOrder, LinkStrategy, QualityTier, SelectorTable, SiteAdapter,
};
use crate::extract::{Candidate, FieldSpec};
use crate::types::{MediaType, Quality};

pub const HDTODAYZ: &str = "HDTodayZ";
pub const HDTODAYZ_NETFLIX: &str = "HDTodayZ (Netflix Style)";

/// The classic HDTodayZ site
pub fn hdtodayz() -> SiteAdapter {
    SiteAdapter {
        name: HDTODAYZ.to_string(),
        base_url: "https://hdtodayz.com".to_string(),
        lang: "en".to_string(),
        supported_types: vec![MediaType::Movie],
        search_path: "/search?q={query}".to_string(),
        categories: Vec::new(),
        selectors: SelectorTable {
            card: ".movie-card".to_string(),
            card_title: Candidate::text(".title").into(),
            card_url: Candidate::attr("a", "href").into(),
            card_poster: Candidate::attr("img", "src").into(),
            title: Candidate::text("h1").into(),
            poster: Candidate::attr(".poster img", "src").into(),
            ..SelectorTable::default()
        },
        series_marker: None,
        episode_order: EpisodeOrder::Chronological,
        single_file_mode: false,
        links: LinkStrategy::DirectLinks {
            anchors: ".server-list a".to_string(),
        },
        subtitle_tracks: None,
    }
}

/// The "Netflix style" HDTodayZ mirror
pub fn hdtodayz_netflix() -> SiteAdapter {
    let poster = FieldSpec::new(vec![
        Candidate::attr("img.film-poster-img", "src"),
        Candidate::attr("img.film-poster-img", "data-src"),
    ]);

    SiteAdapter {
        name: HDTODAYZ_NETFLIX.to_string(),
        base_url: "https://hdtodayz.to".to_string(),
        lang: "ar".to_string(),
        supported_types: vec![MediaType::Movie, MediaType::Series],
        search_path: "/search/{query}".to_string(),
        categories: vec![
            Category::new("أفلام شائعة", "/movies"),
            Category::new("مسلسلات رائجة", "/tv-series"),
            Category::new("الأكثر مشاهدة", "/trending"),
            Category::new("أفلام أكشن", "/genre/action"),
            Category::new("كوميديا", "/genre/comedy"),
            Category::new("أفلام تاريخية", "/genre/history"),
            Category::new("دراما", "/genre/drama"),
        ],
        selectors: SelectorTable {
            card: "div.flw-item".to_string(),
            card_title: Candidate::text("h3.film-name a").into(),
            card_url: Candidate::attr("a", "href").into(),
            // Cards lazy-load their posters, so data-src comes first here
            card_poster: FieldSpec::new(vec![
                Candidate::attr("img.film-poster-img", "data-src"),
                Candidate::attr("img.film-poster-img", "src"),
            ]),
            card_quality: Candidate::text("div.pick.film-poster-quality").into(),
            card_episode_label: Candidate::text("div.tick-eps").into(),

            title: Candidate::text("h2.heading-name").into(),
            poster: poster.clone(),
            background: poster,
            year: Candidate::text("div.row-line").with_label("Release").into(),
            plot: Candidate::text("div.description").into(),
            tags: Candidate::text("div.row-line")
                .with_label("Genre")
                .within("a")
                .into(),
            rating: Candidate::text("span.item.rating").into(),

            episode_item: "ul.listing.items li".to_string(),
            episode_name: FieldSpec::new(vec![
                Candidate::attr("a", "title"),
                Candidate::text("a"),
            ]),
            episode_url: Candidate::attr("a", "href").into(),
        },
        series_marker: Some("/tv-series/".to_string()),
        episode_order: EpisodeOrder::NewestFirst,
        single_file_mode: true,
        links: LinkStrategy::IframeFanout {
            iframe: "div.play-video iframe".to_string(),
            tiers: vec![
                QualityTier::new(Quality::P1080, "جودة عالية 1080p"),
                QualityTier::new(Quality::P720, "جودة متوسطة 720p"),
                QualityTier::new(Quality::P480, "جودة منخفضة 480p"),
            ],
        },
        subtitle_tracks: None,
    }
}

/// All built-in adapters
pub fn builtin() -> Vec<SiteAdapter> {
    vec![hdtodayz(), hdtodayz_netflix()]
}

/// Looks up a built-in adapter by its display name (case-insensitive)
pub fn by_name(name: &str) -> Option<SiteAdapter> {
    builtin()
        .into_iter()
        .find(|adapter| adapter.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_adapters_validate() {
        for adapter in builtin() {
            assert!(adapter.validate().is_ok(), "{} should validate", adapter.name);
        }
    }

    #[test]
    fn test_builtin_adapters_round_trip_through_json() {
        let adapter = hdtodayz_netflix();
        let json = serde_json::to_string(&adapter).expect("Serialization should succeed");
        let loaded = SiteAdapter::from_json(&json).expect("Deserialization should succeed");
        assert_eq!(loaded, adapter);
    }

    #[test]
    fn test_classic_site_has_no_series() {
        let adapter = hdtodayz();
        assert_eq!(
            adapter.classify("https://hdtodayz.com/tv-series/lost-1"),
            MediaType::Movie
        );
        assert!(!adapter.single_file_mode);
    }

    #[test]
    fn test_netflix_site_series_marker() {
        let adapter = hdtodayz_netflix();
        assert_eq!(
            adapter.classify("https://hdtodayz.to/tv-series/lost-1"),
            MediaType::Series
        );
        assert_eq!(
            adapter.classify("https://hdtodayz.to/movie/dune-2"),
            MediaType::Movie
        );
        assert_eq!(adapter.categories.len(), 7);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("hdtodayz").map(|a| a.base_url), Some("https://hdtodayz.com".to_string()));
        assert!(by_name(HDTODAYZ_NETFLIX).is_some());
        assert!(by_name("unknown").is_none());
    }
}
