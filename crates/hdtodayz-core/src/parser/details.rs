//! Details page parser
//!
//! Parses a title's details page into [`Details`], including the episode
//! list for series.

use scraper::Html;

use crate::adapter::SiteAdapter;
use crate::extract::{extract_all, extract_rating, extract_text, extract_url, extract_year};
use crate::types::{Content, Details, MediaType};

use super::episodes::{full_movie_episode, parse_episodes};

/// Parses a details page
///
/// # Arguments
/// * `document` - Parsed details page
/// * `url` - Absolute URL the page was loaded from; decides movie vs series
/// * `adapter` - Site the page belongs to
///
/// # Returns
/// `None` when the page has no title, otherwise the parsed details with
/// every other missing field left empty.
pub fn parse_details(document: &Html, url: &str, adapter: &SiteAdapter) -> Option<Details> {
    let root = document.root_element();
    let selectors = &adapter.selectors;
    let base = adapter.base_url.as_str();

    let title = extract_text(root, &selectors.title)?;

    let content = match adapter.classify(url) {
        MediaType::Series => Content::Series {
            episodes: parse_episodes(root, adapter),
        },
        MediaType::Movie if adapter.single_file_mode => Content::Movie {
            data_url: url.to_string(),
            episodes: Vec::new(),
        },
        MediaType::Movie => Content::Movie {
            data_url: url.to_string(),
            episodes: vec![full_movie_episode(url)],
        },
    };

    Some(Details {
        title,
        url: url.to_string(),
        poster_url: extract_url(root, &selectors.poster, base),
        background_url: extract_url(root, &selectors.background, base),
        year: extract_year(root, &selectors.year),
        plot: extract_text(root, &selectors.plot),
        tags: extract_all(root, &selectors.tags),
        rating: extract_rating(root, &selectors.rating),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{hdtodayz, hdtodayz_netflix};

    const MOVIE_HTML: &str = r#"
        <html><body>
            <img class="film-poster-img" src="/posters/dune.jpg">
            <h2 class="heading-name">Dune</h2>
            <div class="description">  A noble family becomes embroiled in a war. </div>
            <div class="elements">
                <div class="row-line"><strong>Released:</strong> 2021-10-22</div>
                <div class="row-line"><strong>Genre:</strong>
                    <a href="/genre/action">Action</a>, <a href="/genre/sci-fi">Sci-Fi</a>
                </div>
            </div>
            <span class="item rating">8.0</span>
        </body></html>
    "#;

    #[test]
    fn test_parse_netflix_movie_single_file_mode() {
        let document = Html::parse_document(MOVIE_HTML);
        let url = "https://hdtodayz.to/movie/dune-1234";
        let details = parse_details(&document, url, &hdtodayz_netflix()).expect("details");

        assert_eq!(details.title, "Dune");
        assert_eq!(details.url, url);
        assert_eq!(details.poster_url.as_deref(), Some("https://hdtodayz.to/posters/dune.jpg"));
        assert_eq!(details.background_url, details.poster_url);
        assert_eq!(details.year, Some(2021));
        assert_eq!(details.plot.as_deref(), Some("A noble family becomes embroiled in a war."));
        assert_eq!(details.tags, vec!["Action".to_string(), "Sci-Fi".to_string()]);
        assert_eq!(details.rating, Some(80));
        assert_eq!(details.media_type(), MediaType::Movie);
        assert_eq!(
            details.content,
            Content::Movie {
                data_url: url.to_string(),
                episodes: vec![],
            }
        );
    }

    #[test]
    fn test_missing_rating_leaves_other_fields() {
        let html = MOVIE_HTML.replace(r#"<span class="item rating">8.0</span>"#, "");
        let document = Html::parse_document(&html);
        let details = parse_details(&document, "https://hdtodayz.to/movie/dune-1234", &hdtodayz_netflix())
            .expect("details");

        assert_eq!(details.rating, None);
        assert_eq!(details.title, "Dune");
        assert_eq!(details.year, Some(2021));
        assert_eq!(details.tags.len(), 2);
        assert!(details.plot.is_some());
        assert!(details.poster_url.is_some());
    }

    #[test]
    fn test_parse_netflix_series_episodes() {
        let html = r#"
            <h2 class="heading-name">Lost</h2>
            <ul class="listing items">
                <li><a href="/tv-series/lost-1/ep-2" title="Episode 2">2</a></li>
                <li><a href="/tv-series/lost-1/ep-1" title="Episode 1">1</a></li>
            </ul>
        "#;
        let document = Html::parse_document(html);
        let details = parse_details(&document, "https://hdtodayz.to/tv-series/lost-1", &hdtodayz_netflix())
            .expect("details");

        assert_eq!(details.media_type(), MediaType::Series);
        let names: Vec<&str> = details.episodes().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Episode 1", "Episode 2"]);
        assert!(details.year.is_none());
        assert!(details.tags.is_empty());
    }

    #[test]
    fn test_parse_classic_movie_full_movie_episode() {
        let html = r#"
            <h1>Arrival</h1>
            <div class="poster"><img src="/img/arrival.jpg"></div>
        "#;
        let document = Html::parse_document(html);
        let url = "https://hdtodayz.com/movie/arrival";
        let details = parse_details(&document, url, &hdtodayz()).expect("details");

        assert_eq!(details.title, "Arrival");
        assert_eq!(details.poster_url.as_deref(), Some("https://hdtodayz.com/img/arrival.jpg"));
        assert!(details.background_url.is_none());
        assert!(details.rating.is_none());
        assert_eq!(details.episodes().len(), 1);
        assert_eq!(details.episodes()[0].name, "Full Movie");
        assert_eq!(details.episodes()[0].url, url);
    }

    #[test]
    fn test_missing_title_is_absent() {
        let document = Html::parse_document("<html><body><p>Layout changed</p></body></html>");
        assert!(parse_details(&document, "https://hdtodayz.to/movie/x", &hdtodayz_netflix()).is_none());
    }
}
