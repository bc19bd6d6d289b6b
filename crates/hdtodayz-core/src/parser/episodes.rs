//! Episode list parser
//!
//! Parses the episode list of a series details page.

use scraper::ElementRef;

use crate::adapter::{EpisodeOrder, SiteAdapter};
use crate::extract::{extract_text, extract_url, select_all};
use crate::types::Episode;

/// Name of the pseudo-episode emitted for movies outside single-file mode
pub const FULL_MOVIE: &str = "Full Movie";

/// Parses the episode items under `scope` into on-air order
///
/// Items without a name or URL are skipped. Returns an empty list when the
/// adapter declares no episode item selector.
pub fn parse_episodes(scope: ElementRef<'_>, adapter: &SiteAdapter) -> Vec<Episode> {
    let selectors = &adapter.selectors;
    if selectors.episode_item.trim().is_empty() {
        return Vec::new();
    }

    let episodes = select_all(scope, &selectors.episode_item)
        .into_iter()
        .filter_map(|item| {
            let name = extract_text(item, &selectors.episode_name)?;
            let url = extract_url(item, &selectors.episode_url, &adapter.base_url)?;
            Some(Episode { name, url })
        })
        .collect();

    order_episodes(episodes, adapter.episode_order)
}

/// Puts episodes listed in `order` into chronological order
pub fn order_episodes(mut episodes: Vec<Episode>, order: EpisodeOrder) -> Vec<Episode> {
    if order == EpisodeOrder::NewestFirst {
        episodes.reverse();
    }
    episodes
}

/// The single episode standing in for a whole movie
pub fn full_movie_episode(url: &str) -> Episode {
    Episode {
        name: FULL_MOVIE.to_string(),
        url: url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{hdtodayz, hdtodayz_netflix};
    use proptest::prelude::*;
    use scraper::Html;

    const SERIES_HTML: &str = r#"
        <ul class="listing items">
            <li><a href="/tv-series/lost/ep-3" title="Episode 3: Tabula Rasa">3</a></li>
            <li><a href="/tv-series/lost/ep-2">Episode 2</a></li>
            <li><a title="No link">?</a></li>
            <li><a href="/tv-series/lost/ep-1" title=" Episode 1: Pilot ">1</a></li>
        </ul>
    "#;

    #[test]
    fn test_parse_episodes_newest_first_is_reversed() {
        let document = Html::parse_document(SERIES_HTML);
        let episodes = parse_episodes(document.root_element(), &hdtodayz_netflix());

        let names: Vec<&str> = episodes.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Episode 1: Pilot", "Episode 2", "Episode 3: Tabula Rasa"]);
        assert_eq!(episodes[0].url, "https://hdtodayz.to/tv-series/lost/ep-1");
    }

    #[test]
    fn test_parse_episodes_chronological_keeps_order() {
        let mut adapter = hdtodayz_netflix();
        adapter.episode_order = EpisodeOrder::Chronological;

        let document = Html::parse_document(SERIES_HTML);
        let episodes = parse_episodes(document.root_element(), &adapter);

        let names: Vec<&str> = episodes.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Episode 3: Tabula Rasa", "Episode 2", "Episode 1: Pilot"]);
    }

    #[test]
    fn test_parse_episodes_without_item_selector() {
        let document = Html::parse_document(SERIES_HTML);
        assert!(parse_episodes(document.root_element(), &hdtodayz()).is_empty());
    }

    #[test]
    fn test_full_movie_episode() {
        let episode = full_movie_episode("https://hdtodayz.com/movie/dune");
        assert_eq!(episode.name, "Full Movie");
        assert_eq!(episode.url, "https://hdtodayz.com/movie/dune");
    }

    fn episodes_from(names: &[String]) -> Vec<Episode> {
        names
            .iter()
            .map(|name| Episode {
                name: name.clone(),
                url: format!("https://hdtodayz.to/ep/{}", name),
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_newest_first_is_exact_reverse(names in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
            let episodes = episodes_from(&names);
            let mut expected = episodes.clone();
            expected.reverse();
            prop_assert_eq!(order_episodes(episodes, EpisodeOrder::NewestFirst), expected);
        }

        #[test]
        fn prop_chronological_preserves_order(names in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
            let episodes = episodes_from(&names);
            prop_assert_eq!(order_episodes(episodes.clone(), EpisodeOrder::Chronological), episodes);
        }
    }
}
