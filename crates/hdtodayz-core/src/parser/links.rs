//! Player page parser
//!
//! Extracts playable links (and optional subtitle tracks) from the page an
//! episode or movie points at.

use scraper::{ElementRef, Html};

use crate::adapter::{LinkStrategy, QualityTier, SiteAdapter};
use crate::extract::{node_text, select_all};
use crate::types::{LinkSet, PlayableLink, Quality, SubtitleTrack};

const DEFAULT_SUBTITLE_LABEL: &str = "Subtitles";

/// Parses a player page with the adapter's link strategy
///
/// `success` on the returned set is false when no link was found.
pub fn parse_playable_links(document: &Html, adapter: &SiteAdapter) -> LinkSet {
    let root = document.root_element();

    let links = match &adapter.links {
        LinkStrategy::DirectLinks { anchors } => direct_links(root, anchors, adapter),
        LinkStrategy::IframeFanout { iframe, tiers } => iframe_fanout(root, iframe, tiers, adapter),
    };

    let subtitles = adapter
        .subtitle_tracks
        .as_deref()
        .map(|selector| parse_subtitle_tracks(root, selector, adapter))
        .unwrap_or_default();

    LinkSet::new(links, subtitles)
}

/// One link per server anchor
///
/// The anchor text names the server; the link is its own referer.
fn direct_links(root: ElementRef<'_>, anchors: &str, adapter: &SiteAdapter) -> Vec<PlayableLink> {
    select_all(root, anchors)
        .into_iter()
        .filter_map(|anchor| {
            let url = adapter.resolve(anchor.value().attr("href")?)?;
            let text = node_text(anchor);
            let label = if text.is_empty() { adapter.name.clone() } else { text };

            Some(PlayableLink {
                source: adapter.name.clone(),
                label,
                referer: url.clone(),
                url,
                quality: Quality::Unknown,
            })
        })
        .collect()
}

/// The first player iframe's source, repeated once per quality tier
fn iframe_fanout(
    root: ElementRef<'_>,
    iframe: &str,
    tiers: &[QualityTier],
    adapter: &SiteAdapter,
) -> Vec<PlayableLink> {
    let Some(url) = select_all(root, iframe)
        .into_iter()
        .find_map(|node| adapter.resolve(node.value().attr("src")?))
    else {
        return Vec::new();
    };

    tiers
        .iter()
        .map(|tier| PlayableLink {
            source: adapter.name.clone(),
            label: tier.label.clone(),
            url: url.clone(),
            referer: adapter.base_url.clone(),
            quality: tier.quality,
        })
        .collect()
}

/// Parses subtitle nodes (usually `<track>`) into tracks
fn parse_subtitle_tracks(
    root: ElementRef<'_>,
    selector: &str,
    adapter: &SiteAdapter,
) -> Vec<SubtitleTrack> {
    select_all(root, selector)
        .into_iter()
        .filter_map(|node| {
            let element = node.value();
            let url = adapter.resolve(element.attr("src")?)?;
            let label = ["label", "srclang"]
                .iter()
                .filter_map(|attr| element.attr(attr))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .unwrap_or(DEFAULT_SUBTITLE_LABEL)
                .to_string();

            Some(SubtitleTrack { label, url })
        })
        .collect()
}
