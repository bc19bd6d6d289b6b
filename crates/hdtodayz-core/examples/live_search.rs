//! Runs the whole pipeline against a live site
//!
//! Usage: `cargo run --example live_search -- [site] [query]`
//! Set `RUST_LOG=hdtodayz_core=debug` to watch the pipeline stages.

use hdtodayz_core::{SiteScraper, sites};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hdtodayz_core=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let site = args.next().unwrap_or_else(|| sites::HDTODAYZ_NETFLIX.to_string());
    let query = args.next().unwrap_or_else(|| "lost".to_string());

    let adapter = sites::by_name(&site).ok_or_else(|| format!("unknown site: {}", site))?;
    let scraper = SiteScraper::new(adapter)?;

    println!("Searching {} for '{}'...\n", scraper.name(), query);
    let results = scraper.search(&query).await;
    for item in &results {
        println!("[{:?}] {} -> {}", item.media_type, item.title, item.url);
    }

    let Some(first) = results.first() else {
        println!("No results");
        return Ok(());
    };

    println!("\n=== Details for {} ===\n", first.title);
    let Some(details) = scraper.load_details(&first.url).await else {
        println!("Details page could not be parsed");
        return Ok(());
    };
    println!("{}", serde_json::to_string_pretty(&details)?);

    let target = details
        .episodes()
        .first()
        .map(|episode| episode.url.clone())
        .unwrap_or_else(|| details.url.clone());

    println!("\n=== Links for {} ===\n", target);
    let links = scraper.resolve_playable_links(&target).await;
    for link in &links.links {
        println!("{} [{}] {} (referer {})", link.label, link.quality.height(), link.url, link.referer);
    }
    if !links.success {
        println!("No playable links found");
    }

    for index in 0..scraper.categories().len() {
        if let Some(page) = scraper.main_page(index, 1).await {
            println!("\n{}: {} items", page.name, page.items.len());
        }
    }

    Ok(())
}
