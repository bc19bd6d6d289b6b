//! Record builders
//!
//! Each module turns one kind of parsed page into records, driven by the
//! selectors of a [`crate::SiteAdapter`]:
//! - `search`: search and listing pages
//! - `details`: details page (with `episodes` for series)
//! - `links`: player page

pub mod details;
pub mod episodes;
pub mod links;
pub mod search;

pub use details::parse_details;
pub use episodes::{order_episodes, parse_episodes};
pub use links::parse_playable_links;
pub use search::parse_search_results;
