//! Scraping: search document sources, image URL extraction, and fetching.

pub mod extract;
pub mod fetch;
pub mod search;

pub use extract::extract_image_urls;
pub use fetch::{FetchError, Fetcher};
pub use search::{SearchProvider, UrlTemplateProvider};
