//! Search document sources.
//!
//! The pipeline does not know how a search engine lays out its result page;
//! it only needs a URL to fetch for a query. [`SearchProvider`] is that seam.
//! Scraping a third-party result page is inherently brittle, so a provider
//! promises nothing beyond producing the URL.

use url::form_urlencoded;
use url::Url;

use crate::config::QUERY_PLACEHOLDER;

/// Turns a search query into the URL of an HTML document containing images.
pub trait SearchProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Build the search document URL for `query`.
    fn search_url(&self, query: &str) -> Result<Url, url::ParseError>;
}

/// Provider backed by a URL template containing a `{query}` placeholder.
///
/// The query is form-encoded before substitution, so spaces become `+`.
///
/// # Examples
///
/// ```
/// use thumbforge::scrape::{SearchProvider, UrlTemplateProvider};
///
/// let provider = UrlTemplateProvider::new("https://images.example.com/?q={query}");
/// let url = provider.search_url("cute kittens").unwrap();
/// assert_eq!(url.as_str(), "https://images.example.com/?q=cute+kittens");
/// ```
#[derive(Debug, Clone)]
pub struct UrlTemplateProvider {
    template: String,
}

impl UrlTemplateProvider {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl SearchProvider for UrlTemplateProvider {
    fn name(&self) -> &str {
        "url-template"
    }

    fn search_url(&self, query: &str) -> Result<Url, url::ParseError> {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        Url::parse(&self.template.replace(QUERY_PLACEHOLDER, &encoded))
    }
}
