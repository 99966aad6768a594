//! Image URL extraction from HTML documents.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

fn img_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("img").expect("static selector is valid"))
}

/// Extract every `<img src>` from `html`, resolved against `base_url`.
///
/// Elements without a `src` attribute are skipped. The result keeps document
/// order, so callers can truncate it to take the first N images. Parsing is
/// tolerant: malformed markup yields whatever images html5ever recovers, and
/// never an error.
///
/// If `base_url` does not parse, only `src` values that are already absolute
/// URLs are kept.
///
/// # Examples
///
/// ```
/// use thumbforge::scrape::extract_image_urls;
///
/// let html = r#"<img src="/a.png"><img alt="none"><img src="https://cdn.example/b.jpg">"#;
/// let urls = extract_image_urls(html, "https://example.com/search?q=cats");
/// assert_eq!(urls, vec!["https://example.com/a.png", "https://cdn.example/b.jpg"]);
/// ```
pub fn extract_image_urls(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    document
        .select(img_selector())
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| {
            let resolved = match &base {
                Some(base) => base.join(src),
                None => Url::parse(src),
            };
            match resolved {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    debug!(src, error = %e, "Skipping unresolvable image source");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.example.com/search?q=cats&tbm=isch";

    #[test]
    fn test_relative_absolute_and_missing_src() {
        let html = r#"
            <html><body>
              <img src="/images/one.png">
              <img src="https://cdn.example.org/two.jpg">
              <img alt="no source">
            </body></html>
        "#;

        let urls = extract_image_urls(html, BASE);
        assert_eq!(
            urls,
            vec![
                "https://www.example.com/images/one.png",
                "https://cdn.example.org/two.jpg",
            ]
        );
    }

    #[test]
    fn test_document_order_is_preserved() {
        let html: String = (0..20)
            .map(|i| format!(r#"<div><img src="img{i}.png"></div>"#))
            .collect();

        let urls = extract_image_urls(&html, "https://example.com/gallery/index.html");
        assert_eq!(urls.len(), 20);
        for (i, url) in urls.iter().enumerate() {
            assert_eq!(url, &format!("https://example.com/gallery/img{i}.png"));
        }
    }

    #[test]
    fn test_no_images() {
        assert!(extract_image_urls("<p>nothing here</p>", BASE).is_empty());
        assert!(extract_image_urls("", BASE).is_empty());
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let html = r#"<div><img src="a.gif"<p>unclosed <img src='b.gif'></div></span>"#;
        let urls = extract_image_urls(html, "https://example.com/");
        assert!(urls.contains(&"https://example.com/b.gif".to_string()));
    }

    #[test]
    fn test_protocol_relative_and_parent_paths() {
        let html = r#"<img src="//static.example.net/x.png"><img src="../up.png">"#;
        let urls = extract_image_urls(html, "https://example.com/a/b/page.html");
        assert_eq!(
            urls,
            vec!["https://static.example.net/x.png", "https://example.com/a/up.png"]
        );
    }

    #[test]
    fn test_data_uris_pass_through() {
        let html = r#"<img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=">"#;
        let urls = extract_image_urls(html, BASE);
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("data:image/gif"));
    }

    #[test]
    fn test_invalid_base_keeps_absolute_sources_only() {
        let html = r#"<img src="relative.png"><img src="https://example.com/abs.png">"#;
        let urls = extract_image_urls(html, "not a url");
        assert_eq!(urls, vec!["https://example.com/abs.png"]);
    }

    #[test]
    fn test_uppercase_tags_match() {
        let html = r#"<IMG SRC="shout.png">"#;
        let urls = extract_image_urls(html, "https://example.com/");
        assert_eq!(urls, vec!["https://example.com/shout.png"]);
    }
}
