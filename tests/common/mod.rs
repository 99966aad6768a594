//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wires an in-memory DB into an
//! [`ImageService`], a [`Pipeline`] pointed at a wiremock search page, and an
//! [`AppContext`] for router tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};
use thumbforge::config::Config;
use thumbforge::images::ImageService;
use thumbforge::pipeline::Pipeline;
use thumbforge::scrape::{Fetcher, UrlTemplateProvider};
use thumbforge::server::AppContext;
use thumbforge_common::TargetSize;
use thumbforge_db::pool::{init_memory_pool, DbPool};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCH_PATH: &str = "/search";

/// Test harness wrapping an in-memory image store.
pub struct TestHarness {
    pub images: ImageService,
    /// Same database as `images`, for tests that tamper with the schema.
    pub pool: DbPool,
}

impl TestHarness {
    pub fn new() -> Self {
        let pool = init_memory_pool().expect("failed to create in-memory pool");
        Self {
            images: ImageService::new(pool.clone()),
            pool,
        }
    }

    /// Pipeline whose search provider targets `server`'s `/search` page.
    pub fn pipeline(&self, server: &MockServer) -> Pipeline {
        let fetcher = Fetcher::new("thumbforge-test", Duration::from_secs(5), 4)
            .expect("failed to build fetcher");
        let search = Arc::new(UrlTemplateProvider::new(format!(
            "{}{}?q={{query}}",
            server.uri(),
            SEARCH_PATH
        )));
        Pipeline::new(fetcher, search, self.images.clone(), TargetSize::default())
    }

    pub fn context(&self) -> AppContext {
        AppContext::new(Config::default(), self.images.clone())
    }
}

/// Encode a solid-colour RGBA PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([30, 120, 220, 200]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("failed to encode PNG");
    buf.into_inner()
}

/// HTML page with one `<img>` per source, in order.
pub fn gallery_html(sources: &[&str]) -> String {
    let imgs: String = sources
        .iter()
        .map(|src| format!("<div class=\"result\"><img src=\"{src}\"></div>\n"))
        .collect();
    format!("<html><body>\n<img alt=\"logo\">\n{imgs}</body></html>")
}

/// Serve `html` as the search document.
pub async fn mount_search_page(server: &MockServer, html: String) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(server)
        .await;
}

/// Serve `body` at `image_path` with the given status, expecting `hits` requests.
pub async fn mount_image(server: &MockServer, image_path: &str, status: u16, body: Vec<u8>, hits: u64) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
        .expect(hits)
        .mount(server)
        .await;
}
