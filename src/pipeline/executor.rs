use std::sync::Arc;

use serde::Serialize;
use thumbforge_common::{ImageId, TargetSize};
use tracing::{debug, info};

use super::{PipelineError, RunStage};
use crate::config::Config;
use crate::images::{resize_images, ImageService};
use crate::scrape::{extract_image_urls, FetchError, Fetcher, SearchProvider, UrlTemplateProvider};

/// Called on every stage transition
pub type StageCallback = Box<dyn Fn(RunStage) + Send + Sync>;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub query: String,
    pub search_url: String,
    /// Image URLs found in the search document
    pub urls_found: usize,
    /// URLs actually requested after truncation to `max_images`
    pub urls_requested: usize,
    pub fetched: usize,
    pub resized: usize,
    pub stored: usize,
    pub ids: Vec<ImageId>,
}

/// Fetch-resize-store orchestrator.
///
/// Everything a run needs is passed in at construction; the pipeline never
/// reads the environment.
pub struct Pipeline {
    fetcher: Fetcher,
    search: Arc<dyn SearchProvider>,
    store: ImageService,
    target: TargetSize,
    stage_callback: Option<StageCallback>,
}

impl Pipeline {
    pub fn new(
        fetcher: Fetcher,
        search: Arc<dyn SearchProvider>,
        store: ImageService,
        target: TargetSize,
    ) -> Self {
        Self {
            fetcher,
            search,
            store,
            target,
            stage_callback: None,
        }
    }

    /// Build a pipeline from loaded configuration and an open store.
    pub fn from_config(config: &Config, store: ImageService) -> Result<Self, FetchError> {
        let fetcher = Fetcher::from_config(&config.scrape)?;
        let search = Arc::new(UrlTemplateProvider::new(config.scrape.search_url.clone()));
        Ok(Self::new(fetcher, search, store, config.resize.target()))
    }

    pub fn with_stage_callback(mut self, callback: StageCallback) -> Self {
        self.stage_callback = Some(callback);
        self
    }

    fn enter(&self, stage: RunStage) {
        if let Some(ref cb) = self.stage_callback {
            cb(stage);
        }
        debug!(%stage, "Pipeline stage");
    }

    /// Run once for `query`, storing at most `max_images` images.
    ///
    /// Returns the number of images stored.
    pub async fn run(&self, query: &str, max_images: usize) -> Result<usize, PipelineError> {
        Ok(self.run_detailed(query, max_images).await?.stored)
    }

    /// Like [`run`](Self::run), returning per-stage counts.
    pub async fn run_detailed(
        &self,
        query: &str,
        max_images: usize,
    ) -> Result<RunReport, PipelineError> {
        self.enter(RunStage::Init);

        let search_url =
            self.search
                .search_url(query)
                .map_err(|source| PipelineError::SearchUrl {
                    query: query.to_string(),
                    source,
                })?;

        info!(
            provider = self.search.name(),
            url = %search_url,
            "Fetching search document for {:?}", query
        );
        let html = self
            .fetcher
            .fetch_document(search_url.as_str())
            .await
            .map_err(PipelineError::SearchFetch)?;
        self.enter(RunStage::SearchFetched);

        let mut urls = extract_image_urls(&html, search_url.as_str());
        let urls_found = urls.len();
        urls.truncate(max_images);
        info!(
            found = urls_found,
            requested = urls.len(),
            "Extracted image URLs"
        );
        self.enter(RunStage::UrlsExtracted);

        let images = self.fetcher.fetch_many(&urls).await;
        let fetched = images.iter().filter(|img| img.is_some()).count();
        info!(fetched, failed = urls.len() - fetched, "Fetched images");
        self.enter(RunStage::ImagesFetched);

        let target = self.target;
        let resized = tokio::task::spawn_blocking(move || resize_images(images, target)).await?;
        let resized_count = resized.len();
        info!(resized = resized_count, %target, "Resized images");
        self.enter(RunStage::ImagesResized);

        let store = self.store.clone();
        let ids = tokio::task::spawn_blocking(move || store.store_all(&resized))
            .await?
            .map_err(PipelineError::Store)?;
        info!(stored = ids.len(), "Stored images");
        self.enter(RunStage::Stored);

        let report = RunReport {
            query: query.to_string(),
            search_url: search_url.to_string(),
            urls_found,
            urls_requested: urls.len(),
            fetched,
            resized: resized_count,
            stored: ids.len(),
            ids,
        };
        self.enter(RunStage::Done);

        Ok(report)
    }
}
