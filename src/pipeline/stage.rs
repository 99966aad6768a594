use std::fmt;

use serde::Serialize;

/// Stages of a single pipeline run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Init,
    SearchFetched,
    UrlsExtracted,
    ImagesFetched,
    ImagesResized,
    Stored,
    Done,
}

impl RunStage {
    pub const ALL: [RunStage; 7] = [
        RunStage::Init,
        RunStage::SearchFetched,
        RunStage::UrlsExtracted,
        RunStage::ImagesFetched,
        RunStage::ImagesResized,
        RunStage::Stored,
        RunStage::Done,
    ];
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::SearchFetched => "search_fetched",
            Self::UrlsExtracted => "urls_extracted",
            Self::ImagesFetched => "images_fetched",
            Self::ImagesResized => "images_resized",
            Self::Stored => "stored",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}
