//! The fetch-resize-store pipeline.
//!
//! One run walks a fixed sequence of stages (see [`RunStage`]): fetch the
//! search document, extract image URLs, download them, resize them, store
//! them. Any stage failure ends the run; per-image download and decode
//! failures do not.

mod error;
pub mod executor;
mod stage;

pub use error::PipelineError;
pub use executor::{Pipeline, RunReport, StageCallback};
pub use stage::RunStage;
