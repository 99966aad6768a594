//! Thumbforge - image scraping and thumbnail service
//!
//! This library crate exposes the pipeline, storage, and HTTP layers for the
//! `thumbforge` binary and for integration testing.

pub mod config;
pub mod images;
pub mod pipeline;
pub mod scrape;
pub mod server;
