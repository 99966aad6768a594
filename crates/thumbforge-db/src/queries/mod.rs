//! Database query modules.
//!
//! - images: insert, list, and fetch stored images

pub mod images;
