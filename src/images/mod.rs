//! Image processing and storage.
//!
//! `resize` turns fetched bytes into fixed-size JPEG thumbnails; `service`
//! persists them through the database layer from `thumbforge_db`.

mod resize;
mod service;

pub use resize::{resize_batch, resize_image, resize_images, ResizeError, JPEG_QUALITY};
pub use service::ImageService;
