//! Rust models matching the database schema.

use thumbforge_common::ImageId;

/// A persisted image row.
///
/// `data` is the re-encoded JPEG exactly as it was inserted; rows are never
/// updated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub id: ImageId,
    pub data: Vec<u8>,
}
