//! Image service coordinating database operations.
//!
//! The pipeline writes through [`ImageService::store_all`]; the API server
//! reads through [`ImageService::list_ids`] and [`ImageService::get_data`].
//! All methods block on SQLite and should be called from a blocking context
//! when used inside async code.

use thumbforge_common::{Error, ImageId, Result};
use thumbforge_db::migrations::{self, SchemaStatus};
use thumbforge_db::pool::{get_conn, DbPool};
use thumbforge_db::queries::images;

/// High-level image store over a database connection pool.
#[derive(Clone)]
pub struct ImageService {
    pool: DbPool,
}

impl ImageService {
    /// Create a new `ImageService`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Persist a batch of encoded images.
    ///
    /// The batch is written in one transaction: on error nothing from it is
    /// stored.
    ///
    /// # Returns
    ///
    /// The assigned IDs, in input order.
    pub fn store_all(&self, data: &[Vec<u8>]) -> Result<Vec<ImageId>> {
        let conn = get_conn(&self.pool)?;
        let ids = images::insert_images(&conn, data)?;
        tracing::debug!(count = ids.len(), "Stored images");
        Ok(ids)
    }

    /// IDs of every stored image, ascending.
    pub fn list_ids(&self) -> Result<Vec<ImageId>> {
        let conn = get_conn(&self.pool)?;
        images::list_image_ids(&conn)
    }

    /// Encoded bytes of one image.
    ///
    /// An unknown ID is [`Error::NotFound`].
    pub fn get_data(&self, id: ImageId) -> Result<Vec<u8>> {
        let conn = get_conn(&self.pool)?;
        images::get_image(&conn, id)?
            .map(|image| image.data)
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    pub fn count(&self) -> Result<i64> {
        let conn = get_conn(&self.pool)?;
        images::count_images(&conn)
    }

    /// Applied and embedded schema versions.
    pub fn schema_status(&self) -> Result<SchemaStatus> {
        let conn = get_conn(&self.pool)?;
        migrations::schema_status(&conn)
            .map_err(|e| Error::database(format!("Failed to read schema version: {}", e)))
    }
}
