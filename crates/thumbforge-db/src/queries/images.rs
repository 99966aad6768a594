//! Image database queries.
//!
//! Insert, list, and fetch operations for the `images` table. There is no
//! update or delete path: stored images are immutable.

use rusqlite::Connection;
use thumbforge_common::{Error, ImageId, Result};

use crate::models::StoredImage;

/// Insert a single image and return its assigned ID.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `data` - Encoded image bytes
pub fn insert_image(conn: &Connection, data: &[u8]) -> Result<ImageId> {
    conn.execute(
        "INSERT INTO images (data) VALUES (:data)",
        rusqlite::named_params! { ":data": data },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(ImageId::new(conn.last_insert_rowid()))
}

/// Insert a batch of images inside a single transaction.
///
/// Either every image is stored or none is: the first failing insert rolls
/// the whole batch back. IDs are returned in input order and are ascending.
///
/// # Returns
///
/// * `Ok(Vec<ImageId>)` - One ID per input image
/// * `Err(Error)` - If any insert or the commit fails
pub fn insert_images(conn: &Connection, images: &[Vec<u8>]) -> Result<Vec<ImageId>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let mut ids = Vec::with_capacity(images.len());
    for data in images {
        ids.push(insert_image(&tx, data)?);
    }

    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    Ok(ids)
}

/// List the IDs of all stored images in ascending order.
pub fn list_image_ids(conn: &Connection) -> Result<Vec<ImageId>> {
    let mut stmt = conn
        .prepare("SELECT id FROM images ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;

    let ids = stmt
        .query_map([], |row| row.get::<_, i64>(0).map(ImageId::new))
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(ids)
}

/// Get an image by ID.
///
/// # Returns
///
/// * `Ok(Some(StoredImage))` - The image if found
/// * `Ok(None)` - If the image does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_image(conn: &Connection, id: ImageId) -> Result<Option<StoredImage>> {
    let result = conn.query_row(
        "SELECT id, data FROM images WHERE id = :id",
        rusqlite::named_params! { ":id": id.get() },
        |row| {
            Ok(StoredImage {
                id: ImageId::new(row.get(0)?),
                data: row.get(1)?,
            })
        },
    );

    match result {
        Ok(image) => Ok(Some(image)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Count stored images.
pub fn count_images(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_conn, init_memory_pool};

    #[test]
    fn test_insert_and_get() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let data = b"\xFF\xD8\xFF fake jpeg".to_vec();
        let id = insert_image(&conn, &data).unwrap();

        let image = get_image(&conn, id).unwrap().unwrap();
        assert_eq!(image.id, id);
        assert_eq!(image.data, data);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        assert!(get_image(&conn, ImageId::new(999)).unwrap().is_none());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let a = insert_image(&conn, b"a").unwrap();
        let b = insert_image(&conn, b"b").unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_insert_images_returns_ids_in_order() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let batch = vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()];
        let ids = insert_images(&conn, &batch).unwrap();

        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(get_image(&conn, ids[1]).unwrap().unwrap().data, b"two");
        assert_eq!(list_image_ids(&conn).unwrap(), ids);
    }

    #[test]
    fn test_insert_images_empty_batch() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        assert!(insert_images(&conn, &[]).unwrap().is_empty());
        assert_eq!(count_images(&conn).unwrap(), 0);
    }

    #[test]
    fn test_insert_images_is_all_or_nothing() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        // Reject a specific payload so the second insert of the batch fails
        conn.execute_batch(
            "CREATE TRIGGER reject_poison BEFORE INSERT ON images
             WHEN NEW.data = x'DEAD'
             BEGIN SELECT RAISE(ABORT, 'poison'); END;",
        )
        .unwrap();

        let batch = vec![b"ok".to_vec(), vec![0xDE, 0xAD], b"never".to_vec()];
        let err = insert_images(&conn, &batch).unwrap_err();
        assert!(err.is_database());

        assert_eq!(count_images(&conn).unwrap(), 0);
    }

    #[test]
    fn test_list_and_count() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        assert!(list_image_ids(&conn).unwrap().is_empty());

        insert_image(&conn, b"x").unwrap();
        insert_image(&conn, b"y").unwrap();

        assert_eq!(list_image_ids(&conn).unwrap().len(), 2);
        assert_eq!(count_images(&conn).unwrap(), 2);
    }
}
