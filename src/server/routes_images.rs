//! Image listing and serving routes.
//!
//! - `GET /images` lists every stored image as `{id, url}`
//! - `GET /images/:image_id` returns the stored JPEG bytes

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thumbforge_common::{ImageId, JPEG_MIME};

use super::AppContext;

pub const NOT_FOUND_BODY: &str = "Image not found!";

/// Create image-related routes.
pub fn image_routes() -> Router<AppContext> {
    Router::new()
        .route("/images", get(list_images))
        .route("/images/:image_id", get(serve_image))
}

/// One entry of the image listing.
#[derive(Debug, Serialize)]
pub struct ImageEntry {
    pub id: ImageId,
    pub url: String,
}

impl From<ImageId> for ImageEntry {
    fn from(id: ImageId) -> Self {
        Self {
            id,
            url: format!("/images/{}", id),
        }
    }
}

/// List all stored images in ascending id order.
async fn list_images(State(ctx): State<AppContext>) -> Response {
    let images = ctx.images.clone();
    match tokio::task::spawn_blocking(move || images.list_ids()).await {
        Ok(Ok(ids)) => {
            let entries: Vec<ImageEntry> = ids.into_iter().map(ImageEntry::from).collect();
            Json(entries).into_response()
        }
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(e),
    }
}

/// Serve one stored image as `image/jpeg`.
///
/// Unknown and non-numeric ids are both `404 Image not found!`.
async fn serve_image(State(ctx): State<AppContext>, Path(image_id): Path<String>) -> Response {
    let Ok(id) = image_id.parse::<ImageId>() else {
        return not_found();
    };

    let images = ctx.images.clone();
    match tokio::task::spawn_blocking(move || images.get_data(id)).await {
        Ok(Ok(data)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, JPEG_MIME)],
            data,
        )
            .into_response(),
        Ok(Err(e)) if e.is_not_found() => not_found(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(e),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    tracing::error!("Image request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
