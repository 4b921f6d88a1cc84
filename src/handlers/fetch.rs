use crate::dispatcher::ApiResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::store::ItemStore;
use axum::http::StatusCode;

/// GET /items/{id} handler - Retrieve one item
///
/// A missing id is not an error: the response is 200 with an empty body.
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found, or empty body when absent", body = Item),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn fetch_item(store: &dyn ItemStore, id: &str) -> Result<ApiResponse, ApiError> {
    match store.get(id).await? {
        Some(item) => {
            tracing::info!("Successfully retrieved item with id: {}", id);
            Ok(ApiResponse::json(StatusCode::OK, &item)?)
        }
        None => {
            tracing::info!("Item not found with id: {}", id);
            Ok(ApiResponse::new(StatusCode::OK, String::new()))
        }
    }
}
