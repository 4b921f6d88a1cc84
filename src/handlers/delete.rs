use crate::dispatcher::ApiResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::models::MessageResponse;
use crate::routes;
use crate::store::ItemStore;
use axum::http::StatusCode;

/// DELETE /items/{id} handler - Remove an item
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item removed (or was never present)", body = MessageResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(store: &dyn ItemStore, id: &str) -> Result<ApiResponse, ApiError> {
    store.delete(id).await?;

    tracing::info!("Deleted item with id: {}", id);
    Ok(ApiResponse::json(StatusCode::OK, &MessageResponse::new("Deleted"))?)
}
