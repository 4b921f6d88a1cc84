use crate::dispatcher::ApiResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::store::ItemStore;
use axum::http::StatusCode;

/// GET /items handler - List all items
///
/// Full scan of the store with no filter, limit or pagination. Order is unspecified.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "Every stored item", body = [Item]),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_items(store: &dyn ItemStore) -> Result<ApiResponse, ApiError> {
    let items = store.scan_all().await?;

    tracing::info!("Listed {} items", items.len());
    Ok(ApiResponse::json(StatusCode::OK, &items)?)
}
