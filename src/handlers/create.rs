use crate::dispatcher::ApiResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{CreateItemRequest, Item, MessageResponse};
use crate::routes;
use crate::store::ItemStore;
use axum::http::StatusCode;

/// POST /items handler - Create or overwrite an item
///
/// The body must be a JSON object with string fields `id` and `data`. An item
/// with the same id is replaced without any existence check.
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Item stored", body = MessageResponse),
        (status = 500, description = "Malformed body or store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(store: &dyn ItemStore, body: Option<&str>) -> Result<ApiResponse, ApiError> {
    let body = body.ok_or_else(|| ApiError::MalformedInput("request body is required".to_string()))?;
    let request: CreateItemRequest =
        serde_json::from_str(body).map_err(|err| ApiError::MalformedInput(err.to_string()))?;

    let item = Item::from(request);
    let id = item.id.clone();
    store.put(item).await?;

    tracing::info!("Successfully stored item with id: {}", id);
    Ok(ApiResponse::json(StatusCode::OK, &MessageResponse::new("Created"))?)
}
