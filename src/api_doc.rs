use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{CreateItemRequest, Item, MessageResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "items-service API",
        version = "1.0.0",
        description = "CRUD operations over items held in a key-value store"
    ),
    paths(
        handlers::create::create_item,
        handlers::list::list_items,
        handlers::fetch::fetch_item,
        handlers::delete::delete_item
    ),
    components(
        schemas(
            Item,
            CreateItemRequest,
            MessageResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "items", description = "Item operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_item_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        let items = paths.get("/items").expect("missing /items");
        assert!(items.get.is_some());
        assert!(items.post.is_some());

        let item = paths.get("/items/{id}").expect("missing /items/{id}");
        assert!(item.get.is_some());
        assert!(item.delete.is_some());
        assert_eq!(paths.len(), 2);
    }
}
