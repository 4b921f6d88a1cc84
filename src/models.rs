use serde::{Deserialize, Serialize};

/// A stored item, keyed by its caller-supplied `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub id: String,
    pub data: String,
}

/// Request body for POST /items
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateItemRequest {
    pub id: String,
    pub data: String,
}

impl From<CreateItemRequest> for Item {
    fn from(req: CreateItemRequest) -> Self {
        Item {
            id: req.id,
            data: req.data,
        }
    }
}

/// Plain acknowledgement body, e.g. `{"message":"Created"}`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
