use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::Resources;
use crate::error::ApiError;
use crate::handlers;
use crate::routes::{Operation, RouteTable};
use crate::store::ItemStore;

/// Inbound request descriptor: method, path (no query string) and optional body
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Outbound response envelope. Always carries the JSON content type and a
/// wildcard CORS origin, whatever the outcome.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            headers: envelope_headers(),
            body: body.into(),
        }
    }

    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(status, serde_json::to_string(value)?))
    }
}

fn envelope_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Stateless request handler for the items API.
///
/// Resolves the request against the route table, performs exactly one store
/// call and converts the outcome (success or [`ApiError`]) into an
/// [`ApiResponse`]. Cloning is cheap; clones share the same store handle.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ItemStore>,
    routes: RouteTable,
    resources: Resources,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ItemStore>, resources: Resources) -> Self {
        tracing::info!(
            "Dispatcher ready (table: {}, bucket: {})",
            resources.table_name,
            resources.bucket_name
        );
        Dispatcher {
            store,
            routes: RouteTable::items(),
            resources,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Handle one request. Never fails: every error becomes a response.
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => err.into(),
        }
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let ApiRequest { method, path, body } = request;

        let Some(operation) = self.routes.resolve(&method, &path) else {
            tracing::debug!("No route for {} {}", method, path);
            return Err(ApiError::RouteNotFound);
        };

        tracing::debug!(
            table = %self.resources.table_name,
            "Dispatching {} {} to {:?}",
            method,
            path,
            operation
        );

        let store = self.store.as_ref();
        match operation {
            Operation::Create => handlers::create_item(store, body.as_deref()).await,
            Operation::List => handlers::list_items(store).await,
            Operation::Fetch(id) => handlers::fetch_item(store, &id).await,
            Operation::Delete(id) => handlers::delete_item(store, &id).await,
        }
    }
}
