use axum::{
    Router,
    body::{Body, Bytes},
    extract::{State, rejection::BytesRejection},
    http::{HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::dispatcher::ApiRequest;
use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;

const PREFLIGHT_ALLOW_METHODS: &str = "OPTIONS,GET,PUT,POST,DELETE,PATCH,HEAD";

/// Build the HTTP front door.
///
/// API docs are served directly; every other request (including unknown
/// paths) falls through to the dispatcher, which owns the 404 response.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new(routes::API_DOC).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(dispatch_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS && state.dispatcher.routes().matches_path(uri.path()) {
        return preflight_response();
    }

    // Over-limit or unreadable bodies still answer with the JSON envelope
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return ApiError::MalformedInput(rejection.body_text()).into_response(),
    };

    let mut request = ApiRequest::new(method, uri.path());
    if !body.is_empty() {
        match String::from_utf8(body.to_vec()) {
            Ok(text) => request = request.with_body(text),
            Err(err) => return ApiError::MalformedInput(err.to_string()).into_response(),
        }
    }

    state.dispatcher.handle(request).await.into_response()
}

/// CORS preflight answer for the item resources
fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(PREFLIGHT_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
