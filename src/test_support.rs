//! Shared fixtures for handler and dispatcher tests

use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use tower::ServiceExt;

use crate::app::build_router;
use crate::config::Resources;
use crate::dispatcher::Dispatcher;
use crate::models::Item;
use crate::state::AppState;
use crate::store::{ItemStore, MemoryStore};

/// Store whose every call fails, for exercising the internal fault path
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl ItemStore for FailingStore {
    async fn put(&self, _item: Item) -> Result<()> {
        bail!("store unavailable")
    }

    async fn get(&self, _id: &str) -> Result<Option<Item>> {
        bail!("store unavailable")
    }

    async fn scan_all(&self) -> Result<Vec<Item>> {
        bail!("store unavailable")
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        bail!("store unavailable")
    }
}

pub fn test_resources() -> Resources {
    Resources {
        table_name: "items-test".to_string(),
        bucket_name: "items-test-bucket".to_string(),
    }
}

pub fn memory_dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(MemoryStore::new()), test_resources())
}

pub fn setup_test_app() -> Router {
    build_router(AppState::new(memory_dispatcher()))
}

pub fn failing_app() -> Router {
    let dispatcher = Dispatcher::new(Arc::new(FailingStore), test_resources());
    build_router(AppState::new(dispatcher))
}

/// Send one request through the router and collect status, headers and body text
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, String) {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}
