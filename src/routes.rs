// Route path constants - single source of truth for all API paths

use axum::http::Method;
use percent_encoding::percent_decode_str;

pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
pub const ITEM_PREFIX: &str = "/items/";
pub const API_DOC: &str = "/_doc";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// A resolved operation, carrying any path parameter it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Fetch(String),
    Delete(String),
}

/// How a route's pattern is compared against a request path, and the
/// operation it resolves to on a match
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Path must equal `path`
    Exact {
        path: &'static str,
        operation: Operation,
    },
    /// Path must start with `prefix`; the id is path segment 2, percent-decoded
    /// (`/items/a1` and `/items/a1/extra` both yield `a1`)
    ItemId {
        prefix: &'static str,
        operation: fn(String) -> Operation,
    },
}

impl PathPattern {
    fn resolve(&self, path: &str) -> Option<Operation> {
        match self {
            PathPattern::Exact { path: exact, operation } => {
                (path == *exact).then(|| operation.clone())
            }
            PathPattern::ItemId { prefix, operation } => {
                if !path.starts_with(*prefix) {
                    return None;
                }
                let segment = path.split('/').nth(2).unwrap_or_default();
                Some(operation(decode_segment(segment)))
            }
        }
    }
}

/// Percent-decode a path segment. Invalid UTF-8 sequences become U+FFFD.
fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
}

impl Route {
    pub fn new(method: Method, pattern: PathPattern) -> Self {
        Route { method, pattern }
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<Operation> {
        if self.method != *method {
            return None;
        }
        self.pattern.resolve(path)
    }
}

/// Ordered route table for the items API. First match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        RouteTable { routes }
    }

    pub fn items() -> Self {
        let collection = |operation: Operation| PathPattern::Exact {
            path: ITEMS,
            operation,
        };
        let item = |operation: fn(String) -> Operation| PathPattern::ItemId {
            prefix: ITEM_PREFIX,
            operation,
        };
        RouteTable::new(vec![
            Route::new(Method::POST, collection(Operation::Create)),
            Route::new(Method::GET, collection(Operation::List)),
            Route::new(Method::GET, item(Operation::Fetch)),
            Route::new(Method::DELETE, item(Operation::Delete)),
        ])
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<Operation> {
        self.routes
            .iter()
            .find_map(|route| route.resolve(method, path))
    }

    /// True if any route's pattern matches the path, regardless of method
    pub fn matches_path(&self, path: &str) -> bool {
        self.routes
            .iter()
            .any(|route| route.pattern.resolve(path).is_some())
    }
}
