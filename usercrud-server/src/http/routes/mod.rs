//! Route handlers organized by resource

use axum::http::{Method, Uri};

use super::error::ApiError;

pub mod health;
pub mod users;

/// Fallback for unmatched paths, so 404s are JSON too
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_owned(),
    }
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}
