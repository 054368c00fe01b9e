//! Error-to-HTTP response conversion.
//!
//! Every failure a handler can hit is answered the same way: `404` with
//! `{"success":false}`. The underlying error is only logged.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clearcast_common::Error;
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for the shared error type.
#[derive(Debug)]
pub struct GatewayError {
    inner: Error,
}

impl GatewayError {
    pub fn new(inner: Error) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Error {
        &self.inner
    }
}

impl From<Error> for GatewayError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(e: QueryRejection) -> Self {
        Self::new(Error::validation(format!("invalid query: {e}")))
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::warn!(
            code = self.inner.code(),
            error = %self.inner,
            "Request rejected"
        );

        (StatusCode::NOT_FOUND, axum::Json(json!({ "success": false }))).into_response()
    }
}
