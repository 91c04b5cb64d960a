/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, so handlers can
 * return `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * ```json
 * { "error": "Error message" }
 * ```
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Json, Response},
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }

        let body = serde_json::json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

/// Extractor rejections keep axum's status and text but use the JSON body
macro_rules! from_rejection {
    ($($rejection:ty),+) => {$(
        impl From<$rejection> for BackendError {
            fn from(rejection: $rejection) -> Self {
                BackendError::handler(rejection.status(), rejection.body_text())
            }
        }
    )+};
}

from_rejection!(JsonRejection, PathRejection, QueryRejection);
