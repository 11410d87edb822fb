//! API error type with IntoResponse
//!
//! Errors become a bare status code; no detail is written to the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::service::ServiceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or path (400)
    BadRequest { reason: String },

    /// Unknown or unparseable record id (404)
    NotFound { resource: &'static str, id: String },

    /// Store unavailable or failing (500, logged by the service)
    Internal(ServiceError),
}

impl ApiError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest { reason } => tracing::debug!(%reason, "bad request"),
            Self::NotFound { resource, id } => tracing::debug!(resource, %id, "not found"),
            Self::Internal(e) => tracing::debug!(error = %e, "internal error"),
        }

        self.status().into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { id } => Self::NotFound {
                resource: "record",
                id: id.to_string(),
            },
            ServiceError::BadInput { reason } => Self::BadRequest { reason },
            e @ ServiceError::Internal(_) => Self::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    use crate::store::StoreError;

    #[tokio::test]
    async fn bad_request_is_400_with_empty_body() {
        let response = ApiError::bad_request("malformed JSON").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn service_errors_map_to_status() {
        let not_found: ApiError = ServiceError::NotFound { id: 4 }.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let bad_input: ApiError = ServiceError::BadInput {
            reason: "duplicate".into(),
        }
        .into();
        assert_eq!(bad_input.status(), StatusCode::BAD_REQUEST);

        let internal: ApiError = ServiceError::Internal(StoreError::Timeout {
            after: Duration::from_secs(3),
        })
        .into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
