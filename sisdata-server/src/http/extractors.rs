//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Record id taken from the trailing path of an item route.
///
/// More than one segment is a malformed path (400); a segment that is not
/// an integer names no record (404).
pub struct RecordId(pub i64);

impl RecordId {
    pub fn parse(rest: &str) -> Result<Self, ApiError> {
        let rest = rest.trim_start_matches('/');
        if rest.split('/').count() > 1 {
            return Err(ApiError::bad_request(format!("unexpected path segments: {rest}")));
        }

        rest.parse::<i64>().map(Self).map_err(|_| ApiError::NotFound {
            resource: "record",
            id: rest.to_owned(),
        })
    }
}

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(rest): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound {
                resource: "record",
                id: e.body_text(),
            })?;

        Self::parse(&rest)
    }
}

/// JSON request body decoded without regard to `Content-Type`.
///
/// Any read or decode failure is a 400, unlike `axum::Json` which answers
/// 415 or 422 for some of them.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::bad_request(format!("malformed JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parses_single_integer_segment() {
        assert_eq!(RecordId::parse("42").unwrap().0, 42);
        assert_eq!(RecordId::parse("/-3").unwrap().0, -3);
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        let err = RecordId::parse("abc").err().unwrap();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn extra_segments_are_bad_request() {
        let err = RecordId::parse("1/2").err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
