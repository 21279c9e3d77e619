use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset the database drivers can bind (`i64::MAX`).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, params: PaginationParams) -> Self {
        Self {
            items,
            total,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

/// `?limit=&offset=` query parameters. Used directly as an extractor; bad
/// values are rejected with a `BadRequestApiException` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of items per page (1-100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: u64,
    /// Offset from start
    #[serde(default)]
    #[validate(range(max = MAX_OFFSET))]
    #[param(minimum = 0, default = 0)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(query: &str) -> Result<PaginationParams, ApiError> {
        let request = Request::builder()
            .uri(format!("/items{query}"))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        PaginationParams::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn defaults_when_absent() {
        let params = extract("").await.unwrap();
        assert_eq!(params, PaginationParams::default());
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
    }

    #[tokio::test]
    async fn accepts_bounds() {
        assert_eq!(extract("?limit=1").await.unwrap().limit, 1);
        let params = extract("?limit=100&offset=40").await.unwrap();
        assert_eq!(params.limit, MAX_LIMIT);
        assert_eq!(params.offset, 40);
    }

    #[tokio::test]
    async fn rejects_out_of_range_limit() {
        for query in ["?limit=0", "?limit=101"] {
            let err = extract(query).await.unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::BadRequest, "{query}");
        }
    }

    #[tokio::test]
    async fn rejects_negative_or_garbage_offset() {
        for query in ["?offset=-1", "?offset=abc"] {
            let err = extract(query).await.unwrap_err();
            assert_eq!(err.status_code(), Some(400), "{query}");
        }
    }

    #[tokio::test]
    async fn rejects_offset_past_i64() {
        let params = extract("?offset=9223372036854775807").await.unwrap();
        assert_eq!(params.offset, MAX_OFFSET);

        for query in ["?offset=9223372036854775808", "?offset=18446744073709551615"] {
            let err = extract(query).await.unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::BadRequest, "{query}");
        }
    }

    #[test]
    fn paginated_response_echoes_params() {
        let params = PaginationParams {
            limit: 5,
            offset: 10,
        };
        let resp = PaginatedResponse::new(vec!["a".to_string()], 42, params);
        assert_eq!(resp.total, 42);
        assert_eq!(resp.limit, 5);
        assert_eq!(resp.offset, 10);
    }
}
