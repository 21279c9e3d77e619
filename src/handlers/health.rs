use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/auth/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "auth"
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        message: "Api is running!".to_string(),
    })
}
