use crate::error::{ApiError, AppResult, ErrorBody};
use crate::models::{ItemModel, SoftDelete};
use crate::response::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::services::item::ItemService;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    /// Item name (1-200 characters)
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl From<ItemModel> for ItemResponse {
    fn from(item: ItemModel) -> Self {
        Self {
            is_deleted: item.is_deleted(),
            id: item.id,
            name: item.name,
            created_at: item.created_at,
            updated_at: item.updated_at,
            deleted_at: item.deleted_at,
        }
    }
}

fn item_service(db: Option<Extension<DatabaseConnection>>) -> AppResult<ItemService> {
    db.map(|Extension(db)| ItemService::new(db))
        .ok_or_else(|| ApiError::service_unavailable("Database is not configured"))
}

#[utoipa::path(
    get,
    path = "/items",
    params(PaginationParams),
    responses(
        (status = 200, description = "Live items, paginated", body = ApiResponse<PaginatedResponse<ItemResponse>>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 503, description = "No database configured", body = ErrorBody),
    ),
    tag = "items"
)]
pub async fn list_items(
    db: Option<Extension<DatabaseConnection>>,
    params: PaginationParams,
) -> AppResult<impl IntoResponse> {
    let service = item_service(db)?;
    let (items, total) = service.list(params).await?;
    let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(items, total, params)))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = ApiResponse<ItemResponse>),
        (status = 404, description = "Item not found or deleted", body = ErrorBody),
    ),
    tag = "items"
)]
pub async fn get_item(
    db: Option<Extension<DatabaseConnection>>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let item = item_service(db)?.get(id).await?;
    Ok(ApiResponse::ok(ItemResponse::from(item)))
}

#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemResponse>),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
    tag = "items"
)]
pub async fn create_item(
    db: Option<Extension<DatabaseConnection>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let item = item_service(db)?.create(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(ItemResponse::from(item), "Item created".to_string()),
    ))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item soft-deleted", body = ApiResponse<ItemResponse>),
        (status = 404, description = "Item not found or already deleted", body = ErrorBody),
    ),
    tag = "items"
)]
pub async fn delete_item(
    db: Option<Extension<DatabaseConnection>>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let item = item_service(db)?.soft_delete(id).await?;
    Ok(ApiResponse::ok(ItemResponse::from(item)))
}
