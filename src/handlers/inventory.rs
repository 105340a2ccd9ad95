use super::common::validate_input;
use crate::{
    errors::ServiceError,
    services::inventory::{InventoryItemRequest, InventoryItemResponse},
    ApiResponse, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct InventoryQuery {
    /// Case-insensitive name fragment
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    tag = "Inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Items by name", body = ApiResponse<Vec<InventoryItemResponse>>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("Bearer" = []))
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<ApiResponse<Vec<InventoryItemResponse>>>, ServiceError> {
    let items = state
        .services
        .inventory
        .list_items(query.search.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    tag = "Inventory",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item", body = ApiResponse<InventoryItemResponse>),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<InventoryItemResponse>>, ServiceError> {
    let item = state.services.inventory.get_item(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/low-stock",
    tag = "Inventory",
    responses(
        (status = 200, description = "Items at or below the low-stock threshold", body = ApiResponse<Vec<InventoryItemResponse>>),
    ),
    security(("Bearer" = []))
)]
pub async fn get_low_stock_items(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryItemResponse>>>, ServiceError> {
    let items = state.services.inventory.low_stock_items().await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    tag = "Inventory",
    request_body = InventoryItemRequest,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<InventoryItemResponse>),
        (status = 400, description = "Invalid item", body = ApiResponse<InventoryItemResponse>),
    ),
    security(("Bearer" = []))
)]
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(request): Json<InventoryItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryItemResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let item = state.services.inventory.create_item(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}",
    tag = "Inventory",
    params(("id" = i32, Path, description = "Item id")),
    request_body = InventoryItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<InventoryItemResponse>),
        (status = 400, description = "Invalid item", body = ApiResponse<InventoryItemResponse>),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<InventoryItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryItemResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let item = state.services.inventory.update_item(id, request).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(item))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    tag = "Inventory",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.inventory.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
