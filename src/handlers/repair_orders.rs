use super::common::{total_pages, validate_input, PaginationParams};
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    services::{
        notifications::WhatsAppLink,
        repair_orders::{
            LineItemRequest, RepairOrderFilter, RepairOrderRequest, RepairOrderResponse,
            StatusUpdateRequest,
        },
    },
    ApiResponse, AppState, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RepairOrderListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Matches customer name, device or phone
    pub search: Option<String>,
    pub status: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-orders",
    tag = "Repair Orders",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 20, max: 100)"),
        ("search" = Option<String>, Query, description = "Customer name, device or phone fragment"),
        ("status" = Option<String>, Query, description = "Filter by status"),
    ),
    responses(
        (status = 200, description = "Orders, newest first, without lines", body = ApiResponse<PaginatedResponse<RepairOrderResponse>>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("Bearer" = []))
)]
pub async fn list_repair_orders(
    State(state): State<AppState>,
    Query(query): Query<RepairOrderListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<RepairOrderResponse>>>, ServiceError> {
    let (page, limit) = PaginationParams {
        page: query.page,
        limit: query.limit,
    }
    .normalized();
    let filter = RepairOrderFilter {
        search: query.search,
        status: query.status,
    };

    let (items, total) = state
        .services
        .repair_orders
        .list_orders(filter, page, limit)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse {
        items,
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/repair-orders",
    tag = "Repair Orders",
    request_body = RepairOrderRequest,
    responses(
        (status = 201, description = "Order created with its lines", body = ApiResponse<RepairOrderResponse>),
        (status = 400, description = "Invalid order or unknown inventory item", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn create_repair_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(request): Json<RepairOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepairOrderResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let order = state.services.repair_orders.create_order(request).await?;
    info!(
        order_id = order.id,
        created_by = auth_user.user_id,
        "Repair order intake recorded"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-orders/{id}",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Repair order id")),
    responses(
        (status = 200, description = "Order with lines", body = ApiResponse<RepairOrderResponse>),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_repair_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RepairOrderResponse>>, ServiceError> {
    let order = state.services.repair_orders.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

#[utoipa::path(
    put,
    path = "/api/v1/repair-orders/{id}",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Repair order id")),
    request_body = RepairOrderRequest,
    responses(
        (status = 200, description = "Order replaced", body = ApiResponse<RepairOrderResponse>),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn update_repair_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<RepairOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepairOrderResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let order = state.services.repair_orders.update_order(id, request).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(order))))
}

#[utoipa::path(
    put,
    path = "/api/v1/repair-orders/{id}/status",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Repair order id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<RepairOrderResponse>),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn update_repair_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<RepairOrderResponse>>, ServiceError> {
    let order = state.services.repair_orders.update_status(id, request).await?;
    Ok(Json(ApiResponse::success(order)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/repair-orders/{id}",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Repair order id")),
    responses(
        (status = 204, description = "Order and its lines deleted"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn delete_repair_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.repair_orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-orders/{id}/whatsapp",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Repair order id")),
    responses(
        (status = 200, description = "Completion notice deep link", body = ApiResponse<WhatsAppLink>),
        (status = 400, description = "Order is not done", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn whatsapp_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<WhatsAppLink>>, ServiceError> {
    let link = state.services.repair_orders.whatsapp_link(id).await?;
    Ok(Json(ApiResponse::success(link)))
}

#[utoipa::path(
    post,
    path = "/api/v1/repair-orders/{id}/line-items",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Repair order id")),
    request_body = LineItemRequest,
    responses(
        (status = 201, description = "Line added; returns the recomputed order", body = ApiResponse<RepairOrderResponse>),
        (status = 400, description = "Invalid line or unknown inventory item", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn add_line_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<LineItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepairOrderResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let order = state.services.repair_orders.add_line_item(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

#[utoipa::path(
    put,
    path = "/api/v1/line-items/{id}",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Line item id")),
    request_body = LineItemRequest,
    responses(
        (status = 200, description = "Line updated; returns the recomputed order", body = ApiResponse<RepairOrderResponse>),
        (status = 404, description = "Line not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn update_line_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<LineItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepairOrderResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let order = state
        .services
        .repair_orders
        .update_line_item(id, request)
        .await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(order))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/line-items/{id}",
    tag = "Repair Orders",
    params(("id" = i32, Path, description = "Line item id")),
    responses(
        (status = 200, description = "Line removed; returns the recomputed order", body = ApiResponse<RepairOrderResponse>),
        (status = 404, description = "Line not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn delete_line_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RepairOrderResponse>>, ServiceError> {
    let order = state.services.repair_orders.delete_line_item(id).await?;
    Ok(Json(ApiResponse::success(order)))
}
