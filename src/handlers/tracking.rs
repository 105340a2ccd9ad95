use crate::{
    errors::ServiceError, services::repair_orders::RepairOrderResponse, ApiResponse, AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TrackingQuery {
    /// Customer name fragment, case-insensitive
    pub name: Option<String>,
    /// Phone number fragment
    pub phone: Option<String>,
}

/// Public repair status lookup; no login required
#[utoipa::path(
    get,
    path = "/api/v1/repair-orders/search",
    tag = "Tracking",
    params(TrackingQuery),
    responses(
        (status = 200, description = "Matching orders with lines, latest intake first", body = ApiResponse<Vec<RepairOrderResponse>>),
        (status = 400, description = "Neither name nor phone given", body = crate::errors::ErrorResponse),
    )
)]
pub async fn search_repairs(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<ApiResponse<Vec<RepairOrderResponse>>>, ServiceError> {
    let orders = state
        .services
        .repair_orders
        .track(query.name.as_deref(), query.phone.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(orders)))
}
