use crate::{
    errors::ServiceError,
    services::dashboard::{DailySummary, DashboardOverview, DashboardStats},
    ApiResponse, AppState,
};
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Front-desk overview", body = ApiResponse<DashboardOverview>)),
    security(("Bearer" = []))
)]
pub async fn overview(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardOverview>>, ServiceError> {
    let overview = state.services.dashboard.overview().await?;
    Ok(Json(ApiResponse::success(overview)))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    tag = "Dashboard",
    responses((status = 200, description = "Today's counts", body = ApiResponse<DailySummary>)),
    security(("Bearer" = []))
)]
pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DailySummary>>, ServiceError> {
    let summary = state.services.dashboard.summary().await?;
    Ok(Json(ApiResponse::success(summary)))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Period totals and 7-day revenue chart", body = ApiResponse<DashboardStats>)),
    security(("Bearer" = []))
)]
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, ServiceError> {
    let stats = state.services.dashboard.stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}
