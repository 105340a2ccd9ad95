use super::common::validate_input;
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    services::reports::{GenerateReportRequest, GenerateReportResponse, ReportResponse},
    ApiResponse, AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

/// Generate a report over a date range
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "Reports",
    request_body = GenerateReportRequest,
    responses(
        (status = 201, description = "Report generated", body = ApiResponse<GenerateReportResponse>),
        (status = 400, description = "Unknown period or reversed range", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn generate_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(request): Json<GenerateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GenerateReportResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let generated = state.services.reports.generate_report(request).await?;
    info!(
        report_id = generated.report_id,
        requested_by = auth_user.user_id,
        "Report requested"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::success(generated))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Reports, newest first", body = ApiResponse<Vec<ReportResponse>>),
    ),
    security(("Bearer" = []))
)]
pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ReportResponse>>>, ServiceError> {
    let reports = state.services.reports.list_reports().await?;
    Ok(Json(ApiResponse::success(reports)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report with its lines", body = ApiResponse<ReportResponse>),
        (status = 404, description = "Report not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReportResponse>>, ServiceError> {
    let report = state.services.reports.get_report(id).await?;
    Ok(Json(ApiResponse::success(report)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.reports.delete_report(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
