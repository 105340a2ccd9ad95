use super::common::validate_input;
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    services::employees::{
        AvailableUser, CreateEmployeeRequest, EmployeeResponse, UpdateEmployeeRequest,
    },
    ApiResponse, AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/v1/admin/employees/available-users",
    tag = "Employees",
    responses(
        (status = 200, description = "Employee accounts without an employee record", body = ApiResponse<Vec<AvailableUser>>),
        (status = 403, description = "Admin only"),
    ),
    security(("Bearer" = []))
)]
pub async fn available_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AvailableUser>>>, ServiceError> {
    let users = state.services.employees.available_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "All employees, newest first", body = ApiResponse<Vec<EmployeeResponse>>),
        (status = 403, description = "Admin only"),
    ),
    security(("Bearer" = []))
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EmployeeResponse>>>, ServiceError> {
    let employees = state.services.employees.list_employees().await?;
    Ok(Json(ApiResponse::success(employees)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeResponse>),
        (status = 400, description = "Invalid data or user already an employee", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn create_employee(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let employee = state.services.employees.create_employee(request).await?;
    info!(
        admin_id = auth_user.user_id,
        employee_id = employee.id,
        "Employee registered"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::success(employee))))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeResponse>),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let employee = state.services.employees.update_employee(id, request).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(employee))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee removed; the account remains"),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.employees.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
