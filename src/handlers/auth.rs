use super::common::validate_input;
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    services::users::{LoginRequest, LoginResponse, SignupRequest, UserResponse},
    ApiResponse, AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Register a shop account
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Missing fields", body = ApiResponse<UserResponse>),
        (status = 409, description = "Username taken", body = crate::errors::ErrorResponse),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let user = state.services.users.signup(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing fields", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Unknown user or wrong password", body = crate::errors::ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), ServiceError> {
    if let Err(rejection) = validate_input(&request) {
        return Ok(rejection);
    }

    let session = state.services.users.login(request).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(session))))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub role: crate::entities::user::UserRole,
}

/// The caller as seen through its token
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<CurrentUser>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("Bearer" = []))
)]
pub async fn me(auth_user: AuthUser) -> Json<ApiResponse<CurrentUser>> {
    Json(ApiResponse::success(CurrentUser {
        id: auth_user.user_id,
        name: auth_user.name,
        username: auth_user.username,
        role: auth_user.role,
    }))
}
