use crate::{
    auth::{self, AuthError, AuthService, IssuedToken},
    db::DbPool,
    entities::user::{self, ActiveModel as UserActiveModel, Entity as UserEntity, UserRole},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use metrics::counter;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 255), custom = "super::not_blank")]
    pub name: String,
    #[validate(length(min = 1, max = 64), custom = "super::not_blank")]
    pub username: String,
    #[validate(length(min = 1, max = 128), custom = "super::not_blank")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1), custom = "super::not_blank")]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Shop accounts: signup, login and the startup admin
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>, auth: Arc<AuthService>) -> Self {
        Self { db_pool, auth }
    }

    /// Registers a new account with the employee role
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: SignupRequest) -> Result<UserResponse, ServiceError> {
        request.validate()?;

        let username = request.username.trim().to_string();
        if self.find_by_username(&username).await?.is_some() {
            warn!(username = %username, "Signup rejected: username taken");
            return Err(ServiceError::Conflict(format!(
                "Username {} is already taken",
                username
            )));
        }

        let created = self
            .insert_user(request.name.trim(), &username, &request.password, UserRole::Employee)
            .await?;

        counter!("servis_hp.users.signups", 1);
        info!(user_id = created.id, "User signed up");
        Ok(created.into())
    }

    /// Checks credentials and issues a bearer token
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ServiceError> {
        request.validate()?;

        let user = self
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| {
                counter!("servis_hp.auth.login_failures", 1);
                ServiceError::Unauthorized("User not found".to_string())
            })?;

        if !auth::verify_password(&request.password, &user.password_hash)? {
            counter!("servis_hp.auth.login_failures", 1);
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(ServiceError::Unauthorized("Wrong password".to_string()));
        }

        let IssuedToken {
            token,
            token_type,
            expires_in,
        } = self
            .auth
            .issue_token(&user)
            .map_err(token_issue_failed)?;

        info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(LoginResponse {
            token,
            token_type,
            expires_in,
            user: user.into(),
        })
    }

    /// Creates the configured admin account unless the username already exists
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        if let Some(existing) = self.find_by_username(username).await? {
            if existing.role != UserRole::Admin {
                warn!(user_id = existing.id, "Bootstrap admin username belongs to a non-admin account");
            }
            return Ok(false);
        }

        let admin = self
            .insert_user("Administrator", username, password, UserRole::Admin)
            .await?;
        info!(user_id = admin.id, "Bootstrap admin account created");
        Ok(true)
    }

    async fn insert_user(
        &self,
        name: &str,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<user::Model, ServiceError> {
        let password_hash = auth::hash_password(password)?;

        UserActiveModel {
            name: Set(name.to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| insert_failure(username, e))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up user by username");
                ServiceError::DatabaseError(e)
            })
    }
}

/// Signing a token is a server fault, never the caller's
fn token_issue_failed(err: AuthError) -> ServiceError {
    error!(error = %err, "Failed to issue token");
    ServiceError::InternalError(err.to_string())
}

/// The unique index on username catches signups that pass the lookup concurrently
fn insert_failure(username: &str, err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            warn!(username = %username, "Insert rejected: username taken");
            ServiceError::Conflict(format!("Username {} is already taken", username))
        }
        _ => {
            error!(error = %err, "Failed to insert user");
            ServiceError::DatabaseError(err)
        }
    }
}
