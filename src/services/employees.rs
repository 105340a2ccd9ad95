use crate::{
    auth,
    db::DbPool,
    entities::employee::{
        self, ActiveModel as EmployeeActiveModel, EmploymentStatus, Entity as EmployeeEntity,
        Position,
    },
    entities::user::{self, Entity as UserEntity, UserRole},
    errors::ServiceError,
    services::calendar::ShopCalendar,
};
use chrono::{DateTime, NaiveDate, Utc};
use metrics::counter;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i32,
    /// `cashier`/`technician`, or `kasir`/`teknisi`
    #[validate(custom = "super::not_blank")]
    pub position: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[validate(custom = "super::not_blank")]
    pub position: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(custom = "super::not_blank")]
    pub status: String,
    /// Replaces the linked account's password when non-blank
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub user_id: i32,
    pub username: Option<String>,
    pub name: String,
    pub position: Position,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
    pub status: EmploymentStatus,
}

impl EmployeeResponse {
    fn new(model: employee::Model, username: Option<String>) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            username,
            name: model.name,
            position: model.position,
            address: model.address,
            phone: model.phone,
            hire_date: model.hire_date,
            status: model.status,
        }
    }
}

/// Employee-role accounts without an employee record yet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailableUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

fn parse_position(raw: &str) -> Result<Position, ServiceError> {
    Position::from_str(raw.trim())
        .map_err(|_| ServiceError::ValidationError(format!("Unknown position: {}", raw.trim())))
}

fn parse_status(raw: Option<&str>) -> Result<EmploymentStatus, ServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(EmploymentStatus::default()),
        Some(s) => EmploymentStatus::from_str(s)
            .map_err(|_| ServiceError::ValidationError(format!("Unknown employee status: {}", s))),
    }
}

/// Trims optional text, storing blanks as NULL
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Staff records, managed by admins
#[derive(Clone)]
pub struct EmployeeService {
    db_pool: Arc<DbPool>,
    calendar: ShopCalendar,
}

impl EmployeeService {
    pub fn new(db_pool: Arc<DbPool>, calendar: ShopCalendar) -> Self {
        Self { db_pool, calendar }
    }

    #[instrument(skip(self))]
    pub async fn available_users(&self) -> Result<Vec<AvailableUser>, ServiceError> {
        let taken = Query::select()
            .column(employee::Column::UserId)
            .from(EmployeeEntity)
            .to_owned();

        let users = UserEntity::find()
            .filter(user::Column::Role.eq(UserRole::Employee))
            .filter(user::Column::Id.not_in_subquery(taken))
            .order_by_asc(user::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list users without employee record");
                ServiceError::DatabaseError(e)
            })?;

        Ok(users
            .into_iter()
            .map(|u| AvailableUser {
                id: u.id,
                name: u.name,
                username: u.username,
                created_at: u.created_at,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn list_employees(&self) -> Result<Vec<EmployeeResponse>, ServiceError> {
        let rows = EmployeeEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(employee::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list employees");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(emp, user)| EmployeeResponse::new(emp, user.map(|u| u.username)))
            .collect())
    }

    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    pub async fn create_employee(
        &self,
        request: CreateEmployeeRequest,
    ) -> Result<EmployeeResponse, ServiceError> {
        request.validate()?;
        let position = parse_position(&request.position)?;
        let status = parse_status(request.status.as_deref())?;

        let db = &*self.db_pool;
        let user = UserEntity::find_by_id(request.user_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch user for employee");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", request.user_id)))?;

        let existing = EmployeeEntity::find()
            .filter(employee::Column::UserId.eq(user.id))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to check existing employee");
                ServiceError::DatabaseError(e)
            })?;
        if existing.is_some() {
            warn!(user_id = user.id, "User is already registered as employee");
            return Err(ServiceError::BadRequest(format!(
                "User {} is already registered as an employee",
                user.username
            )));
        }

        let created = EmployeeActiveModel {
            user_id: Set(user.id),
            name: Set(user.name.clone()),
            position: Set(position),
            address: Set(optional_text(request.address)),
            phone: Set(optional_text(request.phone)),
            hire_date: Set(self.calendar.today()),
            status: Set(status),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create employee");
            ServiceError::DatabaseError(e)
        })?;

        counter!("servis_hp.employees.created", 1);
        info!(employee_id = created.id, position = %position, "Employee created");
        Ok(EmployeeResponse::new(created, Some(user.username)))
    }

    #[instrument(skip(self, request), fields(employee_id = %employee_id))]
    pub async fn update_employee(
        &self,
        employee_id: i32,
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeResponse, ServiceError> {
        request.validate()?;
        let position = parse_position(&request.position)?;
        let status = parse_status(Some(&request.status))?;
        let new_password = request
            .password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(auth::hash_password)
            .transpose()?;

        let db = &*self.db_pool;
        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for employee update");
            ServiceError::DatabaseError(e)
        })?;

        let (existing, user) = EmployeeEntity::find_by_id(employee_id)
            .find_also_related(UserEntity)
            .one(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id, "Failed to fetch employee");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Employee {} not found", employee_id)))?;

        let mut active: EmployeeActiveModel = existing.into();
        active.position = Set(position);
        active.address = Set(optional_text(request.address));
        active.phone = Set(optional_text(request.phone));
        active.status = Set(status);
        let updated = active.update(&txn).await.map_err(|e| {
            error!(error = %e, employee_id, "Failed to update employee");
            ServiceError::DatabaseError(e)
        })?;

        let password_changed = match (new_password, user.as_ref()) {
            (Some(hash), Some(account)) => {
                let mut account: user::ActiveModel = account.clone().into();
                account.password_hash = Set(hash);
                account.update(&txn).await.map_err(|e| {
                    error!(error = %e, employee_id, "Failed to update employee password");
                    ServiceError::DatabaseError(e)
                })?;
                true
            }
            _ => false,
        };

        txn.commit().await.map_err(|e| {
            error!(error = %e, employee_id, "Failed to commit employee update");
            ServiceError::DatabaseError(e)
        })?;

        info!(employee_id, password_changed, "Employee updated");
        Ok(EmployeeResponse::new(updated, user.map(|u| u.username)))
    }

    /// Removes the employee record; the login account stays
    #[instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn delete_employee(&self, employee_id: i32) -> Result<(), ServiceError> {
        let result = EmployeeEntity::delete_by_id(employee_id)
            .exec(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id, "Failed to delete employee");
                ServiceError::DatabaseError(e)
            })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Employee {} not found",
                employee_id
            )));
        }

        info!(employee_id, "Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("cashier", Position::Cashier)]
    #[case("Kasir", Position::Cashier)]
    #[case(" TEKNISI ", Position::Technician)]
    #[case("technician", Position::Technician)]
    fn positions_accept_both_languages(#[case] raw: &str, #[case] expected: Position) {
        assert_eq!(parse_position(raw).unwrap(), expected);
    }

    #[test]
    fn unknown_position_is_a_validation_error() {
        assert_matches!(
            parse_position("manager"),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[rstest]
    #[case(None, EmploymentStatus::Active)]
    #[case(Some(""), EmploymentStatus::Active)]
    #[case(Some("nonaktif"), EmploymentStatus::Inactive)]
    #[case(Some("Inactive"), EmploymentStatus::Inactive)]
    fn status_defaults_to_active(#[case] raw: Option<&str>, #[case] expected: EmploymentStatus) {
        assert_eq!(parse_status(raw).unwrap(), expected);
    }

    #[test]
    fn blank_optional_text_is_dropped() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" Jl. Merdeka ".into())), Some("Jl. Merdeka".into()));
    }

    #[test]
    fn create_request_requires_user_and_position() {
        let req = CreateEmployeeRequest {
            user_id: 0,
            position: " ".into(),
            address: None,
            phone: None,
            status: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
        assert!(errors.field_errors().contains_key("position"));
    }
}
