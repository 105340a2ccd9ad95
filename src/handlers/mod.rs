pub mod auth;
pub mod common;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod inventory;
pub mod repair_orders;
pub mod reports;
pub mod tracking;

use crate::{
    auth::AuthService,
    config::AppConfig,
    db::DbPool,
    errors::ServiceError,
    services::{
        calendar::ShopCalendar, dashboard::DashboardService, employees::EmployeeService,
        inventory::InventoryService, repair_orders::RepairOrderService, reports::ReportService,
        users::UserService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<UserService>,
    pub employees: Arc<EmployeeService>,
    pub inventory: Arc<InventoryService>,
    pub repair_orders: Arc<RepairOrderService>,
    pub reports: Arc<ReportService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(
        db_pool: Arc<DbPool>,
        config: &AppConfig,
        auth_service: Arc<AuthService>,
    ) -> Result<Self, ServiceError> {
        let calendar = ShopCalendar::new(config.shop_utc_offset_hours)?;
        let threshold = config.low_stock_threshold;

        Ok(Self {
            users: Arc::new(UserService::new(db_pool.clone(), auth_service)),
            employees: Arc::new(EmployeeService::new(db_pool.clone(), calendar)),
            inventory: Arc::new(InventoryService::new(db_pool.clone(), threshold)),
            repair_orders: Arc::new(RepairOrderService::new(db_pool.clone())),
            reports: Arc::new(ReportService::new(db_pool.clone(), calendar)),
            dashboard: Arc::new(DashboardService::new(db_pool, calendar, threshold)),
        })
    }
}
