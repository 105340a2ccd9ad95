use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Servis HP API",
        version = "1.0.0",
        description = r#"
# Servis HP API

Backend for a phone-repair shop.

## Features

- **Repair Orders**: Intake, status workflow, parts and labour lines, WhatsApp notifications
- **Inventory**: Spare parts with cost and selling prices and low-stock alerts
- **Staff**: Employee records linked to user accounts (admin only)
- **Reports**: Financial reports per period with a snapshot of every order
- **Dashboard**: Daily counts, revenue and a seven-day chart
- **Tracking**: Public repair lookup by customer name or phone

## Authentication

Log in at `/api/v1/login` and send the returned token on every protected call:

```
Authorization: Bearer <your-jwt-token>
```

## Pagination

The repair order list accepts `page` (default 1) and `limit` (default 20, max 100).
Money amounts are serialized as decimal strings.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup, login and session endpoints"),
        (name = "Employees", description = "Staff administration (admin only)"),
        (name = "Inventory", description = "Spare part inventory endpoints"),
        (name = "Repair Orders", description = "Repair order and line item endpoints"),
        (name = "Reports", description = "Financial report endpoints"),
        (name = "Dashboard", description = "Front-desk dashboard endpoints"),
        (name = "Tracking", description = "Public repair tracking"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        // Auth
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::auth::me,

        // Employees
        crate::handlers::employees::available_users,
        crate::handlers::employees::list_employees,
        crate::handlers::employees::create_employee,
        crate::handlers::employees::update_employee,
        crate::handlers::employees::delete_employee,

        // Inventory
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::get_inventory,
        crate::handlers::inventory::get_low_stock_items,
        crate::handlers::inventory::create_inventory,
        crate::handlers::inventory::update_inventory,
        crate::handlers::inventory::delete_inventory,

        // Repair orders
        crate::handlers::repair_orders::list_repair_orders,
        crate::handlers::repair_orders::create_repair_order,
        crate::handlers::repair_orders::get_repair_order,
        crate::handlers::repair_orders::update_repair_order,
        crate::handlers::repair_orders::update_repair_status,
        crate::handlers::repair_orders::delete_repair_order,
        crate::handlers::repair_orders::whatsapp_link,
        crate::handlers::repair_orders::add_line_item,
        crate::handlers::repair_orders::update_line_item,
        crate::handlers::repair_orders::delete_line_item,

        // Reports
        crate::handlers::reports::generate_report,
        crate::handlers::reports::list_reports,
        crate::handlers::reports::get_report,
        crate::handlers::reports::delete_report,

        // Dashboard
        crate::handlers::dashboard::overview,
        crate::handlers::dashboard::summary,
        crate::handlers::dashboard::stats,

        // Tracking & health
        crate::handlers::tracking::search_repairs,
        crate::handlers::health::api_status,
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,
            crate::PaginatedResponse<serde_json::Value>,
            crate::ResponseMeta,

            // Enums
            crate::entities::user::UserRole,
            crate::entities::employee::Position,
            crate::entities::employee::EmploymentStatus,
            crate::entities::repair_order::RepairStatus,
            crate::entities::report::PeriodType,

            // Accounts & staff
            crate::services::users::SignupRequest,
            crate::services::users::LoginRequest,
            crate::services::users::UserResponse,
            crate::services::users::LoginResponse,
            crate::handlers::auth::CurrentUser,
            crate::services::employees::CreateEmployeeRequest,
            crate::services::employees::UpdateEmployeeRequest,
            crate::services::employees::EmployeeResponse,
            crate::services::employees::AvailableUser,

            // Inventory
            crate::services::inventory::InventoryItemRequest,
            crate::services::inventory::InventoryItemResponse,
            crate::services::inventory::StockLevel,

            // Repair orders
            crate::services::repair_orders::RepairOrderRequest,
            crate::services::repair_orders::LineItemRequest,
            crate::services::repair_orders::StatusUpdateRequest,
            crate::services::repair_orders::RepairOrderResponse,
            crate::services::repair_orders::LineItemResponse,
            crate::services::notifications::WhatsAppLink,

            // Reports & dashboard
            crate::services::reports::GenerateReportRequest,
            crate::services::reports::GenerateReportResponse,
            crate::services::reports::ReportSummary,
            crate::services::reports::ReportResponse,
            crate::services::reports::ReportLineResponse,
            crate::services::dashboard::DashboardOverview,
            crate::services::dashboard::DailySummary,
            crate::services::dashboard::DashboardStats,
            crate::services::dashboard::PeriodStats,
            crate::services::dashboard::ChartPoint,
            crate::services::dashboard::RecentOrder,
            crate::services::dashboard::LowStockItem,

            // Health
            crate::handlers::health::HealthResponse,
            crate::handlers::health::ComponentHealth,
            crate::handlers::health::ComponentStatus,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_shop_endpoints() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Servis HP API"));
        assert!(json.contains("/api/v1/repair-orders/{id}/status"));
        assert!(json.contains("/api/v1/reports"));
        assert!(json.contains("/api/v1/repair-orders/search"));
        assert!(json.contains("\"Bearer\""));
    }
}
