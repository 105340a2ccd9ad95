use crate::{
    db::DbPool,
    entities::inventory_item::{
        self, ActiveModel as InventoryItemActiveModel, Entity as InventoryItemEntity,
        Model as InventoryItemModel,
    },
    entities::repair_line_item::{self, Entity as RepairLineItemEntity},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Create/update payload for a stock item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_item_prices"))]
pub struct InventoryItemRequest {
    #[validate(length(min = 1, max = 255), custom = "super::not_blank")]
    pub name: String,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
    #[validate(custom = "super::money")]
    #[schema(value_type = String, example = "250000")]
    pub sale_price: Decimal,
    #[validate(custom = "super::money")]
    #[schema(value_type = String, example = "180000")]
    pub cost_price: Decimal,
}

fn validate_item_prices(req: &InventoryItemRequest) -> Result<(), ValidationError> {
    if req.cost_price > req.sale_price {
        let mut err = ValidationError::new("cost_above_sale");
        err.message = Some("Cost price cannot exceed sale price".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Normal,
}

impl StockLevel {
    pub fn for_stock(stock: i32) -> Self {
        match stock {
            s if s <= 0 => Self::OutOfStock,
            s if s < 4 => Self::Low,
            _ => Self::Normal,
        }
    }
}

/// Share of the sale price, one decimal place; zero when the item is free
fn percent_of_sale(part: Decimal, sale_price: Decimal) -> Decimal {
    if sale_price.is_zero() {
        return Decimal::ZERO;
    }
    (part / sale_price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

pub fn margin_percent(sale_price: Decimal, cost_price: Decimal) -> Decimal {
    percent_of_sale(sale_price - cost_price, sale_price)
}

pub fn cost_percent(sale_price: Decimal, cost_price: Decimal) -> Decimal {
    percent_of_sale(cost_price, sale_price)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: i32,
    pub name: String,
    pub stock: i32,
    #[schema(value_type = String)]
    pub sale_price: Decimal,
    #[schema(value_type = String)]
    pub cost_price: Decimal,
    #[schema(value_type = String)]
    pub margin_percent: Decimal,
    #[schema(value_type = String)]
    pub cost_percent: Decimal,
    pub stock_level: StockLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<InventoryItemModel> for InventoryItemResponse {
    fn from(model: InventoryItemModel) -> Self {
        Self {
            margin_percent: margin_percent(model.sale_price, model.cost_price),
            cost_percent: cost_percent(model.sale_price, model.cost_price),
            stock_level: StockLevel::for_stock(model.stock),
            id: model.id,
            name: model.name,
            stock: model.stock,
            sale_price: model.sale_price,
            cost_price: model.cost_price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Spare part and accessory stock
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    low_stock_threshold: i32,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, low_stock_threshold: i32) -> Self {
        Self {
            db_pool,
            low_stock_threshold,
        }
    }

    /// Lists items by name, optionally filtered by a case-insensitive name fragment
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<InventoryItemResponse>, ServiceError> {
        let db = &*self.db_pool;

        let mut query = InventoryItemEntity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(super::contains_ci(inventory_item::Column::Name, term));
        }

        let items = query
            .order_by_asc(inventory_item::Column::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list inventory items");
                ServiceError::DatabaseError(e)
            })?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn get_item(&self, item_id: i32) -> Result<InventoryItemResponse, ServiceError> {
        self.find_model(item_id).await.map(Into::into)
    }

    /// Items at or below the low-stock threshold, emptiest first
    #[instrument(skip(self))]
    pub async fn low_stock_items(&self) -> Result<Vec<InventoryItemResponse>, ServiceError> {
        let db = &*self.db_pool;

        let items = InventoryItemEntity::find()
            .filter(inventory_item::Column::Stock.lte(self.low_stock_threshold))
            .order_by_asc(inventory_item::Column::Stock)
            .order_by_asc(inventory_item::Column::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list low stock items");
                ServiceError::DatabaseError(e)
            })?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_item(
        &self,
        request: InventoryItemRequest,
    ) -> Result<InventoryItemResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let item = InventoryItemActiveModel {
            name: Set(request.name.trim().to_string()),
            stock: Set(request.stock),
            sale_price: Set(request.sale_price),
            cost_price: Set(request.cost_price),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create inventory item");
            ServiceError::DatabaseError(e)
        })?;

        counter!("servis_hp.inventory.created", 1);
        info!(item_id = item.id, stock = item.stock, "Inventory item created");
        Ok(item.into())
    }

    #[instrument(skip(self, request), fields(item_id = %item_id))]
    pub async fn update_item(
        &self,
        item_id: i32,
        request: InventoryItemRequest,
    ) -> Result<InventoryItemResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let existing = self.find_model(item_id).await?;

        let mut active: InventoryItemActiveModel = existing.into();
        active.name = Set(request.name.trim().to_string());
        active.stock = Set(request.stock);
        active.sale_price = Set(request.sale_price);
        active.cost_price = Set(request.cost_price);
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(db).await.map_err(|e| {
            error!(error = %e, item_id, "Failed to update inventory item");
            ServiceError::DatabaseError(e)
        })?;

        info!(item_id, stock = updated.stock, "Inventory item updated");
        Ok(updated.into())
    }

    /// Deletes an item; repair lines that used it keep their text and prices
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn delete_item(&self, item_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for inventory delete");
            ServiceError::DatabaseError(e)
        })?;

        let detached = RepairLineItemEntity::update_many()
            .col_expr(
                repair_line_item::Column::InventoryItemId,
                Expr::value(sea_orm::Value::Int(None)),
            )
            .filter(repair_line_item::Column::InventoryItemId.eq(item_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, item_id, "Failed to detach repair lines from item");
                ServiceError::DatabaseError(e)
            })?;

        let result = InventoryItemEntity::delete_by_id(item_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, item_id, "Failed to delete inventory item");
                ServiceError::DatabaseError(e)
            })?;

        if result.rows_affected == 0 {
            warn!(item_id, "Inventory item not found for delete");
            return Err(ServiceError::NotFound(format!(
                "Inventory item {} not found",
                item_id
            )));
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, item_id, "Failed to commit inventory delete");
            ServiceError::DatabaseError(e)
        })?;

        info!(
            item_id,
            detached_lines = detached.rows_affected,
            "Inventory item deleted"
        );
        Ok(())
    }

    async fn find_model(&self, item_id: i32) -> Result<InventoryItemModel, ServiceError> {
        InventoryItemEntity::find_by_id(item_id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, item_id, "Failed to fetch inventory item");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Inventory item {} not found", item_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn request(sale: Decimal, cost: Decimal) -> InventoryItemRequest {
        InventoryItemRequest {
            name: "LCD Samsung A52".into(),
            stock: 3,
            sale_price: sale,
            cost_price: cost,
        }
    }

    #[test_case(dec!(250000), dec!(180000), dec!(28.0), dec!(72.0) ; "typical part")]
    #[test_case(dec!(300000), dec!(100000), dec!(66.7), dec!(33.3) ; "rounded to one place")]
    #[test_case(dec!(0), dec!(0), dec!(0), dec!(0) ; "free item")]
    fn pricing_helpers(sale: Decimal, cost: Decimal, margin: Decimal, cost_share: Decimal) {
        assert_eq!(margin_percent(sale, cost), margin);
        assert_eq!(cost_percent(sale, cost), cost_share);
    }

    #[test_case(0, StockLevel::OutOfStock)]
    #[test_case(3, StockLevel::Low)]
    #[test_case(4, StockLevel::Normal)]
    fn stock_levels(stock: i32, expected: StockLevel) {
        assert_eq!(StockLevel::for_stock(stock), expected);
    }

    #[test]
    fn cost_above_sale_price_is_rejected() {
        assert!(request(dec!(100000), dec!(150000)).validate().is_err());
        assert!(request(dec!(100000), dec!(100000)).validate().is_ok());
        assert!(request(dec!(100000), dec!(-1)).validate().is_err());
    }

    #[test]
    fn prices_must_fit_a_money_column() {
        let errors = request(dec!(10.001), dec!(5)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sale_price"));

        let errors = request(dec!(10000000000000), dec!(5))
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("sale_price"));
    }

    #[test]
    fn blank_name_and_negative_stock_are_rejected() {
        let mut req = request(dec!(10), dec!(5));
        req.name = "   ".into();
        req.stock = -1;
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn response_carries_derived_pricing() {
        let now = Utc::now();
        let response: InventoryItemResponse = InventoryItemModel {
            id: 4,
            name: "Baterai iPhone 11".into(),
            stock: 0,
            sale_price: dec!(400000),
            cost_price: dec!(300000),
            created_at: now,
            updated_at: None,
        }
        .into();
        assert_eq!(response.margin_percent, dec!(25.0));
        assert_eq!(response.cost_percent, dec!(75.0));
        assert_eq!(response.stock_level, StockLevel::OutOfStock);
    }
}
