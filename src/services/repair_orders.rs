use crate::{
    db::DbPool,
    entities::inventory_item::{self, Entity as InventoryItemEntity},
    entities::repair_line_item::{
        self, ActiveModel as LineItemActiveModel, Entity as LineItemEntity, Model as LineItemModel,
    },
    entities::repair_order::{
        self, ActiveModel as RepairOrderActiveModel, Entity as RepairOrderEntity,
        Model as RepairOrderModel, RepairStatus,
    },
    errors::ServiceError,
    services::{
        costing::{self, PricedLine},
        lifecycle,
        notifications::{self, WhatsAppLink},
    },
};
use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, sync::Arc};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LineItemRequest {
    /// Stock item this line draws from, if any
    pub inventory_item_id: Option<i32>,
    #[validate(length(min = 1, max = 255), custom = "super::not_blank")]
    pub description: String,
    #[validate(range(
        min = 0,
        max = 100000,
        message = "Quantity must be between 0 and 100000"
    ))]
    pub quantity: i32,
    #[validate(custom = "super::money")]
    #[schema(value_type = String, example = "150000")]
    pub unit_price: Decimal,
}

impl LineItemRequest {
    fn priced(&self) -> PricedLine {
        PricedLine {
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Create/replace payload for a repair order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RepairOrderRequest {
    #[validate(length(min = 1, max = 255), custom = "super::not_blank")]
    pub customer_name: String,
    #[validate(length(min = 1, max = 32), custom = "super::not_blank")]
    pub contact_number: String,
    #[validate(length(min = 1, max = 255), custom = "super::not_blank")]
    pub device_type: String,
    #[serde(default)]
    pub complaint: String,
    /// Free-form status; see [`lifecycle::normalize_status`]
    pub status: Option<String>,
    #[validate(custom = "super::money")]
    #[schema(value_type = String, example = "50000")]
    pub service_fee: Decimal,
    pub intake_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate]
    pub line_items: Vec<LineItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: String,
    pub completion_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RepairOrderFilter {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItemResponse {
    pub id: i32,
    pub repair_order_id: i32,
    pub inventory_item_id: Option<i32>,
    pub description: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub line_cost: Decimal,
}

impl From<LineItemModel> for LineItemResponse {
    fn from(model: LineItemModel) -> Self {
        Self {
            id: model.id,
            repair_order_id: model.repair_order_id,
            inventory_item_id: model.inventory_item_id,
            description: model.description,
            quantity: model.quantity,
            unit_price: model.unit_price,
            line_cost: model.line_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairOrderResponse {
    pub id: i32,
    pub customer_name: String,
    pub contact_number: String,
    pub device_type: String,
    pub complaint: String,
    pub status: RepairStatus,
    pub intake_date: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    #[schema(value_type = String)]
    pub service_fee: Decimal,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItemResponse>>,
}

impl RepairOrderResponse {
    fn summary(model: RepairOrderModel) -> Self {
        Self {
            subtotal: model.total - model.service_fee,
            id: model.id,
            customer_name: model.customer_name,
            contact_number: model.contact_number,
            device_type: model.device_type,
            complaint: model.complaint,
            status: model.status,
            intake_date: model.intake_date,
            completion_date: model.completion_date,
            service_fee: model.service_fee,
            total: model.total,
            created_at: model.created_at,
            updated_at: model.updated_at,
            line_items: None,
        }
    }

    fn with_lines(model: RepairOrderModel, mut lines: Vec<LineItemModel>) -> Self {
        lines.sort_by_key(|line| line.id);
        Self {
            line_items: Some(lines.into_iter().map(Into::into).collect()),
            ..Self::summary(model)
        }
    }
}

fn db_err(context: &'static str) -> impl Fn(sea_orm::DbErr) -> ServiceError {
    move |e| {
        error!(error = %e, "{}", context);
        ServiceError::DatabaseError(e)
    }
}

/// Repair jobs, their detail lines and the running total
#[derive(Clone)]
pub struct RepairOrderService {
    db_pool: Arc<DbPool>,
}

impl RepairOrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists orders newest first without their lines
    #[instrument(skip(self, filter))]
    pub async fn list_orders(
        &self,
        filter: RepairOrderFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<RepairOrderResponse>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = RepairOrderEntity::find();
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(super::contains_ci(repair_order::Column::CustomerName, term))
                    .add(super::contains_ci(repair_order::Column::DeviceType, term))
                    .add(repair_order::Column::ContactNumber.contains(term)),
            );
        }
        if let Some(status) = filter.status.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.filter(repair_order::Column::Status.eq(lifecycle::normalize_status(status)));
        }

        let paginator = query
            .order_by_desc(repair_order::Column::Id)
            .paginate(db, limit.max(1));
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count repair orders"))?;
        let orders = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err("Failed to list repair orders"))?;

        Ok((
            orders.into_iter().map(RepairOrderResponse::summary).collect(),
            total,
        ))
    }

    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    pub async fn create_order(
        &self,
        request: RepairOrderRequest,
    ) -> Result<RepairOrderResponse, ServiceError> {
        request.validate()?;

        let now = Utc::now();
        let status = lifecycle::normalize_status(request.status.as_deref().unwrap_or_default());
        let totals = costing::repair_totals(
            request.service_fee,
            request.line_items.iter().map(LineItemRequest::priced),
        )?;

        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(db_err("Failed to start transaction for repair order"))?;

        check_inventory_refs(&txn, &request.line_items).await?;

        let order = RepairOrderActiveModel {
            customer_name: Set(request.customer_name.trim().to_string()),
            contact_number: Set(request.contact_number.trim().to_string()),
            device_type: Set(request.device_type.trim().to_string()),
            complaint: Set(request.complaint.trim().to_string()),
            status: Set(status),
            intake_date: Set(request.intake_date.unwrap_or(now)),
            completion_date: Set(lifecycle::resolve_completion_date(
                status,
                request.completion_date,
                now,
            )),
            service_fee: Set(request.service_fee),
            total: Set(totals.total),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to insert repair order"))?;

        let lines = insert_lines(&txn, order.id, &request.line_items).await?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit repair order"))?;

        counter!("servis_hp.repair_orders.created", 1, "status" => status.to_string());
        info!(
            order_id = order.id,
            lines = lines.len(),
            total = %order.total,
            "Repair order created"
        );
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: i32) -> Result<RepairOrderResponse, ServiceError> {
        let db = &*self.db_pool;
        let order = find_order(db, order_id).await?;
        let lines = order_lines(db, order_id).await?;
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    /// Replaces the order's fields and all of its lines
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn update_order(
        &self,
        order_id: i32,
        request: RepairOrderRequest,
    ) -> Result<RepairOrderResponse, ServiceError> {
        request.validate()?;

        let now = Utc::now();
        let status = lifecycle::normalize_status(request.status.as_deref().unwrap_or_default());
        let totals = costing::repair_totals(
            request.service_fee,
            request.line_items.iter().map(LineItemRequest::priced),
        )?;

        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(db_err("Failed to start transaction for repair order update"))?;

        let existing = find_order(&txn, order_id).await?;
        check_inventory_refs(&txn, &request.line_items).await?;

        LineItemEntity::delete_many()
            .filter(repair_line_item::Column::RepairOrderId.eq(order_id))
            .exec(&txn)
            .await
            .map_err(db_err("Failed to clear repair order lines"))?;
        let lines = insert_lines(&txn, order_id, &request.line_items).await?;

        let mut active: RepairOrderActiveModel = existing.clone().into();
        active.customer_name = Set(request.customer_name.trim().to_string());
        active.contact_number = Set(request.contact_number.trim().to_string());
        active.device_type = Set(request.device_type.trim().to_string());
        active.complaint = Set(request.complaint.trim().to_string());
        active.status = Set(status);
        active.intake_date = Set(request.intake_date.unwrap_or(existing.intake_date));
        active.completion_date = Set(lifecycle::resolve_completion_date(
            status,
            request.completion_date,
            now,
        ));
        active.service_fee = Set(request.service_fee);
        active.total = Set(totals.total);
        active.updated_at = Set(Some(now));
        let order = active
            .update(&txn)
            .await
            .map_err(db_err("Failed to update repair order"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit repair order update"))?;

        info!(order_id, lines = lines.len(), total = %order.total, "Repair order updated");
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    /// Status-only transition
    #[instrument(skip(self, request), fields(order_id = %order_id, status = %request.status))]
    pub async fn update_status(
        &self,
        order_id: i32,
        request: StatusUpdateRequest,
    ) -> Result<RepairOrderResponse, ServiceError> {
        let db = &*self.db_pool;
        let existing = find_order(db, order_id).await?;

        let now = Utc::now();
        let previous = existing.status;
        let status = lifecycle::normalize_status(&request.status);
        let completion = lifecycle::resolve_completion_date(
            status,
            request.completion_date.or(existing.completion_date),
            now,
        );

        let mut active: RepairOrderActiveModel = existing.into();
        active.status = Set(status);
        active.completion_date = Set(completion);
        active.updated_at = Set(Some(now));
        let order = active
            .update(db)
            .await
            .map_err(db_err("Failed to update repair order status"))?;

        counter!("servis_hp.repair_orders.status_changes", 1, "status" => status.to_string());
        info!(order_id, from = %previous, to = %status, "Repair order status changed");

        let lines = order_lines(db, order_id).await?;
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete_order(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(db_err("Failed to start transaction for repair order delete"))?;

        find_order(&txn, order_id).await?;

        LineItemEntity::delete_many()
            .filter(repair_line_item::Column::RepairOrderId.eq(order_id))
            .exec(&txn)
            .await
            .map_err(db_err("Failed to delete repair order lines"))?;
        RepairOrderEntity::delete_by_id(order_id)
            .exec(&txn)
            .await
            .map_err(db_err("Failed to delete repair order"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit repair order delete"))?;

        counter!("servis_hp.repair_orders.deleted", 1);
        info!(order_id, "Repair order deleted");
        Ok(())
    }

    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn add_line_item(
        &self,
        order_id: i32,
        request: LineItemRequest,
    ) -> Result<RepairOrderResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(db_err("Failed to start transaction for line item"))?;

        find_order(&txn, order_id).await?;
        check_inventory_refs(&txn, std::slice::from_ref(&request)).await?;
        insert_lines(&txn, order_id, std::slice::from_ref(&request)).await?;
        let (order, lines) = recompute_total(&txn, order_id).await?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit line item"))?;

        info!(order_id, total = %order.total, "Line item added");
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    #[instrument(skip(self, request), fields(line_id = %line_id))]
    pub async fn update_line_item(
        &self,
        line_id: i32,
        request: LineItemRequest,
    ) -> Result<RepairOrderResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(db_err("Failed to start transaction for line item update"))?;

        let existing = find_line(&txn, line_id).await?;
        let order_id = existing.repair_order_id;
        check_inventory_refs(&txn, std::slice::from_ref(&request)).await?;

        let mut active: LineItemActiveModel = existing.into();
        active.inventory_item_id = Set(request.inventory_item_id);
        active.description = Set(request.description.trim().to_string());
        active.quantity = Set(request.quantity);
        active.unit_price = Set(request.unit_price);
        active.line_cost = Set(costing::line_cost(request.quantity, request.unit_price)?);
        active
            .update(&txn)
            .await
            .map_err(db_err("Failed to update line item"))?;

        let (order, lines) = recompute_total(&txn, order_id).await?;
        txn.commit()
            .await
            .map_err(db_err("Failed to commit line item update"))?;

        info!(line_id, order_id, total = %order.total, "Line item updated");
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn delete_line_item(&self, line_id: i32) -> Result<RepairOrderResponse, ServiceError> {
        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(db_err("Failed to start transaction for line item delete"))?;

        let existing = find_line(&txn, line_id).await?;
        let order_id = existing.repair_order_id;
        LineItemEntity::delete_by_id(line_id)
            .exec(&txn)
            .await
            .map_err(db_err("Failed to delete line item"))?;

        let (order, lines) = recompute_total(&txn, order_id).await?;
        txn.commit()
            .await
            .map_err(db_err("Failed to commit line item delete"))?;

        info!(line_id, order_id, total = %order.total, "Line item deleted");
        Ok(RepairOrderResponse::with_lines(order, lines))
    }

    /// Customer self-service lookup by name and/or phone fragment
    #[instrument(skip(self))]
    pub async fn track(
        &self,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Vec<RepairOrderResponse>, ServiceError> {
        let name = name.map(str::trim).filter(|s| !s.is_empty());
        let phone = phone.map(str::trim).filter(|s| !s.is_empty());
        if name.is_none() && phone.is_none() {
            return Err(ServiceError::ValidationError(
                "Provide a customer name or phone number".to_string(),
            ));
        }

        let mut query = RepairOrderEntity::find();
        if let Some(name) = name {
            query = query.filter(super::contains_ci(repair_order::Column::CustomerName, name));
        }
        if let Some(phone) = phone {
            query = query.filter(repair_order::Column::ContactNumber.contains(phone));
        }

        let db = &*self.db_pool;
        let orders = query
            .order_by_desc(repair_order::Column::IntakeDate)
            .order_by_desc(repair_order::Column::Id)
            .all(db)
            .await
            .map_err(db_err("Failed to search repair orders"))?;
        let lines = orders
            .load_many(LineItemEntity, db)
            .await
            .map_err(db_err("Failed to load repair order lines"))?;

        counter!("servis_hp.tracking.searches", 1);
        info!(matches = orders.len(), "Repair tracking search");
        Ok(orders
            .into_iter()
            .zip(lines)
            .map(|(order, lines)| RepairOrderResponse::with_lines(order, lines))
            .collect())
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn whatsapp_link(&self, order_id: i32) -> Result<WhatsAppLink, ServiceError> {
        let order = find_order(&*self.db_pool, order_id).await?;
        notifications::whatsapp_link(&order).map_err(|e| {
            warn!(order_id, error = %e, "WhatsApp link refused");
            e
        })
    }
}

async fn find_order<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<RepairOrderModel, ServiceError> {
    RepairOrderEntity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(db_err("Failed to fetch repair order"))?
        .ok_or_else(|| ServiceError::NotFound(format!("Repair order {} not found", order_id)))
}

async fn find_line<C: ConnectionTrait>(db: &C, line_id: i32) -> Result<LineItemModel, ServiceError> {
    LineItemEntity::find_by_id(line_id)
        .one(db)
        .await
        .map_err(db_err("Failed to fetch line item"))?
        .ok_or_else(|| ServiceError::NotFound(format!("Line item {} not found", line_id)))
}

async fn order_lines<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<Vec<LineItemModel>, ServiceError> {
    LineItemEntity::find()
        .filter(repair_line_item::Column::RepairOrderId.eq(order_id))
        .order_by_asc(repair_line_item::Column::Id)
        .all(db)
        .await
        .map_err(db_err("Failed to load repair order lines"))
}

/// Every referenced stock item must exist
async fn check_inventory_refs<C: ConnectionTrait>(
    db: &C,
    lines: &[LineItemRequest],
) -> Result<(), ServiceError> {
    let wanted: BTreeSet<i32> = lines.iter().filter_map(|l| l.inventory_item_id).collect();
    if wanted.is_empty() {
        return Ok(());
    }

    let found: BTreeSet<i32> = InventoryItemEntity::find()
        .filter(inventory_item::Column::Id.is_in(wanted.iter().copied()))
        .all(db)
        .await
        .map_err(db_err("Failed to check inventory references"))?
        .into_iter()
        .map(|item| item.id)
        .collect();

    match wanted.difference(&found).next() {
        Some(missing) => Err(ServiceError::BadRequest(format!(
            "Inventory item {} does not exist",
            missing
        ))),
        None => Ok(()),
    }
}

async fn insert_lines<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    lines: &[LineItemRequest],
) -> Result<Vec<LineItemModel>, ServiceError> {
    let mut inserted = Vec::with_capacity(lines.len());
    for line in lines {
        let model = LineItemActiveModel {
            repair_order_id: Set(order_id),
            inventory_item_id: Set(line.inventory_item_id),
            description: Set(line.description.trim().to_string()),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            line_cost: Set(costing::line_cost(line.quantity, line.unit_price)?),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(db_err("Failed to insert line item"))?;
        inserted.push(model);
    }
    Ok(inserted)
}

/// Re-derives an order's total from its stored lines
async fn recompute_total<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<(RepairOrderModel, Vec<LineItemModel>), ServiceError> {
    let order = find_order(db, order_id).await?;
    let lines = order_lines(db, order_id).await?;

    let totals = costing::repair_totals(
        order.service_fee,
        lines.iter().map(|line| PricedLine {
            quantity: line.quantity,
            unit_price: line.unit_price,
        }),
    )?;

    let mut active: RepairOrderActiveModel = order.into();
    active.total = Set(totals.total);
    active.updated_at = Set(Some(Utc::now()));
    let order = active
        .update(db)
        .await
        .map_err(db_err("Failed to store recomputed total"))?;

    Ok((order, lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(quantity: i32, unit_price: Decimal) -> LineItemRequest {
        LineItemRequest {
            inventory_item_id: None,
            description: "Ganti LCD".into(),
            quantity,
            unit_price,
        }
    }

    fn order_request(lines: Vec<LineItemRequest>) -> RepairOrderRequest {
        RepairOrderRequest {
            customer_name: "Budi Santoso".into(),
            contact_number: "081234567890".into(),
            device_type: "Samsung A52".into(),
            complaint: "Layar pecah".into(),
            status: None,
            service_fee: dec!(50000),
            intake_date: None,
            completion_date: None,
            line_items: lines,
        }
    }

    #[test]
    fn nested_line_items_are_validated() {
        let req = order_request(vec![line(-1, dec!(10))]);
        assert!(req.validate().is_err());
        assert!(order_request(vec![line(2, dec!(10))]).validate().is_ok());
    }

    #[test]
    fn negative_fee_is_rejected() {
        let mut req = order_request(vec![]);
        req.service_fee = dec!(-5000);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("service_fee"));
    }

    #[test]
    fn response_derives_subtotal_and_sorts_lines() {
        let now = Utc::now();
        let order = RepairOrderModel {
            id: 1,
            customer_name: "Budi".into(),
            contact_number: "0812".into(),
            device_type: "Oppo A5".into(),
            complaint: String::new(),
            status: RepairStatus::InRepair,
            intake_date: now,
            completion_date: None,
            service_fee: dec!(50000),
            total: dec!(350000),
            created_at: now,
            updated_at: None,
        };
        let mk = |id, cost| LineItemModel {
            id,
            repair_order_id: 1,
            inventory_item_id: None,
            description: "part".into(),
            quantity: 1,
            unit_price: cost,
            line_cost: cost,
        };
        let response =
            RepairOrderResponse::with_lines(order, vec![mk(9, dec!(100000)), mk(3, dec!(200000))]);
        assert_eq!(response.subtotal, dec!(300000));
        let ids: Vec<i32> = response
            .line_items
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn summary_omits_line_items_in_json() {
        let now = Utc::now();
        let response = RepairOrderResponse::summary(RepairOrderModel {
            id: 2,
            customer_name: "Sari".into(),
            contact_number: "0813".into(),
            device_type: "iPhone X".into(),
            complaint: String::new(),
            status: RepairStatus::Pending,
            intake_date: now,
            completion_date: None,
            service_fee: dec!(0),
            total: dec!(0),
            created_at: now,
            updated_at: None,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("line_items").is_none());
        assert_eq!(json["status"], "pending");
    }
}
