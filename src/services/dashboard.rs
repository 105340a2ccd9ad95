use crate::{
    db::DbPool,
    entities::inventory_item::{self, Entity as InventoryItemEntity},
    entities::repair_order::{self, Entity as RepairOrderEntity, RepairStatus},
    errors::ServiceError,
    services::{
        calendar::ShopCalendar,
        costing::Rollup,
        lifecycle,
        reports::{costed_orders, rollup, CostedOrder},
    },
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

const RECENT_ORDERS: u64 = 5;
const LOW_STOCK_PREVIEW: u64 = 5;
const CHART_DAYS: u32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecentOrder {
    pub id: i32,
    pub customer_name: String,
    pub device_type: String,
    pub status: RepairStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LowStockItem {
    pub id: i32,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub today_orders: u64,
    pub in_repair_orders: u64,
    pub finished_orders: u64,
    pub low_stock_count: u64,
    #[schema(value_type = String)]
    pub revenue_today: Decimal,
    #[schema(value_type = String)]
    pub revenue_month: Decimal,
    pub recent_orders: Vec<RecentOrder>,
    pub low_stock_items: Vec<LowStockItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailySummary {
    pub total_orders: u64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    pub finished_orders: u64,
    pub in_progress_orders: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeriodStats {
    pub total_orders: u64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    #[schema(value_type = String)]
    pub net_profit: Decimal,
}

impl From<Rollup> for PeriodStats {
    fn from(rollup: Rollup) -> Self {
        Self {
            total_orders: rollup.total_orders,
            total_revenue: rollup.total_revenue,
            net_profit: rollup.net_profit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub today: PeriodStats,
    pub last_7_days: PeriodStats,
    pub this_month: PeriodStats,
    pub revenue_chart: Vec<ChartPoint>,
}

/// Summarises, over shop-local days, the orders whose intake falls in `[start, end]`
pub fn period_stats(
    calendar: &ShopCalendar,
    orders: &[CostedOrder],
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodStats {
    let in_range: Vec<CostedOrder> = orders
        .iter()
        .filter(|c| {
            let day = calendar.local_date(c.order.intake_date);
            day >= start && day <= end
        })
        .cloned()
        .collect();
    rollup(&in_range).into()
}

/// Daily revenue for each of `days`, zero where nothing was taken in
pub fn revenue_chart(
    calendar: &ShopCalendar,
    orders: &[CostedOrder],
    days: &[NaiveDate],
) -> Vec<ChartPoint> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> =
        days.iter().map(|day| (*day, Decimal::ZERO)).collect();
    for costed in orders {
        if let Some(revenue) = by_day.get_mut(&calendar.local_date(costed.order.intake_date)) {
            *revenue += costed.order.total;
        }
    }
    by_day
        .into_iter()
        .map(|(date, revenue)| ChartPoint { date, revenue })
        .collect()
}

/// Front-desk numbers
#[derive(Clone)]
pub struct DashboardService {
    db_pool: Arc<DbPool>,
    calendar: ShopCalendar,
    low_stock_threshold: i32,
}

impl DashboardService {
    pub fn new(db_pool: Arc<DbPool>, calendar: ShopCalendar, low_stock_threshold: i32) -> Self {
        Self {
            db_pool,
            calendar,
            low_stock_threshold,
        }
    }

    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<DashboardOverview, ServiceError> {
        let db = &*self.db_pool;
        let today = self.calendar.today();
        let (today_from, today_to) = self.calendar.range_bounds(today, today);
        let (month_from, _) = self
            .calendar
            .range_bounds(ShopCalendar::month_start(today), today);

        let month_orders = costed_orders(db, month_from, today_to).await?;
        let today_orders: Vec<CostedOrder> = month_orders
            .iter()
            .filter(|c| c.order.intake_date >= today_from)
            .cloned()
            .collect();

        let in_repair_orders = RepairOrderEntity::find()
            .filter(repair_order::Column::Status.eq(RepairStatus::InRepair))
            .count(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count in-repair orders");
                ServiceError::DatabaseError(e)
            })?;
        let finished_orders = RepairOrderEntity::find()
            .filter(
                repair_order::Column::Status.is_in([RepairStatus::Done, RepairStatus::ReadyForPickup]),
            )
            .count(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count finished orders");
                ServiceError::DatabaseError(e)
            })?;

        let low_stock = InventoryItemEntity::find()
            .filter(inventory_item::Column::Stock.lte(self.low_stock_threshold));
        let low_stock_count = low_stock.clone().count(db).await.map_err(|e| {
            error!(error = %e, "Failed to count low stock items");
            ServiceError::DatabaseError(e)
        })?;
        let low_stock_items = low_stock
            .order_by_asc(inventory_item::Column::Stock)
            .order_by_asc(inventory_item::Column::Name)
            .limit(LOW_STOCK_PREVIEW)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load low stock items");
                ServiceError::DatabaseError(e)
            })?
            .into_iter()
            .map(|item| LowStockItem {
                id: item.id,
                name: item.name,
                stock: item.stock,
            })
            .collect();

        let mut newest = today_orders.clone();
        newest.sort_by(|a, b| {
            b.order
                .intake_date
                .cmp(&a.order.intake_date)
                .then(b.order.id.cmp(&a.order.id))
        });
        let recent_orders = newest
            .into_iter()
            .take(RECENT_ORDERS as usize)
            .map(|c| RecentOrder {
                id: c.order.id,
                customer_name: c.order.customer_name,
                device_type: c.order.device_type,
                status: c.order.status,
            })
            .collect();

        debug!(today_orders = today_orders.len(), "Dashboard overview computed");
        Ok(DashboardOverview {
            today_orders: today_orders.len() as u64,
            in_repair_orders,
            finished_orders,
            low_stock_count,
            revenue_today: rollup(&today_orders).total_revenue,
            revenue_month: rollup(&month_orders).total_revenue,
            recent_orders,
            low_stock_items,
        })
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<DailySummary, ServiceError> {
        let today = self.calendar.today();
        let (from, to) = self.calendar.range_bounds(today, today);
        let orders = costed_orders(&*self.db_pool, from, to).await?;

        Ok(DailySummary {
            total_orders: orders.len() as u64,
            total_revenue: rollup(&orders).total_revenue,
            finished_orders: orders
                .iter()
                .filter(|c| lifecycle::is_finished(c.order.status))
                .count() as u64,
            in_progress_orders: orders
                .iter()
                .filter(|c| c.order.status == RepairStatus::InRepair)
                .count() as u64,
        })
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let today = self.calendar.today();
        let days = ShopCalendar::trailing_days(today, CHART_DAYS);
        let week_start = days.first().copied().unwrap_or(today);
        let month_start = ShopCalendar::month_start(today);

        let (from, to) = self
            .calendar
            .range_bounds(week_start.min(month_start), today);
        let orders = costed_orders(&*self.db_pool, from, to).await?;

        Ok(DashboardStats {
            today: period_stats(&self.calendar, &orders, today, today),
            last_7_days: period_stats(&self.calendar, &orders, week_start, today),
            this_month: period_stats(&self.calendar, &orders, month_start, today),
            revenue_chart: revenue_chart(&self.calendar, &orders, &days),
        })
    }
}
