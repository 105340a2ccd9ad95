use crate::{
    db::DbPool,
    entities::inventory_item::{self, Entity as InventoryItemEntity},
    entities::repair_line_item::Entity as LineItemEntity,
    entities::repair_order::{self, Entity as RepairOrderEntity, Model as RepairOrderModel},
    entities::report::{self, ActiveModel as ReportActiveModel, Entity as ReportEntity, PeriodType},
    entities::report_line::{
        self, ActiveModel as ReportLineActiveModel, Entity as ReportLineEntity,
        Model as ReportLineModel,
    },
    errors::ServiceError,
    services::{
        calendar::ShopCalendar,
        costing::{self, Rollup},
    },
    tracing::with_metrics,
};
use chrono::{DateTime, NaiveDate, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_report_range"))]
pub struct GenerateReportRequest {
    /// `daily`, `weekly`, `monthly`, `custom` (or `harian`, `mingguan`, `bulanan`)
    #[validate(custom = "super::not_blank")]
    pub period_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

fn validate_report_range(req: &GenerateReportRequest) -> Result<(), ValidationError> {
    if req.start_date > req.end_date {
        let mut err = ValidationError::new("invalid_range");
        err.message = Some("start_date must not be after end_date".into());
        return Err(err);
    }
    Ok(())
}

pub fn parse_period(raw: &str) -> Result<PeriodType, ServiceError> {
    match raw.trim().to_lowercase().as_str() {
        "daily" | "harian" => Ok(PeriodType::Daily),
        "weekly" | "mingguan" => Ok(PeriodType::Weekly),
        "monthly" | "bulanan" => Ok(PeriodType::Monthly),
        "custom" => Ok(PeriodType::Custom),
        other => Err(ServiceError::ValidationError(format!(
            "Unknown report period: {}",
            other
        ))),
    }
}

pub fn period_label(period: PeriodType) -> &'static str {
    match period {
        PeriodType::Daily => "Harian",
        PeriodType::Weekly => "Mingguan",
        PeriodType::Monthly => "Bulanan",
        PeriodType::Custom => "Custom",
    }
}

pub fn report_title(period: PeriodType, start: NaiveDate, end: NaiveDate) -> String {
    format!("Laporan {} - {} s/d {}", period_label(period), start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    pub total_orders: i32,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    #[schema(value_type = String)]
    pub total_parts_cost: Decimal,
    #[schema(value_type = String)]
    pub net_profit: Decimal,
}

impl From<&Rollup> for ReportSummary {
    fn from(rollup: &Rollup) -> Self {
        Self {
            total_orders: i32::try_from(rollup.total_orders).unwrap_or(i32::MAX),
            total_revenue: rollup.total_revenue,
            total_parts_cost: rollup.total_parts_cost,
            net_profit: rollup.net_profit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateReportResponse {
    pub message: String,
    pub report_id: i32,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportLineResponse {
    pub id: i32,
    pub repair_order_id: i32,
    pub customer_name: String,
    pub device_type: String,
    #[schema(value_type = String)]
    pub order_total: Decimal,
    #[schema(value_type = String)]
    pub parts_cost: Decimal,
    #[schema(value_type = String)]
    pub profit: Decimal,
}

impl From<ReportLineModel> for ReportLineResponse {
    fn from(model: ReportLineModel) -> Self {
        Self {
            id: model.id,
            repair_order_id: model.repair_order_id,
            customer_name: model.customer_name,
            device_type: model.device_type,
            order_total: model.order_total,
            parts_cost: model.parts_cost,
            profit: model.profit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub id: i32,
    pub title: String,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub summary: ReportSummary,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<ReportLineResponse>>,
}

impl From<report::Model> for ReportResponse {
    fn from(model: report::Model) -> Self {
        Self {
            summary: ReportSummary {
                total_orders: model.total_orders,
                total_revenue: model.total_revenue,
                total_parts_cost: model.total_parts_cost,
                net_profit: model.net_profit,
            },
            id: model.id,
            title: model.title,
            period_type: model.period_type,
            start_date: model.start_date,
            end_date: model.end_date,
            notes: model.notes,
            created_at: model.created_at,
            lines: None,
        }
    }
}

/// An order together with the cost price of the parts it consumed
#[derive(Debug, Clone)]
pub struct CostedOrder {
    pub order: RepairOrderModel,
    pub parts_cost: Decimal,
}

/// Loads orders taken in over `[from, to)` and prices their parts at each
/// linked item's current cost price
pub(crate) async fn costed_orders<C: ConnectionTrait>(
    db: &C,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<CostedOrder>, ServiceError> {
    let orders = RepairOrderEntity::find()
        .filter(repair_order::Column::IntakeDate.gte(from))
        .filter(repair_order::Column::IntakeDate.lt(to))
        .order_by_asc(repair_order::Column::IntakeDate)
        .order_by_asc(repair_order::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load orders for period");
            ServiceError::DatabaseError(e)
        })?;

    let lines = orders.load_many(LineItemEntity, db).await.map_err(|e| {
        error!(error = %e, "Failed to load line items for period");
        ServiceError::DatabaseError(e)
    })?;

    let item_ids: Vec<i32> = lines
        .iter()
        .flatten()
        .filter_map(|line| line.inventory_item_id)
        .collect();
    let cost_prices: HashMap<i32, Decimal> = if item_ids.is_empty() {
        HashMap::new()
    } else {
        InventoryItemEntity::find()
            .filter(inventory_item::Column::Id.is_in(item_ids))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load item cost prices");
                ServiceError::DatabaseError(e)
            })?
            .into_iter()
            .map(|item| (item.id, item.cost_price))
            .collect()
    };

    Ok(orders
        .into_iter()
        .zip(lines)
        .map(|(order, lines)| {
            let parts_cost = lines
                .iter()
                .map(|line| {
                    let cost = line
                        .inventory_item_id
                        .and_then(|id| cost_prices.get(&id).copied());
                    costing::parts_cost(line.quantity, cost)
                })
                .sum();
            CostedOrder { order, parts_cost }
        })
        .collect())
}

pub fn rollup(orders: &[CostedOrder]) -> Rollup {
    orders.iter().fold(Rollup::default(), |mut acc, costed| {
        acc.add_order(costed.order.total, costed.parts_cost);
        acc
    })
}

/// Financial reports frozen at generation time
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
    calendar: ShopCalendar,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>, calendar: ShopCalendar) -> Self {
        Self { db_pool, calendar }
    }

    #[instrument(skip(self, request), fields(period = %request.period_type))]
    pub async fn generate_report(
        &self,
        request: GenerateReportRequest,
    ) -> Result<GenerateReportResponse, ServiceError> {
        request.validate()?;
        let period = parse_period(&request.period_type)?;

        with_metrics("report.generate", || async move {
            let db = &*self.db_pool;
            let (from, to) = self
                .calendar
                .range_bounds(request.start_date, request.end_date);

            let txn = db.begin().await.map_err(|e| {
                error!(error = %e, "Failed to start transaction for report");
                ServiceError::DatabaseError(e)
            })?;

            let orders = costed_orders(&txn, from, to).await?;
            let totals = rollup(&orders);
            let summary = ReportSummary::from(&totals);

            let report = ReportActiveModel {
                title: Set(report_title(period, request.start_date, request.end_date)),
                period_type: Set(period),
                start_date: Set(request.start_date),
                end_date: Set(request.end_date),
                total_orders: Set(summary.total_orders),
                total_revenue: Set(summary.total_revenue),
                total_parts_cost: Set(summary.total_parts_cost),
                net_profit: Set(summary.net_profit),
                notes: Set(request
                    .notes
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to insert report");
                ServiceError::DatabaseError(e)
            })?;

            for costed in &orders {
                ReportLineActiveModel {
                    report_id: Set(report.id),
                    repair_order_id: Set(costed.order.id),
                    customer_name: Set(costed.order.customer_name.clone()),
                    device_type: Set(costed.order.device_type.clone()),
                    order_total: Set(costed.order.total),
                    parts_cost: Set(costed.parts_cost),
                    profit: Set(costed.order.total - costed.parts_cost),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    error!(error = %e, report_id = report.id, "Failed to insert report line");
                    ServiceError::DatabaseError(e)
                })?;
            }

            txn.commit().await.map_err(|e| {
                error!(error = %e, "Failed to commit report");
                ServiceError::DatabaseError(e)
            })?;

            counter!("servis_hp.reports.generated", 1, "period" => period.to_string());
            info!(
                report_id = report.id,
                total_orders = summary.total_orders,
                net_profit = %summary.net_profit,
                "Report generated"
            );

            Ok(GenerateReportResponse {
                message: "Report generated successfully".to_string(),
                report_id: report.id,
                summary,
            })
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_reports(&self) -> Result<Vec<ReportResponse>, ServiceError> {
        let reports = ReportEntity::find()
            .order_by_desc(report::Column::CreatedAt)
            .order_by_desc(report::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list reports");
                ServiceError::DatabaseError(e)
            })?;

        Ok(reports.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(report_id = %report_id))]
    pub async fn get_report(&self, report_id: i32) -> Result<ReportResponse, ServiceError> {
        let db = &*self.db_pool;
        let report = ReportEntity::find_by_id(report_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, report_id, "Failed to fetch report");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Report {} not found", report_id)))?;

        let lines = ReportLineEntity::find()
            .filter(report_line::Column::ReportId.eq(report_id))
            .order_by_desc(report_line::Column::Id)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, report_id, "Failed to load report lines");
                ServiceError::DatabaseError(e)
            })?;

        Ok(ReportResponse {
            lines: Some(lines.into_iter().map(Into::into).collect()),
            ..ReportResponse::from(report)
        })
    }

    #[instrument(skip(self), fields(report_id = %report_id))]
    pub async fn delete_report(&self, report_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for report delete");
            ServiceError::DatabaseError(e)
        })?;

        ReportLineEntity::delete_many()
            .filter(report_line::Column::ReportId.eq(report_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, report_id, "Failed to delete report lines");
                ServiceError::DatabaseError(e)
            })?;

        let result = ReportEntity::delete_by_id(report_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, report_id, "Failed to delete report");
                ServiceError::DatabaseError(e)
            })?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Report {} not found", report_id)));
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, report_id, "Failed to commit report delete");
            ServiceError::DatabaseError(e)
        })?;

        info!(report_id, "Report deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::entities::repair_order::RepairStatus;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("daily", PeriodType::Daily ; "english daily")]
    #[test_case("Harian", PeriodType::Daily ; "indonesian daily")]
    #[test_case("mingguan", PeriodType::Weekly ; "indonesian weekly")]
    #[test_case(" BULANAN ", PeriodType::Monthly ; "indonesian monthly upper")]
    #[test_case("custom", PeriodType::Custom ; "custom")]
    fn periods_parse(raw: &str, expected: PeriodType) {
        assert_eq!(parse_period(raw).unwrap(), expected);
    }

    #[test]
    fn unknown_period_is_rejected() {
        assert_matches!(
            parse_period("yearly"),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn title_uses_indonesian_label() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            report_title(PeriodType::Monthly, start, end),
            "Laporan Bulanan - 2025-03-01 s/d 2025-03-31"
        );
    }

    #[test]
    fn reversed_range_fails_validation() {
        let req = GenerateReportRequest {
            period_type: "custom".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            notes: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rollup_sums_revenue_and_parts() {
        let now = Utc::now();
        let order = |id, total| RepairOrderModel {
            id,
            customer_name: "Andi".into(),
            contact_number: "0812".into(),
            device_type: "Xiaomi".into(),
            complaint: String::new(),
            status: RepairStatus::Done,
            intake_date: now,
            completion_date: Some(now),
            service_fee: dec!(50000),
            total,
            created_at: now,
            updated_at: None,
        };
        let orders = vec![
            CostedOrder {
                order: order(1, dec!(350000)),
                parts_cost: dec!(200000),
            },
            CostedOrder {
                order: order(2, dec!(50000)),
                parts_cost: dec!(0),
            },
        ];

        let summary = ReportSummary::from(&rollup(&orders));
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_revenue, dec!(400000));
        assert_eq!(summary.total_parts_cost, dec!(200000));
        assert_eq!(summary.net_profit, dec!(200000));
    }
}
