//! Repair cost arithmetic.
//!
//! An order's total is always `service_fee + Σ quantity × unit_price`, and a
//! period's profit is revenue minus the cost price of the parts consumed.
//! Everything here is pure and recomputed from scratch on every write.

use crate::errors::ServiceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use utoipa::ToSchema;

/// Largest amount a `DECIMAL(15, 2)` money column stores
pub const MAX_AMOUNT: Decimal = dec!(9999999999999.99);

/// Money columns keep cents and nothing finer
pub const AMOUNT_SCALE: u32 = 2;

/// One billable line as far as pricing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RepairTotals {
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

fn within_limit(amount: Option<Decimal>, what: &str) -> Result<Decimal, ServiceError> {
    amount
        .filter(|value| value.abs() <= MAX_AMOUNT)
        .ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "{} exceeds the maximum amount of {}",
                what, MAX_AMOUNT
            ))
        })
}

pub fn line_cost(quantity: i32, unit_price: Decimal) -> Result<Decimal, ServiceError> {
    within_limit(Decimal::from(quantity).checked_mul(unit_price), "Line cost")
}

pub fn repair_totals<I>(service_fee: Decimal, lines: I) -> Result<RepairTotals, ServiceError>
where
    I: IntoIterator<Item = PricedLine>,
{
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        let cost = line_cost(line.quantity, line.unit_price)?;
        subtotal = within_limit(subtotal.checked_add(cost), "Line items subtotal")?;
    }
    let total = within_limit(service_fee.checked_add(subtotal), "Order total")?;

    Ok(RepairTotals {
        subtotal,
        service_fee,
        total,
    })
}

/// Cost of the parts a line consumed; lines without a stock item cost nothing
pub fn parts_cost(quantity: i32, cost_price: Option<Decimal>) -> Decimal {
    cost_price
        .map(|cost| Decimal::from(quantity) * cost)
        .unwrap_or(Decimal::ZERO)
}

/// Running revenue/parts cost accumulator for reports and dashboards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Rollup {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub total_parts_cost: Decimal,
}

impl Rollup {
    pub fn add_order(&mut self, order_total: Decimal, parts_cost: Decimal) {
        self.total_orders += 1;
        self.total_revenue += order_total;
        self.total_parts_cost += parts_cost;
    }

    pub fn net_profit(&self) -> Decimal {
        self.total_revenue - self.total_parts_cost
    }
}
