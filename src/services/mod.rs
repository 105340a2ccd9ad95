pub mod calendar;
pub mod costing;
pub mod dashboard;
pub mod employees;
pub mod inventory;
pub mod lifecycle;
pub mod notifications;
pub mod repair_orders;
pub mod reports;
pub mod users;

use costing::{AMOUNT_SCALE, MAX_AMOUNT};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait,
};
use validator::ValidationError;

/// Rejects values that are empty once trimmed
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Money input: not negative, whole cents, fits a money column
pub(crate) fn money(value: &Decimal) -> Result<(), ValidationError> {
    let reject = |code: &'static str, message: String| -> Result<(), ValidationError> {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        Err(err)
    };

    if value.is_sign_negative() && !value.is_zero() {
        return reject("negative_amount", "Amount cannot be negative".to_string());
    }
    if value.normalize().scale() > AMOUNT_SCALE {
        return reject(
            "amount_precision",
            format!("Amount cannot have more than {} decimal places", AMOUNT_SCALE),
        );
    }
    if *value > MAX_AMOUNT {
        return reject("amount_too_large", format!("Amount cannot exceed {}", MAX_AMOUNT));
    }
    Ok(())
}

/// Case-insensitive substring match on a text column
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.trim().to_lowercase());
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).like(pattern)
}
