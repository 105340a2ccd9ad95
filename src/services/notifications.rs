//! Customer-facing WhatsApp notification text.
//!
//! Messages are not sent from here; the shop opens the generated `wa.me`
//! link on a phone.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::repair_order::{self, RepairStatus};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WhatsAppLink {
    pub phone: String,
    pub message: String,
    pub url: String,
}

/// Strip whitespace; a leading trunk `0` becomes the `62` country code.
pub fn whatsapp_phone(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.strip_prefix('0') {
        Some(rest) => format!("62{}", rest),
        None => compact,
    }
}

/// `Rp 1.250.000`: whole rupiah, dot thousands separators.
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

pub fn completion_message(customer_name: &str, device_type: &str, total: Decimal) -> String {
    format!(
        "Halo {},\n\nServis HP Anda ({}) telah *SELESAI* \n\nTotal biaya: {}\n\nTerima kasih telah menggunakan layanan kami ",
        customer_name,
        device_type,
        format_rupiah(total)
    )
}

/// Percent-encode a query value: spaces become `%20`, everything outside
/// `A-Z a-z 0-9 * - . _` is escaped (including `( ) ! ' ~`)
fn encode_component(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build the completion notice link for a finished order
pub fn whatsapp_link(order: &repair_order::Model) -> Result<WhatsAppLink, ServiceError> {
    if order.status != RepairStatus::Done {
        return Err(ServiceError::InvalidOperation(format!(
            "Repair order {} is not done yet",
            order.id
        )));
    }

    let phone = whatsapp_phone(&order.contact_number);
    if phone.is_empty() {
        return Err(ServiceError::ValidationError(format!(
            "Repair order {} has no contact number",
            order.id
        )));
    }

    let message = completion_message(&order.customer_name, &order.device_type, order.total);
    let url = format!("https://wa.me/{}?text={}", phone, encode_component(&message));

    Ok(WhatsAppLink {
        phone,
        message,
        url,
    })
}
