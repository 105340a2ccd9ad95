use crate::ApiResponse;
use axum::{http::StatusCode, Json};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// A 400 carrying per-field validation messages
pub type ValidationRejection<T> = (StatusCode, Json<ApiResponse<T>>);

/// Flattens validator output into `field: message` strings, nested
/// structs and lists included (`line_items[0].quantity: ...`)
pub fn field_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_errors(errors, "", &mut messages);
    messages.sort();
    messages
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match (*field, prefix.is_empty()) {
            ("__all__", true) => "request".to_string(),
            ("__all__", false) => prefix.to_string(),
            (field, true) => field.to_string(),
            (field, false) => format!("{}.{}", prefix, field),
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", error.code));
                    format!("{}: {}", path, message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// Validate request input, producing the 400 envelope handlers return as is
pub fn validate_input<T: Validate, R>(input: &T) -> Result<(), ValidationRejection<R>> {
    input.validate().map_err(|errors| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::validation_errors(field_errors(&errors))),
        )
    })
}

/// Pagination parameters for list operations
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
}

impl PaginationParams {
    pub const MAX_LIMIT: u64 = 100;

    /// Page is at least 1; limit within 1..=MAX_LIMIT
    pub fn normalized(&self) -> (u64, u64) {
        (self.page.max(1), self.limit.clamp(1, Self::MAX_LIMIT))
    }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    if total == 0 || limit == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}
