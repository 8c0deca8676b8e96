//! Input validation helpers
//!
//! Text length limits shared by the lifecycle managers.

use shared::error::ErrorCode;

use crate::inventory::InventoryError;

/// Zone names
pub const MAX_NAME_LEN: usize = 200;

/// Seat labels
pub const MAX_LABEL_LEN: usize = 64;

/// Status strings, color codes, prefixes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), InventoryError> {
    if value.trim().is_empty() {
        return Err(InventoryError::argument(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), InventoryError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), InventoryError> {
    let len = value.trim().chars().count();
    if len > max_len {
        return Err(InventoryError::argument(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}
