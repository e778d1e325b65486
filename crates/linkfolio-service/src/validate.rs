//! Required-field checks for inbound payloads.
//!
//! Services check fields in a fixed order and return at the first
//! missing or empty one; failures are never aggregated. The messages are
//! part of the observable contract, so callers pass them verbatim.

use linkfolio_core::AppError;
use linkfolio_core::result::AppResult;

/// Returns the text if present and non-empty, otherwise the validation
/// error carrying `message`.
pub fn require_text(value: Option<String>, message: &'static str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(message)),
    }
}

/// Returns the value if present, otherwise the validation error carrying
/// `message`. Zero and negative integers are present values.
pub fn require<T>(value: Option<T>, message: &'static str) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(message))
}
