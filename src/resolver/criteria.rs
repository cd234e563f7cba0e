//! Bounds checks shared by every lookup's criteria model.
//!
//! Optional fields follow the host's zero-value presence rule: `0` and `""`
//! are "unset", never a real filter value.

use super::ValidationError;

/// Validate a required, length-bounded string field. Length is counted in
/// characters, not bytes.
pub fn required_string(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    check_len(field, &value, max_len)?;
    Ok(value)
}

/// Validate an optional, length-bounded string field. Empty means unset.
pub fn optional_string(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => {
            check_len(field, &value, max_len)?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

/// Validate an optional positive identifier. Zero means unset; anything
/// below zero is rejected.
pub fn optional_id(field: &'static str, value: Option<i64>) -> Result<Option<i64>, ValidationError> {
    match value {
        None | Some(0) => Ok(None),
        Some(id) if id < 1 => Err(ValidationError::new(field, format!("must be at least 1, got {id}"))),
        Some(id) => Ok(Some(id)),
    }
}

fn check_len(field: &'static str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::new(
            field,
            format!("length {len} exceeds the maximum of {max_len}"),
        ));
    }
    Ok(())
}
