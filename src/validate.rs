//! Checks over raw user input.
//!
//! Every failure here is recoverable: the caller re-prompts or re-invokes
//! with corrected input, and nothing reaches the backing store.

use crate::error::ValidationError;

/// Parses one observation row: every element must be a whole number and the
/// count must match the current lane count.
pub fn parse_row(raw_values: &[&str], expected: usize) -> Result<Vec<i64>, ValidationError> {
    let values = raw_values
        .iter()
        .map(|raw| parse_count(raw))
        .collect::<Result<Vec<i64>, ValidationError>>()?;
    if values.len() != expected {
        return Err(ValidationError::ArityMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// Splits a comma-separated observation string and parses it as a row.
pub fn parse_row_str(raw: &str, expected: usize) -> Result<Vec<i64>, ValidationError> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    parse_row(&parts, expected)
}

/// Parses a per-trailer charge; blank input yields the default.
pub fn parse_charge(raw: &str, default: i64) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    parse_count(trimmed)
}

/// Parses a 1-based lane index and checks it against the lane count.
pub fn parse_lane_index(raw: &str, lane_count: usize) -> Result<usize, ValidationError> {
    let index = parse_count(raw)?;
    if index < 1 || index > lane_count as i64 {
        return Err(ValidationError::IndexOutOfRange { index, lane_count });
    }
    Ok(index as usize)
}

/// Trims a lane heading and rejects empty names.
pub fn parse_lane_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyLaneName);
    }
    Ok(trimmed.to_string())
}

fn parse_count(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            value: raw.trim().to_string(),
        })
}
