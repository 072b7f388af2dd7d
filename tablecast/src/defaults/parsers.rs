//! Default parsers for raw table cells.

use crate::errors::ConvertError;

/// Returns the raw text unchanged.
pub fn parse_string(raw: &str) -> Result<String, ConvertError> {
    Ok(raw.to_string())
}

/// Parses a 64-bit signed integer.
pub fn parse_i64(raw: &str) -> Result<i64, ConvertError> {
    Ok(raw.parse()?)
}

/// Parses a 32-bit signed integer.
pub fn parse_i32(raw: &str) -> Result<i32, ConvertError> {
    Ok(raw.parse()?)
}

/// Parses a 32-bit float.
pub fn parse_f32(raw: &str) -> Result<f32, ConvertError> {
    Ok(raw.parse()?)
}

/// Parses a 64-bit float.
pub fn parse_f64(raw: &str) -> Result<f64, ConvertError> {
    Ok(raw.parse()?)
}

/// Parses `true` or `false`.
pub fn parse_bool(raw: &str) -> Result<bool, ConvertError> {
    Ok(raw.parse()?)
}

/// Parses an optional value: `nil_marker` yields `None`, anything else is
/// handed to `parse`.
pub fn parse_optional<T>(
    raw: &str,
    nil_marker: &str,
    parse: impl Fn(&str) -> Result<T, ConvertError>,
) -> Result<Option<T>, ConvertError> {
    if raw == nil_marker {
        return Ok(None);
    }
    parse(raw).map(Some)
}
