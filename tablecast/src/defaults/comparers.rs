//! Default comparers for actual field values.

use std::fmt::Display;

use crate::errors::ConvertError;

/// Compares text exactly.
#[allow(clippy::ptr_arg)]
pub fn compare_string(raw: &str, actual: &String) -> Result<(), ConvertError> {
    if raw == actual {
        Ok(())
    } else {
        Err(ConvertError::mismatch(raw, actual))
    }
}

/// Compares a 64-bit signed integer.
pub fn compare_i64(raw: &str, actual: &i64) -> Result<(), ConvertError> {
    compare_parsed(raw.parse::<i64>()?, actual)
}

/// Compares a 32-bit signed integer.
pub fn compare_i32(raw: &str, actual: &i32) -> Result<(), ConvertError> {
    compare_parsed(raw.parse::<i32>()?, actual)
}

/// Compares a 32-bit float against the raw text parsed at the same width.
#[allow(clippy::float_cmp)]
pub fn compare_f32(raw: &str, actual: &f32) -> Result<(), ConvertError> {
    let expected: f32 = raw.parse()?;
    if expected == *actual {
        Ok(())
    } else {
        Err(ConvertError::mismatch(raw, actual))
    }
}

/// Compares a 64-bit float against the raw text parsed at the same width.
#[allow(clippy::float_cmp)]
pub fn compare_f64(raw: &str, actual: &f64) -> Result<(), ConvertError> {
    let expected: f64 = raw.parse()?;
    if expected == *actual {
        Ok(())
    } else {
        Err(ConvertError::mismatch(raw, actual))
    }
}

/// Compares a boolean.
pub fn compare_bool(raw: &str, actual: &bool) -> Result<(), ConvertError> {
    compare_parsed(raw.parse::<bool>()?, actual)
}

/// Compares an optional value: `nil_marker` matches only `None`, anything
/// else is handed to `compare`.
pub fn compare_optional<T: Display>(
    raw: &str,
    actual: Option<&T>,
    nil_marker: &str,
    compare: impl Fn(&str, &T) -> Result<(), ConvertError>,
) -> Result<(), ConvertError> {
    match actual {
        None if raw == nil_marker => Ok(()),
        None => Err(ConvertError::mismatch(raw, nil_marker)),
        Some(value) if raw == nil_marker => Err(ConvertError::mismatch(nil_marker, value)),
        Some(value) => compare(raw, value),
    }
}

fn compare_parsed<T: PartialEq + Display>(expected: T, actual: &T) -> Result<(), ConvertError> {
    if expected == *actual {
        Ok(())
    } else {
        Err(ConvertError::mismatch(expected, actual))
    }
}
