//! Error types for table conversion and comparison.
//!
//! Structural problems with a table ([`TableError`]) abort an operation
//! immediately. Problems with individual fields ([`FieldError`]) are
//! collected so that a single report lists every defect of a record, and
//! [`RowError`] groups them per data row for collection operations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

use crate::registry::TypeKey;

/// The main error type returned by builders, comparators and [`crate::Assist`].
#[derive(Debug, Clone, Error)]
pub enum AssistError {
    /// The table has the wrong shape for the requested operation.
    #[error("{0}")]
    Table(#[from] TableError),

    /// One or more fields could not be populated while building a record.
    #[error("failed to parse table as {target}:\n{}", render_fields(.errors))]
    Build {
        /// Short name of the record type being built.
        target: String,
        /// Field errors in table order.
        errors: Vec<FieldError>,
    },

    /// One or more rows failed while building a list of records.
    #[error("failed to parse table as list of {target}:\n{}", render_rows(.rows))]
    BuildAll {
        /// Short name of the record type being built.
        target: String,
        /// Failing rows in table order.
        rows: Vec<RowError>,
    },

    /// One or more fields did not match the expected table values.
    #[error("comparison failed:\n{}", render_fields(.errors))]
    Compare {
        /// Field errors in table order.
        errors: Vec<FieldError>,
    },

    /// One or more rows did not match the expected table values.
    #[error("comparison failed:\n{}", render_rows(.rows))]
    CompareAll {
        /// Failing rows in table order.
        rows: Vec<RowError>,
    },

    /// The actual value handed to a collection comparison is not a sequence.
    #[error("actual value is not a sequence of {target}")]
    NotASequence {
        /// Short name of the expected element type.
        target: String,
    },

    /// The actual sequence and the table have a different number of rows.
    #[error("expected {expected} elements to compare, but got {actual}")]
    LengthMismatch {
        /// Number of data rows in the table.
        expected: usize,
        /// Number of elements in the actual sequence.
        actual: usize,
    },
}

/// Coarse classification of an [`AssistError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed table or mismatched collection shape; reported alone.
    Structural,
    /// Aggregated field-level errors for a single record.
    Record,
    /// Aggregated row-level errors for a collection.
    Collection,
    /// The actual value was not a sequence.
    NotASequence,
}

impl AssistError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Table(_) | Self::LengthMismatch { .. } => ErrorKind::Structural,
            Self::Build { .. } | Self::Compare { .. } => ErrorKind::Record,
            Self::BuildAll { .. } | Self::CompareAll { .. } => ErrorKind::Collection,
            Self::NotASequence { .. } => ErrorKind::NotASequence,
        }
    }

    /// Field errors of a single-record failure, if this is one.
    #[must_use]
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Build { errors, .. } | Self::Compare { errors } => Some(errors),
            _ => None,
        }
    }

    /// Row errors of a collection failure, if this is one.
    #[must_use]
    pub fn row_errors(&self) -> Option<&[RowError]> {
        match self {
            Self::BuildAll { rows, .. } | Self::CompareAll { rows } => Some(rows),
            _ => None,
        }
    }

    /// Converts to a dictionary representation for test-runner reports.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), serde_json::json!(self.kind()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));

        match self {
            Self::Table(err) => {
                map.insert("table".to_string(), serde_json::json!(err));
            }
            Self::Build { target, errors } => {
                map.insert("target".to_string(), serde_json::json!(target));
                map.insert("fields".to_string(), serde_json::json!(errors));
            }
            Self::BuildAll { target, rows } => {
                map.insert("target".to_string(), serde_json::json!(target));
                map.insert("rows".to_string(), serde_json::json!(rows));
            }
            Self::Compare { errors } => {
                map.insert("fields".to_string(), serde_json::json!(errors));
            }
            Self::CompareAll { rows } => {
                map.insert("rows".to_string(), serde_json::json!(rows));
            }
            Self::NotASequence { target } => {
                map.insert("target".to_string(), serde_json::json!(target));
            }
            Self::LengthMismatch { expected, actual } => {
                map.insert("expected".to_string(), serde_json::json!(expected));
                map.insert("actual".to_string(), serde_json::json!(actual));
            }
        }

        map
    }
}

/// Errors raised when a table does not have the shape an operation needs.
///
/// Row numbers in key/value errors count raw table rows; row numbers in
/// row-table errors count data rows (the header is not counted). Both are
/// zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableError {
    /// The table has no rows at all.
    #[error("expected table to have at least one row")]
    EmptyTable,

    /// A key/value table row does not have exactly two cells.
    #[error("expected table to have exactly two columns, but row {row} has {found}")]
    ColumnCountMismatch {
        /// Offending row.
        row: usize,
        /// Number of cells found in that row.
        found: usize,
    },

    /// A row table has no data rows below its header.
    #[error("expected table to have at least two rows, but got {found}")]
    InsufficientRows {
        /// Number of rows found.
        found: usize,
    },

    /// The header row of a row table has no cells.
    #[error("expected table to have at least one column")]
    EmptyHeader,

    /// A data row does not have one cell per header column.
    #[error("expected row {row} to have {expected} cells, but got {found}")]
    RowLengthMismatch {
        /// Offending data row.
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells found in that row.
        found: usize,
    },

    /// A key appears twice while duplicate keys are rejected.
    #[error("duplicate key '{key}' in rows {first} and {second}")]
    DuplicateKey {
        /// The repeated key.
        key: String,
        /// Row of the first occurrence.
        first: usize,
        /// Row of the repeated occurrence.
        second: usize,
    },
}

/// Why a single field could not be built or did not match.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// The record type has no field with that name.
    #[error("field not found")]
    NotFound,

    /// The field exists but is read-only.
    #[error("cannot set value")]
    NotSettable,

    /// No parser or comparer is registered for the field's type.
    #[error("unrecognized type {type_name}")]
    UnsupportedType {
        /// Readable name of the field's type.
        type_name: String,
    },

    /// The registered parser or comparer reported a failure.
    #[error("{message}")]
    Conversion {
        /// The converter's message, passed through verbatim.
        message: String,
    },
}

impl FieldErrorKind {
    /// Creates an unsupported-type error for the given key.
    #[must_use]
    pub fn unsupported(key: TypeKey) -> Self {
        Self::UnsupportedType {
            type_name: key.short_name(),
        }
    }
}

impl From<ConvertError> for FieldErrorKind {
    fn from(err: ConvertError) -> Self {
        Self::Conversion {
            message: err.message,
        }
    }
}

/// A diagnostic for one field of one record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {kind}")]
pub struct FieldError {
    /// Field name as written in the table.
    pub field: String,
    /// What went wrong.
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Returns true if this is a conversion error whose message contains `needle`.
    #[must_use]
    pub fn message_contains(&self, needle: &str) -> bool {
        matches!(&self.kind, FieldErrorKind::Conversion { message } if message.contains(needle))
    }
}

/// All field errors of one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based data row index.
    pub row: usize,
    /// Field errors in column order.
    pub errors: Vec<FieldError>,
}

impl RowError {
    /// Creates a new row error.
    #[must_use]
    pub const fn new(row: usize, errors: Vec<FieldError>) -> Self {
        Self { row, errors }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}:", self.row)?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RowError {}

/// Failure reported by a parser or comparer.
///
/// The message is shown to the user unchanged, prefixed by the field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConvertError {
    /// Human-readable description.
    pub message: String,
}

impl ConvertError {
    /// Creates a new conversion error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates a mismatch error in the conventional `expected X, but got Y` shape.
    #[must_use]
    pub fn mismatch(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self::new(format!("expected {expected}, but got {actual}"))
    }
}

impl From<ParseIntError> for ConvertError {
    fn from(err: ParseIntError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ParseFloatError> for ConvertError {
    fn from(err: ParseFloatError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ParseBoolError> for ConvertError {
    fn from(err: ParseBoolError) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors raised while loading an [`crate::AssistConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be deserialized.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration value for '{field}': {reason}")]
    Invalid {
        /// The offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

fn render_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rows(rows: &[RowError]) -> String {
    rows.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_error_renders_field_lines() {
        let err = AssistError::Build {
            target: "Person".to_string(),
            errors: vec![
                FieldError::new("Age", FieldErrorKind::NotFound),
                FieldError::new("Id", FieldErrorKind::NotSettable),
            ],
        };

        assert_eq!(
            err.to_string(),
            "failed to parse table as Person:\n- Age: field not found\n- Id: cannot set value"
        );
        assert_eq!(err.kind(), ErrorKind::Record);
    }

    #[test]
    fn test_build_all_error_renders_row_blocks() {
        let err = AssistError::BuildAll {
            target: "Person".to_string(),
            rows: vec![
                RowError::new(
                    0,
                    vec![FieldError::new(
                        "Height",
                        FieldErrorKind::Conversion {
                            message: "invalid digit found in string".to_string(),
                        },
                    )],
                ),
                RowError::new(2, vec![FieldError::new("Age", FieldErrorKind::NotFound)]),
            ],
        };

        assert_eq!(
            err.to_string(),
            "failed to parse table as list of Person:\n\
             row 0:\n  - Height: invalid digit found in string\n\
             row 2:\n  - Age: field not found"
        );
        assert_eq!(err.kind(), ErrorKind::Collection);
    }

    #[test]
    fn test_compare_error_renders() {
        let err = AssistError::Compare {
            errors: vec![FieldError::new(
                "Height",
                ConvertError::mismatch(900, 182).into(),
            )],
        };

        assert_eq!(
            err.to_string(),
            "comparison failed:\n- Height: expected 900, but got 182"
        );
    }

    #[test]
    fn test_table_error_passes_through() {
        let err: AssistError = TableError::EmptyTable.into();
        assert_eq!(err.to_string(), "expected table to have at least one row");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_unsupported_type_uses_short_name() {
        let kind = FieldErrorKind::unsupported(TypeKey::of::<Vec<String>>());
        assert_eq!(kind.to_string(), "unrecognized type Vec<String>");
    }

    #[test]
    fn test_convert_error_from_parse_int() {
        let err: ConvertError = "nono".parse::<i64>().unwrap_err().into();
        assert_eq!(err.message, "invalid digit found in string");
    }

    #[test]
    fn test_field_error_message_contains() {
        let err = FieldError::new("Height", ConvertError::new("invalid digit").into());
        assert!(err.message_contains("digit"));
        assert!(!FieldError::new("Age", FieldErrorKind::NotFound).message_contains("digit"));
    }

    #[test]
    fn test_to_dict() {
        let err = AssistError::CompareAll {
            rows: vec![RowError::new(
                1,
                vec![FieldError::new("Height", ConvertError::mismatch(1234, 170).into())],
            )],
        };

        let dict = err.to_dict();
        assert_eq!(dict.get("kind").unwrap(), "collection");
        assert_eq!(dict["rows"][0]["row"], serde_json::json!(1));
        assert_eq!(dict["rows"][0]["errors"][0]["field"], serde_json::json!("Height"));
        assert_eq!(
            dict["rows"][0]["errors"][0]["kind"]["type"],
            serde_json::json!("conversion")
        );
    }

    #[test]
    fn test_table_error_serialization() {
        let err = TableError::RowLengthMismatch {
            row: 1,
            expected: 2,
            found: 3,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], serde_json::json!("row_length_mismatch"));

        let back: TableError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}
