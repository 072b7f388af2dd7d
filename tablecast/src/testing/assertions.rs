//! Test assertions for conversion and comparison errors.

use crate::errors::{AssistError, FieldError, FieldErrorKind};

/// Asserts that a single-record error reports `field` with the given kind.
pub fn assert_field_error(err: &AssistError, field: &str, expected: &FieldErrorKind) {
    let errors = field_errors_of(err);
    assert!(
        errors.iter().any(|e| e.field == field && e.kind == *expected),
        "Expected field '{}' to fail with {:?}, got: {:?}",
        field,
        expected,
        errors
    );
}

/// Asserts that a single-record error reports exactly these fields, in order.
pub fn assert_field_errors(err: &AssistError, fields: &[&str]) {
    let errors = field_errors_of(err);
    let actual: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        actual, fields,
        "Expected failing fields {:?}, got {:?}",
        fields, actual
    );
}

/// Asserts that a single-record error does not mention `field`.
pub fn assert_no_field_error(err: &AssistError, field: &str) {
    let errors = field_errors_of(err);
    assert!(
        errors.iter().all(|e| e.field != field),
        "Expected field '{}' not to fail, got: {:?}",
        field,
        errors
    );
}

/// Asserts that a collection error reports `field` of data row `row` with
/// the given kind.
pub fn assert_row_error(err: &AssistError, row: usize, field: &str, expected: &FieldErrorKind) {
    let Some(rows) = err.row_errors() else {
        panic!("Expected a collection error, got: {err}");
    };
    let Some(row_error) = rows.iter().find(|r| r.row == row) else {
        panic!(
            "Expected row {} to fail, failing rows: {:?}",
            row,
            rows.iter().map(|r| r.row).collect::<Vec<_>>()
        );
    };
    assert!(
        row_error
            .errors
            .iter()
            .any(|e| e.field == field && e.kind == *expected),
        "Expected row {} field '{}' to fail with {:?}, got: {:?}",
        row,
        field,
        expected,
        row_error.errors
    );
}

fn field_errors_of(err: &AssistError) -> &[FieldError] {
    match err.field_errors() {
        Some(errors) => errors,
        None => panic!("Expected a record error, got: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConvertError, RowError};

    fn record_error() -> AssistError {
        AssistError::Build {
            target: "Person".to_string(),
            errors: vec![
                FieldError::new("Age", FieldErrorKind::NotFound),
                FieldError::new("Height", ConvertError::new("invalid digit found in string").into()),
            ],
        }
    }

    #[test]
    fn test_field_assertions() {
        let err = record_error();
        assert_field_error(&err, "Age", &FieldErrorKind::NotFound);
        assert_field_errors(&err, &["Age", "Height"]);
        assert_no_field_error(&err, "Name");
    }

    #[test]
    #[should_panic(expected = "Expected field 'Name'")]
    fn test_field_assertion_fails() {
        assert_field_error(&record_error(), "Name", &FieldErrorKind::NotFound);
    }

    #[test]
    fn test_row_assertion() {
        let err = AssistError::CompareAll {
            rows: vec![RowError::new(
                1,
                vec![FieldError::new("Height", ConvertError::mismatch(1234, 170).into())],
            )],
        };

        assert_row_error(
            &err,
            1,
            "Height",
            &FieldErrorKind::Conversion {
                message: "expected 1234, but got 170".to_string(),
            },
        );
    }

    #[test]
    #[should_panic(expected = "Expected a collection error")]
    fn test_row_assertion_on_record_error() {
        assert_row_error(&record_error(), 0, "Age", &FieldErrorKind::NotFound);
    }
}
