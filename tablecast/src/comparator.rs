//! Comparing actual values against expected tables.
//!
//! Comparison never mutates the actual value. Every pair of the table is
//! checked and all mismatches are reported together, in table order.

use std::any::Any;
use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{AssistError, FieldError, FieldErrorKind, RowError};
use crate::record::{record_name, DynamicRecord, Record};
use crate::registry::{ConversionRegistry, TypeKey};
use crate::table::{KeyValueTable, RowTable};

/// Compares one record against key/value pairs.
///
/// # Errors
///
/// Returns [`AssistError::Compare`] listing every field that was missing,
/// had no comparer, or did not match.
pub fn compare<R: Record>(
    registry: &ConversionRegistry,
    actual: &R,
    pairs: &KeyValueTable,
) -> Result<(), AssistError> {
    let errors = check_record(registry, actual, pairs);
    if errors.is_empty() {
        Ok(())
    } else {
        debug!(failures = errors.len(), "record comparison failed");
        Err(AssistError::Compare { errors })
    }
}

/// Compares a slice of records against a row table, row *i* against
/// element *i*.
///
/// # Errors
///
/// Returns [`AssistError::LengthMismatch`] if the slice and the table have a
/// different number of rows, otherwise [`AssistError::CompareAll`] with the
/// field errors of every failing row. A slice longer than the table is a
/// mismatch too: extra elements are never ignored.
pub fn compare_slice<R: Record>(
    registry: &ConversionRegistry,
    actual: &[R],
    rows: &RowTable,
) -> Result<(), AssistError> {
    compare_rows(registry, actual.iter(), actual.len(), rows)
}

/// Compares a type-erased sequence of `R` against a row table.
///
/// `actual` may be a `Vec<R>`, `VecDeque<R>`, `Vec<Box<R>>` or `Vec<Arc<R>>`.
///
/// # Errors
///
/// Returns [`AssistError::NotASequence`] if `actual` is none of these, and
/// otherwise fails like [`compare_slice`], including a
/// [`AssistError::LengthMismatch`] when the sequence is longer or shorter
/// than the table.
pub fn compare_all<R: Record>(
    registry: &ConversionRegistry,
    actual: &dyn Any,
    rows: &RowTable,
) -> Result<(), AssistError> {
    let elements = sequence_of::<R>(actual).ok_or_else(|| not_a_sequence::<R>())?;
    compare_rows(registry, elements.iter().copied(), elements.len(), rows)
}

/// Compares a dynamic record against key/value pairs.
///
/// # Errors
///
/// Returns [`AssistError::Compare`] listing every name that was missing,
/// had no comparer for its value's type, or did not match.
pub fn compare_map(
    registry: &ConversionRegistry,
    actual: &DynamicRecord,
    pairs: &KeyValueTable,
) -> Result<(), AssistError> {
    let mut errors = Vec::new();
    for (name, raw) in pairs.iter() {
        let outcome = actual
            .get(name)
            .ok_or(FieldErrorKind::NotFound)
            .and_then(|value| check_value(registry, value.key(), raw, value.as_any()));
        if let Err(kind) = outcome {
            trace!(field = name, error = %kind, "map entry mismatch");
            errors.push(FieldError::new(name, kind));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(failures = errors.len(), "map comparison failed");
        Err(AssistError::Compare { errors })
    }
}

/// Views `actual` as a sequence of `R`, if it is one of the supported
/// sequence types.
pub(crate) fn sequence_of<R: Record>(actual: &dyn Any) -> Option<Vec<&R>> {
    if let Some(items) = actual.downcast_ref::<Vec<R>>() {
        return Some(items.iter().collect());
    }
    if let Some(items) = actual.downcast_ref::<VecDeque<R>>() {
        return Some(items.iter().collect());
    }
    if let Some(items) = actual.downcast_ref::<Vec<Box<R>>>() {
        return Some(items.iter().map(|item| &**item).collect());
    }
    if let Some(items) = actual.downcast_ref::<Vec<Arc<R>>>() {
        return Some(items.iter().map(|item| &**item).collect());
    }
    None
}

pub(crate) fn not_a_sequence<R: Record>() -> AssistError {
    AssistError::NotASequence {
        target: record_name::<R>(),
    }
}

fn compare_rows<'a, R: Record>(
    registry: &ConversionRegistry,
    actual: impl Iterator<Item = &'a R>,
    len: usize,
    rows: &RowTable,
) -> Result<(), AssistError> {
    if len != rows.len() {
        debug!(expected = rows.len(), actual = len, "sequence length mismatch");
        return Err(AssistError::LengthMismatch {
            expected: rows.len(),
            actual: len,
        });
    }

    let failures: Vec<RowError> = actual
        .zip(rows.rows())
        .enumerate()
        .filter_map(|(index, (record, pairs))| {
            let errors = check_record(registry, record, pairs);
            (!errors.is_empty()).then(|| RowError::new(index, errors))
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        debug!(
            failed_rows = failures.len(),
            rows = rows.len(),
            "collection comparison failed"
        );
        Err(AssistError::CompareAll { rows: failures })
    }
}

fn check_record<R: Record>(
    registry: &ConversionRegistry,
    actual: &R,
    pairs: &KeyValueTable,
) -> Vec<FieldError> {
    let fields = R::fields();
    let mut errors = Vec::new();

    for (name, raw) in pairs.iter() {
        let outcome = fields
            .get(name)
            .ok_or(FieldErrorKind::NotFound)
            .and_then(|field| check_value(registry, field.key(), raw, field.get(actual)));
        if let Err(kind) = outcome {
            trace!(field = name, error = %kind, "field mismatch");
            errors.push(FieldError::new(name, kind));
        }
    }

    errors
}

fn check_value(
    registry: &ConversionRegistry,
    key: TypeKey,
    raw: &str,
    actual: &dyn Any,
) -> Result<(), FieldErrorKind> {
    let compare = registry
        .find_comparer(key)
        .ok_or_else(|| FieldErrorKind::unsupported(key))?;
    compare(raw, actual)?;
    Ok(())
}
