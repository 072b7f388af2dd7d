//! Building typed records from normalized tables.
//!
//! Every pair of the table is attempted, in table order, and every failure
//! is collected. A record is returned only when no field failed, so callers
//! never observe a partially populated instance.

use tracing::{debug, trace};

use crate::errors::{AssistError, FieldError, FieldErrorKind, RowError};
use crate::record::{record_name, FieldTable, Record};
use crate::registry::ConversionRegistry;
use crate::table::{KeyValueTable, RowTable};

/// Builds one `R` from key/value pairs.
///
/// # Errors
///
/// Returns [`AssistError::Build`] listing every field that was missing,
/// read-only, of an unsupported type, or failed to parse.
pub fn build<R: Record>(
    registry: &ConversionRegistry,
    pairs: &KeyValueTable,
) -> Result<R, AssistError> {
    populate(registry, pairs).map_err(|errors| {
        let target = record_name::<R>();
        debug!(target_type = %target, failures = errors.len(), "failed to build record");
        AssistError::Build { target, errors }
    })
}

/// Builds one `R` per data row, in row order.
///
/// # Errors
///
/// Returns [`AssistError::BuildAll`] with the field errors of every failing
/// row. No records are returned if any row failed.
pub fn build_all<R: Record>(
    registry: &ConversionRegistry,
    rows: &RowTable,
) -> Result<Vec<R>, AssistError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut failures = Vec::new();

    for (index, pairs) in rows.rows().iter().enumerate() {
        match populate::<R>(registry, pairs) {
            Ok(record) => records.push(record),
            Err(errors) => failures.push(RowError::new(index, errors)),
        }
    }

    let target = record_name::<R>();
    if failures.is_empty() {
        debug!(target_type = %target, rows = records.len(), "built records");
        Ok(records)
    } else {
        debug!(
            target_type = %target,
            failed_rows = failures.len(),
            rows = rows.len(),
            "failed to build records"
        );
        Err(AssistError::BuildAll {
            target,
            rows: failures,
        })
    }
}

fn populate<R: Record>(
    registry: &ConversionRegistry,
    pairs: &KeyValueTable,
) -> Result<R, Vec<FieldError>> {
    let fields = R::fields();
    let mut record = R::default();
    let mut errors = Vec::new();

    for (name, raw) in pairs.iter() {
        if let Err(kind) = assign_field(registry, fields, &mut record, name, raw) {
            trace!(field = name, error = %kind, "field not assigned");
            errors.push(FieldError::new(name, kind));
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}

fn assign_field<R>(
    registry: &ConversionRegistry,
    fields: &FieldTable<R>,
    record: &mut R,
    name: &str,
    raw: &str,
) -> Result<(), FieldErrorKind> {
    let field = fields.get(name).ok_or(FieldErrorKind::NotFound)?;
    let set = field.setter().ok_or(FieldErrorKind::NotSettable)?;
    let parse = registry
        .find_parser(field.key())
        .ok_or_else(|| FieldErrorKind::unsupported(field.key()))?;

    let value = parse(raw)?;
    set(record, value).map_err(|_| FieldErrorKind::Conversion {
        message: format!("parser for {} produced a value of another type", field.key()),
    })?;

    trace!(field = name, "assigned field");
    Ok(())
}
