//! Table shape validation and normalization.

use tracing::debug;

use super::{KeyValueTable, RowTable, Table};
use crate::config::DuplicateKeyPolicy;
use crate::errors::TableError;

/// Normalizes a two-column table into key/value pairs, last duplicate winning.
pub fn to_key_value_table(table: &Table) -> Result<KeyValueTable, TableError> {
    to_key_value_table_with(table, DuplicateKeyPolicy::LastWins)
}

/// Normalizes a two-column table into key/value pairs.
///
/// Requires at least one row and exactly two cells in every row.
pub fn to_key_value_table_with(
    table: &Table,
    duplicates: DuplicateKeyPolicy,
) -> Result<KeyValueTable, TableError> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }

    let mut pairs = KeyValueTable::new();
    for (index, row) in table.rows().iter().enumerate() {
        let [key, value] = row.as_slice() else {
            debug!(row = index, cells = row.len(), "key/value row has wrong column count");
            return Err(TableError::ColumnCountMismatch {
                row: index,
                found: row.len(),
            });
        };
        insert_pair(&mut pairs, key, value, index, duplicates)?;
    }

    Ok(pairs)
}

/// Normalizes a header-plus-rows table, last duplicate header winning.
pub fn to_row_table(table: &Table) -> Result<RowTable, TableError> {
    to_row_table_with(table, DuplicateKeyPolicy::LastWins)
}

/// Normalizes a header-plus-rows table.
///
/// Requires a header with at least one cell and at least one data row, and
/// every data row must have exactly one cell per header column.
pub fn to_row_table_with(
    table: &Table,
    duplicates: DuplicateKeyPolicy,
) -> Result<RowTable, TableError> {
    let rows = table.rows();
    if rows.len() < 2 {
        return Err(TableError::InsufficientRows { found: rows.len() });
    }

    let header = &rows[0];
    if header.is_empty() {
        return Err(TableError::EmptyHeader);
    }

    let mut normalized = Vec::with_capacity(rows.len() - 1);
    for (index, row) in rows[1..].iter().enumerate() {
        if row.len() != header.len() {
            debug!(
                row = index,
                expected = header.len(),
                found = row.len(),
                "data row length does not match header"
            );
            return Err(TableError::RowLengthMismatch {
                row: index,
                expected: header.len(),
                found: row.len(),
            });
        }

        let mut pairs = KeyValueTable::new();
        for (column, (name, value)) in header.iter().zip(row).enumerate() {
            insert_pair(&mut pairs, name, value, column, duplicates)?;
        }
        normalized.push(pairs);
    }

    Ok(RowTable::new(header.clone(), normalized))
}

fn insert_pair(
    pairs: &mut KeyValueTable,
    key: &str,
    value: &str,
    position: usize,
    duplicates: DuplicateKeyPolicy,
) -> Result<(), TableError> {
    if duplicates == DuplicateKeyPolicy::Reject {
        if let Some(first) = pairs.position(key) {
            return Err(TableError::DuplicateKey {
                key: key.to_string(),
                first,
                second: position,
            });
        }
    }
    pairs.insert(key, value);
    Ok(())
}
