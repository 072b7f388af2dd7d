//! Table fixtures.

use crate::table::{to_key_value_table, to_row_table, KeyValueTable, RowTable, Table};

/// Builds a [`Table`] from rows of string-like cells.
///
/// ```
/// let table = tablecast::table![
///     ["Name", "Height"],
///     ["John", "182"],
/// ];
/// assert_eq!(table.row_count(), 2);
/// ```
#[macro_export]
macro_rules! table {
    ($([$($cell:expr),* $(,)?]),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut table = $crate::table::Table::default();
        $(
            table.push_row(::std::vec::Vec::<::std::string::String>::from([
                $(::std::string::String::from($cell)),*
            ]));
        )*
        table
    }};
}

/// Normalizes a two-column fixture, panicking if it is malformed.
///
/// # Panics
///
/// Panics if `table` is not a valid key/value table.
#[must_use]
pub fn key_value_table(table: &Table) -> KeyValueTable {
    match to_key_value_table(table) {
        Ok(pairs) => pairs,
        Err(err) => panic!("invalid key/value fixture: {err}"),
    }
}

/// Normalizes a header-plus-rows fixture, panicking if it is malformed.
///
/// # Panics
///
/// Panics if `table` is not a valid row table.
#[must_use]
pub fn row_table(table: &Table) -> RowTable {
    match to_row_table(table) {
        Ok(rows) => rows,
        Err(err) => panic!("invalid row fixture: {err}"),
    }
}
