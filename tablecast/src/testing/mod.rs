//! Testing utilities for table-driven suites.
//!
//! This module provides:
//! - The [`table!`](crate::table!) macro for writing fixtures inline
//! - Assertions over field and row errors
//! - Test logging setup

mod assertions;
mod fixtures;
mod logging;

pub use assertions::{
    assert_field_error, assert_field_errors, assert_no_field_error, assert_row_error,
};
pub use fixtures::{key_value_table, row_table};
pub use logging::init_test_logging;
