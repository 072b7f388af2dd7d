//! # Tablecast
//!
//! Turns the data tables of behavior-driven test steps into typed values,
//! and checks typed values against expected tables.
//!
//! A fixture table arrives as rows of raw text. Tablecast supports two
//! shapes:
//!
//! - **Key/value tables**: two columns describing one record
//! - **Row tables**: a header row naming fields, then one record per row
//!
//! Field types are converted through a [`ConversionRegistry`] of parse and
//! compare functions keyed by type. Defaults cover text, integers, floats,
//! booleans, timestamps and their `Option` variants; suites register their
//! own converters for anything else.
//!
//! ## Quick Start
//!
//! ```rust
//! use tablecast::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     name: String,
//!     height: i64,
//! }
//!
//! tablecast::impl_record!(Person {
//!     "Name" => name: String,
//!     "Height" => height: i64,
//! });
//!
//! let assist = Assist::with_defaults();
//! let table = tablecast::table![["Name", "John"], ["Height", "182"]];
//!
//! let person: Person = assist.create_instance(&table)?;
//! assert_eq!(person.height, 182);
//!
//! assist.compare_to_instance(&person, &table)?;
//! # Ok::<(), AssistError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod assist;
pub mod builder;
pub mod comparator;
pub mod config;
pub mod defaults;
pub mod errors;
pub mod record;
pub mod registry;
pub mod table;
pub mod testing;

pub use assist::Assist;
pub use config::{AssistConfig, DuplicateKeyPolicy};
pub use errors::{AssistError, ConvertError, FieldError, FieldErrorKind, RowError, TableError};
pub use record::{DynamicRecord, Record};
pub use registry::{ConversionRegistry, TypeKey};
pub use table::{KeyValueTable, RowTable, Table};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assist::Assist;
    pub use crate::builder::{build, build_all};
    pub use crate::comparator::{compare, compare_all, compare_map, compare_slice};
    pub use crate::config::{AssistConfig, DuplicateKeyPolicy};
    pub use crate::defaults::TimeLayout;
    pub use crate::errors::{
        AssistError, ConvertError, ErrorKind, FieldError, FieldErrorKind, RowError, TableError,
    };
    pub use crate::record::{DynamicRecord, FieldAccessor, FieldTable, Record};
    pub use crate::registry::{
        comparer_fn, parser_fn, CompareFn, ConversionRegistry, ParseFn, TypeKey,
    };
    pub use crate::table::{
        to_key_value_table, to_key_value_table_with, to_row_table, to_row_table_with,
        KeyValueTable, RowTable, Table,
    };
}
