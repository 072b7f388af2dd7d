//! Record types and their field accessor tables.
//!
//! A record type describes its fields once, by table name, through a
//! [`FieldTable`]: each entry carries the field's [`TypeKey`], a getter, and
//! a setter unless the field is read-only. The [`impl_record!`] macro
//! builds the table lazily on first use.
//!
//! ```
//! use tablecast::impl_record;
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     name: String,
//!     height: i64,
//!     id: u64,
//! }
//!
//! impl_record!(Person {
//!     "Name" => name: String,
//!     "Height" => height: i64,
//!     #[read_only]
//!     "Id" => id: u64,
//! });
//! ```
//!
//! [`impl_record!`]: crate::impl_record

mod dynamic;

pub use dynamic::DynamicRecord;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::registry::{ParsedValue, TypeKey};

/// Reads a field as `dyn Any`.
pub type FieldGetter<R> = fn(&R) -> &dyn Any;

/// Writes a parsed value into a field, handing the value back if it has the
/// wrong type.
pub type FieldSetter<R> = fn(&mut R, ParsedValue) -> Result<(), ParsedValue>;

/// A record type that can be built from and compared against tables.
pub trait Record: Default + 'static {
    /// The accessor table for this type, built once.
    fn fields() -> &'static FieldTable<Self>;
}

/// Name-based access to one field of `R`.
pub struct FieldAccessor<R> {
    name: &'static str,
    key: TypeKey,
    get: FieldGetter<R>,
    set: Option<FieldSetter<R>>,
}

impl<R> FieldAccessor<R> {
    /// Creates an accessor for a writable field.
    #[must_use]
    pub const fn writable(
        name: &'static str,
        key: TypeKey,
        get: FieldGetter<R>,
        set: FieldSetter<R>,
    ) -> Self {
        Self {
            name,
            key,
            get,
            set: Some(set),
        }
    }

    /// Creates an accessor for a read-only field.
    #[must_use]
    pub const fn read_only(name: &'static str, key: TypeKey, get: FieldGetter<R>) -> Self {
        Self {
            name,
            key,
            get,
            set: None,
        }
    }

    /// The field's table name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The field's type key.
    #[must_use]
    pub const fn key(&self) -> TypeKey {
        self.key
    }

    /// Reads the field.
    #[must_use]
    pub fn get<'a>(&self, record: &'a R) -> &'a dyn Any {
        (self.get)(record)
    }

    /// The field's setter, or `None` if it is read-only.
    #[must_use]
    pub const fn setter(&self) -> Option<FieldSetter<R>> {
        self.set
    }

    /// Returns true if the field can be assigned.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.set.is_some()
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("type", &self.key.short_name())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// The ordered accessor table of a record type.
pub struct FieldTable<R> {
    fields: Vec<FieldAccessor<R>>,
    index: HashMap<&'static str, usize>,
}

impl<R> FieldTable<R> {
    /// Creates a table. A repeated name resolves to its last accessor.
    #[must_use]
    pub fn new(fields: Vec<FieldAccessor<R>>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.name, position))
            .collect();
        Self { fields, index }
    }

    /// Finds a field by table name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldAccessor<R>> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    /// Iterates over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldAccessor<R>> {
        self.fields.iter()
    }

    /// Field names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> fmt::Debug for FieldTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Short type name of a record, used in error reports.
#[must_use]
pub fn record_name<R: Record>() -> String {
    TypeKey::of::<R>().short_name()
}

/// Implements [`Record`] for a struct by listing its table-addressable fields.
///
/// Each entry maps a table name to a struct field and its type. Prefix an
/// entry with `#[read_only]` to make it comparable but not buildable.
#[macro_export]
macro_rules! impl_record {
    ($record:ident {
        $( $(#[$flag:ident])? $name:literal => $field:ident : $ty:ty ),* $(,)?
    }) => {
        impl $crate::record::Record for $record {
            fn fields() -> &'static $crate::record::FieldTable<Self> {
                static FIELDS: ::std::sync::OnceLock<$crate::record::FieldTable<$record>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| {
                    $crate::record::FieldTable::new(::std::vec![
                        $( $crate::impl_record!(@accessor $record; [$($flag)?] $name, $field, $ty) ),*
                    ])
                })
            }
        }
    };

    (@accessor $record:ident; [read_only] $name:literal, $field:ident, $ty:ty) => {{
        fn get(record: &$record) -> &dyn ::std::any::Any {
            &record.$field
        }
        $crate::record::FieldAccessor::read_only(
            $name,
            $crate::registry::TypeKey::of::<$ty>(),
            get,
        )
    }};

    (@accessor $record:ident; [] $name:literal, $field:ident, $ty:ty) => {{
        fn get(record: &$record) -> &dyn ::std::any::Any {
            &record.$field
        }
        fn set(
            record: &mut $record,
            value: $crate::registry::ParsedValue,
        ) -> ::std::result::Result<(), $crate::registry::ParsedValue> {
            record.$field = *value.downcast::<$ty>()?;
            Ok(())
        }
        $crate::record::FieldAccessor::writable(
            $name,
            $crate::registry::TypeKey::of::<$ty>(),
            get,
            set,
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Person {
        name: String,
        height: i64,
        id: u64,
    }

    crate::impl_record!(Person {
        "Name" => name: String,
        "Height" => height: i64,
        #[read_only]
        "Id" => id: u64,
    });

    #[test]
    fn test_field_table_lookup() {
        let fields = Person::fields();
        assert_eq!(fields.names(), vec!["Name", "Height", "Id"]);
        assert_eq!(fields.len(), 3);

        let height = fields.get("Height").unwrap();
        assert_eq!(height.key(), TypeKey::of::<i64>());
        assert!(height.is_writable());

        assert!(!fields.get("Id").unwrap().is_writable());
        assert!(fields.get("Age").is_none());
        assert!(fields.get("height").is_none());
    }

    #[test]
    fn test_field_table_built_once() {
        assert!(std::ptr::eq(Person::fields(), Person::fields()));
    }

    #[test]
    fn test_getter_and_setter() {
        let fields = Person::fields();
        let mut person = Person::default();

        let set = fields.get("Name").unwrap().setter().unwrap();
        set(&mut person, Box::new("John".to_string())).unwrap();
        assert_eq!(person.name, "John");

        let value = fields.get("Name").unwrap().get(&person);
        assert_eq!(value.downcast_ref::<String>().unwrap(), "John");
    }

    #[test]
    fn test_setter_rejects_wrong_type() {
        let fields = Person::fields();
        let mut person = Person::default();

        let set = fields.get("Height").unwrap().setter().unwrap();
        let rejected = set(&mut person, Box::new("tall".to_string())).unwrap_err();
        assert!(rejected.downcast_ref::<String>().is_some());
        assert_eq!(person.height, 0);
    }

    #[test]
    fn test_record_name() {
        assert_eq!(record_name::<Person>(), "Person");
    }
}
