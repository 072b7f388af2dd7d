//! Records without a static type, keyed by field name.

use indexmap::IndexMap;

use crate::registry::DynamicValue;

/// A name-to-value map of typed values that can be compared against a
/// key/value table like any static record.
#[derive(Debug, Default)]
pub struct DynamicRecord {
    values: IndexMap<String, DynamicValue>,
}

impl DynamicRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: T)
    where
        T: std::any::Any + Send + Sync,
    {
        self.values.insert(name.into(), DynamicValue::new(value));
    }

    /// Builder form of [`DynamicRecord::insert`].
    #[must_use]
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: std::any::Any + Send + Sync,
    {
        self.insert(name, value);
        self
    }

    /// Looks up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.values.get(name)
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynamicValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeKey;

    #[test]
    fn test_dynamic_record() {
        let record = DynamicRecord::new()
            .with("Name", "John".to_string())
            .with("Height", 182_i64);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Height").unwrap().key(), TypeKey::of::<i64>());
        assert_eq!(
            record.get("Name").unwrap().downcast_ref::<String>().unwrap(),
            "John"
        );
        assert!(record.get("Age").is_none());
        assert_eq!(
            record.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["Name", "Height"]
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut record = DynamicRecord::new();
        record.insert("Height", 182_i64);
        record.insert("Height", "tall".to_string());

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Height").unwrap().key(), TypeKey::of::<String>());
    }
}
