//! Type-erased parse and compare function handles.

use std::any::Any;
use std::sync::Arc;

use super::TypeKey;
use crate::errors::ConvertError;

/// A parsed value on its way into a record field.
pub type ParsedValue = Box<dyn Any + Send>;

/// Parses a raw table cell into a value of the registered type.
pub type ParseFn = Arc<dyn Fn(&str) -> Result<ParsedValue, ConvertError> + Send + Sync>;

/// Checks a raw table cell against an actual field value.
///
/// Returns `Ok(())` on a match and a description of the difference otherwise.
pub type CompareFn = Arc<dyn Fn(&str, &dyn Any) -> Result<(), ConvertError> + Send + Sync>;

/// Adapts a typed parser into a [`ParseFn`].
pub fn parser_fn<T, F>(parse: F) -> ParseFn
where
    T: Any + Send,
    F: Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
{
    Arc::new(move |raw: &str| parse(raw).map(|value| Box::new(value) as ParsedValue))
}

/// Adapts a typed comparer into a [`CompareFn`].
///
/// The returned function reports `value is not a <type>` when it is handed
/// a value of a different type.
pub fn comparer_fn<T, F>(compare: F) -> CompareFn
where
    T: Any,
    F: Fn(&str, &T) -> Result<(), ConvertError> + Send + Sync + 'static,
{
    let key = TypeKey::of::<T>();
    Arc::new(move |raw: &str, actual: &dyn Any| match actual.downcast_ref::<T>() {
        Some(actual) => compare(raw, actual),
        None => Err(ConvertError::new(format!("value is not a {key}"))),
    })
}
