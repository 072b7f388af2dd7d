//! Default converters and the helpers used to register them.
//!
//! The default set covers text, integers, floats, booleans and timestamps,
//! each paired with an `Option<T>` variant where the nil marker (`N/A` by
//! default) stands for `None`.

mod comparers;
mod parsers;
mod time;

pub use comparers::{
    compare_bool, compare_f32, compare_f64, compare_i32, compare_i64, compare_optional,
    compare_string,
};
pub use parsers::{
    parse_bool, parse_f32, parse_f64, parse_i32, parse_i64, parse_optional, parse_string,
};
pub use time::{compare_timestamp, parse_timestamp, TimeLayout};

use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

use crate::config::AssistConfig;
use crate::errors::ConvertError;
use crate::registry::{comparer_fn, parser_fn, ConversionRegistry};

/// Raw cell text that stands for an absent optional value by default.
pub const NIL_MARKER: &str = "N/A";

/// Registers every default converter on `registry`.
pub fn register_defaults(registry: &ConversionRegistry, config: &AssistConfig) {
    let nil_marker: Arc<str> = Arc::from(config.nil_marker.as_str());

    register_with_optional(registry, &nil_marker, parse_string, compare_string);
    register_with_optional(registry, &nil_marker, parse_i64, compare_i64);
    register_with_optional(registry, &nil_marker, parse_i32, compare_i32);
    register_with_optional(registry, &nil_marker, parse_f32, compare_f32);
    register_with_optional(registry, &nil_marker, parse_f64, compare_f64);
    register_with_optional(registry, &nil_marker, parse_bool, compare_bool);

    let layouts: Arc<[TimeLayout]> = Arc::from(config.time_layouts.clone());
    let parse_layouts = Arc::clone(&layouts);
    register_with_optional(
        registry,
        &nil_marker,
        move |raw: &str| parse_timestamp(raw, &parse_layouts),
        move |raw: &str, actual: &DateTime<Utc>| compare_timestamp(raw, actual, &layouts),
    );

    debug!(
        nil_marker = %nil_marker,
        layouts = config.time_layouts.len(),
        "registered default converters"
    );
}

/// Registers a parser/comparer pair for `T` and the matching pair for
/// `Option<T>`, where `nil_marker` stands for `None`.
pub fn register_with_optional<T, P, C>(
    registry: &ConversionRegistry,
    nil_marker: &Arc<str>,
    parse: P,
    compare: C,
) where
    T: Any + Send + Display,
    P: Fn(&str) -> Result<T, ConvertError> + Clone + Send + Sync + 'static,
    C: Fn(&str, &T) -> Result<(), ConvertError> + Clone + Send + Sync + 'static,
{
    registry.register::<T>(parser_fn(parse.clone()), comparer_fn(compare.clone()));

    let marker = Arc::clone(nil_marker);
    let optional_parser = parser_fn(move |raw: &str| parse_optional(raw, &marker, &parse));
    let marker = Arc::clone(nil_marker);
    let optional_comparer = comparer_fn(move |raw: &str, actual: &Option<T>| {
        compare_optional(raw, actual.as_ref(), &marker, &compare)
    });
    registry.register::<Option<T>>(optional_parser, optional_comparer);
}
