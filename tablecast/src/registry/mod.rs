//! Type-keyed registry of parse and compare functions.
//!
//! A [`ConversionRegistry`] is normally created once per test run, shared
//! through an `Arc`, and extended by individual suites. Lookups take a shared
//! lock and clone the function handle out, so converters run without holding
//! the lock.

mod functions;
mod key;

pub use functions::{comparer_fn, parser_fn, CompareFn, ParseFn, ParsedValue};
pub use key::{DynamicValue, TypeKey};

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::config::AssistConfig;
use crate::defaults;

#[derive(Default)]
struct Converters {
    parsers: HashMap<TypeKey, ParseFn>,
    comparers: HashMap<TypeKey, CompareFn>,
}

/// Registry mapping field types to their parse and compare functions.
#[derive(Default)]
pub struct ConversionRegistry {
    converters: RwLock<Converters>,
}

impl ConversionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the default converters.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_config(&AssistConfig::default())
    }

    /// Creates a registry seeded with the default converters, using the
    /// nil marker and time layouts from `config`.
    ///
    /// `config` is not validated; call [`AssistConfig::validate`] first if
    /// it was not loaded through [`AssistConfig::from_json`].
    #[must_use]
    pub fn from_config(config: &AssistConfig) -> Self {
        let registry = Self::new();
        defaults::register_defaults(&registry, config);
        registry
    }

    /// Associates a parser with a type, replacing any previous one.
    pub fn register_parser(&self, key: TypeKey, parser: ParseFn) {
        self.converters.write().parsers.insert(key, parser);
        debug!(type_name = %key, "registered parser");
    }

    /// Associates a comparer with a type, replacing any previous one.
    pub fn register_comparer(&self, key: TypeKey, comparer: CompareFn) {
        self.converters.write().comparers.insert(key, comparer);
        debug!(type_name = %key, "registered comparer");
    }

    /// Registers a parser and a comparer for `T` under a single lock.
    pub fn register<T: Any>(&self, parser: ParseFn, comparer: CompareFn) {
        let key = TypeKey::of::<T>();
        {
            let mut converters = self.converters.write();
            converters.parsers.insert(key, parser);
            converters.comparers.insert(key, comparer);
        }
        debug!(type_name = %key, "registered parser and comparer");
    }

    /// Removes the parser for a type. Does nothing if none is registered.
    pub fn remove_parser(&self, key: TypeKey) {
        if self.converters.write().parsers.remove(&key).is_some() {
            debug!(type_name = %key, "removed parser");
        }
    }

    /// Removes the comparer for a type. Does nothing if none is registered.
    pub fn remove_comparer(&self, key: TypeKey) {
        if self.converters.write().comparers.remove(&key).is_some() {
            debug!(type_name = %key, "removed comparer");
        }
    }

    /// Looks up the parser for a type.
    #[must_use]
    pub fn find_parser(&self, key: TypeKey) -> Option<ParseFn> {
        self.converters.read().parsers.get(&key).cloned()
    }

    /// Looks up the comparer for a type.
    #[must_use]
    pub fn find_comparer(&self, key: TypeKey) -> Option<CompareFn> {
        self.converters.read().comparers.get(&key).cloned()
    }

    /// Returns true if a parser is registered for the type.
    #[must_use]
    pub fn has_parser(&self, key: TypeKey) -> bool {
        self.converters.read().parsers.contains_key(&key)
    }

    /// Returns true if a comparer is registered for the type.
    #[must_use]
    pub fn has_comparer(&self, key: TypeKey) -> bool {
        self.converters.read().comparers.contains_key(&key)
    }

    /// Short names of all types with a parser, sorted.
    #[must_use]
    pub fn registered_parsers(&self) -> Vec<String> {
        sorted_names(self.converters.read().parsers.keys())
    }

    /// Short names of all types with a comparer, sorted.
    #[must_use]
    pub fn registered_comparers(&self) -> Vec<String> {
        sorted_names(self.converters.read().comparers.keys())
    }

    /// Remove all registered converters.
    pub fn clear(&self) {
        let mut converters = self.converters.write();
        converters.parsers.clear();
        converters.comparers.clear();
    }
}

fn sorted_names<'a>(keys: impl Iterator<Item = &'a TypeKey>) -> Vec<String> {
    let mut names: Vec<String> = keys.map(TypeKey::short_name).collect();
    names.sort();
    names
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("parsers", &self.registered_parsers())
            .field("comparers", &self.registered_comparers())
            .finish()
    }
}
