//! The runner-facing entry point combining normalization with building and
//! comparing.
//!
//! An [`Assist`] is cheap to clone: clones share one registry, so
//! converters registered through any clone are visible to all of them.

use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use crate::builder;
use crate::comparator;
use crate::config::AssistConfig;
use crate::errors::{AssistError, ConfigError};
use crate::record::{DynamicRecord, Record};
use crate::registry::ConversionRegistry;
use crate::table::{to_key_value_table_with, to_row_table_with, KeyValueTable, RowTable, Table};

/// Builds records from tables and checks records against tables.
#[derive(Debug, Clone)]
pub struct Assist {
    registry: Arc<ConversionRegistry>,
    config: AssistConfig,
}

impl Default for Assist {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Assist {
    /// Creates an assistant with an empty registry and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Arc::new(ConversionRegistry::new()), AssistConfig::default())
    }

    /// Creates an assistant with the default converters and settings.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_config(AssistConfig::default())
    }

    /// Creates an assistant whose default converters honor `config`.
    ///
    /// The config is used as given and is not validated. An empty
    /// `nil_marker` or `time_layouts` leaves the optional or timestamp
    /// converters unable to match anything; use [`Assist::try_from_config`]
    /// to reject such a config up front.
    #[must_use]
    pub fn from_config(config: AssistConfig) -> Self {
        let registry = Arc::new(ConversionRegistry::from_config(&config));
        Self::with_registry(registry, config)
    }

    /// Validates `config`, then creates an assistant like
    /// [`Assist::from_config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a setting is unusable.
    pub fn try_from_config(config: AssistConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Creates an assistant over an existing, possibly shared, registry.
    ///
    /// Only `config.duplicate_keys` takes effect here. The registry's
    /// converters were built when it was created, so `config.nil_marker`
    /// and `config.time_layouts` are not applied to them; build the
    /// registry with [`ConversionRegistry::from_config`] to change those.
    #[must_use]
    pub fn with_registry(registry: Arc<ConversionRegistry>, config: AssistConfig) -> Self {
        debug!(
            duplicate_keys = ?config.duplicate_keys,
            nil_marker = %config.nil_marker,
            "created assist"
        );
        Self { registry, config }
    }

    /// The converter registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConversionRegistry> {
        &self.registry
    }

    /// The active settings.
    #[must_use]
    pub const fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Normalizes a two-column table using the configured duplicate policy.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Table`] if the table is malformed.
    pub fn parse_map(&self, table: &Table) -> Result<KeyValueTable, AssistError> {
        Ok(to_key_value_table_with(table, self.config.duplicate_keys)?)
    }

    /// Normalizes a header-plus-rows table using the configured duplicate
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Table`] if the table is malformed.
    pub fn parse_rows(&self, table: &Table) -> Result<RowTable, AssistError> {
        Ok(to_row_table_with(table, self.config.duplicate_keys)?)
    }

    /// Builds one `R` from a two-column table.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Table`] for a malformed table and
    /// [`AssistError::Build`] for field failures.
    pub fn create_instance<R: Record>(&self, table: &Table) -> Result<R, AssistError> {
        builder::build(&self.registry, &self.parse_map(table)?)
    }

    /// Builds one `R` per data row of a header-plus-rows table.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Table`] for a malformed table and
    /// [`AssistError::BuildAll`] for field failures.
    pub fn create_list<R: Record>(&self, table: &Table) -> Result<Vec<R>, AssistError> {
        builder::build_all(&self.registry, &self.parse_rows(table)?)
    }

    /// Checks one record against a two-column table.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Table`] for a malformed table and
    /// [`AssistError::Compare`] for mismatches.
    pub fn compare_to_instance<R: Record>(
        &self,
        actual: &R,
        table: &Table,
    ) -> Result<(), AssistError> {
        comparator::compare(&self.registry, actual, &self.parse_map(table)?)
    }

    /// Checks a sequence of `R` against a header-plus-rows table.
    ///
    /// `actual` is checked for being a sequence before the table is read.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::NotASequence`], [`AssistError::Table`],
    /// [`AssistError::LengthMismatch`] or [`AssistError::CompareAll`].
    pub fn compare_to_list<R: Record>(
        &self,
        actual: &dyn Any,
        table: &Table,
    ) -> Result<(), AssistError> {
        if comparator::sequence_of::<R>(actual).is_none() {
            return Err(comparator::not_a_sequence::<R>());
        }
        comparator::compare_all::<R>(&self.registry, actual, &self.parse_rows(table)?)
    }

    /// Checks a dynamic record against a two-column table.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Table`] for a malformed table and
    /// [`AssistError::Compare`] for mismatches.
    pub fn compare_to_map(
        &self,
        actual: &DynamicRecord,
        table: &Table,
    ) -> Result<(), AssistError> {
        comparator::compare_map(&self.registry, actual, &self.parse_map(table)?)
    }
}
