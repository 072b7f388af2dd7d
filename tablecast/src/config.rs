//! Configuration for table normalization and the default converters.

use serde::{Deserialize, Serialize};

use crate::defaults::TimeLayout;
use crate::errors::ConfigError;

/// How a key/value table treats a key that appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// The last occurrence's value wins; the key keeps its first position.
    #[default]
    LastWins,
    /// A repeated key is a structural error.
    Reject,
}

/// Settings shared by [`crate::Assist`] and [`crate::ConversionRegistry::from_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Duplicate key handling for key/value tables and row headers.
    #[serde(default)]
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Raw cell text that stands for an absent optional value.
    #[serde(default = "default_nil_marker")]
    pub nil_marker: String,
    /// Timestamp layouts tried in order by the default timestamp parser.
    #[serde(default = "default_time_layouts")]
    pub time_layouts: Vec<TimeLayout>,
}

fn default_nil_marker() -> String {
    crate::defaults::NIL_MARKER.to_string()
}

fn default_time_layouts() -> Vec<TimeLayout> {
    TimeLayout::defaults()
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::default(),
            nil_marker: default_nil_marker(),
            time_layouts: default_time_layouts(),
        }
    }
}

impl AssistConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nil_marker.is_empty() {
            return Err(ConfigError::Invalid {
                field: "nil_marker",
                reason: "must not be empty".to_string(),
            });
        }
        if self.time_layouts.is_empty() {
            return Err(ConfigError::Invalid {
                field: "time_layouts",
                reason: "at least one layout is required".to_string(),
            });
        }
        Ok(())
    }

    /// Sets the duplicate key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Sets the nil marker.
    #[must_use]
    pub fn with_nil_marker(mut self, marker: impl Into<String>) -> Self {
        self.nil_marker = marker.into();
        self
    }

    /// Appends a timestamp layout after the existing ones.
    #[must_use]
    pub fn with_time_layout(mut self, layout: TimeLayout) -> Self {
        self.time_layouts.push(layout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistConfig::default();
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::LastWins);
        assert_eq!(config.nil_marker, "N/A");
        assert_eq!(config.time_layouts, vec![TimeLayout::Rfc2822, TimeLayout::Rfc3339]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = AssistConfig::from_json(r#"{"duplicate_keys": "reject"}"#).unwrap();
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Reject);
        assert_eq!(config.nil_marker, "N/A");
    }

    #[test]
    fn test_from_json_time_layouts() {
        let config = AssistConfig::from_json(
            r#"{"nil_marker": "-", "time_layouts": ["rfc3339", {"format": "%d/%m/%Y"}]}"#,
        )
        .unwrap();

        assert_eq!(config.nil_marker, "-");
        assert_eq!(
            config.time_layouts,
            vec![TimeLayout::Rfc3339, TimeLayout::Format("%d/%m/%Y".to_string())]
        );
    }

    #[test]
    fn test_from_json_rejects_empty_marker() {
        let err = AssistConfig::from_json(r#"{"nil_marker": ""}"#).unwrap_err();
        assert!(err.to_string().contains("nil_marker"));
    }

    #[test]
    fn test_from_json_rejects_empty_layouts() {
        let err = AssistConfig::from_json(r#"{"time_layouts": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "time_layouts", .. }));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = AssistConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_builder() {
        let config = AssistConfig::new()
            .with_duplicate_keys(DuplicateKeyPolicy::Reject)
            .with_nil_marker("nil")
            .with_time_layout(TimeLayout::Format("%Y-%m-%d".to_string()));

        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Reject);
        assert_eq!(config.nil_marker, "nil");
        assert_eq!(config.time_layouts.len(), 3);
    }
}
