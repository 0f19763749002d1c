//! Configuration types for loading NCL documents.
//!
//! This module provides configuration structures that control how documents
//! are built and checked. All types implement [`serde::Deserialize`] for
//! loading from TOML text.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining model and validation settings.
//! - [`ModelConfig`] - Container bookkeeping options of the object model.
//! - [`ValidationConfig`] - Whether and how strictly documents are validated on load.
//!
//! # Example
//!
//! ```
//! # use ncl::config::AppConfig;
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [model]
//!     detach_on_add = false
//!
//!     [validation]
//!     deny_warnings = true
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(!config.model().detach_on_add());
//! assert!(config.validation().on_load());
//! assert!(config.validation().deny_warnings());
//! ```

use serde::Deserialize;

pub use ncl_core::config::ModelConfig;

use crate::NclError;

/// Top-level application configuration.
///
/// Groups [`ModelConfig`] and [`ValidationConfig`] into a single
/// configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Object model section.
    #[serde(default)]
    model: ModelConfig,

    /// Validation section.
    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified model and validation configurations.
    ///
    /// # Arguments
    ///
    /// * `model` - Container bookkeeping options.
    /// * `validation` - Load-time validation options.
    pub fn new(model: ModelConfig, validation: ValidationConfig) -> Self {
        Self { model, validation }
    }

    /// Reads a configuration from TOML text. Missing sections and keys take
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns [`NclError::Config`] if the text is not valid TOML or does not
    /// match the configuration layout.
    pub fn from_toml_str(text: &str) -> Result<Self, NclError> {
        toml::from_str(text).map_err(|err| NclError::Config(err.to_string()))
    }

    /// Returns the object model configuration.
    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }
}

/// Load-time validation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Validate every loaded document.
    #[serde(default = "default_on_load")]
    on_load: bool,

    /// Reject documents with warnings as well as documents with errors.
    #[serde(default)]
    deny_warnings: bool,
}

fn default_on_load() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            on_load: default_on_load(),
            deny_warnings: false,
        }
    }
}

impl ValidationConfig {
    /// Creates a new [`ValidationConfig`].
    ///
    /// # Arguments
    ///
    /// * `on_load` - Whether documents are validated when loaded.
    /// * `deny_warnings` - Whether warnings fail a load like errors do.
    pub fn new(on_load: bool, deny_warnings: bool) -> Self {
        Self {
            on_load,
            deny_warnings,
        }
    }

    /// Returns whether documents are validated when loaded.
    pub fn on_load(&self) -> bool {
        self.on_load
    }

    /// Returns whether warnings fail a load.
    pub fn deny_warnings(&self) -> bool {
        self.deny_warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert!(config.model().detach_on_add());
        assert!(config.validation().on_load());
        assert!(!config.validation().deny_warnings());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert!(config.model().detach_on_add());
        assert!(config.validation().on_load());
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[validation]\non_load = \"sometimes\"").unwrap_err();

        assert!(matches!(err, NclError::Config(_)));
    }
}
