//! Configuration of the object model.
//!
//! [`ModelConfig`] implements [`serde::Deserialize`] so it can be embedded
//! in a larger application configuration.

use serde::Deserialize;

/// Options controlling container bookkeeping.
///
/// # Example
///
/// ```
/// # use ncl_core::config::ModelConfig;
/// let config = ModelConfig::default();
/// assert!(config.detach_on_add());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Remove a child from its previous container when it is added to
    /// another one. When `false`, adding only overwrites the parent link and
    /// the previous container keeps listing the child.
    #[serde(default = "default_detach_on_add")]
    detach_on_add: bool,
}

fn default_detach_on_add() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            detach_on_add: default_detach_on_add(),
        }
    }
}

impl ModelConfig {
    /// Creates a new [`ModelConfig`].
    ///
    /// # Arguments
    ///
    /// * `detach_on_add` - Whether adding a child detaches it from its
    ///   previous container.
    pub fn new(detach_on_add: bool) -> Self {
        Self { detach_on_add }
    }

    /// Returns whether adding a child detaches it from its previous
    /// container.
    pub fn detach_on_add(&self) -> bool {
        self.detach_on_add
    }
}
