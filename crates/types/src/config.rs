//! Configuration types for the voter registry.
//!
//! Hosts deserialize [`RegistryConfig`] from their own config files and
//! validate it before constructing a registry. Validation is available both
//! at build time (fallible builder) and post-deserialization via
//! [`RegistryConfig::validate`].

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Configuration validation error.
///
/// Returned when a configuration value is outside its valid range.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[snafu(display("invalid config: {message}"))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Default bound on batch operation length.
pub const DEFAULT_MAX_BATCH_LEN: usize = 100;

fn default_max_batch_len() -> usize {
    DEFAULT_MAX_BATCH_LEN
}

/// Registry configuration.
///
/// # Validation Rules
///
/// - `max_batch_len` must be >= 1
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Upper bound on the number of identities a single batch operation may
    /// carry. Over-length batches fail their up-front gate check with
    /// `BatchLimitExceeded` before any element is processed.
    #[serde(default = "default_max_batch_len")]
    #[builder(default = DEFAULT_MAX_BATCH_LEN)]
    pub max_batch_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_batch_len: DEFAULT_MAX_BATCH_LEN }
    }
}

impl RegistryConfig {
    /// Validates configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_len == 0 {
            return Err(ConfigError::Validation {
                message: "max_batch_len must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
