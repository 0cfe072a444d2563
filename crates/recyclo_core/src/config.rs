//! # Pool Configuration
//!
//! Sizing for pools and pooled collections, loaded once at startup from TOML.
//!
//! ```toml
//! initial_capacity = 256
//! prewarm = 128
//! max_free = 1024
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, CollectionResult};

/// Sizing for a pool and the collections bound to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Capacity hint for free lists and collections.
    pub initial_capacity: usize,
    /// Instances constructed up front so the first frames do not allocate.
    pub prewarm: usize,
    /// Upper bound on retained free instances. `None` keeps every release.
    pub max_free: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            prewarm: 0,
            max_free: None,
        }
    }
}

impl PoolConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] on a parse error, an unknown
    /// key, or a failed [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> CollectionResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CollectionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Io`] if the file cannot be read, otherwise
    /// the errors of [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> CollectionResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| CollectionError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks that the values are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] if `prewarm` exceeds `max_free`.
    pub fn validate(&self) -> CollectionResult<()> {
        if let Some(max_free) = self.max_free {
            if self.prewarm > max_free {
                return Err(CollectionError::InvalidConfig(format!(
                    "prewarm ({}) exceeds max_free ({max_free})",
                    self.prewarm
                )));
            }
        }
        Ok(())
    }
}
