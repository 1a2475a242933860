//! Start-up configuration.
//!
//! The configuration is read once by the host (usually from the process
//! environment) and then passed explicitly to node builders and parsers.

use thiserror::Error;

/// Default ceiling for recursive traversal, rendering and (de)serialization.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Environment variable enabling automatic `id` attributes.
pub const GENERATE_IDS_VAR: &str = "SPRIG_GENERATE_IDS";

/// Environment variable overriding the depth ceiling.
pub const MAX_DEPTH_VAR: &str = "SPRIG_MAX_DEPTH";

/// Error produced when the environment holds an unusable value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The depth ceiling is not a positive integer.
    #[error("{MAX_DEPTH_VAR} must be a positive integer, got {0:?}")]
    InvalidMaxDepth(String),
}

/// Options shared by every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Give every newly built node a short random `id` when it has none.
    pub generate_ids: bool,
    /// Ceiling for recursive operations.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generate_ids: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Any non-empty value of `SPRIG_GENERATE_IDS` turns automatic ids on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxDepth`] if `SPRIG_MAX_DEPTH` is set but
    /// is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let generate_ids = lookup(GENERATE_IDS_VAR).is_some_and(|v| !v.is_empty());
        let max_depth = match lookup(MAX_DEPTH_VAR) {
            None => DEFAULT_MAX_DEPTH,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => return Err(ConfigError::InvalidMaxDepth(raw)),
            },
        };
        Ok(Self {
            generate_ids,
            max_depth,
        })
    }

    /// Builder-style override of [`Config::generate_ids`].
    #[must_use]
    pub const fn with_generate_ids(mut self, generate_ids: bool) -> Self {
        self.generate_ids = generate_ids;
        self
    }

    /// Builder-style override of [`Config::max_depth`].
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
