//! Common utilities for the sprig markup toolkit.
//!
//! This crate provides shared infrastructure used by every sprig component:
//! - **Warning System** - colored, deduplicated terminal output
//! - **Diagnostics** - structured soft-failure records that callers can capture
//! - **Configuration** - start-up options such as automatic ids and the depth ceiling

pub mod config;
pub mod diagnostic;
pub mod warning;

pub use config::{Config, ConfigError, DEFAULT_MAX_DEPTH};
pub use diagnostic::{Diagnostic, DiagnosticKind};
