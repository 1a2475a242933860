//! Inline style handling for sprig.
//!
//! # Scope
//!
//! This crate implements:
//! - **Declaration parsing** of a `style` attribute into an ordered
//!   property map, keeping `;` inside function calls such as
//!   `url(data:image/png;base64,...)` intact
//! - **Serialization** of the map back into attribute text
//! - **Value sanitizing** against script and rule injection
//!
//! # Not Yet Implemented
//!
//! - Quoted strings containing unbalanced parentheses
//! - `!important` handling (kept as part of the value)

/// Style declaration parsing and formatting.
pub mod declaration;
/// Injection denylist for style values.
pub mod sanitize;

pub use declaration::{StyleMap, format_style, parse_style};
pub use sanitize::{StyleError, check_value, is_safe_value};
