//! Denylist for inline style values.
//!
//! Inline styles end up inside a quoted `style="..."` attribute, so a value
//! must not be able to run script, load a `data:` payload, or break out of
//! the declaration into a new rule or element.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Matches, case-insensitively:
/// - `javascript:` anywhere
/// - `expression(` (legacy IE dynamic properties)
/// - `url(` whose payload starts with `data:` or `javascript:`, quoted or not
/// - `{`, `}`, `<`, `>`
/// - comment delimiters `/*` and `*/`
/// - backslash hex escapes such as `\6a`
static DANGEROUS_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)javascript:|expression\s*\(|url\s*\(\s*["']?\s*data:|url\s*\(\s*["']?\s*javascript:|[{}<>]|/\*|\*/|\\[0-9a-f]"#,
    )
    .expect("style denylist pattern is valid")
});

/// Error returned when a style value is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StyleError {
    /// The value matched the injection denylist.
    #[error(
        "CSS value for '{property}' contains potentially dangerous content: {value:?}; values cannot contain javascript:, expression() or other injection patterns"
    )]
    UnsafeValue {
        /// Property the value was meant for.
        property: String,
        /// The rejected value.
        value: String,
    },
}

/// Returns true if `value` contains none of the denylisted patterns.
#[must_use]
pub fn is_safe_value(value: &str) -> bool {
    !DANGEROUS_VALUE.is_match(value)
}

/// Validate a value destined for `property`.
///
/// # Errors
///
/// Returns [`StyleError::UnsafeValue`] if the value matches the denylist.
pub fn check_value(property: &str, value: &str) -> Result<(), StyleError> {
    if is_safe_value(value) {
        Ok(())
    } else {
        Err(StyleError::UnsafeValue {
            property: property.to_string(),
            value: value.to_string(),
        })
    }
}
