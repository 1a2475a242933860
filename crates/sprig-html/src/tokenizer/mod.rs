//! HTML tokenizer module.
//!
//! A forgiving subset of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! from the WHATWG HTML Living Standard. It never fails: malformed markup is
//! recovered from and recorded as a [`TokenizerError`].

/// Character reference states per § 13.2.5.72.
pub mod character_reference;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Named character reference table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;
/// HTML tokenizer state machine implementation.
pub mod core;

pub use self::core::{HtmlTokenizer, TokenizerError, TokenizerState};
pub use token::{Attribute, Token};
