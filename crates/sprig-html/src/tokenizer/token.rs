//! Tokens produced by the tokenizer.

use core::fmt;

/// An attribute on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Decoded value, or `None` for a bare attribute such as `disabled`.
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute.
    #[must_use]
    pub const fn new(name: String, value: Option<String>) -> Self {
        Self { name, value }
    }
}

/// One lexical unit of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE name ...>`; everything after the name is skipped.
    Doctype {
        /// Lowercased doctype name, if any.
        name: Option<String>,
    },

    /// `<name attr=value ...>` or `<name ... />`.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Whether the tag ended with `/>`.
        self_closing: bool,
        /// Attributes in source order, duplicates included.
        attributes: Vec<Attribute>,
    },

    /// `</name>`. Attributes on end tags are parsed and discarded.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },

    /// `<!-- data -->`, or a malformed declaration treated as one.
    Comment {
        /// Comment text.
        data: String,
    },

    /// A single character of text, after character reference decoding.
    Character {
        /// The character.
        data: char,
    },

    /// End of input.
    EndOfFile,
}

impl Token {
    /// An empty doctype token.
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype { name: None }
    }

    /// An empty start tag token.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// An empty end tag token.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// An empty comment token.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// A character token.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Returns true for [`Token::EndOfFile`].
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    pub(crate) fn append_to_doctype_name(&mut self, c: char) {
        if let Self::Doctype { name } = self {
            name.get_or_insert_with(String::new).push(c);
        }
    }

    pub(crate) fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name } = self {
            name.push(c);
        }
    }

    pub(crate) fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    pub(crate) fn append_to_comment(&mut self, c: char) {
        if let Self::Comment { data } = self {
            data.push(c);
        }
    }

    pub(crate) fn push_str_to_comment(&mut self, s: &str) {
        if let Self::Comment { data } = self {
            data.push_str(s);
        }
    }

    pub(crate) fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), None));
        }
    }

    pub(crate) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(attribute) = self.current_attribute() {
            attribute.name.push(c);
        }
    }

    /// Mark the current attribute as having a value (possibly empty).
    pub(crate) fn begin_current_attribute_value(&mut self) {
        if let Some(attribute) = self.current_attribute() {
            attribute.value = Some(String::new());
        }
    }

    pub(crate) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some(attribute) = self.current_attribute() {
            attribute.value.get_or_insert_with(String::new).push(c);
        }
    }

    fn current_attribute(&mut self) -> Option<&mut Attribute> {
        match self {
            Self::StartTag { attributes, .. } => attributes.last_mut(),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    match &attr.value {
                        Some(value) => write!(f, " {}=\"{value}\"", attr.name)?,
                        None => write!(f, " {}", attr.name)?,
                    }
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
