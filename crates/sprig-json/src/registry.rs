use core::fmt;

use indexmap::IndexMap;
use sprig_dom::attributes::is_valid_tag;
use sprig_dom::tags::{self, DOCUMENT_TAG, FRAGMENT_TAG};
use sprig_dom::{DomError, NO_ATTRIBUTES, Node};

use crate::error::RegistryError;
use crate::serializer::Serializer;

/// Builds the concrete node for one tag when a tree is decoded.
///
/// Any `Fn() -> Result<Node, DomError>` is a factory. Implement the trait
/// directly for tag types that can only be built once the tag and the
/// self-closing flag are known.
pub trait TagFactory: Send + Sync {
    /// Build a node with the type's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the type cannot be built without arguments; the
    /// decoder then falls back to [`TagFactory::construct_tagged`].
    fn construct(&self) -> Result<Node, DomError>;

    /// Build a node for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidTag`] if `tag` is not a valid name.
    fn construct_tagged(&self, tag: &str, self_closing: bool) -> Result<Node, DomError> {
        Node::builder(tag).self_closing(self_closing).build()
    }
}

impl<F> TagFactory for F
where
    F: Fn() -> Result<Node, DomError> + Send + Sync,
{
    fn construct(&self) -> Result<Node, DomError> {
        self()
    }
}

/// Maps tag names to the factories used to rebuild them.
///
/// The registry is append-only: it is filled during start-up, then shared
/// by reference with every [`Serializer`] that decodes trees. The
/// `fragment` tag is reserved and always decodes to a fragment.
#[derive(Default)]
pub struct TagRegistry {
    factories: IndexMap<String, Box<dyn TagFactory>>,
}

impl TagRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the document root (`html`, with its doctype
    /// prefix).
    #[must_use]
    pub fn with_builtin_tags() -> Self {
        let mut registry = Self::new();
        let _ = registry
            .factories
            .insert(DOCUMENT_TAG.to_string(), Box::new(|| tags::document((), NO_ATTRIBUTES)));
        registry
    }

    /// Register the factory for `tag`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Reserved`] for the fragment tag
    /// - [`RegistryError::InvalidTag`] if `tag` is not a valid element name
    /// - [`RegistryError::Duplicate`] if `tag` already has a factory
    pub fn register(
        &mut self,
        tag: &str,
        factory: impl TagFactory + 'static,
    ) -> Result<&mut Self, RegistryError> {
        if tag == FRAGMENT_TAG {
            return Err(RegistryError::Reserved(tag.to_string()));
        }
        if !is_valid_tag(tag) {
            return Err(RegistryError::InvalidTag(tag.to_string()));
        }
        if self.factories.contains_key(tag) {
            return Err(RegistryError::Duplicate(tag.to_string()));
        }
        let _ = self.factories.insert(tag.to_string(), Box::new(factory));
        Ok(self)
    }

    /// The factory registered for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&dyn TagFactory> {
        self.factories.get(tag).map(Box::as_ref)
    }

    /// Returns true if `tag` has a factory.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// A serializer that decodes through this registry.
    #[must_use]
    pub fn serializer(&self) -> Serializer<'_> {
        Serializer::new().with_registry(self)
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
