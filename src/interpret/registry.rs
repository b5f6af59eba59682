//! Name-keyed handler table for custom tags
//!
//! Applications register handlers for their own tag names (and may shadow
//! the built-in `color`, `tooltip` or `sent-text` handling). The interpreter
//! consults the table before any built-in, so registration is the only
//! extension point: nothing is evaluated dynamically.

use super::{Interpreter, Primitive};
use crate::tags::Tag;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Renders one tag into a primitive
///
/// The interpreter is passed back in so handlers can render their children
/// with the same registry, palette and aliases.
pub trait TagHandler: Send + Sync {
    fn render(&self, tag: &Tag, interpreter: &Interpreter<'_>) -> Primitive;
}

impl<F> TagHandler for F
where
    F: Fn(&Tag, &Interpreter<'_>) -> Primitive + Send + Sync,
{
    fn render(&self, tag: &Tag, interpreter: &Interpreter<'_>) -> Primitive {
        self(tag, interpreter)
    }
}

/// Registered tag handlers, keyed by tag name
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn TagHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same name
    pub fn register(&mut self, name: impl Into<String>, handler: impl TagHandler + 'static) {
        let name = name.into();
        if self
            .handlers
            .insert(name.clone(), Arc::new(handler))
            .is_some()
        {
            tracing::debug!("Replaced handler for tag {:?}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn TagHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(tag: &Tag, _: &Interpreter<'_>) -> Primitive {
        Primitive::Text(tag.text_content().to_uppercase())
    }

    fn hush(_: &Tag, _: &Interpreter<'_>) -> Primitive {
        Primitive::Text(String::new())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        assert_eq!(registry.len(), 0);

        registry.register("shout", shout);
        registry.register("whisper", hush);

        assert_eq!(registry.len(), 2);
        assert!(registry.get("shout").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["shout", "whisper"]);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = HandlerRegistry::new();
        registry.register("shout", shout);
        registry.register("shout", hush);
        assert_eq!(registry.len(), 1);
    }
}
