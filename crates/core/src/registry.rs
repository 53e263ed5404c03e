//! Named-type registry
//!
//! Every conversion owns one [`TypeRegistry`]. It records the definition
//! emitted for each named type (record, enum, map tuple) so later references
//! reuse the bare name instead of emitting the type again.
//!
//! A name can be *reserved* before its body is generated. Reserved names
//! already answer `true` from [`TypeRegistry::has`], which stops recursion for
//! self-referential types.

use std::collections::{HashMap, HashSet};

use crate::error::{ConversionError, ConversionResult};

/// Keyed store of already-emitted named types
#[derive(Debug, Clone)]
pub struct TypeRegistry<D> {
    order: Vec<String>,
    definitions: HashMap<String, D>,
    pending: HashSet<String>,
}

impl<D> Default for TypeRegistry<D> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            definitions: HashMap::new(),
            pending: HashSet::new(),
        }
    }
}

impl<D> TypeRegistry<D> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the name is registered or currently being emitted
    pub fn has(&self, name: &str) -> bool {
        self.definitions.contains_key(name) || self.pending.contains(name)
    }

    /// True if the name was reserved and its definition is not yet added
    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.contains(name) && !self.definitions.contains_key(name)
    }

    /// Mark a name as being emitted
    pub fn reserve(&mut self, name: &str) {
        tracing::debug!("Reserving named type {}", name);
        self.pending.insert(name.to_string());
    }

    /// Register a definition. Re-adding a name replaces the definition but
    /// keeps its original position.
    pub fn add(&mut self, name: &str, definition: D) {
        self.pending.remove(name);
        if self.definitions.insert(name.to_string(), definition).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Look up a registered definition
    pub fn get(&self, name: &str) -> ConversionResult<&D> {
        self.definitions
            .get(name)
            .ok_or_else(|| ConversionError::UnknownRegistryEntry(name.to_string()))
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.order.clear();
        self.definitions.clear();
        self.pending.clear();
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered names in first-registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Consume the registry, returning definitions in first-registration order
    pub fn into_definitions(mut self) -> Vec<D> {
        self.order
            .iter()
            .filter_map(|name| self.definitions.remove(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut registry = TypeRegistry::new();
        assert!(!registry.has("Nested"));

        registry.add("Nested", "class Nested".to_string());
        assert!(registry.has("Nested"));
        assert_eq!(registry.get("Nested").unwrap(), "class Nested");
    }

    #[test]
    fn test_get_unknown() {
        let registry: TypeRegistry<String> = TypeRegistry::new();
        let err = registry.get("Missing").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownRegistryEntry(name) if name == "Missing"));
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut registry = TypeRegistry::new();
        registry.add("A", 1);
        registry.add("B", 2);
        registry.add("A", 3);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(registry.into_definitions(), vec![3, 2]);
    }

    #[test]
    fn test_reserve() {
        let mut registry: TypeRegistry<u8> = TypeRegistry::new();
        registry.reserve("Node");
        assert!(registry.has("Node"));
        assert!(registry.is_pending("Node"));
        assert!(registry.get("Node").is_err());

        registry.add("Node", 1);
        assert!(!registry.is_pending("Node"));
    }

    #[test]
    fn test_clear() {
        let mut registry = TypeRegistry::new();
        registry.add("A", 1);
        registry.reserve("B");
        registry.clear();

        assert!(registry.is_empty());
        assert!(!registry.has("A"));
        assert!(!registry.has("B"));
    }
}
