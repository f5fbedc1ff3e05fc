//! Compiled modules: the symbol table of one ontology namespace.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::class::CompiledClass;

/// Every class compiled for one namespace, keyed by unqualified name and
/// kept in compilation order (superclasses before subclasses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledModule {
    name: String,
    namespace: String,
    classes: Vec<Arc<CompiledClass>>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl CompiledModule {
    /// Creates an empty symbol table.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            classes: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace whose classes this module holds.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Looks up a class by unqualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<CompiledClass>> {
        self.by_name.get(name).and_then(|&i| self.classes.get(i))
    }

    /// Looks up a class by URI.
    #[must_use]
    pub fn get_by_uri(&self, uri: &str) -> Option<&Arc<CompiledClass>> {
        self.classes.iter().find(|c| c.uri == uri)
    }

    /// True if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Binds a class under its unqualified name. Returns the class already
    /// bound to that name, leaving the table unchanged, if there is one.
    pub fn insert(&mut self, class: Arc<CompiledClass>) -> Option<Arc<CompiledClass>> {
        if let Some(existing) = self.get(&class.name) {
            return Some(Arc::clone(existing));
        }
        self.by_name.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        None
    }

    /// Classes in compilation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledClass>> {
        self.classes.iter()
    }

    /// Unqualified class names in compilation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if no class has been compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
