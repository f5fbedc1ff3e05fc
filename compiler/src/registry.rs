//! Class registry: type identity to builder.
//!
//! A document reader looks up each record's declared type here and calls the
//! [`Builder`] to get a default-initialized instance of the right class.

use std::collections::BTreeMap;
use std::sync::Arc;

use ontoforge_query::IDENTITY;
use thiserror::Error;

use crate::class::CompiledClass;
use crate::instance::Instance;

/// Errors raised by [`ClassRegistry`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A different class is already registered under this type URI.
    #[error("duplicate builder for type {0}")]
    DuplicateType(String),

    /// No builder is registered for this type URI.
    #[error("no builder registered for type {0}")]
    UnknownType(String),

    /// An owned child transitively owns its own parent.
    #[error("ownership cycle through {0}")]
    OwnershipCycle(String),
}

/// Constructs instances of one compiled class with every required slot set
/// to the missing sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    class: Arc<CompiledClass>,
    args: Vec<String>,
}

impl Builder {
    /// Creates the builder for `class` from its required-argument list.
    #[must_use]
    pub fn new(class: Arc<CompiledClass>) -> Self {
        let args = class
            .required
            .iter()
            .filter(|name| name.as_str() != IDENTITY)
            .cloned()
            .collect();
        Self { class, args }
    }

    /// The class this builder instantiates.
    #[must_use]
    pub fn class(&self) -> &Arc<CompiledClass> {
        &self.class
    }

    /// Field names defaulted to the missing sentinel.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Instantiates the class as `identity`, typed as `type_uri`.
    #[must_use]
    pub fn build(&self, identity: &str, type_uri: &str) -> Instance {
        let mut instance = Instance::with_type(Arc::clone(&self.class), identity, type_uri);
        for arg in &self.args {
            // A required property whose datatype was skipped has no slot.
            instance.mark_missing(arg);
        }
        instance
    }
}

/// Mapping from type URI to [`Builder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRegistry {
    builders: BTreeMap<String, Builder>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `builder` under its class URI.
    ///
    /// Registering the same class twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateType`] if a different class already
    /// holds the URI.
    pub fn register(&mut self, builder: Builder) -> Result<(), RegistryError> {
        let uri = builder.class.uri.clone();
        match self.builders.get(&uri) {
            Some(existing) if existing.class == builder.class => Ok(()),
            Some(_) => Err(RegistryError::DuplicateType(uri)),
            None => {
                self.builders.insert(uri, builder);
                Ok(())
            }
        }
    }

    /// Moves every builder of `other` into this registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError::DuplicateType`]; builders before it
    /// have already been moved.
    pub fn absorb(&mut self, other: ClassRegistry) -> Result<(), RegistryError> {
        for builder in other.builders.into_values() {
            self.register(builder)?;
        }
        Ok(())
    }

    /// The builder for `type_uri`.
    #[must_use]
    pub fn get(&self, type_uri: &str) -> Option<&Builder> {
        self.builders.get(type_uri)
    }

    /// True if a builder is registered for `type_uri`.
    #[must_use]
    pub fn contains(&self, type_uri: &str) -> bool {
        self.builders.contains_key(type_uri)
    }

    /// Looks up the builder for `type_uri` and instantiates it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] if nothing is registered.
    pub fn build(&self, identity: &str, type_uri: &str) -> Result<Instance, RegistryError> {
        self.get(type_uri)
            .map(|builder| builder.build(identity, type_uri))
            .ok_or_else(|| RegistryError::UnknownType(type_uri.to_owned()))
    }

    /// Registered type URIs, sorted.
    pub fn type_uris(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Number of registered builders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Drops every builder.
    pub fn clear(&mut self) {
        self.builders.clear();
    }
}
