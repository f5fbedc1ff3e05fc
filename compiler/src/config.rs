//! Compiler configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! identified = "http://sbols.org/v3#Identified"
//! top_level = "http://sbols.org/v3#TopLevel"
//! comprises = "http://sbols.org/v3#directlyComprises"
//! construction = "best-effort"
//! base_ontologies = true
//!
//! [[external]]
//! namespace = "http://www.w3.org/ns/prov#"
//! top_level = true
//! ```

use std::path::{Path, PathBuf};

use ontoforge_graph::{in_namespace, iris::PROV, namespace_of};
use ontoforge_query::{Vocabulary, SBOL3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::class::BaseClass;

/// Errors raised while loading a [`CompilerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not match the schema.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// What to do when a keyword override cannot be stored in its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionMode {
    /// Fail construction on the first rejected value.
    Strict,
    /// Keep constructing and record the rejection as a diagnostic.
    #[default]
    BestEffort,
}

/// An imported ontology whose classes act as precompiled base types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalOntology {
    /// Namespace IRI, including the trailing `#` or `/`.
    pub namespace: String,
    /// Whether its classes behave as document-level entities.
    #[serde(default)]
    pub top_level: bool,
}

/// Compiler settings: designated roots, compositional relation, opaque
/// external ontologies and the construction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// URI of the "Identified" hierarchy root.
    pub identified: String,
    /// URI of the "TopLevel" hierarchy root.
    pub top_level: String,
    /// URI of the relation every compositional property specializes.
    pub comprises: String,
    /// Opaque external ontologies.
    pub external: Vec<ExternalOntology>,
    /// Keyword-override policy for generated constructors.
    pub construction: ConstructionMode,
    /// Seed every fresh graph with the bundled SBOL3 and PROV-O classes.
    pub base_ontologies: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            identified: format!("{SBOL3}Identified"),
            top_level: format!("{SBOL3}TopLevel"),
            comprises: format!("{SBOL3}directlyComprises"),
            external: vec![ExternalOntology {
                namespace: PROV.to_owned(),
                top_level: true,
            }],
            construction: ConstructionMode::BestEffort,
            base_ontologies: true,
        }
    }
}

impl CompilerConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// The query-engine view of this configuration.
    #[must_use]
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary {
            identified: self.identified.clone(),
            top_level: self.top_level.clone(),
            comprises: self.comprises.clone(),
            opaque_namespaces: self.external.iter().map(|e| e.namespace.clone()).collect(),
        }
    }

    /// Namespace of the hierarchy roots, whose classes the compiler treats
    /// as a precompiled base library.
    #[must_use]
    pub fn root_namespace(&self) -> Option<&str> {
        namespace_of(&self.identified)
    }

    /// The external entry covering `uri`, if any.
    #[must_use]
    pub fn external_for(&self, uri: &str) -> Option<&ExternalOntology> {
        self.external.iter().find(|e| in_namespace(uri, &e.namespace))
    }

    /// Resolves `uri` against the known base-type mapping.
    ///
    /// `is_top_level` answers for classes of the root namespace other than
    /// the two roots themselves.
    pub fn base_class(&self, uri: &str, is_top_level: impl FnOnce() -> bool) -> Option<BaseClass> {
        if uri == self.identified {
            return Some(BaseClass::new(uri, false));
        }
        if uri == self.top_level {
            return Some(BaseClass::new(uri, true));
        }
        if let Some(external) = self.external_for(uri) {
            return Some(BaseClass::new(uri, external.top_level));
        }
        match self.root_namespace() {
            Some(ns) if in_namespace(uri, ns) => Some(BaseClass::new(uri, is_top_level())),
            _ => None,
        }
    }

    /// The implicit marker type an instance carries when its superclass sits in
    /// the root namespace without being one of the roots.
    #[must_use]
    pub fn marker_for(&self, superclass: &str, top_level: bool) -> Option<&str> {
        let in_roots_ns = self
            .root_namespace()
            .is_some_and(|ns| in_namespace(superclass, ns));
        if !in_roots_ns || superclass == self.identified || superclass == self.top_level {
            return None;
        }
        Some(if top_level {
            &self.top_level
        } else {
            &self.identified
        })
    }
}
