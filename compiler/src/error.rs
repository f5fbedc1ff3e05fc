//! Compilation failures.
//!
//! Every error aborts compilation of the whole namespace; nothing is
//! committed to the context when one is raised.

use ontoforge_graph::GraphError;
use ontoforge_query::QueryError;
use thiserror::Error;

use crate::registry::RegistryError;

/// Errors raised by the schema compiler.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A query over the ontology failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// An ontology source could not be loaded.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A builder could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The superclass is neither compiled in this module, a known base type,
    /// nor present in any dependency module.
    #[error("superclass {superclass} of {class} does not have a constructor")]
    UnresolvedSuperclassConstructor {
        /// Class being compiled.
        class: String,
        /// Superclass that could not be resolved.
        superclass: String,
    },

    /// A datatype property resolved to more than one primitive type.
    #[error("{property} on {class} resolves to more than one datatype: {}", .datatypes.join(", "))]
    ConflictingRestriction {
        /// Property URI.
        property: String,
        /// Class URI.
        class: String,
        /// Every resolved datatype IRI.
        datatypes: Vec<String>,
    },

    /// Two modules need each other's classes.
    #[error("cyclic dependency: {namespace} needs {superclass}, whose hierarchy depends on {namespace}")]
    CyclicDependency {
        /// Namespace being compiled.
        namespace: String,
        /// Superclass from the other namespace.
        superclass: String,
    },

    /// A declared dependency has not been compiled in this context.
    #[error("dependency {0} has not been compiled")]
    MissingDependency(String),

    /// Two distinct class URIs in one namespace share an unqualified name.
    #[error("{name} is already bound to {existing}, cannot bind {uri}")]
    NameCollision {
        /// Unqualified name.
        name: String,
        /// URI already in the symbol table.
        existing: String,
        /// URI that collides with it.
        uri: String,
    },

    /// A namespace was recompiled under a different module name.
    #[error("{namespace} is already compiled as module {existing}, not {requested}")]
    ModuleRenamed {
        /// Namespace being recompiled.
        namespace: String,
        /// Name the module was first compiled under.
        existing: String,
        /// Name passed on recompilation.
        requested: String,
    },
}
