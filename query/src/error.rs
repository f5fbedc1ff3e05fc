//! Query failures.
//!
//! Every variant names the URI that broke the single-inheritance,
//! single-label or single-restriction contract, so the caller can report it.

use thiserror::Error;

/// Errors raised by [`QueryEngine`](crate::QueryEngine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The class declares no superclass.
    #[error("{0} has no superclass")]
    NoSuperclass(String),

    /// The class declares more than one direct superclass.
    #[error("{class} has more than one superclass: {}", .candidates.join(", "))]
    AmbiguousSuperclass {
        /// The class being queried.
        class: String,
        /// Every declared direct superclass.
        candidates: Vec<String>,
    },

    /// The resource carries no `rdfs:label`.
    #[error("{0} has no label")]
    MissingLabel(String),

    /// The resource carries more than one `rdfs:label`.
    #[error("{uri} has more than one label: {}", .labels.join(", "))]
    DuplicateLabel {
        /// The resource being queried.
        uri: String,
        /// Every label found.
        labels: Vec<String>,
    },

    /// More than one value-type restriction applies to one (property, class) pair.
    #[error("conflicting owl:allValuesFrom restrictions on {property} for {class}: {}", .values.join(", "))]
    ConflictingRestriction {
        /// Restricted property.
        property: String,
        /// Class carrying the restrictions.
        class: String,
        /// Every restricted value type.
        values: Vec<String>,
    },

    /// The URI has neither a `#` nor a `/` to split a namespace from.
    #[error("cannot parse namespace from {0}: URI must use either / or # as a delimiter")]
    UnparseableNamespace(String),

    /// A cardinality restriction holds something other than a non-negative integer.
    #[error("invalid {bound} {value:?} on {property} for {class}")]
    InvalidCardinality {
        /// `owl:minCardinality` or `owl:maxCardinality`.
        bound: &'static str,
        /// The offending lexical value.
        value: String,
        /// Restricted property.
        property: String,
        /// Class carrying the restriction.
        class: String,
    },

    /// Following `rdfs:subClassOf` returned to a class already on the path.
    #[error("subclass cycle through {0}")]
    CyclicHierarchy(String),
}
