//! Ontology graph for the Ontoforge schema compiler.
//!
//! The `ontoforge-graph` crate holds the triple store every other crate reads
//! from: an insertion-ordered, deduplicated set of owned triples, indexed by
//! subject and by object, plus the namespace-prefix bindings accumulated from
//! every merged source.
//!
//! # Entry Point
//!
//! ```
//! use ontoforge_graph::OntologyGraph;
//!
//! let mut graph = OntologyGraph::new();
//! graph
//!     .parse_turtle("@prefix ex: <http://example.org/> . ex:a ex:b ex:c .")
//!     .unwrap_or_default();
//! assert_eq!(graph.len(), 1);
//! assert_eq!(graph.prefixes().prefix("http://example.org/"), Some("ex"));
//! ```
//!
//! Several sources may be merged into one graph; merges are additive and
//! [`OntologyGraph::clear`] is the only way to shrink a graph.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod graph;
pub mod iri;
pub mod model;
pub mod parser;
pub mod serializer;

pub use error::GraphError;
pub use graph::{OntologyGraph, PrefixMap};
pub use iri::{in_namespace, local_name, namespace_of};
pub use model::{iris, Literal, Term, Triple};
pub use parser::Syntax;
