//! Ontology query engine for the Ontoforge schema compiler.
//!
//! The `ontoforge-query` crate answers the structural questions the compiler
//! and any documentation tooling ask of an [`OntologyGraph`]:
//!
//! - **Hierarchy**: [`QueryEngine::superclass`], [`QueryEngine::base_class`],
//!   [`QueryEngine::subclasses`], [`QueryEngine::descendants`],
//!   [`QueryEngine::ancestors`], [`QueryEngine::is_top_level`].
//! - **Properties**: object and datatype properties by domain (with
//!   `owl:unionOf` expansion) and by class-local restriction, split into
//!   compositional and associative.
//! - **Restrictions**: [`QueryEngine::cardinality`] and
//!   [`QueryEngine::property_datatype`].
//! - **Annotations**: [`QueryEngine::label`] and [`QueryEngine::comment`].
//! - **Construction**: [`QueryEngine::required_properties`].
//!
//! The engine is stateless and borrows the graph; it never caches.
//!
//! ```
//! use ontoforge_graph::OntologyGraph;
//! use ontoforge_query::{QueryEngine, Vocabulary};
//!
//! let mut graph = OntologyGraph::new();
//! graph
//!     .parse_turtle(
//!         "@prefix owl: <http://www.w3.org/2002/07/owl#> .
//!          @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!          <http://example.org/ex#A> a owl:Class ; rdfs:label \"A\" .",
//!     )
//!     .unwrap_or_default();
//! let vocab = Vocabulary::default();
//! let query = QueryEngine::new(&graph, &vocab);
//! assert_eq!(query.classes(), vec!["http://example.org/ex#A".to_string()]);
//! assert_eq!(query.label("http://example.org/ex#A").ok().as_deref(), Some("A"));
//! ```
//!
//! [`OntologyGraph`]: ontoforge_graph::OntologyGraph

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod cardinality;
pub mod engine;
pub mod error;
pub mod vocabulary;

pub use cardinality::Cardinality;
pub use engine::{namespace, QueryEngine, IDENTITY};
pub use error::QueryError;
pub use vocabulary::{Vocabulary, SBOL3};
