//! Ontoforge schema compiler.
//!
//! Compiles the classes of an ontology namespace into a runtime object
//! model. Every class becomes a [`CompiledClass`]: its parent, its ordered
//! property table (field name, kind, cardinality, value type) and its
//! required-argument list. Instances are built by one generic constructor
//! parameterized by that table, and a [`ClassRegistry`] maps each type URI to
//! the [`Builder`] a document reader uses to instantiate records.
//!
//! # Entry Point
//!
//! ```
//! use ontoforge_compiler::CompilationContext;
//!
//! let mut context = CompilationContext::default();
//! context
//!     .load_turtle(
//!         "@prefix owl: <http://www.w3.org/2002/07/owl#> .
//!          @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!          @prefix sbol: <http://sbols.org/v3#> .
//!          @prefix uml: <http://bioprotocols.org/uml#> .
//!          sbol:Identified a owl:Class .
//!          sbol:TopLevel a owl:Class ; rdfs:subClassOf sbol:Identified .
//!          uml:Activity a owl:Class ; rdfs:subClassOf sbol:TopLevel .",
//!     )
//!     .unwrap_or_default();
//! let report = context
//!     .compile_module("uml", "http://bioprotocols.org/uml#", &[])
//!     .ok();
//! assert_eq!(report.map(|r| r.compiled.len()), Some(1));
//! assert!(context.registry().contains("http://bioprotocols.org/uml#Activity"));
//! ```
//!
//! # Modules
//!
//! - [`config`]: roots, compositional relation, external ontologies, construction policy
//! - [`compile`]: the recursive class compiler and namespace driver
//! - [`context`]: the compilation context that owns graph, modules and registry
//! - [`class`], [`module`]: compiled class records and per-namespace symbol tables
//! - [`slot`], [`instance`]: typed slots and the generic constructor
//! - [`registry`]: builders keyed by type URI
//! - [`dispatch`]: visitor callbacks keyed by class name
//! - [`document`], [`validation`]: reading and writing instance graphs, validator seam

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod base;
pub mod class;
pub mod compile;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod instance;
pub mod module;
pub mod registry;
pub mod report;
pub mod slot;
pub mod validation;

pub use class::{BaseClass, CompiledClass, Parent, Primitive, PropertyDef, PropertyKind};
pub use compile::{compile_namespace, Compilation, Compiler};
pub use config::{CompilerConfig, ConfigError, ConstructionMode, ExternalOntology};
pub use context::CompilationContext;
pub use dispatch::{DispatchError, Dispatcher};
pub use document::Document;
pub use error::CompileError;
pub use instance::{CardinalityViolation, Diagnostic, Instance};
pub use module::CompiledModule;
pub use registry::{Builder, ClassRegistry, RegistryError};
pub use report::{CompilationReport, SkippedProperty};
pub use slot::{Arg, Slot, SlotError, Value};
pub use validation::{CardinalityValidator, ConstraintValidator, ValidationReport, Violation};
