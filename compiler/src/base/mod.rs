//! Bundled base ontologies.
//!
//! User ontologies extend the SBOL3 class library and PROV-O without
//! redeclaring them. Both are kept here as static declaration tables and are
//! merged into every fresh [`CompilationContext`](crate::CompilationContext)
//! graph unless the configuration turns them off.

pub mod prov;
pub mod sbol3;

use ontoforge_graph::iris::{
    OWL_CLASS, OWL_DATATYPE_PROPERTY, OWL_MAX_CARDINALITY, OWL_MIN_CARDINALITY,
    OWL_OBJECT_PROPERTY, OWL_ON_PROPERTY, OWL_RESTRICTION, RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL,
    RDFS_RANGE, RDFS_SUBCLASS_OF, RDFS_SUBPROPERTY_OF, RDF_TYPE, XSD_NON_NEGATIVE_INTEGER,
};
use ontoforge_graph::{Literal, OntologyGraph, Term, Triple};

/// A class of a base ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDecl {
    /// Full IRI.
    pub id: &'static str,
    /// `rdfs:label`.
    pub label: &'static str,
    /// `rdfs:comment`.
    pub comment: &'static str,
    /// Direct superclass, if any.
    pub subclass_of: Option<&'static str>,
}

/// Whether a property ranges over literals or resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `owl:DatatypeProperty`.
    Datatype,
    /// `owl:ObjectProperty`.
    Object,
}

/// A property of a base ontology, with the cardinality its domain restricts
/// it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Full IRI.
    pub id: &'static str,
    /// `rdfs:label`.
    pub label: &'static str,
    /// Datatype or object property.
    pub kind: DeclKind,
    /// Domain class.
    pub domain: &'static str,
    /// Range class or XSD datatype.
    pub range: &'static str,
    /// Parent relation (`rdfs:subPropertyOf`).
    pub sub_property_of: Option<&'static str>,
    /// `owl:minCardinality` on the domain; zero is not written.
    pub min: u32,
    /// `owl:maxCardinality` on the domain.
    pub max: Option<u32>,
}

/// One bundled ontology.
#[derive(Debug, Clone)]
pub struct BaseOntology {
    /// Conventional prefix, bound in the graph.
    pub prefix: &'static str,
    /// Namespace IRI.
    pub namespace: &'static str,
    /// Declared classes.
    pub classes: Vec<ClassDecl>,
    /// Declared properties.
    pub properties: Vec<PropertyDecl>,
}

impl BaseOntology {
    /// Writes the declarations into `graph` and binds the prefix. Returns the
    /// number of new triples.
    pub fn insert_into(&self, graph: &mut OntologyGraph) -> usize {
        graph.bind(self.prefix, self.namespace);
        let mut triples = Vec::new();
        for class in &self.classes {
            let subject = Term::iri(class.id);
            triples.push(Triple::new(subject.clone(), RDF_TYPE, Term::iri(OWL_CLASS)));
            triples.push(label(&subject, class.label));
            triples.push(Triple::new(
                subject.clone(),
                RDFS_COMMENT,
                Term::Literal(Literal::string(class.comment)),
            ));
            if let Some(parent) = class.subclass_of {
                triples.push(Triple::new(subject, RDFS_SUBCLASS_OF, Term::iri(parent)));
            }
        }
        for (index, property) in self.properties.iter().enumerate() {
            let subject = Term::iri(property.id);
            let kind = match property.kind {
                DeclKind::Datatype => OWL_DATATYPE_PROPERTY,
                DeclKind::Object => OWL_OBJECT_PROPERTY,
            };
            triples.push(Triple::new(subject.clone(), RDF_TYPE, Term::iri(kind)));
            triples.push(label(&subject, property.label));
            triples.push(Triple::new(subject.clone(), RDFS_DOMAIN, Term::iri(property.domain)));
            triples.push(Triple::new(subject.clone(), RDFS_RANGE, Term::iri(property.range)));
            if let Some(parent) = property.sub_property_of {
                triples.push(Triple::new(subject.clone(), RDFS_SUBPROPERTY_OF, Term::iri(parent)));
            }
            if property.min == 0 && property.max.is_none() {
                continue;
            }
            // Base restrictions live in their own blank-node scope.
            let restriction = Term::Blank(format!("base_{}_{index}", self.prefix));
            triples.push(Triple::new(
                Term::iri(property.domain),
                RDFS_SUBCLASS_OF,
                restriction.clone(),
            ));
            triples.push(Triple::new(restriction.clone(), RDF_TYPE, Term::iri(OWL_RESTRICTION)));
            triples.push(Triple::new(restriction.clone(), OWL_ON_PROPERTY, subject));
            if property.min > 0 {
                triples.push(bound(&restriction, OWL_MIN_CARDINALITY, property.min));
            }
            if let Some(max) = property.max {
                triples.push(bound(&restriction, OWL_MAX_CARDINALITY, max));
            }
        }
        triples.into_iter().filter(|t| graph.insert(t.clone())).count()
    }
}

fn label(subject: &Term, text: &str) -> Triple {
    Triple::new(subject.clone(), RDFS_LABEL, Term::Literal(Literal::string(text)))
}

fn bound(restriction: &Term, predicate: &str, value: u32) -> Triple {
    Triple::new(
        restriction.clone(),
        predicate,
        Term::Literal(Literal::typed(value.to_string(), XSD_NON_NEGATIVE_INTEGER)),
    )
}

/// Every bundled ontology: SBOL3, then PROV-O.
#[must_use]
pub fn all() -> Vec<BaseOntology> {
    vec![sbol3::module(), prov::module()]
}

/// A graph holding only the bundled ontologies.
#[must_use]
pub fn graph() -> OntologyGraph {
    let mut graph = OntologyGraph::new();
    for ontology in all() {
        ontology.insert_into(&mut graph);
    }
    graph
}

#[cfg(test)]
mod tests {
    use ontoforge_query::{QueryEngine, Vocabulary};

    use super::*;

    #[test]
    fn sbol_roots_and_library_classes_are_declared() {
        let graph = graph();
        let vocab = Vocabulary::default();
        let query = QueryEngine::new(&graph, &vocab);
        assert!(query.is_top_level("http://sbols.org/v3#Component"));
        assert!(!query.is_top_level("http://sbols.org/v3#SubComponent"));
        assert_eq!(
            query.superclass("http://sbols.org/v3#TopLevel").ok().as_deref(),
            Some("http://sbols.org/v3#Identified")
        );
        assert_eq!(
            query.base_class("http://sbols.org/v3#Range").ok().as_deref(),
            Some("http://sbols.org/v3#Identified")
        );
    }

    #[test]
    fn feature_ownership_is_compositional() {
        let graph = graph();
        let vocab = Vocabulary::default();
        let query = QueryEngine::new(&graph, &vocab);
        assert!(query.is_compositional("http://sbols.org/v3#hasFeature"));
        assert!(!query.is_compositional("http://sbols.org/v3#hasSequence"));
    }

    #[test]
    fn restrictions_carry_cardinality() {
        let graph = graph();
        let vocab = Vocabulary::default();
        let query = QueryEngine::new(&graph, &vocab);
        let bounds = query
            .cardinality("http://sbols.org/v3#hasNamespace", "http://sbols.org/v3#TopLevel")
            .ok()
            .map(|c| c.to_string());
        assert_eq!(bounds.as_deref(), Some("1..1"));
    }

    #[test]
    fn inserting_twice_adds_nothing() {
        let mut graph = graph();
        assert!(graph.len() > 0);
        assert_eq!(sbol3::module().insert_into(&mut graph), 0);
        assert_eq!(graph.prefixes().prefix("http://www.w3.org/ns/prov#"), Some("prov"));
    }
}
