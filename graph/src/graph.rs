//! The mergeable ontology graph.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::error::GraphError;
use crate::model::iris::{RDF_FIRST, RDF_NIL, RDF_REST, RDF_TYPE};
use crate::model::{Term, Triple};
use crate::parser::{self, Syntax};

/// Namespace-prefix bindings accumulated across loads.
#[derive(Debug, Clone, Default)]
pub struct PrefixMap {
    by_prefix: BTreeMap<String, String>,
    by_namespace: BTreeMap<String, String>,
}

impl PrefixMap {
    /// Binds `prefix` to `namespace`. A later binding of the same prefix or
    /// namespace replaces the earlier one.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        if let Some(old_ns) = self.by_prefix.insert(prefix.clone(), namespace.clone()) {
            if old_ns != namespace && self.by_namespace.get(&old_ns) == Some(&prefix) {
                self.by_namespace.remove(&old_ns);
            }
        }
        self.by_namespace.insert(namespace, prefix);
    }

    /// Returns the namespace bound to `prefix`.
    #[must_use]
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    /// Returns the prefix bound to `namespace`.
    #[must_use]
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.by_namespace.get(namespace).map(String::as_str)
    }

    /// Iterates over `(prefix, namespace)` pairs in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_prefix.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Returns the number of bound prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.by_prefix.clear();
        self.by_namespace.clear();
    }
}

/// An in-memory set of triples indexed by subject and by object.
///
/// Insertion order is preserved, so every lookup yields results in the
/// order the statements were first loaded. Duplicate statements are
/// stored once.
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
    prefixes: PrefixMap,
    loads: usize,
}

impl OntologyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        let index = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(index);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .push(index);
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates over all triples in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Returns true if the exact statement is present.
    #[must_use]
    pub fn contains(&self, subject: &Term, predicate: &str, object: &Term) -> bool {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.triples.get(i))
            .any(|t| t.predicate == predicate && &t.object == object)
    }

    /// Returns true if `subject rdf:type class` is asserted.
    #[must_use]
    pub fn has_type(&self, subject: &Term, class: &str) -> bool {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.triples.get(i))
            .any(|t| t.predicate == RDF_TYPE && t.object.as_iri() == Some(class))
    }

    /// Objects of `subject predicate ?o`, in load order.
    pub fn objects<'a>(
        &'a self,
        subject: &Term,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.triples.get(i))
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Subjects of `?s predicate object`, in load order.
    pub fn subjects<'a>(
        &'a self,
        predicate: &'a str,
        object: &Term,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.by_object
            .get(object)
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.triples.get(i))
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.subject)
    }

    /// All triples whose subject is `subject`, in load order.
    pub fn statements_about<'a>(&'a self, subject: &Term) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.triples.get(i))
    }

    /// Members of the RDF collection starting at `head`.
    ///
    /// Traversal stops at `rdf:nil`, at a node without `rdf:rest`, or when a
    /// node repeats.
    #[must_use]
    pub fn list_items(&self, head: &Term) -> Vec<Term> {
        let nil = Term::iri(RDF_NIL);
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut node = head.clone();
        while node != nil && visited.insert(node.clone()) {
            items.extend(self.objects(&node, RDF_FIRST).cloned());
            match self.objects(&node, RDF_REST).next() {
                Some(rest) => node = rest.clone(),
                None => break,
            }
        }
        items
    }

    /// The namespace-prefix bindings.
    #[must_use]
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    /// Binds a namespace prefix.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.bind(prefix, namespace);
    }

    /// Parses a Turtle document and merges it. Returns the number of new triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse; the graph is left unchanged.
    pub fn parse_turtle(&mut self, src: &str) -> Result<usize, GraphError> {
        self.merge_source(src, Syntax::Turtle)
    }

    /// Parses an N-Triples document and merges it. Returns the number of new triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse; the graph is left unchanged.
    pub fn parse_ntriples(&mut self, src: &str) -> Result<usize, GraphError> {
        self.merge_source(src, Syntax::NTriples)
    }

    /// Reads a file, guessing the syntax from its extension, and merges it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its extension is not
    /// recognised, or it does not parse.
    pub fn load(&mut self, path: &Path) -> Result<usize, GraphError> {
        let syntax =
            Syntax::from_path(path).ok_or_else(|| GraphError::UnknownFormat(path.to_path_buf()))?;
        let src = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let added = self.merge_source(&src, syntax)?;
        tracing::debug!(path = %path.display(), added, total = self.len(), "merged ontology source");
        Ok(added)
    }

    /// Merges every triple and prefix of `other` into this graph.
    ///
    /// Blank nodes of `other` are moved into a fresh load scope, so they never
    /// coincide with blank nodes already here.
    pub fn merge(&mut self, other: &OntologyGraph) -> usize {
        for (prefix, namespace) in other.prefixes.iter() {
            self.prefixes.bind(prefix, namespace);
        }
        let scope = format!("l{}_", self.loads);
        self.loads += 1;
        let rescope = |term: &Term| match term {
            Term::Blank(label) => Term::Blank(format!("{scope}{label}")),
            other => other.clone(),
        };
        let mut added = 0;
        for t in &other.triples {
            let triple = Triple::new(rescope(&t.subject), t.predicate.clone(), rescope(&t.object));
            if self.insert(triple) {
                added += 1;
            }
        }
        added
    }

    /// Removes every triple and prefix binding.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn merge_source(&mut self, src: &str, syntax: Syntax) -> Result<usize, GraphError> {
        let scope = format!("l{}_", self.loads);
        let triples = parser::parse(src, syntax, &scope)?;
        let prefixes = match syntax {
            Syntax::Turtle => parser::scan_prefixes(src)?,
            Syntax::NTriples => Vec::new(),
        };
        self.loads += 1;
        for (prefix, namespace) in prefixes {
            self.prefixes.bind(prefix, namespace);
        }
        let mut added = 0;
        for triple in triples {
            if self.insert(triple) {
                added += 1;
            }
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::iris::{OWL_CLASS, RDFS_LABEL};
    use crate::model::Literal;

    const BASE: &str = r#"
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix uml:  <http://bioprotocols.org/uml#> .

uml:Activity a owl:Class ; rdfs:label "Activity" .
uml:Behavior a owl:Class ;
    rdfs:subClassOf [ a owl:Restriction ] .
"#;

    fn activity() -> Term {
        Term::iri("http://bioprotocols.org/uml#Activity")
    }

    #[test]
    fn indexes_by_subject_and_object() {
        let mut graph = OntologyGraph::new();
        assert_eq!(graph.parse_turtle(BASE).ok(), Some(5));
        assert!(graph.has_type(&activity(), OWL_CLASS));
        let labels: Vec<&Term> = graph.objects(&activity(), RDFS_LABEL).collect();
        assert_eq!(labels, vec![&Term::Literal(Literal::string("Activity"))]);
        let classes: Vec<&Term> = graph.subjects(RDF_TYPE, &Term::iri(OWL_CLASS)).collect();
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn reloading_is_additive_and_deduplicated() {
        let mut graph = OntologyGraph::new();
        let first = graph.parse_turtle(BASE).unwrap_or(0);
        let second = graph.parse_turtle(BASE).unwrap_or(0);
        assert_eq!(first, 5);
        // Only the blank-node statements are new; blank nodes are load-scoped.
        assert_eq!(second, 2);
        assert_eq!(graph.prefixes().prefix("http://bioprotocols.org/uml#"), Some("uml"));
    }

    #[test]
    fn rdf_lists_are_walked_in_order() {
        let mut graph = OntologyGraph::new();
        let src = r#"
@prefix ex: <http://example.org/> .
ex:s ex:p ( ex:a ex:b ex:c ) .
"#;
        assert!(graph.parse_turtle(src).is_ok());
        let head = graph
            .objects(&Term::iri("http://example.org/s"), "http://example.org/p")
            .next()
            .cloned();
        let items = head.map(|h| graph.list_items(&h)).unwrap_or_default();
        assert_eq!(
            items,
            vec![
                Term::iri("http://example.org/a"),
                Term::iri("http://example.org/b"),
                Term::iri("http://example.org/c"),
            ]
        );
    }

    #[test]
    fn prefix_rebinding_replaces_reverse_entry() {
        let mut prefixes = PrefixMap::default();
        prefixes.bind("uml", "http://bioprotocols.org/uml#");
        prefixes.bind("uml", "http://bioprotocols.org/uml2#");
        assert_eq!(prefixes.prefix("http://bioprotocols.org/uml#"), None);
        assert_eq!(prefixes.namespace("uml"), Some("http://bioprotocols.org/uml2#"));
        assert_eq!(prefixes.len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut graph = OntologyGraph::new();
        assert!(graph.parse_turtle(BASE).is_ok());
        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.prefixes().is_empty());
    }
}
