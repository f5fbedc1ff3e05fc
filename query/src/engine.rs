//! Structural queries over an ontology graph.
//!
//! Every operation is a read-only traversal; nothing here caches or mutates.
//! Results that are sets are returned as vectors in graph load order with
//! duplicates removed, which keeps compilation output deterministic.

use std::collections::{HashSet, VecDeque};

use ontoforge_graph::iris::*;
use ontoforge_graph::{namespace_of, OntologyGraph, Term};

use crate::cardinality::Cardinality;
use crate::error::QueryError;
use crate::vocabulary::Vocabulary;

/// Name of the implicit required argument every hierarchy root contributes.
pub const IDENTITY: &str = "identity";

/// Splits the namespace from a class or property URI.
///
/// # Errors
///
/// Returns [`QueryError::UnparseableNamespace`] if the URI has neither `#` nor `/`.
pub fn namespace(uri: &str) -> Result<&str, QueryError> {
    namespace_of(uri).ok_or_else(|| QueryError::UnparseableNamespace(uri.to_owned()))
}

/// Read-only query operations over an [`OntologyGraph`].
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    graph: &'a OntologyGraph,
    vocab: &'a Vocabulary,
}

impl<'a> QueryEngine<'a> {
    /// Creates an engine over `graph`.
    #[must_use]
    pub fn new(graph: &'a OntologyGraph, vocab: &'a Vocabulary) -> Self {
        Self { graph, vocab }
    }

    /// The designated roots and relations this engine was built with.
    #[must_use]
    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocab
    }

    /// The graph being queried.
    #[must_use]
    pub fn graph(&self) -> &'a OntologyGraph {
        self.graph
    }

    // ==================== Classes ====================

    /// Every IRI declared as an `owl:Class`.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        distinct_iris(self.graph.subjects(RDF_TYPE, &Term::iri(OWL_CLASS)))
    }

    /// The single direct superclass of `class`.
    ///
    /// # Errors
    ///
    /// [`QueryError::NoSuperclass`] if none is declared,
    /// [`QueryError::AmbiguousSuperclass`] if more than one is.
    pub fn superclass(&self, class: &str) -> Result<String, QueryError> {
        let mut candidates = self.declared_superclasses(class);
        match candidates.len() {
            0 => Err(QueryError::NoSuperclass(class.to_owned())),
            1 => Ok(candidates.remove(0)),
            _ => Err(QueryError::AmbiguousSuperclass {
                class: class.to_owned(),
                candidates,
            }),
        }
    }

    /// Follows [`superclass`](Self::superclass) until no superclass exists and
    /// returns that hierarchy root.
    ///
    /// # Errors
    ///
    /// Propagates [`QueryError::AmbiguousSuperclass`];
    /// [`QueryError::CyclicHierarchy`] if the chain loops.
    pub fn base_class(&self, class: &str) -> Result<String, QueryError> {
        let mut current = class.to_owned();
        let mut visited = HashSet::new();
        loop {
            if !visited.insert(current.clone()) {
                return Err(QueryError::CyclicHierarchy(current));
            }
            match self.superclass(&current) {
                Ok(parent) => current = parent,
                Err(QueryError::NoSuperclass(_)) => return Ok(current),
                Err(e) => return Err(e),
            }
        }
    }

    /// The distinct hierarchy roots of every declared class.
    ///
    /// # Errors
    ///
    /// Propagates any [`base_class`](Self::base_class) failure.
    pub fn base_classes(&self) -> Result<Vec<String>, QueryError> {
        let mut roots = Vec::new();
        for class in self.classes() {
            let root = self.base_class(&class)?;
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        Ok(roots)
    }

    /// Direct subclasses of `class`.
    #[must_use]
    pub fn subclasses(&self, class: &str) -> Vec<String> {
        let owl_class = Term::iri(OWL_CLASS);
        let subs = self
            .graph
            .subjects(RDFS_SUBCLASS_OF, &Term::iri(class))
            .filter(|s| self.graph.contains(s, RDF_TYPE, &owl_class));
        distinct_iris(subs)
    }

    /// `class` and every class below it, breadth first.
    #[must_use]
    pub fn descendants(&self, class: &str) -> Vec<String> {
        self.closure(class, |node| {
            distinct_iris(self.graph.subjects(RDFS_SUBCLASS_OF, &Term::iri(node)))
        })
    }

    /// `class` and every declared class above it, breadth first.
    #[must_use]
    pub fn ancestors(&self, class: &str) -> Vec<String> {
        self.closure(class, |node| self.declared_superclasses(node))
    }

    /// Alias of [`ancestors`](Self::ancestors).
    #[must_use]
    pub fn inheritance_hierarchy(&self, class: &str) -> Vec<String> {
        self.ancestors(class)
    }

    /// True if `class` is the "TopLevel" root or a transitive subclass of it.
    #[must_use]
    pub fn is_top_level(&self, class: &str) -> bool {
        let top_level = self.vocab.top_level.as_str();
        self.closure(class, |node| {
            distinct_iris(self.graph.objects(&Term::iri(node), RDFS_SUBCLASS_OF))
        })
        .iter()
        .any(|c| c == top_level)
    }

    // ==================== Properties ====================

    /// Object properties whose domain covers `class`, plus those restricted on it.
    #[must_use]
    pub fn object_properties(&self, class: &str) -> Vec<String> {
        self.properties_of_kind(class, OWL_OBJECT_PROPERTY)
    }

    /// Datatype properties whose domain covers `class`, plus those restricted on it.
    #[must_use]
    pub fn datatype_properties(&self, class: &str) -> Vec<String> {
        self.properties_of_kind(class, OWL_DATATYPE_PROPERTY)
    }

    /// Object properties of `class` that specialize the compositional relation.
    #[must_use]
    pub fn compositional_properties(&self, class: &str) -> Vec<String> {
        self.object_properties(class)
            .into_iter()
            .filter(|p| self.is_compositional(p))
            .collect()
    }

    /// Object properties of `class` that are not compositional.
    #[must_use]
    pub fn associative_properties(&self, class: &str) -> Vec<String> {
        self.object_properties(class)
            .into_iter()
            .filter(|p| !self.is_compositional(p))
            .collect()
    }

    /// True if `property` is the compositional relation or reaches it through
    /// `rdfs:subPropertyOf`.
    #[must_use]
    pub fn is_compositional(&self, property: &str) -> bool {
        let comprises = self.vocab.comprises.as_str();
        self.closure(property, |node| {
            distinct_iris(self.graph.objects(&Term::iri(node), RDFS_SUBPROPERTY_OF))
        })
        .iter()
        .any(|p| p == comprises)
    }

    // ==================== Restrictions ====================

    /// The `(lower, upper)` bounds of `property` on `class`.
    ///
    /// Each bound defaults independently (`0` and unbounded) unless a
    /// restriction on `class` declares `owl:minCardinality` / `owl:maxCardinality`.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidCardinality`] if a bound is not a non-negative integer.
    pub fn cardinality(&self, property: &str, class: &str) -> Result<Cardinality, QueryError> {
        let mut bounds = Cardinality::UNBOUNDED;
        let restrictions = self.restrictions(class, property);
        if let Some(lower) = self.bound(&restrictions, OWL_MIN_CARDINALITY, property, class)? {
            bounds.lower = lower;
        }
        if let Some(upper) = self.bound(&restrictions, OWL_MAX_CARDINALITY, property, class)? {
            bounds.upper = Some(upper);
        }
        Ok(bounds)
    }

    /// The value type(s) of `property` on `class`.
    ///
    /// A local `owl:allValuesFrom` restriction wins. Without one, every global
    /// `rdfs:range` of the property is returned; more than one range is
    /// permitted here and left to the caller to judge.
    ///
    /// # Errors
    ///
    /// [`QueryError::ConflictingRestriction`] if more than one
    /// `owl:allValuesFrom` restriction applies.
    pub fn property_datatype(&self, property: &str, class: &str) -> Result<Vec<String>, QueryError> {
        let mut local: Vec<Term> = Vec::new();
        for restriction in self.restrictions(class, property) {
            for value in self.graph.objects(&restriction, OWL_ALL_VALUES_FROM) {
                if !local.contains(value) {
                    local.push(value.clone());
                }
            }
        }
        if local.len() > 1 {
            return Err(QueryError::ConflictingRestriction {
                property: property.to_owned(),
                class: class.to_owned(),
                values: local.iter().map(|t| t.value().to_owned()).collect(),
            });
        }
        if let Some(value) = local.first() {
            return Ok(self.union_members(value));
        }

        let mut ranges = Vec::new();
        for range in self.graph.objects(&Term::iri(property), RDFS_RANGE) {
            for member in self.union_members(range) {
                if !ranges.contains(&member) {
                    ranges.push(member);
                }
            }
        }
        Ok(ranges)
    }

    // ==================== Annotations ====================

    /// The single `rdfs:label` of `uri`.
    ///
    /// # Errors
    ///
    /// [`QueryError::MissingLabel`] if there is none,
    /// [`QueryError::DuplicateLabel`] if there are several.
    pub fn label(&self, uri: &str) -> Result<String, QueryError> {
        let mut labels: Vec<&Term> = Vec::new();
        for label in self.graph.objects(&Term::iri(uri), RDFS_LABEL) {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        match labels.as_slice() {
            [] => Err(QueryError::MissingLabel(uri.to_owned())),
            [only] => Ok(only.value().to_owned()),
            _ => Err(QueryError::DuplicateLabel {
                uri: uri.to_owned(),
                labels: labels.iter().map(|t| t.value().to_owned()).collect(),
            }),
        }
    }

    /// The first `rdfs:comment` of `uri`, if any.
    #[must_use]
    pub fn comment(&self, uri: &str) -> Option<String> {
        self.graph
            .objects(&Term::iri(uri), RDFS_COMMENT)
            .next()
            .map(|t| t.value().to_owned())
    }

    // ==================== Required properties ====================

    /// Labels of the properties a constructor of `class` must receive,
    /// superclass-required first.
    ///
    /// The hierarchy roots and classes of opaque external ontologies require
    /// only [`IDENTITY`]. Below them, a property is required when its lower
    /// bound on the class is exactly one; labels already required by an
    /// ancestor are not repeated.
    ///
    /// # Errors
    ///
    /// Propagates superclass, label and cardinality failures;
    /// [`QueryError::CyclicHierarchy`] if the superclass chain loops.
    pub fn required_properties(&self, class: &str) -> Result<Vec<String>, QueryError> {
        let mut path = HashSet::new();
        self.required_along(class, &mut path)
    }

    fn required_along(
        &self,
        class: &str,
        path: &mut HashSet<String>,
    ) -> Result<Vec<String>, QueryError> {
        if self.vocab.is_root(class) || self.vocab.is_opaque(class) {
            return Ok(vec![IDENTITY.to_owned()]);
        }
        if !path.insert(class.to_owned()) {
            return Err(QueryError::CyclicHierarchy(class.to_owned()));
        }
        let superclass = self.superclass(class)?;
        let mut required = self.required_along(&superclass, path)?;

        let mut candidates = self.datatype_properties(class);
        candidates.extend(self.object_properties(class));
        let mut own = Vec::new();
        for property in candidates {
            if self.cardinality(&property, class)?.is_required() {
                let label = self.label(&property)?;
                if !required.contains(&label) && !own.contains(&label) {
                    own.push(label);
                }
            }
        }
        required.extend(own);
        Ok(required)
    }

    // ==================== Helpers ====================

    fn declared_superclasses(&self, class: &str) -> Vec<String> {
        let owl_class = Term::iri(OWL_CLASS);
        let parents = self
            .graph
            .objects(&Term::iri(class), RDFS_SUBCLASS_OF)
            .filter(|o| self.graph.contains(o, RDF_TYPE, &owl_class));
        distinct_iris(parents)
    }

    fn properties_of_kind(&self, class: &str, kind: &str) -> Vec<String> {
        let kind_term = Term::iri(kind);
        let class_term = Term::iri(class);
        let mut found: Vec<String> = Vec::new();

        for property in self.graph.subjects(RDF_TYPE, &kind_term) {
            let Some(iri) = property.as_iri() else { continue };
            let in_domain = self
                .graph
                .objects(property, RDFS_DOMAIN)
                .any(|domain| self.union_closure(domain).contains(&class_term));
            if in_domain && !found.iter().any(|p| p == iri) {
                found.push(iri.to_owned());
            }
        }

        // Restrictions extend the candidate list even without a matching domain.
        for restriction in self.graph.objects(&class_term, RDFS_SUBCLASS_OF) {
            for property in self.graph.objects(restriction, OWL_ON_PROPERTY) {
                let Some(iri) = property.as_iri() else { continue };
                if self.graph.contains(property, RDF_TYPE, &kind_term)
                    && !found.iter().any(|p| p == iri)
                {
                    found.push(iri.to_owned());
                }
            }
        }
        found
    }

    fn restrictions(&self, class: &str, property: &str) -> Vec<Term> {
        let property = Term::iri(property);
        self.graph
            .objects(&Term::iri(class), RDFS_SUBCLASS_OF)
            .filter(|r| {
                self.graph.has_type(r, OWL_RESTRICTION)
                    && self.graph.contains(r, OWL_ON_PROPERTY, &property)
            })
            .cloned()
            .collect()
    }

    fn bound(
        &self,
        restrictions: &[Term],
        predicate: &'static str,
        property: &str,
        class: &str,
    ) -> Result<Option<u32>, QueryError> {
        let value = restrictions
            .iter()
            .flat_map(|r| self.graph.objects(r, predicate))
            .next();
        let Some(value) = value else {
            return Ok(None);
        };
        value
            .value()
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| QueryError::InvalidCardinality {
                bound: predicate,
                value: value.value().to_owned(),
                property: property.to_owned(),
                class: class.to_owned(),
            })
    }

    /// `node` followed by every member reachable through `owl:unionOf` lists.
    fn union_closure(&self, node: &Term) -> Vec<Term> {
        let mut seen = vec![node.clone()];
        let mut queue = VecDeque::from([node.clone()]);
        while let Some(current) = queue.pop_front() {
            for list in self.graph.objects(&current, OWL_UNION_OF) {
                for member in self.graph.list_items(list) {
                    if !seen.contains(&member) {
                        seen.push(member.clone());
                        queue.push_back(member);
                    }
                }
            }
        }
        seen
    }

    /// The IRIs a class expression stands for: itself, or its union members.
    fn union_members(&self, node: &Term) -> Vec<String> {
        distinct_iris(
            self.union_closure(node)
                .iter()
                .filter(|t| self.graph.objects(t, OWL_UNION_OF).next().is_none()),
        )
    }

    /// Reflexive-transitive closure from `start` over `step`, breadth first.
    fn closure<F>(&self, start: &str, step: F) -> Vec<String>
    where
        F: Fn(&str) -> Vec<String>,
    {
        let mut seen = vec![start.to_owned()];
        let mut queue = VecDeque::from([start.to_owned()]);
        while let Some(current) = queue.pop_front() {
            for next in step(&current) {
                if !seen.contains(&next) {
                    seen.push(next.clone());
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

fn distinct_iris<'t>(terms: impl Iterator<Item = &'t Term>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in terms {
        if let Some(iri) = term.as_iri() {
            if !out.iter().any(|o| o == iri) {
                out.push(iri.to_owned());
            }
        }
    }
    out
}
