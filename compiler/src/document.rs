//! Reading instance graphs through the class registry, and writing them back.

use std::collections::{BTreeMap, HashSet};

use ontoforge_graph::iris::RDF_TYPE;
use ontoforge_graph::serializer::ntriples::to_ntriples;
use ontoforge_graph::{OntologyGraph, Term, Triple};

use crate::class::PropertyKind;
use crate::instance::{Diagnostic, Instance};
use crate::registry::{ClassRegistry, RegistryError};
use crate::slot::Value;

/// A set of top-level instances with their owned children nested inside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    instances: Vec<Instance>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance.
    pub fn add(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    /// Instances not owned by another instance, in identity order.
    #[must_use]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Finds an instance by identity, searching owned children too.
    #[must_use]
    pub fn find(&self, identity: &str) -> Option<&Instance> {
        fn search<'i>(instance: &'i Instance, identity: &str) -> Option<&'i Instance> {
            if instance.identity() == identity {
                return Some(instance);
            }
            instance.children().find_map(|child| search(child, identity))
        }
        self.instances.iter().find_map(|i| search(i, identity))
    }

    /// Instantiates every subject of `graph` whose `rdf:type` has a builder.
    ///
    /// Slots are filled from the subject's triples. Values a slot rejects are
    /// kept as diagnostics on the instance rather than failing the read.
    /// Subjects reached through a compositional property are nested under
    /// their owner.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OwnershipCycle`] if an instance transitively
    /// owns itself.
    pub fn read(graph: &OntologyGraph, registry: &ClassRegistry) -> Result<Self, RegistryError> {
        let mut built: BTreeMap<String, Instance> = BTreeMap::new();
        let mut owned: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

        let mut candidates: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let typed = graph
            .iter()
            .filter(|t| t.predicate == RDF_TYPE)
            .filter_map(|t| Some((t.subject.as_iri()?, t.object.as_iri()?)))
            .filter(|(_, type_uri)| registry.contains(type_uri));
        for (subject, type_uri) in typed {
            let types = candidates.entry(subject).or_default();
            if !types.contains(&type_uri) {
                types.push(type_uri);
            }
        }
        for (subject, types) in candidates {
            let type_uri = most_specific(&types, registry);
            let mut instance = registry.build(subject, type_uri)?;
            let children = populate(graph, &mut instance);
            owned.insert(subject.to_owned(), children);
            built.insert(subject.to_owned(), instance);
        }

        let children: HashSet<String> = owned
            .values()
            .flatten()
            .map(|(_, child)| child.clone())
            .filter(|child| built.contains_key(child))
            .collect();
        let roots: Vec<String> = built
            .keys()
            .filter(|identity| !children.contains(*identity))
            .cloned()
            .collect();

        let mut document = Self::new();
        for root in roots {
            let mut path = Vec::new();
            if let Some(instance) = assemble(&root, &mut built, &owned, &mut path)? {
                document.add(instance);
            }
        }
        if let Some(identity) = built.keys().next() {
            // Whatever is left was only reachable from itself.
            return Err(RegistryError::OwnershipCycle(identity.clone()));
        }
        Ok(document)
    }

    /// All triples of the document, children after their owners.
    #[must_use]
    pub fn triples(&self) -> Vec<Triple> {
        let mut triples = Vec::new();
        for instance in &self.instances {
            collect(instance, &mut triples);
        }
        triples
    }

    /// Writes the document as sorted N-Triples, the form the external
    /// validator consumes.
    #[must_use]
    pub fn to_ntriples(&self) -> String {
        let text = to_ntriples(&self.triples());
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        lines.dedup();
        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Fills non-owned slots from `graph` and returns `(slot, child)` pairs for
/// the owned ones.
/// The type every other registered type of a subject is an ancestor of. When
/// the types are unrelated the first one listed wins.
fn most_specific<'t>(types: &[&'t str], registry: &ClassRegistry) -> &'t str {
    let below_all = |candidate: &str| {
        registry.get(candidate).is_some_and(|builder| {
            types
                .iter()
                .filter(|other| **other != candidate)
                .all(|other| builder.class().is_subclass_of(other))
        })
    };
    types
        .iter()
        .copied()
        .find(|candidate| below_all(candidate))
        .or_else(|| types.first().copied())
        .unwrap_or_default()
}

fn populate(graph: &OntologyGraph, instance: &mut Instance) -> Vec<(String, String)> {
    let subject = Term::iri(instance.identity());
    let mut children = Vec::new();
    let mut fills: Vec<(String, Vec<Value>)> = Vec::new();
    let mut rejected: Vec<Diagnostic> = Vec::new();

    for slot in instance.slots() {
        let property = slot.property();
        let objects = graph.objects(&subject, &property.uri);
        if let PropertyKind::Owned { .. } = property.kind {
            for object in objects {
                if let Some(child) = object.as_iri() {
                    children.push((property.name.clone(), child.to_owned()));
                }
            }
            continue;
        }
        let mut values = Vec::new();
        for object in objects {
            match Value::from_term(property, object) {
                Ok(value) => values.push(value),
                Err(error) => rejected.push(Diagnostic {
                    property: property.name.clone(),
                    error,
                }),
            }
        }
        if !values.is_empty() {
            fills.push((property.name.clone(), values));
        }
    }

    for (name, values) in fills {
        if let Err(error) = instance.set(&name, values) {
            rejected.push(Diagnostic {
                property: name,
                error,
            });
        }
    }
    for diagnostic in rejected {
        instance.record(diagnostic);
    }
    children
}

fn assemble(
    identity: &str,
    built: &mut BTreeMap<String, Instance>,
    owned: &BTreeMap<String, Vec<(String, String)>>,
    path: &mut Vec<String>,
) -> Result<Option<Instance>, RegistryError> {
    if path.iter().any(|p| p == identity) {
        return Err(RegistryError::OwnershipCycle(identity.to_owned()));
    }
    // Already nested under another owner.
    let Some(mut instance) = built.remove(identity) else {
        return Ok(None);
    };
    path.push(identity.to_owned());
    for (slot, child) in owned.get(identity).into_iter().flatten() {
        if let Some(child) = assemble(child, built, owned, path)? {
            if let Err(error) = instance.push(slot, Value::Owned(Box::new(child))) {
                instance.record(Diagnostic {
                    property: slot.clone(),
                    error,
                });
            }
        }
    }
    path.pop();
    Ok(Some(instance))
}

fn collect(instance: &Instance, triples: &mut Vec<Triple>) {
    let subject = Term::iri(instance.identity());
    for type_uri in instance.types() {
        triples.push(Triple::new(subject.clone(), RDF_TYPE, Term::iri(type_uri.clone())));
    }
    for slot in instance.slots() {
        for value in slot.values() {
            triples.push(Triple::new(subject.clone(), slot.property().uri.clone(), value.to_term()));
        }
    }
    for child in instance.children() {
        collect(child, triples);
    }
}
