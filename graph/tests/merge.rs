//! Loading and merging ontology files.

use std::path::Path;

use ontoforge_graph::iris::{OWL_UNION_OF, RDFS_DOMAIN, RDFS_SUBCLASS_OF};
use ontoforge_graph::serializer::ntriples::graph_to_ntriples;
use ontoforge_graph::{GraphError, OntologyGraph, Term};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn merged() -> OntologyGraph {
    let mut graph = OntologyGraph::new();
    graph.load(&fixture("left.ttl")).expect("left.ttl loads");
    graph.load(&fixture("right.nt")).expect("right.nt loads");
    graph
}

#[test]
fn blank_nodes_do_not_alias_across_loads() {
    let graph = merged();
    let left = graph
        .objects(&Term::iri("http://example.org/left#Part"), RDFS_SUBCLASS_OF)
        .next()
        .cloned()
        .expect("Part has a restriction");
    let right = graph
        .objects(&Term::iri("http://example.org/right#Kit"), RDFS_SUBCLASS_OF)
        .next()
        .cloned()
        .expect("Kit has a restriction");
    assert!(left.is_blank() && right.is_blank());
    assert_ne!(left, right);
}

#[test]
fn union_domain_lists_are_traversable() {
    let graph = merged();
    let domain = graph
        .objects(&Term::iri("http://example.org/left#owner"), RDFS_DOMAIN)
        .next()
        .cloned()
        .expect("owner has a domain");
    let head = graph
        .objects(&domain, OWL_UNION_OF)
        .next()
        .cloned()
        .expect("domain is a union");
    assert_eq!(
        graph.list_items(&head),
        vec![
            Term::iri("http://example.org/left#Part"),
            Term::iri("http://example.org/left#Kit"),
        ]
    );
}

#[test]
fn prefixes_accumulate_from_turtle_only() {
    let graph = merged();
    assert_eq!(graph.prefixes().prefix("http://example.org/left#"), Some("ex"));
    assert_eq!(graph.prefixes().prefix("http://example.org/right#"), None);
}

#[test]
fn reloading_a_file_adds_only_fresh_blank_nodes() {
    let mut graph = merged();
    let before = graph.len();
    let added = graph.load(&fixture("right.nt")).expect("right.nt reloads");
    // The IRI-only triple is a duplicate; the two blank-node triples are new.
    assert_eq!(added, 2);
    assert_eq!(graph.len(), before + 2);
}

#[test]
fn written_ntriples_reload_to_the_same_size() {
    let graph = merged();
    let mut copy = OntologyGraph::new();
    let added = copy
        .parse_ntriples(&graph_to_ntriples(&graph))
        .expect("own output parses");
    assert_eq!(added, graph.len());
}

#[test]
fn unknown_extensions_are_refused() {
    let mut graph = OntologyGraph::new();
    let result = graph.load(Path::new("ontology.owl"));
    assert!(matches!(result, Err(GraphError::UnknownFormat(_))));
}

#[test]
fn merged_graphs_keep_their_blank_nodes_apart() {
    const EX: &str = "@prefix ex: <http://example.org/ex#> .\n";
    let mut left = OntologyGraph::new();
    left.parse_turtle(&format!("{EX}ex:a ex:p [ ex:q ex:one ] ."))
        .expect("left parses");
    let mut right = OntologyGraph::new();
    right
        .parse_turtle(&format!("{EX}ex:b ex:p [ ex:q ex:two ] ."))
        .expect("right parses");

    assert_eq!(left.merge(&right), 2);
    let node_of = |subject: &str| {
        left.objects(&Term::iri(subject), "http://example.org/ex#p")
            .next()
            .cloned()
            .expect("subject has a blank node")
    };
    let a = node_of("http://example.org/ex#a");
    let b = node_of("http://example.org/ex#b");
    assert_ne!(a, b);
    let values: Vec<&Term> = left.objects(&a, "http://example.org/ex#q").collect();
    assert_eq!(values, vec![&Term::iri("http://example.org/ex#one")]);
    assert_eq!(left.prefixes().namespace("ex"), Some("http://example.org/ex#"));
}
