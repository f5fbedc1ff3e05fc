//! N-Triples serializer.
//!
//! Produces one triple per line with absolute IRIs, suitable for streaming
//! into an external validator or for diff-friendly storage.

use std::fmt::Write as FmtWrite;

use crate::graph::OntologyGraph;
use crate::model::{Term, Triple};

/// Serializes a sequence of triples to an N-Triples string.
#[must_use]
pub fn to_ntriples<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    for t in triples {
        triple(&mut out, &t.subject, &t.predicate, &t.object);
    }
    out
}

/// Serializes a whole graph, in load order.
#[must_use]
pub fn graph_to_ntriples(graph: &OntologyGraph) -> String {
    to_ntriples(graph.iter())
}

fn triple(out: &mut String, subj: &Term, pred: &str, obj: &Term) {
    let _ = writeln!(out, "{subj} <{pred}> {obj} .");
}
