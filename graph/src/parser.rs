//! Turtle / N-Triples ingestion on top of `sophia_turtle`.
//!
//! Parsed terms are copied into owned [`Term`]s. Blank-node labels are
//! prefixed with a per-load scope so that two documents merged into the
//! same graph never share a blank node by accident.

use std::path::Path;

use regex::Regex;
use sophia_api::source::TripleSource;
use sophia_api::term::{Term as _, TermKind};
use sophia_turtle::parser::{nt, turtle};

use crate::error::GraphError;
use crate::model::iris::{RDF_LANG_STRING, XSD_STRING};
use crate::model::{Literal, Term, Triple};

/// Concrete syntaxes the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
}

impl Syntax {
    /// Guesses the syntax from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ttl" | "turtle" => Some(Syntax::Turtle),
            "nt" | "ntriples" => Some(Syntax::NTriples),
            _ => None,
        }
    }
}

const PREFIX_PATTERN: &str = r"(?mi)^\s*@?prefix\s+([A-Za-z][\w.\-]*)?:\s*<([^>]*)>";

/// Parses `src` into owned triples.
///
/// # Errors
///
/// Returns [`GraphError::Parse`] if the document is not well formed.
pub fn parse(src: &str, syntax: Syntax, scope: &str) -> Result<Vec<Triple>, GraphError> {
    let mut triples = Vec::new();
    let outcome = match syntax {
        Syntax::Turtle => turtle::parse_str(src)
            .for_each_triple(|t| push(&mut triples, &t, scope))
            .map_err(|e| e.to_string()),
        Syntax::NTriples => nt::parse_str(src)
            .for_each_triple(|t| push(&mut triples, &t, scope))
            .map_err(|e| e.to_string()),
    };
    outcome.map_err(GraphError::Parse)?;
    Ok(triples)
}

/// Scans `@prefix` / `PREFIX` declarations. The empty prefix is reported as `""`.
///
/// # Errors
///
/// Returns [`GraphError::Pattern`] if the scanner pattern fails to compile.
pub fn scan_prefixes(src: &str) -> Result<Vec<(String, String)>, GraphError> {
    let pattern = Regex::new(PREFIX_PATTERN)?;
    Ok(pattern
        .captures_iter(src)
        .filter_map(|caps| {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let namespace = caps.get(2)?.as_str();
            Some((prefix.to_owned(), namespace.to_owned()))
        })
        .collect())
}

fn push<T: sophia_api::triple::Triple>(out: &mut Vec<Triple>, t: &T, scope: &str) {
    let predicate = match t.p().iri() {
        Some(iri) => iri.as_str().to_owned(),
        None => return,
    };
    if let (Some(subject), Some(object)) = (convert(t.s(), scope), convert(t.o(), scope)) {
        out.push(Triple::new(subject, predicate, object));
    }
}

fn convert<T: sophia_api::term::Term>(term: T, scope: &str) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_owned())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Term::Blank(format!("{scope}{}", id.as_str()))),
        TermKind::Literal => {
            let lexical = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_owned());
            let datatype = match (&language, term.datatype()) {
                (Some(_), _) => RDF_LANG_STRING.to_owned(),
                (None, Some(dt)) => dt.as_str().to_owned(),
                (None, None) => XSD_STRING.to_owned(),
            };
            Some(Term::Literal(Literal {
                lexical,
                datatype,
                language,
            }))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
PREFIX uml: <http://bioprotocols.org/uml#>

uml:Activity a owl:Class ;
    rdfs:label "Activity" ;
    rdfs:subClassOf [ a owl:Restriction ] .
"#;

    #[test]
    fn turtle_terms_are_owned_and_scoped() {
        let triples = parse(DOC, Syntax::Turtle, "l0_").unwrap_or_default();
        assert_eq!(triples.len(), 4);
        let label = triples
            .iter()
            .find(|t| t.predicate.ends_with("#label"))
            .map(|t| t.object.clone());
        assert_eq!(label, Some(Term::Literal(Literal::string("Activity"))));
        assert!(triples
            .iter()
            .filter_map(|t| match &t.object {
                Term::Blank(label) => Some(label),
                _ => None,
            })
            .all(|label| label.starts_with("l0_")));
    }

    #[test]
    fn prefixes_are_scanned_in_both_styles() {
        let prefixes = scan_prefixes(DOC).unwrap_or_default();
        assert_eq!(prefixes.len(), 3);
        assert!(prefixes.contains(&("uml".to_owned(), "http://bioprotocols.org/uml#".to_owned())));
    }

    #[test]
    fn malformed_turtle_is_rejected() {
        assert!(matches!(
            parse("<a> <b> .", Syntax::Turtle, "x"),
            Err(GraphError::Parse(_))
        ));
    }

    #[test]
    fn syntax_from_extension() {
        assert_eq!(Syntax::from_path(Path::new("o.ttl")), Some(Syntax::Turtle));
        assert_eq!(Syntax::from_path(Path::new("o.nt")), Some(Syntax::NTriples));
        assert_eq!(Syntax::from_path(Path::new("o.owl")), None);
    }
}
