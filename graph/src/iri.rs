//! IRI splitting helpers.

/// Returns the namespace part of `iri`, up to and including the last `#`,
/// or else the last `/`. Returns `None` when the IRI uses neither delimiter.
///
/// E.g. `"http://sbols.org/v3#Component"` → `"http://sbols.org/v3#"`
#[must_use]
pub fn namespace_of(iri: &str) -> Option<&str> {
    if let Some(i) = iri.rfind('#') {
        return Some(&iri[..=i]);
    }
    iri.rfind('/').map(|i| &iri[..=i])
}

/// Extracts the local name from a full IRI (after the last `/` or `#`).
#[must_use]
pub fn local_name(iri: &str) -> &str {
    let after_slash = iri.rsplit('/').next().unwrap_or(iri);
    after_slash.rsplit('#').next().unwrap_or(after_slash)
}

/// Returns true if `iri` lies inside `namespace`.
#[must_use]
pub fn in_namespace(iri: &str, namespace: &str) -> bool {
    !namespace.is_empty() && iri.starts_with(namespace) && iri.len() > namespace.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_prefers_hash() {
        assert_eq!(
            namespace_of("http://bioprotocols.org/uml#Activity"),
            Some("http://bioprotocols.org/uml#")
        );
        assert_eq!(
            namespace_of("http://www.ontology-of-units-of-measure.org/resource/om-2/Measure"),
            Some("http://www.ontology-of-units-of-measure.org/resource/om-2/")
        );
        assert_eq!(namespace_of("urn:isbn:0451450523"), None);
    }

    #[test]
    fn local_name_extraction() {
        assert_eq!(local_name("http://bioprotocols.org/paml#BehaviorExecution"), "BehaviorExecution");
        assert_eq!(local_name("http://www.w3.org/ns/prov#Activity"), "Activity");
        assert_eq!(local_name("http://www.w3.org/2001/XMLSchema#string"), "string");
    }

    #[test]
    fn namespace_membership() {
        assert!(in_namespace("http://bioprotocols.org/uml#Activity", "http://bioprotocols.org/uml#"));
        assert!(!in_namespace("http://bioprotocols.org/paml#Activity", "http://bioprotocols.org/uml#"));
        assert!(!in_namespace("http://bioprotocols.org/uml#", "http://bioprotocols.org/uml#"));
    }
}
