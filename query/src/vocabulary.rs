//! Designated resources the engine treats specially.

use ontoforge_graph::{in_namespace, iris::PROV};

/// SBOL 3 namespace, home of the default hierarchy roots.
pub const SBOL3: &str = "http://sbols.org/v3#";

/// The hierarchy roots, the compositional relation, and the external
/// ontologies that cannot be introspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Root of every compiled hierarchy ("Identified").
    pub identified: String,
    /// Root of document-level entities ("TopLevel"), itself under `identified`.
    pub top_level: String,
    /// Relation every compositional property specializes.
    pub comprises: String,
    /// Namespaces whose classes are hard-coded as identity-only roots.
    pub opaque_namespaces: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            identified: format!("{SBOL3}Identified"),
            top_level: format!("{SBOL3}TopLevel"),
            comprises: format!("{SBOL3}directlyComprises"),
            opaque_namespaces: vec![PROV.to_owned()],
        }
    }
}

impl Vocabulary {
    /// Returns true for the two designated hierarchy roots.
    #[must_use]
    pub fn is_root(&self, class: &str) -> bool {
        class == self.identified || class == self.top_level
    }

    /// Returns true if `class` lives in an opaque external ontology.
    #[must_use]
    pub fn is_opaque(&self, class: &str) -> bool {
        self.opaque_namespaces
            .iter()
            .any(|ns| in_namespace(class, ns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_sbol3() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_root("http://sbols.org/v3#TopLevel"));
        assert!(vocab.is_root("http://sbols.org/v3#Identified"));
        assert!(!vocab.is_root("http://sbols.org/v3#Component"));
        assert!(vocab.is_opaque("http://www.w3.org/ns/prov#Activity"));
    }
}
