//! Constraint validation seam.
//!
//! The compiler does not define a constraint language. Validators consume
//! the N-Triples a [`Document`] writes and answer with a
//! [`ValidationReport`]. [`CardinalityValidator`] is the built-in one: it
//! reads the graph back through the class registry and checks every slot
//! against its compiled bounds.

use std::fmt;

use ontoforge_graph::OntologyGraph;
use serde::Serialize;

use crate::document::Document;
use crate::instance::Instance;
use crate::registry::ClassRegistry;

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The offending node.
    pub focus: String,
    /// The property involved, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a violation on `focus`.
    pub fn new(focus: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            focus: focus.into(),
            path: None,
            message: message.into(),
        }
    }

    /// Attaches the property path.
    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({}): {}", self.focus, path, self.message),
            None => write!(f, "{}: {}", self.focus, self.message),
        }
    }
}

/// Outcome of validating one serialized instance graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True when there are no violations.
    pub conforms: bool,
    /// Every violation found.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Builds a report; it conforms exactly when `violations` is empty.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            conforms: violations.is_empty(),
            violations,
        }
    }

    /// The first violation message, or an empty string when conforming.
    #[must_use]
    pub fn message(&self) -> String {
        self.violations
            .first()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// An external constraint checker.
pub trait ConstraintValidator {
    /// Validates an N-Triples serialization of an instance graph.
    fn validate(&self, ntriples: &str) -> ValidationReport;
}

impl Document {
    /// Serializes the document and hands it to `validator`.
    #[must_use]
    pub fn validate(&self, validator: &dyn ConstraintValidator) -> ValidationReport {
        validator.validate(&self.to_ntriples())
    }
}

/// Checks compiled cardinalities and slot types of every registered instance.
#[derive(Debug, Clone, Copy)]
pub struct CardinalityValidator<'r> {
    registry: &'r ClassRegistry,
}

impl<'r> CardinalityValidator<'r> {
    /// Creates a validator that reads instances through `registry`.
    #[must_use]
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self { registry }
    }
}

impl ConstraintValidator for CardinalityValidator<'_> {
    fn validate(&self, ntriples: &str) -> ValidationReport {
        let mut graph = OntologyGraph::new();
        if let Err(e) = graph.parse_ntriples(ntriples) {
            return ValidationReport::from_violations(vec![Violation::new("", e.to_string())]);
        }
        let document = match Document::read(&graph, self.registry) {
            Ok(document) => document,
            Err(e) => {
                return ValidationReport::from_violations(vec![Violation::new("", e.to_string())])
            }
        };
        let mut violations = Vec::new();
        for instance in document.instances() {
            check(instance, &mut violations);
        }
        ValidationReport::from_violations(violations)
    }
}

fn check(instance: &Instance, violations: &mut Vec<Violation>) {
    for violation in instance.cardinality_violations() {
        violations.push(
            Violation::new(
                instance.identity(),
                format!(
                    "expected {} value(s), found {}",
                    violation.cardinality, violation.count
                ),
            )
            .at(violation.property),
        );
    }
    for diagnostic in instance.diagnostics() {
        violations.push(
            Violation::new(instance.identity(), diagnostic.error.to_string())
                .at(diagnostic.property.clone()),
        );
    }
    for child in instance.children() {
        check(child, violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_conforms_without_violations() {
        let report = ValidationReport::from_violations(Vec::new());
        assert!(report.conforms);
        assert_eq!(report.message(), "");
    }

    #[test]
    fn message_is_first_violation() {
        let report = ValidationReport::from_violations(vec![
            Violation::new("http://test.org/a", "expected 1..1 value(s), found 0").at("name"),
            Violation::new("http://test.org/b", "second"),
        ]);
        assert!(!report.conforms);
        assert_eq!(
            report.message(),
            "http://test.org/a (name): expected 1..1 value(s), found 0"
        );
    }

    #[test]
    fn unparseable_input_is_a_violation() {
        let registry = ClassRegistry::new();
        let report = CardinalityValidator::new(&registry).validate("not n-triples");
        assert!(!report.conforms);
    }

    #[test]
    fn empty_graph_conforms() {
        let registry = ClassRegistry::new();
        let report = CardinalityValidator::new(&registry).validate("");
        assert!(report.conforms);
    }
}
