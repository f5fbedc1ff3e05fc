//! Compilation report: what a namespace compilation produced.

use serde::Serialize;

/// A datatype property left without a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProperty {
    /// Class the property was found on.
    pub class: String,
    /// Property URI.
    pub property: String,
    /// Why no slot was generated.
    pub reason: String,
}

/// Summary of one `compile_module` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilationReport {
    /// Module name.
    pub module: String,
    /// Target namespace.
    pub namespace: String,
    /// URIs of classes compiled by this run, superclasses first.
    pub compiled: Vec<String>,
    /// Number of property rows across the newly compiled classes.
    pub property_count: usize,
    /// Number of builders registered.
    pub builder_count: usize,
    /// Datatype properties without a usable datatype.
    pub skipped: Vec<SkippedProperty>,
}

impl CompilationReport {
    /// Creates an empty report for `module`.
    pub fn new(module: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// True if the run compiled nothing new.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.compiled.is_empty()
    }
}
