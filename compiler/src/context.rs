//! The compilation context.
//!
//! One [`CompilationContext`] owns everything a compiler run reads or
//! produces: the merged ontology graph, the configuration, the compiled
//! modules keyed by namespace and the class registry. Nothing is global;
//! [`CompilationContext::reset`] returns the context to its freshly created
//! state.

use std::collections::BTreeMap;
use std::path::Path;

use ontoforge_graph::{local_name, OntologyGraph};
use ontoforge_query::{QueryEngine, Vocabulary};

use crate::base;
use crate::compile::{compile_namespace, Compilation};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::module::CompiledModule;
use crate::registry::ClassRegistry;
use crate::report::CompilationReport;

/// Graph, configuration, compiled modules and class registry of one
/// compilation session.
#[derive(Debug)]
pub struct CompilationContext {
    graph: OntologyGraph,
    config: CompilerConfig,
    vocab: Vocabulary,
    modules: BTreeMap<String, CompiledModule>,
    registry: ClassRegistry,
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl CompilationContext {
    /// Creates a context whose graph holds the bundled base ontologies, or
    /// nothing if `config.base_ontologies` is off.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        let vocab = config.vocabulary();
        let graph = Self::seed(&config);
        Self {
            graph,
            config,
            vocab,
            modules: BTreeMap::new(),
            registry: ClassRegistry::new(),
        }
    }

    fn seed(config: &CompilerConfig) -> OntologyGraph {
        if !config.base_ontologies {
            return OntologyGraph::new();
        }
        let graph = base::graph();
        tracing::debug!(triples = graph.len(), "seeded graph with base ontologies");
        graph
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The merged ontology graph.
    #[must_use]
    pub fn graph(&self) -> &OntologyGraph {
        &self.graph
    }

    /// Mutable access for additive merges.
    pub fn graph_mut(&mut self) -> &mut OntologyGraph {
        &mut self.graph
    }

    /// Merges an ontology file into the graph.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Graph`] if the file cannot be read or parsed.
    pub fn load(&mut self, path: &Path) -> Result<usize, CompileError> {
        Ok(self.graph.load(path)?)
    }

    /// Merges a Turtle document into the graph.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Graph`] if the document does not parse.
    pub fn load_turtle(&mut self, src: &str) -> Result<usize, CompileError> {
        Ok(self.graph.parse_turtle(src)?)
    }

    /// A query engine over the current graph.
    #[must_use]
    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.graph, &self.vocab)
    }

    /// Compiles every class of `namespace` into the module `name`.
    ///
    /// `deps` names the namespaces of previously compiled modules whose
    /// classes may serve as superclasses. Recompiling a namespace only adds
    /// the classes the graph has gained since, and must use the module's
    /// original name. The module and its builders are committed only if every
    /// class compiles.
    ///
    /// # Errors
    ///
    /// [`CompileError::ModuleRenamed`] if `namespace` is already compiled
    /// under another name, [`CompileError::MissingDependency`] if a dependency
    /// has not been compiled, otherwise the first error raised while
    /// compiling.
    pub fn compile_module(
        &mut self,
        name: &str,
        namespace: &str,
        deps: &[&str],
    ) -> Result<CompilationReport, CompileError> {
        let Compilation {
            module,
            registry,
            report,
        } = {
            if let Some(existing) = self.modules.get(namespace) {
                if existing.name() != name {
                    return Err(CompileError::ModuleRenamed {
                        namespace: namespace.to_owned(),
                        existing: existing.name().to_owned(),
                        requested: name.to_owned(),
                    });
                }
            }
            let dep_modules = deps
                .iter()
                .map(|ns| {
                    self.modules
                        .get(*ns)
                        .ok_or_else(|| CompileError::MissingDependency((*ns).to_owned()))
                })
                .collect::<Result<Vec<&CompiledModule>, _>>()?;
            compile_namespace(
                &self.graph,
                &self.config,
                name,
                namespace,
                &dep_modules,
                self.modules.get(namespace),
            )?
        };

        let mut staged = self.registry.clone();
        staged.absorb(registry)?;
        self.registry = staged;
        self.modules.insert(namespace.to_owned(), module);
        Ok(report)
    }

    /// The module compiled for `namespace`.
    #[must_use]
    pub fn module(&self, namespace: &str) -> Option<&CompiledModule> {
        self.modules.get(namespace)
    }

    /// The module named `name`.
    #[must_use]
    pub fn module_named(&self, name: &str) -> Option<&CompiledModule> {
        self.modules.values().find(|m| m.name() == name)
    }

    /// Every compiled module, by namespace.
    pub fn modules(&self) -> impl Iterator<Item = &CompiledModule> {
        self.modules.values()
    }

    /// The class registry.
    #[must_use]
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Derives a module name for `namespace` from the graph's prefix
    /// bindings, falling back to the last path segment of the namespace.
    #[must_use]
    pub fn module_name_for(&self, namespace: &str) -> Option<String> {
        if let Some(prefix) = self.graph.prefixes().prefix(namespace) {
            if !prefix.is_empty() {
                return Some(prefix.to_owned());
            }
        }
        let trimmed = namespace.trim_end_matches(&['#', '/'][..]);
        let segment = local_name(trimmed);
        (!segment.is_empty() && segment != trimmed).then(|| segment.to_owned())
    }

    /// Returns the graph to its seeded state, evicts every compiled module
    /// and empties the registry. The configuration is kept.
    pub fn reset(&mut self) {
        self.graph = Self::seed(&self.config);
        self.modules.clear();
        self.registry.clear();
        tracing::debug!("compilation context reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_names_come_from_prefixes() {
        let mut context = CompilationContext::default();
        context.graph_mut().bind("uml", "http://bioprotocols.org/uml#");
        assert_eq!(
            context.module_name_for("http://bioprotocols.org/uml#").as_deref(),
            Some("uml")
        );
        assert_eq!(
            context.module_name_for("http://bioprotocols.org/paml#").as_deref(),
            Some("paml")
        );
        assert_eq!(context.module_name_for("urn:x").as_deref(), None);
    }

    #[test]
    fn missing_dependency_is_reported() {
        let mut context = CompilationContext::default();
        let result = context.compile_module(
            "paml",
            "http://bioprotocols.org/paml#",
            &["http://bioprotocols.org/uml#"],
        );
        assert!(matches!(result, Err(CompileError::MissingDependency(_))));
    }

    #[test]
    fn fresh_context_holds_base_ontologies() {
        let context = CompilationContext::default();
        assert!(context
            .query()
            .classes()
            .iter()
            .any(|c| c == "http://sbols.org/v3#Component"));
        assert_eq!(
            context.module_name_for("http://www.w3.org/ns/prov#").as_deref(),
            Some("prov")
        );

        let bare = CompilationContext::new(CompilerConfig {
            base_ontologies: false,
            ..CompilerConfig::default()
        });
        assert!(bare.graph().is_empty());
    }
}
