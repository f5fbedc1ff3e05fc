//! The schema compiler.
//!
//! [`Compiler::compile`] walks one class at a time, superclass first, and
//! binds a [`CompiledClass`] for it in the module's symbol table:
//!
//! 1. Classes outside the target namespace are left alone.
//! 2. The superclass is resolved and compiled first.
//! 3. A class already bound in the symbol table is not compiled again.
//! 4. The superclass constructor is looked up in three tiers: the symbol
//!    table being built, the base-type mapping, then the dependency modules
//!    of the superclass's namespace.
//! 5. Object and datatype properties are gathered with their field names,
//!    cardinalities and value types.
//! 6. The class record is assembled, including the implicit marker type.
//! 7. Keyword overrides are applied at construction time, see
//!    [`Instance::construct`](crate::instance::Instance::construct).
//! 8. The class is bound under its unqualified name and its builder is
//!    registered under its URI.
//!
//! Builders are staged in the compiler and handed back by
//! [`Compiler::finish`]; [`compile_namespace`] only returns them once every
//! class of the namespace has compiled.

use std::sync::Arc;

use ontoforge_graph::{in_namespace, local_name, OntologyGraph};
use ontoforge_query::{namespace as namespace_of_uri, QueryEngine, QueryError};

use crate::class::{field_name, CompiledClass, Parent, Primitive, PropertyDef, PropertyKind};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::module::CompiledModule;
use crate::registry::{Builder, ClassRegistry};
use crate::report::{CompilationReport, SkippedProperty};

/// Recursive class compiler for one namespace.
#[derive(Debug)]
pub struct Compiler<'a> {
    query: QueryEngine<'a>,
    config: &'a CompilerConfig,
    deps: &'a [&'a CompiledModule],
    registry: ClassRegistry,
    report: CompilationReport,
    in_progress: Vec<String>,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler that may resolve superclasses from `deps`.
    #[must_use]
    pub fn new(
        query: QueryEngine<'a>,
        config: &'a CompilerConfig,
        deps: &'a [&'a CompiledModule],
    ) -> Self {
        Self {
            query,
            config,
            deps,
            registry: ClassRegistry::new(),
            report: CompilationReport::default(),
            in_progress: Vec::new(),
        }
    }

    /// Compiles `class_uri` into `table` if it lies in `namespace`.
    ///
    /// Compiling a class already in `table`, or one outside `namespace`,
    /// leaves `table` unchanged and succeeds.
    ///
    /// # Errors
    ///
    /// Any query failure, an unresolved superclass constructor, a
    /// cross-module cycle, or a datatype property resolving to several
    /// datatypes.
    pub fn compile(
        &mut self,
        class_uri: &str,
        table: &mut CompiledModule,
        namespace: &str,
    ) -> Result<(), CompileError> {
        // The hierarchy roots are base types even inside their own namespace.
        if !in_namespace(class_uri, namespace) || self.query.vocabulary().is_root(class_uri) {
            return Ok(());
        }
        if self.in_progress.iter().any(|c| c == class_uri) {
            return Err(QueryError::CyclicHierarchy(class_uri.to_owned()).into());
        }

        let superclass = self.query.superclass(class_uri)?;
        self.in_progress.push(class_uri.to_owned());
        let outcome = self.compile(&superclass, table, namespace);
        self.in_progress.pop();
        outcome?;

        let name = local_name(class_uri);
        if let Some(existing) = table.get(name) {
            if existing.uri == class_uri {
                return Ok(());
            }
            return Err(CompileError::NameCollision {
                name: name.to_owned(),
                existing: existing.uri.clone(),
                uri: class_uri.to_owned(),
            });
        }

        let parent = self.resolve_parent(class_uri, &superclass, table, namespace)?;
        let properties = self.property_table(class_uri)?;
        let top_level = self.query.is_top_level(class_uri);
        let marker = self
            .config
            .marker_for(&superclass, top_level)
            .map(str::to_owned);
        let required = self
            .query
            .required_properties(class_uri)?
            .iter()
            .map(|label| field_name(label))
            .collect();

        let label = match self.query.label(class_uri) {
            Ok(label) => Some(label),
            Err(QueryError::MissingLabel(_)) => None,
            Err(e) => return Err(e.into()),
        };

        let class = Arc::new(CompiledClass {
            uri: class_uri.to_owned(),
            name: name.to_owned(),
            label,
            parent,
            top_level,
            marker,
            required,
            properties,
        });
        log_class(&class);

        table.insert(Arc::clone(&class));
        self.report.property_count += class.properties.len();
        self.report.compiled.push(class.uri.clone());
        self.registry.register(Builder::new(class))?;
        Ok(())
    }

    /// Hands back the staged builders and the run's report.
    #[must_use]
    pub fn finish(self) -> (ClassRegistry, CompilationReport) {
        let mut report = self.report;
        report.builder_count = self.registry.len();
        (self.registry, report)
    }

    fn resolve_parent(
        &self,
        class_uri: &str,
        superclass: &str,
        table: &CompiledModule,
        namespace: &str,
    ) -> Result<Parent, CompileError> {
        if let Some(parent) = table.get_by_uri(superclass) {
            return Ok(Parent::Class(Arc::clone(parent)));
        }
        if let Some(base) = self
            .config
            .base_class(superclass, || self.query.is_top_level(superclass))
        {
            return Ok(Parent::Base(base));
        }

        let super_namespace = namespace_of_uri(superclass)?;
        let from_dependency = self
            .deps
            .iter()
            .filter(|module| module.namespace() == super_namespace)
            .find_map(|module| module.get_by_uri(superclass));
        if let Some(parent) = from_dependency {
            return Ok(Parent::Class(Arc::clone(parent)));
        }

        // The superclass's own hierarchy leads back into this namespace, so
        // no compile order can satisfy both modules.
        let cyclic = self
            .query
            .ancestors(superclass)
            .iter()
            .skip(1)
            .any(|ancestor| in_namespace(ancestor, namespace));
        if cyclic {
            return Err(CompileError::CyclicDependency {
                namespace: namespace.to_owned(),
                superclass: superclass.to_owned(),
            });
        }
        Err(CompileError::UnresolvedSuperclassConstructor {
            class: class_uri.to_owned(),
            superclass: superclass.to_owned(),
        })
    }

    fn property_table(&mut self, class_uri: &str) -> Result<Vec<PropertyDef>, CompileError> {
        let mut rows = Vec::new();

        let compositional = self.query.compositional_properties(class_uri);
        for property in self.query.object_properties(class_uri) {
            let targets = self.query.property_datatype(&property, class_uri)?;
            let kind = if compositional.contains(&property) {
                PropertyKind::Owned { targets }
            } else {
                PropertyKind::Reference { targets }
            };
            rows.push(PropertyDef {
                name: field_name(&self.query.label(&property)?),
                cardinality: self.query.cardinality(&property, class_uri)?,
                uri: property,
                kind,
            });
        }

        for property in self.query.datatype_properties(class_uri) {
            let name = field_name(&self.query.label(&property)?);
            let cardinality = self.query.cardinality(&property, class_uri)?;
            let datatypes = self.query.property_datatype(&property, class_uri)?;
            let primitive = match datatypes.as_slice() {
                [] => {
                    self.skip(class_uri, &property, "no datatype declared".to_owned());
                    continue;
                }
                [datatype] => match Primitive::from_xsd(datatype) {
                    Some(primitive) => primitive,
                    None => {
                        self.skip(class_uri, &property, format!("unsupported datatype {datatype}"));
                        continue;
                    }
                },
                _ => {
                    return Err(CompileError::ConflictingRestriction {
                        property,
                        class: class_uri.to_owned(),
                        datatypes,
                    })
                }
            };
            rows.push(PropertyDef {
                uri: property,
                name,
                kind: PropertyKind::Datatype { primitive },
                cardinality,
            });
        }
        Ok(rows)
    }

    fn skip(&mut self, class_uri: &str, property: &str, reason: String) {
        tracing::warn!(class = %class_uri, property = %property, %reason, "skipping datatype property");
        self.report.skipped.push(SkippedProperty {
            class: class_uri.to_owned(),
            property: property.to_owned(),
            reason,
        });
    }
}

fn log_class(class: &CompiledClass) {
    tracing::info!(
        class = %class.name,
        uri = %class.uri,
        parent = %class.parent.uri(),
        top_level = class.top_level,
        properties = class.properties.len(),
        "compiled class"
    );
    for property in &class.properties {
        let target = match &property.kind {
            PropertyKind::Datatype { primitive } => primitive.to_string(),
            other => other
                .targets()
                .iter()
                .map(|t| local_name(t))
                .collect::<Vec<_>>()
                .join("|"),
        };
        tracing::debug!(
            class = %class.name,
            property = %property.name,
            kind = property.kind.tag(),
            %target,
            lower = property.cardinality.lower,
            upper = ?property.cardinality.upper,
            "property"
        );
    }
}

/// Output of one namespace compilation.
#[derive(Debug)]
pub struct Compilation {
    /// The namespace's symbol table.
    pub module: CompiledModule,
    /// Builders for the classes compiled by this run.
    pub registry: ClassRegistry,
    /// Run summary.
    pub report: CompilationReport,
}

/// Compiles every class of `namespace` found in `graph`.
///
/// `existing` seeds the symbol table when a namespace is recompiled against a
/// grown graph; classes already in it are not compiled again. Superclasses in
/// other namespaces resolve through the base-type mapping of `config` or
/// through `deps`.
///
/// # Errors
///
/// The first [`CompileError`] raised by any class. Nothing is returned for a
/// failed run, so no class of the namespace is registered.
pub fn compile_namespace(
    graph: &OntologyGraph,
    config: &CompilerConfig,
    name: &str,
    namespace: &str,
    deps: &[&CompiledModule],
    existing: Option<&CompiledModule>,
) -> Result<Compilation, CompileError> {
    let vocab = config.vocabulary();
    let query = QueryEngine::new(graph, &vocab);
    let mut module = existing
        .cloned()
        .unwrap_or_else(|| CompiledModule::new(name, namespace));

    let mut compiler = Compiler::new(query, config, deps);
    for class_uri in query.classes() {
        compiler.compile(&class_uri, &mut module, namespace)?;
    }
    let (registry, mut report) = compiler.finish();
    report.module = module.name().to_owned();
    report.namespace = namespace.to_owned();
    tracing::info!(
        module = %report.module,
        namespace = %report.namespace,
        compiled = report.compiled.len(),
        total = module.len(),
        "compiled module"
    );
    Ok(Compilation {
        module,
        registry,
        report,
    })
}
