//! `ontoforge`: compiles ontology namespaces into runtime class tables.
//!
//! **Commands:**
//! - `compile`: loads the ontologies, compiles each `--module` in order and
//!   prints one report per module; `--schema` writes the class tables as JSON
//! - `inspect`: prints what the query layer derives for one class
//! - `validate`: compiles the modules, reads an instance graph through the
//!   class registry and checks it against the compiled cardinalities
//!
//! **Usage:**
//! ```text
//! ontoforge compile <ONTOLOGY>... --module [NAME=]NAMESPACE... [--config <path>] [--schema <path>] [--json]
//! ontoforge inspect <ONTOLOGY>... --class <URI> [--json]
//! ontoforge validate <ONTOLOGY>... --module [NAME=]NAMESPACE... --data <path>
//! ```
//!
//! Each module may derive from the modules listed before it. Logging goes to
//! stderr; `--verbose` raises the default level to `info` and `RUST_LOG`
//! overrides both.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use ontoforge_compiler::{
    CardinalityValidator, CompilationContext, CompilationReport, CompiledModule, CompilerConfig,
    Document,
};
use ontoforge_graph::OntologyGraph;
use ontoforge_query::QueryEngine;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

/// Compile ontology namespaces into class tables.
#[derive(Parser)]
#[command(name = "ontoforge", about = "Compile ontology namespaces into class tables")]
struct Cli {
    /// Log compiler progress at `info` level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile namespaces, dependencies first.
    Compile {
        #[command(flatten)]
        input: Input,
        /// Write the compiled class tables to this file as JSON.
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Print the compilation reports as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show superclass, properties and required arguments of one class.
    Inspect {
        /// Ontology files, or directories of `.ttl` and `.nt` files.
        #[arg(required = true)]
        ontologies: Vec<PathBuf>,
        /// Class URI.
        #[arg(long)]
        class: String,
        /// Compiler configuration (TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check an instance graph against the compiled modules.
    Validate {
        #[command(flatten)]
        input: Input,
        /// Instance graph, Turtle or N-Triples.
        #[arg(long)]
        data: PathBuf,
    },
}

#[derive(clap::Args)]
struct Input {
    /// Ontology files, or directories of `.ttl` and `.nt` files.
    #[arg(required = true)]
    ontologies: Vec<PathBuf>,
    /// Namespace to compile as `[NAME=]NAMESPACE`. Repeatable, in dependency
    /// order; without a name the graph's prefix for the namespace is used.
    #[arg(long = "module", required = true)]
    modules: Vec<ModuleArg>,
    /// Compiler configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct ModuleArg {
    name: Option<String>,
    namespace: String,
}

impl FromStr for ModuleArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `uml=http://...` names the module; a bare IRI contains a scheme colon
        // before any `=`.
        let (name, namespace) = match s.split_once('=') {
            Some((name, namespace)) if !name.contains(':') => (Some(name.to_owned()), namespace),
            _ => (None, s),
        };
        if namespace.is_empty() {
            return Err(format!("missing namespace in `{s}`"));
        }
        Ok(Self {
            name: name.filter(|n| !n.is_empty()),
            namespace: namespace.to_owned(),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Compile {
            input,
            schema,
            json,
        } => {
            let (context, reports) = compile(&input)?;
            if json {
                let out = serde_json::to_string_pretty(&reports)
                    .context("Failed to serialize compilation reports")?;
                println!("{out}");
            } else {
                for report in &reports {
                    print_report(report);
                }
            }
            if let Some(path) = schema {
                let modules: Vec<&CompiledModule> = context.modules().collect();
                let out = serde_json::to_string_pretty(&modules)
                    .context("Failed to serialize class tables")?;
                fs::write(&path, out)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("  Written: {}", path.display());
            }
        }
        Command::Inspect {
            ontologies,
            class,
            config,
            json,
        } => {
            let context = load(&ontologies, config.as_deref())?;
            inspect(&context.query(), &class, json)?;
        }
        Command::Validate { input, data } => {
            let (context, _) = compile(&input)?;
            let mut graph = OntologyGraph::new();
            graph
                .load(&data)
                .with_context(|| format!("Failed to read instance graph {}", data.display()))?;
            let document = Document::read(&graph, context.registry())
                .with_context(|| format!("Failed to instantiate {}", data.display()))?;
            let report = document.validate(&CardinalityValidator::new(context.registry()));
            for violation in &report.violations {
                println!("  {violation}");
            }
            if !report.conforms {
                bail!(
                    "{} does not conform: {} violation(s)",
                    data.display(),
                    report.violations.len()
                );
            }
            println!(
                "{} conforms ({} top-level instances)",
                data.display(),
                document.instances().len()
            );
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

/// Expands directories into the ontology files beneath them, sorted.
fn ontology_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry =
                entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            let is_ontology = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| matches!(e, "ttl" | "nt"));
            if entry.file_type().is_file() && is_ontology {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn load(ontologies: &[PathBuf], config: Option<&Path>) -> Result<CompilationContext> {
    let config = match config {
        Some(path) => CompilerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CompilerConfig::default(),
    };
    let mut context = CompilationContext::new(config);
    for file in ontology_files(ontologies)? {
        let added = context
            .load(&file)
            .with_context(|| format!("Failed to load {}", file.display()))?;
        tracing::info!(path = %file.display(), triples = added, "loaded ontology");
    }
    Ok(context)
}

fn compile(input: &Input) -> Result<(CompilationContext, Vec<CompilationReport>)> {
    let mut context = load(&input.ontologies, input.config.as_deref())?;
    let mut compiled: Vec<String> = Vec::new();
    let mut reports = Vec::new();
    for module in &input.modules {
        let name = match &module.name {
            Some(name) => name.clone(),
            None => context.module_name_for(&module.namespace).with_context(|| {
                format!(
                    "No module name for {}; pass it as NAME={}",
                    module.namespace, module.namespace
                )
            })?,
        };
        let deps: Vec<&str> = compiled.iter().map(String::as_str).collect();
        let report = context
            .compile_module(&name, &module.namespace, &deps)
            .with_context(|| format!("Failed to compile {name} ({})", module.namespace))?;
        compiled.push(module.namespace.clone());
        reports.push(report);
    }
    Ok((context, reports))
}

fn print_report(report: &CompilationReport) {
    println!(
        "{} <{}>: {} classes, {} properties, {} builders",
        report.module,
        report.namespace,
        report.compiled.len(),
        report.property_count,
        report.builder_count
    );
    for skipped in &report.skipped {
        println!(
            "  skipped {} on {}: {}",
            skipped.property, skipped.class, skipped.reason
        );
    }
}

fn inspect(query: &QueryEngine<'_>, class: &str, json: bool) -> Result<()> {
    if !query.classes().iter().any(|c| c == class) {
        bail!("{class} is not declared as a class");
    }
    let label = query.label(class).ok();
    let superclass = query.superclass(class).ok();
    let required = query
        .required_properties(class)
        .with_context(|| format!("Failed to derive required properties of {class}"))?;

    let mut properties = Vec::new();
    for property in query.object_properties(class) {
        let kind = if query.is_compositional(&property) {
            "owned"
        } else {
            "reference"
        };
        properties.push(describe(query, class, &property, kind)?);
    }
    for property in query.datatype_properties(class) {
        properties.push(describe(query, class, &property, "datatype")?);
    }

    if json {
        let value = serde_json::json!({
            "class": class,
            "label": label,
            "comment": query.comment(class),
            "superclass": superclass,
            "ancestors": query.ancestors(class),
            "subclasses": query.subclasses(class),
            "top_level": query.is_top_level(class),
            "required": required,
            "properties": properties,
        });
        let out = serde_json::to_string_pretty(&value).context("Failed to serialize class")?;
        println!("{out}");
        return Ok(());
    }

    println!("{class}");
    println!("  label:      {}", label.as_deref().unwrap_or("-"));
    println!("  superclass: {}", superclass.as_deref().unwrap_or("-"));
    println!("  ancestors:  {}", query.ancestors(class).join(" > "));
    println!("  top level:  {}", query.is_top_level(class));
    println!("  required:   {}", required.join(", "));
    for property in &properties {
        println!(
            "  {} [{}] {} -> {}",
            property["property"].as_str().unwrap_or_default(),
            property["kind"].as_str().unwrap_or_default(),
            property["cardinality"].as_str().unwrap_or_default(),
            property["range"]
                .as_array()
                .map(|r| {
                    r.iter()
                        .filter_map(serde_json::Value::as_str)
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn describe(
    query: &QueryEngine<'_>,
    class: &str,
    property: &str,
    kind: &str,
) -> Result<serde_json::Value> {
    let cardinality = query
        .cardinality(property, class)
        .with_context(|| format!("Failed to read cardinality of {property}"))?;
    let range = query
        .property_datatype(property, class)
        .with_context(|| format!("Failed to read the range of {property}"))?;
    Ok(serde_json::json!({
        "property": property,
        "label": query.label(property).ok(),
        "kind": kind,
        "cardinality": cardinality.to_string(),
        "range": range,
    }))
}
