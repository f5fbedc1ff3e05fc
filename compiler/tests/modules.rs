//! Two-module compilation: `uml` first, then `paml` building on it.

use std::path::Path;
use std::sync::Arc;

use ontoforge_compiler::{
    CardinalityValidator, CompilationContext, CompileError, CompiledModule, Compiler,
    CompilerConfig, Dispatcher, Document, Instance, Parent, Primitive, PropertyKind, Value,
};
use ontoforge_graph::OntologyGraph;
use ontoforge_query::{Cardinality, QueryEngine, QueryError};
use pretty_assertions::assert_eq;

const MODULES: &str = include_str!("fixtures/modules.ttl");

const UML: &str = "http://bioprotocols.org/uml#";
const PAML: &str = "http://bioprotocols.org/paml#";

fn loaded() -> CompilationContext {
    let mut context = CompilationContext::default();
    let added = context.load_turtle(MODULES).expect("fixture parses");
    assert!(added > 0);
    context
}

fn compiled() -> CompilationContext {
    let mut context = loaded();
    context.compile_module("uml", UML, &[]).expect("uml compiles");
    context
        .compile_module("paml", PAML, &[UML])
        .expect("paml compiles");
    context
}

fn execution(context: &CompilationContext) -> Instance {
    context
        .registry()
        .build(
            "http://test.org/BX",
            "http://bioprotocols.org/paml#BehaviorExecution",
        )
        .expect("BehaviorExecution has a builder")
}

#[test]
fn uml_then_paml() {
    let mut context = loaded();
    let uml = context.compile_module("uml", UML, &[]).expect("uml compiles");
    assert_eq!(
        uml.compiled,
        vec![
            "http://bioprotocols.org/uml#Activity".to_string(),
            "http://bioprotocols.org/uml#ActivityNode".to_string(),
            "http://bioprotocols.org/uml#InitialNode".to_string(),
        ]
    );
    let paml = context
        .compile_module("paml", PAML, &[UML])
        .expect("paml compiles");
    assert_eq!(paml.module, "paml");
    assert_eq!(paml.builder_count, 3);

    let names: Vec<&str> = context
        .modules()
        .map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["paml", "uml"]);

    let instance = execution(&context);
    assert!(instance.is_a("http://bioprotocols.org/uml#Activity"));
    assert!(instance.is_a("http://sbols.org/v3#TopLevel"));
    assert_eq!(
        instance.class().ancestors(),
        vec![
            "http://bioprotocols.org/paml#BehaviorExecution",
            "http://bioprotocols.org/uml#Activity",
            "http://sbols.org/v3#TopLevel",
        ]
    );
}

#[test]
fn dependency_classes_are_shared_not_copied() {
    let context = compiled();
    let uml = context.module(UML).expect("uml module");
    let paml = context.module_named("paml").expect("paml module");
    let activity = uml.get("Activity").expect("Activity");
    let bx = paml.get("BehaviorExecution").expect("BehaviorExecution");
    match &bx.parent {
        Parent::Class(parent) => assert!(Arc::ptr_eq(parent, activity)),
        Parent::Base(base) => panic!("unexpected base parent {}", base.uri),
    }
}

#[test]
fn paml_without_uml_is_unresolved() {
    let mut context = loaded();
    let result = context.compile_module("paml", PAML, &[]);
    assert!(matches!(
        result,
        Err(CompileError::UnresolvedSuperclassConstructor { ref superclass, .. })
            if superclass == "http://bioprotocols.org/uml#Activity"
    ));
    assert!(context.module(PAML).is_none());
    assert!(context.registry().is_empty());
}

#[test]
fn required_arguments_follow_the_hierarchy() {
    let context = compiled();
    let activity = context
        .module(UML)
        .and_then(|m| m.get("Activity"))
        .expect("Activity");
    assert_eq!(activity.required, vec!["identity", "display_name"]);

    let bx = context
        .module(PAML)
        .and_then(|m| m.get("BehaviorExecution"))
        .expect("BehaviorExecution");
    assert_eq!(bx.required, vec!["identity", "display_name", "started_at"]);

    let instance = execution(&context);
    assert_eq!(instance.missing(), vec!["display_name", "started_at"]);
}

#[test]
fn property_table_of_activity() {
    let context = compiled();
    let activity = context
        .module(UML)
        .and_then(|m| m.get("Activity"))
        .expect("Activity");
    let rows: Vec<(&str, &str, String)> = activity
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.kind.tag(), p.cardinality.to_string()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("nodes", "owned", "0..*".to_string()),
            ("display_name", "datatype", "1..1".to_string()),
            ("is_reentrant", "datatype", "0..1".to_string()),
        ]
    );
    assert_eq!(
        activity.property("nodes").map(|p| p.kind.targets().to_vec()),
        Some(vec!["http://bioprotocols.org/uml#ActivityNode".to_string()])
    );
    assert_eq!(
        activity.property("is_reentrant").map(|p| p.kind.clone()),
        Some(PropertyKind::Datatype {
            primitive: Primitive::Boolean
        })
    );
}

#[test]
fn datetime_round_trips_unchanged() {
    let context = compiled();
    let timestamp = "2021-06-01T12:30:00.250+02:00";

    let mut instance = execution(&context);
    instance
        .set("display_name", vec![Value::Text("run 1".into())])
        .expect("display name accepted");
    instance
        .set("started_at", vec![Value::DateTime(timestamp.into())])
        .expect("timestamp accepted");
    assert_eq!(
        instance.get("started_at"),
        Some(&[Value::DateTime(timestamp.into())][..])
    );

    let mut document = Document::new();
    document.add(instance.clone());
    let ntriples = document.to_ntriples();
    assert!(ntriples.contains(&format!(
        "\"{timestamp}\"^^<http://www.w3.org/2001/XMLSchema#dateTime>"
    )));

    let mut graph = OntologyGraph::new();
    graph.parse_ntriples(&ntriples).expect("own output parses");
    let read = Document::read(&graph, context.registry()).expect("document reads");
    assert_eq!(read.instances(), &[instance][..]);
}

#[test]
fn malformed_datetime_is_rejected() {
    let context = compiled();
    let mut instance = execution(&context);
    let result = instance.set("started_at", vec![Value::DateTime("June 1st".into())]);
    assert!(result.is_err());
    assert!(instance.get("started_at").is_some_and(<[Value]>::is_empty));
}

#[test]
fn compiling_outside_the_namespace_is_a_no_op() {
    let context = loaded();
    let config = CompilerConfig::default();
    let vocab = config.vocabulary();
    let query = QueryEngine::new(context.graph(), &vocab);
    let deps: Vec<&CompiledModule> = Vec::new();
    let mut compiler = Compiler::new(query, &config, &deps);
    let mut table = CompiledModule::new("uml", UML);

    compiler
        .compile("http://bioprotocols.org/paml#SampleSet", &mut table, UML)
        .expect("no-op");
    assert!(table.is_empty());

    compiler
        .compile("http://bioprotocols.org/uml#InitialNode", &mut table, UML)
        .expect("InitialNode compiles");
    compiler
        .compile("http://bioprotocols.org/uml#InitialNode", &mut table, UML)
        .expect("second compile is a no-op");
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        vec!["ActivityNode", "InitialNode"]
    );

    let (registry, report) = compiler.finish();
    assert_eq!(registry.len(), 2);
    assert_eq!(report.builder_count, 2);
}

#[test]
fn recompiling_adds_only_new_classes() {
    let mut context = loaded();
    context.compile_module("uml", UML, &[]).expect("uml compiles");
    let before = context.registry().len();

    let again = context.compile_module("uml", UML, &[]).expect("recompile");
    assert!(again.is_unchanged());
    assert_eq!(context.registry().len(), before);

    context
        .load_turtle(
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
             @prefix uml: <http://bioprotocols.org/uml#> .
             uml:FinalNode a owl:Class ; rdfs:subClassOf uml:ActivityNode .",
        )
        .expect("addition parses");
    let grown = context.compile_module("uml", UML, &[]).expect("recompile");
    assert_eq!(
        grown.compiled,
        vec!["http://bioprotocols.org/uml#FinalNode".to_string()]
    );
    assert_eq!(context.registry().len(), before + 1);
    assert_eq!(context.module(UML).map(CompiledModule::len), Some(4));
}

#[test]
fn marker_type_for_root_library_superclass() {
    let context = compiled();
    let sample_set = context
        .module(PAML)
        .and_then(|m| m.get("SampleSet"))
        .expect("SampleSet");
    assert_eq!(sample_set.marker.as_deref(), Some("http://sbols.org/v3#TopLevel"));
    assert_eq!(sample_set.parent.uri(), "http://sbols.org/v3#Component");

    let instance = context
        .registry()
        .build("http://test.org/samples", "http://bioprotocols.org/paml#SampleSet")
        .expect("SampleSet has a builder");
    assert_eq!(
        instance.types(),
        &[
            "http://bioprotocols.org/paml#SampleSet".to_string(),
            "http://sbols.org/v3#TopLevel".to_string(),
        ][..]
    );
}

#[test]
fn external_superclass_resolves_to_a_base() {
    let context = compiled();
    let run = context
        .module(PAML)
        .and_then(|m| m.get("Run"))
        .expect("Run");
    let base = run.base().expect("Run rests on a base type");
    assert_eq!(base.uri, "http://www.w3.org/ns/prov#Activity");
    assert!(base.top_level);
    assert_eq!(run.marker, None);
}

#[test]
fn unsupported_datatype_is_skipped_and_reported() {
    let mut context = loaded();
    context.compile_module("uml", UML, &[]).expect("uml compiles");
    let report = context
        .compile_module("paml", PAML, &[UML])
        .expect("paml compiles");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].property, "http://bioprotocols.org/paml#note");
    let sample_set = context
        .module(PAML)
        .and_then(|m| m.get("SampleSet"))
        .expect("SampleSet");
    assert!(sample_set.property("note").is_none());
}

#[test]
fn instance_graph_reads_with_owned_children() {
    let context = compiled();
    let mut graph = OntologyGraph::new();
    graph
        .parse_turtle(
            "@prefix uml: <http://bioprotocols.org/uml#> .
             <http://test.org/act> a uml:Activity ;
                 uml:displayName \"Demo\" ;
                 uml:nodes <http://test.org/act/start> .
             <http://test.org/act/start> a uml:InitialNode .",
        )
        .expect("instance graph parses");
    let document = Document::read(&graph, context.registry()).expect("document reads");

    assert_eq!(document.instances().len(), 1);
    let activity = &document.instances()[0];
    assert_eq!(activity.identity(), "http://test.org/act");
    assert_eq!(
        activity.get("display_name"),
        Some(&[Value::Text("Demo".into())][..])
    );
    let children: Vec<&str> = activity.children().map(Instance::identity).collect();
    assert_eq!(children, vec!["http://test.org/act/start"]);
    assert!(document.find("http://test.org/act/start").is_some());
}

#[test]
fn cardinality_validator_reports_unfilled_required_slots() {
    let context = compiled();
    let validator = CardinalityValidator::new(context.registry());

    let mut document = Document::new();
    document.add(execution(&context));
    let report = document.validate(&validator);
    assert!(!report.conforms);
    let paths: Vec<Option<&str>> = report
        .violations
        .iter()
        .map(|v| v.path.as_deref())
        .collect();
    assert_eq!(paths, vec![Some("display_name"), Some("started_at")]);

    let mut instance = execution(&context);
    instance
        .set("display_name", vec![Value::Text("run".into())])
        .expect("display name accepted");
    instance
        .set("started_at", vec![Value::DateTime("2021-06-01T12:30:00Z".into())])
        .expect("timestamp accepted");
    let mut document = Document::new();
    document.add(instance);
    assert!(document.validate(&validator).conforms);
}

#[test]
fn dispatch_walks_compiled_lineage() {
    let context = compiled();
    let mut visitor = Dispatcher::new();
    visitor
        .on("Activity", |i: &Instance| format!("activity {}", i.identity()))
        .on("Component", |i: &Instance| format!("component {}", i.identity()));

    assert_eq!(
        visitor.dispatch(&execution(&context)),
        Ok("activity http://test.org/BX".to_string())
    );
    let samples = context
        .registry()
        .build("http://test.org/s", "http://bioprotocols.org/paml#SampleSet")
        .expect("SampleSet has a builder");
    assert_eq!(
        visitor.dispatch(&samples),
        Ok("component http://test.org/s".to_string())
    );
}

#[test]
fn started_at_is_exactly_one_datetime() {
    let context = compiled();
    let bx = context
        .module(PAML)
        .and_then(|m| m.get("BehaviorExecution"))
        .expect("BehaviorExecution");
    let started_at = bx.property("started_at").expect("started_at");
    assert_eq!(started_at.cardinality, Cardinality::new(1, Some(1)));
    assert_eq!(
        started_at.kind,
        PropertyKind::Datatype {
            primitive: Primitive::DateTime
        }
    );
    assert!(bx.property("display_name").is_some());
}

#[test]
fn reset_clears_graph_modules_and_registry() {
    let mut context = compiled();
    context.reset();
    assert_eq!(
        context.graph().len(),
        CompilationContext::default().graph().len()
    );
    assert!(!context
        .query()
        .classes()
        .iter()
        .any(|c| c == "http://bioprotocols.org/uml#Activity"));
    assert_eq!(context.modules().count(), 0);
    assert!(context.registry().is_empty());

    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/modules.ttl");
    context.load(&fixture).expect("fixture loads");
    context.compile_module("uml", UML, &[]).expect("uml compiles again");
    assert!(context
        .registry()
        .contains("http://bioprotocols.org/uml#Activity"));
}

#[test]
fn class_tables_serialize_with_parent_uris() {
    let context = compiled();
    let paml = context.module(PAML).expect("paml module");
    let value = serde_json::to_value(paml).expect("module serializes");
    let classes = value["classes"].as_array().expect("class list");
    let bx = classes
        .iter()
        .find(|c| c["name"] == "BehaviorExecution")
        .expect("BehaviorExecution");
    assert_eq!(bx["parent"], "http://bioprotocols.org/uml#Activity");
    assert_eq!(bx["properties"][1]["name"], "started_at");
    assert_eq!(bx["properties"][1]["kind"], "datatype");
}

const BARE_UML: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix sbol: <http://sbols.org/v3#> .
@prefix uml: <http://bioprotocols.org/uml#> .
uml:Activity a owl:Class ; rdfs:label \"Activity\" ; rdfs:subClassOf sbol:TopLevel .
uml:Part a owl:Class ; rdfs:label \"Part\" ; rdfs:subClassOf sbol:Component .
";

#[test]
fn user_ontology_builds_on_bundled_sbol_classes() {
    let mut context = CompilationContext::default();
    context.load_turtle(BARE_UML).expect("ontology parses");
    let report = context.compile_module("uml", UML, &[]).expect("uml compiles");
    assert_eq!(report.compiled.len(), 2);
    assert!(context
        .registry()
        .contains("http://bioprotocols.org/uml#Activity"));
    let part = context
        .module(UML)
        .and_then(|m| m.get("Part"))
        .expect("Part");
    assert_eq!(part.marker.as_deref(), Some("http://sbols.org/v3#TopLevel"));
    assert_eq!(part.required, vec!["identity"]);
}

#[test]
fn without_base_ontologies_the_roots_are_undeclared() {
    let config = CompilerConfig {
        base_ontologies: false,
        ..CompilerConfig::default()
    };
    let mut context = CompilationContext::new(config);
    context.load_turtle(BARE_UML).expect("ontology parses");
    let result = context.compile_module("uml", UML, &[]);
    assert!(matches!(
        result,
        Err(CompileError::Query(QueryError::NoSuperclass(_)))
    ));
}

#[test]
fn instance_takes_its_most_specific_registered_type() {
    let context = compiled();
    for types in [
        "uml:Activity, paml:BehaviorExecution",
        "paml:BehaviorExecution, uml:Activity",
    ] {
        let mut graph = OntologyGraph::new();
        graph
            .parse_turtle(&format!(
                "@prefix uml: <http://bioprotocols.org/uml#> .
                 @prefix paml: <http://bioprotocols.org/paml#> .
                 <http://test.org/run> a {types} ."
            ))
            .expect("instance graph parses");
        let document = Document::read(&graph, context.registry()).expect("document reads");
        assert_eq!(document.instances().len(), 1);
        let run = &document.instances()[0];
        assert_eq!(
            run.class().uri,
            "http://bioprotocols.org/paml#BehaviorExecution"
        );
        assert!(run.class().property("started_at").is_some());
    }
}

#[test]
fn recompiling_under_another_name_is_refused() {
    let mut context = loaded();
    context.compile_module("uml", UML, &[]).expect("uml compiles");
    let result = context.compile_module("activities", UML, &[]);
    match result {
        Err(CompileError::ModuleRenamed {
            existing, requested, ..
        }) => {
            assert_eq!(existing, "uml");
            assert_eq!(requested, "activities");
        }
        other => panic!("expected a rename to be refused, got {other:?}"),
    }
    assert_eq!(context.module(UML).map(CompiledModule::name), Some("uml"));
    assert!(context.module_named("activities").is_none());
}
