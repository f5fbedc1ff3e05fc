//! The PROV-O core: activities, the entities they use and generate, and the
//! agents associated with them.

use ontoforge_graph::iris::{PROV, XSD_DATETIME};

use super::{BaseOntology, ClassDecl, DeclKind, PropertyDecl};

const ENTITY: &str = "http://www.w3.org/ns/prov#Entity";
const ACTIVITY: &str = "http://www.w3.org/ns/prov#Activity";
const AGENT: &str = "http://www.w3.org/ns/prov#Agent";
const PLAN: &str = "http://www.w3.org/ns/prov#Plan";
const USAGE: &str = "http://www.w3.org/ns/prov#Usage";
const ASSOCIATION: &str = "http://www.w3.org/ns/prov#Association";

/// The `prov` module.
#[must_use]
pub fn module() -> BaseOntology {
    BaseOntology {
        prefix: "prov",
        namespace: PROV,
        classes: vec![
            ClassDecl {
                id: ENTITY,
                label: "Entity",
                comment: "A thing with fixed aspects.",
                subclass_of: None,
            },
            ClassDecl {
                id: ACTIVITY,
                label: "Activity",
                comment: "Something that occurs over a period of time and acts upon entities.",
                subclass_of: None,
            },
            ClassDecl {
                id: AGENT,
                label: "Agent",
                comment: "Something that bears responsibility for an activity.",
                subclass_of: None,
            },
            ClassDecl {
                id: PLAN,
                label: "Plan",
                comment: "A set of steps an agent intends to follow.",
                subclass_of: Some(ENTITY),
            },
            ClassDecl {
                id: USAGE,
                label: "Usage",
                comment: "The start of an entity's use by an activity.",
                subclass_of: None,
            },
            ClassDecl {
                id: ASSOCIATION,
                label: "Association",
                comment: "The assignment of responsibility for an activity to an agent.",
                subclass_of: None,
            },
        ],
        properties: vec![
            object("http://www.w3.org/ns/prov#used", "used", ACTIVITY, ENTITY),
            object(
                "http://www.w3.org/ns/prov#wasGeneratedBy",
                "wasGeneratedBy",
                ENTITY,
                ACTIVITY,
            ),
            object(
                "http://www.w3.org/ns/prov#qualifiedUsage",
                "qualifiedUsage",
                ACTIVITY,
                USAGE,
            ),
            object(
                "http://www.w3.org/ns/prov#qualifiedAssociation",
                "qualifiedAssociation",
                ACTIVITY,
                ASSOCIATION,
            ),
            object("http://www.w3.org/ns/prov#entity", "entity", USAGE, ENTITY),
            object("http://www.w3.org/ns/prov#agent", "agent", ASSOCIATION, AGENT),
            object("http://www.w3.org/ns/prov#hadPlan", "hadPlan", ASSOCIATION, PLAN),
            PropertyDecl {
                id: "http://www.w3.org/ns/prov#startedAtTime",
                label: "startedAtTime",
                kind: DeclKind::Datatype,
                domain: ACTIVITY,
                range: XSD_DATETIME,
                sub_property_of: None,
                min: 0,
                max: Some(1),
            },
            PropertyDecl {
                id: "http://www.w3.org/ns/prov#endedAtTime",
                label: "endedAtTime",
                kind: DeclKind::Datatype,
                domain: ACTIVITY,
                range: XSD_DATETIME,
                sub_property_of: None,
                min: 0,
                max: Some(1),
            },
        ],
    }
}

fn object(
    id: &'static str,
    label: &'static str,
    domain: &'static str,
    range: &'static str,
) -> PropertyDecl {
    PropertyDecl {
        id,
        label,
        kind: DeclKind::Object,
        domain,
        range,
        sub_property_of: None,
        min: 0,
        max: None,
    }
}
