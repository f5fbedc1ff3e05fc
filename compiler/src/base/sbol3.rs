//! The SBOL3 class library.
//!
//! Restrictions below the hierarchy roots record upper bounds only. A lower
//! bound here would make every user subclass require an argument for a slot
//! its own module never compiles.

use ontoforge_graph::iris::{XSD_ANY_URI, XSD_INT, XSD_LONG, XSD_STRING};
use ontoforge_query::SBOL3;

use super::{BaseOntology, ClassDecl, DeclKind, PropertyDecl};

/// The `sbol` module.
#[must_use]
pub fn module() -> BaseOntology {
    BaseOntology {
        prefix: "sbol",
        namespace: SBOL3,
        classes: classes(),
        properties: properties(),
    }
}

const IDENTIFIED: &str = "http://sbols.org/v3#Identified";
const TOP_LEVEL: &str = "http://sbols.org/v3#TopLevel";
const COLLECTION: &str = "http://sbols.org/v3#Collection";
const COMPONENT: &str = "http://sbols.org/v3#Component";
const FEATURE: &str = "http://sbols.org/v3#Feature";
const LOCATION: &str = "http://sbols.org/v3#Location";
const COMPRISES: &str = "http://sbols.org/v3#directlyComprises";

fn class(
    id: &'static str,
    label: &'static str,
    comment: &'static str,
    subclass_of: Option<&'static str>,
) -> ClassDecl {
    ClassDecl {
        id,
        label,
        comment,
        subclass_of,
    }
}

fn classes() -> Vec<ClassDecl> {
    vec![
        class(IDENTIFIED, "Identified", "Anything that carries an identity.", None),
        class(
            TOP_LEVEL,
            "TopLevel",
            "An identified object that can stand alone in a document.",
            Some(IDENTIFIED),
        ),
        class(
            COLLECTION,
            "Collection",
            "A group of top-level objects.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#Namespace",
            "Namespace",
            "A collection of the objects sharing one namespace.",
            Some(COLLECTION),
        ),
        class(
            "http://sbols.org/v3#Experiment",
            "Experiment",
            "A collection of implementations and data from one experiment.",
            Some(COLLECTION),
        ),
        class(
            COMPONENT,
            "Component",
            "A design, built from features, constraints and interactions.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#Sequence",
            "Sequence",
            "The primary structure of a component.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#Model",
            "Model",
            "An external computational model of a design.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#Attachment",
            "Attachment",
            "A reference to an external file.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#Implementation",
            "Implementation",
            "A physical realization of a component.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#ExperimentalData",
            "ExperimentalData",
            "Attachments produced by an experiment.",
            Some(TOP_LEVEL),
        ),
        class(
            "http://sbols.org/v3#CombinatorialDerivation",
            "CombinatorialDerivation",
            "A combinatorial design derived from a template component.",
            Some(TOP_LEVEL),
        ),
        class(
            FEATURE,
            "Feature",
            "A part of a component's structure.",
            Some(IDENTIFIED),
        ),
        class(
            "http://sbols.org/v3#SubComponent",
            "SubComponent",
            "A feature instantiating another component.",
            Some(FEATURE),
        ),
        class(
            "http://sbols.org/v3#SequenceFeature",
            "SequenceFeature",
            "A feature located on a sequence.",
            Some(FEATURE),
        ),
        class(
            "http://sbols.org/v3#LocalSubComponent",
            "LocalSubComponent",
            "A feature typed in place, without its own component.",
            Some(FEATURE),
        ),
        class(
            "http://sbols.org/v3#ExternallyDefined",
            "ExternallyDefined",
            "A feature defined in an external database.",
            Some(FEATURE),
        ),
        class(
            "http://sbols.org/v3#ComponentReference",
            "ComponentReference",
            "A reference to a feature of a subcomponent.",
            Some(FEATURE),
        ),
        class(
            LOCATION,
            "Location",
            "A position on a sequence.",
            Some(IDENTIFIED),
        ),
        class(
            "http://sbols.org/v3#Range",
            "Range",
            "An inclusive interval on a sequence.",
            Some(LOCATION),
        ),
        class(
            "http://sbols.org/v3#Cut",
            "Cut",
            "A point between two positions on a sequence.",
            Some(LOCATION),
        ),
        class(
            "http://sbols.org/v3#EntireSequence",
            "EntireSequence",
            "The whole of a sequence.",
            Some(LOCATION),
        ),
        class(
            "http://sbols.org/v3#Constraint",
            "Constraint",
            "A structural relation between two features.",
            Some(IDENTIFIED),
        ),
        class(
            "http://sbols.org/v3#Interaction",
            "Interaction",
            "A functional relation between features.",
            Some(IDENTIFIED),
        ),
        class(
            "http://sbols.org/v3#Participation",
            "Participation",
            "The role a feature plays in an interaction.",
            Some(IDENTIFIED),
        ),
        class(
            "http://sbols.org/v3#Interface",
            "Interface",
            "The features a component exposes.",
            Some(IDENTIFIED),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn property(
    id: &'static str,
    label: &'static str,
    kind: DeclKind,
    domain: &'static str,
    range: &'static str,
    sub_property_of: Option<&'static str>,
    min: u32,
    max: Option<u32>,
) -> PropertyDecl {
    PropertyDecl {
        id,
        label,
        kind,
        domain,
        range,
        sub_property_of,
        min,
        max,
    }
}

fn properties() -> Vec<PropertyDecl> {
    use DeclKind::{Datatype, Object};
    vec![
        property(COMPRISES, "directly comprises", Object, IDENTIFIED, IDENTIFIED, None, 0, None),
        property(
            "http://sbols.org/v3#displayId",
            "displayId",
            Datatype,
            IDENTIFIED,
            XSD_STRING,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#name",
            "name",
            Datatype,
            IDENTIFIED,
            XSD_STRING,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#description",
            "description",
            Datatype,
            IDENTIFIED,
            XSD_STRING,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#hasNamespace",
            "hasNamespace",
            Datatype,
            TOP_LEVEL,
            XSD_ANY_URI,
            None,
            1,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#hasAttachment",
            "hasAttachment",
            Object,
            TOP_LEVEL,
            "http://sbols.org/v3#Attachment",
            None,
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#member",
            "member",
            Object,
            COLLECTION,
            TOP_LEVEL,
            None,
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#type",
            "type",
            Datatype,
            COMPONENT,
            XSD_ANY_URI,
            None,
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#role",
            "role",
            Datatype,
            COMPONENT,
            XSD_ANY_URI,
            None,
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#hasSequence",
            "hasSequence",
            Object,
            COMPONENT,
            "http://sbols.org/v3#Sequence",
            None,
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#hasFeature",
            "hasFeature",
            Object,
            COMPONENT,
            FEATURE,
            Some(COMPRISES),
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#hasConstraint",
            "hasConstraint",
            Object,
            COMPONENT,
            "http://sbols.org/v3#Constraint",
            Some(COMPRISES),
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#hasInteraction",
            "hasInteraction",
            Object,
            COMPONENT,
            "http://sbols.org/v3#Interaction",
            Some(COMPRISES),
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#hasInterface",
            "hasInterface",
            Object,
            COMPONENT,
            "http://sbols.org/v3#Interface",
            Some(COMPRISES),
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#hasParticipation",
            "hasParticipation",
            Object,
            "http://sbols.org/v3#Interaction",
            "http://sbols.org/v3#Participation",
            Some(COMPRISES),
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#hasLocation",
            "hasLocation",
            Object,
            "http://sbols.org/v3#SequenceFeature",
            LOCATION,
            Some(COMPRISES),
            0,
            None,
        ),
        property(
            "http://sbols.org/v3#instanceOf",
            "instanceOf",
            Object,
            "http://sbols.org/v3#SubComponent",
            COMPONENT,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#elements",
            "elements",
            Datatype,
            "http://sbols.org/v3#Sequence",
            XSD_STRING,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#encoding",
            "encoding",
            Datatype,
            "http://sbols.org/v3#Sequence",
            XSD_ANY_URI,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#start",
            "start",
            Datatype,
            "http://sbols.org/v3#Range",
            XSD_INT,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#end",
            "end",
            Datatype,
            "http://sbols.org/v3#Range",
            XSD_INT,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#restriction",
            "restriction",
            Datatype,
            "http://sbols.org/v3#Constraint",
            XSD_ANY_URI,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#subject",
            "subject",
            Object,
            "http://sbols.org/v3#Constraint",
            FEATURE,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#object",
            "object",
            Object,
            "http://sbols.org/v3#Constraint",
            FEATURE,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#source",
            "source",
            Datatype,
            "http://sbols.org/v3#Attachment",
            XSD_ANY_URI,
            None,
            0,
            Some(1),
        ),
        property(
            "http://sbols.org/v3#size",
            "size",
            Datatype,
            "http://sbols.org/v3#Attachment",
            XSD_LONG,
            None,
            0,
            Some(1),
        ),
    ]
}
