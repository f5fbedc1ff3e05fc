//! Compiled class definitions.
//!
//! A [`CompiledClass`] is plain data: its parent, its ordered property table
//! and the argument list its builder defaults. Instances are produced by the
//! single generic constructor in [`crate::instance`], parameterized by that
//! table.

use std::fmt;
use std::sync::Arc;

use ontoforge_graph::iris::{
    XSD_ANY_URI, XSD_BOOLEAN, XSD_DATETIME, XSD_INT, XSD_INTEGER, XSD_LONG,
    XSD_NON_NEGATIVE_INTEGER, XSD_POSITIVE_INTEGER, XSD_STRING,
};
use ontoforge_query::Cardinality;
use serde::{Serialize, Serializer};

/// Value type of a datatype-property slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// `xsd:string`.
    Text,
    /// `xsd:integer` and its bounded subtypes.
    Integer,
    /// `xsd:boolean`.
    Boolean,
    /// `xsd:anyURI`.
    Uri,
    /// `xsd:dateTime`.
    DateTime,
}

impl Primitive {
    /// Maps an XSD datatype IRI to a slot type.
    #[must_use]
    pub fn from_xsd(datatype: &str) -> Option<Self> {
        match datatype {
            XSD_STRING => Some(Self::Text),
            XSD_INTEGER | XSD_INT | XSD_LONG | XSD_NON_NEGATIVE_INTEGER | XSD_POSITIVE_INTEGER => {
                Some(Self::Integer)
            }
            XSD_BOOLEAN => Some(Self::Boolean),
            XSD_ANY_URI => Some(Self::Uri),
            XSD_DATETIME => Some(Self::DateTime),
            _ => None,
        }
    }

    /// The XSD datatype IRI values of this type are written with.
    #[must_use]
    pub const fn xsd(self) -> &'static str {
        match self {
            Self::Text => XSD_STRING,
            Self::Integer => XSD_INTEGER,
            Self::Boolean => XSD_BOOLEAN,
            Self::Uri => XSD_ANY_URI,
            Self::DateTime => XSD_DATETIME,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Uri => "uri",
            Self::DateTime => "datetime",
        })
    }
}

/// How a property slot holds its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyKind {
    /// Primitive literal values.
    Datatype {
        /// Resolved value type.
        primitive: Primitive,
    },
    /// URIs of entities owned elsewhere.
    Reference {
        /// Permitted target classes; empty when the ontology declares none.
        targets: Vec<String>,
    },
    /// Child entities owned by the instance.
    Owned {
        /// Permitted child classes; empty when the ontology declares none.
        targets: Vec<String>,
    },
}

impl PropertyKind {
    /// Short tag used in logs and tables.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Datatype { .. } => "datatype",
            Self::Reference { .. } => "reference",
            Self::Owned { .. } => "owned",
        }
    }

    /// Target classes of object properties; empty for datatype properties.
    #[must_use]
    pub fn targets(&self) -> &[String] {
        match self {
            Self::Datatype { .. } => &[],
            Self::Reference { targets } | Self::Owned { targets } => targets,
        }
    }
}

/// One row of a compiled property table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDef {
    /// Property URI, used as the predicate when serializing.
    pub uri: String,
    /// Field name: the property label with spaces replaced by `_`.
    pub name: String,
    /// Slot kind and value type.
    #[serde(flatten)]
    pub kind: PropertyKind,
    /// Bounds on the number of values.
    pub cardinality: Cardinality,
}

/// Converts a property label into a field name.
#[must_use]
pub fn field_name(label: &str) -> String {
    label.replace(' ', "_")
}

/// A precompiled type outside the compiled modules: a hierarchy root, a class
/// of the root namespace or a class of an opaque external ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseClass {
    /// Class URI.
    pub uri: String,
    /// Whether instances are document-level entities.
    pub top_level: bool,
}

impl BaseClass {
    /// Creates a base type.
    pub fn new(uri: impl Into<String>, top_level: bool) -> Self {
        Self {
            uri: uri.into(),
            top_level,
        }
    }
}

/// The type a compiled class extends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    /// Another compiled class, from this module or a dependency.
    Class(Arc<CompiledClass>),
    /// A precompiled base type.
    Base(BaseClass),
}

impl Parent {
    /// URI of the parent type.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Class(class) => &class.uri,
            Self::Base(base) => &base.uri,
        }
    }
}

/// Serialized as the parent URI.
impl Serialize for Parent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.uri())
    }
}

/// A compiled ontology class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledClass {
    /// Class URI; also the type identity builders are registered under.
    pub uri: String,
    /// Unqualified name, the key in the module's symbol table.
    pub name: String,
    /// Human-readable label, when the ontology provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The type this class extends.
    pub parent: Parent,
    /// Whether the class transitively subclasses the "TopLevel" root.
    pub top_level: bool,
    /// Extra `rdf:type` every instance carries, if the parent requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Required argument names, superclass-required first.
    pub required: Vec<String>,
    /// Properties declared on this class, in query order.
    pub properties: Vec<PropertyDef>,
}

impl CompiledClass {
    /// This class followed by every compiled ancestor, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = &CompiledClass> {
        std::iter::successors(Some(self), |class| match &class.parent {
            Parent::Class(parent) => Some(parent.as_ref()),
            Parent::Base(_) => None,
        })
    }

    /// URIs of this class, its compiled ancestors and the base type it rests on.
    #[must_use]
    pub fn ancestors(&self) -> Vec<&str> {
        let mut uris: Vec<&str> = self.lineage().map(|c| c.uri.as_str()).collect();
        if let Some(base) = self.base() {
            uris.push(&base.uri);
        }
        uris
    }

    /// The precompiled base type at the top of the lineage.
    #[must_use]
    pub fn base(&self) -> Option<&BaseClass> {
        self.lineage().find_map(|class| match &class.parent {
            Parent::Base(base) => Some(base),
            Parent::Class(_) => None,
        })
    }

    /// True if `uri` is this class or one of its ancestors.
    #[must_use]
    pub fn is_subclass_of(&self, uri: &str) -> bool {
        self.ancestors().contains(&uri)
    }

    /// Every slot an instance carries: inherited properties first, then own.
    ///
    /// A subclass row with the same name replaces the inherited one, which is
    /// how a local restriction overrides an inherited bound.
    #[must_use]
    pub fn all_properties(&self) -> Vec<&PropertyDef> {
        let chain: Vec<&CompiledClass> = self.lineage().collect();
        let mut rows: Vec<&PropertyDef> = Vec::new();
        for class in chain.into_iter().rev() {
            for property in &class.properties {
                match rows.iter_mut().find(|row| row.name == property.name) {
                    Some(row) => *row = property,
                    None => rows.push(property),
                }
            }
        }
        rows
    }

    /// Looks up a slot definition by field name, own rows first.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.lineage()
            .find_map(|class| class.properties.iter().find(|p| p.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(uri: &str, name: &str, cardinality: Cardinality) -> PropertyDef {
        PropertyDef {
            uri: uri.into(),
            name: name.into(),
            kind: PropertyKind::Datatype {
                primitive: Primitive::Text,
            },
            cardinality,
        }
    }

    fn chain() -> CompiledClass {
        let root = Arc::new(CompiledClass {
            uri: "http://example.org/ex#Part".into(),
            name: "Part".into(),
            label: None,
            parent: Parent::Base(BaseClass::new("http://sbols.org/v3#TopLevel", true)),
            top_level: true,
            marker: None,
            required: vec!["identity".into(), "name".into()],
            properties: vec![
                text("http://example.org/ex#name", "name", Cardinality::new(1, Some(1))),
                text("http://example.org/ex#note", "note", Cardinality::UNBOUNDED),
            ],
        });
        CompiledClass {
            uri: "http://example.org/ex#Device".into(),
            name: "Device".into(),
            label: Some("Device".into()),
            parent: Parent::Class(root),
            top_level: true,
            marker: None,
            required: vec!["identity".into(), "name".into()],
            properties: vec![
                text("http://example.org/ex#name", "name", Cardinality::new(1, None)),
                text("http://example.org/ex#model", "model", Cardinality::UNBOUNDED),
            ],
        }
    }

    #[test]
    fn xsd_integer_family_maps_to_integer() {
        assert_eq!(Primitive::from_xsd(XSD_POSITIVE_INTEGER), Some(Primitive::Integer));
        assert_eq!(Primitive::from_xsd(XSD_DATETIME), Some(Primitive::DateTime));
        assert_eq!(Primitive::from_xsd("http://www.w3.org/2001/XMLSchema#float"), None);
    }

    #[test]
    fn ancestors_end_at_base() {
        let device = chain();
        assert_eq!(
            device.ancestors(),
            vec![
                "http://example.org/ex#Device",
                "http://example.org/ex#Part",
                "http://sbols.org/v3#TopLevel",
            ]
        );
        assert!(device.is_subclass_of("http://sbols.org/v3#TopLevel"));
        assert!(!device.is_subclass_of("http://sbols.org/v3#Identified"));
    }

    #[test]
    fn own_rows_override_inherited_rows() {
        let device = chain();
        let names: Vec<&str> = device
            .all_properties()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "note", "model"]);
        assert_eq!(
            device.property("name").map(|p| p.cardinality),
            Some(Cardinality::new(1, None))
        );
    }

    #[test]
    fn field_names_replace_spaces() {
        assert_eq!(field_name("connected to"), "connected_to");
    }
}
