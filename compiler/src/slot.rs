//! Typed, cardinality-bounded property slots.

use chrono::DateTime;
use ontoforge_graph::{Literal, Term};
use thiserror::Error;

use crate::class::{Primitive, PropertyDef, PropertyKind};
use crate::instance::Instance;

/// Errors raised when a value cannot be stored in a slot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotError {
    /// The class has no slot of that name.
    #[error("{class} has no property named {property}")]
    UnknownProperty {
        /// Class URI.
        class: String,
        /// Requested field name.
        property: String,
    },

    /// The value's kind does not match the slot's kind.
    #[error("{property} expects {expected}, got {found}")]
    TypeMismatch {
        /// Field name.
        property: String,
        /// Slot kind.
        expected: String,
        /// Value kind.
        found: &'static str,
    },

    /// More values than the upper bound allows.
    #[error("{property} accepts at most {max} value(s), got {count}")]
    TooManyValues {
        /// Field name.
        property: String,
        /// Upper bound.
        max: u32,
        /// Values offered.
        count: usize,
    },

    /// A date-time value is not an RFC 3339 timestamp.
    #[error("{property}: {value:?} is not an RFC 3339 timestamp: {reason}")]
    InvalidDateTime {
        /// Field name.
        property: String,
        /// Offending value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A literal's lexical form does not parse as the slot's type.
    #[error("{property}: cannot read {value:?} as {expected}")]
    InvalidLexical {
        /// Field name.
        property: String,
        /// Offending lexical form.
        value: String,
        /// Slot type.
        expected: Primitive,
    },

    /// An owned child is not an instance of any permitted target class.
    #[error("{property} cannot own a {found}")]
    WrongTarget {
        /// Field name.
        property: String,
        /// Type URI of the rejected child.
        found: String,
    },
}

/// A single slot value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `xsd:string` text.
    Text(String),
    /// Integer.
    Integer(i64),
    /// Boolean.
    Boolean(bool),
    /// URI literal value.
    Uri(String),
    /// RFC 3339 timestamp, kept exactly as given.
    DateTime(String),
    /// URI of an entity owned elsewhere.
    Reference(String),
    /// An owned child entity.
    Owned(Box<Instance>),
}

impl Value {
    /// Short name of the value kind, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Uri(_) => "uri",
            Self::DateTime(_) => "datetime",
            Self::Reference(_) => "reference",
            Self::Owned(_) => "owned",
        }
    }

    /// Converts a graph term into a value for `property`.
    ///
    /// Owned children cannot be read from a single term; the document reader
    /// assembles them separately.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::TypeMismatch`] if the term's shape does not suit
    /// the slot, [`SlotError::InvalidLexical`] or
    /// [`SlotError::InvalidDateTime`] if a literal does not parse.
    pub fn from_term(property: &PropertyDef, term: &Term) -> Result<Self, SlotError> {
        let mismatch = |found| SlotError::TypeMismatch {
            property: property.name.clone(),
            expected: property.kind.tag().to_owned(),
            found,
        };
        match (&property.kind, term) {
            (PropertyKind::Reference { .. }, Term::Iri(iri)) => Ok(Self::Reference(iri.clone())),
            (PropertyKind::Datatype { primitive }, Term::Iri(iri)) if *primitive == Primitive::Uri => {
                Ok(Self::Uri(iri.clone()))
            }
            (PropertyKind::Datatype { primitive }, Term::Literal(lit)) => {
                parse_lexical(property, *primitive, &lit.lexical)
            }
            (_, Term::Literal(_)) => Err(mismatch("literal")),
            _ => Err(mismatch("resource")),
        }
    }

    /// The graph term this value serializes to. Owned children serialize as
    /// their identity.
    #[must_use]
    pub fn to_term(&self) -> Term {
        match self {
            Self::Text(text) => Term::Literal(Literal::string(text.clone())),
            Self::Integer(n) => Term::Literal(Literal::typed(n.to_string(), Primitive::Integer.xsd())),
            Self::Boolean(b) => Term::Literal(Literal::typed(b.to_string(), Primitive::Boolean.xsd())),
            Self::Uri(uri) | Self::Reference(uri) => Term::iri(uri.clone()),
            Self::DateTime(ts) => Term::Literal(Literal::typed(ts.clone(), Primitive::DateTime.xsd())),
            Self::Owned(child) => Term::iri(child.identity()),
        }
    }
}

fn parse_lexical(property: &PropertyDef, primitive: Primitive, lexical: &str) -> Result<Value, SlotError> {
    let invalid = || SlotError::InvalidLexical {
        property: property.name.clone(),
        value: lexical.to_owned(),
        expected: primitive,
    };
    match primitive {
        Primitive::Text => Ok(Value::Text(lexical.to_owned())),
        Primitive::Integer => lexical.trim().parse().map(Value::Integer).map_err(|_| invalid()),
        Primitive::Boolean => match lexical.trim() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(invalid()),
        },
        Primitive::Uri => Ok(Value::Uri(lexical.to_owned())),
        Primitive::DateTime => {
            check_datetime(&property.name, lexical)?;
            Ok(Value::DateTime(lexical.to_owned()))
        }
    }
}

fn check_datetime(property: &str, value: &str) -> Result<(), SlotError> {
    DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|e| SlotError::InvalidDateTime {
            property: property.to_owned(),
            value: value.to_owned(),
            reason: e.to_string(),
        })
}

/// A keyword argument to a generated constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Explicitly not supplied yet; the slot is flagged as awaiting a value.
    Missing,
    /// Values to store, replacing anything already there.
    Values(Vec<Value>),
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Values(vec![value])
    }
}

impl From<Vec<Value>> for Arg {
    fn from(values: Vec<Value>) -> Self {
        Self::Values(values)
    }
}

/// A property handle on an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    property: PropertyDef,
    values: Vec<Value>,
    missing: bool,
}

impl Slot {
    /// Creates an empty slot for `property`.
    #[must_use]
    pub fn new(property: PropertyDef) -> Self {
        Self {
            property,
            values: Vec::new(),
            missing: false,
        }
    }

    /// The slot's definition.
    #[must_use]
    pub fn property(&self) -> &PropertyDef {
        &self.property
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.property.name
    }

    /// Stored values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// True while the slot holds the explicit "missing" sentinel.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Replaces the stored values with the missing sentinel.
    pub fn mark_missing(&mut self) {
        self.values.clear();
        self.missing = true;
    }

    /// Replaces the stored values after checking kind, upper bound and, for
    /// date-times, RFC 3339 syntax. On error the slot is unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`SlotError`] found.
    pub fn set(&mut self, values: Vec<Value>) -> Result<(), SlotError> {
        if !self.property.cardinality.within_upper(values.len()) {
            return Err(SlotError::TooManyValues {
                property: self.property.name.clone(),
                max: self.property.cardinality.upper.unwrap_or_default(),
                count: values.len(),
            });
        }
        for value in &values {
            self.check(value)?;
        }
        self.values = values;
        self.missing = false;
        Ok(())
    }

    /// Appends one value.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::TooManyValues`] if the slot is full, or the type
    /// error [`Slot::set`] would raise.
    pub fn push(&mut self, value: Value) -> Result<(), SlotError> {
        if !self.property.cardinality.within_upper(self.values.len() + 1) {
            return Err(SlotError::TooManyValues {
                property: self.property.name.clone(),
                max: self.property.cardinality.upper.unwrap_or_default(),
                count: self.values.len() + 1,
            });
        }
        self.check(&value)?;
        self.values.push(value);
        self.missing = false;
        Ok(())
    }

    fn check(&self, value: &Value) -> Result<(), SlotError> {
        let name = &self.property.name;
        let accepted = match (&self.property.kind, value) {
            (PropertyKind::Datatype { primitive }, value) => matches!(
                (primitive, value),
                (Primitive::Text, Value::Text(_))
                    | (Primitive::Integer, Value::Integer(_))
                    | (Primitive::Boolean, Value::Boolean(_))
                    | (Primitive::Uri, Value::Uri(_))
                    | (Primitive::DateTime, Value::DateTime(_))
            ),
            (PropertyKind::Reference { .. }, Value::Reference(_)) => true,
            (PropertyKind::Owned { targets }, Value::Owned(child)) => {
                if !targets.is_empty() && !targets.iter().any(|t| child.is_a(t)) {
                    return Err(SlotError::WrongTarget {
                        property: name.clone(),
                        found: child.type_uri().to_owned(),
                    });
                }
                true
            }
            _ => false,
        };
        if !accepted {
            let expected = match &self.property.kind {
                PropertyKind::Datatype { primitive } => primitive.to_string(),
                other => other.tag().to_owned(),
            };
            return Err(SlotError::TypeMismatch {
                property: name.clone(),
                expected,
                found: value.kind(),
            });
        }
        if let Value::DateTime(ts) = value {
            check_datetime(name, ts)?;
        }
        Ok(())
    }
}
