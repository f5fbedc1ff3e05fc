//! Instances of compiled classes.
//!
//! [`Instance::construct`] is the single constructor every compiled class
//! shares. It takes the class's property table, sets the type identity,
//! opens one slot per inherited or own property, then applies the caller's
//! keyword overrides under the configured [`ConstructionMode`].

use std::sync::Arc;

use ontoforge_query::{Cardinality, IDENTITY};
use serde::Serialize;

use crate::class::CompiledClass;
use crate::config::ConstructionMode;
use crate::slot::{Arg, Slot, SlotError, Value};

/// Reserved keyword that overrides the instance's type identity.
pub const TYPE_URI: &str = "type_uri";

/// A keyword override that best-effort construction could not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Field name the override targeted.
    pub property: String,
    /// Why it was rejected.
    pub error: SlotError,
}

/// A slot whose value count falls outside its cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardinalityViolation {
    /// Field name.
    pub property: String,
    /// Number of values held.
    pub count: usize,
    /// Bounds the slot declares.
    pub cardinality: Cardinality,
}

/// An object built from a [`CompiledClass`].
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: Arc<CompiledClass>,
    identity: String,
    type_uri: String,
    types: Vec<String>,
    slots: Vec<Slot>,
    diagnostics: Vec<Diagnostic>,
}

impl Instance {
    /// Creates an instance with empty slots and no overrides.
    #[must_use]
    pub fn new(class: Arc<CompiledClass>, identity: impl Into<String>) -> Self {
        let type_uri = class.uri.clone();
        Self::blank(class, identity.into(), type_uri)
    }

    /// Creates an instance with empty slots under an explicit type identity.
    #[must_use]
    pub fn with_type(
        class: Arc<CompiledClass>,
        identity: impl Into<String>,
        type_uri: impl Into<String>,
    ) -> Self {
        Self::blank(class, identity.into(), type_uri.into())
    }

    /// Generic constructor shared by every compiled class.
    ///
    /// `type_uri` defaults to the class URI. Each `(name, arg)` override is
    /// applied after the slots exist; `identity` and `type_uri` are consumed
    /// by the constructor itself.
    ///
    /// # Errors
    ///
    /// In [`ConstructionMode::Strict`], returns the first rejected override.
    /// In [`ConstructionMode::BestEffort`] this never fails; rejections are
    /// kept in [`Instance::diagnostics`].
    pub fn construct<I, K>(
        class: Arc<CompiledClass>,
        identity: impl Into<String>,
        type_uri: Option<&str>,
        args: I,
        mode: ConstructionMode,
    ) -> Result<Self, SlotError>
    where
        I: IntoIterator<Item = (K, Arg)>,
        K: AsRef<str>,
    {
        let type_uri = type_uri.map_or_else(|| class.uri.clone(), str::to_owned);
        let mut instance = Self::blank(class, identity.into(), type_uri);
        for (name, arg) in args {
            let name = name.as_ref();
            if name == IDENTITY || name == TYPE_URI {
                continue;
            }
            instance.apply(name, arg, mode)?;
        }
        Ok(instance)
    }

    fn blank(class: Arc<CompiledClass>, identity: String, type_uri: String) -> Self {
        let mut types = vec![type_uri.clone()];
        if let Some(marker) = &class.marker {
            types.push(marker.clone());
        }
        let slots = class
            .all_properties()
            .into_iter()
            .map(|p| Slot::new(p.clone()))
            .collect();
        Self {
            class,
            identity,
            type_uri,
            types,
            slots,
            diagnostics: Vec::new(),
        }
    }

    /// Applies one keyword override under `mode`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the rejection; in best-effort mode records it
    /// and returns `Ok`.
    pub fn apply(&mut self, name: &str, arg: Arg, mode: ConstructionMode) -> Result<(), SlotError> {
        let outcome = self.slot_mut(name).and_then(|slot| match arg {
            Arg::Missing => {
                slot.mark_missing();
                Ok(())
            }
            Arg::Values(values) => slot.set(values),
        });
        match (outcome, mode) {
            (Ok(()), _) => Ok(()),
            (Err(error), ConstructionMode::Strict) => Err(error),
            (Err(error), ConstructionMode::BestEffort) => {
                tracing::debug!(class = %self.class.uri, property = name, %error, "override rejected");
                self.diagnostics.push(Diagnostic {
                    property: name.to_owned(),
                    error,
                });
                Ok(())
            }
        }
    }

    /// Records a rejected value found outside construction, e.g. while reading
    /// a document.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Replaces the values of one slot.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::UnknownProperty`] or the slot's own rejection.
    pub fn set(&mut self, name: &str, values: Vec<Value>) -> Result<(), SlotError> {
        self.slot_mut(name)?.set(values)
    }

    /// Appends a value to one slot.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::UnknownProperty`] or the slot's own rejection.
    pub fn push(&mut self, name: &str, value: Value) -> Result<(), SlotError> {
        self.slot_mut(name)?.push(value)
    }

    /// Puts the missing sentinel in one slot. Returns false if there is no
    /// slot of that name.
    pub fn mark_missing(&mut self, name: &str) -> bool {
        match self.slot_mut(name) {
            Ok(slot) => {
                slot.mark_missing();
                true
            }
            Err(_) => false,
        }
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Slot, SlotError> {
        let class = &self.class.uri;
        self.slots
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| SlotError::UnknownProperty {
                class: class.clone(),
                property: name.to_owned(),
            })
    }

    /// The compiled class.
    #[must_use]
    pub fn class(&self) -> &Arc<CompiledClass> {
        &self.class
    }

    /// The instance URI.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The type identity, which defaults to the class URI.
    #[must_use]
    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    /// Every `rdf:type` the instance carries, the type identity first.
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// All slots, inherited first.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Looks up one slot.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name() == name)
    }

    /// Values of one slot, if the slot exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.slot(name).map(Slot::values)
    }

    /// Names of slots still holding the missing sentinel.
    #[must_use]
    pub fn missing(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.is_missing())
            .map(Slot::name)
            .collect()
    }

    /// Rejected overrides recorded during best-effort construction.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Owned child instances, in slot order.
    pub fn children(&self) -> impl Iterator<Item = &Instance> {
        self.slots
            .iter()
            .flat_map(|s| s.values())
            .filter_map(|v| match v {
                Value::Owned(child) => Some(child.as_ref()),
                _ => None,
            })
    }

    /// True if the instance's class, an ancestor, its type identity or its
    /// marker type is `class_uri`.
    #[must_use]
    pub fn is_a(&self, class_uri: &str) -> bool {
        self.types.iter().any(|t| t == class_uri) || self.class.is_subclass_of(class_uri)
    }

    /// Slots whose value count falls outside their bounds. A slot holding the
    /// missing sentinel counts as empty.
    #[must_use]
    pub fn cardinality_violations(&self) -> Vec<CardinalityViolation> {
        self.slots
            .iter()
            .filter(|s| !s.property().cardinality.admits(s.values().len()))
            .map(|s| CardinalityViolation {
                property: s.name().to_owned(),
                count: s.values().len(),
                cardinality: s.property().cardinality,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{BaseClass, Parent, Primitive, PropertyDef, PropertyKind};

    fn activity() -> Arc<CompiledClass> {
        Arc::new(CompiledClass {
            uri: "http://example.org/uml#Activity".into(),
            name: "Activity".into(),
            label: None,
            parent: Parent::Base(BaseClass::new("http://sbols.org/v3#TopLevel", true)),
            top_level: true,
            marker: None,
            required: vec!["identity".into(), "name".into()],
            properties: vec![
                PropertyDef {
                    uri: "http://example.org/uml#name".into(),
                    name: "name".into(),
                    kind: PropertyKind::Datatype {
                        primitive: Primitive::Text,
                    },
                    cardinality: Cardinality::new(1, Some(1)),
                },
                PropertyDef {
                    uri: "http://example.org/uml#steps".into(),
                    name: "steps".into(),
                    kind: PropertyKind::Datatype {
                        primitive: Primitive::Integer,
                    },
                    cardinality: Cardinality::UNBOUNDED,
                },
            ],
        })
    }

    #[test]
    fn type_uri_defaults_to_class() {
        let instance = Instance::new(activity(), "http://test.org/act");
        assert_eq!(instance.type_uri(), "http://example.org/uml#Activity");
        assert!(instance.is_a("http://sbols.org/v3#TopLevel"));
        assert_eq!(instance.slots().len(), 2);
    }

    #[test]
    fn best_effort_records_rejections() {
        let args = vec![
            ("name", Arg::from(Value::Integer(7))),
            ("steps", Arg::from(vec![Value::Integer(1), Value::Integer(2)])),
            ("nonsense", Arg::Missing),
        ];
        let built = Instance::construct(
            activity(),
            "http://test.org/act",
            Some("http://example.org/uml#Custom"),
            args,
            ConstructionMode::BestEffort,
        );
        let Ok(instance) = built else {
            unreachable!("best-effort construction never fails");
        };
        assert_eq!(instance.type_uri(), "http://example.org/uml#Custom");
        assert_eq!(instance.get("steps").map(<[Value]>::len), Some(2));
        let rejected: Vec<&str> = instance
            .diagnostics()
            .iter()
            .map(|d| d.property.as_str())
            .collect();
        assert_eq!(rejected, vec!["name", "nonsense"]);
    }

    #[test]
    fn strict_stops_at_first_rejection() {
        let args = vec![("name", Arg::from(Value::Boolean(true)))];
        let built = Instance::construct(
            activity(),
            "http://test.org/act",
            None,
            args,
            ConstructionMode::Strict,
        );
        assert!(matches!(built, Err(SlotError::TypeMismatch { .. })));
    }

    #[test]
    fn violations_report_unfilled_required_slots() {
        let mut instance = Instance::new(activity(), "http://test.org/act");
        assert_eq!(
            instance.cardinality_violations(),
            vec![CardinalityViolation {
                property: "name".into(),
                count: 0,
                cardinality: Cardinality::new(1, Some(1)),
            }]
        );
        assert!(instance.set("name", vec![Value::Text("act".into())]).is_ok());
        assert!(instance.cardinality_violations().is_empty());
    }
}
