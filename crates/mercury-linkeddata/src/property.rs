//! Materialized property records, the shape form UIs consume.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mercury_core::vocab::{jsonld, sh};

use crate::jsonld::{description, first_predicate_count, first_predicate_id, label};
use crate::vocabulary::{
    allowed_values, is_generic_iri_resource, is_machine_only, is_rdf_list, is_relation_shape,
};

/// Key of the synthetic property holding an entity's types.
pub const TYPE_KEY: &str = jsonld::TYPE;

/// Label of the synthetic type property.
pub const TYPE_LABEL: &str = "Type";

/// One value of a property: a literal (`value`) or a reference (`id`, with
/// the referenced entity's label when known).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PropertyValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn reference(id: impl Into<String>, label: Option<String>) -> Self {
        Self {
            id: Some(id.into()),
            label,
            ..Default::default()
        }
    }

    /// The text shown for this value: the literal, else the label, else the id.
    pub fn display_value(&self) -> String {
        match (&self.value, &self.label, &self.id) {
            (Some(Value::String(s)), _, _) => s.clone(),
            (Some(Value::Null), Some(label), _) | (None, Some(label), _) => label.clone(),
            (Some(Value::Null), None, Some(id)) | (None, None, Some(id)) => id.clone(),
            (Some(other), _, _) => other.to_string(),
            (None, None, None) => String::new(),
        }
    }

    /// Whether this value matches the given literal or id.
    pub fn matches(&self, value: Option<&Value>, id: Option<&str>) -> bool {
        (value.is_some() && self.value.as_ref() == value)
            || (id.is_some() && self.id.as_deref() == id)
    }
}

/// Ascending comparison by display value.
pub fn compare_by_display_value(a: &PropertyValue, b: &PropertyValue) -> Ordering {
    a.display_value().cmp(&b.display_value())
}

/// The materialized view of one predicate on one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Predicate IRI, or `@type` for the synthetic type property.
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values_count: Option<u32>,
    #[serde(default)]
    pub machine_only: bool,
    #[serde(default)]
    pub is_rdf_list: bool,
    #[serde(default)]
    pub is_relation_shape: bool,
    #[serde(default)]
    pub is_generic_iri_resource: bool,
    #[serde(default = "default_editable")]
    pub is_editable: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

fn default_editable() -> bool {
    true
}

impl Property {
    /// Describe a property from its SHACL property shape, without values.
    ///
    /// Returns `None` when the shape has no `sh:path`.
    pub fn from_shape(shape: &Value) -> Option<Self> {
        let key = first_predicate_id(shape, sh::PATH)?.to_string();
        let machine_only = is_machine_only(shape);

        Some(Self {
            label: label(shape).unwrap_or(key.as_str()).to_string(),
            description: description(shape).map(String::from),
            values: Vec::new(),
            datatype: first_predicate_id(shape, sh::DATATYPE).map(String::from),
            class_name: first_predicate_id(shape, sh::CLASS).map(String::from),
            allowed_values: allowed_values(shape),
            min_values_count: first_predicate_count(shape, sh::MIN_COUNT),
            max_values_count: first_predicate_count(shape, sh::MAX_COUNT),
            machine_only,
            is_rdf_list: is_rdf_list(shape),
            is_relation_shape: is_relation_shape(shape),
            is_generic_iri_resource: is_generic_iri_resource(shape),
            is_editable: !machine_only,
            errors: Vec::new(),
            key,
        })
    }

    /// The synthetic, machine-only `@type` property.
    pub fn type_property(values: Vec<PropertyValue>) -> Self {
        Self {
            key: TYPE_KEY.to_string(),
            label: TYPE_LABEL.to_string(),
            values,
            machine_only: true,
            is_editable: false,
            ..Default::default()
        }
    }

    /// Whether a user may add another value.
    pub fn can_add(&self) -> bool {
        let max_reached = self
            .max_values_count
            .is_some_and(|max| self.values.len() >= max as usize);
        self.is_editable && !self.machine_only && !max_reached
    }

    /// Whether existing values are fixed once set: machine-only properties,
    /// generic IRI references and values picked from a closed list.
    pub fn disallows_editing_existing_values(&self) -> bool {
        self.machine_only || self.is_generic_iri_resource || self.allowed_values.is_some()
    }

    /// Whether any value matches the given literal or id.
    pub fn contains_value_or_id(&self, value: Option<&Value>, id: Option<&str>) -> bool {
        self.values.iter().any(|v| v.matches(value, id))
    }

    /// Whether at least one value must be provided.
    pub fn is_required(&self) -> bool {
        self.min_values_count.is_some_and(|min| min > 0)
    }
}

/// Sort properties: those with values first, then ascending by label.
pub fn sort_properties(properties: &mut [Property]) {
    properties.sort_by(|a, b| {
        a.values
            .is_empty()
            .cmp(&b.values.is_empty())
            .then_with(|| a.label.cmp(&b.label))
    });
}
