//! Conversion between expanded JSON-LD and property lists.
//!
//! - [`from_json_ld`] materializes one subject of a graph into the
//!   vocabulary-declared properties of its type(s).
//! - [`to_json_ld`] turns edited values for one predicate back into a JSON-LD
//!   fragment; [`to_json_ld_entity`] merges several of those into one node.
//! - [`empty_linked_data`] describes a not-yet-existing entity of a class.

use serde_json::{json, Map, Value};

use mercury_core::vocab::{jsonld, rdf, rdfs, sh};

use crate::error::{LinkedDataError, Result};
use crate::iri::generate_iri;
use crate::jsonld::{
    find_node, first_predicate_id, first_predicate_str, node_id, node_types, predicate_values,
};
use crate::property::{compare_by_display_value, sort_properties, Property, PropertyValue};
use crate::vocabulary::{is_rdf_list, Vocabulary};

/// Materialize `subject` from an expanded JSON-LD graph.
///
/// Returns one property per predicate the vocabulary declares for the
/// subject's types, sorted with filled properties first and then by label,
/// followed by the synthetic `@type` property. Returns an empty list when the
/// subject is not in the graph or none of its types is known to the
/// vocabulary.
pub fn from_json_ld(graph: &[Value], subject: &str, vocabulary: &Vocabulary) -> Vec<Property> {
    let Some(node) = find_node(graph, subject) else {
        tracing::debug!(subject, "Subject not found in graph");
        return Vec::new();
    };

    let types = node_types(node);
    if types.is_empty() {
        tracing::debug!(subject, "Subject has no type");
        return Vec::new();
    }
    if types.iter().all(|t| vocabulary.shape_for_type(t).is_none()) {
        tracing::debug!(subject, ?types, "No type of the subject has a shape");
        return Vec::new();
    }

    let mut properties: Vec<Property> = vocabulary
        .property_shapes_for_types(&types)
        .into_iter()
        .filter_map(|shape| {
            let mut property = Property::from_shape(shape)?;
            property.values = collect_values(node, &property.key, graph, is_rdf_list(shape));
            Some(property)
        })
        .collect();

    sort_properties(&mut properties);
    properties.push(type_property(&types, vocabulary));
    properties
}

/// Values of `predicate` on `node`. List values keep their order and multiple
/// lists are concatenated; set values are sorted by display value.
fn collect_values(
    node: &Value,
    predicate: &str,
    graph: &[Value],
    rdf_list: bool,
) -> Vec<PropertyValue> {
    let mut values: Vec<PropertyValue> = predicate_values(node, predicate)
        .into_iter()
        .flat_map(|entry| match entry.get(jsonld::LIST) {
            Some(Value::Array(items)) => items.iter().collect::<Vec<_>>(),
            _ => vec![entry],
        })
        .filter_map(|entry| to_property_value(entry, graph))
        .collect();

    if !rdf_list {
        values.sort_by(compare_by_display_value);
    }
    values
}

fn to_property_value(entry: &Value, graph: &[Value]) -> Option<PropertyValue> {
    if let Some(literal) = entry.get(jsonld::VALUE) {
        return Some(PropertyValue::literal(literal.clone()));
    }

    let id = node_id(entry)?;
    let label = find_node(graph, id)
        .and_then(|referenced| first_predicate_str(referenced, rdfs::LABEL))
        .map(String::from);
    Some(PropertyValue::reference(id, label))
}

fn type_property(types: &[&str], vocabulary: &Vocabulary) -> Property {
    let values = types
        .iter()
        .map(|type_iri| {
            let (label, comment) = vocabulary.class_label_and_comment(type_iri);
            PropertyValue {
                id: Some(type_iri.to_string()),
                label,
                comment,
                ..Default::default()
            }
        })
        .collect();
    Property::type_property(values)
}

/// Build the JSON-LD fragment `{"@id": subject, predicate: ..}` for new values.
///
/// Returns `None` if any argument is missing. An empty value list becomes a
/// reference to `rdf:nil`, marking the predicate as explicitly cleared.
/// Predicates shaped as `rdf:List` get a single `{"@list": [..]}`.
pub fn to_json_ld(
    subject: Option<&str>,
    predicate: Option<&str>,
    values: Option<&[PropertyValue]>,
    vocabulary: &Vocabulary,
) -> Option<Value> {
    let (subject, predicate, values) = (subject?, predicate?, values?);

    let mut fragment = Map::new();
    fragment.insert(jsonld::ID.to_string(), Value::String(subject.to_string()));
    fragment.insert(predicate.to_string(), predicate_json(predicate, values, vocabulary));
    Some(Value::Object(fragment))
}

fn predicate_json(predicate: &str, values: &[PropertyValue], vocabulary: &Vocabulary) -> Value {
    let items: Vec<Value> = values.iter().filter_map(value_json).collect();
    if items.is_empty() {
        return json!({ (jsonld::ID): rdf::NIL });
    }

    let list_shaped = vocabulary
        .shape_for_property(predicate)
        .is_some_and(is_rdf_list);
    if list_shaped {
        json!({ (jsonld::LIST): items })
    } else {
        Value::Array(items)
    }
}

fn value_json(value: &PropertyValue) -> Option<Value> {
    if let Some(id) = &value.id {
        return Some(json!({ (jsonld::ID): id }));
    }
    match &value.value {
        Some(Value::Null) | None => None,
        Some(literal) => Some(json!({ (jsonld::VALUE): literal })),
    }
}

/// Merge the fragments for several changed predicates into a single node.
///
/// Each change follows [`to_json_ld`], so an empty value list clears the
/// predicate. Returns `None` when `subject` is missing.
pub fn to_json_ld_entity(
    subject: Option<&str>,
    changes: &[(String, Vec<PropertyValue>)],
    vocabulary: &Vocabulary,
) -> Option<Value> {
    let subject = subject?;

    let mut entity = Map::new();
    entity.insert(jsonld::ID.to_string(), Value::String(subject.to_string()));
    for (predicate, values) in changes {
        let fragment = to_json_ld(
            Some(subject),
            Some(predicate.as_str()),
            Some(values.as_slice()),
            vocabulary,
        );
        if let Some(Value::Object(fragment)) = fragment {
            entity.extend(fragment.into_iter().filter(|(key, _)| key != jsonld::ID));
        }
    }
    Some(Value::Object(entity))
}

/// Describe a new entity of the class targeted by `shape`: every declared
/// property without values, plus the type property holding the class.
///
/// Returns an empty list when the vocabulary or shape is missing.
pub fn empty_linked_data(vocabulary: Option<&Vocabulary>, shape: Option<&Value>) -> Vec<Property> {
    let (Some(vocabulary), Some(shape)) = (vocabulary, shape) else {
        return Vec::new();
    };
    let Some(type_iri) = first_predicate_id(shape, sh::TARGET_CLASS) else {
        tracing::debug!(shape = ?node_id(shape), "Shape has no target class");
        return Vec::new();
    };

    let mut properties: Vec<Property> = vocabulary
        .property_shapes_for_types(&[type_iri])
        .into_iter()
        .filter_map(Property::from_shape)
        .collect();

    sort_properties(&mut properties);
    properties.push(type_property(&[type_iri], vocabulary));
    properties
}

/// A freshly minted entity: its IRI and its empty property list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NewEntity {
    #[serde(rename = "@id")]
    pub id: String,
    pub properties: Vec<Property>,
}

/// Mint an IRI under `iri_base` for a new entity of `type_iri`.
pub fn new_entity(vocabulary: &Vocabulary, type_iri: &str, iri_base: &str) -> Result<NewEntity> {
    let shape = vocabulary
        .shape_for_type(type_iri)
        .ok_or_else(|| LinkedDataError::UnknownClass {
            type_iri: type_iri.to_string(),
        })?;

    Ok(NewEntity {
        id: generate_iri(iri_base)?,
        properties: empty_linked_data(Some(vocabulary), Some(shape)),
    })
}
