//! SHACL vocabulary index.
//!
//! The vocabulary is an expanded JSON-LD array holding node shapes (one per
//! class, linked to the class by `sh:targetClass`) and property shapes (one
//! per predicate, linked to the predicate by `sh:path`). Node shapes point to
//! their property shapes through `sh:property`.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use mercury_core::vocab::{dash, fs, jsonld, rdfs, sh};

use crate::error::{LinkedDataError, Result};
use crate::jsonld::{
    description, first_predicate_bool, first_predicate_id, label, node_id, node_types,
    predicate_values,
};

/// Read-only lookup structure over a vocabulary graph.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    nodes: Vec<Value>,
    by_id: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from already expanded JSON-LD nodes.
    pub fn from_expanded(nodes: Vec<Value>) -> Self {
        let by_id = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node_id(node).map(|id| (id.to_string(), i)))
            .collect();

        Self { nodes, by_id }
    }

    /// Build a vocabulary from a JSON document: either an expanded array or
    /// an object carrying the array under `@graph`.
    pub fn from_json(doc: Value) -> Result<Self> {
        let nodes = match doc {
            Value::Array(nodes) => nodes,
            Value::Object(mut map) => match map.remove("@graph") {
                Some(Value::Array(nodes)) => nodes,
                _ => return Err(LinkedDataError::NotExpanded),
            },
            _ => return Err(LinkedDataError::NotExpanded),
        };

        let vocabulary = Self::from_expanded(nodes);
        tracing::info!(
            nodes = vocabulary.nodes.len(),
            node_shapes = vocabulary.node_shapes().count(),
            "Vocabulary loaded"
        );
        Ok(vocabulary)
    }

    /// Parse a vocabulary from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(json)?)
    }

    /// Number of nodes in the vocabulary graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up any vocabulary node by IRI.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    /// All node shapes, i.e. nodes declaring a target class.
    pub fn node_shapes(&self) -> impl Iterator<Item = &Value> {
        self.nodes
            .iter()
            .filter(|node| first_predicate_id(node, sh::TARGET_CLASS).is_some())
    }

    /// The node shape whose `sh:targetClass` is `type_iri`.
    pub fn shape_for_type(&self, type_iri: &str) -> Option<&Value> {
        self.node_shapes()
            .find(|shape| target_classes(shape).any(|class| class == type_iri))
    }

    /// The property shape whose `sh:path` is `predicate`.
    pub fn shape_for_property(&self, predicate: &str) -> Option<&Value> {
        self.nodes
            .iter()
            .find(|node| first_predicate_id(node, sh::PATH) == Some(predicate))
    }

    /// Property shapes declared for any of the given types, deduplicated,
    /// in the order the node shapes declare them.
    pub fn property_shapes_for_types(&self, types: &[&str]) -> Vec<&Value> {
        let mut seen = HashSet::new();
        let mut shapes = Vec::new();

        for type_iri in types {
            let Some(node_shape) = self.shape_for_type(type_iri) else {
                continue;
            };
            for reference in predicate_values(node_shape, sh::PROPERTY) {
                let Some(id) = node_id(reference) else {
                    continue;
                };
                if !seen.insert(id) {
                    continue;
                }
                match self.get(id) {
                    Some(shape) if first_predicate_id(shape, sh::PATH).is_some() => {
                        shapes.push(shape)
                    }
                    _ => tracing::warn!(
                        shape = id,
                        class = type_iri,
                        "Property shape missing or without sh:path, skipping"
                    ),
                }
            }
        }

        shapes
    }

    /// Label and comment for a class, taken from its node shape or, failing
    /// that, from a node describing the class itself.
    pub fn class_label_and_comment(&self, type_iri: &str) -> (Option<String>, Option<String>) {
        let Some(node) = self.shape_for_type(type_iri).or_else(|| self.get(type_iri)) else {
            return (None, None);
        };
        (
            label(node).map(String::from),
            description(node).map(String::from),
        )
    }

    /// Predicates that only the system may write.
    pub fn machine_only_predicates(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| is_machine_only(node))
            .filter_map(|node| first_predicate_id(node, sh::PATH))
            .collect()
    }
}

/// Target classes declared by a node shape.
pub fn target_classes(shape: &Value) -> impl Iterator<Item = &str> {
    predicate_values(shape, sh::TARGET_CLASS)
        .into_iter()
        .filter_map(node_id)
}

/// A property shape whose values form an ordered `rdf:List`.
pub fn is_rdf_list(property_shape: &Value) -> bool {
    first_predicate_id(property_shape, sh::NODE) == Some(dash::LIST_SHAPE)
}

pub fn is_machine_only(property_shape: &Value) -> bool {
    first_predicate_bool(property_shape, fs::MACHINE_ONLY)
}

/// A property shape describing a relation to another entity.
pub fn is_relation_shape(property_shape: &Value) -> bool {
    node_types(property_shape).contains(&fs::RELATION_SHAPE)
}

/// A property shape whose values may be any IRI.
pub fn is_generic_iri_resource(property_shape: &Value) -> bool {
    first_predicate_id(property_shape, sh::CLASS) == Some(rdfs::RESOURCE)
}

/// The allowed values of a property shape (`sh:in`), which may be a plain
/// array of values or a single `@list`.
pub fn allowed_values(property_shape: &Value) -> Option<Vec<Value>> {
    let entries = predicate_values(property_shape, sh::IN);
    if entries.is_empty() {
        return None;
    }

    let mut values = Vec::new();
    for entry in entries {
        match entry.get(jsonld::LIST) {
            Some(Value::Array(items)) => values.extend(items.iter().cloned()),
            _ => values.push(entry.clone()),
        }
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_json(json!([
            {
                "@id": "http://x/ThingShape",
                "@type": [sh::NODE_SHAPE],
                (sh::TARGET_CLASS): [{"@id": "http://x/Thing"}],
                (sh::NAME): [{"@value": "Thing"}],
                (sh::DESCRIPTION): [{"@value": "Any thing"}],
                (sh::PROPERTY): [{"@id": "http://x/nameShape"}, {"@id": "http://x/missingShape"}]
            },
            {
                "@id": "http://x/OtherShape",
                (sh::TARGET_CLASS): [{"@id": "http://x/Other"}],
                (sh::PROPERTY): [{"@id": "http://x/nameShape"}, {"@id": "http://x/partsShape"}]
            },
            {
                "@id": "http://x/nameShape",
                (sh::PATH): [{"@id": "http://x/name"}],
                (fs::MACHINE_ONLY): [{"@value": true}]
            },
            {
                "@id": "http://x/partsShape",
                "@type": [sh::PROPERTY_SHAPE, fs::RELATION_SHAPE],
                (sh::PATH): [{"@id": "http://x/parts"}],
                (sh::NODE): [{"@id": dash::LIST_SHAPE}],
                (sh::IN): [{"@list": [{"@value": "a"}, {"@value": "b"}]}]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_rejects_non_array_document() {
        let result = Vocabulary::from_json(json!({"@id": "x"}));
        assert!(matches!(result, Err(LinkedDataError::NotExpanded)));
    }

    #[test]
    fn test_accepts_graph_wrapper() {
        let vocab = Vocabulary::from_json(json!({"@graph": [{"@id": "a"}]})).unwrap();
        assert_eq!(vocab.len(), 1);
        assert!(vocab.get("a").is_some());
    }

    #[test]
    fn test_shape_lookup() {
        let vocab = vocabulary();
        assert_eq!(
            node_id(vocab.shape_for_type("http://x/Thing").unwrap()),
            Some("http://x/ThingShape")
        );
        assert!(vocab.shape_for_type("http://x/Unknown").is_none());
        assert_eq!(
            node_id(vocab.shape_for_property("http://x/parts").unwrap()),
            Some("http://x/partsShape")
        );
    }

    #[test]
    fn test_property_shapes_union_without_duplicates() {
        let vocab = vocabulary();
        let shapes = vocab.property_shapes_for_types(&["http://x/Thing", "http://x/Other"]);
        let ids: Vec<_> = shapes.iter().filter_map(|s| node_id(s)).collect();
        assert_eq!(ids, vec!["http://x/nameShape", "http://x/partsShape"]);
    }

    #[test]
    fn test_flags() {
        let vocab = vocabulary();
        let name = vocab.shape_for_property("http://x/name").unwrap();
        let parts = vocab.shape_for_property("http://x/parts").unwrap();

        assert!(is_machine_only(name));
        assert!(!is_rdf_list(name));
        assert!(is_rdf_list(parts));
        assert!(is_relation_shape(parts));
        assert!(!is_generic_iri_resource(parts));
        assert_eq!(
            allowed_values(parts),
            Some(vec![json!({"@value": "a"}), json!({"@value": "b"})])
        );
        assert_eq!(allowed_values(name), None);
        assert_eq!(vocab.machine_only_predicates(), vec!["http://x/name"]);
    }

    #[test]
    fn test_class_label_and_comment() {
        let vocab = vocabulary();
        assert_eq!(
            vocab.class_label_and_comment("http://x/Thing"),
            (Some("Thing".to_string()), Some("Any thing".to_string()))
        );
        assert_eq!(vocab.class_label_and_comment("http://x/Nope"), (None, None));
    }
}
