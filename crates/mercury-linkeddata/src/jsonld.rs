//! Accessors over expanded JSON-LD node objects.
//!
//! Expanded JSON-LD stores every predicate as an array of value objects
//! (`{"@value": ..}`, `{"@id": ..}` or `{"@list": [..]}`). These helpers
//! tolerate the non-array shorthand as well, treating a bare object as a
//! one-element array.

use serde_json::Value;

use mercury_core::vocab::{jsonld, rdfs, sh};

/// The `@id` of a node, if it has one.
pub fn node_id(node: &Value) -> Option<&str> {
    node.get(jsonld::ID).and_then(Value::as_str)
}

/// The `@type` IRIs of a node, in declaration order.
pub fn node_types(node: &Value) -> Vec<&str> {
    match node.get(jsonld::TYPE) {
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(t)) => vec![t.as_str()],
        _ => Vec::new(),
    }
}

/// All value objects stored under `predicate`.
pub fn predicate_values<'a>(node: &'a Value, predicate: &str) -> Vec<&'a Value> {
    match node.get(predicate) {
        Some(Value::Array(values)) => values.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

/// The first value object stored under `predicate`.
pub fn first_predicate_value<'a>(node: &'a Value, predicate: &str) -> Option<&'a Value> {
    predicate_values(node, predicate).into_iter().next()
}

/// The `@id` of the first value stored under `predicate`.
pub fn first_predicate_id<'a>(node: &'a Value, predicate: &str) -> Option<&'a str> {
    first_predicate_value(node, predicate).and_then(node_id)
}

/// The literal (`@value`) of the first value stored under `predicate`.
pub fn first_predicate_literal<'a>(node: &'a Value, predicate: &str) -> Option<&'a Value> {
    first_predicate_value(node, predicate).and_then(|v| v.get(jsonld::VALUE))
}

/// The first literal under `predicate`, as a string.
pub fn first_predicate_str<'a>(node: &'a Value, predicate: &str) -> Option<&'a str> {
    first_predicate_literal(node, predicate).and_then(Value::as_str)
}

/// The first literal under `predicate`, as an unsigned count.
///
/// Counts may arrive as numbers or as numeric strings, depending on how the
/// vocabulary was serialized.
pub fn first_predicate_count(node: &Value, predicate: &str) -> Option<u32> {
    match first_predicate_literal(node, predicate)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whether the first literal under `predicate` is boolean true.
pub fn first_predicate_bool(node: &Value, predicate: &str) -> bool {
    match first_predicate_literal(node, predicate) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// A human label for a node: `rdfs:label`, falling back to `sh:name`.
pub fn label(node: &Value) -> Option<&str> {
    first_predicate_str(node, rdfs::LABEL).or_else(|| first_predicate_str(node, sh::NAME))
}

/// A human description for a node: `sh:description`, falling back to `rdfs:comment`.
pub fn description(node: &Value) -> Option<&str> {
    first_predicate_str(node, sh::DESCRIPTION).or_else(|| first_predicate_str(node, rdfs::COMMENT))
}

/// Find the node with the given `@id` in an expanded graph.
pub fn find_node<'a>(graph: &'a [Value], id: &str) -> Option<&'a Value> {
    graph.iter().find(|node| node_id(node) == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_types_accepts_string_and_array() {
        let single = json!({"@id": "a", "@type": "http://x/T"});
        let many = json!({"@id": "a", "@type": ["http://x/T", "http://x/U"]});
        let none = json!({"@id": "a"});

        assert_eq!(node_types(&single), vec!["http://x/T"]);
        assert_eq!(node_types(&many), vec!["http://x/T", "http://x/U"]);
        assert!(node_types(&none).is_empty());
    }

    #[test]
    fn test_predicate_values_accepts_bare_object() {
        let node = json!({
            "@id": "a",
            "http://x/p": {"@value": "one"},
            "http://x/q": [{"@value": "two"}, {"@value": "three"}]
        });

        assert_eq!(predicate_values(&node, "http://x/p").len(), 1);
        assert_eq!(predicate_values(&node, "http://x/q").len(), 2);
        assert!(predicate_values(&node, "http://x/missing").is_empty());
    }

    #[test]
    fn test_counts_and_flags() {
        let node = json!({
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 1}],
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": "3"}],
            "http://fairspace.io/ontology#machineOnly": [{"@value": true}]
        });

        assert_eq!(first_predicate_count(&node, sh::MIN_COUNT), Some(1));
        assert_eq!(first_predicate_count(&node, sh::MAX_COUNT), Some(3));
        assert!(first_predicate_bool(&node, mercury_core::vocab::fs::MACHINE_ONLY));
        assert!(!first_predicate_bool(&node, "http://x/absent"));
    }

    #[test]
    fn test_label_falls_back_to_shacl_name() {
        let labelled = json!({"http://www.w3.org/2000/01/rdf-schema#label": [{"@value": "L"}]});
        let named = json!({"http://www.w3.org/ns/shacl#name": [{"@value": "N"}]});

        assert_eq!(label(&labelled), Some("L"));
        assert_eq!(label(&named), Some("N"));
        assert_eq!(label(&json!({})), None);
    }
}
