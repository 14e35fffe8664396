//! Validation of property values against their shape constraints.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use mercury_core::vocab::{jsonld, xsd};

use crate::property::{Property, PropertyValue};

/// Check one property's values against its cardinality, datatype and
/// allowed-value constraints. Returns the human-readable errors.
pub fn validate_property(property: &Property) -> Vec<String> {
    let mut errors = Vec::new();
    let count = property.values.len();

    if let Some(min) = property.min_values_count {
        if count < min as usize {
            errors.push(format!("Provide at least {min} {}", plural(min)));
        }
    }
    if let Some(max) = property.max_values_count {
        if count > max as usize {
            errors.push(format!("Provide at most {max} {}", plural(max)));
        }
    }

    if let Some(datatype) = property.datatype.as_deref() {
        let invalid = property
            .values
            .iter()
            .filter_map(|v| v.value.as_ref())
            .any(|literal| !matches_datatype(literal, datatype));
        if invalid {
            errors.push(format!("Provide a valid {}", datatype_name(datatype)));
        }
    }

    if let Some(allowed) = &property.allowed_values {
        for value in &property.values {
            if !is_allowed(value, allowed) {
                errors.push(format!("Value not allowed: {}", value.display_value()));
            }
        }
    }

    errors
}

/// Validate every property in place, replacing its `errors`.
/// Returns whether all properties are valid.
pub fn validate_properties(properties: &mut [Property]) -> bool {
    let mut valid = true;
    for property in properties.iter_mut() {
        property.errors = validate_property(property);
        if !property.errors.is_empty() {
            tracing::debug!(
                key = %property.key,
                errors = property.errors.len(),
                "Property failed validation"
            );
            valid = false;
        }
    }
    valid
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        "value"
    } else {
        "values"
    }
}

fn datatype_name(datatype: &str) -> &str {
    match datatype {
        xsd::INTEGER => "integer",
        xsd::DECIMAL => "decimal",
        xsd::BOOLEAN => "boolean",
        xsd::DATE => "date",
        xsd::DATE_TIME => "date and time",
        xsd::ANY_URI => "URL",
        other => other.rsplit(['#', '/']).next().unwrap_or(other),
    }
}

/// Whether a literal is a valid lexical form of `datatype`. Unknown
/// datatypes accept anything.
pub fn matches_datatype(literal: &Value, datatype: &str) -> bool {
    match (datatype, literal) {
        (xsd::INTEGER, Value::Number(n)) => n.is_i64() || n.is_u64(),
        (xsd::INTEGER, Value::String(s)) => s.trim().parse::<i64>().is_ok(),
        (xsd::DECIMAL, Value::Number(_)) => true,
        (xsd::DECIMAL, Value::String(s)) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        (xsd::BOOLEAN, Value::Bool(_)) => true,
        (xsd::BOOLEAN, Value::String(s)) => s == "true" || s == "false",
        (xsd::DATE, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
        (xsd::DATE_TIME, Value::String(s)) => {
            DateTime::parse_from_rfc3339(s).is_ok()
                || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        }
        (xsd::ANY_URI, Value::String(s)) => looks_like_uri(s),
        (
            xsd::INTEGER | xsd::DECIMAL | xsd::BOOLEAN | xsd::DATE | xsd::DATE_TIME | xsd::ANY_URI,
            _,
        ) => false,
        _ => true,
    }
}

/// `scheme:rest` with an alphabetic scheme and a non-empty rest.
fn looks_like_uri(s: &str) -> bool {
    match s.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn is_allowed(value: &PropertyValue, allowed: &[Value]) -> bool {
    allowed.iter().any(|entry| {
        let allowed_literal = entry.get(jsonld::VALUE);
        let allowed_id = entry.get(jsonld::ID).and_then(Value::as_str);
        value.matches(allowed_literal, allowed_id)
    })
}
