//! Text search over the file system metadata.
//!
//! Builds the SPARQL query posted to `/api/v1/rdf/query` and reads the
//! SPARQL JSON select results it returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mercury_core::vocab::fs;
use mercury_core::SearchConfig;

use crate::error::Result;

/// Endpoint accepting the query built by [`file_system_query`].
pub const QUERY_ENDPOINT: &str = "/api/v1/rdf/query";

/// `Accept` header for SPARQL select results.
pub const SPARQL_SELECT_ACCEPT: &str = "application/sparql-results+json";

/// A ready-to-send search: POST `query` to `endpoint` with `accept` as the
/// `Accept` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub endpoint: &'static str,
    pub accept: &'static str,
    pub query: String,
}

/// The request for a file system text search, see [`file_system_query`].
pub fn file_system_search(
    search_text: &str,
    location_prefix: Option<&str>,
    config: &SearchConfig,
) -> SearchRequest {
    SearchRequest {
        endpoint: QUERY_ENDPOINT,
        accept: SPARQL_SELECT_ACCEPT,
        query: file_system_query(search_text, location_prefix, config),
    }
}

/// Build a text query for collections, directories and files matching
/// `search_text` as a prefix, optionally restricted to paths under
/// `location_prefix`. Deleted items are excluded.
pub fn file_system_query(
    search_text: &str,
    location_prefix: Option<&str>,
    config: &SearchConfig,
) -> String {
    let pattern = format!("{}*", escape_text(search_text));
    let location_filter = match location_prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("AND (\"{}/*\")", escape_text(prefix)),
        None => String::new(),
    };
    // The text index names fields after the predicate's local name.
    let deleted_field = local_name(fs::DATE_DELETED);
    let type_filter = format!(
        "AND (type:{})",
        config
            .file_system_types
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join("|")
    );

    format!(
        r#"
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX text: <http://jena.apache.org/text#>

SELECT ?id ?label ?type ?comment
WHERE {{
    ?id text:query ( '{pattern} {location_filter} AND NOT ({deleted_field}:*) {type_filter}' {limit} ) ;
        rdfs:label ?label ;
        a ?type ;
        rdfs:comment ?comment .
}}
"#,
        limit = config.max_results,
    )
}

fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Escape text for embedding in the single-quoted query string: JSON string
/// escaping plus escaped single quotes.
fn escape_text(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].replace('\'', "\\'")
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    results: SelectResults,
}

#[derive(Debug, Deserialize)]
struct SelectResults {
    #[serde(default)]
    bindings: Vec<BTreeMap<String, Binding>>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    value: String,
}

/// Flatten SPARQL JSON select results into rows of variable → value.
pub fn extract_select_results(body: &str) -> Result<Vec<BTreeMap<String, String>>> {
    let response: SelectResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .bindings
        .into_iter()
        .map(|row| row.into_iter().map(|(var, b)| (var, b.value)).collect())
        .collect())
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub type_iri: Option<String>,
    pub comment: Option<String>,
}

impl SearchHit {
    /// Read a hit from a result row; rows without `id` are not hits.
    pub fn from_row(row: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            id: row.get("id")?.clone(),
            label: row.get("label").cloned(),
            type_iri: row.get("type").cloned(),
            comment: row.get("comment").cloned(),
        })
    }
}

/// Parse the response to a [`file_system_query`] into hits.
pub fn parse_hits(body: &str) -> Result<Vec<SearchHit>> {
    Ok(extract_select_results(body)?
        .iter()
        .filter_map(SearchHit::from_row)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_contains_filters() {
        let query = file_system_query("report", Some("/coll1/dir"), &SearchConfig::default());

        assert!(query.contains("text:query ( 'report* AND (\"/coll1/dir/*\") AND NOT (dateDeleted:*)"));
        assert!(query.contains(
            "AND (type:\"http://fairspace.io/ontology#Collection\"|\"http://fairspace.io/ontology#Directory\"|\"http://fairspace.io/ontology#File\")' 20 )"
        ));
        assert!(query.contains("SELECT ?id ?label ?type ?comment"));
    }

    #[test]
    fn test_query_without_location() {
        let config = SearchConfig {
            max_results: 5,
            file_system_types: vec!["http://x/T".to_string()],
        };
        let query = file_system_query("a", None, &config);
        assert!(query.contains("'a*  AND NOT (dateDeleted:*) AND (type:\"http://x/T\")' 5 )"));
    }

    #[test]
    fn test_file_system_search_request() {
        let request = file_system_search("data", None, &SearchConfig::default());
        assert_eq!(request.endpoint, "/api/v1/rdf/query");
        assert_eq!(request.accept, "application/sparql-results+json");
        assert!(request.query.contains("'data*  AND NOT (dateDeleted:*)"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["endpoint"], QUERY_ENDPOINT);
        assert_eq!(json["query"], request.query);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(fs::DATE_DELETED), "dateDeleted");
        assert_eq!(local_name("http://x/a/b"), "b");
    }

    #[test]
    fn test_escapes_search_text() {
        assert_eq!(escape_text(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_text("it's"), r"it\'s");
        assert_eq!(escape_text("a\\b"), r"a\\b");
    }

    #[test]
    fn test_parse_hits() {
        let body = r#"{
            "head": {"vars": ["id", "label", "type", "comment"]},
            "results": {"bindings": [
                {
                    "id": {"type": "uri", "value": "http://x/files/1"},
                    "label": {"type": "literal", "value": "report.pdf"},
                    "type": {"type": "uri", "value": "http://fairspace.io/ontology#File"},
                    "comment": {"type": "literal", "value": ""}
                },
                {
                    "label": {"type": "literal", "value": "no id"}
                }
            ]}
        }"#;

        let rows = extract_select_results(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("label").map(String::as_str), Some("no id"));

        let hits = parse_hits(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "http://x/files/1");
        assert_eq!(hits[0].label.as_deref(), Some("report.pdf"));
        assert_eq!(hits[0].type_iri.as_deref(), Some("http://fairspace.io/ontology#File"));
    }

    #[test]
    fn test_parse_hits_rejects_garbage() {
        assert!(parse_hits("not json").is_err());
    }
}
