//! SPARQL 1.1 Query Results JSON data model.
//!
//! W3C standard format with type metadata:
//! ```json
//! {
//!   "head": {"vars": ["s", "name"]},
//!   "results": {"bindings": [{
//!     "s": {"type": "uri", "value": "http://example.org/alice"},
//!     "name": {"type": "literal", "value": "Alice"}
//!   }]}
//! }
//! ```
//!
//! Key features:
//! - `head.vars` carries the ordered column names (without `?` prefix)
//! - Each binding: `{"type": "literal|uri|bnode", "value": "...",
//!   "datatype"?: "...", "xml:lang"?: "..."}`
//! - Unbound variables are simply absent from a row
//!
//! The document is produced by the results-UI host and is read-only to this
//! crate; nothing here mutates it.

use crate::error::{MapViewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of bindings: column name to typed term.
pub type Row = HashMap<String, Term>;

/// A complete SPARQL SELECT result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparqlResults {
    pub head: Head,
    pub results: Bindings,
}

/// Result header: ordered variable names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head {
    pub vars: Vec<String>,
}

/// Result body: ordered rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    pub bindings: Vec<Row>,
}

/// RDF term kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Uri,
    Literal,
    Bnode,
}

/// A single typed result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(rename = "type")]
    pub kind: TermKind,

    /// Lexical value.
    pub value: String,

    /// Datatype IRI (omitted for plain and language-tagged literals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    /// Language tag.
    #[serde(rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Term {
    /// IRI term.
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Uri,
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    /// Plain literal.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Literal,
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    /// Typed literal with a datatype IRI.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Literal,
            value: value.into(),
            datatype: Some(datatype.into()),
            lang: None,
        }
    }

    /// Language-tagged literal.
    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Literal,
            value: value.into(),
            datatype: None,
            lang: Some(lang.into()),
        }
    }
}

impl SparqlResults {
    /// Parse a SPARQL results JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| MapViewError::Results(e.to_string()))
    }

    /// Ordered column names.
    pub fn vars(&self) -> &[String] {
        &self.head.vars
    }

    /// Iterate rows in result order.
    pub fn rows(&self) -> std::slice::Iter<'_, Row> {
        self.results.bindings.iter()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.results.bindings.len()
    }

    /// True when the result set has zero rows.
    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    /// First row, if any. Column detection examines only this row.
    pub fn first_row(&self) -> Option<&Row> {
        self.results.bindings.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_results_document() {
        let doc = json!({
            "head": {"vars": ["s", "name"]},
            "results": {"bindings": [{
                "s": {"type": "uri", "value": "http://example.org/alice"},
                "name": {"type": "literal", "value": "Alice", "xml:lang": "en"}
            }]}
        });
        let results = SparqlResults::from_json(&doc.to_string()).unwrap();

        assert_eq!(results.vars(), &["s", "name"]);
        assert_eq!(results.row_count(), 1);

        let row = results.first_row().unwrap();
        assert_eq!(row["s"], Term::uri("http://example.org/alice"));
        assert_eq!(row["name"], Term::lang_literal("Alice", "en"));
    }

    #[test]
    fn test_unbound_column_absent_from_row() {
        let doc = json!({
            "head": {"vars": ["a", "b"]},
            "results": {"bindings": [
                {"a": {"type": "literal", "value": "only a"}}
            ]}
        });
        let results = SparqlResults::from_json(&doc.to_string()).unwrap();
        let row = results.first_row().unwrap();
        assert!(row.contains_key("a"));
        assert!(!row.contains_key("b"));
    }

    #[test]
    fn test_empty_result_set() {
        let doc = json!({
            "head": {"vars": ["s"]},
            "results": {"bindings": []}
        });
        let results = SparqlResults::from_json(&doc.to_string()).unwrap();
        assert!(results.is_empty());
        assert!(results.first_row().is_none());
    }

    #[test]
    fn test_term_serialization_omits_absent_fields() {
        let value = serde_json::to_value(Term::literal("plain")).unwrap();
        assert_eq!(value, json!({"type": "literal", "value": "plain"}));

        let value = serde_json::to_value(Term::typed_literal("42", "http://www.w3.org/2001/XMLSchema#long")).unwrap();
        assert_eq!(
            value,
            json!({"type": "literal", "value": "42", "datatype": "http://www.w3.org/2001/XMLSchema#long"})
        );
    }

    #[test]
    fn test_malformed_document_is_a_results_error() {
        let err = SparqlResults::from_json("{\"head\": 7}").unwrap_err();
        assert!(matches!(err, MapViewError::Results(_)));
    }
}
