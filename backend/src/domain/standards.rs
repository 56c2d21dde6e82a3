//! Request and response value objects for standards classification.
//!
//! Request types are produced by the parsers in [`crate::domain::validation`]
//! and are the only shapes the gateway forwards to the backend. Response types
//! are owned by the backend: each wraps the JSON object it was decoded from,
//! offers read-only accessors and encodes back to the same object.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validated identifier of a curriculum standard.
///
/// ## Invariants
/// - The identifier is never empty.
///
/// # Examples
/// ```
/// use ontara_gateway::domain::validation::parse_standard_id;
///
/// let id = parse_standard_id("HSA-SSE.A.1").expect("non-empty id");
/// assert_eq!(id.as_str(), "HSA-SSE.A.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StandardId(String);

impl StandardId {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StandardId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Tuning options accepted by classification and matching requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionOptions {
    /// Minimum confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Upper bound on returned matches; strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
    /// Ask the backend to include archetype information (match requests only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_archetype: Option<bool>,
}

/// Validated body of `POST /api/classify`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyRequest {
    /// LaTeX source of the expression. Non-empty; never trimmed.
    pub latex: String,
    /// Optional tuning options. Accepted but not forwarded by classify.
    pub options: Option<ExpressionOptions>,
}

/// Parameters forwarded to the backend's expression matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExpressionParams {
    /// LaTeX source of the expression.
    pub latex: String,
    /// Optional matcher options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ExpressionOptions>,
}

/// Standards search parameters.
///
/// Absent fields stay absent: the default value is the empty parameter object
/// and serialises to `{}`.
///
/// # Examples
/// ```
/// use ontara_gateway::domain::SearchStandardsParams;
///
/// let params = SearchStandardsParams::default();
/// assert_eq!(serde_json::to_string(&params).expect("serialisable"), "{}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStandardsParams {
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Grade band filter, for example `9-12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Curriculum domain filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Page size in `[1, 100]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Zero-based offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// Declare a read-only wrapper around a backend-owned JSON object.
///
/// The wrapper decodes any JSON object and re-encodes it unchanged, explicit
/// `null`s and number formatting included.
macro_rules! backend_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            /// Field `key` exactly as the backend sent it.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// Every field exactly as the backend sent it.
            pub fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(fields: Map<String, Value>) -> Self {
                Self(fields)
            }
        }
    };
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn u64_field(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    fields.get(key).and_then(Value::as_u64)
}

fn objects<T: From<Map<String, Value>>>(fields: &Map<String, Value>, key: &str) -> Vec<T> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.as_object().cloned().map(T::from))
        .collect()
}

backend_object! {
    /// Curriculum standard as stored by the backend.
    ///
    /// # Examples
    /// ```
    /// use ontara_gateway::domain::Standard;
    ///
    /// let standard: Standard =
    ///     serde_json::from_str(r#"{"grade":null,"id":"8.EE.1","name":"Exponents"}"#)
    ///         .expect("any object decodes");
    /// assert_eq!(standard.id(), Some("8.EE.1"));
    /// assert_eq!(
    ///     serde_json::to_string(&standard).expect("encodes"),
    ///     r#"{"grade":null,"id":"8.EE.1","name":"Exponents"}"#
    /// );
    /// ```
    Standard
}

impl Standard {
    /// Backend identifier, for example `8.EE.1`.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.0, "id")
    }

    /// Display name.
    pub fn name(&self) -> Option<&str> {
        str_field(&self.0, "name")
    }

    /// Long-form description.
    pub fn description(&self) -> Option<&str> {
        str_field(&self.0, "description")
    }
}

backend_object! {
    /// One candidate standard for a classified expression.
    MatchResult
}

impl MatchResult {
    /// Identifier of the matched standard.
    pub fn standard_id(&self) -> Option<&str> {
        str_field(&self.0, "standardId")
    }

    /// Confidence in `[0, 1]` as reported by the backend.
    pub fn confidence(&self) -> Option<f64> {
        self.0.get("confidence").and_then(Value::as_f64)
    }

    /// Embedded standard record.
    pub fn standard(&self) -> Option<Standard> {
        self.0.get("standard").and_then(Value::as_object).cloned().map(Standard)
    }
}

backend_object! {
    /// Classification outcome for one expression.
    MatchExpressionResult
}

impl MatchExpressionResult {
    /// Result with no matches for the given expression.
    pub fn empty(expression: impl Into<String>) -> Self {
        let fields = [
            ("expression".to_owned(), Value::String(expression.into())),
            ("matches".to_owned(), Value::Array(Vec::new())),
        ];
        Self(fields.into_iter().collect())
    }

    /// Expression the backend classified.
    pub fn expression(&self) -> Option<&str> {
        str_field(&self.0, "expression")
    }

    /// Candidate matches that are JSON objects, in backend order.
    pub fn matches(&self) -> Vec<MatchResult> {
        objects(&self.0, "matches")
    }
}

backend_object! {
    /// One page of standards search results.
    SearchStandardsResult
}

impl SearchStandardsResult {
    /// Page built from its parts.
    pub fn page(standards: Vec<Standard>, total: u64, limit: u64, offset: u64) -> Self {
        let standards = standards.into_iter().map(|s| Value::Object(s.0)).collect();
        let fields = [
            ("standards".to_owned(), Value::Array(standards)),
            ("total".to_owned(), Value::from(total)),
            ("limit".to_owned(), Value::from(limit)),
            ("offset".to_owned(), Value::from(offset)),
        ];
        Self(fields.into_iter().collect())
    }

    /// Standards on this page.
    pub fn standards(&self) -> Vec<Standard> {
        objects(&self.0, "standards")
    }

    /// Total number of matching standards.
    pub fn total(&self) -> Option<u64> {
        u64_field(&self.0, "total")
    }

    /// Page size the backend applied.
    pub fn limit(&self) -> Option<u64> {
        u64_field(&self.0, "limit")
    }

    /// Offset the backend applied.
    pub fn offset(&self) -> Option<u64> {
        u64_field(&self.0, "offset")
    }
}

backend_object! {
    /// Description of the backend's ontology graph.
    SchemaInfo
}

impl SchemaInfo {
    /// Ontology version.
    pub fn version(&self) -> Option<&str> {
        str_field(&self.0, "version")
    }
}

/// Backend self-reported health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendHealth {
    /// Status label, `ok` when serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Deployed version.
    pub version: String,
}
