//! Typed request parsers.
//!
//! Each parser inspects an untyped JSON value and returns either the validated
//! request or a [`ValidationError`] listing every failing field. Optional means
//! absent: an explicit `null` is reported as a type error. Unknown fields are
//! ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::standards::{
    ClassifyRequest, ExpressionOptions, MatchExpressionParams, SearchStandardsParams, StandardId,
};

/// Machine-readable reason attached to a [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Missing, `null`, or the wrong JSON type.
    InvalidType,
    /// Below the minimum length or value.
    TooSmall,
    /// Above the maximum value.
    TooBig,
    /// A number with a fractional part where an integer is required.
    NotInteger,
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field path from the request root, for example `["options", "threshold"]`.
    pub path: Vec<String>,
    /// Why the field failed.
    pub code: IssueCode,
    /// Human-readable explanation.
    pub message: String,
}

/// Request input failed shape or constraint checks.
///
/// ## Invariants
/// - Holds at least one issue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", Summary(&self.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Issues in the order the fields were checked.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Consume the error and return its issues.
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

struct Summary<'a>(&'a [ValidationIssue]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid request")?;
        for (index, issue) in self.0.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{}: {}", issue.path.join("."), issue.message)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldName(&'static str);

impl FieldName {
    const LATEX: Self = Self("latex");
    const OPTIONS: Self = Self("options");
    const THRESHOLD: Self = Self("threshold");
    const MAX_RESULTS: Self = Self("maxResults");
    const INCLUDE_ARCHETYPE: Self = Self("includeArchetype");
    const QUERY: Self = Self("query");
    const GRADE: Self = Self("grade");
    const DOMAIN: Self = Self("domain");
    const LIMIT: Self = Self("limit");
    const OFFSET: Self = Self("offset");

    fn as_str(self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

/// Numeric constraints applied to a single field.
#[derive(Debug, Clone, Copy)]
struct NumberRule {
    integer: bool,
    min: Option<Bound>,
    max: Option<f64>,
}

const THRESHOLD_RULE: NumberRule = NumberRule {
    integer: false,
    min: Some(Bound::Inclusive(0.0)),
    max: Some(1.0),
};

const MAX_RESULTS_RULE: NumberRule = NumberRule {
    integer: true,
    min: Some(Bound::Exclusive(0.0)),
    max: None,
};

const LIMIT_RULE: NumberRule = NumberRule {
    integer: true,
    min: Some(Bound::Exclusive(0.0)),
    max: Some(100.0),
};

const OFFSET_RULE: NumberRule = NumberRule {
    integer: true,
    min: Some(Bound::Inclusive(0.0)),
    max: None,
};

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accumulates issues while fields are checked.
#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, path: &[FieldName], code: IssueCode, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.iter().map(|field| field.as_str().to_owned()).collect(),
            code,
            message: message.into(),
        });
    }

    fn type_mismatch(&mut self, path: &[FieldName], expected: &str, actual: &Value) {
        self.push(
            path,
            IssueCode::InvalidType,
            format!("Expected {expected}, received {}", json_type(actual)),
        );
    }

    fn root<'a>(&mut self, input: &'a Value) -> Option<&'a Map<String, Value>> {
        if let Value::Object(map) = input {
            Some(map)
        } else {
            self.type_mismatch(&[], "object", input);
            None
        }
    }

    fn required_string(
        &mut self,
        map: &Map<String, Value>,
        path: &[FieldName],
        empty_message: &str,
    ) -> Option<String> {
        let field = path.last()?.as_str();
        match map.get(field) {
            None => {
                self.push(path, IssueCode::InvalidType, "Required");
                None
            }
            Some(Value::String(text)) if text.is_empty() => {
                self.push(path, IssueCode::TooSmall, empty_message);
                None
            }
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                self.type_mismatch(path, "string", other);
                None
            }
        }
    }

    fn optional_string(&mut self, map: &Map<String, Value>, path: &[FieldName]) -> Option<String> {
        let field = path.last()?.as_str();
        match map.get(field)? {
            Value::String(text) => Some(text.clone()),
            other => {
                self.type_mismatch(path, "string", other);
                None
            }
        }
    }

    fn optional_bool(&mut self, map: &Map<String, Value>, path: &[FieldName]) -> Option<bool> {
        let field = path.last()?.as_str();
        match map.get(field)? {
            Value::Bool(flag) => Some(*flag),
            other => {
                self.type_mismatch(path, "boolean", other);
                None
            }
        }
    }

    fn optional_object<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        path: &[FieldName],
    ) -> Option<&'a Map<String, Value>> {
        let field = path.last()?.as_str();
        match map.get(field)? {
            Value::Object(inner) => Some(inner),
            other => {
                self.type_mismatch(path, "object", other);
                None
            }
        }
    }

    /// Returns the number only when every constraint in `rule` holds.
    fn optional_number<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        path: &[FieldName],
        rule: NumberRule,
    ) -> Option<&'a Number> {
        let field = path.last()?.as_str();
        let number = match map.get(field)? {
            Value::Number(number) => number,
            other => {
                self.type_mismatch(path, "number", other);
                return None;
            }
        };
        let value = number.as_f64()?;
        let before = self.issues.len();

        if rule.integer && value.fract() != 0.0 {
            self.push(path, IssueCode::NotInteger, "Expected integer, received float");
        }
        match rule.min {
            Some(Bound::Inclusive(min)) if value < min => self.push(
                path,
                IssueCode::TooSmall,
                format!("Number must be greater than or equal to {min}"),
            ),
            Some(Bound::Exclusive(min)) if value <= min => self.push(
                path,
                IssueCode::TooSmall,
                format!("Number must be greater than {min}"),
            ),
            _ => {}
        }
        if let Some(max) = rule.max.filter(|max| value > *max) {
            self.push(
                path,
                IssueCode::TooBig,
                format!("Number must be less than or equal to {max}"),
            );
        }

        (self.issues.len() == before).then_some(number)
    }

    fn optional_count(
        &mut self,
        map: &Map<String, Value>,
        path: &[FieldName],
        rule: NumberRule,
    ) -> Option<u64> {
        self.optional_number(map, path, rule)
            .map(|number| number.as_u64().unwrap_or_else(|| saturating_u64(number)))
    }

    fn expression_options(
        &mut self,
        map: &Map<String, Value>,
        allow_archetype: bool,
    ) -> Option<ExpressionOptions> {
        let options = self.optional_object(map, &[FieldName::OPTIONS])?;
        let threshold = self
            .optional_number(
                options,
                &[FieldName::OPTIONS, FieldName::THRESHOLD],
                THRESHOLD_RULE,
            )
            .and_then(Number::as_f64);
        let max_results = self.optional_count(
            options,
            &[FieldName::OPTIONS, FieldName::MAX_RESULTS],
            MAX_RESULTS_RULE,
        );
        let include_archetype = if allow_archetype {
            self.optional_bool(options, &[FieldName::OPTIONS, FieldName::INCLUDE_ARCHETYPE])
        } else {
            None
        };
        Some(ExpressionOptions {
            threshold,
            max_results,
            include_archetype,
        })
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => Err(ValidationError {
                issues: self.issues,
            }),
        }
    }
}

/// Integral JSON numbers written with a fractional part (`5.0`) are not
/// representable through `Number::as_u64`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "callers only pass non-negative integral values; out-of-range values saturate"
)]
fn saturating_u64(number: &Number) -> u64 {
    number.as_f64().map_or(0, |value| value as u64)
}

/// Validate the body of a classify request.
///
/// `latex` must be a non-empty string; it is not trimmed, so whitespace-only
/// input is accepted. `options.includeArchetype` is not part of this request
/// and is ignored.
///
/// # Examples
/// ```
/// use ontara_gateway::domain::validation::parse_classify_request;
/// use serde_json::json;
///
/// let request = parse_classify_request(&json!({ "latex": "x^2+1" })).expect("valid body");
/// assert_eq!(request.latex, "x^2+1");
/// assert!(parse_classify_request(&json!({ "latex": "" })).is_err());
/// ```
pub fn parse_classify_request(input: &Value) -> Result<ClassifyRequest, ValidationError> {
    let mut checker = Checker::default();
    let request = checker.root(input).and_then(|map| {
        let latex =
            checker.required_string(map, &[FieldName::LATEX], "LaTeX expression is required");
        let options = checker.expression_options(map, false);
        latex.map(|latex| ClassifyRequest { latex, options })
    });
    checker.finish(request)
}

/// Validate the body of an expression match request.
pub fn parse_match_request(input: &Value) -> Result<MatchExpressionParams, ValidationError> {
    let mut checker = Checker::default();
    let request = checker.root(input).and_then(|map| {
        let latex =
            checker.required_string(map, &[FieldName::LATEX], "LaTeX expression is required");
        let options = checker.expression_options(map, true);
        latex.map(|latex| MatchExpressionParams { latex, options })
    });
    checker.finish(request)
}

/// Validate standards search parameters.
///
/// All fields are optional and absent fields stay absent.
pub fn parse_search_request(input: &Value) -> Result<SearchStandardsParams, ValidationError> {
    let mut checker = Checker::default();
    let params = checker.root(input).map(|map| SearchStandardsParams {
        query: checker.optional_string(map, &[FieldName::QUERY]),
        grade: checker.optional_string(map, &[FieldName::GRADE]),
        domain: checker.optional_string(map, &[FieldName::DOMAIN]),
        limit: checker.optional_count(map, &[FieldName::LIMIT], LIMIT_RULE),
        offset: checker.optional_count(map, &[FieldName::OFFSET], OFFSET_RULE),
    });
    checker.finish(params)
}

/// Validate a standard identifier taken from the request path.
pub fn parse_standard_id(raw: &str) -> Result<StandardId, ValidationError> {
    if raw.is_empty() {
        let mut checker = Checker::default();
        checker.push(&[], IssueCode::TooSmall, "Standard ID is required");
        return checker.finish(None);
    }
    Ok(StandardId::new_unchecked(raw.to_owned()))
}
