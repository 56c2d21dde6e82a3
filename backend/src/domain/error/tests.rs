//! Backend error classification.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::validation::parse_classify_request;

#[rstest]
#[case(StandardsBackendError::validation("bad grade"), FailureKind::BackendValidation)]
#[case(StandardsBackendError::auth("Invalid API key"), FailureKind::BackendAuth)]
#[case(StandardsBackendError::network("connection refused"), FailureKind::BackendNetwork)]
#[case(StandardsBackendError::backend("graph offline"), FailureKind::Backend)]
#[case(StandardsBackendError::unexpected("invalid JSON"), FailureKind::Unknown)]
fn backend_errors_map_to_kinds(#[case] err: StandardsBackendError, #[case] kind: FailureKind) {
    let message = err.message().to_owned();
    let failure = ApiFailure::from(err);

    assert_eq!(failure.kind(), kind);
    assert!(failure.to_string().ends_with(&message));
}

#[test]
fn validation_errors_become_schema_failures() {
    let err = parse_classify_request(&json!({})).expect_err("latex missing");
    let failure = ApiFailure::from(err.clone());

    assert_eq!(failure.kind(), FailureKind::SchemaValidation);
    assert_eq!(failure, ApiFailure::SchemaValidation(err));
}

#[test]
fn unknown_keeps_cause_for_logging() {
    let failure = ApiFailure::unknown("Database connection failed");
    assert_eq!(failure.kind(), FailureKind::Unknown);
    assert_eq!(failure.to_string(), "unexpected failure: Database connection failed");
}
