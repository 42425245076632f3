// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error-type hygiene: Display, Error trait bounds, kinds and anyhow interop.

use std::error::Error;

use error_manager::{ConfigError, ErrorDescriptor, ErrorKind, GlobalRegistry, ManagerError};

// ── Helpers ──────────────────────────────────────────────────────────────

fn assert_send_sync_static<T: Send + Sync + 'static>() {}

fn check_display_debug(err: &dyn Error) {
    assert!(!err.to_string().is_empty(), "Display must be non-empty");
    assert!(!format!("{err:?}").is_empty(), "Debug must be non-empty");
}

fn check_anyhow_roundtrip<E: Error + Send + Sync + 'static + Clone>(err: E) {
    let display = err.to_string();
    let anyhow_err = anyhow::Error::new(err.clone());
    assert_eq!(anyhow_err.to_string(), display);
    let downcasted = anyhow_err
        .downcast_ref::<E>()
        .expect("downcast should succeed");
    assert_eq!(downcasted.to_string(), display);
}

fn all_manager_errors() -> Vec<ManagerError> {
    vec![
        ManagerError::MissingField { field: "code" },
        ManagerError::NotAnError,
        ManagerError::NotAnErrorGroup,
        ManagerError::DuplicateCode {
            code: "X".into(),
            existing: "a".into(),
            rejected: "b".into(),
        },
        ManagerError::code_not_found("missing"),
    ]
}

// =========================================================================
// ManagerError
// =========================================================================

#[test]
fn manager_error_bounds() {
    assert_send_sync_static::<ManagerError>();
    assert_send_sync_static::<ErrorDescriptor>();
    assert_send_sync_static::<GlobalRegistry>();
}

#[test]
fn manager_error_display_and_anyhow() {
    for err in all_manager_errors() {
        check_display_debug(&err);
        check_anyhow_roundtrip(err);
    }
}

#[test]
fn manager_error_kinds() {
    let kinds: Vec<_> = all_manager_errors().iter().map(ManagerError::kind).collect();
    assert_eq!(
        kinds,
        [
            ErrorKind::Construction,
            ErrorKind::Validation,
            ErrorKind::Validation,
            ErrorKind::Validation,
            ErrorKind::NotFound,
        ]
    );
}

#[test]
fn lookup_failure_propagates_through_anyhow() {
    fn describe(code: &str) -> anyhow::Result<String> {
        Ok(GlobalRegistry::global().error_description(code)?)
    }

    let err = describe("ANYHOW_MISSING").unwrap_err();
    let manager = err.downcast_ref::<ManagerError>().unwrap();
    assert_eq!(manager.kind(), ErrorKind::NotFound);
    assert!(err.to_string().starts_with("[ER_GETERROR_00001]"));
}

#[test]
fn builder_reports_missing_field() {
    let err = ErrorDescriptor::builder().code("ONLY_CODE").build().unwrap_err();
    assert_eq!(err, ManagerError::MissingField { field: "description" });
    assert_eq!(err.kind(), ErrorKind::Construction);
}

// =========================================================================
// ConfigError
// =========================================================================

#[test]
fn config_error_display_and_anyhow() {
    let errors = vec![
        ConfigError::FileNotFound {
            path: "/nope.toml".into(),
        },
        ConfigError::ParseError {
            reason: "expected `=`".into(),
        },
        ConfigError::ValidationError {
            reasons: vec!["bad".into()],
        },
    ];
    assert_send_sync_static::<ConfigError>();
    for err in errors {
        check_display_debug(&err);
        check_anyhow_roundtrip(err);
    }
}
