// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for descriptors, registries and result wrappers.

use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

use error_manager::{
    ErrorData, ErrorDescriptor, GlobalRegistry, ManagerError, ResultWrapper, add_error_data,
    error_object, is_error,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn fast_config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

fn arb_code() -> impl Strategy<Value = String> {
    "[A-Z]{2,6}_[0-9]{3,5}"
}

fn arb_descriptor() -> impl Strategy<Value = ErrorDescriptor> {
    (arb_code(), ".{0,40}").prop_map(|(code, desc)| ErrorDescriptor::new(code, desc))
}

fn arb_error_data() -> impl Strategy<Value = ErrorData> {
    proptest::collection::btree_map(
        "[a-z]{1,8}",
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[a-z ]{0,12}".prop_map(Value::from),
        ],
        0..5,
    )
}

// ── Descriptors ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn add_error_data_keeps_identity(error in arb_descriptor(), data in arb_error_data()) {
        let enriched = add_error_data(&error, data.clone());
        prop_assert_eq!(enriched.code(), error.code());
        prop_assert_eq!(enriched.description(), error.description());
        prop_assert_eq!(enriched.error_data(), &data);
        prop_assert!(error.error_data().is_empty());
    }

    #[test]
    fn error_object_has_exactly_two_keys(error in arb_descriptor(), data in arb_error_data()) {
        let value = serde_json::to_value(error_object(&add_error_data(&error, data))).unwrap();
        let object = value.as_object().unwrap();
        prop_assert_eq!(object.len(), 2);
        prop_assert_eq!(object["error"].as_str(), Some(error.code()));
        prop_assert_eq!(object["description"].as_str(), Some(error.description()));
    }

    #[test]
    fn is_error_never_panics_on_plain_values(n in any::<i64>(), s in ".*") {
        prop_assert!(!is_error(&n));
        prop_assert!(!is_error(&s));
        prop_assert!(!is_error(&BTreeMap::<String, String>::new()));
    }

    #[test]
    fn descriptor_json_roundtrip(error in arb_descriptor(), data in arb_error_data()) {
        let error = add_error_data(&error, data);
        let json = serde_json::to_string(&error).unwrap();
        let back: ErrorDescriptor = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, error);
    }
}

// ── Registry ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn registered_codes_resolve(
        code in "PROP_[0-9]{6}",
        desc in "[a-zA-Z ]{1,30}",
    ) {
        let registry = GlobalRegistry::global();
        let error = ErrorDescriptor::new(code.clone(), desc.clone());
        registry.register_error(&code, &error).unwrap();
        prop_assert_eq!(registry.error_description(&code).unwrap(), desc);
        prop_assert_eq!(registry.member(&code), Some(error));
    }

    #[test]
    fn unregistered_codes_report_not_found(code in "MISSING_[a-z]{8}") {
        let err = GlobalRegistry::global().error_description(&code).unwrap_err();
        prop_assert_eq!(err, ManagerError::code_not_found(code));
    }
}

// ── Result wrapper ──────────────────────────────────────────────────────

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn validity_is_monotone(ops in proptest::collection::vec((arb_descriptor(), any::<bool>()), 0..12)) {
        let mut wrapper = ResultWrapper::<()>::new();
        let mut expected_valid = true;
        for (error, keep) in &ops {
            wrapper.add_error_with_status(error.clone(), *keep);
            expected_valid &= *keep;
            prop_assert_eq!(wrapper.is_valid(), expected_valid);
        }
        let added: Vec<_> = ops.into_iter().map(|(e, _)| e).collect();
        prop_assert_eq!(wrapper.errors(), added.as_slice());
    }
}
