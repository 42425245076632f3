// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz ErrorDescriptor deserialization and the operations built on it.
//!
//! Verifies:
//! 1. Deserializing arbitrary strings as ErrorDescriptor never panics.
//! 2. Display and the two-field error object never panic.
//! 3. add_error_data keeps code and description.
//! 4. Serialized descriptors parse back to the same value.
#![no_main]
use errman_core::{ErrorDescriptor, add_error_data, error_object, is_error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    // --- Property 1: JSON deserialization never panics ---
    let error = match serde_json::from_str::<ErrorDescriptor>(s) {
        Ok(e) => e,
        Err(_) => return,
    };
    assert!(is_error(&error));

    // --- Property 2: Display and error_object never panic ---
    let _ = format!("{error}");
    let object = error_object(&error);
    assert_eq!(object.error, error.code());

    // --- Property 3: add_error_data keeps identity ---
    let enriched = add_error_data(&error, error.error_data().clone());
    assert_eq!(enriched, error);

    // --- Property 4: JSON round-trip ---
    let json = serde_json::to_string(&error).expect("descriptor serializes");
    let rt: ErrorDescriptor = serde_json::from_str(&json).expect("own output parses");
    assert_eq!(rt, error, "JSON round-trip must be lossless");
});
