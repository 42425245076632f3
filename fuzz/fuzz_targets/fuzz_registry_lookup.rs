// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz global registry registration and lookup with arbitrary codes.
//!
//! Verifies:
//! 1. Registering any code never panics.
//! 2. A registered code always resolves to its latest description.
//! 3. A miss always carries the built-in not-found report.
#![no_main]
use errman_core::{ErrorDescriptor, ManagerError};
use errman_registry::GlobalRegistry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let (code, description) = s.split_once('\n').unwrap_or((&*s, ""));
    let registry = GlobalRegistry::global();

    // --- Property 3: misses carry the sentinel ---
    if !registry.contains(code) {
        match registry.error_description(code) {
            Err(ManagerError::CodeNotFound { error, .. }) => {
                assert_eq!(error.error, "ER_GETERROR_00001");
            }
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    // --- Property 1 & 2: registration then lookup ---
    let error = ErrorDescriptor::new(code.to_owned(), description.to_owned());
    registry.register_error(code, &error).expect("default policy accepts");
    assert_eq!(registry.error_description(code).unwrap(), description);
});
