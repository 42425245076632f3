// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz RegistryConfig parsing, environment overrides and advisories.
//!
//! The first input line is a TOML document, the second the policy override
//! and the third the tracing override. Verifies:
//! 1. `parse_toml` never panics and accepts its own TOML output.
//! 2. `SilentOverwrite` is reported exactly for the `overwrite` policy and
//!    `LookupTracing` exactly when lookups are traced.
//! 3. A rejected override leaves the config untouched; an accepted one
//!    installs a policy whose spelling parses back to itself.
#![no_main]
use errman_config::{
    ConfigWarning, DuplicatePolicy, ENV_DUPLICATE_POLICY, ENV_TRACE_LOOKUPS, apply_overrides,
    parse_toml, validate_config,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (doc, rest) = s.split_once('\n').unwrap_or((s, ""));
    let (policy_value, flag_value) = rest.split_once('\n').unwrap_or((rest, "off"));

    // --- Property 1: parsing never panics, own output parses back ---
    let config = match parse_toml(doc) {
        Ok(c) => c,
        Err(e) => {
            let _ = format!("{e}");
            return;
        }
    };
    let rendered = toml::to_string(&config).expect("config serializes");
    assert_eq!(parse_toml(&rendered).expect("own output parses"), config);

    // --- Property 2: advisories follow the fields ---
    let warnings = validate_config(&config);
    assert_eq!(
        warnings.contains(&ConfigWarning::SilentOverwrite),
        config.duplicate_policy == DuplicatePolicy::Overwrite
    );
    assert_eq!(
        warnings.contains(&ConfigWarning::LookupTracing),
        config.trace_lookups
    );

    // --- Property 3: overrides are all-or-nothing ---
    let mut overridden = config.clone();
    let outcome = apply_overrides(&mut overridden, |key| match key {
        ENV_DUPLICATE_POLICY => Some(policy_value.to_owned()),
        ENV_TRACE_LOOKUPS => Some(flag_value.to_owned()),
        _ => None,
    });
    match outcome {
        Ok(()) => {
            let policy = overridden.duplicate_policy;
            assert_eq!(policy.as_str().parse::<DuplicatePolicy>(), Ok(policy));
        }
        Err(_) => assert_eq!(overridden, config),
    }
});
