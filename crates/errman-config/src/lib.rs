// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading and validation for the error-manager registries.
//!
//! [`RegistryConfig`] controls how the global registry treats a code that is
//! registered twice and whether lookups are traced. It can be parsed from
//! TOML, loaded from a file and overridden from the environment.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The content could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// An override carried a value that is not allowed.
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory issues that do not prevent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Duplicate codes replace the earlier description without any trace.
    SilentOverwrite,
    /// Every lookup emits a trace event.
    LookupTracing,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SilentOverwrite => f.write_str(
                "duplicate_policy 'overwrite' replaces colliding codes silently; consider 'warn'",
            ),
            Self::LookupTracing => f.write_str("trace_lookups emits an event on every lookup"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// What the global registry does when a code is registered again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last registration wins.
    #[default]
    Overwrite,
    /// Last registration wins and a warning is logged.
    Warn,
    /// A different description for a known code is refused.
    Reject,
}

impl DuplicatePolicy {
    /// Config-file spelling of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Warn => "warn",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::ValidationError {
                reasons: vec![format!("unknown duplicate_policy '{other}'")],
            }),
        }
    }
}

/// Runtime settings of the global registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RegistryConfig {
    /// Behaviour on a repeated code.
    pub duplicate_policy: DuplicatePolicy,

    /// Emit a `trace` event for every description lookup.
    pub trace_lookups: bool,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Environment variable overriding [`RegistryConfig::duplicate_policy`].
pub const ENV_DUPLICATE_POLICY: &str = "ERRMAN_DUPLICATE_POLICY";

/// Environment variable overriding [`RegistryConfig::trace_lookups`].
pub const ENV_TRACE_LOOKUPS: &str = "ERRMAN_TRACE_LOOKUPS";

/// Load a [`RegistryConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`RegistryConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<RegistryConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => RegistryConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML string into a [`RegistryConfig`].
pub fn parse_toml(content: &str) -> Result<RegistryConfig, ConfigError> {
    toml::from_str::<RegistryConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Apply [`ENV_DUPLICATE_POLICY`] and [`ENV_TRACE_LOOKUPS`] from the process
/// environment.
pub fn apply_env_overrides(config: &mut RegistryConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`, which maps a variable name to its
/// value.
///
/// All bad values are reported together in one
/// [`ConfigError::ValidationError`]; `config` is left untouched in that case.
pub fn apply_overrides(
    config: &mut RegistryConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let mut reasons = Vec::new();
    let mut next = config.clone();

    if let Some(val) = lookup(ENV_DUPLICATE_POLICY) {
        match val.parse::<DuplicatePolicy>() {
            Ok(policy) => next.duplicate_policy = policy,
            Err(ConfigError::ValidationError { reasons: r }) => reasons.extend(r),
            Err(other) => reasons.push(other.to_string()),
        }
    }
    if let Some(val) = lookup(ENV_TRACE_LOOKUPS) {
        match parse_flag(&val) {
            Some(flag) => next.trace_lookups = flag,
            None => reasons.push(format!("invalid {ENV_TRACE_LOOKUPS} value '{val}'")),
        }
    }

    if reasons.is_empty() {
        *config = next;
        Ok(())
    } else {
        Err(ConfigError::ValidationError { reasons })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Advisory warnings for `config`.
pub fn validate_config(config: &RegistryConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    if config.duplicate_policy == DuplicatePolicy::Overwrite {
        warnings.push(ConfigWarning::SilentOverwrite);
    }
    if config.trace_lookups {
        warnings.push(ConfigWarning::LookupTracing);
    }
    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_overwrites_without_tracing() {
        let cfg = RegistryConfig::default();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Overwrite);
        assert!(!cfg.trace_lookups);
    }

    #[test]
    fn empty_string_toml_parses_to_defaults() {
        assert_eq!(parse_toml("").unwrap(), RegistryConfig::default());
    }

    #[test]
    fn parse_valid_toml_string() {
        let cfg = parse_toml(
            r#"
            duplicate_policy = "reject"
            trace_lookups = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Reject);
        assert!(cfg.trace_lookups);
    }

    #[test]
    fn parse_unknown_policy_gives_parse_error() {
        let err = parse_toml(r#"duplicate_policy = "ignore""#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn parse_wrong_types_gives_parse_error() {
        let err = parse_toml("trace_lookups = 42").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = RegistryConfig {
            duplicate_policy: DuplicatePolicy::Warn,
            trace_lookups: true,
        };
        let s = toml::to_string(&cfg).unwrap();
        assert_eq!(parse_toml(&s).unwrap(), cfg);
    }

    #[test]
    fn policy_from_str_is_case_insensitive() {
        assert_eq!(
            " WARN ".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::Warn
        );
        assert!("sometimes".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn overrides_apply() {
        let mut cfg = RegistryConfig::default();
        apply_overrides(
            &mut cfg,
            env(&[
                (ENV_DUPLICATE_POLICY, "reject"),
                (ENV_TRACE_LOOKUPS, "yes"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Reject);
        assert!(cfg.trace_lookups);
    }

    #[test]
    fn bad_overrides_are_collected_and_leave_config_untouched() {
        let mut cfg = RegistryConfig::default();
        let err = apply_overrides(
            &mut cfg,
            env(&[
                (ENV_DUPLICATE_POLICY, "ignore"),
                (ENV_TRACE_LOOKUPS, "maybe"),
            ]),
        )
        .unwrap_err();
        match err {
            ConfigError::ValidationError { reasons } => assert_eq!(reasons.len(), 2),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        assert_eq!(cfg, RegistryConfig::default());
    }

    #[test]
    fn no_overrides_is_noop() {
        let mut cfg = RegistryConfig {
            duplicate_policy: DuplicatePolicy::Warn,
            trace_lookups: false,
        };
        apply_overrides(&mut cfg, env(&[])).unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Warn);
    }

    #[test]
    fn load_config_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"duplicate_policy = "warn""#).unwrap();
        let cfg = load_config(Some(f.path())).unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Warn);
    }

    #[test]
    fn load_missing_file_gives_file_not_found() {
        let err = load_config(Some(Path::new("/nonexistent/errman.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn validation_warns_on_overwrite_and_tracing() {
        let cfg = RegistryConfig {
            duplicate_policy: DuplicatePolicy::Overwrite,
            trace_lookups: true,
        };
        assert_eq!(
            validate_config(&cfg),
            [ConfigWarning::SilentOverwrite, ConfigWarning::LookupTracing]
        );
        let quiet = RegistryConfig {
            duplicate_policy: DuplicatePolicy::Reject,
            trace_lookups: false,
        };
        assert!(validate_config(&quiet).is_empty());
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "/x.toml".into(),
        };
        assert_eq!(err.to_string(), "config file not found: /x.toml");
    }

    #[test]
    fn schema_lists_both_fields() {
        let schema = schemars::schema_for!(RegistryConfig);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("duplicate_policy"));
        assert!(json.contains("trace_lookups"));
    }
}
