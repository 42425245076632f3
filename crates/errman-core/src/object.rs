// SPDX-License-Identifier: MIT OR Apache-2.0
//! Two-field report shape of an error: `{"error": <code>, "description": ...}`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::descriptor::ErrorDescriptor;

/// Serialisable `{ "error", "description" }` pair built from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ErrorObject {
    /// The error code.
    pub error: String,
    /// The human-readable description.
    pub description: String,
}

impl From<&ErrorDescriptor> for ErrorObject {
    fn from(error: &ErrorDescriptor) -> Self {
        Self {
            error: error.code().to_owned(),
            description: error.description().to_owned(),
        }
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error, self.description)
    }
}

/// Convert `error` into its [`ErrorObject`]. Pure; error data is dropped.
pub fn error_object(error: &ErrorDescriptor) -> ErrorObject {
    ErrorObject::from(error)
}
