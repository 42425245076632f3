// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised by the error-manager itself.
//!
//! These signal misuse (a wrong shape passed in) or a lookup miss. Expected,
//! recoverable failures of application code travel in a result wrapper
//! instead and never become a [`ManagerError`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::builtin::ManagerErrors;
use crate::group::ErrorGroup;
use crate::object::ErrorObject;

/// Broad family a [`ManagerError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was omitted while building a descriptor.
    Construction,
    /// A value of the wrong shape was handed to a registry or wrapper.
    Validation,
    /// A code was not present in a registry.
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Construction => "construction",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
        };
        f.write_str(s)
    }
}

/// Error type of every fallible error-manager operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ManagerError {
    /// A required descriptor field was not provided.
    #[error("error descriptor is missing required field `{field}`")]
    MissingField {
        /// Name of the omitted field.
        field: &'static str,
    },

    /// The value is not an error descriptor (nor derived from one).
    #[error("provided error is not of type ErrorDescriptor")]
    NotAnError,

    /// The value is not a named error group.
    #[error("provided errors are not a named error group")]
    NotAnErrorGroup,

    /// A code was registered again with a different description while the
    /// registry rejects duplicates.
    #[error("error code `{code}` is already registered as {existing:?}, refusing {rejected:?}")]
    DuplicateCode {
        /// The colliding code.
        code: String,
        /// Description already in the registry.
        existing: String,
        /// Description that was refused.
        rejected: String,
    },

    /// The code is not registered.
    #[error("{error}: `{code}`")]
    CodeNotFound {
        /// The code that was looked up.
        code: String,
        /// Report of the built-in "could not find error code" descriptor.
        error: ErrorObject,
    },
}

impl ManagerError {
    /// Lookup miss for `code`, carrying the built-in sentinel descriptor.
    pub fn code_not_found(code: impl Into<String>) -> Self {
        Self::CodeNotFound {
            code: code.into(),
            error: ErrorObject::from(ManagerErrors::CouldNotFindErrorCode.value()),
        }
    }

    /// The [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::Construction,
            Self::NotAnError | Self::NotAnErrorGroup | Self::DuplicateCode { .. } => {
                ErrorKind::Validation
            }
            Self::CodeNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
