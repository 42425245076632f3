// SPDX-License-Identifier: MIT OR Apache-2.0
//! Result wrapper for expected, recoverable failures.
//!
//! Instead of returning early with an error, an operation hands back a
//! [`ResultWrapper`] holding an optional value, a validity flag and every
//! [`ErrorDescriptor`] collected on the way. Callers inspect
//! [`ResultWrapper::is_valid`] or [`ResultWrapper::errors`].
//!
//! ```
//! use errman_core::ErrorDescriptor;
//! use errman_result::ResultWrapper;
//!
//! static EMPTY_NAME: ErrorDescriptor = ErrorDescriptor::constant("USR_001", "Name is empty");
//!
//! fn parse_name(raw: &str) -> ResultWrapper<String> {
//!     if raw.trim().is_empty() {
//!         return ResultWrapper::from_error(&EMPTY_NAME);
//!     }
//!     ResultWrapper::with_result(raw.trim().to_owned())
//! }
//!
//! assert!(parse_name(" ada ").is_valid());
//! assert_eq!(parse_name("  ").errors(), [EMPTY_NAME.clone()]);
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs)]

use errman_core::{ErrorDescriptor, ManagerError, as_error};
use serde::Serialize;
use std::any::Any;

/// Value of type `T` (if any), a validity flag and the errors collected so
/// far, in insertion order.
///
/// `is_valid` starts `true` and only [`ResultWrapper::add_error`] can turn
/// it `false`; no public operation turns it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultWrapper<T> {
    /// The produced value, if any.
    pub result: Option<T>,
    is_valid: bool,
    errors: Vec<ErrorDescriptor>,
}

impl<T> Default for ResultWrapper<T> {
    fn default() -> Self {
        Self {
            result: None,
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

impl<T> ResultWrapper<T> {
    /// Valid wrapper without a value or errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Valid wrapper holding `result`.
    #[must_use]
    pub fn with_result(result: T) -> Self {
        Self {
            result: Some(result),
            ..Self::default()
        }
    }

    /// Invalid wrapper holding the single error `error`.
    ///
    /// Accepts anything [`errman_core::is_error`] recognises, including
    /// derived descriptors; the stored value is the base descriptor.
    ///
    /// # Errors
    ///
    /// [`ManagerError::NotAnError`] if `error` is not a descriptor.
    pub fn with_error(error: &dyn Any) -> Result<Self, ManagerError> {
        let error = as_error(error).ok_or(ManagerError::NotAnError)?;
        Ok(Self::from_error(error))
    }

    /// Invalid wrapper holding the single error `error`.
    #[must_use]
    pub fn from_error(error: impl Into<ErrorDescriptor>) -> Self {
        let mut wrapper = Self::default();
        wrapper.add_error(error);
        wrapper
    }

    /// Whether no error has invalidated this result.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Errors in the order they were added.
    pub fn errors(&self) -> &[ErrorDescriptor] {
        &self.errors
    }

    /// Whether any error was added, invalidating or not.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Append `error` and mark the result invalid.
    pub fn add_error(&mut self, error: impl Into<ErrorDescriptor>) {
        self.add_error_with_status(error, false);
    }

    /// Append `error`; mark the result invalid unless `keep_current_status`.
    ///
    /// Keeping the status never re-validates an already invalid result.
    pub fn add_error_with_status(
        &mut self,
        error: impl Into<ErrorDescriptor>,
        keep_current_status: bool,
    ) {
        self.errors.push(error.into());
        if !keep_current_status {
            self.is_valid = false;
        }
    }

    /// `Ok(result)` when valid, otherwise every collected error.
    pub fn into_result(self) -> Result<Option<T>, Vec<ErrorDescriptor>> {
        if self.is_valid {
            Ok(self.result)
        } else {
            Err(self.errors)
        }
    }

    /// Transform the value, keeping validity and errors.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultWrapper<U> {
        ResultWrapper {
            result: self.result.map(f),
            is_valid: self.is_valid,
            errors: self.errors,
        }
    }
}
