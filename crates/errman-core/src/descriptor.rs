// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`ErrorDescriptor`] value type and the helpers that recognise it.
//!
//! A descriptor is immutable once built. Attaching per-occurrence context
//! always produces a new value; the original constant is never touched.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, LazyLock, RwLock};

use crate::error::ManagerError;

/// Per-occurrence context attached to an [`ErrorDescriptor`].
pub type ErrorData = BTreeMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// ErrorDescriptor
// ---------------------------------------------------------------------------

/// Immutable description of a single error.
///
/// Carries a stable `code`, a human-readable `description` and optional
/// structured `error_data`. Fields are private so a descriptor cannot be
/// changed in place; use [`ErrorDescriptor::with_error_data`] or
/// [`add_error_data`] to derive a copy with different context.
///
/// ```
/// use errman_core::ErrorDescriptor;
///
/// static NOT_FOUND: ErrorDescriptor = ErrorDescriptor::constant("NF_001", "Not found");
///
/// let occurrence = NOT_FOUND.with_data("path", "/tmp/missing");
/// assert_eq!(occurrence.code(), "NF_001");
/// assert!(NOT_FOUND.error_data().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorDescriptor {
    code: Cow<'static, str>,
    description: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    error_data: ErrorData,
}

impl ErrorDescriptor {
    /// Build a descriptor usable in `static` and `const` items.
    pub const fn constant(code: &'static str, description: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            description: Cow::Borrowed(description),
            error_data: BTreeMap::new(),
        }
    }

    /// Create a descriptor with empty error data.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            error_data: ErrorData::new(),
        }
    }

    /// Start a builder that reports omitted required fields.
    pub fn builder() -> ErrorDescriptorBuilder {
        ErrorDescriptorBuilder::default()
    }

    /// Unique identifier of this error.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Context attached to this occurrence.
    pub fn error_data(&self) -> &ErrorData {
        &self.error_data
    }

    /// Copy of `self` whose error data is replaced by `error_data`.
    #[must_use]
    pub fn with_error_data(&self, error_data: ErrorData) -> Self {
        Self {
            code: self.code.clone(),
            description: self.description.clone(),
            error_data,
        }
    }

    /// Copy of `self` with one extra context entry.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    #[must_use]
    pub fn with_data(&self, key: impl Into<String>, value: impl Serialize) -> Self {
        let mut copy = self.clone();
        if let Ok(v) = serde_json::to_value(value) {
            copy.error_data.insert(key.into(), v);
        }
        copy
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if !self.error_data.is_empty() {
            if let Ok(data) = serde_json::to_string(&self.error_data) {
                write!(f, " {data}")?;
            }
        }
        Ok(())
    }
}

impl From<&ErrorDescriptor> for ErrorDescriptor {
    fn from(error: &ErrorDescriptor) -> Self {
        error.clone()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`ErrorDescriptor`] that fails on missing required fields.
#[derive(Debug, Clone, Default)]
pub struct ErrorDescriptorBuilder {
    code: Option<Cow<'static, str>>,
    description: Option<Cow<'static, str>>,
    error_data: ErrorData,
}

impl ErrorDescriptorBuilder {
    /// Set the error code.
    #[must_use]
    pub fn code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the error data.
    #[must_use]
    pub fn error_data(mut self, error_data: ErrorData) -> Self {
        self.error_data = error_data;
        self
    }

    /// Finish the descriptor.
    ///
    /// # Errors
    ///
    /// [`ManagerError::MissingField`] when `code` or `description` was never
    /// set.
    pub fn build(self) -> Result<ErrorDescriptor, ManagerError> {
        let code = self
            .code
            .ok_or(ManagerError::MissingField { field: "code" })?;
        let description = self
            .description
            .ok_or(ManagerError::MissingField {
                field: "description",
            })?;
        Ok(ErrorDescriptor {
            code,
            description,
            error_data: self.error_data,
        })
    }
}

// ---------------------------------------------------------------------------
// Derived descriptors
// ---------------------------------------------------------------------------

/// A type layered on top of [`ErrorDescriptor`] that must still be treated
/// as one.
///
/// Derived values are recognised by [`is_error`] when they reach it as
/// `Box<dyn DerivedDescriptor>`, `Arc<dyn DerivedDescriptor>` or
/// `&'static dyn DerivedDescriptor`. A concrete value is recognised once its
/// type was announced with [`register_derived`].
pub trait DerivedDescriptor: Any + Send + Sync + fmt::Debug {
    /// The underlying base descriptor.
    fn base(&self) -> &ErrorDescriptor;
}

type Downcaster = fn(&dyn Any) -> Option<&ErrorDescriptor>;

static DERIVED: LazyLock<RwLock<HashMap<TypeId, Downcaster>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn downcast_derived<T: DerivedDescriptor>(value: &dyn Any) -> Option<&ErrorDescriptor> {
    value.downcast_ref::<T>().map(T::base)
}

fn downcast_derived_ref<T: DerivedDescriptor>(value: &dyn Any) -> Option<&ErrorDescriptor> {
    value.downcast_ref::<&'static T>().map(|derived| derived.base())
}

/// Make concrete values of `T` (and `&'static T`) recognisable by
/// [`is_error`] and [`as_error`].
///
/// Registering the same type again is a no-op.
pub fn register_derived<T: DerivedDescriptor>() {
    let mut derived = DERIVED.write().expect("derived descriptor table poisoned");
    derived.insert(TypeId::of::<T>(), downcast_derived::<T>);
    derived.insert(TypeId::of::<&'static T>(), downcast_derived_ref::<T>);
}

/// View `value` as an [`ErrorDescriptor`] if it is one or derives from one.
pub fn as_error(value: &dyn Any) -> Option<&ErrorDescriptor> {
    if let Some(error) = value.downcast_ref::<ErrorDescriptor>() {
        return Some(error);
    }
    if let Some(error) = value.downcast_ref::<&'static ErrorDescriptor>() {
        return Some(*error);
    }
    if let Some(error) = value.downcast_ref::<Box<ErrorDescriptor>>() {
        return Some(&**error);
    }
    if let Some(error) = value.downcast_ref::<Arc<ErrorDescriptor>>() {
        return Some(&**error);
    }
    if let Some(error) = value.downcast_ref::<Rc<ErrorDescriptor>>() {
        return Some(&**error);
    }
    if let Some(derived) = value.downcast_ref::<Box<dyn DerivedDescriptor>>() {
        return Some(derived.base());
    }
    if let Some(derived) = value.downcast_ref::<Arc<dyn DerivedDescriptor>>() {
        return Some(derived.base());
    }
    if let Some(derived) = value.downcast_ref::<&'static dyn DerivedDescriptor>() {
        return Some(derived.base());
    }
    let downcast = DERIVED
        .read()
        .expect("derived descriptor table poisoned")
        .get(&Any::type_id(value))
        .copied();
    downcast.and_then(|f| f(value))
}

/// Whether `value` is an [`ErrorDescriptor`] or a derived descriptor.
///
/// Never panics, whatever the runtime type of `value`.
pub fn is_error(value: &dyn Any) -> bool {
    as_error(value).is_some()
}

/// New descriptor with the code and description of `error` and `error_data`
/// as its context.
///
/// The result is always a plain [`ErrorDescriptor`], even when `error` was
/// reached through a derived type.
pub fn add_error_data(error: &ErrorDescriptor, error_data: ErrorData) -> ErrorDescriptor {
    error.with_error_data(error_data)
}
