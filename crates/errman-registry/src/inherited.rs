// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry assembled by composition instead of runtime registration.
//!
//! Plain source types declare descriptor constants with
//! [`error_attributes!`](crate::error_attributes). A combined type built with
//! [`inherited_errors!`](crate::inherited_errors) exposes the attributes of
//! all its sources and gets [`InheritedRegistry`] lookups backed by a lazily
//! filled, per-type [`ErrorCache`].
//!
//! The scan keeps only attributes whose value is exactly an
//! [`ErrorDescriptor`]. Derived descriptor types are skipped, unlike
//! [`errman_core::is_error`], which accepts them.

use errman_core::{ErrorDescriptor, ErrorObject, ManagerError};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// A named value declared on a type.
#[derive(Clone, Copy)]
pub struct Attribute {
    name: &'static str,
    value: &'static (dyn Any + Send + Sync),
}

impl Attribute {
    /// Attribute `name` holding `value`.
    pub fn new(name: &'static str, value: &'static (dyn Any + Send + Sync)) -> Self {
        Self { name, value }
    }

    /// Attribute name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attribute value.
    pub fn value(&self) -> &'static (dyn Any + Send + Sync) {
        self.value
    }

    /// The value, if its runtime type is exactly [`ErrorDescriptor`].
    pub fn as_exact_error(&self) -> Option<&'static ErrorDescriptor> {
        self.value.downcast_ref::<ErrorDescriptor>()
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("error", &self.as_exact_error().map(ErrorDescriptor::code))
            .finish()
    }
}

/// Types that expose named attributes, own and inherited.
pub trait ErrorAttributes {
    /// Every attribute reachable on the type.
    fn attributes() -> Vec<Attribute>;
}

// ---------------------------------------------------------------------------
// ErrorCache
// ---------------------------------------------------------------------------

/// Code-to-description cache of one combined type.
#[derive(Default)]
pub struct ErrorCache {
    entries: RwLock<BTreeMap<String, String>>,
}

impl ErrorCache {
    /// Empty cache, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Cached description of `code`.
    pub fn get(&self, code: &str) -> Option<String> {
        self.read().get(code).cloned()
    }

    /// Insert `entries`, keeping everything already cached.
    pub fn merge(&self, entries: impl IntoIterator<Item = (String, String)>) {
        self.write().extend(entries);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of cached codes.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.entries.read().expect("error cache poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.entries.write().expect("error cache poisoned")
    }
}

impl fmt::Debug for ErrorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCache")
            .field("codes", &self.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// InheritedRegistry
// ---------------------------------------------------------------------------

/// Code lookups over the descriptor attributes of a combined type.
///
/// ```
/// use errman_registry::{InheritedRegistry, error_attributes, inherited_errors};
///
/// error_attributes! {
///     pub struct AuthErrors {
///         BAD_TOKEN = ("AUTH_001", "Bad token");
///     }
/// }
///
/// error_attributes! {
///     pub struct QuotaErrors {
///         EXHAUSTED = ("QUOTA_001", "Quota exhausted");
///     }
/// }
///
/// inherited_errors! {
///     pub struct ApiErrors: AuthErrors, QuotaErrors;
/// }
///
/// assert_eq!(AuthErrors::BAD_TOKEN.code(), "AUTH_001");
/// assert_eq!(ApiErrors::error_description("QUOTA_001").unwrap(), "Quota exhausted");
/// ```
pub trait InheritedRegistry: ErrorAttributes {
    /// Cache owned by this combined type.
    fn cache() -> &'static ErrorCache;

    /// Description of `code`, rescanning the attributes once on a miss.
    ///
    /// # Errors
    ///
    /// [`ManagerError::CodeNotFound`] if `code` is still unknown after the
    /// rescan.
    fn error_description(code: &str) -> Result<String, ManagerError> {
        if let Some(description) = Self::cache().get(code) {
            return Ok(description);
        }
        Self::regenerate_errors_list();
        Self::cache().get(code).ok_or_else(|| {
            debug!(
                target: "errman",
                registry = std::any::type_name::<Self>(),
                code,
                "error code not found after rescan"
            );
            ManagerError::code_not_found(code)
        })
    }

    /// Rescan every attribute and merge exact descriptors into the cache.
    ///
    /// Existing cache entries are kept.
    fn regenerate_errors_list() {
        let found: Vec<(String, String)> = Self::attributes()
            .iter()
            .filter_map(Attribute::as_exact_error)
            .map(|e| (e.code().to_owned(), e.description().to_owned()))
            .collect();
        trace!(
            target: "errman",
            registry = std::any::type_name::<Self>(),
            found = found.len(),
            "regenerated inherited error list"
        );
        Self::cache().merge(found);
    }

    /// `{ "error": <code>, "description": <description> }` for `error`.
    fn error_object(error: &ErrorDescriptor) -> ErrorObject {
        ErrorObject::from(error)
    }

    /// Empty the cache; the next lookup rescans.
    fn reset_cache() {
        Self::cache().clear();
    }

    /// Number of cached codes.
    fn cached_len() -> usize {
        Self::cache().len()
    }
}

// ---------------------------------------------------------------------------
// Declaration macros
// ---------------------------------------------------------------------------

/// Declare a plain type carrying descriptor constants.
///
/// Each constant becomes an associated `const` (so it can be named
/// statically) and an [`Attribute`] of the type.
#[macro_export]
macro_rules! error_attributes {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$cmeta:meta])*
                $const_name:ident = ($code:expr, $desc:expr);
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $name {
            $(
                $(#[$cmeta])*
                pub const $const_name: $crate::ErrorDescriptor =
                    $crate::ErrorDescriptor::constant($code, $desc);
            )*
        }

        impl $crate::ErrorAttributes for $name {
            fn attributes() -> ::std::vec::Vec<$crate::Attribute> {
                ::std::vec![
                    $(
                        $crate::Attribute::new(stringify!($const_name), {
                            static VALUE: $crate::ErrorDescriptor = $name::$const_name;
                            &VALUE
                        }),
                    )*
                ]
            }
        }
    };
}

/// Declare a combined type whose lookups cover every listed source.
///
/// Sources are any [`ErrorAttributes`] types, including other combined
/// types.
#[macro_export]
macro_rules! inherited_errors {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $($source:ty),+ ;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::ErrorAttributes for $name {
            fn attributes() -> ::std::vec::Vec<$crate::Attribute> {
                let mut attributes = ::std::vec::Vec::new();
                $(
                    attributes.extend(<$source as $crate::ErrorAttributes>::attributes());
                )+
                attributes
            }
        }

        impl $crate::InheritedRegistry for $name {
            fn cache() -> &'static $crate::ErrorCache {
                static CACHE: $crate::ErrorCache = $crate::ErrorCache::new();
                &CACHE
            }
        }
    };
}
