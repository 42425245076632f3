// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-wide registry populated by explicit registration.

use errman_config::{DuplicatePolicy, RegistryConfig};
use errman_core::{
    ErrorDescriptor, ErrorGroup, ErrorObject, ManagerError, ManagerErrors, as_error, as_group,
};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace, warn};

static GLOBAL: LazyLock<GlobalRegistry> = LazyLock::new(GlobalRegistry::bootstrap);

#[derive(Default)]
struct Tables {
    /// code -> description
    errors: HashMap<String, String>,
    /// registration key -> descriptor
    members: BTreeMap<String, ErrorDescriptor>,
}

/// The process-wide error registry.
///
/// There is exactly one instance, reached through [`GlobalRegistry::global`].
/// It starts out holding [`ManagerErrors`] and only grows: entries are never
/// removed. Registering a code again replaces its description unless the
/// active [`RegistryConfig`] says otherwise.
///
/// Register every group during start-up, before lookups run concurrently.
///
/// ```
/// use errman_core::{ErrorGroup, error_group};
/// use errman_registry::GlobalRegistry;
///
/// error_group! {
///     pub enum BillingErrors {
///         CardDeclined = ("BILL_001", "Card declined"),
///     }
/// }
///
/// let registry = GlobalRegistry::global();
/// registry.register::<BillingErrors>().unwrap();
/// assert_eq!(registry.error_description("BILL_001").unwrap(), "Card declined");
/// assert_eq!(registry.member("CardDeclined").unwrap().code(), "BILL_001");
/// ```
pub struct GlobalRegistry {
    tables: RwLock<Tables>,
    config: RwLock<RegistryConfig>,
}

impl GlobalRegistry {
    fn bootstrap() -> Self {
        let registry = Self {
            tables: RwLock::new(Tables::default()),
            config: RwLock::new(RegistryConfig::default()),
        };
        {
            let mut tables = registry.write();
            for (key, error) in ManagerErrors::entries() {
                tables
                    .errors
                    .insert(error.code().to_owned(), error.description().to_owned());
                tables.members.insert(key.to_owned(), error.clone());
            }
        }
        registry
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Install `config` for all subsequent operations.
    pub fn configure(&self, config: RegistryConfig) {
        debug!(
            target: "errman",
            duplicate_policy = %config.duplicate_policy,
            trace_lookups = config.trace_lookups,
            "registry configured"
        );
        *self.config.write().expect("registry config poisoned") = config;
    }

    /// The active configuration.
    pub fn config(&self) -> RegistryConfig {
        self.config.read().expect("registry config poisoned").clone()
    }

    /// Register `error` under the name `key`.
    ///
    /// `error` may be an [`ErrorDescriptor`] or anything
    /// [`errman_core::is_error`] accepts; derived values are stored as their
    /// base descriptor.
    ///
    /// # Errors
    ///
    /// * [`ManagerError::NotAnError`] if `error` is not a descriptor.
    /// * [`ManagerError::DuplicateCode`] if the code is known with another
    ///   description and the policy is [`DuplicatePolicy::Reject`].
    pub fn register_error(&self, key: &str, error: &dyn Any) -> Result<(), ManagerError> {
        let error = as_error(error).ok_or(ManagerError::NotAnError)?;
        let policy = self.config().duplicate_policy;

        let previous = {
            let mut tables = self.write();
            let previous = tables
                .errors
                .get(error.code())
                .filter(|existing| existing.as_str() != error.description())
                .cloned();
            if let (Some(existing), DuplicatePolicy::Reject) = (&previous, policy) {
                return Err(ManagerError::DuplicateCode {
                    code: error.code().to_owned(),
                    existing: existing.clone(),
                    rejected: error.description().to_owned(),
                });
            }
            tables
                .errors
                .insert(error.code().to_owned(), error.description().to_owned());
            tables.members.insert(key.to_owned(), error.clone());
            previous
        };

        // Events go out after the guard is released so subscribers may read
        // the registry.
        if let Some(previous) = previous {
            match policy {
                DuplicatePolicy::Warn => warn!(
                    target: "errman",
                    code = error.code(),
                    previous = %previous,
                    replacement = error.description(),
                    "error code registered twice with different descriptions"
                ),
                _ => debug!(
                    target: "errman",
                    code = error.code(),
                    previous = %previous,
                    "overwriting error description"
                ),
            }
        }
        debug!(target: "errman", key, code = error.code(), "registered error");
        Ok(())
    }

    /// Register every member of a group, in declaration order.
    ///
    /// `group` must be a [`errman_core::GroupRef`], as returned by
    /// [`ErrorGroup::group`]. Registration stops at the first failing member;
    /// members before it stay registered.
    ///
    /// # Errors
    ///
    /// * [`ManagerError::NotAnErrorGroup`] if `group` is not a group handle.
    /// * Any error of [`GlobalRegistry::register_error`].
    pub fn register_errors(&self, group: &dyn Any) -> Result<(), ManagerError> {
        let group = as_group(group).ok_or(ManagerError::NotAnErrorGroup)?;
        for (key, error) in group.entries() {
            self.register_error(key, error)?;
        }
        debug!(target: "errman", group = group.name(), "registered error group");
        Ok(())
    }

    /// Register every member of `G`.
    pub fn register<G: ErrorGroup>(&self) -> Result<(), ManagerError> {
        self.register_errors(&G::group())
    }

    /// Description registered for `code`.
    ///
    /// # Errors
    ///
    /// [`ManagerError::CodeNotFound`], carrying the
    /// [`ManagerErrors::CouldNotFindErrorCode`] report, if `code` is unknown.
    pub fn error_description(&self, code: &str) -> Result<String, ManagerError> {
        let trace_lookups = self.config().trace_lookups;
        let found = self.read().errors.get(code).cloned();
        match found {
            Some(description) => {
                if trace_lookups {
                    trace!(target: "errman", code, "error description lookup");
                }
                Ok(description)
            }
            None => {
                debug!(target: "errman", code, "error code not registered");
                Err(ManagerError::code_not_found(code))
            }
        }
    }

    /// `{ "error": <code>, "description": <description> }` for `error`.
    pub fn error_object(error: &ErrorDescriptor) -> ErrorObject {
        ErrorObject::from(error)
    }

    /// Descriptor registered under the name `key`.
    pub fn member(&self, key: &str) -> Option<ErrorDescriptor> {
        self.read().members.get(key).cloned()
    }

    /// Whether `code` is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.read().errors.contains_key(code)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.read().errors.len()
    }

    /// Whether no code is registered. Never true for the global instance.
    pub fn is_empty(&self) -> bool {
        self.read().errors.is_empty()
    }

    /// Every registered code with its description, sorted by code.
    pub fn catalog(&self) -> Vec<ErrorObject> {
        let tables = self.read();
        let mut catalog: Vec<ErrorObject> = tables
            .errors
            .iter()
            .map(|(code, description)| ErrorObject {
                error: code.clone(),
                description: description.clone(),
            })
            .collect();
        catalog.sort_by(|a, b| a.error.cmp(&b.error));
        catalog
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("error registry poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("error registry poisoned")
    }
}

impl fmt::Debug for GlobalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.read();
        f.debug_struct("GlobalRegistry")
            .field("codes", &tables.errors.len())
            .field("members", &tables.members.keys().collect::<Vec<_>>())
            .finish()
    }
}
