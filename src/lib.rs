// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error codes, registries and result wrappers.
//!
//! Errors are immutable [`ErrorDescriptor`] values identified by a stable
//! code. They are declared in named groups, registered in the process-wide
//! [`GlobalRegistry`] or composed into an [`InheritedRegistry`], and handed
//! back to callers inside a [`ResultWrapper`] instead of being raised.
//!
//! ```
//! use error_manager::{ErrorGroup, GlobalRegistry, ResultWrapper, error_group};
//!
//! error_group! {
//!     pub enum UserErrors {
//!         EmptyName = ("USR_001", "Name must not be empty"),
//!     }
//! }
//!
//! GlobalRegistry::global().register::<UserErrors>().unwrap();
//!
//! fn rename(name: &str) -> ResultWrapper<String> {
//!     if name.is_empty() {
//!         return ResultWrapper::from_error(UserErrors::EmptyName.value());
//!     }
//!     ResultWrapper::with_result(name.to_owned())
//! }
//!
//! let outcome = rename("");
//! assert!(!outcome.is_valid());
//! let code = outcome.errors()[0].code();
//! assert_eq!(
//!     GlobalRegistry::global().error_description(code).unwrap(),
//!     "Name must not be empty"
//! );
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use errman_config::{ConfigError, ConfigWarning, DuplicatePolicy, RegistryConfig};
pub use errman_core::{
    DerivedDescriptor, ErrorData, ErrorDescriptor, ErrorDescriptorBuilder, ErrorGroup, ErrorKind,
    ErrorObject, GroupRef, ManagerError, ManagerErrors, add_error_data, as_error, as_group,
    error_group, error_object, is_error, register_derived,
};
pub use errman_registry::{
    Attribute, ErrorAttributes, ErrorCache, GlobalRegistry, InheritedRegistry, error_attributes,
    inherited_errors,
};
pub use errman_result::ResultWrapper;
