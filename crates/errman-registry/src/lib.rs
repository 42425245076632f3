// SPDX-License-Identifier: MIT OR Apache-2.0
//! Code-to-description registries.
//!
//! Two flavours are provided:
//!
//! - [`GlobalRegistry`]: one process-wide table filled at runtime with
//!   [`GlobalRegistry::register_error`] and
//!   [`GlobalRegistry::register_errors`].
//! - [`InheritedRegistry`]: per-type tables built from descriptor constants
//!   composed with [`inherited_errors!`], scanned lazily on the first miss.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod global;
pub mod inherited;

pub use errman_config::{DuplicatePolicy, RegistryConfig};
pub use errman_core::{ErrorDescriptor, ErrorObject, ManagerError, error_object};
pub use global::GlobalRegistry;
pub use inherited::{Attribute, ErrorAttributes, ErrorCache, InheritedRegistry};
