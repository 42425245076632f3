// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core value types of the error-manager.
//!
//! Every error is an immutable [`ErrorDescriptor`]: a stable code string, a
//! human-readable description and optional structured [`ErrorData`]. Related
//! descriptors are declared together as a named [`ErrorGroup`] with
//! [`error_group!`]. Misuse of the library itself is reported through
//! [`ManagerError`].
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builtin;
pub mod descriptor;
pub mod error;
pub mod group;
pub mod object;

pub use builtin::ManagerErrors;
pub use descriptor::{
    DerivedDescriptor, ErrorData, ErrorDescriptor, ErrorDescriptorBuilder, add_error_data,
    as_error, is_error, register_derived,
};
pub use error::{ErrorKind, ManagerError};
pub use group::{ErrorGroup, GroupRef, as_group};
pub use object::{ErrorObject, error_object};
