// SPDX-License-Identifier: MIT OR Apache-2.0
//! Descriptors used by the error-manager for its own failures.

crate::error_group! {
    /// Built-in errors, registered with the global registry at start-up.
    pub enum ManagerErrors {
        /// A registry was asked for a code it does not hold.
        CouldNotFindErrorCode = ("ER_GETERROR_00001", "Could not find requested error code"),
    }
}
