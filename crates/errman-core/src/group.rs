// SPDX-License-Identifier: MIT OR Apache-2.0
//! Named error groups: closed, ordered sets of named [`ErrorDescriptor`]
//! constants.
//!
//! Groups are declared with [`error_group!`](crate::error_group), which
//! generates a fieldless enum whose variants are the member names and whose
//! [`ErrorGroup::value`] is the descriptor constant. [`GroupRef`] is the
//! type-erased handle registries accept at runtime.

use std::any::Any;
use std::fmt;

use crate::descriptor::ErrorDescriptor;

/// A closed set of named error descriptors in declaration order.
pub trait ErrorGroup: Copy + fmt::Debug + Send + Sync + 'static {
    /// Name of the group type.
    const NAME: &'static str;

    /// Every member, in declaration order.
    fn members() -> &'static [Self];

    /// Member name.
    fn key(self) -> &'static str;

    /// Descriptor constant behind this member.
    fn value(self) -> &'static ErrorDescriptor;

    /// Member names in declaration order.
    fn keys() -> Vec<&'static str> {
        Self::members().iter().map(|m| m.key()).collect()
    }

    /// Member descriptors in declaration order.
    fn values() -> Vec<&'static ErrorDescriptor> {
        Self::members().iter().map(|m| m.value()).collect()
    }

    /// `(name, descriptor)` pairs in declaration order.
    fn entries() -> Vec<(&'static str, &'static ErrorDescriptor)> {
        Self::members().iter().map(|m| (m.key(), m.value())).collect()
    }

    /// Look a member up by name.
    fn from_key(key: &str) -> Option<Self> {
        Self::members().iter().copied().find(|m| m.key() == key)
    }

    /// Type-erased handle for this group.
    fn group() -> GroupRef {
        GroupRef::of::<Self>()
    }
}

/// Runtime handle to an [`ErrorGroup`] type.
#[derive(Clone, Copy)]
pub struct GroupRef {
    name: &'static str,
    entries: fn() -> Vec<(&'static str, &'static ErrorDescriptor)>,
}

impl GroupRef {
    /// Handle for group `G`.
    pub fn of<G: ErrorGroup>() -> Self {
        Self {
            name: G::NAME,
            entries: G::entries,
        }
    }

    /// Name of the group type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `(name, descriptor)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, &'static ErrorDescriptor)> {
        (self.entries)()
    }

    /// Member names in declaration order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }
}

impl fmt::Debug for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupRef")
            .field("name", &self.name)
            .field("keys", &self.keys())
            .finish()
    }
}

/// View `value` as a [`GroupRef`] if it is one.
pub fn as_group(value: &dyn Any) -> Option<&GroupRef> {
    value.downcast_ref::<GroupRef>()
}

/// Declare a named error group.
///
/// ```
/// use errman_core::{ErrorGroup, error_group};
///
/// error_group! {
///     /// Storage failures.
///     pub enum StorageErrors {
///         /// Nothing stored under the key.
///         NotFound = ("ST_001", "Not found"),
///         Conflict = ("ST_002", "Version conflict"),
///     }
/// }
///
/// assert_eq!(StorageErrors::keys(), ["NotFound", "Conflict"]);
/// assert_eq!(StorageErrors::Conflict.value().code(), "ST_002");
/// ```
#[macro_export]
macro_rules! error_group {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = ($code:expr, $desc:expr)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $crate::ErrorGroup for $name {
            const NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$(Self::$variant),*]
            }

            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            fn value(self) -> &'static $crate::ErrorDescriptor {
                match self {
                    $(Self::$variant => {
                        static DESCRIPTOR: $crate::ErrorDescriptor =
                            $crate::ErrorDescriptor::constant($code, $desc);
                        &DESCRIPTOR
                    })*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::error_group! {
        enum Sample {
            First = ("S_001", "first"),
            Second = ("S_002", "second"),
            Third = ("S_003", "third"),
        }
    }

    crate::error_group! {
        enum Empty {}
    }

    #[test]
    fn keys_follow_declaration_order() {
        assert_eq!(Sample::keys(), ["First", "Second", "Third"]);
    }

    #[test]
    fn values_follow_declaration_order() {
        let codes: Vec<_> = Sample::values().iter().map(|d| d.code()).collect();
        assert_eq!(codes, ["S_001", "S_002", "S_003"]);
    }

    #[test]
    fn empty_group_has_no_members() {
        assert!(Empty::keys().is_empty());
        assert!(Empty::values().is_empty());
        assert!(Empty::group().entries().is_empty());
    }

    #[test]
    fn from_key_finds_member() {
        assert_eq!(Sample::from_key("Second"), Some(Sample::Second));
        assert_eq!(Sample::from_key("Fourth"), None);
    }

    #[test]
    fn value_is_a_stable_static() {
        assert!(std::ptr::eq(Sample::First.value(), Sample::First.value()));
    }

    #[test]
    fn group_ref_mirrors_group() {
        let group = Sample::group();
        assert_eq!(group.name(), "Sample");
        assert_eq!(group.keys(), Sample::keys());
        assert!(as_group(&group).is_some());
        assert!(as_group(&"Sample").is_none());
    }
}
