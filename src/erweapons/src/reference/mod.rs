//! Reference data for Elden Ring weapons
//!
//! Closed enumerations for attributes, damage types, status effects,
//! affinities, and weapon types. Every enumeration is matched by its exact
//! spreadsheet name; anything else is rejected when the sources are loaded.
//! The declaration order of each enumeration is also its encoded code.

// Defined before the submodules so they can invoke it.
macro_rules! named_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::reference::Kind for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            fn index(self) -> usize {
                self as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::reference::Kind::name(*self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::reference::Kind::name(*self))
            }
        }
    };
}

mod affinity;
mod attribute;
mod damage;
mod status;
mod weapon_type;

pub use affinity::{Affinity, RawAffinity, PLACEHOLDER_AFFINITY};
pub use attribute::Attribute;
pub use damage::DamageType;
pub use status::StatusType;
pub use weapon_type::{WeaponType, MAX_UPGRADE_LEVELS};

/// A closed set of named values with a stable position
pub trait Kind: Copy + Eq + 'static {
    /// Every value, in encoding order
    const ALL: &'static [Self];

    /// Spreadsheet / display name
    fn name(self) -> &'static str;

    /// Position in [`Kind::ALL`]
    fn index(self) -> usize;

    /// Reverse lookup by exact name
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Reverse lookup by position
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
        }
        for (i, status) in StatusType::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(DamageType::from_index(4), Some(DamageType::Holy));
        assert_eq!(DamageType::from_index(5), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = WeaponType::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WeaponType::ALL.len());
    }
}
