//! Name newtypes for the things jobs talk about.
//!
//! Everything in a catalog is referred to by name: jobs, opponents, locations,
//! items and skills. Wrapping each in its own type keeps a location from being
//! passed where an opponent is expected.

use std::borrow::Borrow;
use std::fmt;

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

name_type!(
    /// Unique name of a job in the task graph.
    JobName
);
name_type!(
    /// An adversary type a job may meet during its effect.
    Opponent
);
name_type!(
    /// A place a job can visit for one encounter at a time.
    Location
);
name_type!(
    /// An inventory item (equipment, consumable, combat item).
    Item
);
name_type!(
    /// A character skill usable in combat.
    Skill
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn names_compare_with_str() {
        let opponent = Opponent::from("goblin");
        assert_eq!(opponent, "goblin");
        assert_eq!(opponent.to_string(), "goblin");
    }

    #[test]
    fn names_index_maps_by_str() {
        let mut map = HashMap::new();
        map.insert(JobName::new("tower"), 3);
        assert_eq!(map.get("tower"), Some(&3));
    }
}
