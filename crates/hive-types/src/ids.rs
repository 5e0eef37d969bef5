//! Type-safe identifiers for world objects, regions, and workers.
//!
//! Targets and regions use [`Uuid`] newtypes so an identifier for one kind
//! of thing can never be passed where another is expected. Workers are
//! addressed by name instead: the name is assigned at creation, encodes
//! the role and creation tick, and keys the persisted memory record.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Stable identifier of a selectable world object (resource node,
    /// structure, dropped resource, construction site, controller).
    ///
    /// Valid until the object ceases to exist.
    TargetId
}

define_id! {
    /// Identifier of a region: a spatial partition of the world with its
    /// own grid and at most one controller.
    RegionId
}

/// Unique name of a worker.
///
/// Names take the form `<Role>_<tick>` with an optional `_<n>` suffix when
/// several workers of the same role are requested on the same tick.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorkerName(pub String);

impl WorkerName {
    /// Create a worker name from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WorkerName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkerName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_values() {
        let a = TargetId::new();
        let b = TargetId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn target_id_serializes_as_plain_uuid() {
        let id = TargetId::new();
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json, Some(format!("\"{}\"", id.into_inner())));
    }

    #[test]
    fn worker_name_display_is_raw_string() {
        let name = WorkerName::from("Harvester_1000");
        assert_eq!(name.to_string(), "Harvester_1000");
        assert_eq!(name.as_str(), "Harvester_1000");
    }
}
