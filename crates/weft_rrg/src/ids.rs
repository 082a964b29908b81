//! Opaque ID newtypes for routing-resource-graph entities.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Hash`, and
//! `Serialize`/`Deserialize`. These IDs reference routing nodes, switch
//! descriptors, and unique block shapes; they are indices into arenas, so
//! the graph carries no ownership cycles.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a routing node (channel wire or grid pin).
    NodeId
);

define_id!(
    /// Opaque, copyable ID for a switch descriptor in the switch library.
    SwitchId
);

define_id!(
    /// Opaque, copyable ID for a unique block shape.
    ///
    /// Physical blocks classified as mirrors of each other share one shape ID.
    ShapeId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
    }

    #[test]
    fn id_equality() {
        let a = SwitchId::from_raw(7);
        let b = SwitchId::from_raw(7);
        let c = SwitchId::from_raw(8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn id_ordering() {
        let mut shapes = [
            ShapeId::from_raw(5),
            ShapeId::from_raw(1),
            ShapeId::from_raw(3),
        ];
        shapes.sort();
        assert_eq!(shapes[0].as_raw(), 1);
        assert_eq!(shapes[2].as_raw(), 5);
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(NodeId::from_raw(1));
        set.insert(NodeId::from_raw(2));
        set.insert(NodeId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = ShapeId::from_raw(99);
        let json = serde_json::to_string(&id).unwrap();
        let restored: ShapeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
