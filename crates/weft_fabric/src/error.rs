//! Error types for fabric synthesis.
//!
//! Every variant is unrecoverable at the point of detection: bit-address
//! assignment is not a transient operation, so there is no local retry.
//! Each error carries the block coordinate and node identity needed to
//! diagnose the failing part of the fabric.

use weft_rrg::{BlockKind, GridCoord, MemoryOrganization, NodeId, Technology};

/// Errors that abort a fabric generation run.
#[derive(Debug, thiserror::Error)]
pub enum FabricError {
    /// A routing-node handle did not resolve in the routing graph, or a
    /// referenced node is not part of the block being synthesized.
    #[error("invalid routing node handle {node:?} in {block} {coord}")]
    InvalidNodeHandle {
        /// The unresolvable node handle.
        node: NodeId,
        /// The kind of block being synthesized.
        block: BlockKind,
        /// The coordinate of the block being synthesized.
        coord: GridCoord,
    },

    /// The routing solution's selected driver of a destination is not in
    /// the destination's fan-in list. A multiplexer that cannot select its
    /// intended path makes the generated fabric non-functional.
    #[error(
        "selected driver {driver:?} of node {node:?} is not in its fan-in list ({block} {coord})"
    )]
    SelectedDriverNotInFanIn {
        /// The destination node.
        node: NodeId,
        /// The selected driver that is missing from the fan-in list.
        driver: NodeId,
        /// The kind of block being synthesized.
        block: BlockKind,
        /// The coordinate of the block being synthesized.
        coord: GridCoord,
    },

    /// A switch technology cannot be configured under the selected
    /// configuration-memory organization.
    #[error(
        "switch '{switch}' uses {technology}, which is unsupported under the \
         {organization} organization ({block} {coord})"
    )]
    UnsupportedTechnology {
        /// The name of the offending switch.
        switch: String,
        /// The switch's design technology.
        technology: Technology,
        /// The configuration-memory organization of the run.
        organization: MemoryOrganization,
        /// The kind of block being synthesized.
        block: BlockKind,
        /// The coordinate of the block being synthesized.
        coord: GridCoord,
    },

    /// The bit count computed for a physical block instance disagrees with
    /// the count recorded for its unique module template.
    #[error(
        "configuration bit count mismatch for {block} {coord}: \
         template has {template_bits} bits, instance counted {counted_bits}"
    )]
    BitCountMismatch {
        /// The kind of the inconsistent block.
        block: BlockKind,
        /// The coordinate of the inconsistent block.
        coord: GridCoord,
        /// Bits recorded for the unique module template.
        template_bits: u32,
        /// Bits counted for this physical instance.
        counted_bits: u32,
    },

    /// A block's multiplexer sub-ranges do not exactly tile its window.
    #[error(
        "non-contiguous allocation in {block} {coord}: \
         expected next bit {expected}, found {found}"
    )]
    NonContiguousAllocation {
        /// The kind of the offending block.
        block: BlockKind,
        /// The coordinate of the offending block.
        coord: GridCoord,
        /// The bit address the next sub-range was expected to start at.
        expected: u32,
        /// The bit address actually found.
        found: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_handle_display() {
        let err = FabricError::InvalidNodeHandle {
            node: NodeId::from_raw(12),
            block: BlockKind::SwitchBox,
            coord: GridCoord::new(1, 2),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid routing node handle"));
        assert!(msg.contains("sb [1][2]"));
    }

    #[test]
    fn selected_driver_display() {
        let err = FabricError::SelectedDriverNotInFanIn {
            node: NodeId::from_raw(4),
            driver: NodeId::from_raw(9),
            block: BlockKind::ConnectionBoxX,
            coord: GridCoord::new(0, 3),
        };
        let msg = err.to_string();
        assert!(msg.contains("not in its fan-in list"));
        assert!(msg.contains("cbx [0][3]"));
    }

    #[test]
    fn unsupported_technology_display() {
        let err = FabricError::UnsupportedTechnology {
            switch: "rram_xp".to_string(),
            technology: Technology::Rram,
            organization: MemoryOrganization::ScanChain,
            block: BlockKind::SwitchBox,
            coord: GridCoord::new(2, 2),
        };
        let msg = err.to_string();
        assert!(msg.contains("RRAM"));
        assert!(msg.contains("scan-chain"));
    }

    #[test]
    fn bit_count_mismatch_display() {
        let err = FabricError::BitCountMismatch {
            block: BlockKind::SwitchBox,
            coord: GridCoord::new(3, 1),
            template_bits: 12,
            counted_bits: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("template has 12 bits"));
        assert!(msg.contains("instance counted 10"));
    }

    #[test]
    fn non_contiguous_display() {
        let err = FabricError::NonContiguousAllocation {
            block: BlockKind::ConnectionBoxY,
            coord: GridCoord::new(0, 0),
            expected: 8,
            found: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected next bit 8"));
        assert!(msg.contains("found 10"));
    }
}
