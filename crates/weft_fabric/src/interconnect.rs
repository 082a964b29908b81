//! Interconnect classification: what structure drives each destination node.
//!
//! Every destination either continues straight through its block
//! (pass-through), wires directly to a single driver, or needs an N-way
//! routing multiplexer. The decision depends only on the destination's
//! fan-in count and the block-topology pass-through flag, never on the
//! allocator or any other mutable state.

use crate::error::FabricError;
use serde::{Deserialize, Serialize};
use weft_rrg::{BlockView, Destination, RoutingGraph};

/// The interconnect structure required by one destination node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum InterconnectKind {
    /// The destination is a straight-through wire segment, or a dead end
    /// shorted to itself on the opposite side of the block.
    Passthrough,
    /// The destination wires directly to its single driver; no
    /// configuration needed.
    Direct,
    /// The destination needs an N-way routing multiplexer.
    Mux {
        /// The multiplexer width — always the exact fan-in count, ≥ 2.
        width: usize,
    },
}

impl InterconnectKind {
    /// Classifies a destination from its fan-in count and topology flag.
    ///
    /// This is a pure function of the pair: a topological pass-through is a
    /// pass-through no matter what fan-in the node lists (even a listed
    /// fan-in of 1 is still a continuing wire, not a selectable
    /// connection); otherwise the fan-in count alone decides.
    pub fn from_fanin(fanin_count: usize, topological_passthrough: bool) -> Self {
        if topological_passthrough {
            InterconnectKind::Passthrough
        } else {
            match fanin_count {
                0 => InterconnectKind::Passthrough,
                1 => InterconnectKind::Direct,
                width => InterconnectKind::Mux { width },
            }
        }
    }

    /// Returns `true` if this interconnect is a multiplexer.
    pub fn is_mux(self) -> bool {
        matches!(self, InterconnectKind::Mux { .. })
    }
}

/// Classifies one block destination, validating the node handle.
///
/// Returns [`FabricError::InvalidNodeHandle`] if the destination does not
/// resolve in the routing graph; classification never fails silently.
pub fn classify(
    graph: &RoutingGraph,
    block: &BlockView,
    dest: &Destination,
) -> Result<InterconnectKind, FabricError> {
    let node = graph
        .node(dest.node)
        .ok_or(FabricError::InvalidNodeHandle {
            node: dest.node,
            block: block.kind,
            coord: block.coord,
        })?;
    Ok(InterconnectKind::from_fanin(
        node.fanin.len(),
        dest.topological_passthrough,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_rrg::{
        BlockKind, BlockSide, GridCoord, NodeId, NodeKind, PortRole, RoutingNode, Side, TrackSlot,
    };

    #[test]
    fn classify_by_fanin_count() {
        assert_eq!(
            InterconnectKind::from_fanin(0, false),
            InterconnectKind::Passthrough
        );
        assert_eq!(
            InterconnectKind::from_fanin(1, false),
            InterconnectKind::Direct
        );
        assert_eq!(
            InterconnectKind::from_fanin(2, false),
            InterconnectKind::Mux { width: 2 }
        );
        assert_eq!(
            InterconnectKind::from_fanin(13, false),
            InterconnectKind::Mux { width: 13 }
        );
    }

    #[test]
    fn topology_flag_wins_over_fanin() {
        // Even a listed fan-in of 1 is a pass-through when topology says so.
        assert_eq!(
            InterconnectKind::from_fanin(1, true),
            InterconnectKind::Passthrough
        );
        assert_eq!(
            InterconnectKind::from_fanin(5, true),
            InterconnectKind::Passthrough
        );
    }

    #[test]
    fn classification_is_stable() {
        for fanin in 0..8 {
            for flag in [false, true] {
                assert_eq!(
                    InterconnectKind::from_fanin(fanin, flag),
                    InterconnectKind::from_fanin(fanin, flag)
                );
            }
        }
    }

    #[test]
    fn is_mux() {
        assert!(InterconnectKind::Mux { width: 2 }.is_mux());
        assert!(!InterconnectKind::Direct.is_mux());
        assert!(!InterconnectKind::Passthrough.is_mux());
    }

    #[test]
    fn classify_validates_handle() {
        let graph = RoutingGraph::new();
        let block = BlockView::new(BlockKind::SwitchBox, GridCoord::new(1, 1));
        let dest = Destination {
            node: NodeId::from_raw(0),
            side: Side::Right,
            index: 0,
            topological_passthrough: false,
        };
        let err = classify(&graph, &block, &dest).unwrap_err();
        assert!(matches!(err, FabricError::InvalidNodeHandle { .. }));
    }

    #[test]
    fn classify_resolves_fanin() {
        let mut graph = RoutingGraph::new();
        let a = graph.add_node(RoutingNode::channel(NodeKind::ChanX, GridCoord::new(0, 0), 0));
        let b = graph.add_node(RoutingNode::channel(NodeKind::ChanX, GridCoord::new(0, 0), 1));
        let dest_id = graph.add_node(RoutingNode::channel(NodeKind::ChanX, GridCoord::new(1, 0), 0));
        graph.node_mut(dest_id).unwrap().fanin = vec![a, b];

        let mut right = BlockSide::new(Side::Right);
        right.tracks.push(TrackSlot {
            node: dest_id,
            role: PortRole::Output,
        });
        let block =
            BlockView::new(BlockKind::SwitchBox, GridCoord::new(0, 0)).with_side(right);
        let dest = block.destinations()[0];

        assert_eq!(
            classify(&graph, &block, &dest).unwrap(),
            InterconnectKind::Mux { width: 2 }
        );
    }
}
