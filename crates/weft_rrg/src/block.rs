//! Block views: the side/track/pin structure of switch and connection boxes.
//!
//! A [`BlockView`] is the per-block slice of the routing graph the synthesis
//! core walks: which channel nodes pass each side (and in which role), and
//! which grid pins attach. The same view type serves switch boxes (channel
//! destinations, output-pin sources) and connection boxes (pin destinations,
//! channel-tap sources); the [`BlockKind`] decides which slots are
//! destinations.

use crate::geom::{GridCoord, Side};
use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a routing block on the device grid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum BlockKind {
    /// A switch box connecting routing channels at a grid intersection.
    SwitchBox,
    /// A connection box tapping a horizontal channel into logic-block pins.
    ConnectionBoxX,
    /// A connection box tapping a vertical channel into logic-block pins.
    ConnectionBoxY,
}

impl BlockKind {
    /// Returns the short lowercase name used in module naming (`sb`, `cbx`, `cby`).
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::SwitchBox => "sb",
            BlockKind::ConnectionBoxX => "cbx",
            BlockKind::ConnectionBoxY => "cby",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The role of a channel node at a block boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PortRole {
    /// The node enters the block here (driven by a neighboring block).
    Input,
    /// The node leaves the block here (driven by this block's interconnect).
    Output,
}

/// One channel track position at a block side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TrackSlot {
    /// The routing node occupying this track position.
    pub node: NodeId,
    /// Whether the node enters or leaves the block at this side.
    pub role: PortRole,
}

/// All routing resources attached to one side of a block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockSide {
    /// Which side of the block this is.
    pub side: Side,
    /// Channel track slots on this side, in track-index order.
    pub tracks: Vec<TrackSlot>,
    /// Grid pins attached on this side, in pin order.
    ///
    /// For a switch box these are logic-block output pins feeding the block;
    /// for a connection box they are logic-block input pins the block drives.
    pub grid_pins: Vec<NodeId>,
}

impl BlockSide {
    /// Creates an empty side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            tracks: Vec::new(),
            grid_pins: Vec::new(),
        }
    }
}

/// Which slot class an input node occupies within a block.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SlotClass {
    /// A channel track slot.
    Track,
    /// A grid-pin slot.
    GridPin,
}

/// The location of a multiplexer input within its block.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InputSite {
    /// The side the input enters on.
    pub side: Side,
    /// The track or pin index within that side.
    pub index: usize,
    /// Whether the input is a channel track or a grid pin.
    pub class: SlotClass,
}

/// One interconnect destination of a block, in enumeration order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Destination {
    /// The destination routing node.
    pub node: NodeId,
    /// The side the destination sits on.
    pub side: Side,
    /// The track or pin index within that side.
    pub index: usize,
    /// Whether block topology makes this a straight-through wire segment,
    /// independent of its listed fan-in.
    pub topological_passthrough: bool,
}

/// The per-block slice of the routing graph.
///
/// Sides must be added in a fixed order by the builder — [`Side::ALL`]
/// order for switch boxes, the channel side before the pin sides for
/// connection boxes. Destination enumeration walks sides in insertion
/// order and configuration-bit addressing depends on that order being
/// stable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockView {
    /// The kind of this block.
    pub kind: BlockKind,
    /// The grid coordinate of this block.
    pub coord: GridCoord,
    /// The populated sides of this block.
    pub sides: Vec<BlockSide>,
}

impl BlockView {
    /// Creates a block view with no sides.
    pub fn new(kind: BlockKind, coord: GridCoord) -> Self {
        Self {
            kind,
            coord,
            sides: Vec::new(),
        }
    }

    /// Adds a populated side and returns the view for chaining.
    pub fn with_side(mut self, side: BlockSide) -> Self {
        self.sides.push(side);
        self
    }

    /// Returns the populated side facing the given direction, if present.
    pub fn side(&self, side: Side) -> Option<&BlockSide> {
        self.sides.iter().find(|s| s.side == side)
    }

    /// Returns whether a channel node listed as an output on `side` also
    /// appears on the opposite side of the block.
    ///
    /// Such a node is a wire segment passing straight through the block:
    /// its interconnect is a topological pass-through regardless of any
    /// fan-in recorded on the node.
    pub fn is_passing_wire(&self, side: Side, node: NodeId) -> bool {
        match self.side(side.opposite()) {
            Some(opposite) => opposite.tracks.iter().any(|slot| slot.node == node),
            None => false,
        }
    }

    /// Returns this block's interconnect destinations in enumeration order.
    ///
    /// Switch boxes drive channel nodes: every output-role track slot, walked
    /// side by side then by track index. Connection boxes drive logic-block
    /// input pins: every grid pin, walked side by side then by pin index.
    /// Input-role tracks are never destinations — they are driven by
    /// neighboring blocks.
    pub fn destinations(&self) -> Vec<Destination> {
        let mut out = Vec::new();
        match self.kind {
            BlockKind::SwitchBox => {
                for side in &self.sides {
                    for (index, slot) in side.tracks.iter().enumerate() {
                        if slot.role == PortRole::Output {
                            out.push(Destination {
                                node: slot.node,
                                side: side.side,
                                index,
                                topological_passthrough: self
                                    .is_passing_wire(side.side, slot.node),
                            });
                        }
                    }
                }
            }
            BlockKind::ConnectionBoxX | BlockKind::ConnectionBoxY => {
                for side in &self.sides {
                    for (index, &node) in side.grid_pins.iter().enumerate() {
                        out.push(Destination {
                            node,
                            side: side.side,
                            index,
                            topological_passthrough: false,
                        });
                    }
                }
            }
        }
        out
    }

    /// Finds where the given node enters this block as a multiplexer input.
    ///
    /// For switch boxes an input is either an input-role track slot or a
    /// grid output pin; for connection boxes every track slot is an input
    /// tap. Returns `None` when the node is not an input of this block.
    pub fn locate_input(&self, node: NodeId) -> Option<InputSite> {
        for side in &self.sides {
            for (index, slot) in side.tracks.iter().enumerate() {
                if slot.node == node && slot.role == PortRole::Input {
                    return Some(InputSite {
                        side: side.side,
                        index,
                        class: SlotClass::Track,
                    });
                }
            }
            if self.kind == BlockKind::SwitchBox {
                for (index, &pin) in side.grid_pins.iter().enumerate() {
                    if pin == node {
                        return Some(InputSite {
                            side: side.side,
                            index,
                            class: SlotClass::GridPin,
                        });
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(raw: u32) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn sb_with_passing_wire() -> BlockView {
        // Track 0 leaves on the right and enters on the left: a passing wire.
        // Track 1 leaves on the right only.
        let mut right = BlockSide::new(Side::Right);
        right.tracks.push(TrackSlot {
            node: node(0),
            role: PortRole::Output,
        });
        right.tracks.push(TrackSlot {
            node: node(1),
            role: PortRole::Output,
        });
        let mut left = BlockSide::new(Side::Left);
        left.tracks.push(TrackSlot {
            node: node(0),
            role: PortRole::Input,
        });
        left.grid_pins.push(node(7));
        BlockView::new(BlockKind::SwitchBox, GridCoord::new(1, 1))
            .with_side(right)
            .with_side(left)
    }

    #[test]
    fn block_kind_names() {
        assert_eq!(BlockKind::SwitchBox.name(), "sb");
        assert_eq!(BlockKind::ConnectionBoxX.name(), "cbx");
        assert_eq!(format!("{}", BlockKind::ConnectionBoxY), "cby");
    }

    #[test]
    fn passing_wire_detection() {
        let sb = sb_with_passing_wire();
        assert!(sb.is_passing_wire(Side::Right, node(0)));
        assert!(!sb.is_passing_wire(Side::Right, node(1)));
    }

    #[test]
    fn switch_box_destinations_are_output_tracks() {
        let sb = sb_with_passing_wire();
        let dests = sb.destinations();
        assert_eq!(dests.len(), 2);
        assert_eq!(dests[0].node, node(0));
        assert!(dests[0].topological_passthrough);
        assert_eq!(dests[1].node, node(1));
        assert!(!dests[1].topological_passthrough);
    }

    #[test]
    fn switch_box_inputs() {
        let sb = sb_with_passing_wire();
        let track_in = sb.locate_input(node(0)).unwrap();
        assert_eq!(track_in.side, Side::Left);
        assert_eq!(track_in.class, SlotClass::Track);

        let pin_in = sb.locate_input(node(7)).unwrap();
        assert_eq!(pin_in.class, SlotClass::GridPin);
        assert_eq!(pin_in.index, 0);

        // An output-role slot is not an input.
        assert!(sb.locate_input(node(1)).is_none());
    }

    #[test]
    fn connection_box_destinations_are_grid_pins() {
        let mut chan = BlockSide::new(Side::Top);
        chan.tracks.push(TrackSlot {
            node: node(0),
            role: PortRole::Input,
        });
        let mut pins = BlockSide::new(Side::Bottom);
        pins.grid_pins.push(node(5));
        pins.grid_pins.push(node(6));
        let cb = BlockView::new(BlockKind::ConnectionBoxX, GridCoord::new(2, 0))
            .with_side(chan)
            .with_side(pins);

        let dests = cb.destinations();
        assert_eq!(dests.len(), 2);
        assert_eq!(dests[0].node, node(5));
        assert_eq!(dests[1].node, node(6));
        assert!(!dests[0].topological_passthrough);

        // The channel tap is an input; the pins are not (connection boxes
        // never take grid pins as multiplexer inputs).
        assert!(cb.locate_input(node(0)).is_some());
        assert!(cb.locate_input(node(5)).is_none());
    }

    #[test]
    fn destination_order_is_side_then_index() {
        let mut top = BlockSide::new(Side::Top);
        top.tracks.push(TrackSlot {
            node: node(0),
            role: PortRole::Output,
        });
        let mut right = BlockSide::new(Side::Right);
        right.tracks.push(TrackSlot {
            node: node(1),
            role: PortRole::Output,
        });
        right.tracks.push(TrackSlot {
            node: node(2),
            role: PortRole::Output,
        });
        let sb = BlockView::new(BlockKind::SwitchBox, GridCoord::new(0, 0))
            .with_side(top)
            .with_side(right);
        let order: Vec<u32> = sb.destinations().iter().map(|d| d.node.as_raw()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn serde_roundtrip() {
        let sb = sb_with_passing_wire();
        let json = serde_json::to_string(&sb).unwrap();
        let back: BlockView = serde_json::from_str(&json).unwrap();
        assert_eq!(back.destinations(), sb.destinations());
    }
}
