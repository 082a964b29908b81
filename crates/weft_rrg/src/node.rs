//! Routing nodes and the routing-resource graph arena.
//!
//! A [`RoutingNode`] is one programmable wire or grid pin. Its ordered
//! fan-in list records which upstream nodes can drive it through a switch;
//! the order is semantically significant because it fixes which multiplexer
//! input slot each driver is wired to, and therefore which configuration
//! bit pattern selects it.

use crate::geom::{GridCoord, Side};
use crate::ids::{NodeId, SwitchId};
use crate::switch::SwitchDescriptor;
use serde::{Deserialize, Serialize};
use weft_common::{InternalError, WeftResult};

/// The kind of resource a routing node represents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeKind {
    /// A horizontal routing-channel wire.
    ChanX,
    /// A vertical routing-channel wire.
    ChanY,
    /// A logic-block output pin (drives into the routing fabric).
    OutputPin,
    /// A logic-block input pin (driven by a connection box).
    InputPin,
}

impl NodeKind {
    /// Returns the lowercase short name used in port naming.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::ChanX => "chanx",
            NodeKind::ChanY => "chany",
            NodeKind::OutputPin => "opin",
            NodeKind::InputPin => "ipin",
        }
    }

    /// Returns `true` for channel-wire nodes.
    pub fn is_channel(self) -> bool {
        matches!(self, NodeKind::ChanX | NodeKind::ChanY)
    }
}

/// One routing node: a channel wire or a grid pin.
///
/// Produced entirely by the upstream graph builder; read-only to the
/// synthesis core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutingNode {
    /// The kind of resource this node represents.
    pub kind: NodeKind,
    /// The grid position of this node (low corner for channel wires, the
    /// owning grid tile for pins).
    pub position: GridCoord,
    /// Track index for channel wires, pin index for grid pins.
    pub index: u32,
    /// For grid pins: the side of the grid tile the pin sits on.
    pub pin_side: Option<Side>,
    /// The nodes able to drive this node, in multiplexer input-slot order.
    pub fanin: Vec<NodeId>,
    /// The switch used by each fan-in edge, parallel to `fanin`.
    pub fanin_switches: Vec<SwitchId>,
    /// The driver the computed routing solution actually uses, if any.
    ///
    /// `None` means the routing solution does not use this node; its
    /// multiplexer is left steering the default input.
    pub selected_driver: Option<NodeId>,
}

impl RoutingNode {
    /// Creates a channel-wire node with no fan-in.
    pub fn channel(kind: NodeKind, position: GridCoord, track: u32) -> Self {
        debug_assert!(kind.is_channel());
        Self {
            kind,
            position,
            index: track,
            pin_side: None,
            fanin: Vec::new(),
            fanin_switches: Vec::new(),
            selected_driver: None,
        }
    }

    /// Creates a grid-pin node with no fan-in.
    pub fn pin(kind: NodeKind, position: GridCoord, side: Side, pin: u32) -> Self {
        debug_assert!(!kind.is_channel());
        Self {
            kind,
            position,
            index: pin,
            pin_side: Some(side),
            fanin: Vec::new(),
            fanin_switches: Vec::new(),
            selected_driver: None,
        }
    }
}

/// The routing-resource graph: an arena of nodes plus the switch library.
///
/// Node and switch IDs are indices into the arenas, so references between
/// nodes carry no ownership.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoutingGraph {
    nodes: Vec<RoutingNode>,
    switches: Vec<SwitchDescriptor>,
}

impl RoutingGraph {
    /// Creates an empty routing graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its ID.
    pub fn add_node(&mut self, node: RoutingNode) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Adds a switch descriptor and returns its ID.
    pub fn add_switch(&mut self, switch: SwitchDescriptor) -> SwitchId {
        let id = SwitchId::from_raw(self.switches.len() as u32);
        self.switches.push(switch);
        id
    }

    /// Returns the node with the given ID, or `None` for an invalid handle.
    pub fn node(&self, id: NodeId) -> Option<&RoutingNode> {
        self.nodes.get(id.as_raw() as usize)
    }

    /// Returns a mutable reference to the node with the given ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut RoutingNode> {
        self.nodes.get_mut(id.as_raw() as usize)
    }

    /// Returns the switch descriptor with the given ID.
    pub fn switch(&self, id: SwitchId) -> Option<&SwitchDescriptor> {
        self.switches.get(id.as_raw() as usize)
    }

    /// Returns the ordered fan-in of a node, or `None` for an invalid handle.
    pub fn fanin(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).map(|n| n.fanin.as_slice())
    }

    /// Returns the routing solution's chosen driver of a node.
    ///
    /// The outer `Option` distinguishes an invalid handle from a valid but
    /// unrouted node.
    pub fn selected_driver(&self, id: NodeId) -> Option<Option<NodeId>> {
        self.node(id).map(|n| n.selected_driver)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of switch descriptors in the library.
    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    /// Checks the structural integrity of the graph.
    ///
    /// A violation means the upstream graph builder produced inconsistent
    /// data — a bug, not an input problem — so failures are reported as
    /// [`InternalError`]s. Checked: every fan-in handle and switch handle
    /// resolves, each fan-in list has a parallel switch list, and every
    /// selected driver appears somewhere in the graph.
    pub fn validate(&self) -> WeftResult<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.fanin.len() != node.fanin_switches.len() {
                return Err(InternalError::new(format!(
                    "node {index}: fan-in list has {} entries but {} switches",
                    node.fanin.len(),
                    node.fanin_switches.len()
                )));
            }
            for &driver in &node.fanin {
                if self.node(driver).is_none() {
                    return Err(InternalError::new(format!(
                        "node {index}: fan-in driver {} does not resolve",
                        driver.as_raw()
                    )));
                }
            }
            for &switch in &node.fanin_switches {
                if self.switch(switch).is_none() {
                    return Err(InternalError::new(format!(
                        "node {index}: switch {} does not resolve",
                        switch.as_raw()
                    )));
                }
            }
            if let Some(selected) = node.selected_driver {
                if self.node(selected).is_none() {
                    return Err(InternalError::new(format!(
                        "node {index}: selected driver {} does not resolve",
                        selected.as_raw()
                    )));
                }
            }
        }
        Ok(())
    }
}
