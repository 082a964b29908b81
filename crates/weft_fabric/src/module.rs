//! Module and port descriptors handed to the external netlist writer.
//!
//! The core decides *what* modules and ports exist and in what order; the
//! surrounding tool renders them as netlist text. Port and module names are
//! deterministic functions of the fabric structure so mirrored blocks
//! instantiate their template with positionally identical port lists.

use crate::error::FabricError;
use serde::{Deserialize, Serialize};
use weft_rrg::{
    BlockKind, BlockView, Destination, GridCoord, InputSite, MemoryOrganization, NodeId, NodeKind,
    PortRole, RoutingGraph, RoutingNode, Side, SlotClass,
};

/// The direction of a module port.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PortDirection {
    /// The port is driven from outside the module.
    Input,
    /// The port drives out of the module.
    Output,
}

/// One port of an emitted module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortDescriptor {
    /// The port name.
    pub name: String,
    /// The port direction.
    pub direction: PortDirection,
    /// The port width in bits.
    pub width: u32,
}

impl PortDescriptor {
    /// Creates a single-bit port.
    pub fn bit(name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            width: 1,
        }
    }

    /// Creates a multi-bit port.
    pub fn bus(name: impl Into<String>, direction: PortDirection, width: u32) -> Self {
        Self {
            name: name.into(),
            direction,
            width,
        }
    }
}

/// An emitted module: its name and ordered port list.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// The module name.
    pub name: String,
    /// The ordered port list.
    pub ports: Vec<PortDescriptor>,
}

/// Returns the module name of a block: `sb_1_2`, `cbx_0_3`, `cby_2_2`.
pub fn module_name(kind: BlockKind, coord: GridCoord) -> String {
    format!("{}_{}_{}", kind.name(), coord.x, coord.y)
}

/// Returns the module name of a unique channel shape: `chanx_0`, `chany_3`.
pub fn channel_module_name(kind: NodeKind, shape_index: usize) -> String {
    format!("{}_{}", kind.name(), shape_index)
}

/// Returns the port name of a channel track at a switch-box side:
/// `chanx_left_in_3`, `chany_top_out_0`.
pub fn track_port_name(kind: NodeKind, side: Side, role: PortRole, index: usize) -> String {
    let dir = match role {
        PortRole::Input => "in",
        PortRole::Output => "out",
    };
    format!("{}_{}_{}_{}", kind.name(), side.name(), dir, index)
}

/// Returns the port name of a channel mid-point tap entering a connection
/// box: `chanx_mid_2`.
pub fn mid_port_name(kind: NodeKind, index: usize) -> String {
    format!("{}_mid_{}", kind.name(), index)
}

/// Returns the port name of a grid pin: `grid_1_2_right_pin_0`.
fn pin_port_name(position: GridCoord, side: Side, pin: u32) -> String {
    format!(
        "grid_{}_{}_{}_pin_{}",
        position.x,
        position.y,
        side.name(),
        pin
    )
}

fn invalid_handle(node: NodeId, block: &BlockView) -> FabricError {
    FabricError::InvalidNodeHandle {
        node,
        block: block.kind,
        coord: block.coord,
    }
}

/// Returns the port name of a grid-pin node, validating its side.
pub fn grid_pin_port_name(
    node_id: NodeId,
    node: &RoutingNode,
    block: &BlockView,
) -> Result<String, FabricError> {
    let side = node.pin_side.ok_or_else(|| invalid_handle(node_id, block))?;
    Ok(pin_port_name(node.position, side, node.index))
}

/// Returns the port name a driver node enters the block through.
///
/// Fails with [`FabricError::InvalidNodeHandle`] when the node does not
/// resolve or is not an input of the block.
pub fn input_port_name(
    graph: &RoutingGraph,
    block: &BlockView,
    node_id: NodeId,
) -> Result<String, FabricError> {
    let node = graph
        .node(node_id)
        .ok_or_else(|| invalid_handle(node_id, block))?;
    let site: InputSite = block
        .locate_input(node_id)
        .ok_or_else(|| invalid_handle(node_id, block))?;
    match site.class {
        SlotClass::Track => match block.kind {
            BlockKind::SwitchBox => Ok(track_port_name(
                node.kind,
                site.side,
                PortRole::Input,
                site.index,
            )),
            BlockKind::ConnectionBoxX | BlockKind::ConnectionBoxY => {
                Ok(mid_port_name(node.kind, site.index))
            }
        },
        SlotClass::GridPin => grid_pin_port_name(node_id, node, block),
    }
}

/// Returns the port name a destination node leaves the block through.
pub fn destination_port_name(
    graph: &RoutingGraph,
    block: &BlockView,
    dest: &Destination,
) -> Result<String, FabricError> {
    let node = graph
        .node(dest.node)
        .ok_or_else(|| invalid_handle(dest.node, block))?;
    match block.kind {
        BlockKind::SwitchBox => Ok(track_port_name(
            node.kind,
            dest.side,
            PortRole::Output,
            dest.index,
        )),
        BlockKind::ConnectionBoxX | BlockKind::ConnectionBoxY => {
            grid_pin_port_name(dest.node, node, block)
        }
    }
}

/// Returns the configuration ports of a block module.
///
/// A scan chain threads head-to-tail through the block; a memory bank
/// exposes bit-line/word-line buses of the window width plus the shared
/// reserved lines when present. A block with an empty window gets no
/// configuration ports.
pub fn config_ports(
    organization: MemoryOrganization,
    config_width: u32,
    reserved_width: u32,
) -> Vec<PortDescriptor> {
    let mut ports = Vec::new();
    if config_width == 0 {
        return ports;
    }
    match organization {
        MemoryOrganization::ScanChain => {
            ports.push(PortDescriptor::bit("ccff_head", PortDirection::Input));
            ports.push(PortDescriptor::bit("ccff_tail", PortDirection::Output));
        }
        MemoryOrganization::MemoryBank => {
            if reserved_width > 0 {
                ports.push(PortDescriptor::bus(
                    "reserved_bl",
                    PortDirection::Input,
                    reserved_width,
                ));
                ports.push(PortDescriptor::bus(
                    "reserved_wl",
                    PortDirection::Input,
                    reserved_width,
                ));
            }
            ports.push(PortDescriptor::bus("bl", PortDirection::Input, config_width));
            ports.push(PortDescriptor::bus("wl", PortDirection::Input, config_width));
        }
    }
    ports
}

/// Builds the full ordered port list of a block module.
///
/// Boundary ports come first, walked side by side in the block's side
/// order: channel track ports (direction per role for switch boxes,
/// mid-point taps for connection boxes), then the side's grid pins.
/// Configuration ports come last.
pub fn block_ports(
    graph: &RoutingGraph,
    block: &BlockView,
    organization: MemoryOrganization,
    config_width: u32,
    reserved_width: u32,
) -> Result<Vec<PortDescriptor>, FabricError> {
    let mut ports = Vec::new();
    for side in &block.sides {
        for (index, slot) in side.tracks.iter().enumerate() {
            let node = graph
                .node(slot.node)
                .ok_or_else(|| invalid_handle(slot.node, block))?;
            match block.kind {
                BlockKind::SwitchBox => {
                    let direction = match slot.role {
                        PortRole::Input => PortDirection::Input,
                        PortRole::Output => PortDirection::Output,
                    };
                    ports.push(PortDescriptor::bit(
                        track_port_name(node.kind, side.side, slot.role, index),
                        direction,
                    ));
                }
                BlockKind::ConnectionBoxX | BlockKind::ConnectionBoxY => {
                    ports.push(PortDescriptor::bit(
                        mid_port_name(node.kind, index),
                        PortDirection::Input,
                    ));
                }
            }
        }
        for &pin in &side.grid_pins {
            let node = graph.node(pin).ok_or_else(|| invalid_handle(pin, block))?;
            let name = grid_pin_port_name(pin, node, block)?;
            let direction = match block.kind {
                // Logic-block outputs feed a switch box; connection boxes
                // drive logic-block inputs.
                BlockKind::SwitchBox => PortDirection::Input,
                BlockKind::ConnectionBoxX | BlockKind::ConnectionBoxY => PortDirection::Output,
            };
            ports.push(PortDescriptor::bit(name, direction));
        }
    }
    ports.extend(config_ports(organization, config_width, reserved_width));
    Ok(ports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_rrg::{BlockSide, TrackSlot};

    #[test]
    fn module_names() {
        assert_eq!(
            module_name(BlockKind::SwitchBox, GridCoord::new(1, 2)),
            "sb_1_2"
        );
        assert_eq!(
            module_name(BlockKind::ConnectionBoxX, GridCoord::new(0, 3)),
            "cbx_0_3"
        );
        assert_eq!(channel_module_name(NodeKind::ChanY, 4), "chany_4");
    }

    #[test]
    fn track_port_names() {
        assert_eq!(
            track_port_name(NodeKind::ChanX, Side::Left, PortRole::Input, 3),
            "chanx_left_in_3"
        );
        assert_eq!(
            track_port_name(NodeKind::ChanY, Side::Top, PortRole::Output, 0),
            "chany_top_out_0"
        );
        assert_eq!(mid_port_name(NodeKind::ChanX, 2), "chanx_mid_2");
    }

    #[test]
    fn scan_chain_config_ports() {
        let ports = config_ports(MemoryOrganization::ScanChain, 8, 0);
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].name, "ccff_head");
        assert_eq!(ports[0].direction, PortDirection::Input);
        assert_eq!(ports[1].name, "ccff_tail");
        assert_eq!(ports[1].direction, PortDirection::Output);
    }

    #[test]
    fn memory_bank_config_ports() {
        let ports = config_ports(MemoryOrganization::MemoryBank, 8, 3);
        let names: Vec<&str> = ports.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["reserved_bl", "reserved_wl", "bl", "wl"]);
        assert_eq!(ports[0].width, 3);
        assert_eq!(ports[2].width, 8);
    }

    #[test]
    fn empty_window_has_no_config_ports() {
        assert!(config_ports(MemoryOrganization::ScanChain, 0, 0).is_empty());
        assert!(config_ports(MemoryOrganization::MemoryBank, 0, 5).is_empty());
    }

    fn small_graph_and_sb() -> (RoutingGraph, BlockView) {
        let mut graph = RoutingGraph::new();
        let wire_in =
            graph.add_node(RoutingNode::channel(NodeKind::ChanX, GridCoord::new(0, 1), 0));
        let wire_out =
            graph.add_node(RoutingNode::channel(NodeKind::ChanX, GridCoord::new(1, 1), 0));
        let opin = graph.add_node(RoutingNode::pin(
            NodeKind::OutputPin,
            GridCoord::new(1, 1),
            Side::Right,
            2,
        ));

        let mut left = BlockSide::new(Side::Left);
        left.tracks.push(TrackSlot {
            node: wire_in,
            role: PortRole::Input,
        });
        left.grid_pins.push(opin);
        let mut right = BlockSide::new(Side::Right);
        right.tracks.push(TrackSlot {
            node: wire_out,
            role: PortRole::Output,
        });
        let block = BlockView::new(BlockKind::SwitchBox, GridCoord::new(1, 1))
            .with_side(right)
            .with_side(left);
        (graph, block)
    }

    #[test]
    fn input_port_names_resolve() {
        let (graph, block) = small_graph_and_sb();
        let wire_in = NodeId::from_raw(0);
        let opin = NodeId::from_raw(2);
        assert_eq!(
            input_port_name(&graph, &block, wire_in).unwrap(),
            "chanx_left_in_0"
        );
        assert_eq!(
            input_port_name(&graph, &block, opin).unwrap(),
            "grid_1_1_right_pin_2"
        );
    }

    #[test]
    fn input_port_name_rejects_non_input() {
        let (graph, block) = small_graph_and_sb();
        let wire_out = NodeId::from_raw(1);
        let err = input_port_name(&graph, &block, wire_out).unwrap_err();
        assert!(matches!(err, FabricError::InvalidNodeHandle { .. }));
    }

    #[test]
    fn destination_port_names_resolve() {
        let (graph, block) = small_graph_and_sb();
        let dest = block.destinations()[0];
        assert_eq!(
            destination_port_name(&graph, &block, &dest).unwrap(),
            "chanx_right_out_0"
        );
    }

    #[test]
    fn block_ports_walk_sides_then_config() {
        let (graph, block) = small_graph_and_sb();
        let ports = block_ports(&graph, &block, MemoryOrganization::ScanChain, 2, 0).unwrap();
        let names: Vec<&str> = ports.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "chanx_right_out_0",
                "chanx_left_in_0",
                "grid_1_1_right_pin_2",
                "ccff_head",
                "ccff_tail",
            ]
        );
        assert_eq!(ports[0].direction, PortDirection::Output);
        assert_eq!(ports[2].direction, PortDirection::Input);
    }

    #[test]
    fn connection_box_ports() {
        let mut graph = RoutingGraph::new();
        let tap = graph.add_node(RoutingNode::channel(NodeKind::ChanX, GridCoord::new(1, 0), 0));
        let ipin = graph.add_node(RoutingNode::pin(
            NodeKind::InputPin,
            GridCoord::new(1, 1),
            Side::Bottom,
            0,
        ));
        let mut chan = BlockSide::new(Side::Bottom);
        chan.tracks.push(TrackSlot {
            node: tap,
            role: PortRole::Input,
        });
        let mut pins = BlockSide::new(Side::Top);
        pins.grid_pins.push(ipin);
        let block = BlockView::new(BlockKind::ConnectionBoxX, GridCoord::new(1, 0))
            .with_side(chan)
            .with_side(pins);

        let ports = block_ports(&graph, &block, MemoryOrganization::MemoryBank, 4, 2).unwrap();
        let names: Vec<&str> = ports.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "chanx_mid_0",
                "grid_1_1_bottom_pin_0",
                "reserved_bl",
                "reserved_wl",
                "bl",
                "wl",
            ]
        );
        assert_eq!(ports[1].direction, PortDirection::Output);
    }

    #[test]
    fn serde_roundtrip() {
        let module = ModuleDescriptor {
            name: "sb_0_0".to_string(),
            ports: vec![PortDescriptor::bit("chanx_left_in_0", PortDirection::Input)],
        };
        let json = serde_json::to_string(&module).unwrap();
        let back: ModuleDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(module, back);
    }
}
