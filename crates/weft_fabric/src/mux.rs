//! Routing-multiplexer synthesis.
//!
//! [`MuxTopology`] is the single source of truth for a multiplexer's
//! internal decomposition: the structural synthesizer sizes ports and bit
//! demand from it, and the path encoder derives bit patterns from it, so
//! bit semantics always match wiring. [`synthesize_mux`] builds one
//! structural multiplexer instance for a destination node, with input
//! ports in fan-in order.

use crate::allocator::BitRange;
use crate::encode::{encode_path, ConfigPattern};
use crate::error::FabricError;
use serde::{Deserialize, Serialize};
use weft_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use weft_rrg::{
    BlockView, Destination, MemoryOrganization, NodeId, RoutingGraph, SwitchDescriptor, Technology,
};

/// The internal decomposition of a routing multiplexer.
///
/// For a given width and technology the decomposition — and therefore the
/// configuration-bit demand — is a pure function, identical whether the
/// multiplexer is part of a unique module template or a direct instance.
/// Downstream bitstream sizing depends on that invariance.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MuxTopology {
    width: usize,
    technology: Technology,
}

impl MuxTopology {
    /// Creates the topology of a `width`-input multiplexer.
    ///
    /// `width` must be at least 2 — smaller fan-ins never synthesize a
    /// multiplexer.
    pub fn new(width: usize, technology: Technology) -> Self {
        debug_assert!(width >= 2);
        Self { width, technology }
    }

    /// Returns the number of inputs.
    pub fn width(self) -> usize {
        self.width
    }

    /// Returns the design technology.
    pub fn technology(self) -> Technology {
        self.technology
    }

    /// Returns the number of selection stages.
    ///
    /// A CMOS multiplexer is a binary tree with `ceil(log2(width))` levels
    /// and one selector bit per level; inputs attach at the leaf matching
    /// their index. An RRAM multiplexer is a single-level crosspoint array.
    pub fn levels(self) -> usize {
        match self.technology {
            Technology::Cmos => (usize::BITS - (self.width - 1).leading_zeros()) as usize,
            Technology::Rram => 1,
        }
    }

    /// Returns the number of configuration bits this multiplexer consumes.
    ///
    /// Monotonically non-decreasing in `width` for a fixed technology.
    pub fn num_config_bits(self) -> u32 {
        match self.technology {
            Technology::Cmos => self.levels() as u32,
            // Bit-line and word-line halves, one entry per input column
            // plus the output row.
            Technology::Rram => 2 * (self.width as u32 + 1),
        }
    }

    /// Returns the number of reserved (always-on) configuration bits.
    ///
    /// CMOS multiplexers have none; RRAM crosspoints share `width + 1`
    /// programming lines that the memory bank must keep asserted.
    pub fn num_reserved_bits(self) -> u32 {
        match self.technology {
            Technology::Cmos => 0,
            Technology::Rram => self.width as u32 + 1,
        }
    }
}

/// One port connection of a multiplexer instance.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortWire {
    /// The block port the connection attaches to.
    pub port: String,
    /// The routing node carried by the port.
    pub node: NodeId,
}

/// One structural routing-multiplexer instance inside a block module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MuxInstance {
    /// The destination node this multiplexer drives.
    pub destination: NodeId,
    /// The sequence index of this multiplexer within its block.
    pub sequence: u32,
    /// The number of inputs.
    pub width: usize,
    /// The design technology of the switch implementing this multiplexer.
    pub technology: Technology,
    /// The 0-based fan-in position the routing solution selects.
    pub selected_input: usize,
    /// Input connections, in fan-in order: input *i* wires to the *i*-th
    /// driver's egress port.
    pub inputs: Vec<PortWire>,
    /// The output connection to the destination's port.
    pub output: PortWire,
    /// This instance's configuration bits within its block's window.
    pub config_bits: BitRange,
    /// Reserved (always-on) bits consumed by this instance.
    pub reserved_bits: u32,
    /// The encoded pattern steering `selected_input` to the output.
    pub pattern: ConfigPattern,
}

impl MuxInstance {
    /// Returns the instance name used by the netlist writer:
    /// `mux_size4_2` for the third multiplexer of a block, 4 inputs wide.
    pub fn instance_name(&self) -> String {
        format!("mux_size{}_{}", self.width, self.sequence)
    }
}

/// Resolves the switch descriptor of a destination's interconnect.
///
/// Exactly one technology applies per destination node: the switch of the
/// first fan-in edge governs the whole multiplexer.
pub fn destination_switch<'a>(
    graph: &'a RoutingGraph,
    block: &BlockView,
    node_id: NodeId,
) -> Result<&'a SwitchDescriptor, FabricError> {
    let invalid = || FabricError::InvalidNodeHandle {
        node: node_id,
        block: block.kind,
        coord: block.coord,
    };
    let node = graph.node(node_id).ok_or_else(invalid)?;
    let switch_id = node.fanin_switches.first().copied().ok_or_else(invalid)?;
    graph.switch(switch_id).ok_or_else(invalid)
}

/// Checks that a switch technology can be configured under the run's
/// memory organization.
///
/// RRAM crosspoints program through shared bit-line/word-line pairs, which
/// only exist in the memory-bank organization.
pub fn check_technology_support(
    switch: &SwitchDescriptor,
    organization: MemoryOrganization,
    block: &BlockView,
) -> Result<(), FabricError> {
    if switch.technology == Technology::Rram && organization == MemoryOrganization::ScanChain {
        return Err(FabricError::UnsupportedTechnology {
            switch: switch.name.clone(),
            technology: switch.technology,
            organization,
            block: block.kind,
            coord: block.coord,
        });
    }
    Ok(())
}

/// Synthesizes the routing multiplexer driving one destination node.
///
/// The destination must have fan-in ≥ 2 (the classifier guarantees this).
/// `window_lsb` is where this instance's sub-range starts inside the
/// block's window; the caller advances it by the returned instance's
/// configuration-bit width.
pub fn synthesize_mux(
    graph: &RoutingGraph,
    block: &BlockView,
    dest: &Destination,
    sequence: u32,
    window_lsb: u32,
    organization: MemoryOrganization,
    sink: &DiagnosticSink,
) -> Result<MuxInstance, FabricError> {
    let invalid = || FabricError::InvalidNodeHandle {
        node: dest.node,
        block: block.kind,
        coord: block.coord,
    };
    let node = graph.node(dest.node).ok_or_else(invalid)?;
    debug_assert!(node.fanin.len() >= 2);

    let switch = destination_switch(graph, block, dest.node)?;
    check_technology_support(switch, organization, block)?;

    let topology = MuxTopology::new(node.fanin.len(), switch.technology);

    // Resolve which fan-in position the routing solution selects.
    let selected_input = match node.selected_driver {
        Some(driver) => node.fanin.iter().position(|&d| d == driver).ok_or(
            FabricError::SelectedDriverNotInFanIn {
                node: dest.node,
                driver,
                block: block.kind,
                coord: block.coord,
            },
        )?,
        None => {
            sink.emit(
                Diagnostic::note(
                    DiagnosticCode::new(Category::Routing, 101),
                    "unused multiplexer left on default path 0",
                )
                .at(Location::block(block.coord.x, block.coord.y, block.kind.name())
                    .with_node(dest.node.as_raw())),
            );
            0
        }
    };

    let inputs = node
        .fanin
        .iter()
        .map(|&driver| {
            Ok(PortWire {
                port: crate::module::input_port_name(graph, block, driver)?,
                node: driver,
            })
        })
        .collect::<Result<Vec<_>, FabricError>>()?;

    let output = PortWire {
        port: crate::module::destination_port_name(graph, block, dest)?,
        node: dest.node,
    };

    Ok(MuxInstance {
        destination: dest.node,
        sequence,
        width: topology.width(),
        technology: topology.technology(),
        selected_input,
        inputs,
        output,
        config_bits: BitRange::new(window_lsb, topology.num_config_bits()),
        reserved_bits: topology.num_reserved_bits(),
        pattern: encode_path(&topology, selected_input),
    })
}
