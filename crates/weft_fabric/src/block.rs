//! Per-block synthesis: walking one switch or connection box.
//!
//! A block's configuration window must be one contiguous range, so the
//! block is walked twice in the same destination enumeration order: once
//! to *count* bits without touching the allocator, then — after the whole
//! window is allocated in one shot — once more to synthesize each
//! interconnect and fill in its sub-range. The sub-ranges are then checked
//! to exactly tile the window.

use crate::allocator::{BitRange, ConfigAllocator};
use crate::error::FabricError;
use crate::interconnect::{classify, InterconnectKind};
use crate::module::{
    block_ports, destination_port_name, input_port_name, module_name, ModuleDescriptor,
};
use crate::mux::{
    check_technology_support, destination_switch, synthesize_mux, MuxInstance, MuxTopology,
};
use serde::{Deserialize, Serialize};
use weft_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use weft_rrg::{BlockKind, BlockView, GridCoord, MemoryOrganization, PortRole, RoutingGraph};

/// The configuration-memory window of one physical block instance.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlockConfigWindow {
    /// The kind of the block.
    pub kind: BlockKind,
    /// The coordinate of the block.
    pub coord: GridCoord,
    /// Total configuration bits consumed by the block.
    pub config_bit_count: u32,
    /// Reserved (always-on) bits of the block: the maximum over its
    /// multiplexers, since reserved programming lines are shared rather
    /// than stacked.
    pub reserved_bit_count: u32,
    /// The block's absolute address range in configuration memory.
    pub range: BitRange,
}

/// A configuration-free wire inside a block: `assign output = input`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DirectConnection {
    /// The destination port.
    pub output: String,
    /// The source port.
    pub input: String,
}

/// One fully synthesized block module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlockModule {
    /// The module descriptor: name and ordered port list.
    pub module: ModuleDescriptor,
    /// The block's configuration window.
    pub window: BlockConfigWindow,
    /// Routing multiplexers, in destination enumeration order.
    pub muxes: Vec<MuxInstance>,
    /// Direct and pass-through wires, in destination enumeration order.
    pub directs: Vec<DirectConnection>,
}

/// Counts the configuration bits a block will consume, without mutating
/// any allocator state.
///
/// The sum over all multiplexer destinations of the per-width,
/// per-technology bit demand. Also validates that every multiplexer's
/// technology is supported under `organization`, so the counting pass
/// fails exactly where the synthesis pass would.
pub fn count_block_config_bits(
    graph: &RoutingGraph,
    block: &BlockView,
    organization: MemoryOrganization,
) -> Result<u32, FabricError> {
    let mut total = 0u32;
    for dest in block.destinations() {
        if let InterconnectKind::Mux { width } = classify(graph, block, &dest)? {
            let switch = destination_switch(graph, block, dest.node)?;
            check_technology_support(switch, organization, block)?;
            total += MuxTopology::new(width, switch.technology).num_config_bits();
        }
    }
    Ok(total)
}

/// Counts the reserved configuration bits of a block.
///
/// Reserved programming lines are shared across the block's multiplexers,
/// so the block-level count is the maximum over destinations, not the sum.
pub fn count_block_reserved_bits(
    graph: &RoutingGraph,
    block: &BlockView,
) -> Result<u32, FabricError> {
    let mut max = 0u32;
    for dest in block.destinations() {
        if let InterconnectKind::Mux { width } = classify(graph, block, &dest)? {
            let switch = destination_switch(graph, block, dest.node)?;
            let reserved = MuxTopology::new(width, switch.technology).num_reserved_bits();
            max = max.max(reserved);
        }
    }
    Ok(max)
}

/// Verifies that a block's multiplexer sub-ranges exactly tile its window.
///
/// Sub-ranges must be consecutive, gap-free, and end exactly at the
/// window's end. This invariant is proven after every block synthesis, not
/// trusted.
pub fn verify_window_tiling(
    kind: BlockKind,
    coord: GridCoord,
    muxes: &[MuxInstance],
    window: BitRange,
) -> Result<(), FabricError> {
    let mut expected = window.lsb();
    for mux in muxes {
        if mux.config_bits.lsb() != expected {
            return Err(FabricError::NonContiguousAllocation {
                block: kind,
                coord,
                expected,
                found: mux.config_bits.lsb(),
            });
        }
        expected = mux.config_bits.end();
    }
    if expected != window.end() {
        return Err(FabricError::NonContiguousAllocation {
            block: kind,
            coord,
            expected: window.end(),
            found: expected,
        });
    }
    Ok(())
}

/// Synthesizes one block: classifies every destination, builds its
/// interconnect, and allocates the block's contiguous configuration window.
///
/// Any classification or synthesis error aborts the block; no partial
/// results are emitted. A block with no multiplexers is valid and gets an
/// empty window.
pub fn synthesize_block(
    graph: &RoutingGraph,
    block: &BlockView,
    allocator: &mut ConfigAllocator,
    sink: &DiagnosticSink,
) -> Result<BlockModule, FabricError> {
    let organization = allocator.organization();

    // Counting pass, then one contiguous allocation for the whole block.
    let config_total = count_block_config_bits(graph, block, organization)?;
    let reserved_total = count_block_reserved_bits(graph, block)?;
    let range = allocator.allocate(config_total);

    // Synthesis pass, same enumeration order as the counting pass.
    let mut muxes = Vec::new();
    let mut directs = Vec::new();
    let mut cursor = range.lsb();
    let mut sequence = 0u32;
    for dest in block.destinations() {
        match classify(graph, block, &dest)? {
            InterconnectKind::Passthrough => {
                if let Some(wire) = passthrough_connection(graph, block, &dest, sink)? {
                    directs.push(wire);
                }
            }
            InterconnectKind::Direct => {
                let node = graph.node(dest.node).ok_or(FabricError::InvalidNodeHandle {
                    node: dest.node,
                    block: block.kind,
                    coord: block.coord,
                })?;
                let driver = node.fanin[0];
                directs.push(DirectConnection {
                    output: destination_port_name(graph, block, &dest)?,
                    input: input_port_name(graph, block, driver)?,
                });
            }
            InterconnectKind::Mux { .. } => {
                let mux =
                    synthesize_mux(graph, block, &dest, sequence, cursor, organization, sink)?;
                cursor = mux.config_bits.end();
                sequence += 1;
                muxes.push(mux);
            }
        }
    }

    verify_window_tiling(block.kind, block.coord, &muxes, range)?;
    debug_assert_eq!(cursor, range.end());

    let window = BlockConfigWindow {
        kind: block.kind,
        coord: block.coord,
        config_bit_count: config_total,
        reserved_bit_count: reserved_total,
        range,
    };
    let module = ModuleDescriptor {
        name: module_name(block.kind, block.coord),
        ports: block_ports(graph, block, organization, config_total, reserved_total)?,
    };

    Ok(BlockModule {
        module,
        window,
        muxes,
        directs,
    })
}

/// Builds the wire of a pass-through destination.
///
/// A switch-box pass-through shorts the destination to the continuing wire
/// on the opposite side — found by input lookup for a true passing wire,
/// or positionally (same track index, opposite side) for a dead end, which
/// is reported as a warning. A connection-box pin without drivers stays
/// unconnected and is recorded as a note.
fn passthrough_connection(
    graph: &RoutingGraph,
    block: &BlockView,
    dest: &weft_rrg::Destination,
    sink: &DiagnosticSink,
) -> Result<Option<DirectConnection>, FabricError> {
    let node = graph.node(dest.node).ok_or(FabricError::InvalidNodeHandle {
        node: dest.node,
        block: block.kind,
        coord: block.coord,
    })?;
    match block.kind {
        BlockKind::SwitchBox => {
            let input = if block.locate_input(dest.node).is_some() {
                input_port_name(graph, block, dest.node)?
            } else {
                sink.emit(
                    Diagnostic::warning(
                        DiagnosticCode::new(Category::Routing, 201),
                        "dead-end destination shorted to its opposite side",
                    )
                    .at(
                        Location::block(block.coord.x, block.coord.y, block.kind.name())
                            .with_node(dest.node.as_raw()),
                    ),
                );
                crate::module::track_port_name(
                    node.kind,
                    dest.side.opposite(),
                    PortRole::Input,
                    dest.index,
                )
            };
            Ok(Some(DirectConnection {
                output: destination_port_name(graph, block, dest)?,
                input,
            }))
        }
        BlockKind::ConnectionBoxX | BlockKind::ConnectionBoxY => {
            sink.emit(
                Diagnostic::note(
                    DiagnosticCode::new(Category::Routing, 202),
                    "input pin has no drivers and stays unconnected",
                )
                .at(
                    Location::block(block.coord.x, block.coord.y, block.kind.name())
                        .with_node(dest.node.as_raw()),
                ),
            );
            Ok(None)
        }
    }
}
