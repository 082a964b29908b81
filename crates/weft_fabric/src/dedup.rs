//! The deduplication coordinator: template emission and instance accounting.
//!
//! With a compact hierarchy, each unique block shape is synthesized once as
//! a module template under a snapshot/restore bracket (so the template pass
//! never advances global bit addresses), then every physical instance —
//! unique or mirror — gets its own contiguous window from the real
//! allocator in raster order. Deduplication saves netlist emission, never
//! bit-address space.
//!
//! The instance pass recounts every block with the same counting function
//! the template pass used and proves the counts equal; a disagreement
//! aborts the run. With the compact hierarchy disabled, every instance is
//! synthesized as its own module in the same raster order with the same
//! accounting, so the window table is identical either way.

use crate::allocator::ConfigAllocator;
use crate::block::{
    count_block_config_bits, count_block_reserved_bits, synthesize_block, BlockConfigWindow,
    BlockModule,
};
use crate::channel::{build_channel_module, ChannelModule};
use crate::error::FabricError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use weft_config::GenerationConfig;
use weft_diagnostics::DiagnosticSink;
use weft_rrg::{
    BlockKind, BlockView, DeviceGrid, GridCoord, MemoryOrganization, RoutingGraph, ShapeId,
};

/// Options controlling one fabric synthesis run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// The configuration-memory organization.
    pub organization: MemoryOrganization,
    /// Whether to emit only unique block modules. Bit addressing is
    /// identical whether or not this is enabled.
    pub compact_hierarchy: bool,
}

impl SynthesisOptions {
    /// Creates synthesis options.
    pub fn new(organization: MemoryOrganization, compact_hierarchy: bool) -> Self {
        Self {
            organization,
            compact_hierarchy,
        }
    }
}

impl From<&GenerationConfig> for SynthesisOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            organization: config.fabric.organization,
            compact_hierarchy: config.fabric.compact_hierarchy,
        }
    }
}

/// The complete output of one fabric synthesis run.
///
/// Consumed by the external netlist writer (modules) and the downstream
/// bitstream generator (windows, patterns inside the modules, totals).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FabricPlan {
    /// Emitted block modules: one template per unique shape under the
    /// compact hierarchy, or one module per physical instance otherwise.
    /// Ordered switch boxes first, then X- and Y-connection boxes.
    pub modules: Vec<BlockModule>,
    /// The configuration window of every physical block instance, in
    /// allocation order.
    pub windows: Vec<BlockConfigWindow>,
    /// Routing-channel modules, one per unique channel shape.
    pub channels: Vec<ChannelModule>,
    /// Total configuration bits of the device.
    pub total_config_bits: u32,
    /// Total bit-lines consumed (memory bank only).
    pub total_bit_lines: u32,
    /// Total word-lines consumed (memory bank only).
    pub total_word_lines: u32,
}

impl FabricPlan {
    /// Looks up the window of the block of `kind` at `coord`.
    pub fn window_of(&self, coord: GridCoord, kind: BlockKind) -> Option<&BlockConfigWindow> {
        self.windows
            .iter()
            .find(|w| w.coord == coord && w.kind == kind)
    }
}

/// Synthesizes the whole routing fabric of a device.
///
/// Strictly sequential, in one fixed order: routing channels, then every
/// unique module template (switch boxes, X-connection boxes, Y-connection
/// boxes, each in shape-ID order), then every physical instance (switch
/// boxes in raster order, then connection boxes in raster order with X
/// before Y at each coordinate). Every configuration-bit address depends
/// on the cumulative count of everything allocated before it, so no step
/// may be reordered.
pub fn synthesize_fabric(
    graph: &RoutingGraph,
    grid: &DeviceGrid,
    options: SynthesisOptions,
    sink: &DiagnosticSink,
) -> Result<FabricPlan, FabricError> {
    let mut allocator = ConfigAllocator::new(options.organization);
    let mut modules = Vec::new();
    let mut windows = Vec::new();

    let channels = grid
        .channel_shapes()
        .iter()
        .enumerate()
        .map(|(index, shape)| build_channel_module(index, shape))
        .collect();

    if options.compact_hierarchy {
        let mut template_bits: BTreeMap<(BlockKind, ShapeId), u32> = BTreeMap::new();

        // Template pass: every unique shape, under snapshot/restore, before
        // any instance advances the real allocator. All templates are laid
        // out from address 0.
        for kind in [
            BlockKind::SwitchBox,
            BlockKind::ConnectionBoxX,
            BlockKind::ConnectionBoxY,
        ] {
            emit_templates(
                graph,
                grid,
                kind,
                &mut allocator,
                &mut modules,
                &mut template_bits,
                sink,
            )?;
        }

        // Instance pass: real windows in raster order.
        for view in grid.raster_blocks(BlockKind::SwitchBox) {
            windows.push(account_instance(
                graph,
                grid,
                view,
                &template_bits,
                &mut allocator,
            )?);
        }
        for view in connection_box_raster(grid) {
            windows.push(account_instance(
                graph,
                grid,
                view,
                &template_bits,
                &mut allocator,
            )?);
        }
    } else {
        for view in grid.raster_blocks(BlockKind::SwitchBox) {
            let module = synthesize_block(graph, view, &mut allocator, sink)?;
            windows.push(module.window.clone());
            modules.push(module);
        }
        for view in connection_box_raster(grid) {
            let module = synthesize_block(graph, view, &mut allocator, sink)?;
            windows.push(module.window.clone());
            modules.push(module);
        }
    }

    Ok(FabricPlan {
        modules,
        windows,
        channels,
        total_config_bits: allocator.bit_count(),
        total_bit_lines: allocator.bit_lines(),
        total_word_lines: allocator.word_lines(),
    })
}

/// Emits the module template of every unique shape of `kind`, in shape-ID
/// order.
///
/// Each template is synthesized inside a snapshot/restore bracket, so all
/// templates are laid out from the same base address (0 on a fresh run)
/// and the allocator is observably unchanged after the pass. Brackets are
/// flat and strictly nested; block hierarchies are one level deep.
fn emit_templates(
    graph: &RoutingGraph,
    grid: &DeviceGrid,
    kind: BlockKind,
    allocator: &mut ConfigAllocator,
    modules: &mut Vec<BlockModule>,
    template_bits: &mut BTreeMap<(BlockKind, ShapeId), u32>,
    sink: &DiagnosticSink,
) -> Result<(), FabricError> {
    for (shape_id, view) in grid.unique_blocks(kind) {
        let saved = allocator.snapshot();
        let module = synthesize_block(graph, view, allocator, sink)?;
        allocator.restore(&saved);
        template_bits.insert((kind, shape_id), module.window.config_bit_count);
        modules.push(module);
    }
    Ok(())
}

/// Returns every connection-box instance in raster order, X before Y at
/// each coordinate.
fn connection_box_raster(grid: &DeviceGrid) -> Vec<&BlockView> {
    let mut views = grid.raster_blocks(BlockKind::ConnectionBoxX);
    views.extend(grid.raster_blocks(BlockKind::ConnectionBoxY));
    views.sort_by_key(|b| (b.coord.y, b.coord.x, b.kind));
    views
}

/// Allocates the real window of one physical block instance.
///
/// Recomputes the instance's bit count with the same counting function the
/// template pass used and proves it equal to the count recorded for the
/// instance's shape; a mirror that cannot be cross-checked against an
/// emitted template is an inconsistency as well.
fn account_instance(
    graph: &RoutingGraph,
    grid: &DeviceGrid,
    view: &BlockView,
    template_bits: &BTreeMap<(BlockKind, ShapeId), u32>,
    allocator: &mut ConfigAllocator,
) -> Result<BlockConfigWindow, FabricError> {
    let counted = count_block_config_bits(graph, view, allocator.organization())?;
    let reserved = count_block_reserved_bits(graph, view)?;

    if let Some(shape) = grid.shape_of(view.coord, view.kind) {
        match template_bits.get(&(view.kind, shape.shape_id())) {
            Some(&template) if template == counted => {}
            Some(&template) => {
                return Err(FabricError::BitCountMismatch {
                    block: view.kind,
                    coord: view.coord,
                    template_bits: template,
                    counted_bits: counted,
                });
            }
            None => {
                return Err(FabricError::BitCountMismatch {
                    block: view.kind,
                    coord: view.coord,
                    template_bits: 0,
                    counted_bits: counted,
                });
            }
        }
    }

    let range = allocator.allocate(counted);
    Ok(BlockConfigWindow {
        kind: view.kind,
        coord: view.coord,
        config_bit_count: counted,
        reserved_bit_count: reserved,
        range,
    })
}
