//! The device grid: block instances, shape classification, channel shapes.
//!
//! The grid holds every physical block instance together with its
//! unique/mirror classification, which the upstream builder computes by
//! comparing block internals. The synthesis core only consumes the
//! classification; it never decides uniqueness itself.

use crate::block::{BlockKind, BlockView};
use crate::geom::{GridCoord, TrackDirection};
use crate::ids::ShapeId;
use crate::node::NodeKind;
use serde::{Deserialize, Serialize};

/// The shape classification of one physical block instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BlockShape {
    /// The canonical instance of its shape; a module template is emitted
    /// for it.
    Unique(ShapeId),
    /// Structurally identical to the canonical instance of the given shape;
    /// no template is emitted, but the instance still owns its own
    /// configuration-bit window.
    Mirror(ShapeId),
}

impl BlockShape {
    /// Returns the shape ID, canonical or mirrored.
    pub fn shape_id(self) -> ShapeId {
        match self {
            BlockShape::Unique(id) | BlockShape::Mirror(id) => id,
        }
    }

    /// Returns `true` if this instance is the canonical one for its shape.
    pub fn is_unique(self) -> bool {
        matches!(self, BlockShape::Unique(_))
    }
}

/// One unique routing-channel shape: the per-track directions of a channel.
///
/// Channels with the same axis and track-direction sequence share one
/// module; the builder deduplicates them and the grid stores only the
/// unique shapes, in shape order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChannelShape {
    /// The channel axis (`ChanX` or `ChanY`).
    pub kind: NodeKind,
    /// Per-track direction, in track-index order.
    pub directions: Vec<TrackDirection>,
}

impl ChannelShape {
    /// Creates a channel shape.
    pub fn new(kind: NodeKind, directions: Vec<TrackDirection>) -> Self {
        debug_assert!(kind.is_channel());
        Self { kind, directions }
    }

    /// Returns the channel width (number of tracks).
    pub fn width(&self) -> usize {
        self.directions.len()
    }
}

/// The device grid: every physical block instance plus channel shapes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceGrid {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    blocks: Vec<(BlockView, BlockShape)>,
    channels: Vec<ChannelShape>,
}

impl DeviceGrid {
    /// Creates an empty grid of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Adds a block instance with its shape classification.
    pub fn add_block(&mut self, view: BlockView, shape: BlockShape) {
        self.blocks.push((view, shape));
    }

    /// Adds a unique channel shape and returns its index.
    pub fn add_channel_shape(&mut self, shape: ChannelShape) -> usize {
        self.channels.push(shape);
        self.channels.len() - 1
    }

    /// Returns the unique channel shapes in shape order.
    pub fn channel_shapes(&self) -> &[ChannelShape] {
        &self.channels
    }

    /// Returns the block of the given kind at a coordinate, if present.
    pub fn block(&self, coord: GridCoord, kind: BlockKind) -> Option<&BlockView> {
        self.blocks
            .iter()
            .find(|(b, _)| b.coord == coord && b.kind == kind)
            .map(|(b, _)| b)
    }

    /// Returns the shape classification of the block at a coordinate.
    pub fn shape_of(&self, coord: GridCoord, kind: BlockKind) -> Option<BlockShape> {
        self.blocks
            .iter()
            .find(|(b, _)| b.coord == coord && b.kind == kind)
            .map(|(_, s)| *s)
    }

    /// Returns all blocks of a kind in device raster order (row-major:
    /// row by row from the bottom, left to right within a row).
    ///
    /// This is the instance-accounting order; every configuration-bit
    /// address depends on it being stable.
    pub fn raster_blocks(&self, kind: BlockKind) -> Vec<&BlockView> {
        let mut views: Vec<&BlockView> = self
            .blocks
            .iter()
            .filter(|(b, _)| b.kind == kind)
            .map(|(b, _)| b)
            .collect();
        views.sort_by_key(|b| (b.coord.y, b.coord.x));
        views
    }

    /// Returns the canonical block of every unique shape of a kind, in
    /// shape-ID order.
    ///
    /// This is the template-emission order of the deduplicated hierarchy.
    pub fn unique_blocks(&self, kind: BlockKind) -> Vec<(ShapeId, &BlockView)> {
        let mut uniques: Vec<(ShapeId, &BlockView)> = self
            .blocks
            .iter()
            .filter(|(b, s)| b.kind == kind && s.is_unique())
            .map(|(b, s)| (s.shape_id(), b))
            .collect();
        uniques.sort_by_key(|(id, _)| *id);
        uniques
    }

    /// Returns the total number of block instances on the grid.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
