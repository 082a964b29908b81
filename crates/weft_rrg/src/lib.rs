//! Routing-resource-graph and device-grid data model for the Weft fabric generator.
//!
//! This crate defines the read-only input model consumed by the fabric
//! synthesis core (`weft_fabric`): routing nodes with ordered fan-in lists,
//! switch descriptors with their design technology, block views describing
//! the side/track/pin structure of switch boxes and connection boxes, and
//! the device grid with its unique/mirror block-shape classification.
//!
//! Construction of the graph and grid (and computation of block-shape
//! uniqueness) happens upstream; this crate only models the result and
//! offers the accessors the synthesis core needs.

#![warn(missing_docs)]

pub mod block;
pub mod geom;
pub mod grid;
pub mod ids;
pub mod node;
pub mod switch;

pub use block::{
    BlockKind, BlockSide, BlockView, Destination, InputSite, PortRole, SlotClass, TrackSlot,
};
pub use geom::{GridCoord, Side, TrackDirection};
pub use grid::{BlockShape, ChannelShape, DeviceGrid};
pub use ids::{NodeId, ShapeId, SwitchId};
pub use node::{NodeKind, RoutingGraph, RoutingNode};
pub use switch::{MemoryOrganization, SwitchDescriptor, Technology};
