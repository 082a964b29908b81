//! Routing-fabric synthesis core for the Weft FPGA fabric generator.
//!
//! This crate takes a routing-resource graph and device grid (from
//! `weft_rrg`) and decides the structural contents of every switch block
//! and connection block: which destinations are pass-throughs, direct
//! wires, or routing multiplexers; how each multiplexer is wired and
//! encoded; and which contiguous configuration-memory window every block
//! instance owns.
//!
//! # Pipeline
//!
//! 1. **Classify** — each destination's fan-in decides its interconnect
//!    shape ([`InterconnectKind`])
//! 2. **Synthesize** — multiplexer instances with ports in fan-in order
//!    and technology-specific bit demand ([`MuxTopology`])
//! 3. **Encode** — the configuration pattern steering each selected path
//!    ([`ConfigPattern`])
//! 4. **Allocate** — one contiguous window per block from the sequential
//!    bit ledger ([`ConfigAllocator`])
//! 5. **Coordinate** — unique module templates under snapshot/restore,
//!    then per-instance window accounting in raster order
//!    ([`synthesize_fabric`])
//!
//! # Usage
//!
//! ```ignore
//! use weft_fabric::{synthesize_fabric, SynthesisOptions};
//!
//! let options = SynthesisOptions::from(&config);
//! let plan = synthesize_fabric(&graph, &grid, options, &sink)?;
//! assert_eq!(plan.windows.len(), physical_block_count);
//! ```

#![warn(missing_docs)]

pub mod allocator;
pub mod block;
pub mod channel;
pub mod dedup;
pub mod encode;
pub mod error;
pub mod interconnect;
pub mod module;
pub mod mux;

pub use allocator::{AllocatorSnapshot, BitRange, ConfigAllocator};
pub use block::{
    count_block_config_bits, count_block_reserved_bits, synthesize_block, verify_window_tiling,
    BlockConfigWindow, BlockModule, DirectConnection,
};
pub use channel::{build_channel_module, ChannelModule};
pub use dedup::{synthesize_fabric, FabricPlan, SynthesisOptions};
pub use encode::{decode_path, encode_path, ConfigPattern};
pub use error::FabricError;
pub use interconnect::{classify, InterconnectKind};
pub use module::{
    block_ports, config_ports, module_name, ModuleDescriptor, PortDescriptor, PortDirection,
};
pub use mux::{synthesize_mux, MuxInstance, MuxTopology, PortWire};
