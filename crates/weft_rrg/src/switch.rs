//! Switch descriptors and configuration-memory organization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The circuit design technology of a programmable switch.
///
/// This is a closed set: every consumer matches exhaustively, so adding a
/// technology is a compile-visible change rather than a runtime fallthrough.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Technology {
    /// CMOS pass-gate tree multiplexer configured by SRAM cells.
    Cmos,
    /// Resistive-memory (RRAM) crosspoint multiplexer programmed through
    /// shared bit-lines and word-lines.
    Rram,
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technology::Cmos => write!(f, "CMOS"),
            Technology::Rram => write!(f, "RRAM"),
        }
    }
}

/// How the device's configuration memory is organized.
///
/// The organization determines the accounting rules of the bit allocator:
/// a scan chain is a single shift register addressed by position, while a
/// memory bank addresses bits through bit-line/word-line pairs and supports
/// reserved (always-on) programming lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryOrganization {
    /// A single configuration shift-register chain.
    ScanChain,
    /// An addressable memory bank with bit-line/word-line decoding.
    MemoryBank,
}

impl fmt::Display for MemoryOrganization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryOrganization::ScanChain => write!(f, "scan-chain"),
            MemoryOrganization::MemoryBank => write!(f, "memory-bank"),
        }
    }
}

/// A programmable switch model from the architecture's switch library.
///
/// Exactly one switch descriptor applies per destination node: the routing
/// graph builder records the switch of each fan-in edge, and a multiplexer
/// uses the switch of its first edge for the whole structure.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SwitchDescriptor {
    /// Human-readable switch name from the architecture description.
    pub name: String,
    /// The design technology of this switch.
    pub technology: Technology,
}

impl SwitchDescriptor {
    /// Creates a new switch descriptor.
    pub fn new(name: impl Into<String>, technology: Technology) -> Self {
        Self {
            name: name.into(),
            technology,
        }
    }
}
