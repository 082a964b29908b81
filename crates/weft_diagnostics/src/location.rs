//! Fabric locations that anchor diagnostics to a place on the device.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where on the fabric a diagnostic applies.
///
/// The generator has no source files, so diagnostics point at device-grid
/// coordinates instead of text spans. The optional `block` field names the
/// block kind at that coordinate (e.g., `"sb"`, `"cbx"`), and the optional
/// `node` field identifies the routing node involved.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// Grid column of the block this diagnostic refers to.
    pub x: u32,
    /// Grid row of the block this diagnostic refers to.
    pub y: u32,
    /// Short block-kind name (`"sb"`, `"cbx"`, `"cby"`), if block-specific.
    pub block: Option<String>,
    /// Raw routing-node index, if node-specific.
    pub node: Option<u32>,
}

impl Location {
    /// Creates a location pointing at a whole grid coordinate.
    pub fn grid(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            block: None,
            node: None,
        }
    }

    /// Creates a location pointing at a specific block kind at a coordinate.
    pub fn block(x: u32, y: u32, block: impl Into<String>) -> Self {
        Self {
            x,
            y,
            block: Some(block.into()),
            node: None,
        }
    }

    /// Narrows this location to a specific routing node.
    pub fn with_node(mut self, node: u32) -> Self {
        self.node = Some(node);
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block {
            Some(block) => write!(f, "{}[{}][{}]", block, self.x, self.y)?,
            None => write!(f, "[{}][{}]", self.x, self.y)?,
        }
        if let Some(node) = self.node {
            write!(f, " node {node}")?;
        }
        Ok(())
    }
}
