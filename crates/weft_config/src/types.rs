//! Strongly-typed representation of `weft.toml`.

use serde::{Deserialize, Serialize};
use weft_rrg::MemoryOrganization;

/// The complete generation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// The target device section.
    pub device: DeviceSection,
    /// Fabric-generation options.
    #[serde(default)]
    pub fabric: FabricSection,
}

/// The `[device]` section: which device grid is being generated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceSection {
    /// The device name (e.g., "weft_k4n8").
    pub name: String,
    /// Grid width in columns.
    pub width: u32,
    /// Grid height in rows.
    pub height: u32,
}

/// The `[fabric]` section: how the routing fabric is synthesized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FabricSection {
    /// The configuration-memory organization.
    #[serde(default = "default_organization")]
    pub organization: MemoryOrganization,
    /// Whether to emit only unique block modules (mirrors become instances
    /// of their canonical template). Bit addressing is identical either way.
    #[serde(default = "default_compact_hierarchy")]
    pub compact_hierarchy: bool,
}

fn default_organization() -> MemoryOrganization {
    MemoryOrganization::ScanChain
}

fn default_compact_hierarchy() -> bool {
    true
}

impl Default for FabricSection {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            compact_hierarchy: default_compact_hierarchy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabric_defaults() {
        let fabric = FabricSection::default();
        assert_eq!(fabric.organization, MemoryOrganization::ScanChain);
        assert!(fabric.compact_hierarchy);
    }

    #[test]
    fn serde_roundtrip() {
        let config = GenerationConfig {
            device: DeviceSection {
                name: "weft_k4n8".to_string(),
                width: 8,
                height: 8,
            },
            fabric: FabricSection {
                organization: MemoryOrganization::MemoryBank,
                compact_hierarchy: false,
            },
        };
        let text = toml::to_string(&config).unwrap();
        let back: GenerationConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.device.name, "weft_k4n8");
        assert_eq!(back.fabric.organization, MemoryOrganization::MemoryBank);
        assert!(!back.fabric.compact_hierarchy);
    }
}
