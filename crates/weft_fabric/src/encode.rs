//! Path encoding: configuration-bit patterns that steer a multiplexer.
//!
//! The encoder and the structural synthesizer share one decomposition
//! ([`MuxTopology`]); the pattern produced here is only meaningful for the
//! structure that topology describes, which is why both always come from
//! the same place.

use crate::mux::MuxTopology;
use serde::{Deserialize, Serialize};
use std::fmt;
use weft_rrg::Technology;

/// The configuration-bit pattern of one multiplexer instance.
///
/// For CMOS tree multiplexers this is one selector bit per tree level,
/// least-significant (level 0, nearest the inputs) first. For RRAM
/// crosspoint multiplexers it is two equal-length half-vectors — the
/// bit-line pattern and the word-line pattern — each independently
/// meaningful to the programming circuitry.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ConfigPattern {
    /// Per-level selector bits of a CMOS tree multiplexer, LSB first.
    Bits(Vec<bool>),
    /// Bit-line and word-line halves of an RRAM crosspoint multiplexer.
    BitLines {
        /// The bit-line half, one entry per crosspoint column plus output.
        bl: Vec<bool>,
        /// The word-line half, same length as `bl`.
        wl: Vec<bool>,
    },
}

impl ConfigPattern {
    /// Returns the total number of bits in the pattern.
    pub fn len(&self) -> usize {
        match self {
            ConfigPattern::Bits(bits) => bits.len(),
            ConfigPattern::BitLines { bl, wl } => bl.len() + wl.len(),
        }
    }

    /// Returns `true` if the pattern has no bits.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn write_bits(f: &mut fmt::Formatter<'_>, bits: &[bool]) -> fmt::Result {
    for &bit in bits {
        write!(f, "{}", if bit { '1' } else { '0' })?;
    }
    Ok(())
}

impl fmt::Display for ConfigPattern {
    /// Renders the pattern from LSB (left) to MSB (right) for debug
    /// commentary next to emitted multiplexer instances.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigPattern::Bits(bits) => write_bits(f, bits),
            ConfigPattern::BitLines { bl, wl } => {
                write!(f, "bl: ")?;
                write_bits(f, bl)?;
                write!(f, " wl: ")?;
                write_bits(f, wl)
            }
        }
    }
}

/// Encodes the pattern that steers input `selected` to the output.
///
/// `selected` must be a valid input index of the topology. Deterministic:
/// the same topology and index always produce the same pattern.
pub fn encode_path(topology: &MuxTopology, selected: usize) -> ConfigPattern {
    debug_assert!(selected < topology.width());
    match topology.technology() {
        Technology::Cmos => {
            // One branch decision per tree level; bit l steers level l.
            let bits = (0..topology.levels())
                .map(|level| (selected >> level) & 1 == 1)
                .collect();
            ConfigPattern::Bits(bits)
        }
        Technology::Rram => {
            // Program exactly one crosspoint: the selected input column
            // against the output row.
            let half = topology.width() + 1;
            let mut bl = vec![false; half];
            let mut wl = vec![false; half];
            bl[selected] = true;
            wl[half - 1] = true;
            ConfigPattern::BitLines { bl, wl }
        }
    }
}

/// Decodes a pattern back to the input index it selects.
///
/// This is the structural simulation of the multiplexer: walking the tree
/// levels (CMOS) or locating the programmed crosspoint (RRAM). Returns
/// `None` for a pattern that does not select any valid input of the
/// topology.
pub fn decode_path(topology: &MuxTopology, pattern: &ConfigPattern) -> Option<usize> {
    match (topology.technology(), pattern) {
        (Technology::Cmos, ConfigPattern::Bits(bits)) => {
            if bits.len() != topology.levels() {
                return None;
            }
            let mut selected = 0usize;
            for (level, &bit) in bits.iter().enumerate() {
                if bit {
                    selected |= 1 << level;
                }
            }
            (selected < topology.width()).then_some(selected)
        }
        (Technology::Rram, ConfigPattern::BitLines { bl, wl }) => {
            let half = topology.width() + 1;
            if bl.len() != half || wl.len() != half {
                return None;
            }
            // Exactly one bit-line and exactly the output word-line may be
            // active, otherwise more than one crosspoint would program.
            if bl.iter().filter(|&&b| b).count() != 1 {
                return None;
            }
            if wl.iter().filter(|&&b| b).count() != 1 || !wl[half - 1] {
                return None;
            }
            let selected = bl.iter().position(|&b| b)?;
            (selected < topology.width()).then_some(selected)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmos_pattern_length_is_level_count() {
        for (width, levels) in [(2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (16, 4)] {
            let topo = MuxTopology::new(width, Technology::Cmos);
            let pattern = encode_path(&topo, 0);
            assert_eq!(pattern.len(), levels, "width {width}");
        }
    }

    #[test]
    fn cmos_roundtrip_all_inputs() {
        for width in [2, 3, 4, 5, 8, 16] {
            let topo = MuxTopology::new(width, Technology::Cmos);
            for selected in 0..width {
                let pattern = encode_path(&topo, selected);
                assert_eq!(
                    decode_path(&topo, &pattern),
                    Some(selected),
                    "width {width} input {selected}"
                );
            }
        }
    }

    #[test]
    fn rram_roundtrip_all_inputs() {
        for width in [2, 3, 4, 5, 8, 16] {
            let topo = MuxTopology::new(width, Technology::Rram);
            for selected in 0..width {
                let pattern = encode_path(&topo, selected);
                assert_eq!(
                    decode_path(&topo, &pattern),
                    Some(selected),
                    "width {width} input {selected}"
                );
            }
        }
    }

    #[test]
    fn rram_halves_are_equal_length() {
        let topo = MuxTopology::new(5, Technology::Rram);
        let pattern = encode_path(&topo, 3);
        match &pattern {
            ConfigPattern::BitLines { bl, wl } => {
                assert_eq!(bl.len(), wl.len());
                assert_eq!(bl.len(), 6);
            }
            _ => panic!("expected bit-line pattern"),
        }
        assert_eq!(pattern.len(), topo.num_config_bits() as usize);
    }

    #[test]
    fn cmos_pattern_matches_config_bits() {
        for width in [2, 3, 4, 5, 8, 16] {
            let topo = MuxTopology::new(width, Technology::Cmos);
            let pattern = encode_path(&topo, width - 1);
            assert_eq!(pattern.len(), topo.num_config_bits() as usize);
        }
    }

    #[test]
    fn decode_rejects_out_of_range_code() {
        // Width 3 has 2 levels; binary code 3 selects no input.
        let topo = MuxTopology::new(3, Technology::Cmos);
        let pattern = ConfigPattern::Bits(vec![true, true]);
        assert_eq!(decode_path(&topo, &pattern), None);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let topo = MuxTopology::new(4, Technology::Cmos);
        let pattern = ConfigPattern::Bits(vec![true]);
        assert_eq!(decode_path(&topo, &pattern), None);
    }

    #[test]
    fn decode_rejects_multiple_crosspoints() {
        let topo = MuxTopology::new(2, Technology::Rram);
        let pattern = ConfigPattern::BitLines {
            bl: vec![true, true, false],
            wl: vec![false, false, true],
        };
        assert_eq!(decode_path(&topo, &pattern), None);
    }

    #[test]
    fn decode_rejects_mismatched_technology() {
        let topo = MuxTopology::new(2, Technology::Rram);
        let pattern = ConfigPattern::Bits(vec![true]);
        assert_eq!(decode_path(&topo, &pattern), None);
    }

    #[test]
    fn display_lsb_first() {
        let topo = MuxTopology::new(8, Technology::Cmos);
        // Input 4 = binary 100: level bits (lsb first) are 0, 0, 1.
        let pattern = encode_path(&topo, 4);
        assert_eq!(format!("{pattern}"), "001");
    }

    #[test]
    fn display_rram_halves() {
        let topo = MuxTopology::new(2, Technology::Rram);
        let pattern = encode_path(&topo, 1);
        assert_eq!(format!("{pattern}"), "bl: 010 wl: 001");
    }

    #[test]
    fn serde_roundtrip() {
        let topo = MuxTopology::new(5, Technology::Rram);
        let pattern = encode_path(&topo, 2);
        let json = serde_json::to_string(&pattern).unwrap();
        let back: ConfigPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, back);
    }
}
