//! Routing-channel module descriptors.
//!
//! A routing channel is a bundle of track wires between two blocks. Each
//! track is a 1-input, dual-output wire: the through output continues to
//! the next switch block, and a mid-point tap feeds the neighboring
//! connection-box multiplexers. Channels carry no configuration bits;
//! their modules are pure wiring, deduplicated by shape.

use crate::block::DirectConnection;
use crate::module::{channel_module_name, ModuleDescriptor, PortDescriptor, PortDirection};
use serde::{Deserialize, Serialize};
use weft_rrg::{ChannelShape, TrackDirection};

/// One emitted routing-channel module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChannelModule {
    /// The module descriptor: name and ordered port list.
    pub module: ModuleDescriptor,
    /// The internal shorts: each track's output and tap wired to its input.
    pub shorts: Vec<DirectConnection>,
}

/// Builds the module of one unique channel shape.
///
/// Ports are ordered low side first, high side second, then the mid-point
/// taps. An increasing track enters on the low-coordinate side of the
/// channel and leaves on the high side; a decreasing track runs the other
/// way. Either way every track contributes exactly one `in_<i>` and one
/// `out_<i>` port plus a `mid_out_<i>` tap.
pub fn build_channel_module(shape_index: usize, shape: &ChannelShape) -> ChannelModule {
    let mut ports = Vec::new();
    // Low-coordinate side: inputs of increasing tracks, outputs of
    // decreasing ones.
    for (track, direction) in shape.directions.iter().enumerate() {
        ports.push(match direction {
            TrackDirection::Increasing => {
                PortDescriptor::bit(format!("in_{track}"), PortDirection::Input)
            }
            TrackDirection::Decreasing => {
                PortDescriptor::bit(format!("out_{track}"), PortDirection::Output)
            }
        });
    }
    // High-coordinate side: the complement.
    for (track, direction) in shape.directions.iter().enumerate() {
        ports.push(match direction {
            TrackDirection::Increasing => {
                PortDescriptor::bit(format!("out_{track}"), PortDirection::Output)
            }
            TrackDirection::Decreasing => {
                PortDescriptor::bit(format!("in_{track}"), PortDirection::Input)
            }
        });
    }
    // Mid-point taps toward the connection boxes.
    for track in 0..shape.width() {
        ports.push(PortDescriptor::bit(
            format!("mid_out_{track}"),
            PortDirection::Output,
        ));
    }

    let shorts = (0..shape.width())
        .flat_map(|track| {
            [
                DirectConnection {
                    output: format!("out_{track}"),
                    input: format!("in_{track}"),
                },
                DirectConnection {
                    output: format!("mid_out_{track}"),
                    input: format!("in_{track}"),
                },
            ]
        })
        .collect();

    ChannelModule {
        module: ModuleDescriptor {
            name: channel_module_name(shape.kind, shape_index),
            ports,
        },
        shorts,
    }
}
