//! Codec for delta-encoded ASCII polylines as emitted by common routing
//! engines (Google, OSRM, Valhalla).
//!
//! Each coordinate dimension is stored as the difference from the previous
//! point, zig-zag mapped to an unsigned integer and split into 5-bit chunks.
//! Every chunk is biased by 63 into printable ASCII, with bit `0x20` marking
//! that more chunks follow. Scaling by the precision factor happens only after
//! integer accumulation, so decoding followed by encoding reproduces the input
//! byte for byte.

mod decoder;
mod encoder;

pub use decoder::{decode_polyline, decode_polyline_with_elevation};
pub use encoder::{encode_polyline, encode_polyline_with_elevation};
