//! Errors returned by the fallible conversion API
//!
//! The infallible entry points (`VectorShape::from_bits`, `Vector::from_slice`,
//! `convert_shape`, ...) treat these conditions as contract violations and
//! panic with the same message.

use thiserror::Error;

use crate::lane_type::LaneType;

/// Conversion and shape errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Bit size is not one of 64, 128, 256 or 512
    #[error("unsupported vector bit size {bits} (expected 64, 128, 256 or 512)")]
    UnsupportedBitSize {
        /// Requested bit size
        bits: usize,
    },

    /// No supported shape holds exactly this many lanes of the given type
    #[error("no vector shape holds {lanes} lanes of {lane_type}")]
    UnsupportedLaneCount {
        /// Requested lane count
        lanes: usize,
        /// Lane type
        lane_type: LaneType,
    },

    /// Part number outside the range allowed for this pair of sizes
    #[error("bad part number {part} for shape change (valid range {min}..={max})")]
    InvalidPart {
        /// Requested part
        part: i32,
        /// Smallest valid part
        min: i32,
        /// Largest valid part
        max: i32,
    },

    /// Source slice does not hold enough lanes at the requested offset
    #[error("slice of length {len} cannot supply {lanes} lanes at offset {offset}")]
    SliceTooShort {
        /// Slice length
        len: usize,
        /// Starting offset
        offset: usize,
        /// Lanes required
        lanes: usize,
    },

    /// Lanewise reinterpretation between lane types of different sizes
    #[error("cannot reinterpret {from} lanes as {to} lanes of a different size")]
    LaneSizeMismatch {
        /// Source lane type
        from: LaneType,
        /// Destination lane type
        to: LaneType,
    },

    /// Zero extension involving a floating lane type
    #[error("zero extension needs integral lanes, got {from} to {to}")]
    NonIntegralZeroExtend {
        /// Source lane type
        from: LaneType,
        /// Destination lane type
        to: LaneType,
    },
}
