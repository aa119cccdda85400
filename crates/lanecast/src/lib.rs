#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! lanecast: lane conversion, shape-changing casts and bit reinterpretation
//! for SIMD vector shapes
//!
//! A vector is a fixed-width register (64, 128, 256 or 512 bits, or whatever
//! the platform's widest register is) divided into lanes of one element type.
//! This crate moves data between vectors of different element types and
//! widths with well-defined lane-level semantics.
//!
//! # Features
//!
//! - **Lanewise conversion**: `convert` keeps the lane count, `convert_shape`
//!   and `cast_shape` produce a target species, truncating or zero-padding
//! - **Bit reinterpretation**: `reinterpret_shape` re-reads the little-endian
//!   byte image as different lanes
//! - **Part selection**: `_part` variants address every block of an
//!   expanding conversion and place a contracting one anywhere in the output
//! - **Runtime dispatch**: `simd::ConversionContext` converts whole slices
//!   with AVX2, AVX-512 or NEON kernels when the CPU has them
//! - **No allocations**: every vector is a `Copy` value on the stack
//!
//! # Quick Start
//!
//! ```rust
//! use lanecast::{Species, Vector, VectorShape};
//!
//! let ints = Species::<i32>::of(VectorShape::S128);
//! let v = Vector::from_slice(ints, &[1, -2, 300, i32::MAX]);
//!
//! // Convert into 64-bit bytes: 4 lanes in, 8 lanes out, zero-padded
//! let bytes = v.convert_shape(Species::<i8>::of(VectorShape::S64));
//! assert_eq!(bytes.as_slice(), &[1, -2, 44, -1, 0, 0, 0, 0]);
//!
//! // Reinterpret the same 128 bits as two longs
//! let longs = v.reinterpret_shape(Species::<i64>::of(VectorShape::S128));
//! assert_eq!(longs[0], (-2i64 << 32) | 1);
//! ```
//!
//! # Feature Flags
//!
//! - `runtime-dispatch`: runtime CPU detection and backend selection
//! - `avx2`, `avx512`: compile the x86_64 backends
//! - `neon`: compile the aarch64 backend
//! - `force-scalar`, `force-avx2`, `force-avx512`, `force-neon`: pin the backend

// Core trait definitions
pub mod lane_type;
pub mod traits;

// Shapes and species
pub mod shape;
pub mod species;

// Vector values and the conversion engine
pub mod conversion;
pub mod vector;

// Errors
pub mod error;

// Slice kernels and runtime dispatch
pub mod simd;

pub use error::ConversionError;
pub use lane_type::LaneType;
pub use shape::{VectorShape, MAX_BITS, MAX_BYTES, MAX_LANES};
pub use simd::{BackendType, ConversionContext};
pub use species::Species;
pub use traits::Lane;
pub use vector::Vector;
