//! Conversion Backend Trait
//!
//! This module defines the contract that every SIMD backend implementation must
//! satisfy. All backends (Scalar, AVX2, AVX-512, NEON) implement
//! `ConversionBackend` with bit-identical results; only throughput differs.

use crate::shape::VectorShape;

/// Slice conversion kernels for one instruction set
///
/// Each kernel converts `input[i]` into `output[i]` with the same semantics as
/// `Lane::cast`, so a kernel is interchangeable with a lanewise `convert` over
/// the same data.
///
/// # Contract Requirements
///
/// 1. **Bit-identical**: every backend produces exactly the bits `ScalarBackend`
///    produces (NaN results compare as NaN)
/// 2. **no_std**: no heap allocation
/// 3. **Zero-sized**: backends are `Copy` unit structs
/// 4. **Safe**: kernels of an instruction set the CPU lacks fall back to scalar
///
/// # Panics
///
/// Every kernel panics if `input.len() != output.len()`.
///
/// # Example
///
/// ```rust
/// use lanecast::simd::{ConversionBackend, ScalarBackend};
///
/// let input = [1i32, -2, 16_777_217];
/// let mut output = [0.0f32; 3];
/// ScalarBackend::i32_to_f32(&input, &mut output);
/// assert_eq!(output, [1.0, -2.0, 16_777_216.0]);
/// ```
pub trait ConversionBackend: Copy {
    /// Backend name for logging/debugging
    fn name() -> &'static str;

    /// Widest register this backend's kernels process
    fn max_shape() -> VectorShape;

    /// Sign-extend bytes to ints
    fn i8_to_i32(input: &[i8], output: &mut [i32]);

    /// Sign-extend shorts to ints
    fn i16_to_i32(input: &[i16], output: &mut [i32]);

    /// Sign-extend ints to longs
    fn i32_to_i64(input: &[i32], output: &mut [i64]);

    /// Round ints to floats (nearest, ties to even)
    fn i32_to_f32(input: &[i32], output: &mut [f32]);

    /// Widen floats to doubles (exact)
    fn f32_to_f64(input: &[f32], output: &mut [f64]);

    /// Round doubles to floats (nearest, ties to even; overflow to infinity)
    fn f64_to_f32(input: &[f64], output: &mut [f32]);
}
