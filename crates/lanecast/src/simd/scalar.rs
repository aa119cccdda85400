//! Scalar Backend Implementation
//!
//! Reference backend, available on every platform. Each kernel is a plain
//! `Lane::cast` loop; the intrinsic backends are checked against it.

use super::backend::ConversionBackend;
use super::helpers::convert_scalar;
use crate::shape::VectorShape;

/// Scalar Backend (no SIMD)
///
/// Processes one lane per iteration. Its kernel width is the smallest fixed shape.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScalarBackend;

impl ConversionBackend for ScalarBackend {
    fn name() -> &'static str {
        "scalar"
    }

    fn max_shape() -> VectorShape {
        VectorShape::S64
    }

    #[inline]
    fn i8_to_i32(input: &[i8], output: &mut [i32]) {
        convert_scalar(input, output);
    }

    #[inline]
    fn i16_to_i32(input: &[i16], output: &mut [i32]) {
        convert_scalar(input, output);
    }

    #[inline]
    fn i32_to_i64(input: &[i32], output: &mut [i64]) {
        convert_scalar(input, output);
    }

    #[inline]
    fn i32_to_f32(input: &[i32], output: &mut [f32]) {
        convert_scalar(input, output);
    }

    #[inline]
    fn f32_to_f64(input: &[f32], output: &mut [f64]) {
        convert_scalar(input, output);
    }

    #[inline]
    fn f64_to_f32(input: &[f64], output: &mut [f32]) {
        convert_scalar(input, output);
    }
}
