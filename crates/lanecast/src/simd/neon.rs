//! NEON Backend Implementation
//!
//! 128-bit registers on aarch64. Widening conversions split each input
//! register into low and high halves (`vmovl` / `vmovl_high`, `vcvt` /
//! `vcvt_high`) so every kernel consumes one full input register per step.
//!
//! # Note
//! NEON is part of the aarch64 baseline, so there is no runtime detection and
//! the kernels are called directly.

#![cfg(all(feature = "neon", target_arch = "aarch64"))]

use core::arch::aarch64::*;

use super::backend::ConversionBackend;
use super::helpers::process_register_chunks;
use crate::shape::VectorShape;

/// NEON Backend (128-bit SIMD)
#[derive(Copy, Clone, Debug, Default)]
pub struct NeonBackend;

impl ConversionBackend for NeonBackend {
    fn name() -> &'static str {
        "neon"
    }

    fn max_shape() -> VectorShape {
        VectorShape::S128
    }

    #[inline]
    fn i8_to_i32(input: &[i8], output: &mut [i32]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let shorts = vmovl_s8(vld1_s8(src.as_ptr()));
            vst1q_s32(dst.as_mut_ptr(), vmovl_s16(vget_low_s16(shorts)));
            vst1q_s32(dst.as_mut_ptr().add(4), vmovl_high_s16(shorts));
        });
    }

    #[inline]
    fn i16_to_i32(input: &[i16], output: &mut [i32]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let shorts = vld1q_s16(src.as_ptr());
            vst1q_s32(dst.as_mut_ptr(), vmovl_s16(vget_low_s16(shorts)));
            vst1q_s32(dst.as_mut_ptr().add(4), vmovl_high_s16(shorts));
        });
    }

    #[inline]
    fn i32_to_i64(input: &[i32], output: &mut [i64]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let ints = vld1q_s32(src.as_ptr());
            vst1q_s64(dst.as_mut_ptr(), vmovl_s32(vget_low_s32(ints)));
            vst1q_s64(dst.as_mut_ptr().add(2), vmovl_high_s32(ints));
        });
    }

    #[inline]
    fn i32_to_f32(input: &[i32], output: &mut [f32]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let ints = vld1q_s32(src.as_ptr());
            vst1q_f32(dst.as_mut_ptr(), vcvtq_f32_s32(ints));
        });
    }

    #[inline]
    fn f32_to_f64(input: &[f32], output: &mut [f64]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let floats = vld1q_f32(src.as_ptr());
            vst1q_f64(dst.as_mut_ptr(), vcvt_f64_f32(vget_low_f32(floats)));
            vst1q_f64(dst.as_mut_ptr().add(2), vcvt_high_f64_f32(floats));
        });
    }

    #[inline]
    fn f64_to_f32(input: &[f64], output: &mut [f32]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let low = vcvt_f32_f64(vld1q_f64(src.as_ptr()));
            let both = vcvt_high_f32_f64(low, vld1q_f64(src.as_ptr().add(2)));
            vst1q_f32(dst.as_mut_ptr(), both);
        });
    }
}
