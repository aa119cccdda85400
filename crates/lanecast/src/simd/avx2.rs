//! AVX2 Backend Implementation
//!
//! 256-bit registers: eight 32-bit outputs or four 64-bit outputs per
//! iteration.
//!
//! # Requirements
//! - x86_64 architecture
//! - AVX2 CPU support (Intel Haswell 2013+, AMD Excavator 2015+)
//! - Compiled with `avx2` feature flag
//!
//! # Safety
//! Kernels are `#[target_feature(enable = "avx2")]` functions. The safe trait
//! methods only enter them after `CpuFeatures::detect()` reports AVX2 and use
//! `ScalarBackend` otherwise. All loads and stores are unaligned and sized to
//! the chunk `process_register_chunks` hands out.
//!
//! Through `BackendDispatcher` the check always passes, since
//! `BackendDispatcher::for_backend` refuses AVX2 on CPUs without it. The scalar
//! arm is only reached when `Avx2Backend` is called directly on such a CPU.
//!
//! Only conversions whose intrinsic matches `Lane::cast` bit for bit are
//! accelerated. Float to int is not: `cvttps` returns `0x8000_0000` for NaN and
//! out-of-range inputs instead of saturating.

#![cfg(all(feature = "avx2", target_arch = "x86_64"))]

use core::arch::x86_64::*;

use super::backend::ConversionBackend;
use super::dispatcher::CpuFeatures;
use super::helpers::process_register_chunks;
use super::scalar::ScalarBackend;
use crate::shape::VectorShape;

/// AVX2 Backend (256-bit SIMD)
#[derive(Copy, Clone, Debug, Default)]
pub struct Avx2Backend;

#[inline]
fn available() -> bool {
    CpuFeatures::detect().has_avx2
}

impl ConversionBackend for Avx2Backend {
    fn name() -> &'static str {
        "avx2"
    }

    fn max_shape() -> VectorShape {
        VectorShape::S256
    }

    #[inline]
    fn i8_to_i32(input: &[i8], output: &mut [i32]) {
        if available() {
            unsafe { kernels::i8_to_i32(input, output) }
        } else {
            ScalarBackend::i8_to_i32(input, output)
        }
    }

    #[inline]
    fn i16_to_i32(input: &[i16], output: &mut [i32]) {
        if available() {
            unsafe { kernels::i16_to_i32(input, output) }
        } else {
            ScalarBackend::i16_to_i32(input, output)
        }
    }

    #[inline]
    fn i32_to_i64(input: &[i32], output: &mut [i64]) {
        if available() {
            unsafe { kernels::i32_to_i64(input, output) }
        } else {
            ScalarBackend::i32_to_i64(input, output)
        }
    }

    #[inline]
    fn i32_to_f32(input: &[i32], output: &mut [f32]) {
        if available() {
            unsafe { kernels::i32_to_f32(input, output) }
        } else {
            ScalarBackend::i32_to_f32(input, output)
        }
    }

    #[inline]
    fn f32_to_f64(input: &[f32], output: &mut [f64]) {
        if available() {
            unsafe { kernels::f32_to_f64(input, output) }
        } else {
            ScalarBackend::f32_to_f64(input, output)
        }
    }

    #[inline]
    fn f64_to_f32(input: &[f64], output: &mut [f32]) {
        if available() {
            unsafe { kernels::f64_to_f32(input, output) }
        } else {
            ScalarBackend::f64_to_f32(input, output)
        }
    }
}

mod kernels {
    use super::*;

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn i8_to_i32(input: &[i8], output: &mut [i32]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            // 8 bytes into the low half of an xmm register
            let bytes = _mm_loadl_epi64(src.as_ptr() as *const __m128i);
            let ints = _mm256_cvtepi8_epi32(bytes);
            _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, ints);
        });
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn i16_to_i32(input: &[i16], output: &mut [i32]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let shorts = _mm_loadu_si128(src.as_ptr() as *const __m128i);
            let ints = _mm256_cvtepi16_epi32(shorts);
            _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, ints);
        });
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn i32_to_i64(input: &[i32], output: &mut [i64]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let ints = _mm_loadu_si128(src.as_ptr() as *const __m128i);
            let longs = _mm256_cvtepi32_epi64(ints);
            _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, longs);
        });
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn i32_to_f32(input: &[i32], output: &mut [f32]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let ints = _mm256_loadu_si256(src.as_ptr() as *const __m256i);
            _mm256_storeu_ps(dst.as_mut_ptr(), _mm256_cvtepi32_ps(ints));
        });
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn f32_to_f64(input: &[f32], output: &mut [f64]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let floats = _mm_loadu_ps(src.as_ptr());
            _mm256_storeu_pd(dst.as_mut_ptr(), _mm256_cvtps_pd(floats));
        });
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn f64_to_f32(input: &[f64], output: &mut [f32]) {
        process_register_chunks(input, output, 4, |src, dst| unsafe {
            let doubles = _mm256_loadu_pd(src.as_ptr());
            _mm_storeu_ps(dst.as_mut_ptr(), _mm256_cvtpd_ps(doubles));
        });
    }
}
