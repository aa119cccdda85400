//! AVX-512 Backend Implementation
//!
//! 512-bit registers: sixteen 32-bit outputs or eight 64-bit outputs per
//! iteration. The kernels only need AVX-512F; the dispatcher still requires the
//! full F/BW/DQ/VL set before selecting this backend.
//!
//! # Requirements
//! - x86_64 architecture
//! - AVX-512F CPU support (Intel Skylake-X 2017+, AMD Zen 4 2022+)
//! - Compiled with `avx512` feature flag
//!
//! # Safety
//! Same scheme as the AVX2 backend: `#[target_feature(enable = "avx512f")]`
//! kernels behind a runtime check, scalar otherwise. The dispatcher only builds
//! this backend on CPUs with full AVX-512, so the scalar arm is only reached
//! when `Avx512Backend` is called directly.

#![cfg(all(feature = "avx512", target_arch = "x86_64"))]

use core::arch::x86_64::*;

use super::backend::ConversionBackend;
use super::dispatcher::CpuFeatures;
use super::helpers::process_register_chunks;
use super::scalar::ScalarBackend;
use crate::shape::VectorShape;

/// AVX-512 Backend (512-bit SIMD)
#[derive(Copy, Clone, Debug, Default)]
pub struct Avx512Backend;

#[inline]
fn available() -> bool {
    CpuFeatures::detect().has_avx512_f
}

impl ConversionBackend for Avx512Backend {
    fn name() -> &'static str {
        "avx512"
    }

    fn max_shape() -> VectorShape {
        VectorShape::S512
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

    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn i8_to_i32(input: &[i8], output: &mut [i32]) {
        process_register_chunks(input, output, 16, |src, dst| unsafe {
            let bytes = _mm_loadu_si128(src.as_ptr() as *const __m128i);
            _mm512_storeu_epi32(dst.as_mut_ptr(), _mm512_cvtepi8_epi32(bytes));
        });
    }

    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn i16_to_i32(input: &[i16], output: &mut [i32]) {
        process_register_chunks(input, output, 16, |src, dst| unsafe {
            let shorts = _mm256_loadu_si256(src.as_ptr() as *const __m256i);
            _mm512_storeu_epi32(dst.as_mut_ptr(), _mm512_cvtepi16_epi32(shorts));
        });
    }

    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn i32_to_i64(input: &[i32], output: &mut [i64]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let ints = _mm256_loadu_si256(src.as_ptr() as *const __m256i);
            _mm512_storeu_epi64(dst.as_mut_ptr(), _mm512_cvtepi32_epi64(ints));
        });
    }

    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn i32_to_f32(input: &[i32], output: &mut [f32]) {
        process_register_chunks(input, output, 16, |src, dst| unsafe {
            let ints = _mm512_loadu_epi32(src.as_ptr());
            _mm512_storeu_ps(dst.as_mut_ptr(), _mm512_cvtepi32_ps(ints));
        });
    }

    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn f32_to_f64(input: &[f32], output: &mut [f64]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let floats = _mm256_loadu_ps(src.as_ptr());
            _mm512_storeu_pd(dst.as_mut_ptr(), _mm512_cvtps_pd(floats));
        });
    }

    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn f64_to_f32(input: &[f64], output: &mut [f32]) {
        process_register_chunks(input, output, 8, |src, dst| unsafe {
            let doubles = _mm512_loadu_pd(src.as_ptr());
            _mm256_storeu_ps(dst.as_mut_ptr(), _mm512_cvtpd_ps(doubles));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avx512_matches_scalar_with_remainder() {
        let input: [i8; 21] = [
            i8::MIN, -1, 0, 1, i8::MAX, 2, -3, 4, -5, 6, -7, 8, -9, 10, -11, 12, -13, 14, -15, 16,
            -17,
        ];
        let mut simd = [0i32; 21];
        let mut scalar = [0i32; 21];
        Avx512Backend::i8_to_i32(&input, &mut simd);
        ScalarBackend::i8_to_i32(&input, &mut scalar);
        assert_eq!(simd, scalar);
    }

    #[test]
    fn test_avx512_i32_to_f32_ties_to_even() {
        let input: [i32; 16] = core::array::from_fn(|i| (1 << 24) + i as i32);
        let mut simd = [0.0f32; 16];
        let mut scalar = [0.0f32; 16];
        Avx512Backend::i32_to_f32(&input, &mut simd);
        ScalarBackend::i32_to_f32(&input, &mut scalar);
        assert_eq!(simd, scalar);
    }
}
