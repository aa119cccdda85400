//! Generic helpers bridging slice kernels to fixed-width register kernels
//!
//! Backends only write the body that converts one full register; the chunking
//! and the scalar remainder live here.

use crate::traits::Lane;

/// Convert `input` into `output` one register of `lanes` elements at a time
///
/// `kernel` receives input and output chunks of exactly `lanes` elements. The
/// remainder is converted with `Lane::cast`, which every kernel must agree
/// with.
///
/// # Panics
///
/// Panics if `input.len() != output.len()` or `lanes == 0`
///
/// # Example
///
/// ```rust,ignore
/// process_register_chunks(input, output, 8, |src, dst| unsafe {
///     let v = _mm256_cvtepi8_epi32(_mm_loadl_epi64(src.as_ptr() as *const __m128i));
///     _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, v);
/// });
/// ```
#[inline(always)]
pub fn process_register_chunks<S, T, K>(input: &[S], output: &mut [T], lanes: usize, mut kernel: K)
where
    S: Lane,
    T: Lane,
    K: FnMut(&[S], &mut [T]),
{
    assert_eq!(
        input.len(),
        output.len(),
        "Input and output slices must have the same length"
    );

    let mut in_chunks = input.chunks_exact(lanes);
    let mut out_chunks = output.chunks_exact_mut(lanes);

    for (src, dst) in (&mut in_chunks).zip(&mut out_chunks) {
        kernel(src, dst);
    }

    // Scalar remainder
    for (dst, &src) in out_chunks
        .into_remainder()
        .iter_mut()
        .zip(in_chunks.remainder())
    {
        *dst = src.cast::<T>();
    }
}

/// Lane-by-lane conversion with `Lane::cast`
///
/// # Panics
///
/// Panics if `input.len() != output.len()`
#[inline]
pub fn convert_scalar<S: Lane, T: Lane>(input: &[S], output: &mut [T]) {
    assert_eq!(
        input.len(),
        output.len(),
        "Input and output slices must have the same length"
    );
    for (dst, &src) in output.iter_mut().zip(input) {
        *dst = src.cast::<T>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_uses_cast() {
        let input = [1i16, -2, 3, -4, 5, -6, 7];
        let mut output = [0i32; 7];
        let mut calls = 0;
        process_register_chunks(&input, &mut output, 4, |src, dst| {
            calls += 1;
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s as i32 * 10;
            }
        });
        assert_eq!(calls, 1);
        assert_eq!(output, [10, -20, 30, -40, 5, -6, 7]);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        convert_scalar(&[1i8, 2], &mut [0i32; 3]);
    }
}
