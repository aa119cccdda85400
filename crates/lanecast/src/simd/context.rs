//! Conversion Context - Unified Public API
//!
//! `ConversionContext` is the entry point for bulk conversions. It wraps the
//! `BackendDispatcher` and accepts slices of any lane-type pair:
//!
//! - the six accelerated pairs go straight to the backend's slice kernels
//! - every other pair is processed one max-shape register at a time through
//!   `Vector::convert`, with a scalar tail
//!
//! Both paths produce exactly what `Lane::cast` produces lane by lane.
//!
//! # Example Usage
//!
//! ```rust
//! use lanecast::simd::ConversionContext;
//!
//! // Initialize once, reuse for every conversion
//! let ctx = ConversionContext::new();
//!
//! let input: Vec<i16> = (-500..500).collect();
//! let mut output = vec![0.0f64; input.len()];
//! ctx.convert_slice(&input, &mut output);
//!
//! assert_eq!(output[0], -500.0);
//! assert_eq!(output[999], 499.0);
//! ```

use core::any::TypeId;

use super::dispatcher::{BackendDispatcher, BackendType};
use super::helpers::process_register_chunks;
use crate::lane_type::LaneType;
use crate::shape::VectorShape;
use crate::species::Species;
use crate::traits::Lane;
use crate::vector::Vector;

/// Conversion Context - Unified Public API
///
/// # Performance
///
/// - Initialization: ~100-200 CPU cycles (call once at startup)
/// - Dispatch overhead: one indirect call per `convert_slice`
///
/// # Safety
///
/// All methods are safe to call. Intrinsic kernels are only reached on CPUs
/// that support them.
#[derive(Clone, Debug)]
pub struct ConversionContext {
    dispatcher: BackendDispatcher,
}

impl ConversionContext {
    /// Initialize context with the optimal backend for this machine
    pub fn new() -> Self {
        Self {
            dispatcher: BackendDispatcher::init(),
        }
    }

    /// Context using a specific backend, if it can run here
    ///
    /// ```rust
    /// use lanecast::simd::{BackendType, ConversionContext};
    ///
    /// let ctx = ConversionContext::with_backend(BackendType::Scalar).unwrap();
    /// assert_eq!(ctx.backend_name(), "scalar");
    /// ```
    pub fn with_backend(backend: BackendType) -> Option<Self> {
        BackendDispatcher::for_backend(backend).map(|dispatcher| Self { dispatcher })
    }

    /// Get backend name for logging/debugging
    ///
    /// # Returns
    ///
    /// Static string: "scalar", "avx2", "avx512", or "neon"
    pub fn backend_name(&self) -> &'static str {
        self.dispatcher.backend_name()
    }

    /// Query selected backend type
    pub fn backend_type(&self) -> BackendType {
        self.dispatcher.backend_type()
    }

    /// Widest shape on this machine, `VectorShape::max()`
    pub fn max_shape(&self) -> VectorShape {
        VectorShape::max()
    }

    /// Species of `T` at this context's max shape
    pub fn preferred_species<T: Lane>(&self) -> Species<T> {
        Species::of(self.max_shape())
    }

    /// Convert `input` into `output` lane by lane
    ///
    /// `output[i] == input[i].cast::<T>()` for every `i`.
    ///
    /// # Panics
    ///
    /// Panics if `input.len() != output.len()`
    pub fn convert_slice<S: Lane, T: Lane>(&self, input: &[S], output: &mut [T]) {
        assert_eq!(
            input.len(),
            output.len(),
            "Input and output slices must have the same length"
        );

        let accelerated = match (S::LANE_TYPE, T::LANE_TYPE) {
            (LaneType::I8, LaneType::I32) => {
                self.kernel(input, output, BackendDispatcher::i8_to_i32)
            }
            (LaneType::I16, LaneType::I32) => {
                self.kernel(input, output, BackendDispatcher::i16_to_i32)
            }
            (LaneType::I32, LaneType::I64) => {
                self.kernel(input, output, BackendDispatcher::i32_to_i64)
            }
            (LaneType::I32, LaneType::F32) => {
                self.kernel(input, output, BackendDispatcher::i32_to_f32)
            }
            (LaneType::F32, LaneType::F64) => {
                self.kernel(input, output, BackendDispatcher::f32_to_f64)
            }
            (LaneType::F64, LaneType::F32) => {
                self.kernel(input, output, BackendDispatcher::f64_to_f32)
            }
            _ => false,
        };

        if accelerated {
            log::trace!(
                "convert_slice {} -> {}: {} kernel, {} lanes",
                S::LANE_TYPE,
                T::LANE_TYPE,
                self.backend_name(),
                input.len()
            );
            return;
        }

        log::trace!(
            "convert_slice {} -> {}: generic path at {}, {} lanes",
            S::LANE_TYPE,
            T::LANE_TYPE,
            self.max_shape(),
            input.len()
        );
        let species = self.preferred_species::<S>();
        process_register_chunks(input, output, species.lane_count(), |src, dst| {
            Vector::from_slice(species, src)
                .convert::<T>()
                .copy_to_slice(dst);
        });
    }

    /// Run a typed dispatcher kernel if `S`/`T` are exactly `A`/`B`
    #[inline]
    fn kernel<S, T, A, B>(
        &self,
        input: &[S],
        output: &mut [T],
        kernel: fn(&BackendDispatcher, &[A], &mut [B]),
    ) -> bool
    where
        S: Lane,
        T: Lane,
        A: Lane,
        B: Lane,
    {
        match (retype::<S, A>(input), retype_mut::<T, B>(output)) {
            (Some(input), Some(output)) => {
                kernel(&self.dispatcher, input, output);
                true
            }
            _ => false,
        }
    }
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self::new()
    }
}

fn retype<S: Lane, A: Lane>(slice: &[S]) -> Option<&[A]> {
    if TypeId::of::<S>() != TypeId::of::<A>() {
        return None;
    }
    // SAFETY: `S` and `A` are the same type.
    Some(unsafe { core::slice::from_raw_parts(slice.as_ptr() as *const A, slice.len()) })
}

fn retype_mut<T: Lane, B: Lane>(slice: &mut [T]) -> Option<&mut [B]> {
    if TypeId::of::<T>() != TypeId::of::<B>() {
        return None;
    }
    // SAFETY: `T` and `B` are the same type.
    Some(unsafe { core::slice::from_raw_parts_mut(slice.as_mut_ptr() as *mut B, slice.len()) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_pair_with_tail() {
        let ctx = ConversionContext::with_backend(BackendType::Scalar).unwrap();
        let input = [1.9f64, -1.9, f64::NAN, 1e30, -1e30];
        let mut output = [0i16; 5];
        ctx.convert_slice(&input, &mut output);
        assert_eq!(output, [1, -1, 0, i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_accelerated_pair() {
        let ctx = ConversionContext::new();
        let input: [i8; 19] = core::array::from_fn(|i| (i as i32 * 13 - 100) as i8);
        let mut output = [0i32; 19];
        ctx.convert_slice(&input, &mut output);
        for (out, &inp) in output.iter().zip(&input) {
            assert_eq!(*out, inp as i32);
        }
    }

    #[test]
    fn test_preferred_species_uses_max_shape() {
        let ctx = ConversionContext::new();
        assert_eq!(ctx.preferred_species::<f32>().shape(), ctx.max_shape());
        assert_eq!(ctx.max_shape(), VectorShape::max());
        assert!(ctx.backend_type().max_shape() <= ctx.max_shape());
    }

    #[test]
    fn test_retype_rejects_other_types() {
        assert!(retype::<i32, f32>(&[1]).is_none());
        assert!(retype::<i32, i32>(&[1]).is_some());
    }
}
