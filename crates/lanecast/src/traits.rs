//! Core lane abstraction trait
//!
//! This module defines the `Lane` trait that every vector element type
//! implements. Vectors, species and the conversion engine are generic over
//! `Lane`, which lets one implementation of each conversion rule cover the full
//! cross product of element types.
//!
//! The trait is sealed: the six implementations (`i8`, `i16`, `i32`, `i64`,
//! `f32`, `f64`) are the only ones, and `LANE_TYPE` uniquely identifies the
//! implementing type. The SIMD dispatch layer relies on that to route generic
//! slices to typed kernels.

use core::fmt;

use crate::lane_type::LaneType;

mod sealed {
    pub trait Sealed {}
}

/// Scalar element of a vector register
///
/// # Numeric casts
///
/// `cast` follows the native conversion rules of the language, performed as a
/// single rounding step from the source type directly to the destination type:
///
/// - integer to narrower integer truncates to the low-order bits
/// - integer to wider integer sign-extends
/// - integer to float rounds to nearest, ties to even
/// - float to integer saturates, maps NaN to zero and truncates toward zero
/// - `f64` to `f32` rounds to nearest, ties to even, overflowing to infinity
/// - `f32` to `f64` is exact
///
/// # Example
///
/// ```rust
/// use lanecast::Lane;
///
/// assert_eq!(300i32.cast::<i8>(), 44);
/// assert_eq!((-1i8).cast::<i64>(), -1);
/// assert_eq!(f32::NAN.cast::<i32>(), 0);
/// assert_eq!(1e20f64.cast::<i32>(), i32::MAX);
/// ```
pub trait Lane:
    Copy + Default + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static + sealed::Sealed
{
    /// Runtime tag of this type
    const LANE_TYPE: LaneType;

    /// Size in bits
    const BITS: usize;

    /// Size in bytes
    const BYTES: usize;

    /// Zero value, used to pad shape-changing results
    const ZERO: Self;

    /// Integral type of the same size (the type itself for integers)
    type Integral: Lane;

    /// Convert from `i8`
    fn from_i8(value: i8) -> Self;

    /// Convert from `i16`
    fn from_i16(value: i16) -> Self;

    /// Convert from `i32`
    fn from_i32(value: i32) -> Self;

    /// Convert from `i64`
    fn from_i64(value: i64) -> Self;

    /// Convert from `f32`
    fn from_f32(value: f32) -> Self;

    /// Convert from `f64`
    fn from_f64(value: f64) -> Self;

    /// Numeric conversion to another lane type
    fn cast<T: Lane>(self) -> T;

    /// Raw bit pattern, zero-extended to 64 bits
    ///
    /// ```rust
    /// use lanecast::Lane;
    ///
    /// assert_eq!((-1i8).to_raw_bits(), 0xFF);
    /// assert_eq!(1.0f32.to_raw_bits(), 0x3F80_0000);
    /// ```
    fn to_raw_bits(self) -> u64;

    /// Build a lane from the low `BITS` bits of `bits`
    fn from_raw_bits(bits: u64) -> Self;

    /// Write the little-endian bytes of this lane into `out[..BYTES]`
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `BYTES`
    fn write_le_bytes(self, out: &mut [u8]);

    /// Read a lane from the little-endian bytes `bytes[..BYTES]`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `BYTES`
    fn read_le_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_lane_common {
    ($t:ty, $cast_fn:ident) => {
        #[inline(always)]
        fn from_i8(value: i8) -> Self {
            value as $t
        }

        #[inline(always)]
        fn from_i16(value: i16) -> Self {
            value as $t
        }

        #[inline(always)]
        fn from_i32(value: i32) -> Self {
            value as $t
        }

        #[inline(always)]
        fn from_i64(value: i64) -> Self {
            value as $t
        }

        #[inline(always)]
        fn from_f32(value: f32) -> Self {
            value as $t
        }

        #[inline(always)]
        fn from_f64(value: f64) -> Self {
            value as $t
        }

        #[inline(always)]
        fn cast<T: Lane>(self) -> T {
            T::$cast_fn(self)
        }

        #[inline(always)]
        fn write_le_bytes(self, out: &mut [u8]) {
            out[..Self::BYTES].copy_from_slice(&self.to_le_bytes());
        }

        #[inline(always)]
        fn read_le_bytes(bytes: &[u8]) -> Self {
            let mut buf = [0u8; core::mem::size_of::<$t>()];
            buf.copy_from_slice(&bytes[..Self::BYTES]);
            <$t>::from_le_bytes(buf)
        }
    };
}

macro_rules! impl_integral_lane {
    ($t:ty, $unsigned:ty, $lane_type:expr, $cast_fn:ident) => {
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const LANE_TYPE: LaneType = $lane_type;
            const BITS: usize = <$t>::BITS as usize;
            const BYTES: usize = core::mem::size_of::<$t>();
            const ZERO: Self = 0;

            type Integral = $t;

            impl_lane_common!($t, $cast_fn);

            #[inline(always)]
            fn to_raw_bits(self) -> u64 {
                self as $unsigned as u64
            }

            #[inline(always)]
            fn from_raw_bits(bits: u64) -> Self {
                bits as $unsigned as $t
            }
        }
    };
}

macro_rules! impl_floating_lane {
    ($t:ty, $bits:ty, $integral:ty, $lane_type:expr, $cast_fn:ident) => {
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const LANE_TYPE: LaneType = $lane_type;
            const BITS: usize = core::mem::size_of::<$t>() * 8;
            const BYTES: usize = core::mem::size_of::<$t>();
            const ZERO: Self = 0.0;

            type Integral = $integral;

            impl_lane_common!($t, $cast_fn);

            #[inline(always)]
            fn to_raw_bits(self) -> u64 {
                <$t>::to_bits(self) as u64
            }

            #[inline(always)]
            fn from_raw_bits(bits: u64) -> Self {
                <$t>::from_bits(bits as $bits)
            }
        }
    };
}

impl_integral_lane!(i8, u8, LaneType::I8, from_i8);
impl_integral_lane!(i16, u16, LaneType::I16, from_i16);
impl_integral_lane!(i32, u32, LaneType::I32, from_i32);
impl_integral_lane!(i64, u64, LaneType::I64, from_i64);
impl_floating_lane!(f32, u32, i32, LaneType::F32, from_f32);
impl_floating_lane!(f64, u64, i64, LaneType::F64, from_f64);
