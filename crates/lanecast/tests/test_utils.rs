//! Test utilities for lanecast
//!
//! Provides an independent scalar oracle, deterministic fixtures, proptest
//! strategies, and assertion helpers shared by the integration tests.

#![allow(dead_code)]

use lanecast::{Lane, LaneType, Species, Vector, VectorShape};
use proptest::prelude::*;

/// Length of every fixture array
pub const FIXTURE_LEN: usize = 1024;

// ============================================================================
// Reference Oracle
// ============================================================================

/// A lane value widened to a type that holds every lane type exactly
#[derive(Debug, Clone, Copy)]
pub enum Wide {
    /// Any integral lane, sign-extended
    Int(i64),
    /// An `f32` lane
    F32(f32),
    /// An `f64` lane
    F64(f64),
}

/// Widen a lane without going through `Lane::cast`
pub fn widen<S: Lane>(x: S) -> Wide {
    let bits = x.to_raw_bits();
    match S::LANE_TYPE {
        LaneType::F32 => Wide::F32(f32::from_bits(bits as u32)),
        LaneType::F64 => Wide::F64(f64::from_bits(bits)),
        _ => {
            let shift = 64 - S::BITS as u32;
            Wide::Int(((bits << shift) as i64) >> shift)
        }
    }
}

/// Saturating, truncating float to integer conversion for a `bits`-wide integer
///
/// NaN maps to zero. Written with `libm::trunc` and explicit bounds so it does
/// not share code with the library's `as` casts.
pub fn ref_float_to_int(value: f64, bits: u32) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = -(2f64.powi(bits as i32 - 1));
    let max_exclusive = 2f64.powi(bits as i32 - 1);
    let t = libm::trunc(value);
    if t <= min {
        (-1i64) << (bits - 1)
    } else if t >= max_exclusive {
        (1u64 << (bits - 1)).wrapping_sub(1) as i64
    } else {
        t as i64
    }
}

/// Reference conversion of one lane from `S` to `T`
pub fn ref_cast<S: Lane, T: Lane>(x: S) -> T {
    let wide = widen(x);
    match T::LANE_TYPE {
        LaneType::F32 => {
            let value = match wide {
                // Single rounding straight from the integer
                Wide::Int(i) => i as f32,
                Wide::F32(f) => f,
                Wide::F64(d) => d as f32,
            };
            T::from_raw_bits(value.to_bits() as u64)
        }
        LaneType::F64 => {
            let value = match wide {
                Wide::Int(i) => i as f64,
                Wide::F32(f) => f as f64,
                Wide::F64(d) => d,
            };
            T::from_raw_bits(value.to_bits())
        }
        _ => {
            let bits = T::BITS as u32;
            let value = match wide {
                Wide::Int(i) => i,
                Wide::F32(f) => ref_float_to_int(f as f64, bits),
                Wide::F64(d) => ref_float_to_int(d, bits),
            };
            // Keep the low `bits` bits
            let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
            T::from_raw_bits(value as u64 & mask)
        }
    }
}

/// Little-endian byte image of `lanes`
pub fn ref_bytes<S: Lane>(lanes: &[S]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(lanes.len() * S::BYTES);
    for lane in lanes {
        let bits = lane.to_raw_bits();
        for k in 0..S::BYTES {
            bytes.push((bits >> (8 * k)) as u8);
        }
    }
    bytes
}

/// Decode `bytes` as little-endian lanes of `T`
pub fn ref_from_bytes<T: Lane>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(T::BYTES)
        .map(|chunk| {
            let bits = chunk
                .iter()
                .enumerate()
                .fold(0u64, |acc, (k, &b)| acc | (b as u64) << (8 * k));
            T::from_raw_bits(bits)
        })
        .collect()
}

/// Place a logical result into an output of `out_len` elements
///
/// Expansion (`logical.len() >= out_len`) returns block `part`; contraction
/// writes `logical` at block `-part` of a zeroed output.
pub fn ref_place<T: Copy>(logical: &[T], out_len: usize, part: i32, zero: T) -> Vec<T> {
    if logical.len() >= out_len {
        let origin = part as usize * out_len;
        logical[origin..origin + out_len].to_vec()
    } else {
        let origin = (-part) as usize * logical.len();
        let mut out = vec![zero; out_len];
        out[origin..origin + logical.len()].copy_from_slice(logical);
        out
    }
}

/// Reference `convert_shape_part`
pub fn ref_convert_shape<S: Lane, T: Lane>(src: &[S], species: Species<T>, part: i32) -> Vec<T> {
    let logical: Vec<T> = src.iter().map(|&x| ref_cast::<S, T>(x)).collect();
    ref_place(&logical, species.lane_count(), part, T::ZERO)
}

/// Reference `reinterpret_shape_part`
pub fn ref_reinterpret<S: Lane, T: Lane>(src: &[S], species: Species<T>, part: i32) -> Vec<T> {
    let bytes = ref_bytes(src);
    ref_from_bytes(&ref_place(&bytes, species.vector_byte_size(), part, 0))
}

/// Inclusive range of valid part numbers for a ratio from `part_limit`
pub fn part_range(limit: i32) -> core::ops::RangeInclusive<i32> {
    if limit > 0 {
        0..=limit - 1
    } else if limit < 0 {
        limit + 1..=0
    } else {
        0..=0
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// SplitMix64, for deterministic fixtures
pub struct SplitMix64(u64);

impl SplitMix64 {
    /// Generator seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next 64 random bits
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Boundary values for `T`
pub fn special_values<T: Lane>() -> Vec<T> {
    if T::LANE_TYPE.is_floating() {
        [
            0.0,
            -0.0,
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324,
            1.0,
            -1.0,
            0.5,
            -1.5,
            2.5,
            127.9,
            -128.9,
            65535.5,
            2147483648.0,
            -2147483649.0,
            9.3e18,
            -9.3e18,
            3.4e38,
            1e-40,
            16777217.0,
        ]
        .into_iter()
        .map(T::from_f64)
        .collect()
    } else {
        let min = 1u64 << (T::BITS - 1);
        [0, 1, u64::MAX, min, min - 1, 0x7F, 0x80, 0xFF, 0x7FFF, 0x8000, 0xFFFF]
            .into_iter()
            .map(T::from_raw_bits)
            .collect()
    }
}

/// Deterministic array of `FIXTURE_LEN` lanes
///
/// Every 16th element is a boundary value, a third of the rest are random bit
/// patterns and the remainder are moderate signed numbers.
pub fn fixture<T: Lane>() -> Vec<T> {
    let specials = special_values::<T>();
    let mut rng = SplitMix64::new(0x1A4E_CA57 ^ T::LANE_TYPE.code() as u64);

    (0..FIXTURE_LEN)
        .map(|i| {
            let r = rng.next_u64();
            if i % 16 == 0 {
                specials[(i / 16) % specials.len()]
            } else if i % 3 == 0 {
                T::from_raw_bits(r)
            } else {
                T::from_f64((r as i64 >> 40) as f64 / 16.0)
            }
        })
        .collect()
}

// ============================================================================
// Proptest Strategies
// ============================================================================

/// Strategy for any of the four fixed shapes
pub fn any_shape() -> impl Strategy<Value = VectorShape> {
    prop::sample::select(VectorShape::FIXED.to_vec())
}

/// Strategy for a lane with arbitrary bits (NaNs and infinities included)
pub fn any_lane<T: Lane>() -> impl Strategy<Value = T> {
    any::<u64>().prop_map(T::from_raw_bits)
}

/// Strategy for a lane that is either a boundary value or arbitrary bits
pub fn edge_or_any_lane<T: Lane>() -> impl Strategy<Value = T> {
    prop_oneof![
        1 => prop::sample::select(special_values::<T>()),
        3 => any_lane::<T>(),
    ]
}

/// Strategy for a full vector of `species`
pub fn vector_of<T: Lane>(species: Species<T>) -> impl Strategy<Value = Vector<T>> {
    prop::collection::vec(edge_or_any_lane::<T>(), species.lane_count())
        .prop_map(|lanes| Vector::from_lanes(&lanes))
}

/// Strategy for a vector of random shape
pub fn any_vector<T: Lane>() -> impl Strategy<Value = Vector<T>> {
    any_shape().prop_flat_map(|shape| vector_of(Species::<T>::of(shape)))
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// True if `a` and `b` have the same bits, or are both NaN
pub fn lanes_match<T: Lane>(a: T, b: T) -> bool {
    #[allow(clippy::eq_op)]
    let both_nan = a != a && b != b;
    both_nan || a.to_raw_bits() == b.to_raw_bits()
}

/// Assert lane-for-lane equality, bit-exact except that any NaN matches any NaN
pub fn assert_lanes_match<T: Lane>(actual: &[T], expected: &[T], context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: lane count mismatch",
        context
    );
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            lanes_match(a, e),
            "{}: lane {} differs. Expected: {:?}, Actual: {:?}",
            context,
            i,
            e,
            a
        );
    }
}

/// Assert bit-exact lane-for-lane equality, NaN payloads included
pub fn assert_bits_eq<T: Lane>(actual: &[T], expected: &[T], context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: lane count mismatch",
        context
    );
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a.to_raw_bits(),
            e.to_raw_bits(),
            "{}: lane {} bits differ. Expected: {:?}, Actual: {:?}",
            context,
            i,
            e,
            a
        );
    }
}
