//! Lane conversion engine
//!
//! Three families of operations move lanes between species:
//!
//! - **convert**: numeric conversion that keeps the lane count; the result's
//!   bit size is whatever `lanes * T::BITS` works out to
//! - **convert_shape / cast_shape**: numeric conversion into a target species;
//!   extra source lanes are dropped, missing ones are zero
//! - **reinterpret_shape**: no numeric conversion; the source's little-endian
//!   byte image is truncated or zero-extended to the target size and decoded
//!   as target lanes
//!
//! The `_part` variants select which block of an oversized logical result is
//! returned (expansion, `part >= 0`) or where an undersized one is placed in
//! the output (contraction, `part <= 0`). Part zero is always valid and is what
//! the plain variants use.
//!
//! # Example
//!
//! ```rust
//! use lanecast::{conversion, Species, Vector, VectorShape};
//!
//! let bytes = Vector::from_slice(Species::<i8>::of(VectorShape::S64), &[1, 2, 3, 4, 5, 6, 7, 8]);
//! let ints = conversion::convert_shape(&bytes, Species::<i32>::of(VectorShape::S512));
//!
//! assert_eq!(ints.len(), 16);
//! assert_eq!(&ints.as_slice()[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
//! assert!(ints.as_slice()[8..].iter().all(|&lane| lane == 0));
//! ```

use crate::error::ConversionError;
use crate::shape::MAX_BYTES;
use crate::species::Species;
use crate::traits::Lane;
use crate::vector::Vector;

// ============================================================================
// Part arithmetic
// ============================================================================

/// Expansion/contraction ratio between a logical result and a physical output
///
/// Positive for expansion, negative for contraction, zero for equal sizes.
/// Both sizes must be in the same unit and non-zero.
pub(crate) fn part_limit(logical: usize, physical: usize) -> i32 {
    if logical > physical {
        (logical / physical) as i32
    } else if logical < physical {
        -((physical / logical) as i32)
    } else {
        0
    }
}

fn check_part(limit: i32, part: i32) -> Result<(), ConversionError> {
    let (min, max) = if limit > 0 {
        (0, limit - 1)
    } else if limit < 0 {
        (limit + 1, 0)
    } else {
        (0, 0)
    };

    if part < min || part > max {
        return Err(ConversionError::InvalidPart { part, min, max });
    }
    Ok(())
}

// ============================================================================
// Lanewise conversions
// ============================================================================

/// Apply `f` to the lanes selected by `part` and place them in a `species` vector
///
/// `part` must already be validated against the lane-count ratio.
#[inline]
fn lanewise<S, T, F>(src: &Vector<S>, species: Species<T>, part: i32, f: F) -> Vector<T>
where
    S: Lane,
    T: Lane,
    F: Fn(S) -> T,
{
    let in_lanes = src.len();
    let out_lanes = species.lane_count();
    let mut out = Vector::zero(species);

    if in_lanes >= out_lanes {
        let origin = part as usize * out_lanes;
        for (dst, &lane) in out.lanes[..out_lanes]
            .iter_mut()
            .zip(&src.lanes[origin..origin + out_lanes])
        {
            *dst = f(lane);
        }
    } else {
        let origin = (-part) as usize * in_lanes;
        for (dst, &lane) in out.lanes[origin..origin + in_lanes]
            .iter_mut()
            .zip(src.as_slice())
        {
            *dst = f(lane);
        }
    }

    out
}

#[inline]
fn lanewise_limit<S: Lane, T: Lane>(src: &Vector<S>, species: Species<T>) -> i32 {
    part_limit(src.len(), species.lane_count())
}

#[inline]
fn check_integral<S: Lane, T: Lane>() -> Result<(), ConversionError> {
    if S::LANE_TYPE.is_floating() || T::LANE_TYPE.is_floating() {
        return Err(ConversionError::NonIntegralZeroExtend {
            from: S::LANE_TYPE,
            to: T::LANE_TYPE,
        });
    }
    Ok(())
}

#[inline(always)]
fn zero_extend_lane<S: Lane, T: Lane>(lane: S) -> T {
    T::from_raw_bits(lane.to_raw_bits())
}

/// Numeric conversion keeping the lane count
///
/// Lane `i` of the result is `src[i].cast::<T>()`.
///
/// ```rust
/// use lanecast::{conversion, Species, Vector, VectorShape};
///
/// let longs = Vector::from_slice(Species::<i64>::of(VectorShape::S128), &[-1, 1 << 40]);
/// let floats = conversion::convert::<i64, f32>(&longs);
///
/// assert_eq!(floats.as_slice(), &[-1.0, 1099511627776.0]);
/// assert_eq!(floats.bit_size(), 64);
/// ```
pub fn convert<S: Lane, T: Lane>(src: &Vector<S>) -> Vector<T> {
    Vector::from_fn(src.len(), |i| src.lanes[i].cast::<T>())
}

/// Numeric conversion into `species`, truncating or zero-padding the lane sequence
pub fn convert_shape<S: Lane, T: Lane>(src: &Vector<S>, species: Species<T>) -> Vector<T> {
    lanewise(src, species, 0, |lane| lane.cast::<T>())
}

/// `convert_shape` selecting block `part` of the converted lanes
pub fn convert_shape_part<S: Lane, T: Lane>(
    src: &Vector<S>,
    species: Species<T>,
    part: i32,
) -> Result<Vector<T>, ConversionError> {
    check_part(lanewise_limit(src, species), part)?;
    Ok(lanewise(src, species, part, |lane| lane.cast::<T>()))
}

/// Shape-changing cast; identical to `convert_shape`
#[inline]
pub fn cast_shape<S: Lane, T: Lane>(src: &Vector<S>, species: Species<T>) -> Vector<T> {
    convert_shape(src, species)
}

/// Shape-changing cast with part selection; identical to `convert_shape_part`
#[inline]
pub fn cast_shape_part<S: Lane, T: Lane>(
    src: &Vector<S>,
    species: Species<T>,
    part: i32,
) -> Result<Vector<T>, ConversionError> {
    convert_shape_part(src, species, part)
}

/// Zero-extending conversion keeping the lane count
///
/// Source lanes are read as unsigned integers: widening fills with zero bits
/// instead of copies of the sign bit, narrowing truncates like `convert`.
///
/// ```rust
/// use lanecast::{conversion, Vector};
///
/// let bytes = Vector::from_lanes(&[-1i8, 2]);
/// let ints = conversion::zero_extend::<i8, i32>(&bytes).unwrap();
/// assert_eq!(ints.as_slice(), &[255, 2]);
/// ```
pub fn zero_extend<S: Lane, T: Lane>(src: &Vector<S>) -> Result<Vector<T>, ConversionError> {
    check_integral::<S, T>()?;
    Ok(Vector::from_fn(src.len(), |i| {
        zero_extend_lane::<S, T>(src.lanes[i])
    }))
}

/// Zero-extending conversion into `species`
pub fn zero_extend_shape<S: Lane, T: Lane>(
    src: &Vector<S>,
    species: Species<T>,
) -> Result<Vector<T>, ConversionError> {
    zero_extend_shape_part(src, species, 0)
}

/// Zero-extending conversion into `species` with part selection
pub fn zero_extend_shape_part<S: Lane, T: Lane>(
    src: &Vector<S>,
    species: Species<T>,
    part: i32,
) -> Result<Vector<T>, ConversionError> {
    check_integral::<S, T>()?;
    check_part(lanewise_limit(src, species), part)?;
    Ok(lanewise(src, species, part, zero_extend_lane::<S, T>))
}

// ============================================================================
// Reinterpretation
// ============================================================================

/// Reinterpret the little-endian byte image of `src` as a `species` vector
///
/// With `T == S` and matching shapes the result is a bit-exact copy.
///
/// ```rust
/// use lanecast::{conversion, Species, Vector, VectorShape};
///
/// let one = Vector::from_slice(Species::<f64>::of(VectorShape::S64), &[1.0]);
/// let halves = conversion::reinterpret_shape(&one, Species::<i32>::of(VectorShape::S64));
///
/// // 1.0 is 0x3FF0_0000_0000_0000; the low half comes first.
/// assert_eq!(halves.as_slice(), &[0, 0x3FF0_0000]);
/// ```
pub fn reinterpret_shape<S: Lane, T: Lane>(src: &Vector<S>, species: Species<T>) -> Vector<T> {
    reinterpret(src, species, 0)
}

/// `reinterpret_shape` selecting block `part` of the source bytes
pub fn reinterpret_shape_part<S: Lane, T: Lane>(
    src: &Vector<S>,
    species: Species<T>,
    part: i32,
) -> Result<Vector<T>, ConversionError> {
    check_part(
        part_limit(src.byte_size(), species.vector_byte_size()),
        part,
    )?;
    Ok(reinterpret(src, species, part))
}

fn reinterpret<S: Lane, T: Lane>(src: &Vector<S>, species: Species<T>, part: i32) -> Vector<T> {
    let in_bytes = src.byte_size();
    let out_bytes = species.vector_byte_size();
    let mut image = [0u8; MAX_BYTES];

    if in_bytes >= out_bytes {
        // out_bytes is a multiple of 8, so the window starts on a lane boundary
        let first = part as usize * out_bytes / S::BYTES;
        let count = out_bytes / S::BYTES;
        for (j, &lane) in src.lanes[first..first + count].iter().enumerate() {
            lane.write_le_bytes(&mut image[j * S::BYTES..]);
        }
    } else {
        let origin = (-part) as usize * in_bytes;
        for (j, &lane) in src.as_slice().iter().enumerate() {
            lane.write_le_bytes(&mut image[origin + j * S::BYTES..]);
        }
    }

    Vector::from_fn(species.lane_count(), |i| {
        T::read_le_bytes(&image[i * T::BYTES..])
    })
}

/// Reinterpret each lane as a lane of the same size
///
/// Fails with `LaneSizeMismatch` when `S` and `T` differ in size.
pub fn reinterpret_lanes<S: Lane, T: Lane>(src: &Vector<S>) -> Result<Vector<T>, ConversionError> {
    if S::BITS != T::BITS {
        return Err(ConversionError::LaneSizeMismatch {
            from: S::LANE_TYPE,
            to: T::LANE_TYPE,
        });
    }
    Ok(Vector::from_fn(src.len(), |i| {
        T::from_raw_bits(src.lanes[i].to_raw_bits())
    }))
}

/// View lanes as the integral type of the same size
pub fn view_as_integral_lanes<S: Lane>(src: &Vector<S>) -> Vector<S::Integral> {
    Vector::from_fn(src.len(), |i| {
        S::Integral::from_raw_bits(src.lanes[i].to_raw_bits())
    })
}

/// Byte lanes covering the whole vector, lowest byte first
///
/// # Panics
///
/// Panics if the vector is wider than 512 bits, which only happens for
/// lane-count-preserving conversions into wider lanes.
pub fn reinterpret_as_bytes<S: Lane>(src: &Vector<S>) -> Vector<i8> {
    let in_bytes = src.byte_size();
    assert!(
        in_bytes <= MAX_BYTES,
        "{} byte vector is too wide to view as bytes",
        in_bytes
    );

    let mut image = [0u8; MAX_BYTES];
    for (j, &lane) in src.as_slice().iter().enumerate() {
        lane.write_le_bytes(&mut image[j * S::BYTES..]);
    }
    Vector::from_fn(in_bytes, |i| image[i] as i8)
}
