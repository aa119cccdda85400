//! Vector species: a shape paired with a lane type

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::conversion;
use crate::error::ConversionError;
use crate::lane_type::LaneType;
use crate::shape::VectorShape;
use crate::traits::Lane;
use crate::vector::Vector;

/// Shape and lane type of a vector, which together fix its lane count
///
/// # Example
///
/// ```rust
/// use lanecast::{Species, VectorShape};
///
/// let species = Species::<i16>::of(VectorShape::S128);
/// assert_eq!(species.lane_count(), 8);
/// assert_eq!(species.vector_byte_size(), 16);
/// ```
pub struct Species<T: Lane> {
    shape: VectorShape,
    _lane: PhantomData<fn() -> T>,
}

impl<T: Lane> Species<T> {
    /// Species of `T` lanes in `shape`
    #[inline]
    pub const fn of(shape: VectorShape) -> Self {
        Self {
            shape,
            _lane: PhantomData,
        }
    }

    /// Species of `T` lanes in the platform's max shape
    pub fn max() -> Self {
        Self::of(VectorShape::max())
    }

    /// Species holding exactly `lanes` lanes of `T`
    pub fn for_lane_count(lanes: usize) -> Result<Self, ConversionError> {
        VectorShape::for_lane_count(lanes, T::LANE_TYPE).map(Self::of)
    }

    /// Vector shape
    #[inline]
    pub const fn shape(self) -> VectorShape {
        self.shape
    }

    /// Lane type tag
    #[inline]
    pub const fn lane_type(self) -> LaneType {
        T::LANE_TYPE
    }

    /// Lane size in bits
    #[inline]
    pub const fn element_bits(self) -> usize {
        T::BITS
    }

    /// Number of lanes
    #[inline]
    pub const fn lane_count(self) -> usize {
        self.shape.bits() / T::BITS
    }

    /// Vector size in bits
    #[inline]
    pub const fn vector_bit_size(self) -> usize {
        self.shape.bits()
    }

    /// Vector size in bytes
    #[inline]
    pub const fn vector_byte_size(self) -> usize {
        self.shape.bytes()
    }

    /// Same lane type, different shape
    #[inline]
    pub const fn with_shape(self, shape: VectorShape) -> Self {
        Self::of(shape)
    }

    /// Same shape, different lane type
    #[inline]
    pub const fn with_lane_type<U: Lane>(self) -> Species<U> {
        Species::of(self.shape)
    }

    /// Range of part numbers valid for a shape change into `output`
    ///
    /// The logical result is `lane_count() * U::BITS` bits for lanewise
    /// conversions and `vector_bit_size()` bits for reinterpretation. Returns
    /// `M > 0` when the logical result is `M` times larger than `output`
    /// (valid parts `0..M`), `-M` when it is `M` times smaller (valid parts
    /// `-(M-1)..=0`) and `0` when the sizes match.
    ///
    /// ```rust
    /// use lanecast::{Species, VectorShape};
    ///
    /// let bytes = Species::<i8>::of(VectorShape::S64);
    /// let longs = Species::<i64>::of(VectorShape::S128);
    /// // 8 lanes of i64 = 512 logical bits into a 128-bit output.
    /// assert_eq!(bytes.part_limit(longs, true), 4);
    /// // 64 source bits into a 128-bit output.
    /// assert_eq!(bytes.part_limit(longs, false), -2);
    /// ```
    pub fn part_limit<U: Lane>(self, output: Species<U>, lanewise: bool) -> i32 {
        let logical = if lanewise {
            self.lane_count() * U::BITS
        } else {
            self.vector_bit_size()
        };
        conversion::part_limit(logical, output.vector_bit_size())
    }

    /// All-zero vector of this species
    #[inline]
    pub fn zero(self) -> Vector<T> {
        Vector::zero(self)
    }

    /// Load a vector of this species from the front of `values`
    ///
    /// # Panics
    ///
    /// Panics if `values` holds fewer than `lane_count()` lanes
    #[inline]
    pub fn from_slice(self, values: &[T]) -> Vector<T> {
        Vector::from_slice(self, values)
    }
}

impl<T: Lane> Clone for Species<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Lane> Copy for Species<T> {}

impl<T: Lane> PartialEq for Species<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl<T: Lane> Eq for Species<T> {}

impl<T: Lane> Hash for Species<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        T::LANE_TYPE.hash(state);
        self.shape.hash(state);
    }
}

impl<T: Lane> fmt::Debug for Species<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Species")
            .field("lane_type", &T::LANE_TYPE)
            .field("shape", &self.shape)
            .field("lanes", &self.lane_count())
            .finish()
    }
}

impl<T: Lane> fmt::Display for Species<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Species[{}, {}, {}]", T::LANE_TYPE, self.lane_count(), self.shape)
    }
}
