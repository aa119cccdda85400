//! Vector register values
//!
//! `Vector<T>` is an immutable, `Copy` register of up to `MAX_LANES` lanes. A
//! vector loaded from a species holds exactly `species.lane_count()` lanes; a
//! lane-count-preserving conversion may produce a vector whose bit size is not
//! a supported shape (eight `i8` lanes converted to `i64` are 512 bits, but 64
//! `i8` lanes converted to `i64` are 4096), so the lane count is stored rather
//! than a species.

use core::fmt;
use core::ops::Index;

use crate::conversion;
use crate::error::ConversionError;
use crate::lane_type::LaneType;
use crate::shape::{VectorShape, MAX_LANES};
use crate::species::Species;
use crate::traits::Lane;

/// Register of `len` lanes of type `T`
#[derive(Clone, Copy)]
pub struct Vector<T: Lane> {
    pub(crate) lanes: [T; MAX_LANES],
    pub(crate) len: usize,
}

impl<T: Lane> Vector<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// All-zero vector of `species`
    #[inline]
    pub fn zero(species: Species<T>) -> Self {
        Self {
            lanes: [T::ZERO; MAX_LANES],
            len: species.lane_count(),
        }
    }

    /// Broadcast `value` to every lane of `species`
    pub fn splat(species: Species<T>, value: T) -> Self {
        let mut vector = Self::zero(species);
        vector.lanes[..vector.len].fill(value);
        vector
    }

    /// Load `species.lane_count()` lanes from the front of `values`
    ///
    /// # Panics
    ///
    /// Panics if `values` is too short
    #[inline]
    pub fn from_slice(species: Species<T>, values: &[T]) -> Self {
        Self::from_slice_at(species, values, 0)
    }

    /// Load `species.lane_count()` lanes starting at `values[offset]`
    ///
    /// # Panics
    ///
    /// Panics if `values` holds fewer than `offset + lane_count()` lanes
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanecast::{Species, Vector, VectorShape};
    ///
    /// let data: Vec<i32> = (0..1024).collect();
    /// let species = Species::<i32>::of(VectorShape::S128);
    /// let vector = Vector::from_slice_at(species, &data, 8);
    /// assert_eq!(vector.as_slice(), &[8, 9, 10, 11]);
    /// ```
    pub fn from_slice_at(species: Species<T>, values: &[T], offset: usize) -> Self {
        match Self::try_from_slice_at(species, values, offset) {
            Ok(vector) => vector,
            Err(err) => panic!("{}", err),
        }
    }

    /// Load from the front of `values`, or `SliceTooShort`
    #[inline]
    pub fn try_from_slice(species: Species<T>, values: &[T]) -> Result<Self, ConversionError> {
        Self::try_from_slice_at(species, values, 0)
    }

    /// Load starting at `values[offset]`, or `SliceTooShort`
    pub fn try_from_slice_at(
        species: Species<T>,
        values: &[T],
        offset: usize,
    ) -> Result<Self, ConversionError> {
        let lanes = species.lane_count();
        let end = offset
            .checked_add(lanes)
            .filter(|&end| end <= values.len())
            .ok_or(ConversionError::SliceTooShort {
                len: values.len(),
                offset,
                lanes,
            })?;

        let mut vector = Self::zero(species);
        vector.lanes[..lanes].copy_from_slice(&values[offset..end]);
        Ok(vector)
    }

    /// Vector holding exactly `values`, whatever its bit size
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or longer than `MAX_LANES`
    pub fn from_lanes(values: &[T]) -> Self {
        assert!(
            !values.is_empty() && values.len() <= MAX_LANES,
            "vector must hold 1..={} lanes, got {}",
            MAX_LANES,
            values.len()
        );
        let mut lanes = [T::ZERO; MAX_LANES];
        lanes[..values.len()].copy_from_slice(values);
        Self {
            lanes,
            len: values.len(),
        }
    }

    #[inline]
    pub(crate) fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        debug_assert!(len <= MAX_LANES);
        let mut lanes = [T::ZERO; MAX_LANES];
        for (i, lane) in lanes[..len].iter_mut().enumerate() {
            *lane = f(i);
        }
        Self { lanes, len }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of lanes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the vector holds no lanes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`
    #[inline]
    pub fn lane(&self, index: usize) -> T {
        self.as_slice()[index]
    }

    /// Lanes in order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes[..self.len]
    }

    /// Store all lanes to the front of `out`
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `len()`
    #[inline]
    pub fn copy_to_slice(&self, out: &mut [T]) {
        self.copy_to_slice_at(out, 0);
    }

    /// Store all lanes to `out[offset..offset + len()]`
    ///
    /// # Panics
    ///
    /// Panics if `out` is too short
    pub fn copy_to_slice_at(&self, out: &mut [T], offset: usize) {
        assert!(
            offset + self.len <= out.len(),
            "slice of length {} cannot take {} lanes at offset {}",
            out.len(),
            self.len,
            offset
        );
        out[offset..offset + self.len].copy_from_slice(self.as_slice());
    }

    /// Lane type tag
    #[inline]
    pub fn lane_type(&self) -> LaneType {
        T::LANE_TYPE
    }

    /// Size in bits (`len() * T::BITS`)
    #[inline]
    pub fn bit_size(&self) -> usize {
        self.len * T::BITS
    }

    /// Size in bytes
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.len * T::BYTES
    }

    /// Shape, if the bit size is a supported one
    pub fn shape(&self) -> Option<VectorShape> {
        VectorShape::try_from_bits(self.bit_size()).ok()
    }

    /// Species, if the bit size is a supported shape
    pub fn species(&self) -> Option<Species<T>> {
        self.shape().map(Species::of)
    }

    /// Lane-for-lane comparison of raw bit patterns
    ///
    /// Unlike `==`, NaN lanes compare equal to identical NaN lanes and `0.0`
    /// differs from `-0.0`.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(a, b)| a.to_raw_bits() == b.to_raw_bits())
    }

    // ========================================================================
    // Conversions (see `crate::conversion`)
    // ========================================================================

    /// Numeric conversion keeping the lane count
    #[inline]
    pub fn convert<U: Lane>(&self) -> Vector<U> {
        conversion::convert(self)
    }

    /// Numeric conversion into `species`, truncating or zero-padding lanes
    #[inline]
    pub fn convert_shape<U: Lane>(&self, species: Species<U>) -> Vector<U> {
        conversion::convert_shape(self, species)
    }

    /// `convert_shape` with part selection
    #[inline]
    pub fn convert_shape_part<U: Lane>(
        &self,
        species: Species<U>,
        part: i32,
    ) -> Result<Vector<U>, ConversionError> {
        conversion::convert_shape_part(self, species, part)
    }

    /// Shape-changing cast, identical to `convert_shape`
    #[inline]
    pub fn cast_shape<U: Lane>(&self, species: Species<U>) -> Vector<U> {
        conversion::cast_shape(self, species)
    }

    /// `cast_shape` with part selection
    #[inline]
    pub fn cast_shape_part<U: Lane>(
        &self,
        species: Species<U>,
        part: i32,
    ) -> Result<Vector<U>, ConversionError> {
        conversion::cast_shape_part(self, species, part)
    }

    /// Zero-extending conversion keeping the lane count
    #[inline]
    pub fn zero_extend<U: Lane>(&self) -> Result<Vector<U>, ConversionError> {
        conversion::zero_extend(self)
    }

    /// Zero-extending conversion into `species`
    #[inline]
    pub fn zero_extend_shape<U: Lane>(
        &self,
        species: Species<U>,
    ) -> Result<Vector<U>, ConversionError> {
        conversion::zero_extend_shape(self, species)
    }

    /// `zero_extend_shape` with part selection
    #[inline]
    pub fn zero_extend_shape_part<U: Lane>(
        &self,
        species: Species<U>,
        part: i32,
    ) -> Result<Vector<U>, ConversionError> {
        conversion::zero_extend_shape_part(self, species, part)
    }

    /// Bit reinterpretation into `species`
    #[inline]
    pub fn reinterpret_shape<U: Lane>(&self, species: Species<U>) -> Vector<U> {
        conversion::reinterpret_shape(self, species)
    }

    /// `reinterpret_shape` with part selection
    #[inline]
    pub fn reinterpret_shape_part<U: Lane>(
        &self,
        species: Species<U>,
        part: i32,
    ) -> Result<Vector<U>, ConversionError> {
        conversion::reinterpret_shape_part(self, species, part)
    }

    /// Reinterpret each lane as a same-sized lane type
    #[inline]
    pub fn reinterpret_lanes<U: Lane>(&self) -> Result<Vector<U>, ConversionError> {
        conversion::reinterpret_lanes(self)
    }

    /// View lanes as the same-sized integral type
    #[inline]
    pub fn view_as_integral_lanes(&self) -> Vector<T::Integral> {
        conversion::view_as_integral_lanes(self)
    }

    /// Byte lanes of the whole vector, lowest byte first
    #[inline]
    pub fn reinterpret_as_bytes(&self) -> Vector<i8> {
        conversion::reinterpret_as_bytes(self)
    }
}

impl<T: Lane> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Lane> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Lane> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
