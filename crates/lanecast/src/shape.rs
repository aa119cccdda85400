//! Vector shapes
//!
//! A `VectorShape` is the bit width of a vector register. Only the four widths
//! 64, 128, 256 and 512 exist as values. The platform maximum is not a fifth
//! case: `VectorShape::max()` resolves it at runtime to the widest register
//! the CPU provides, so the conversion rules never need to special-case it.

use core::fmt;

use crate::error::ConversionError;
use crate::lane_type::LaneType;
use crate::simd::CpuFeatures;

/// Widest supported vector, in bits
pub const MAX_BITS: usize = 512;

/// Widest supported vector, in bytes
pub const MAX_BYTES: usize = MAX_BITS / 8;

/// Most lanes any shaped vector can hold (512 bits of `i8`)
pub const MAX_LANES: usize = MAX_BITS / 8;

/// Bit width of a vector register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VectorShape {
    bits: u16,
}

impl VectorShape {
    /// 64-bit vectors
    pub const S64: VectorShape = VectorShape { bits: 64 };

    /// 128-bit vectors (SSE, NEON)
    pub const S128: VectorShape = VectorShape { bits: 128 };

    /// 256-bit vectors (AVX2)
    pub const S256: VectorShape = VectorShape { bits: 256 };

    /// 512-bit vectors (AVX-512)
    pub const S512: VectorShape = VectorShape { bits: 512 };

    /// The four fixed shapes in ascending order
    pub const FIXED: [VectorShape; 4] = [
        VectorShape::S64,
        VectorShape::S128,
        VectorShape::S256,
        VectorShape::S512,
    ];

    /// Shape for a bit size
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not 64, 128, 256 or 512. Shapes are construction-time
    /// constants, so an unsupported width is a programming error.
    pub fn from_bits(bits: usize) -> Self {
        match Self::try_from_bits(bits) {
            Ok(shape) => shape,
            Err(err) => panic!("{}", err),
        }
    }

    /// Shape for a bit size, or `UnsupportedBitSize`
    pub const fn try_from_bits(bits: usize) -> Result<Self, ConversionError> {
        match bits {
            64 | 128 | 256 | 512 => Ok(VectorShape { bits: bits as u16 }),
            _ => Err(ConversionError::UnsupportedBitSize { bits }),
        }
    }

    /// Widest shape natively supported on this machine
    ///
    /// Resolved from the detected CPU features and the target architecture
    /// (see `CpuFeatures::native_shape`). Backend selection and `force-*`
    /// features have no influence on it.
    ///
    /// ```rust
    /// use lanecast::VectorShape;
    ///
    /// let max = VectorShape::max();
    /// assert!(VectorShape::FIXED.contains(&max));
    /// ```
    pub fn max() -> Self {
        CpuFeatures::detect().native_shape()
    }

    /// The fixed shapes followed by the resolved max shape
    ///
    /// The max entry duplicates one of the fixed shapes; callers iterating over
    /// every (source, target) pair get the full 5×5 matrix.
    pub fn all() -> [VectorShape; 5] {
        [
            VectorShape::S64,
            VectorShape::S128,
            VectorShape::S256,
            VectorShape::S512,
            VectorShape::max(),
        ]
    }

    /// Smallest shape holding `lanes` lanes of `lane_type` exactly
    pub fn for_lane_count(lanes: usize, lane_type: LaneType) -> Result<Self, ConversionError> {
        Self::try_from_bits(lanes * lane_type.bits())
            .map_err(|_| ConversionError::UnsupportedLaneCount { lanes, lane_type })
    }

    /// Width in bits
    #[inline]
    pub const fn bits(self) -> usize {
        self.bits as usize
    }

    /// Width in bytes
    #[inline]
    pub const fn bytes(self) -> usize {
        self.bits as usize / 8
    }

    /// Number of `lane_type` lanes in this shape
    #[inline]
    pub const fn lane_count(self, lane_type: LaneType) -> usize {
        self.bits() / lane_type.bits()
    }
}

impl TryFrom<usize> for VectorShape {
    type Error = ConversionError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        Self::try_from_bits(bits)
    }
}

impl fmt::Display for VectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits)
    }
}
