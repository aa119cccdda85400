//! Runtime lane type tags
//!
//! `LaneType` names the six element types a vector lane can hold. Generic code
//! works with the `Lane` trait; `LaneType` is what shows up in error messages,
//! backend kernel lookup and species descriptions.

use core::fmt;

/// Element type of a vector lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaneType {
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// IEEE-754 binary32
    F32,
    /// IEEE-754 binary64
    F64,
}

impl LaneType {
    /// All lane types, integral first, in ascending size
    pub const ALL: [LaneType; 6] = [
        LaneType::I8,
        LaneType::I16,
        LaneType::I32,
        LaneType::I64,
        LaneType::F32,
        LaneType::F64,
    ];

    /// Lane size in bits
    #[inline]
    pub const fn bits(self) -> usize {
        match self {
            LaneType::I8 => 8,
            LaneType::I16 => 16,
            LaneType::I32 | LaneType::F32 => 32,
            LaneType::I64 | LaneType::F64 => 64,
        }
    }

    /// Lane size in bytes
    #[inline]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    /// True for `F32` and `F64`
    #[inline]
    pub const fn is_floating(self) -> bool {
        matches!(self, LaneType::F32 | LaneType::F64)
    }

    /// True for the signed integer types
    #[inline]
    pub const fn is_integral(self) -> bool {
        !self.is_floating()
    }

    /// Integral lane type of the same size
    pub const fn as_integral(self) -> LaneType {
        match self {
            LaneType::F32 => LaneType::I32,
            LaneType::F64 => LaneType::I64,
            other => other,
        }
    }

    /// Floating lane type of the same size, if one exists
    ///
    /// There is no 8- or 16-bit floating lane type, so `I8` and `I16` return `None`.
    pub const fn as_floating(self) -> Option<LaneType> {
        match self {
            LaneType::I32 | LaneType::F32 => Some(LaneType::F32),
            LaneType::I64 | LaneType::F64 => Some(LaneType::F64),
            LaneType::I8 | LaneType::I16 => None,
        }
    }

    /// Single-letter code used in conversion names (`B2I`, `F2D`, ...)
    pub const fn code(self) -> char {
        match self {
            LaneType::I8 => 'B',
            LaneType::I16 => 'S',
            LaneType::I32 => 'I',
            LaneType::I64 => 'L',
            LaneType::F32 => 'F',
            LaneType::F64 => 'D',
        }
    }

    /// Rust primitive name
    pub const fn name(self) -> &'static str {
        match self {
            LaneType::I8 => "i8",
            LaneType::I16 => "i16",
            LaneType::I32 => "i32",
            LaneType::I64 => "i64",
            LaneType::F32 => "f32",
            LaneType::F64 => "f64",
        }
    }
}

impl fmt::Display for LaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
