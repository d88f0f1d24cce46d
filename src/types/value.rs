#![allow(missing_docs)]

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Four-state logic level of a single bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Logic {
    Zero,
    One,
    Unknown,
    HighZ,
}

impl Logic {
    /// Parses a VCD bit character.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            'x' => Some(Self::Unknown),
            'z' => Some(Self::HighZ),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Unknown => 'x',
            Self::HighZ => 'z',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Unknown => "x",
            Self::HighZ => "z",
        }
    }
}

/// Bit characters of a vector value, MSB first, stored inline for common widths.
pub type BitString = SmallVec<[u8; 32]>;

/// Last known value of a traced signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueState {
    /// Scalar value from a `<bit><id>` record.
    Bit(Logic),
    /// Bit-string from a `b<bits> <id>` record.
    Vector(BitString),
}

/// Classification of a value's bits used by the wave encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    /// Every bit is `0` or `1`.
    Defined,
    /// Every bit is `z`.
    HighZ,
    /// Anything else.
    Unknown,
}

impl Default for ValueState {
    fn default() -> Self {
        Self::unknown()
    }
}

impl ValueState {
    /// Value of a signal before the trace assigns one.
    pub fn unknown() -> Self {
        Self::Bit(Logic::Unknown)
    }

    /// Builds the state for a vector record targeting a signal of `width` bits.
    ///
    /// A single-bit signal always collapses to [`ValueState::Bit`] so that clock edges
    /// are detected the same way whether the trace writes `1!` or `b1 !`.
    pub fn from_vector(bits: &str, width: u32) -> Self {
        if width == 1 {
            let level = bits
                .chars()
                .last()
                .and_then(Logic::from_char)
                .unwrap_or(Logic::Unknown);
            return Self::Bit(level);
        }
        Self::Vector(bits.bytes().collect())
    }

    /// Returns the logic level when the value is a scalar.
    pub fn logic(&self) -> Option<Logic> {
        match self {
            Self::Bit(level) => Some(*level),
            Self::Vector(_) => None,
        }
    }

    /// Raw bit characters, MSB first.
    pub fn bits(&self) -> &[u8] {
        match self {
            Self::Bit(level) => level.as_str().as_bytes(),
            Self::Vector(bits) => bits,
        }
    }

    pub fn kind(&self) -> VectorKind {
        let bits = self.bits();
        if bits.iter().all(|&b| b == b'0' || b == b'1') {
            VectorKind::Defined
        } else if bits.iter().all(|&b| b == b'z') {
            VectorKind::HighZ
        } else {
            VectorKind::Unknown
        }
    }
}
