use num_enum::{IntoPrimitive, TryFromPrimitive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rendering applied to the data labels of multi-bit signals.
///
/// The discriminants are the single-character codes accepted on the
/// command line and by [`PathTableBuilder::set_format`](crate::PathTableBuilder::set_format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DisplayFormat {
    /// Zero-padded binary, as wide as the signal.
    Binary = b'b',
    /// Two's complement over the signal width.
    SignedDecimal = b'd',
    /// Plain base-10 value.
    UnsignedDecimal = b'u',
    /// Zero-padded lower-case hexadecimal.
    #[default]
    HexLower = b'x',
    /// Zero-padded upper-case hexadecimal.
    HexUpper = b'X',
}

impl DisplayFormat {
    /// Parses a format character, failing with [`Error::InvalidFormat`] otherwise.
    pub fn from_char(ch: char) -> Result<Self> {
        u8::try_from(ch)
            .ok()
            .and_then(|code| Self::try_from(code).ok())
            .ok_or(Error::InvalidFormat(ch))
    }

    /// Returns the single-character code of this format.
    pub fn as_char(self) -> char {
        u8::from(self) as char
    }
}

impl TryFrom<char> for DisplayFormat {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self> {
        Self::from_char(ch)
    }
}
