use num_bigint::{BigInt, BigUint};

use crate::types::DisplayFormat;

/// Interprets a string of `0`/`1` characters (MSB first) as an unsigned integer.
///
/// Returns `None` when the input is empty or contains any other character.
pub fn parse_bits(bits: &[u8]) -> Option<BigUint> {
    BigUint::parse_bytes(bits, 2)
}

/// Renders a fully defined bit-string of a `width`-bit signal in the requested format.
///
/// Binary and hexadecimal output is zero padded to the signal width; signed decimal
/// reinterprets the value as two's complement over `width` bits.
pub fn format_value(bits: &[u8], width: u32, format: DisplayFormat) -> String {
    let value = parse_bits(bits).unwrap_or_default();
    match format {
        DisplayFormat::Binary => {
            let digits = width as usize;
            format!("{value:0digits$b}")
        }
        DisplayFormat::SignedDecimal => {
            if width > 0 && value.bits() >= u64::from(width) {
                let wrapped = BigInt::from(value) - (BigInt::from(1u8) << width);
                wrapped.to_string()
            } else {
                value.to_string()
            }
        }
        DisplayFormat::UnsignedDecimal => value.to_string(),
        DisplayFormat::HexLower => {
            let digits = width.div_ceil(4) as usize;
            format!("{value:0digits$x}")
        }
        DisplayFormat::HexUpper => {
            let digits = width.div_ceil(4) as usize;
            format!("{value:0digits$X}")
        }
    }
}
