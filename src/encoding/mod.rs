//! Numeric helpers used to label multi-bit waves.

mod radix;

pub use radix::{format_value, parse_bits};
