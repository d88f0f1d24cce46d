//! Core type definitions used across the crate.

mod enums;
mod value;

pub use enums::*;
pub use value::*;
