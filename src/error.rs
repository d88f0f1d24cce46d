use std::fmt;
use std::io;

/// Convenient alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can be produced while converting a VCD trace into WaveJSON.
///
/// Every variant is terminal for a conversion run: the output document is
/// left without its footer so truncation is detectable.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Wrapper around standard I/O errors.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The declaration section could not be indexed, most commonly because
    /// `$enddefinitions` was never reached.
    #[error("malformed trace: {0}")]
    MalformedTrace(String),

    /// A requested signal path is not declared in the trace hierarchy.
    #[error("can't find path \"{0}\"")]
    UnknownSignal(String),

    /// A display format character outside of `b`, `d`, `u`, `x`, `X`.
    #[error("\"{0}\": invalid format character")]
    InvalidFormat(char),

    /// An unrecognized leading character in the value-change section.
    #[error("\"{0}\": unexpected character")]
    UnexpectedToken(char),

    /// A string could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record or option carried a value that could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    pub(crate) fn malformed<T: fmt::Display>(msg: T) -> Self {
        Self::MalformedTrace(msg.to_string())
    }

    pub(crate) fn invalid<T: fmt::Display>(msg: T) -> Self {
        Self::InvalidData(msg.to_string())
    }
}
