//! Transparent decompression of trace inputs.

use std::io::BufRead;

use crate::error::Result;

/// Leading bytes of a gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` when `prefix` starts with the gzip magic number.
pub fn is_gzip(prefix: &[u8]) -> bool {
    prefix.starts_with(&GZIP_MAGIC)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "gzip")] {
        fn gzip_decoder<R: BufRead + 'static>(input: R) -> Result<Box<dyn BufRead>> {
            use flate2::bufread::MultiGzDecoder;
            use std::io::BufReader;

            tracing::debug!("decoding gzip-compressed trace");
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(input))))
        }
    } else {
        fn gzip_decoder<R: BufRead + 'static>(_input: R) -> Result<Box<dyn BufRead>> {
            Err(crate::error::Error::invalid(
                "gzip-compressed traces require the `gzip` feature",
            ))
        }
    }
}

/// Wraps `input` in a decoder when it holds a gzip stream, otherwise returns it as is.
pub fn decompress_input<R>(mut input: R) -> Result<Box<dyn BufRead>>
where
    R: BufRead + 'static,
{
    if is_gzip(input.fill_buf()?) {
        return gzip_decoder(input);
    }
    Ok(Box::new(input))
}
