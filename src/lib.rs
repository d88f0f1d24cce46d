#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Transparent decompression of trace inputs.
pub mod compression;
/// Conversion driver tying the reader and writer together.
pub mod convert;
/// Numeric formatting of multi-bit values.
pub mod encoding;
/// Shared error and result types.
pub mod error;
/// Signal declarations and the path table.
pub mod hierarchy;
/// Input and output handles.
pub mod io;
/// Streaming reader and clock-edge sampler for VCD traces.
pub mod reader;
/// Logic values and display formats.
pub mod types;
/// Streaming WaveJSON writer and wave encoder.
pub mod writer;

pub use convert::{ConvertOptions, ConvertSummary, Converter, ConverterBuilder};
pub use encoding::format_value;
pub use error::{Error, Result};
pub use hierarchy::{PathTable, PathTableBuilder, SignalDef, index_header, normalize_path};
pub use io::{OutputSink, open_trace};
pub use reader::{
    Chunk, DEFAULT_CHUNK_SIZE, Edge, EdgeSampler, Record, SamplerOptions, TraceReader,
    parse_record,
};
pub use types::*;
pub use writer::{
    EncodedWave, WaveEncoder, WaveJsonWriter, WriterBuilder, WriterOptions, encode_wave,
};
