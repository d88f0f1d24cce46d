//! Input and output handles owned by a conversion run.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Stdout, Write};
use std::path::Path;

use crate::compression::decompress_input;
use crate::error::Result;
use crate::reader::TraceReader;

/// Boxed line source produced by [`open_trace`].
pub type TraceInput = Box<dyn io::BufRead>;

/// Opens a trace file for reading, decoding gzip input when supported.
pub fn open_trace(path: impl AsRef<Path>) -> Result<TraceReader<TraceInput>> {
    let file = File::open(path)?;
    let input = decompress_input(BufReader::new(file))?;
    Ok(TraceReader::new(input))
}

/// Destination of a WaveJSON document.
pub enum OutputSink {
    /// Standard output, used when no output path is configured.
    Stdout(BufWriter<Stdout>),
    /// A file created (or truncated) for the run.
    File(BufWriter<File>),
}

impl OutputSink {
    /// Creates a file sink for `path`, or a standard output sink when `path` is `None`.
    pub fn create(path: Option<&Path>) -> Result<Self> {
        Ok(match path {
            Some(path) => Self::File(BufWriter::new(File::create(path)?)),
            None => Self::Stdout(BufWriter::new(io::stdout())),
        })
    }

    fn writer_mut(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(out) => out,
            Self::File(file) => file,
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer_mut().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer_mut().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer_mut().flush()
    }
}
