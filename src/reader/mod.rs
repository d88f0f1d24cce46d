//! Line-oriented streaming reader for VCD traces.

use std::io::BufRead;

use crate::error::Result;
use crate::hierarchy::{PathTable, index_header};

mod record;
pub use record::{Record, parse_record};

mod sampler;
pub use sampler::{Chunk, DEFAULT_CHUNK_SIZE, Edge, EdgeSampler, SamplerOptions};

/// Cursor over the lines of a trace.
///
/// The same reader is used first to index the header and then, positioned right after
/// `$enddefinitions`, to stream value-change records. It never rewinds.
pub struct TraceReader<R: BufRead> {
    input: R,
    line: String,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered input positioned at the start of the trace.
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    /// Indexes the declaration section, leaving the cursor on the first body line.
    pub fn read_header(&mut self) -> Result<PathTable> {
        index_header(self)
    }

    /// Returns the next raw line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim_end_matches(['\r', '\n'])))
    }

    /// Returns the next value-change record, skipping blank lines.
    pub fn next_record(&mut self) -> Result<Option<Record<'_>>> {
        loop {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if !self.line.trim().is_empty() {
                break;
            }
        }
        parse_record(&self.line)
    }
}
