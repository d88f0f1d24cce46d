//! Drives a trace through the sampler and the WaveJSON writer.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::hierarchy::{PathTable, PathTableBuilder};
use crate::io::{TraceInput, open_trace};
use crate::reader::{EdgeSampler, SamplerOptions, TraceReader};
use crate::writer::WaveJsonWriter;

/// Everything needed to configure a conversion, independent of the input source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvertOptions {
    /// Signal paths to render; the first one is the clock. Empty selects every signal.
    pub paths: Vec<String>,
    /// Chunking and time window.
    pub sampler: SamplerOptions,
    /// Display format characters assigned to multi-bit signals.
    pub formats: Vec<(String, char)>,
}

/// Counters reported once a conversion completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Array groups written after the clock row.
    pub chunks: usize,
    /// Falling edges sampled across all chunks.
    pub samples: usize,
}

/// Configures a [`Converter`] after the trace header has been indexed.
pub struct ConverterBuilder<R: BufRead> {
    reader: TraceReader<R>,
    table: PathTableBuilder,
    options: SamplerOptions,
    source: String,
    output: String,
}

impl<R: BufRead> ConverterBuilder<R> {
    /// Indexes the header of `reader` and resolves `paths` against it.
    pub fn new<I, S>(mut reader: TraceReader<R>, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = reader.read_header()?.select(paths)?;
        Ok(Self {
            reader,
            table,
            options: SamplerOptions::default(),
            source: String::new(),
            output: String::new(),
        })
    }

    /// Selected signals, before display formats are frozen.
    pub fn table(&self) -> &PathTable {
        self.table.table()
    }

    /// Overrides sampler options wholesale.
    pub fn options(mut self, options: SamplerOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of samples per array group.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    pub fn start_time(mut self, time: u64) -> Self {
        self.options.start_time = time;
        self
    }

    pub fn end_time(mut self, time: u64) -> Self {
        self.options.end_time = time;
        self
    }

    /// Assigns the display format of a multi-bit signal.
    pub fn format(mut self, path: &str, code: char) -> Result<Self> {
        self.table.set_format(path, code)?;
        Ok(self)
    }

    /// Names shown for the input and output in the property report.
    pub fn labels(mut self, source: impl Into<String>, output: impl Into<String>) -> Self {
        self.source = source.into();
        self.output = output.into();
        self
    }

    /// Freezes the signal table and validates the options.
    pub fn build(self) -> Result<Converter<R>> {
        let table = self.table.build()?;
        let sampler = EdgeSampler::new(self.reader, &table, self.options)?;
        Ok(Converter {
            sampler,
            table,
            source: self.source,
            output: self.output,
        })
    }
}

/// A configured conversion, ready to stream WaveJSON into a sink.
pub struct Converter<R: BufRead> {
    sampler: EdgeSampler<R>,
    table: PathTable,
    source: String,
    output: String,
}

impl<R: BufRead> Converter<R> {
    /// Creates a builder for `reader`, selecting `paths`.
    pub fn builder<I, S>(reader: TraceReader<R>, paths: I) -> Result<ConverterBuilder<R>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ConverterBuilder::new(reader, paths)
    }

    /// Applies `options` to a reader whose header has not been read yet.
    pub fn with_options(reader: TraceReader<R>, options: &ConvertOptions) -> Result<Self> {
        let mut builder = Self::builder(reader, &options.paths)?.options(options.sampler);
        for (path, code) in &options.formats {
            builder = builder.format(path, *code)?;
        }
        builder.build()
    }

    pub fn table(&self) -> &PathTable {
        &self.table
    }

    /// Sets the output name shown in the property report.
    pub fn set_output_label(&mut self, output: impl Into<String>) {
        self.output = output.into();
    }

    pub fn options(&self) -> &SamplerOptions {
        self.sampler.options()
    }

    /// Streams the whole document into `sink`.
    ///
    /// The footer is only written when every chunk was sampled and written successfully.
    pub fn run<W: Write>(self, sink: W) -> Result<ConvertSummary> {
        let Self {
            mut sampler, table, ..
        } = self;
        let chunk_size = sampler.options().chunk_size;

        let mut writer = WaveJsonWriter::builder(sink)
            .chunk_size(chunk_size)
            .build(&table)?;
        writer.write_header()?;

        let mut summary = ConvertSummary::default();
        for chunk in &mut sampler {
            let chunk = chunk?;
            trace!(origin = chunk.origin(), samples = chunk.len(), "writing chunk");
            writer.write_chunk(&chunk)?;
            summary.chunks += 1;
            summary.samples += chunk.len();
        }
        writer.finish()?;

        info!(
            chunks = summary.chunks,
            samples = summary.samples,
            end = sampler.now(),
            "conversion complete"
        );
        Ok(summary)
    }
}

impl Converter<TraceInput> {
    /// Opens `path` and configures a conversion with `options`.
    pub fn open(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening trace");
        let reader = open_trace(path)?;
        let mut converter = Self::with_options(reader, options)?;
        converter.source = path.display().to_string();
        Ok(converter)
    }
}

impl<R: BufRead> fmt::Display for Converter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.sampler.options();
        writeln!(f, "vcd_file  = '{}'", self.source)?;
        writeln!(f, "json_file = '{}'", self.output)?;
        write!(f, "path_list = [")?;
        let paths = self.table.paths();
        for (i, path) in paths.iter().enumerate() {
            if i != 0 {
                write!(f, "             ")?;
            }
            write!(f, "'{path}'")?;
            if i + 1 != paths.len() {
                writeln!(f, ",")?;
            }
        }
        writeln!(f, "]")?;
        writeln!(f, "wave_chunk = {}", options.chunk_size)?;
        writeln!(f, "start_time = {}", options.start_time)?;
        write!(f, "end_time   = {}", options.end_time)
    }
}
