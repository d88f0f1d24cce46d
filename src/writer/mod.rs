//! Incremental writer producing WaveJSON documents.

use std::io::Write;

use crate::error::{Error, Result};
use crate::hierarchy::PathTable;
use crate::reader::{Chunk, DEFAULT_CHUNK_SIZE};

mod encode;
pub use encode::{DATA, EncodedWave, REPEAT, WaveEncoder, encode_wave};

/// Options controlling [`WaveJsonWriter`] output.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Samples per chunk; sets the length of the synthetic clock wave.
    pub chunk_size: usize,
    /// Pad quoted names to a common width so that the `"wave"` keys line up.
    pub align_names: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            align_names: true,
        }
    }
}

/// Builder for [`WaveJsonWriter`].
pub struct WriterBuilder<W: Write> {
    sink: W,
    options: WriterOptions,
}

impl<W: Write> WriterBuilder<W> {
    /// Creates a builder from the provided writable sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            options: WriterOptions::default(),
        }
    }

    /// Overrides writer options wholesale.
    pub fn options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    pub fn align_names(mut self, align: bool) -> Self {
        self.options.align_names = align;
        self
    }

    /// Builds the writer for the rows of `table`. Nothing is written yet.
    pub fn build(self, table: &PathTable) -> Result<WaveJsonWriter<W>> {
        WaveJsonWriter::with_table(self.sink, self.options, table)
    }
}

#[derive(Debug)]
struct Row {
    id: String,
    name: String,
    encoder: WaveEncoder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Fresh,
    Open,
}

/// Streaming WaveJSON writer.
///
/// The document is emitted in three steps: [`write_header`](Self::write_header), one
/// [`write_chunk`](Self::write_chunk) per sampled chunk, and [`finish`](Self::finish). Only the
/// text of the chunk being written is held in memory; a document abandoned before
/// `finish` lacks its closing brackets.
pub struct WaveJsonWriter<W: Write> {
    sink: W,
    options: WriterOptions,
    clock_name: String,
    rows: Vec<Row>,
    stage: Stage,
    chunks_written: usize,
}

impl<W: Write> WaveJsonWriter<W> {
    /// Creates a new builder for the given sink.
    pub fn builder(sink: W) -> WriterBuilder<W> {
        WriterBuilder::new(sink)
    }

    fn with_table(sink: W, options: WriterOptions, table: &PathTable) -> Result<Self> {
        if options.chunk_size == 0 {
            return Err(Error::invalid("chunk size must be at least 1"));
        }
        if table.clock().is_none() {
            return Err(Error::invalid("no clock signal selected"));
        }

        let mut quoted = Vec::with_capacity(table.len());
        for (_, def) in table.iter() {
            quoted.push(serde_json::to_string(&def.name)?);
        }
        let width = if options.align_names {
            quoted.iter().map(|name| name.chars().count()).max().unwrap_or(0)
        } else {
            0
        };
        let mut names = quoted.into_iter().map(|name| format!("{name:<width$}"));

        let clock_name = names.next().unwrap_or_default();
        let rows = table
            .data_signals()
            .zip(names)
            .map(|((_, def), name)| Row {
                id: def.id.clone(),
                name,
                encoder: WaveEncoder::for_signal(def),
            })
            .collect();

        Ok(Self {
            sink,
            options,
            clock_name,
            rows,
            stage: Stage::Fresh,
            chunks_written: 0,
        })
    }

    /// Number of chunk groups written so far.
    pub fn chunks_written(&self) -> usize {
        self.chunks_written
    }

    /// Opens the document and writes the clock row.
    pub fn write_header(&mut self) -> Result<()> {
        if self.stage != Stage::Fresh {
            return Err(Error::invalid("WaveJSON header already written"));
        }
        let mut wave = String::with_capacity(self.options.chunk_size);
        wave.push('p');
        wave.extend(std::iter::repeat_n(REPEAT, self.options.chunk_size - 1));

        let mut text = String::new();
        text.push_str("{ \"head\": {\"tock\":1},\n");
        text.push_str("  \"signal\": [\n");
        text.push_str(&format!(
            "  {{   \"name\": {}, \"wave\": \"{wave}\" }}",
            self.clock_name
        ));
        self.sink.write_all(text.as_bytes())?;
        self.stage = Stage::Open;
        Ok(())
    }

    /// Appends one array group holding the encoded waves of `chunk`.
    pub fn write_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        if self.stage != Stage::Open {
            return Err(Error::invalid("WaveJSON header not written"));
        }

        let mut text = String::new();
        text.push_str(",\n  {},\n");
        text.push_str(&format!("  [\"{}\"", chunk.origin()));
        for row in &self.rows {
            let samples = chunk.samples(&row.id).unwrap_or_default();
            let encoded = row.encoder.encode(samples);
            let wave = serde_json::to_string(&encoded.wave)?;
            text.push_str(&format!(",\n    {{ \"name\": {}, \"wave\": {wave}", row.name));
            if let Some(data) = &encoded.data {
                text.push_str(&format!(", \"data\": {}", serde_json::to_string(data)?));
            }
            text.push_str(" }");
        }
        text.push_str("\n  ]");

        self.sink.write_all(text.as_bytes())?;
        self.chunks_written += 1;
        Ok(())
    }

    /// Closes the document, flushes, and yields the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.stage != Stage::Open {
            return Err(Error::invalid("WaveJSON header not written"));
        }
        self.sink.write_all(b"\n  ]\n}\n")?;
        self.sink.flush()?;
        Ok(self.sink)
    }
}
