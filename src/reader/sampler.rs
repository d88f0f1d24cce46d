use std::collections::HashMap;
use std::io::BufRead;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Record, TraceReader};
use crate::error::{Error, Result};
use crate::hierarchy::PathTable;
use crate::types::ValueState;

/// Default number of clock cycles grouped into one chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Controls how the [`EdgeSampler`] groups and windows samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerOptions {
    /// Maximum number of samples per chunk.
    pub chunk_size: usize,
    /// Chunks whose opening rising edge precedes this time are not sampled. `0` disables the bound.
    pub start_time: u64,
    /// Sampling stops once simulated time passes this value. `0` disables the bound.
    pub end_time: u64,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            start_time: 0,
            end_time: 0,
        }
    }
}

/// Transition of the clock across a timestamp boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `0` to `1`.
    Rising,
    /// `1` to `0`.
    Falling,
    /// Anything else, including transitions through `x` or `z`.
    Steady,
}

impl Edge {
    /// Classifies the change from `prev` to `next`.
    ///
    /// Values are compared as written, so a multi-bit clock driven with `b0`/`b1` has edges too.
    pub fn between(prev: &ValueState, next: &ValueState) -> Self {
        match (prev.bits(), next.bits()) {
            (b"0", b"1") => Self::Rising,
            (b"1", b"0") => Self::Falling,
            _ => Self::Steady,
        }
    }
}

/// Samples collected between two returns of [`EdgeSampler::next_chunk`].
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    origin: u64,
    len: usize,
    samples: HashMap<String, Vec<ValueState>>,
}

impl Chunk {
    fn new(ids: &[String], capacity: usize) -> Self {
        let samples = ids
            .iter()
            .map(|id| (id.clone(), Vec::with_capacity(capacity)))
            .collect();
        Self {
            origin: 0,
            len: 0,
            samples,
        }
    }

    /// Time of the rising edge that opened this chunk.
    pub fn origin(&self) -> u64 {
        self.origin
    }

    /// Number of falling edges sampled.
    pub fn len(&self) -> usize {
        self.len
    }

    /// An empty chunk signals the end of the trace or of the sampling window.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sampled values of the signal with identifier `id`, oldest first.
    pub fn samples(&self, id: &str) -> Option<&[ValueState]> {
        self.samples.get(id).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone)]
struct Tracked {
    width: u32,
    value: ValueState,
}

fn clock_state(values: &HashMap<String, Tracked>, clock_id: &str) -> ValueState {
    values
        .get(clock_id)
        .map(|tracked| tracked.value.clone())
        .unwrap_or_default()
}

/// Resumable clock-relative sampler over the value-change section of a trace.
///
/// Every tracked signal is snapshotted on each falling edge of the clock. Each call to
/// [`next_chunk`](Self::next_chunk) continues from where the previous one stopped, both in
/// the input and in simulated time.
pub struct EdgeSampler<R: BufRead> {
    reader: TraceReader<R>,
    options: SamplerOptions,
    clock_id: String,
    ids: Vec<String>,
    values: HashMap<String, Tracked>,
    now: u64,
    finished: bool,
}

impl<R: BufRead> EdgeSampler<R> {
    /// Creates a sampler for the signals of `table`; `reader` must be past the header.
    pub fn new(reader: TraceReader<R>, table: &PathTable, options: SamplerOptions) -> Result<Self> {
        if options.chunk_size == 0 {
            return Err(Error::invalid("chunk size must be at least 1"));
        }
        let clock = table
            .clock()
            .ok_or_else(|| Error::invalid("no clock signal selected"))?;

        let mut ids = Vec::with_capacity(table.len());
        let mut values = HashMap::with_capacity(table.len());
        for (_, def) in table.iter() {
            if values.contains_key(&def.id) {
                continue;
            }
            ids.push(def.id.clone());
            values.insert(
                def.id.clone(),
                Tracked {
                    width: def.width,
                    value: ValueState::unknown(),
                },
            );
        }

        Ok(Self {
            reader,
            options,
            clock_id: clock.id.clone(),
            ids,
            values,
            now: 0,
            finished: false,
        })
    }

    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Last simulated time seen in the trace.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Current value of the signal with identifier `id`, if it is tracked.
    pub fn value(&self, id: &str) -> Option<&ValueState> {
        self.values.get(id).map(|tracked| &tracked.value)
    }

    /// Consumes records until the chunk is full, the input ends, or `end_time` is passed.
    ///
    /// The returned chunk is empty once nothing more can be sampled.
    pub fn next_chunk(&mut self) -> Result<Chunk> {
        let SamplerOptions {
            chunk_size,
            start_time,
            end_time,
        } = self.options;

        let mut chunk = Chunk::new(&self.ids, chunk_size);
        let mut origin = self.now;
        let mut clock_prev = clock_state(&self.values, &self.clock_id);

        loop {
            if end_time != 0 && end_time < self.now {
                break;
            }
            let Some(record) = self.reader.next_record()? else {
                break;
            };

            match record {
                Record::Ignored => {}
                Record::Scalar { value, id } => {
                    if let Some(tracked) = self.values.get_mut(id) {
                        tracked.value = ValueState::Bit(value);
                    }
                }
                Record::Vector { bits, id } => {
                    if let Some(tracked) = self.values.get_mut(id) {
                        tracked.value = ValueState::from_vector(bits, tracked.width);
                    }
                }
                Record::Timestamp(next) => {
                    let clock = clock_state(&self.values, &self.clock_id);
                    match Edge::between(&clock_prev, &clock) {
                        Edge::Rising if chunk.is_empty() => origin = self.now,
                        Edge::Falling if start_time <= origin => {
                            for id in &self.ids {
                                if let (Some(column), Some(tracked)) =
                                    (chunk.samples.get_mut(id), self.values.get(id))
                                {
                                    column.push(tracked.value.clone());
                                }
                            }
                            chunk.len += 1;
                            if chunk.len == chunk_size {
                                self.now = next;
                                chunk.origin = origin;
                                trace!(origin, samples = chunk.len, "chunk full");
                                return Ok(chunk);
                            }
                        }
                        _ => {}
                    }
                    self.now = next;
                    clock_prev = clock;
                }
            }
        }

        chunk.origin = origin;
        trace!(origin, samples = chunk.len, now = self.now, "sampling stopped");
        Ok(chunk)
    }
}

impl<R: BufRead> Iterator for EdgeSampler<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_chunk() {
            Ok(chunk) if chunk.is_empty() => {
                self.finished = true;
                None
            }
            Ok(chunk) => Some(Ok(chunk)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
