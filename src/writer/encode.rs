use crate::encoding::format_value;
use crate::hierarchy::SignalDef;
use crate::types::{DisplayFormat, ValueState, VectorKind};

/// Character repeating the previous sample in a wave string.
pub const REPEAT: char = '.';
/// Character opening a labelled data segment of a multi-bit wave.
pub const DATA: char = '=';

/// Run-length encoded samples of one signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedWave {
    /// One character per sample.
    pub wave: String,
    /// Space separated labels for every `=` in `wave`; always present for multi-bit signals.
    pub data: Option<String>,
}

/// Encodes sample sequences of a signal with a fixed width and display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveEncoder {
    width: u32,
    format: DisplayFormat,
}

impl WaveEncoder {
    pub fn new(width: u32, format: DisplayFormat) -> Self {
        Self { width, format }
    }

    pub fn for_signal(def: &SignalDef) -> Self {
        Self::new(def.width, def.display_format())
    }

    /// Compresses `samples`, emitting `.` whenever a sample equals its predecessor.
    pub fn encode(&self, samples: &[ValueState]) -> EncodedWave {
        let mut wave = String::with_capacity(samples.len());
        let mut labels = Vec::new();
        let mut prev: Option<&ValueState> = None;

        for sample in samples {
            if prev == Some(sample) {
                wave.push(REPEAT);
            } else if self.width == 1 {
                wave.push(sample.logic().map_or('x', |level| level.as_char()));
            } else {
                match sample.kind() {
                    VectorKind::Defined => {
                        wave.push(DATA);
                        labels.push(format_value(sample.bits(), self.width, self.format));
                    }
                    VectorKind::HighZ => wave.push('z'),
                    VectorKind::Unknown => wave.push('x'),
                }
            }
            prev = Some(sample);
        }

        let data = (self.width > 1).then(|| labels.join(" "));
        EncodedWave { wave, data }
    }
}

/// Encodes `samples` of the signal declared by `def`.
pub fn encode_wave(samples: &[ValueState], def: &SignalDef) -> EncodedWave {
    WaveEncoder::for_signal(def).encode(samples)
}
