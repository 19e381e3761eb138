use crate::error::SynthError;

/// Number of note ids covered by the table (the MIDI range).
pub const NOTE_COUNT: usize = 128;

/// Note id of concert A.
pub const A4_NOTE: u8 = 69;
pub const A4_FREQ: f32 = 440.0;

/// Equal-tempered note → frequency lookup, precomputed once.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    freqs: Vec<f32>,
}

impl FrequencyTable {
    /// Twelve-tone equal temperament around the given reference.
    pub fn equal_tempered(reference_note: u8, reference_freq: f32) -> Self {
        let freqs = (0..NOTE_COUNT)
            .map(|n| {
                let semitones = n as f32 - reference_note as f32;
                reference_freq * 2.0_f32.powf(semitones / 12.0)
            })
            .collect();
        Self { freqs }
    }

    pub fn frequency(&self, note: u8) -> Result<f32, SynthError> {
        self.freqs
            .get(note as usize)
            .copied()
            .ok_or(SynthError::NoteOutOfRange {
                note,
                len: self.freqs.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::equal_tempered(A4_NOTE, A4_FREQ)
    }
}
