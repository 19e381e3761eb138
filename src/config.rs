#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BLOCK_SIZE, SAMPLE_RATE};

/// Sample rate and block length shared by every generator in a synth.
///
/// Fixed for the lifetime of a synth: envelope buffers are compiled against
/// it, so a different format means rebuilding every voice. The fields are
/// only reachable through [`StreamFormat::new`], so the block size is never 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamFormat {
    sample_rate: f32,
    block_size: usize,
}

impl StreamFormat {
    /// # Panics
    ///
    /// If `block_size` is 0.
    pub fn new(sample_rate: f32, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be non-zero");
        Self {
            sample_rate,
            block_size,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Samples per block, at least 1.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Convert a duration in seconds to the nearest whole frame.
    pub fn seconds_to_frames(&self, seconds: f32) -> f64 {
        (seconds as f64 * self.sample_rate as f64).round()
    }

    /// Duration of one block in seconds.
    pub fn block_duration(&self) -> f32 {
        self.block_size as f32 / self.sample_rate
    }
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self::new(SAMPLE_RATE, BLOCK_SIZE)
    }
}

/// Patch values read from the control surface at note-on time.
///
/// The carrier frequency is not part of the patch: it comes from the note
/// through the tuning table, and the modulator runs at `ratio * carrier`.
/// Ranges are the caller's business; nothing here is clamped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceConfig {
    pub amplitude: f32,
    /// Modulator frequency as a multiple of the carrier.
    pub ratio: f32,
    /// Modulation index (modulator amplitude, in radians of phase).
    pub beta: f32,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl VoiceConfig {
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_beta(mut self, beta: f32) -> Self {
        self.beta = beta;
        self
    }

    /// Set all four envelope parameters at once (seconds, level, seconds, seconds).
    pub fn with_adsr(mut self, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        self.attack = attack;
        self.decay = decay;
        self.sustain = sustain;
        self.release = release;
        self
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.2,
            ratio: 3.0,
            beta: 0.6,
            attack: 0.01,
            decay: 0.01,
            sustain: 0.4,
            release: 0.5,
        }
    }
}
