use std::f64::consts::TAU;

use crate::{config::StreamFormat, dsp::block::BlockSource};

/// Sine oscillator producing `amp * sin(2π·freq·t/sr + phase)` a block at a time.
///
/// `t` is an absolute sample counter, so changing `freq` between blocks
/// re-evaluates the formula at the current time rather than continuing the
/// previous phase. That matches how the FM carrier below is computed.
pub struct Oscillator {
    pub freq: f32,
    pub amp: f32,
    pub phase: f32,
    sample_rate: f32,
    frame: u64,
    buffer: Vec<f32>,
}

impl Oscillator {
    pub fn new(freq: f32, amp: f32, phase: f32, format: StreamFormat) -> Self {
        Self {
            freq,
            amp,
            phase,
            sample_rate: format.sample_rate(),
            frame: 0,
            buffer: vec![0.0; format.block_size()],
        }
    }

    pub fn sine(freq: f32, format: StreamFormat) -> Self {
        Self::new(freq, 1.0, 0.0, format)
    }

    /// Sample counter at the start of the next block.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl BlockSource for Oscillator {
    fn next_block(&mut self) -> &[f32] {
        // Evaluate the phase in f64: freq * t grows without bound.
        let step = TAU * self.freq as f64 / self.sample_rate as f64;
        let phase = self.phase as f64;
        let amp = self.amp;

        for (i, sample) in self.buffer.iter_mut().enumerate() {
            let t = (self.frame + i as u64) as f64;
            *sample = amp * (step * t + phase).sin() as f32;
        }

        self.frame += self.buffer.len() as u64;
        &self.buffer
    }
}
