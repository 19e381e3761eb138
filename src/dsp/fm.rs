use std::f64::consts::TAU;

use crate::{
    config::StreamFormat,
    dsp::{block::BlockSource, oscillator::Oscillator},
};

/*
Two-Operator FM
===============

A carrier sine whose phase is pushed around by a second sine, the modulator:

    out(t) = amp · sin(2π·fc·t/sr + β·sin(2π·fm·t/sr))
                                    └──── modulator ────┘

  fc    carrier frequency, the pitch you hear
  fm    modulator frequency; integer ratios fm/fc give harmonic spectra,
        irrational ones give bells and clangs
  β     modulation index; 0 is a pure sine, larger values spread energy into
        sidebands at fc ± k·fm

The modulator is an ordinary `Oscillator` whose amplitude is β. The carrier
keeps its own sample counter, independent of the modulator's, and adds one
modulator block to its phase per output block.
*/

pub struct FmOscillator {
    carrier: f32,
    amp: f32,
    modulator: Oscillator,
    sample_rate: f32,
    frame: u64,
    buffer: Vec<f32>,
}

impl FmOscillator {
    pub fn new(carrier: f32, amp: f32, fm: f32, beta: f32, format: StreamFormat) -> Self {
        Self {
            carrier,
            amp,
            modulator: Oscillator::new(fm, beta, 0.0, format),
            sample_rate: format.sample_rate(),
            frame: 0,
            buffer: vec![0.0; format.block_size()],
        }
    }

    pub fn set_beta(&mut self, beta: f32) {
        self.modulator.amp = beta;
    }

    pub fn set_fm(&mut self, fm: f32) {
        self.modulator.freq = fm;
    }

    pub fn set_amplitude(&mut self, amp: f32) {
        self.amp = amp;
    }

    pub fn beta(&self) -> f32 {
        self.modulator.amp
    }

    pub fn fm(&self) -> f32 {
        self.modulator.freq
    }

    pub fn carrier(&self) -> f32 {
        self.carrier
    }

    pub fn amplitude(&self) -> f32 {
        self.amp
    }
}

impl BlockSource for FmOscillator {
    fn next_block(&mut self) -> &[f32] {
        let modulation = self.modulator.next_block();

        let step = TAU * self.carrier as f64 / self.sample_rate as f64;
        for (i, (sample, m)) in self.buffer.iter_mut().zip(modulation).enumerate() {
            let t = (self.frame + i as u64) as f64;
            *sample = self.amp * (step * t + *m as f64).sin() as f32;
        }

        self.frame += self.buffer.len() as u64;
        &self.buffer
    }
}
