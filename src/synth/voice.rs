use crate::{
    config::{StreamFormat, VoiceConfig},
    dsp::{
        adsr::Adsr,
        block::{multiply_broadcast, BlockSource},
        fm::FmOscillator,
    },
    error::ConfigurationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    On,  // Sounding, envelope in attack/decay/sustain or release
    Off, // Envelope finished its release; the voice is done for good
}

/// One sounding note: an FM oscillator gated by an ADSR.
///
/// The envelope is triggered on construction. Once the release completes the
/// voice switches to `Off` and never comes back; retriggering a note means
/// building a new voice.
pub struct Voice {
    osc: FmOscillator,
    adsr: Adsr,
    state: VoiceState,
    buffer: Vec<f32>,
}

impl Voice {
    pub fn new(osc: FmOscillator, mut adsr: Adsr, format: StreamFormat) -> Self {
        adsr.start();
        Self {
            osc,
            adsr,
            state: VoiceState::On,
            buffer: vec![0.0; format.block_size()],
        }
    }

    /// Build a voice for `frequency` from a patch; the modulator runs at
    /// `ratio * frequency`.
    pub fn from_config(
        frequency: f32,
        config: &VoiceConfig,
        format: StreamFormat,
    ) -> Result<Self, ConfigurationError> {
        let osc = FmOscillator::new(
            frequency,
            config.amplitude,
            config.ratio * frequency,
            config.beta,
            format,
        );
        let adsr = Adsr::new(
            config.attack,
            config.decay,
            config.sustain,
            config.release,
            format,
        )?;
        Ok(Self::new(osc, adsr, format))
    }

    /// Key released: move the envelope into its release stage.
    pub fn note_off(&mut self) {
        self.adsr.release();
    }

    pub fn set_amplitude(&mut self, amp: f32) {
        self.osc.set_amplitude(amp);
    }

    pub fn set_fm(&mut self, fm: f32) {
        self.osc.set_fm(fm);
    }

    pub fn set_beta(&mut self, beta: f32) {
        self.osc.set_beta(beta);
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_off(&self) -> bool {
        self.state == VoiceState::Off
    }

    pub fn adsr(&self) -> &Adsr {
        &self.adsr
    }

    pub fn oscillator(&self) -> &FmOscillator {
        &self.osc
    }
}

impl BlockSource for Voice {
    fn next_block(&mut self) -> &[f32] {
        self.buffer.copy_from_slice(self.osc.next_block());
        multiply_broadcast(&mut self.buffer, self.adsr.next_block());

        if self.adsr.is_idle() {
            self.state = VoiceState::Off;
        }

        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{adsr::AdsrState, oscillator::Oscillator};

    fn format() -> StreamFormat {
        StreamFormat::new(1_000.0, 8)
    }

    fn patch() -> VoiceConfig {
        VoiceConfig::default()
            .with_amplitude(1.0)
            .with_adsr(0.0, 0.0, 0.5, 0.016)
    }

    #[test]
    fn output_is_oscillator_times_envelope() {
        let mut voice = Voice::from_config(100.0, &patch(), format()).unwrap();
        let mut reference = FmOscillator::new(100.0, 1.0, 300.0, 0.6, format());

        let out = voice.next_block().to_vec();
        let carrier = reference.next_block();
        for (o, c) in out.iter().zip(carrier) {
            assert!((o - c * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn held_envelope_sample_is_broadcast() {
        let mut voice = Voice::from_config(100.0, &patch(), format()).unwrap();
        let mut reference = FmOscillator::new(100.0, 1.0, 300.0, 0.6, format());

        // first block exhausts the sustain padding, the second is the held [0.5]
        voice.next_block();
        reference.next_block();
        let out = voice.next_block().to_vec();
        let carrier = reference.next_block();
        assert_eq!(out.len(), 8);
        for (o, c) in out.iter().zip(carrier) {
            assert!((o - c * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn voice_turns_off_exactly_when_envelope_goes_idle() {
        let mut voice = Voice::from_config(100.0, &patch(), format()).unwrap();
        voice.next_block();
        voice.note_off();

        while voice.adsr().state() == AdsrState::Releasing {
            assert_eq!(voice.state(), VoiceState::On);
            voice.next_block();
        }
        assert!(voice.adsr().is_idle());
        assert_eq!(voice.state(), VoiceState::Off);
    }

    #[test]
    fn beta_change_mid_note_affects_only_later_blocks() {
        let mut voice = Voice::from_config(100.0, &patch(), format()).unwrap();
        let mut modulated = FmOscillator::new(100.0, 1.0, 300.0, 0.6, format());
        let mut plain = Oscillator::new(100.0, 1.0, 0.0, format());

        let first = voice.next_block().to_vec();
        for (o, c) in first.iter().zip(modulated.next_block()) {
            assert!((o - c * 0.5).abs() < 1e-6);
        }
        plain.next_block();

        voice.set_beta(0.0);
        let second = voice.next_block().to_vec();
        for (o, c) in second.iter().zip(plain.next_block()) {
            assert!((o - c * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn setters_pass_through_to_oscillator() {
        let mut voice = Voice::from_config(100.0, &patch(), format()).unwrap();
        voice.set_beta(3.0);
        voice.set_fm(150.0);
        voice.set_amplitude(0.25);
        assert_eq!(voice.oscillator().beta(), 3.0);
        assert_eq!(voice.oscillator().fm(), 150.0);
        assert_eq!(voice.oscillator().amplitude(), 0.25);
    }
}
