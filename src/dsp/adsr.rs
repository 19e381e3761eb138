use crate::{
    config::StreamFormat,
    dsp::{block::BlockSource, envelope::Envelope},
    error::ConfigurationError,
};

/*
ADSR Envelope
=============

Attack-Decay-Sustain-Release amplitude shaping, built from two precompiled
breakpoint envelopes:

  Level
    1.0 ┐    ╱╲
        │   ╱  ╲
    S   │  ╱    ╲__________ ─ ─ held     S ╲
        │ ╱                                 ╲
    0.0 └╱─────────────────────             ─╲──→ Time
        attack decay  sustain               release

    attack-decay curve:  [(0, 0), (A, 1), (A + D, S)]   then holds S
    release curve:       [(0, S), (R, 0)]                then holds 0


The State Machine
-----------------

    ┌──────┐  start()   ┌────────┐  release()  ┌───────────┐
    │ Idle │ ─────────→ │ Active │ ──────────→ │ Releasing │
    └──────┘            └────────┘             └───────────┘
        ↑                                           │
        └──────── block ends on exactly 0.0 ────────┘

  Idle        silence; `last` is forced to 0
  Active      streams the attack-decay curve, sustain is its held value
  Releasing   streams the release curve; the block whose last sample is 0.0
              is the final one and moves the machine back to Idle

`start()` and `release()` only rewind the matching curve, so they can be
called from any state. Release always starts from the sustain level, even if
the note is let go mid-attack. With sustain = 0 the release curve is flat
zero and the first releasing block already completes it.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdsrState {
    Idle,
    Active,
    Releasing,
}

pub struct Adsr {
    attack_decay: Envelope,
    release: Envelope,
    sustain: f32,
    state: AdsrState,
    last: f32,
    silence: Vec<f32>,
}

impl Adsr {
    /// Build from times in seconds and a sustain level.
    pub fn new(
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
        format: StreamFormat,
    ) -> Result<Self, ConfigurationError> {
        let attack_decay = Envelope::from_seconds(
            &[(0.0, 0.0), (attack, 1.0), (attack + decay, sustain)],
            format,
        )?;
        let release = Envelope::from_seconds(&[(0.0, sustain), (release, 0.0)], format)?;

        Ok(Self {
            attack_decay,
            release,
            sustain,
            state: AdsrState::Idle,
            last: 0.0,
            silence: vec![0.0; format.block_size()],
        })
    }

    /// Gate on: rewind the attack-decay curve.
    pub fn start(&mut self) {
        self.attack_decay.reset();
        self.state = AdsrState::Active;
    }

    /// Gate off: rewind the release curve.
    pub fn release(&mut self) {
        self.release.reset();
        self.state = AdsrState::Releasing;
    }

    pub fn state(&self) -> AdsrState {
        self.state
    }

    /// Most recent output sample.
    pub fn last(&self) -> f32 {
        self.last
    }

    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    pub fn is_idle(&self) -> bool {
        self.state == AdsrState::Idle
    }
}

impl BlockSource for Adsr {
    fn next_block(&mut self) -> &[f32] {
        match self.state {
            AdsrState::Idle => {
                self.last = 0.0;
                &self.silence
            }
            AdsrState::Active => {
                let out = self.attack_decay.next_block();
                if let Some(&last) = out.last() {
                    self.last = last;
                }
                out
            }
            AdsrState::Releasing => {
                let out = self.release.next_block();
                if let Some(&last) = out.last() {
                    self.last = last;
                }
                if self.last == 0.0 {
                    self.state = AdsrState::Idle;
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format() -> StreamFormat {
        StreamFormat::new(1_000.0, 8)
    }

    #[test]
    fn starts_idle_and_silent() {
        let mut adsr = Adsr::new(0.01, 0.01, 0.5, 0.01, format()).unwrap();
        assert!(adsr.is_idle());
        assert!(adsr.next_block().iter().all(|&s| s == 0.0));
        assert_eq!(adsr.last(), 0.0);
    }

    #[test]
    fn instant_attack_and_decay_jump_to_sustain() {
        let mut adsr = Adsr::new(0.0, 0.0, 0.5, 0.0, format()).unwrap();
        adsr.start();
        let block = adsr.next_block().to_vec();
        assert_eq!(block[0], 0.5);
        assert_eq!(adsr.last(), 0.5);

        adsr.release();
        adsr.next_block();
        assert_eq!(adsr.state(), AdsrState::Idle);
    }

    #[test]
    fn attack_peaks_then_settles_on_sustain() {
        // 4 ms attack, 4 ms decay at 1 kHz: peak lands on frame 4
        let mut adsr = Adsr::new(0.004, 0.004, 0.25, 0.1, format()).unwrap();
        adsr.start();
        let block = adsr.next_block().to_vec();
        assert_eq!(block[4], 1.0);
        assert_eq!(block[0], 0.0);

        // padding holds sustain, then the held single sample
        assert!(adsr.next_block().iter().all(|&s| s == 0.25));
        assert_eq!(adsr.next_block(), &[0.25]);
        assert_eq!(adsr.state(), AdsrState::Active);
    }

    #[test]
    fn release_runs_down_to_idle() {
        let mut adsr = Adsr::new(0.0, 0.0, 0.8, 0.02, format()).unwrap();
        adsr.start();
        adsr.next_block();
        adsr.release();

        let mut blocks = 0;
        while adsr.state() == AdsrState::Releasing {
            let block = adsr.next_block().to_vec();
            blocks += 1;
            assert!(block.iter().all(|&s| (0.0..=0.8).contains(&s)));
            assert!(blocks < 10, "release never completed");
        }
        // 20 frames of ramp + padding to 24: three blocks, the last ends on 0
        assert_eq!(blocks, 3);
        assert_eq!(adsr.last(), 0.0);
    }

    #[test]
    fn zero_sustain_releases_immediately() {
        let mut adsr = Adsr::new(0.01, 0.01, 0.0, 1.0, format()).unwrap();
        adsr.start();
        adsr.next_block();
        adsr.release();
        adsr.next_block();
        assert!(adsr.is_idle());
    }

    #[test]
    fn retrigger_rewinds_the_attack() {
        let mut adsr = Adsr::new(0.004, 0.0, 1.0, 0.0, format()).unwrap();
        adsr.start();
        let first = adsr.next_block().to_vec();
        adsr.next_block();
        adsr.start();
        assert_eq!(adsr.next_block(), first.as_slice());
    }

    #[test]
    fn negative_times_are_rejected() {
        assert!(Adsr::new(-0.1, 0.0, 0.5, 0.1, format()).is_err());
        assert!(Adsr::new(0.1, 0.0, 0.5, -0.1, format()).is_err());
    }

    #[test]
    fn unbounded_times_are_rejected() {
        let format = StreamFormat::default();
        assert!(Adsr::new(0.01, 0.01, 0.5, f32::INFINITY, format).is_err());
        assert!(Adsr::new(f32::INFINITY, 0.01, 0.5, 0.1, format).is_err());
        assert!(Adsr::new(0.01, 0.01, 0.5, f32::NAN, format).is_err());
    }
}
