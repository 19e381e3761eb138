pub mod config;
pub mod dsp; // Oscillators, envelopes, ADSR
pub mod error;
pub mod io;
pub mod synth; // Voices and polyphony

pub use config::{StreamFormat, VoiceConfig};
pub use error::{ConfigurationError, SynthError};

/// Default sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48_000.0;
/// Default number of samples per block.
pub const BLOCK_SIZE: usize = 1024;
