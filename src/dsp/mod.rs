//! Block generators: the signal math underneath every voice.
//!
//! Each generator owns its output buffer and hands out borrowed blocks through
//! [`BlockSource`], so nothing here allocates once constructed. Envelope
//! curves are the exception that proves it: they are compiled up front, at
//! note-on time, and only streamed afterwards.

/// Attack/decay/sustain/release state machine over two envelopes.
pub mod adsr;
/// The block trait and broadcast-aware combinators.
pub mod block;
/// Precompiled piecewise-linear breakpoint envelopes.
pub mod envelope;
/// Two-operator FM oscillator.
pub mod fm;
/// Sine oscillator.
pub mod oscillator;

pub use adsr::{Adsr, AdsrState};
pub use block::BlockSource;
pub use envelope::Envelope;
pub use fm::FmOscillator;
pub use oscillator::Oscillator;
