//! Real-world scenario benchmarks.
//!
//! These model actual playing: held chords, fast repeated notes and the full
//! message-driven synth.

mod voices;

pub use voices::bench_voices;
