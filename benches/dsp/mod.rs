//! Benchmarks for the low-level block generators.

mod envelope;
mod oscillator;

pub use envelope::bench_envelope;
pub use oscillator::bench_oscillator;
