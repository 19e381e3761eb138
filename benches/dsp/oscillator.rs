//! Benchmarks for sine and FM oscillator blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fmpoly::dsp::{BlockSource, FmOscillator, Oscillator};
use fmpoly::StreamFormat;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let format = StreamFormat::new(48_000.0, size);

        // Sine - one sin() per sample
        let mut osc = Oscillator::sine(440.0, format);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                black_box(osc.next_block());
            })
        });

        // FM - modulator block plus carrier, two sin() per sample
        let mut fm = FmOscillator::new(220.0, 1.0, 660.0, 2.0, format);
        group.bench_with_input(BenchmarkId::new("fm", size), &size, |b, _| {
            b.iter(|| {
                black_box(fm.next_block());
            })
        });
    }

    group.finish();
}
