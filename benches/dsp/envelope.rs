//! Benchmarks for envelope compilation and ADSR streaming.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fmpoly::dsp::{Adsr, BlockSource, Envelope};
use fmpoly::StreamFormat;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let format = StreamFormat::new(48_000.0, size);

        // Compile cost paid at note-on: 10ms attack, 100ms decay, 300ms release
        group.bench_with_input(BenchmarkId::new("compile_adsr", size), &size, |b, _| {
            b.iter(|| {
                black_box(Adsr::new(0.01, 0.1, 0.7, 0.3, format).unwrap());
            })
        });

        // Streaming a long curve: a slice per block
        let mut env = Envelope::from_seconds(&[(0.0, 0.0), (60.0, 1.0)], format).unwrap();
        group.bench_with_input(BenchmarkId::new("stream", size), &size, |b, _| {
            b.iter(|| {
                if env.is_finished() {
                    env.reset();
                }
                black_box(env.next_block());
            })
        });

        // Release phase, retriggered whenever it runs out
        let mut adsr = Adsr::new(0.001, 0.001, 0.7, 1.0, format).unwrap();
        adsr.start();
        adsr.release();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                if adsr.is_idle() {
                    adsr.release();
                }
                black_box(adsr.next_block());
            })
        });
    }

    group.finish();
}
