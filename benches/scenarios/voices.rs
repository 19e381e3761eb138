//! Benchmarks for mixing through the voice manager.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fmpoly::dsp::BlockSource;
use fmpoly::synth::{PolySynth, SynthMessage, VoiceManager};
use fmpoly::{StreamFormat, VoiceConfig};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let patch = VoiceConfig::default().with_adsr(0.01, 0.1, 0.6, 0.5);

    for &size in BLOCK_SIZES {
        let format = StreamFormat::new(48_000.0, size);

        // === HELD CHORD ===
        // Eight sustained voices, the common worst case for a keyboard player
        let mut chord = VoiceManager::new(format);
        for note in [48, 52, 55, 60, 64, 67, 72, 76] {
            chord.note_on(note, &patch).unwrap();
        }
        group.bench_with_input(BenchmarkId::new("chord_8", size), &size, |b, _| {
            b.iter(|| {
                black_box(chord.next_block());
            })
        });

        // === REPEATED NOTE ===
        // Retrigger every block: envelope compile + crossfade tail each time
        let mut repeated = VoiceManager::new(format);
        repeated.note_on(60, &patch).unwrap();
        group.bench_with_input(BenchmarkId::new("retrigger", size), &size, |b, _| {
            b.iter(|| {
                repeated.note_on(60, black_box(&patch)).unwrap();
                black_box(repeated.next_block());
            })
        });

        // === MESSAGE DRIVEN ===
        // Note on/off pairs through the queue, as the audio callback sees them
        let mut synth = PolySynth::new(format, VecDeque::new());
        let mut note = 36u8;
        group.bench_with_input(BenchmarkId::new("poly_messages", size), &size, |b, _| {
            b.iter(|| {
                let queue = synth.receiver_mut();
                queue.push_back(SynthMessage::NoteOn { note, config: patch });
                queue.push_back(SynthMessage::NoteOff { note: note.wrapping_sub(12) });
                note = if note >= 96 { 36 } else { note + 1 };
                black_box(synth.next_block());
            })
        });
    }

    group.finish();
}
