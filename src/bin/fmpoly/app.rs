//! Player - wires the synth to the default output device and drives it

use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info, warn};

use fmpoly::{
    dsp::Adsr,
    io::BlockStream,
    synth::{PolySynth, SynthMessage},
    StreamFormat, VoiceConfig, BLOCK_SIZE,
};

use super::phrase::KeyEvent;

const QUEUE_SIZE: usize = 256;

pub struct Player {
    patch: VoiceConfig,
    tempo: f64,
    block_size: usize,
}

impl Player {
    pub fn new(patch: VoiceConfig) -> Self {
        Self {
            patch,
            tempo: 120.0,
            block_size: BLOCK_SIZE,
        }
    }

    /// Set the tempo in beats per minute
    pub fn tempo(mut self, bpm: f64) -> Self {
        self.tempo = bpm;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Play the events in order, blocking until the last release has rung out.
    pub fn play(self, events: &[KeyEvent]) -> EyreResult<()> {
        if self.block_size == 0 {
            return Err(eyre!("block size must be non-zero"));
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let format = StreamFormat::new(sample_rate, self.block_size);

        info!(sample_rate, channels, block_size = self.block_size, "audio config");
        info!(patch = ?self.patch, tempo = self.tempo, "patch");

        // The audio thread only counts refused note-ons, so catch a bad patch here
        let p = &self.patch;
        Adsr::new(p.attack, p.decay, p.sustain, p.release, format)
            .wrap_err("patch envelope is invalid")?;

        let (mut tx, rx) = RingBuffer::<SynthMessage>::new(QUEUE_SIZE);
        let mut source = BlockStream::new(PolySynth::new(format, rx), self.block_size);
        let mut mono = vec![0.0f32; self.block_size];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    // Copy mono to every channel, one engine block's worth at a time
                    for frames in data.chunks_mut(mono.len() * channels) {
                        let block = &mut mono[..frames.len() / channels];
                        source.fill(block);
                        for (frame, &s) in frames.chunks_mut(channels).zip(block.iter()) {
                            frame.fill(s);
                        }
                    }
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let beat = 60.0 / self.tempo;
        let start = Instant::now();
        for event in events {
            let due = start + Duration::from_secs_f64(event.beat * beat);
            if let Some(wait) = due.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }

            let msg = if event.pressed {
                info!(note = event.note, "key down");
                SynthMessage::NoteOn {
                    note: event.note,
                    config: self.patch,
                }
            } else {
                info!(note = event.note, "key up");
                SynthMessage::NoteOff { note: event.note }
            };

            if tx.push(msg).is_err() {
                warn!(note = event.note, "control queue full, event dropped");
            }
        }

        // Let the last releases ring out, then silence whatever is left
        let tail = self.patch.release as f64 + 2.0 * format.block_duration() as f64;
        std::thread::sleep(Duration::from_secs_f64(tail.max(0.0)));
        if tx.push(SynthMessage::AllNotesOff).is_err() {
            warn!("control queue full, stop dropped");
        }
        std::thread::sleep(Duration::from_secs_f64(2.0 * format.block_duration() as f64));

        info!("done");
        Ok(())
    }
}
