use tracing::{debug, trace};

use crate::{
    config::{StreamFormat, VoiceConfig},
    dsp::{
        adsr::AdsrState,
        block::{accumulate, multiply_broadcast, BlockSource},
        envelope::Envelope,
    },
    error::SynthError,
    synth::{tuning::FrequencyTable, voice::Voice},
};

/*
Voice Manager
=============

Owns at most one voice per note id and mixes them into a single block stream.

Each note id moves through its own little lifecycle:

    absent ──note_on──→ alive ──release completes──→ collected (absent)
                         │  ↑
                note_on  │  │ next block
                (again)  ↓  │
                      tail pending

Storage is an arena of slots indexed by note id, so mixing walks the slots in
place and retiring a voice just empties its slot. Nothing is inserted or
removed from a map while it is being iterated.


Retrigger Crossfade
-------------------

Striking a note that is still sounding would cut the old voice off mid-cycle
and click. Instead `note_on` renders one more block of the old voice,
multiplies it by a one-block linear fade from the old envelope level to zero,
and parks the result as the slot's tail:

    old voice ──────────╲   (one extra block, faded out)
    new voice            ╲____________________________
                         └ tail ┘└ new voice blocks ...

On the next mix the tail is emitted *instead of* the new voice's first block;
the new voice starts rendering one block later. The old voice is consumed by
exactly that one extra block.
*/

struct Channel {
    voice: Voice,
    tail: Vec<f32>,
    tail_pending: bool,
}

pub struct VoiceManager {
    format: StreamFormat,
    tuning: FrequencyTable,
    slots: Vec<Option<Channel>>,
    mix: Vec<f32>,
}

impl VoiceManager {
    pub fn new(format: StreamFormat) -> Self {
        Self::with_tuning(format, FrequencyTable::default())
    }

    pub fn with_tuning(format: StreamFormat, tuning: FrequencyTable) -> Self {
        let slots = (0..tuning.len()).map(|_| None).collect();
        Self {
            format,
            tuning,
            slots,
            mix: vec![0.0; format.block_size()],
        }
    }

    /// Start `note` with the given patch, crossfading out a voice that is
    /// still sounding on the same note.
    ///
    /// On error the manager is left untouched.
    pub fn note_on(&mut self, note: u8, config: &VoiceConfig) -> Result<(), SynthError> {
        let frequency = self.tuning.frequency(note)?;
        let voice = Voice::from_config(frequency, config, self.format)?;

        // everything fallible happens before the slot is touched
        let slot = &mut self.slots[note as usize];
        let fade = match slot {
            Some(old) if !old.voice.is_off() => {
                let last_amp = old.voice.adsr().last();
                debug!(note, last_amp, "retrigger, fading out previous voice");
                Some(Envelope::new(
                    &[(0, last_amp), (self.format.block_size(), 0.0)],
                    self.format,
                )?)
            }
            _ => None,
        };

        let channel = match (slot.take(), fade) {
            (Some(mut old), Some(mut fade)) => {
                old.tail.copy_from_slice(fade.next_block());
                multiply_broadcast(&mut old.tail, old.voice.next_block());
                Channel {
                    voice,
                    tail: old.tail,
                    tail_pending: true,
                }
            }
            _ => {
                debug!(note, frequency, "note on");
                Channel {
                    voice,
                    tail: vec![0.0; self.format.block_size()],
                    tail_pending: false,
                }
            }
        };

        *slot = Some(channel);
        Ok(())
    }

    /// Release `note`. Unknown, finished, or already releasing notes are ignored.
    pub fn note_off(&mut self, note: u8) {
        match self.slots.get_mut(note as usize) {
            Some(Some(channel))
                if !channel.voice.is_off()
                    && channel.voice.adsr().state() != AdsrState::Releasing =>
            {
                debug!(note, "note off");
                channel.voice.note_off();
            }
            _ => trace!(note, "note off ignored, nothing sounding"),
        }
    }

    /// Drop every voice and pending tail at once, without release.
    pub fn stop(&mut self) {
        debug!(voices = self.active_voices(), "stopping all voices");
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }

    /// Number of voices that have not finished their release.
    pub fn active_voices(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|channel| !channel.voice.is_off())
            .count()
    }

    pub fn is_sounding(&self, note: u8) -> bool {
        self.channel(note)
            .is_some_and(|channel| !channel.voice.is_off())
    }

    pub fn has_pending_tail(&self, note: u8) -> bool {
        self.channel(note).is_some_and(|channel| channel.tail_pending)
    }

    /// The voice currently mapped to `note`, finished or not.
    pub fn voice(&self, note: u8) -> Option<&Voice> {
        self.channel(note).map(|channel| &channel.voice)
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    pub fn tuning(&self) -> &FrequencyTable {
        &self.tuning
    }

    fn channel(&self, note: u8) -> Option<&Channel> {
        self.slots.get(note as usize).and_then(Option::as_ref)
    }
}

impl BlockSource for VoiceManager {
    fn next_block(&mut self) -> &[f32] {
        self.mix.fill(0.0);

        for (note, slot) in self.slots.iter_mut().enumerate() {
            let Some(channel) = slot else {
                continue;
            };

            if channel.voice.is_off() {
                trace!(note, "voice finished");
                *slot = None;
            } else if channel.tail_pending {
                channel.tail_pending = false;
                accumulate(&mut self.mix, &channel.tail);
            } else {
                accumulate(&mut self.mix, channel.voice.next_block());
            }
        }

        &self.mix
    }
}
