use crate::{
    config::StreamFormat,
    dsp::block::BlockSource,
    error::SynthError,
    synth::{
        manager::VoiceManager,
        message::{MessageReceiver, SynthMessage},
    },
};

/// A voice manager fed by a message queue.
///
/// Each block first drains every pending message, then mixes, so a note-on
/// or note-off queued before a block is always visible to that block.
///
/// Runs on the audio thread, so a rejected note-on is counted rather than
/// logged; the control side validates patches before sending them.
pub struct PolySynth<R: MessageReceiver> {
    voices: VoiceManager,
    rx: R,
    rejected: u64,
    last_rejection: Option<SynthError>,
}

impl<R: MessageReceiver> PolySynth<R> {
    pub fn new(format: StreamFormat, rx: R) -> Self {
        Self::with_manager(VoiceManager::new(format), rx)
    }

    pub fn with_manager(voices: VoiceManager, rx: R) -> Self {
        Self {
            voices,
            rx,
            rejected: 0,
            last_rejection: None,
        }
    }

    /// Apply all queued control messages.
    pub fn process_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::NoteOn { note, config } => {
                    if let Err(err) = self.voices.note_on(note, &config) {
                        self.rejected += 1;
                        self.last_rejection = Some(err);
                    }
                }
                SynthMessage::NoteOff { note } => self.voices.note_off(note),
                SynthMessage::AllNotesOff => self.voices.stop(),
            }
        }
    }

    /// Note-on messages dropped because the manager refused them.
    pub fn rejected_messages(&self) -> u64 {
        self.rejected
    }

    pub fn last_rejection(&self) -> Option<&SynthError> {
        self.last_rejection.as_ref()
    }

    pub fn voices(&self) -> &VoiceManager {
        &self.voices
    }

    pub fn voices_mut(&mut self) -> &mut VoiceManager {
        &mut self.voices
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.rx
    }
}

impl<R: MessageReceiver> BlockSource for PolySynth<R> {
    fn next_block(&mut self) -> &[f32] {
        self.process_messages();
        self.voices.next_block()
    }
}
