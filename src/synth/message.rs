#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::config::VoiceConfig;

/// Control events from the input layer, applied before the next block is mixed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    /// Start a note with the patch values read at key-press time.
    NoteOn { note: u8, config: VoiceConfig },
    NoteOff { note: u8 },
    /// Panic button: silence everything immediately.
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Plain queue for single-threaded drivers and tests.
impl MessageReceiver for std::collections::VecDeque<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        self.pop_front()
    }
}
