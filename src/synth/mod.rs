// Purpose: Voice management, polyphony, note → frequency mapping
// This layer sits above the dsp generators and manages one voice per note

pub mod manager;
pub mod message;
pub mod poly;
pub mod tuning;
pub mod voice;

pub use manager::VoiceManager;
pub use message::{MessageReceiver, SynthMessage};
pub use poly::PolySynth;
pub use tuning::FrequencyTable;
pub use voice::{Voice, VoiceState};
