// Purpose - adapters between the block engine and the outside world

pub mod stream;

pub use stream::BlockStream;
