use thiserror::Error;

/// Invalid envelope breakpoints, detected while compiling the curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A curve needs at least one breakpoint.
    #[error("envelope has no breakpoints")]
    Empty,
    /// The first breakpoint must sit at coordinate 0.
    #[error("envelope must start at 0, first point is ({x}, {value})")]
    NonZeroStart { x: f64, value: f32 },
    /// Breakpoint coordinates must never go backwards (or below zero).
    #[error("envelope point {index} at {x} comes before its predecessor at {previous}")]
    Unordered { index: usize, x: f64, previous: f64 },
    /// A breakpoint lies too far out to compile (including infinite times).
    #[error("envelope point {index} at {x} exceeds the longest curve of {max} frames")]
    SpanTooLong { index: usize, x: f64, max: usize },
    /// Curves are streamed in blocks, so a block must hold at least one sample.
    #[error("envelope block size must be non-zero")]
    ZeroBlockSize,
}

/// Errors surfaced by the synthesis engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("invalid envelope: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The note id has no entry in the frequency table.
    #[error("note {note} is outside the frequency table (0..{len})")]
    NoteOutOfRange { note: u8, len: usize },
}
