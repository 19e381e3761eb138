use crate::{
    config::StreamFormat,
    dsp::block::BlockSource,
    error::ConfigurationError,
};

/*
Breakpoint Envelopes
====================

An envelope is a piecewise-linear curve through (x, value) breakpoints,
compiled once into a sample buffer and then streamed out block by block.

Compiling the Curve
-------------------

Each segment (x0, y0) → (x1, y1) is sampled at x1 - x0 + 1 evenly spaced
points, and the last one is dropped because it is the first point of the next
segment:

    points:  (0, 0.0)   (4, 1.0)   (6, 0.5)

    segment 1:  0.0  0.25  0.5  0.75  [1.0]      ← dropped
    segment 2:                         1.0  0.75  [0.5]
    buffer:     0.0  0.25  0.5  0.75   1.0  0.75

Every breakpoint lands exactly on buffer[x]: no plateau of two equal samples
at a join, no gap.

Padding
-------

The buffer is then padded with the final value up to the next multiple of the
block size. A span that is already a whole number of blocks still gets one
full block of padding, so the final value always appears in the buffer and a
zero-length curve like [(0, 0.5), (0, 0.5)] still yields a block of 0.5:

    block_size = 4, span = 6:   0.0 0.25 0.5 0.75 | 1.0 0.75 0.5 0.5

Streaming
---------

`next_block` hands out consecutive block-sized slices. Once the buffer is
exhausted it returns a one-sample block holding the final value, forever.
`reset` rewinds the cursor so the same curve can be retriggered without
recompiling.
*/

/// Longest curve accepted, in frames (about 23 minutes at 48 kHz).
pub const MAX_SPAN_FRAMES: usize = 1 << 26;

pub struct Envelope {
    buffer: Vec<f32>,
    block_size: usize,
    frame: usize,
    hold: [f32; 1],
}

impl Envelope {
    /// Compile a curve whose x coordinates are sample frames.
    pub fn new(points: &[(usize, f32)], format: StreamFormat) -> Result<Self, ConfigurationError> {
        let points: Vec<(f64, f32)> = points.iter().map(|&(x, y)| (x as f64, y)).collect();
        Self::compile(&points, format.block_size())
    }

    /// Compile a curve whose x coordinates are seconds.
    ///
    /// Times are rounded to the nearest frame at the format's sample rate.
    pub fn from_seconds(
        points: &[(f32, f32)],
        format: StreamFormat,
    ) -> Result<Self, ConfigurationError> {
        let points: Vec<(f64, f32)> = points
            .iter()
            .map(|&(t, y)| (format.seconds_to_frames(t), y))
            .collect();
        Self::compile(&points, format.block_size())
    }

    fn compile(points: &[(f64, f32)], block_size: usize) -> Result<Self, ConfigurationError> {
        let (&(x_start, y_start), rest) =
            points.split_first().ok_or(ConfigurationError::Empty)?;
        if x_start != 0.0 {
            return Err(ConfigurationError::NonZeroStart {
                x: x_start,
                value: y_start,
            });
        }

        if block_size == 0 {
            return Err(ConfigurationError::ZeroBlockSize);
        }

        let mut previous = x_start;
        for (i, &(x, _)) in rest.iter().enumerate() {
            if x.is_nan() || x < previous {
                return Err(ConfigurationError::Unordered {
                    index: i + 1,
                    x,
                    previous,
                });
            }
            if x > MAX_SPAN_FRAMES as f64 {
                return Err(ConfigurationError::SpanTooLong {
                    index: i + 1,
                    x,
                    max: MAX_SPAN_FRAMES,
                });
            }
            previous = x;
        }

        let span = previous as usize;
        let padding = block_size - span % block_size;
        let len = span
            .checked_add(padding)
            .ok_or(ConfigurationError::SpanTooLong {
                index: rest.len(),
                x: previous,
                max: MAX_SPAN_FRAMES,
            })?;
        let mut buffer = Vec::with_capacity(len);

        let (mut x0, mut y0) = (0usize, y_start);
        for &(x, y1) in rest {
            let x1 = x as usize;
            let width = x1 - x0;
            for k in 0..width {
                buffer.push(y0 + (y1 - y0) * (k as f32 / width as f32));
            }
            (x0, y0) = (x1, y1);
        }

        buffer.resize(len, y0);
        let last = y0;

        Ok(Self {
            buffer,
            block_size,
            frame: 0,
            hold: [last],
        })
    }

    /// Rewind to the start of the curve.
    pub fn reset(&mut self) {
        self.frame = 0;
    }

    /// Value held once the curve is exhausted.
    pub fn last(&self) -> f32 {
        self.hold[0]
    }

    /// Compiled length in samples, always a multiple of the block size.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True once every compiled block has been streamed.
    pub fn is_finished(&self) -> bool {
        self.frame >= self.buffer.len()
    }

    /// The whole compiled curve.
    pub fn samples(&self) -> &[f32] {
        &self.buffer
    }
}

impl BlockSource for Envelope {
    fn next_block(&mut self) -> &[f32] {
        if self.frame < self.buffer.len() {
            let start = self.frame;
            self.frame += self.block_size;
            &self.buffer[start..self.frame]
        } else {
            &self.hold
        }
    }
}
