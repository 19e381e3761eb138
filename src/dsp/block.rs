/*
Blocks and Broadcasting
=======================

Every generator in this crate hands out audio one block at a time: a slice of
`block_size` consecutive samples. The only exception is an envelope that has
run off the end of its curve. Instead of copying its final value into a full
block forever, it returns a one-sample block holding that value:

    curve:   [0.0, 0.25, 0.5, 0.75]  [1.0, 1.0, 1.0, 1.0]  [1.0]  [1.0] ...
              block 0                 block 1               held value

Whoever combines signals must therefore accept a one-sample block and treat
it as a constant across the whole block. `multiply_broadcast` does exactly
that, so a voice can write

    carrier (block_size)  x  envelope (block_size or 1)

without caring which stage the envelope is in.
*/

/// A pull-based generator of fixed-size sample blocks.
///
/// The returned slice is borrowed from the generator's own storage and is
/// valid until the next call. Implementations never allocate here.
pub trait BlockSource {
    fn next_block(&mut self) -> &[f32];
}

impl<S: BlockSource + ?Sized> BlockSource for Box<S> {
    fn next_block(&mut self) -> &[f32] {
        (**self).next_block()
    }
}

/// Multiply `out` by `gain` in place. A one-sample `gain` is broadcast.
pub fn multiply_broadcast(out: &mut [f32], gain: &[f32]) {
    match gain {
        [g] => {
            let g = *g;
            for o in out.iter_mut() {
                *o *= g;
            }
        }
        _ => {
            debug_assert_eq!(out.len(), gain.len(), "block length mismatch");
            for (o, g) in out.iter_mut().zip(gain) {
                *o *= *g;
            }
        }
    }
}

/// Add `block` into `out`. A one-sample `block` is broadcast.
pub fn accumulate(out: &mut [f32], block: &[f32]) {
    match block {
        [b] => {
            let b = *b;
            for o in out.iter_mut() {
                *o += b;
            }
        }
        _ => {
            debug_assert_eq!(out.len(), block.len(), "block length mismatch");
            for (o, b) in out.iter_mut().zip(block) {
                *o += *b;
            }
        }
    }
}
