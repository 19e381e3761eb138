use crate::dsp::block::BlockSource;

/// Serves arbitrary-length reads from a fixed-block source.
///
/// Audio callbacks ask for whatever frame count the device wants; the engine
/// only produces whole blocks. The stream keeps the unread part of the last
/// block and pulls a new one when it runs dry.
pub struct BlockStream<S: BlockSource> {
    source: S,
    pending: Vec<f32>,
    read_pos: usize,
}

impl<S: BlockSource> BlockStream<S> {
    pub fn new(source: S, block_size: usize) -> Self {
        Self {
            source,
            pending: vec![0.0; block_size],
            read_pos: block_size,
        }
    }

    /// Fill `out` completely, pulling as many blocks as needed.
    pub fn fill(&mut self, out: &mut [f32]) {
        let mut written = 0;
        while written < out.len() {
            if self.read_pos == self.pending.len() {
                self.refill();
            }

            let available = &self.pending[self.read_pos..];
            let n = available.len().min(out.len() - written);
            out[written..written + n].copy_from_slice(&available[..n]);
            written += n;
            self.read_pos += n;
        }
    }

    /// Samples already rendered but not yet read.
    pub fn buffered(&self) -> usize {
        self.pending.len() - self.read_pos
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn refill(&mut self) {
        match self.source.next_block() {
            [held] => self.pending.fill(*held),
            block => {
                debug_assert_eq!(block.len(), self.pending.len(), "block length mismatch");
                self.pending.copy_from_slice(block);
            }
        }
        self.read_pos = 0;
    }
}
