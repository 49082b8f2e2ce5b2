/// Scratch amplitude buffers reused across spectra within one run.
///
/// At most `max_capacity` released buffers are retained; `reset` drops
/// them all and is called from filter cleanup.
#[derive(Debug)]
pub struct BufferPool {
    buffers: Vec<Vec<f32>>,
    max_capacity: usize,
}

impl BufferPool {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            buffers: Vec::with_capacity(max_capacity),
            max_capacity,
        }
    }

    /// Zeroed buffer of `length`, recycled when one is available.
    pub fn checkout(&mut self, length: usize) -> Vec<f32> {
        match self.buffers.pop() {
            Some(mut buffer) => {
                buffer.clear();
                buffer.resize(length, 0.0);
                buffer
            }
            None => vec![0.0; length],
        }
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<f32>) {
        buffer.clear();
        if self.buffers.len() < self.max_capacity {
            self.buffers.push(buffer);
        }
    }

    pub fn retained(&self) -> usize {
        self.buffers.len()
    }

    pub fn reset(&mut self) {
        self.buffers.clear();
    }
}
