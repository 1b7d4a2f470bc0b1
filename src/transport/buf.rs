use std::fmt;

use crate::util::ConsumeBuf;

/// Abstraction over input/output buffers.
///
/// The buffers are provided by the [`Transport`](super::Transport).
pub trait Buffers {
    /// Mut handle to output buffers to write new data. Data is always
    /// written from `0..`.
    fn output(&mut self) -> &mut [u8];

    /// Unconsumed bytes in the input buffer as read only.
    ///
    /// The input buffer is written to by using [`Buffers::input_append_buf`] followed by
    /// [`Buffers::input_appended`] to indiciate how many additional bytes were added to the
    /// input.
    fn input(&self) -> &[u8];

    /// Input buffer to write to. This can be called despite there being unconsumed bytes
    /// left in the buffer already.
    fn input_append_buf(&mut self) -> &mut [u8];

    /// Add a number of read bytes into [`Buffers::input_append_buf()`].
    fn input_appended(&mut self, amount: usize);

    /// Consume a number of bytes from `&input`.
    fn input_consume(&mut self, amount: usize);

    /// Tell if the `&input` already holds data we can use without reading more
    /// from the transport:
    ///
    /// 1. There is unconsumed data in the input buffer
    /// 2. The last call to consume was > 0.
    ///
    /// Step 2 is because the input buffer might contain half a response head, and we
    /// cannot parse it until we got the entire head.
    fn can_use_input(&self) -> bool;
}

/// Default buffer implementation.
///
/// The buffers are lazy such that no allocations are made until needed.
pub struct LazyBuffers {
    input_size: usize,
    output_size: usize,

    input: ConsumeBuf,
    output: Vec<u8>,

    progress: bool,
}

impl LazyBuffers {
    /// Create a new buffer.
    ///
    /// The sizes provided are not allocated until we need to.
    pub fn new(input_size: usize, output_size: usize) -> Self {
        assert!(input_size > 0);
        assert!(output_size > 0);

        LazyBuffers {
            input_size,
            output_size,

            // Vectors don't allocate until they get a size.
            input: ConsumeBuf::new(0),
            output: vec![],

            progress: false,
        }
    }

    fn ensure_allocation(&mut self) {
        if self.output.len() < self.output_size {
            self.output.resize(self.output_size, 0);
        }
        if self.input.len() < self.input_size {
            self.input.resize(self.input_size);
        }
    }
}

impl fmt::Debug for LazyBuffers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyBuffers")
            .field("input", &self.input)
            .field("output_len", &self.output.len())
            .field("progress", &self.progress)
            .finish()
    }
}

impl Buffers for LazyBuffers {
    fn output(&mut self) -> &mut [u8] {
        self.ensure_allocation();
        &mut self.output
    }

    fn input(&self) -> &[u8] {
        self.input.unconsumed()
    }

    fn input_append_buf(&mut self) -> &mut [u8] {
        self.ensure_allocation();
        self.input.free_mut()
    }

    fn input_appended(&mut self, amount: usize) {
        self.input.add_filled(amount);
    }

    fn input_consume(&mut self, amount: usize) {
        self.progress = amount > 0;
        self.input.consume(amount);
    }

    fn can_use_input(&self) -> bool {
        !self.input.unconsumed().is_empty() && self.progress
    }
}
