//! Raw byte storage and byte-range windows.

/// A contiguous block of raw bytes backing one or more buffer views.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    /// The backing bytes.
    pub data: Vec<u8>,
}

impl Buffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a buffer from existing bytes.
    #[must_use]
    pub const fn from_data(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length of the backing storage in bytes.
    #[must_use]
    pub const fn byte_length(&self) -> usize {
        self.data.len()
    }
}

/// A byte-range window into a [`Buffer`].
///
/// Both the byte range and the referenced buffer are mutable: passes that
/// append vertices re-point views at freshly allocated buffers, and buffer
/// compaction rewrites offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    /// Index of the buffer this view windows into.
    pub buffer: usize,

    /// Byte offset of the window within the buffer.
    pub byte_offset: usize,

    /// Length of the window in bytes.
    pub byte_length: usize,

    /// Distance in bytes between consecutive vertex records, for
    /// interleaved vertex data. `None` means tightly packed.
    pub byte_stride: Option<usize>,
}

impl BufferView {
    /// Create a tightly packed view over `buffer[byte_offset..byte_offset + byte_length]`.
    #[must_use]
    pub const fn new(buffer: usize, byte_offset: usize, byte_length: usize) -> Self {
        Self {
            buffer,
            byte_offset,
            byte_length,
            byte_stride: None,
        }
    }

    /// Create an interleaved view with an explicit vertex record stride.
    #[must_use]
    pub const fn with_stride(
        buffer: usize,
        byte_offset: usize,
        byte_length: usize,
        byte_stride: usize,
    ) -> Self {
        Self {
            buffer,
            byte_offset,
            byte_length,
            byte_stride: Some(byte_stride),
        }
    }

    /// Exclusive end of the window within the buffer.
    #[must_use]
    pub const fn byte_end(&self) -> usize {
        self.byte_offset + self.byte_length
    }
}
