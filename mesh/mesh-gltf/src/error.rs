//! Error types for document structure violations.

use thiserror::Error;

/// Result type for document operations.
pub type GltfResult<T> = Result<T, GltfError>;

/// Errors that can occur when reading or rewriting document structure.
///
/// These indicate a malformed source document (dangling references,
/// byte ranges that do not fit their backing storage). They are caller
/// contract violations, not conditions a processing pass recovers from.
#[derive(Debug, Error)]
pub enum GltfError {
    /// An accessor index does not exist in the document.
    #[error("accessor index {index} out of range ({count} accessors)")]
    InvalidAccessor {
        /// The dangling index.
        index: usize,
        /// Number of accessors in the document.
        count: usize,
    },

    /// A buffer view index does not exist in the document.
    #[error("buffer view index {index} out of range ({count} buffer views)")]
    InvalidBufferView {
        /// The dangling index.
        index: usize,
        /// Number of buffer views in the document.
        count: usize,
    },

    /// A buffer index does not exist in the document.
    #[error("buffer index {index} out of range ({count} buffers)")]
    InvalidBuffer {
        /// The dangling index.
        index: usize,
        /// Number of buffers in the document.
        count: usize,
    },

    /// A buffer view's byte range extends past the end of its buffer.
    #[error(
        "buffer view {view} needs bytes {offset}..{end} but buffer {buffer} has {available} bytes"
    )]
    ViewOutOfBounds {
        /// The offending buffer view.
        view: usize,
        /// The buffer it references.
        buffer: usize,
        /// Start of the requested range.
        offset: usize,
        /// End of the requested range.
        end: usize,
        /// Bytes available in the buffer.
        available: usize,
    },

    /// An accessor's element data extends past the end of its buffer view.
    #[error("accessor {accessor} needs {needed} bytes but buffer view {view} has {available}")]
    AccessorOutOfBounds {
        /// The offending accessor.
        accessor: usize,
        /// The buffer view it references.
        view: usize,
        /// Bytes the accessor's elements require.
        needed: usize,
        /// Bytes available in the view.
        available: usize,
    },

    /// An accessor has no buffer view to read from.
    #[error("accessor {accessor} has no buffer view")]
    MissingBufferView {
        /// The accessor without backing storage.
        accessor: usize,
    },
}
