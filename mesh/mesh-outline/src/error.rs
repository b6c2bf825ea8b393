//! Error types for outline generation.

use mesh_gltf::GltfError;
use thiserror::Error;

/// Result type for outline generation.
pub type OutlineResult<T> = Result<T, OutlineError>;

/// Errors that fail a whole outline pass.
///
/// Per-primitive problems (missing attributes, conflicting vertex
/// numbering) never surface here; those primitives are skipped and
/// counted in the returned summary. Errors below mean the source
/// document itself is malformed and no buffers have been left half
/// rewritten.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// The document's structural references are broken.
    #[error("malformed source document: {0}")]
    MalformedDocument(#[from] GltfError),

    /// An index accessor uses a component type that is not a 16- or
    /// 32-bit unsigned integer.
    #[error("accessor {accessor} has unsupported index component type (code {code})")]
    UnsupportedIndexType {
        /// The offending accessor.
        accessor: usize,
        /// GPU type code of the component type found.
        code: u32,
    },

    /// A triangle index references a vertex past the primitive's vertex
    /// count.
    #[error("accessor {accessor} references vertex {index} but the primitive has {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending accessor.
        accessor: usize,
        /// The out-of-range index value.
        index: u32,
        /// Vertices available in the primitive's numbering scope.
        vertex_count: usize,
    },

    /// An index accessor's element count is not a multiple of the
    /// expected group size (3 for triangle lists, 2 for edge lists).
    #[error("accessor {accessor} holds {count} indices, not a multiple of {group}")]
    IndexCountNotMultiple {
        /// The offending accessor.
        accessor: usize,
        /// Number of indices found.
        count: usize,
        /// Required group size.
        group: usize,
    },

    /// The worker pool for batch processing could not be built.
    #[error("failed to build worker pool: {message}")]
    WorkerPool {
        /// Reason reported by the pool builder.
        message: String,
    },
}
