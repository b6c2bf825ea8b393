//! Outline coordinate generation for selective triangle-edge rendering.
//!
//! Given a mesh primitive with a list of edges to render as outlines
//! (the `CESIUM_primitive_outline` convention: a flat index buffer of
//! endpoint pairs), this crate assigns every vertex three scalar
//! "edge-proximity" coordinates so that a single fragment-stage rule -
//! "some coordinate reads near 1.0 close to an outlined edge" - draws
//! exactly the listed edges, with no geometry shader and no second draw
//! call.
//!
//! The catch is that a vertex is shared by many triangles whose outline
//! requirements can conflict. The solver searches the six orderings of
//! each triangle's desired coordinate triples for one consistent with
//! everything already committed; when no ordering survives, the most
//! constrained vertex is duplicated, the triangle indices are rewritten,
//! and the underlying vertex buffers are grown so the duplicate carries
//! a byte-identical copy of the original's attribute data.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_gltf::{Accessor, Buffer, BufferView, ComponentType, Document, Mesh, Primitive};
//! use mesh_outline::{add_outlines, OUTLINE_COORDINATES_ATTRIBUTE};
//!
//! // One triangle with its (0,1) edge outlined.
//! let mut doc = Document::new();
//! let positions: Vec<u8> = [0.0f32; 9].iter().flat_map(|v| v.to_le_bytes()).collect();
//! let buffer = doc.push_buffer(Buffer::from_data(positions));
//! let view = doc.push_buffer_view(BufferView::new(buffer, 0, 36));
//! let position = doc.push_accessor(Accessor::vec3_f32(view, 3));
//!
//! let index_buffer = doc.push_buffer(Buffer::from_data(vec![0, 0, 1, 0, 2, 0]));
//! let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, 6));
//! let indices = doc.push_accessor(Accessor::scalar(index_view, ComponentType::UnsignedShort, 3));
//!
//! let edge_buffer = doc.push_buffer(Buffer::from_data(vec![0, 0, 1, 0]));
//! let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, 4));
//! let edges = doc.push_accessor(Accessor::scalar(edge_view, ComponentType::UnsignedShort, 2));
//!
//! let mut primitive = Primitive::new();
//! primitive.attributes.insert("POSITION".to_owned(), position);
//! primitive.indices = Some(indices);
//! primitive.outline_edges = Some(edges);
//! doc.meshes.push(Mesh { primitives: vec![primitive] });
//!
//! let summary = add_outlines(&mut doc).unwrap();
//! assert_eq!(summary.primitives_processed, 1);
//! assert!(doc.meshes[0].primitives[0].attributes.contains_key(OUTLINE_COORDINATES_ATTRIBUTE));
//! ```

#![warn(missing_docs)]
// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cache;
mod edges;
mod error;
mod pipeline;
mod rebuild;
mod scope;
mod solver;

pub use cache::{add_outlines_batch, default_worker_count, OutlineCache};
pub use edges::EdgeSet;
pub use error::{OutlineError, OutlineResult};
pub use pipeline::{add_outlines, OutlineSummary};

/// Reserved attribute name under which the generated 3-component float
/// coordinate accessor is attached to each processed primitive.
pub const OUTLINE_COORDINATES_ATTRIBUTE: &str = "_OUTLINE_COORDINATES";
