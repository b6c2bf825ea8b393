//! In-memory glTF-style document tables.
//!
//! This crate provides the mutable, in-memory representation of a glTF-like
//! asset that mesh post-processing passes read and structurally extend:
//!
//! - [`Buffer`] - Raw byte storage
//! - [`BufferView`] - A byte-range window into a buffer
//! - [`Accessor`] - A typed, counted view into a buffer view
//! - [`Mesh`] / [`Primitive`] - Drawable triangle sets with named attributes
//! - [`Document`] - The top-level tables tying everything together
//!
//! Container parsing (reading `.gltf`/`.glb` files) is deliberately out of
//! scope; this crate is the in-memory contract between a loader and the
//! passes that rewrite buffers, grow accessors, and add attributes.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_gltf::{Accessor, Buffer, BufferView, ComponentType, Document};
//!
//! let mut doc = Document::new();
//! let buffer = doc.push_buffer(Buffer::from_data(vec![0u8; 24]));
//! let view = doc.push_buffer_view(BufferView::new(buffer, 0, 24));
//! let accessor = doc.push_accessor(Accessor::vec3_f32(view, 2));
//!
//! assert!(doc.validate().is_ok());
//! assert_eq!(doc.accessors[accessor].byte_length(), 24);
//! ```

#![warn(missing_docs)]
// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod accessor;
mod buffer;
mod document;
mod error;

pub use accessor::{Accessor, AccessorType, ComponentType};
pub use buffer::{Buffer, BufferView};
pub use document::{Document, Mesh, Primitive};
pub use error::{GltfError, GltfResult};
