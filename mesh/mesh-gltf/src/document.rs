//! Top-level document tables and structural validation.

use hashbrown::HashMap;

use crate::accessor::Accessor;
use crate::buffer::{Buffer, BufferView};
use crate::error::{GltfError, GltfResult};

/// One drawable set of triangles within a mesh.
///
/// Attributes map a semantic name (`"POSITION"`, `"NORMAL"`, ...) to an
/// accessor index. All attribute accessors of a primitive must have the
/// same element count (the primitive's vertex count).
#[derive(Debug, Clone, Default)]
pub struct Primitive {
    /// Named per-vertex attributes, each referencing an accessor.
    pub attributes: HashMap<String, usize>,

    /// Accessor holding the triangle index list, if indexed.
    pub indices: Option<usize>,

    /// Accessor holding the edge list to render as outlines, in the style
    /// of the `CESIUM_primitive_outline` glTF extension: a flat unsigned
    /// integer index buffer consumed two entries at a time, each pair
    /// naming one edge by its endpoint vertex indices.
    pub outline_edges: Option<usize>,
}

impl Primitive {
    /// Create a primitive with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A named collection of primitives.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// The primitives making up this mesh.
    pub primitives: Vec<Primitive>,
}

/// The mutable in-memory document: buffers, buffer views, accessors, meshes.
///
/// Processing passes both read and structurally extend this document
/// (adding buffers, views and accessors, rewriting primitive attribute
/// maps). Indices into the tables are stable: entries are never removed,
/// only appended or rewritten in place.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Raw byte storage.
    pub buffers: Vec<Buffer>,

    /// Byte-range windows into buffers.
    pub buffer_views: Vec<BufferView>,

    /// Typed views into buffer views.
    pub accessors: Vec<Accessor>,

    /// Drawable meshes.
    pub meshes: Vec<Mesh>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffers: Vec::new(),
            buffer_views: Vec::new(),
            accessors: Vec::new(),
            meshes: Vec::new(),
        }
    }

    /// Append a buffer, returning its index.
    pub fn push_buffer(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.buffers.len() - 1
    }

    /// Append a buffer view, returning its index.
    pub fn push_buffer_view(&mut self, view: BufferView) -> usize {
        self.buffer_views.push(view);
        self.buffer_views.len() - 1
    }

    /// Append an accessor, returning its index.
    pub fn push_accessor(&mut self, accessor: Accessor) -> usize {
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    /// Get an accessor, or a structural error if the index dangles.
    pub fn accessor(&self, index: usize) -> GltfResult<&Accessor> {
        self.accessors.get(index).ok_or(GltfError::InvalidAccessor {
            index,
            count: self.accessors.len(),
        })
    }

    /// Get a buffer view, or a structural error if the index dangles.
    pub fn buffer_view(&self, index: usize) -> GltfResult<&BufferView> {
        self.buffer_views
            .get(index)
            .ok_or(GltfError::InvalidBufferView {
                index,
                count: self.buffer_views.len(),
            })
    }

    /// The bytes windowed by a buffer view.
    pub fn view_bytes(&self, view: usize) -> GltfResult<&[u8]> {
        let v = self.buffer_view(view)?;
        let buffer = self.buffers.get(v.buffer).ok_or(GltfError::InvalidBuffer {
            index: v.buffer,
            count: self.buffers.len(),
        })?;
        buffer
            .data
            .get(v.byte_offset..v.byte_end())
            .ok_or(GltfError::ViewOutOfBounds {
                view,
                buffer: v.buffer,
                offset: v.byte_offset,
                end: v.byte_end(),
                available: buffer.byte_length(),
            })
    }

    /// The tightly packed element bytes of an accessor.
    ///
    /// Only valid for accessors over unstrided views (index buffers and
    /// the like); interleaved vertex data must be read through
    /// [`Document::view_bytes`] with the view's stride.
    pub fn accessor_bytes(&self, index: usize) -> GltfResult<&[u8]> {
        let accessor = self.accessor(index)?;
        let view = accessor
            .buffer_view
            .ok_or(GltfError::MissingBufferView { accessor: index })?;
        let needed = accessor.byte_length();
        let bytes = self.view_bytes(view)?;
        bytes
            .get(accessor.byte_offset..accessor.byte_offset + needed)
            .ok_or(GltfError::AccessorOutOfBounds {
                accessor: index,
                view,
                needed: accessor.byte_offset + needed,
                available: bytes.len(),
            })
    }

    /// Mutable access to the tightly packed element bytes of an accessor.
    pub fn accessor_bytes_mut(&mut self, index: usize) -> GltfResult<&mut [u8]> {
        let accessor = self.accessor(index)?;
        let view_index = accessor
            .buffer_view
            .ok_or(GltfError::MissingBufferView { accessor: index })?;
        let needed = accessor.byte_length();
        let accessor_offset = accessor.byte_offset;

        let view = self.buffer_view(view_index)?.clone();
        let available = view.byte_length;
        let buffer_len = self
            .buffers
            .get(view.buffer)
            .map_or(0, Buffer::byte_length);
        if view.byte_end() > buffer_len {
            return Err(GltfError::ViewOutOfBounds {
                view: view_index,
                buffer: view.buffer,
                offset: view.byte_offset,
                end: view.byte_end(),
                available: buffer_len,
            });
        }
        if accessor_offset + needed > available {
            return Err(GltfError::AccessorOutOfBounds {
                accessor: index,
                view: view_index,
                needed: accessor_offset + needed,
                available,
            });
        }

        let start = view.byte_offset + accessor_offset;
        Ok(&mut self.buffers[view.buffer].data[start..start + needed])
    }

    /// Check structural integrity of every reference in the document.
    ///
    /// Verifies that buffer views fit their buffers, accessors fit their
    /// buffer views (honoring interleaving strides), and primitive
    /// attribute/index references resolve to real accessors.
    ///
    /// # Errors
    ///
    /// Returns the first structural violation found.
    pub fn validate(&self) -> GltfResult<()> {
        for (i, view) in self.buffer_views.iter().enumerate() {
            let buffer = self
                .buffers
                .get(view.buffer)
                .ok_or(GltfError::InvalidBuffer {
                    index: view.buffer,
                    count: self.buffers.len(),
                })?;
            if view.byte_end() > buffer.byte_length() {
                return Err(GltfError::ViewOutOfBounds {
                    view: i,
                    buffer: view.buffer,
                    offset: view.byte_offset,
                    end: view.byte_end(),
                    available: buffer.byte_length(),
                });
            }
        }

        for (i, accessor) in self.accessors.iter().enumerate() {
            let Some(view_index) = accessor.buffer_view else {
                continue;
            };
            let view = self.buffer_view(view_index)?;
            let element = accessor.element_size();
            let stride = view.byte_stride.unwrap_or(element);
            let needed = if accessor.count == 0 {
                0
            } else {
                accessor.byte_offset + (accessor.count - 1) * stride + element
            };
            if needed > view.byte_length {
                return Err(GltfError::AccessorOutOfBounds {
                    accessor: i,
                    view: view_index,
                    needed,
                    available: view.byte_length,
                });
            }
        }

        for mesh in &self.meshes {
            for primitive in &mesh.primitives {
                for &accessor in primitive
                    .attributes
                    .values()
                    .chain(&primitive.indices)
                    .chain(&primitive.outline_edges)
                {
                    self.accessor(accessor)?;
                }
            }
        }

        Ok(())
    }
}
