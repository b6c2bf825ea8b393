//! Buffer reconstruction for grown vertex numbering scopes.
//!
//! Runs once per scope, after every primitive sharing it has been
//! solved: appends duplicated vertex records to each buffer view, grows
//! accessor counts, materializes the outline coordinate accessor, and
//! finally reclaims buffer bytes orphaned by re-pointed views.

use mesh_gltf::{Accessor, Buffer, BufferView, Document};
use tracing::debug;

use crate::error::OutlineResult;
use crate::scope::{AttributeState, VertexNumberingScope};
use crate::OUTLINE_COORDINATES_ATTRIBUTE;

/// Size in bytes of one vec3 float coordinate record.
const COORDINATE_STRIDE: usize = 3 * std::mem::size_of::<f32>();

/// Consume a solved scope: grow its vertex buffers and attach the
/// outline coordinate accessor to every primitive it records.
pub(crate) fn rebuild_scope(
    doc: &mut Document,
    mut scope: VertexNumberingScope,
) -> OutlineResult<()> {
    if scope.duplicate_count() > 0 {
        grow_vertex_buffers(doc, &scope)?;
    }
    create_outline_attribute(doc, &mut scope);
    Ok(())
}

/// Append one vertex record per duplicate to every buffer view feeding
/// the scope's accessors, re-pointing each view at a fresh buffer.
fn grow_vertex_buffers(doc: &mut Document, scope: &VertexNumberingScope) -> OutlineResult<()> {
    let extra = scope.extra_vertices();
    let original_count = scope.original_vertex_count();

    for &view_index in &scope.buffer_views {
        let mut stride = doc.buffer_view(view_index)?.byte_stride;
        if stride.is_none() {
            // Tightly packed view: the record is one element of the
            // accessor reading it.
            for &accessor_index in &scope.accessors {
                let accessor = doc.accessor(accessor_index)?;
                if accessor.buffer_view == Some(view_index) {
                    stride = Some(accessor.element_size());
                    break;
                }
            }
        }
        let Some(stride) = stride else {
            // A view is only registered together with an accessor over it.
            continue;
        };

        let src = doc.view_bytes(view_index)?;

        // Re-lay the records on an exact stride grid so appended vertex
        // N reads back at byte offset N * stride. Queueing guarantees no
        // accessor reads past the grid, so trailing bytes are dead.
        let mut data = src.to_vec();
        data.resize(original_count * stride, 0);
        data.reserve(extra.len() * stride);
        for &original in extra {
            let start = original as usize * stride;
            let end = (start + stride).min(src.len());
            data.extend_from_slice(&src[start..end]);
            data.resize(data.len() + (stride - (end - start)), 0);
        }

        debug!(
            view = view_index,
            stride,
            appended = extra.len(),
            "appended duplicated vertex records"
        );

        // The view no longer aliases its source buffer.
        let byte_length = data.len();
        let buffer = doc.push_buffer(Buffer::from_data(data));
        let view = &mut doc.buffer_views[view_index];
        view.buffer = buffer;
        view.byte_offset = 0;
        view.byte_length = byte_length;
    }

    for &accessor_index in &scope.accessors {
        doc.accessor(accessor_index)?;
        doc.accessors[accessor_index].count += extra.len();
    }

    Ok(())
}

/// Materialize the scope's coordinate slots as a new float accessor and
/// attach it to every recorded primitive. Guarded so it happens exactly
/// once per scope.
fn create_outline_attribute(doc: &mut Document, scope: &mut VertexNumberingScope) {
    if scope.state == AttributeState::Committed {
        return;
    }

    let total = scope.total_vertex_count();
    let coordinates = scope.coordinates_f32();
    debug_assert_eq!(coordinates.len(), total * 3);

    let bytes: Vec<u8> = bytemuck::cast_slice(&coordinates).to_vec();
    let byte_length = bytes.len();
    let buffer = doc.push_buffer(Buffer::from_data(bytes));
    let view = doc.push_buffer_view(BufferView::with_stride(
        buffer,
        0,
        byte_length,
        COORDINATE_STRIDE,
    ));
    let mut accessor = Accessor::vec3_f32(view, total);
    accessor.min = Some(vec![0.0; 3]);
    accessor.max = Some(vec![1.0; 3]);
    let accessor = doc.push_accessor(accessor);

    for reference in &scope.primitives {
        doc.meshes[reference.mesh].primitives[reference.primitive]
            .attributes
            .insert(OUTLINE_COORDINATES_ATTRIBUTE.to_owned(), accessor);
    }

    debug!(
        vertices = total,
        primitives = scope.primitives.len(),
        "created outline coordinate accessor"
    );

    scope.state = AttributeState::Committed;
}

/// Reclaim bytes of the original buffers that are no longer windowed by
/// any view (because views were re-pointed at fresh buffers).
///
/// For every original buffer whose referencing views no longer cover its
/// exact length, the surviving views' bytes are copied contiguously into
/// replacement storage and their offsets rewritten. Afterward the sum of
/// view lengths over each buffer equals the buffer's length, with no
/// overlap.
pub(crate) fn compact_buffers(doc: &mut Document, original_buffer_count: usize) {
    for buffer_index in 0..original_buffer_count {
        let referencing: Vec<usize> = doc
            .buffer_views
            .iter()
            .enumerate()
            .filter(|(_, view)| view.buffer == buffer_index)
            .map(|(index, _)| index)
            .collect();

        let total: usize = referencing
            .iter()
            .map(|&view| doc.buffer_views[view].byte_length)
            .sum();
        if total == doc.buffers[buffer_index].byte_length() {
            continue;
        }

        let old = std::mem::take(&mut doc.buffers[buffer_index].data);
        let mut data = Vec::with_capacity(total);
        for &view_index in &referencing {
            let view = &mut doc.buffer_views[view_index];
            let start = view.byte_offset.min(old.len());
            let end = view.byte_end().min(old.len());
            view.byte_offset = data.len();
            data.extend_from_slice(&old[start..end]);
        }

        debug!(
            buffer = buffer_index,
            reclaimed = old.len() - data.len(),
            "compacted buffer"
        );
        doc.buffers[buffer_index].data = data;
    }
}
