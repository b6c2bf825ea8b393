//! The outline pass: work queueing, solving, and reconstruction.

use hashbrown::HashMap;
use mesh_gltf::{Accessor, Buffer, BufferView, ComponentType, Document};
use tracing::{debug, info, warn};

use crate::edges::EdgeSet;
use crate::error::{OutlineError, OutlineResult};
use crate::rebuild::{compact_buffers, rebuild_scope};
use crate::scope::VertexNumberingScope;
use crate::solver::assign_primitive;

/// Statistics from one outline pass over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineSummary {
    /// Primitives that received outline coordinates.
    pub primitives_processed: usize,

    /// Primitives with an edge list that could not be processed
    /// (missing attributes, conflicting vertex numbering) and were left
    /// unmodified.
    pub primitives_skipped: usize,

    /// Vertices appended by conflict-resolving duplication.
    pub vertices_duplicated: usize,

    /// Vertex numbering scopes reconstructed.
    pub scopes_rebuilt: usize,

    /// Triangle index accessors widened from 16- to 32-bit because
    /// duplication pushed indices past `u16::MAX`.
    pub index_accessors_widened: usize,
}

/// One queued primitive, resolved to its scope and accessors.
struct WorkItem {
    mesh: usize,
    primitive: usize,
    scope: usize,
    indices: usize,
    edges: usize,
}

/// Generate outline coordinates for every primitive in the document that
/// carries an edge-highlight list.
///
/// Each such primitive gains a 3-component float attribute named
/// [`OUTLINE_COORDINATES_ATTRIBUTE`](crate::OUTLINE_COORDINATES_ATTRIBUTE)
/// whose per-vertex values let a fragment shader draw exactly the listed
/// edges. Vertices shared by triangles with incompatible edge
/// requirements are duplicated and the triangle indices rewritten; the
/// underlying vertex buffers grow accordingly and dead buffer bytes are
/// compacted away.
///
/// Primitives that cannot be processed coherently are skipped, not
/// failed; see [`OutlineSummary::primitives_skipped`].
///
/// # Errors
///
/// Fails without mutating buffers if the document's structural
/// references are broken, or if an index accessor has an unsupported
/// component type or a malformed element count.
pub fn add_outlines(doc: &mut Document) -> OutlineResult<OutlineSummary> {
    doc.validate()?;

    let original_buffer_count = doc.buffers.len();
    let mut summary = OutlineSummary::default();
    let mut scopes: Vec<VertexNumberingScope> = Vec::new();
    let mut scope_by_view: HashMap<usize, usize> = HashMap::new();
    let mut work: Vec<WorkItem> = Vec::new();

    for mesh_index in 0..doc.meshes.len() {
        for primitive_index in 0..doc.meshes[mesh_index].primitives.len() {
            let primitive = &doc.meshes[mesh_index].primitives[primitive_index];
            let Some(edges) = primitive.outline_edges else {
                continue;
            };
            let Some(indices) = primitive.indices else {
                warn!(
                    mesh = mesh_index,
                    primitive = primitive_index,
                    "skipping outline: primitive has no triangle indices"
                );
                summary.primitives_skipped += 1;
                continue;
            };

            match queue_primitive(doc, &mut scopes, &mut scope_by_view, mesh_index, primitive_index)? {
                Some(scope) => work.push(WorkItem {
                    mesh: mesh_index,
                    primitive: primitive_index,
                    scope,
                    indices,
                    edges,
                }),
                None => summary.primitives_skipped += 1,
            }
        }
    }

    // Read every queued primitive's index data up front, so malformed
    // counts, component types, or out-of-range index values fail the
    // batch before any buffer is touched.
    let mut inputs: Vec<(EdgeSet, Vec<u32>)> = Vec::with_capacity(work.len());
    for item in &work {
        let edge_set = EdgeSet::from_indices(&read_indices(doc, item.edges, 2)?);
        let triangle_indices = read_indices(doc, item.indices, 3)?;
        let vertex_count = scopes[item.scope].original_vertex_count();
        if let Some(&index) = triangle_indices.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(OutlineError::IndexOutOfRange {
                accessor: item.indices,
                index,
                vertex_count,
            });
        }
        inputs.push((edge_set, triangle_indices));
    }

    for (item, (edge_set, triangle_indices)) in work.iter().zip(&mut inputs) {
        let scope = &mut scopes[item.scope];

        let before = scope.duplicate_count();
        assign_primitive(scope, edge_set, triangle_indices);
        let duplicated = scope.duplicate_count() - before;
        summary.vertices_duplicated += duplicated;

        debug!(
            mesh = item.mesh,
            primitive = item.primitive,
            edges = edge_set.len(),
            duplicated,
            "assigned outline coordinates"
        );

        write_indices(doc, item, triangle_indices, &mut summary)?;
        summary.primitives_processed += 1;
    }

    summary.scopes_rebuilt = scopes.len();
    for scope in scopes {
        rebuild_scope(doc, scope)?;
    }
    compact_buffers(doc, original_buffer_count);

    info!(
        processed = summary.primitives_processed,
        skipped = summary.primitives_skipped,
        duplicated = summary.vertices_duplicated,
        scopes = summary.scopes_rebuilt,
        "outline pass complete"
    );
    Ok(summary)
}

/// Resolve the vertex numbering scope a primitive's attributes belong
/// to, creating one if its buffer views are unclaimed.
///
/// Returns `Ok(None)` when the primitive must be skipped: no attributes,
/// an attribute without backing storage, attributes that disagree on
/// vertex count, or buffer views already claimed by a different scope.
/// Nothing is registered in the skip cases.
fn queue_primitive(
    doc: &Document,
    scopes: &mut Vec<VertexNumberingScope>,
    scope_by_view: &mut HashMap<usize, usize>,
    mesh: usize,
    primitive_index: usize,
) -> OutlineResult<Option<usize>> {
    let primitive = &doc.meshes[mesh].primitives[primitive_index];
    if primitive.attributes.is_empty() {
        warn!(mesh, primitive = primitive_index, "skipping outline: no attributes");
        return Ok(None);
    }

    // Deterministic registration order regardless of attribute map order.
    let mut attribute_accessors: Vec<usize> = primitive.attributes.values().copied().collect();
    attribute_accessors.sort_unstable();

    let mut vertex_count: Option<usize> = None;
    let mut views: Vec<usize> = Vec::with_capacity(attribute_accessors.len());
    for &accessor_index in &attribute_accessors {
        let accessor = doc.accessor(accessor_index)?;
        let Some(view_index) = accessor.buffer_view else {
            warn!(
                mesh,
                primitive = primitive_index,
                accessor = accessor_index,
                "skipping outline: attribute has no backing buffer view"
            );
            return Ok(None);
        };

        // Accessors sharing a view must index the same zero-based vertex
        // range: tightly packed data starts at the view, interleaved data
        // starts inside the first record.
        let view = doc.buffer_view(view_index)?;
        let shares_range = match view.byte_stride {
            Some(stride) => accessor.byte_offset < stride,
            None => accessor.byte_offset == 0,
        };
        if !shares_range {
            warn!(
                mesh,
                primitive = primitive_index,
                accessor = accessor_index,
                "skipping outline: attribute aliases its buffer view at a different offset"
            );
            return Ok(None);
        }

        match vertex_count {
            None => vertex_count = Some(accessor.count),
            Some(count) if count != accessor.count => {
                warn!(
                    mesh,
                    primitive = primitive_index,
                    "skipping outline: attributes disagree on vertex count"
                );
                return Ok(None);
            }
            Some(_) => {}
        }
        views.push(view_index);
    }
    let Some(vertex_count) = vertex_count else {
        return Ok(None);
    };

    // An accessor elsewhere in the document reading more vertices out of
    // one of these views would lose its tail records when the view is
    // re-laid on this primitive's vertex grid during growth.
    for &view_index in &views {
        for (other_index, other) in doc.accessors.iter().enumerate() {
            if other.buffer_view == Some(view_index) && other.count > vertex_count {
                warn!(
                    mesh,
                    primitive = primitive_index,
                    accessor = other_index,
                    "skipping outline: buffer view is shared by an accessor with more vertices"
                );
                return Ok(None);
            }
        }
    }

    // All views must agree on a scope, or be unclaimed.
    let mut existing: Option<usize> = None;
    for &view_index in &views {
        if let Some(&scope_index) = scope_by_view.get(&view_index) {
            match existing {
                None => existing = Some(scope_index),
                Some(previous) if previous != scope_index => {
                    warn!(
                        mesh,
                        primitive = primitive_index,
                        "skipping outline: attributes reference conflicting vertex numbering scopes"
                    );
                    return Ok(None);
                }
                Some(_) => {}
            }
        }
    }

    let scope_index = match existing {
        Some(scope_index) => {
            if scopes[scope_index].original_vertex_count() != vertex_count {
                warn!(
                    mesh,
                    primitive = primitive_index,
                    "skipping outline: vertex count disagrees with shared numbering scope"
                );
                return Ok(None);
            }
            scope_index
        }
        None => {
            scopes.push(VertexNumberingScope::new(vertex_count));
            scopes.len() - 1
        }
    };

    for &view_index in &views {
        scope_by_view.insert(view_index, scope_index);
        scopes[scope_index].register_buffer_view(view_index);
    }
    for &accessor_index in &attribute_accessors {
        scopes[scope_index].register_accessor(accessor_index);
    }
    scopes[scope_index].register_primitive(mesh, primitive_index);
    Ok(Some(scope_index))
}

/// Read an unsigned 16- or 32-bit scalar index accessor into plain
/// integers, requiring the count to be a multiple of `group`.
fn read_indices(doc: &Document, accessor_index: usize, group: usize) -> OutlineResult<Vec<u32>> {
    let accessor = doc.accessor(accessor_index)?;
    let values: Vec<u32> = match accessor.component_type {
        ComponentType::UnsignedShort => doc
            .accessor_bytes(accessor_index)?
            .chunks_exact(2)
            .map(|c| u32::from(u16::from_le_bytes([c[0], c[1]])))
            .collect(),
        ComponentType::UnsignedInt => doc
            .accessor_bytes(accessor_index)?
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
        other => {
            return Err(OutlineError::UnsupportedIndexType {
                accessor: accessor_index,
                code: other.code(),
            })
        }
    };
    if values.len() % group != 0 {
        return Err(OutlineError::IndexCountNotMultiple {
            accessor: accessor_index,
            count: values.len(),
            group,
        });
    }
    Ok(values)
}

/// Write possibly-rewritten triangle indices back to the primitive's
/// index accessor, widening to a fresh 32-bit accessor when duplication
/// pushed indices past what the existing component type can hold.
fn write_indices(
    doc: &mut Document,
    item: &WorkItem,
    indices: &[u32],
    summary: &mut OutlineSummary,
) -> OutlineResult<()> {
    let component_type = doc.accessor(item.indices)?.component_type;
    let max_index = indices.iter().copied().max().unwrap_or(0);
    let fits = match component_type {
        ComponentType::UnsignedShort => max_index <= u32::from(u16::MAX),
        _ => true,
    };

    if fits {
        let bytes = doc.accessor_bytes_mut(item.indices)?;
        match component_type {
            ComponentType::UnsignedShort => {
                #[allow(clippy::cast_possible_truncation)] // guarded by `fits`
                for (chunk, &value) in bytes.chunks_exact_mut(2).zip(indices) {
                    chunk.copy_from_slice(&(value as u16).to_le_bytes());
                }
            }
            ComponentType::UnsignedInt => {
                for (chunk, &value) in bytes.chunks_exact_mut(4).zip(indices) {
                    chunk.copy_from_slice(&value.to_le_bytes());
                }
            }
            other => {
                return Err(OutlineError::UnsupportedIndexType {
                    accessor: item.indices,
                    code: other.code(),
                })
            }
        }
        return Ok(());
    }

    let mut bytes = Vec::with_capacity(indices.len() * 4);
    for &value in indices {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    let byte_length = bytes.len();
    let buffer = doc.push_buffer(Buffer::from_data(bytes));
    let view = doc.push_buffer_view(BufferView::new(buffer, 0, byte_length));
    let accessor = doc.push_accessor(Accessor::scalar(
        view,
        ComponentType::UnsignedInt,
        indices.len(),
    ));
    doc.meshes[item.mesh].primitives[item.primitive].indices = Some(accessor);
    summary.index_accessors_widened += 1;
    retire_index_accessor(doc, item.indices);

    debug!(
        mesh = item.mesh,
        primitive = item.primitive,
        max_index,
        "widened triangle index accessor to 32-bit"
    );
    Ok(())
}

/// Empty out a superseded index accessor so the compaction pass can
/// reclaim its storage. Left alone while any primitive still reads
/// through it; the view's window is collapsed only if no other accessor
/// shares it.
fn retire_index_accessor(doc: &mut Document, accessor_index: usize) {
    let referenced = doc
        .meshes
        .iter()
        .flat_map(|mesh| &mesh.primitives)
        .any(|primitive| {
            primitive.indices == Some(accessor_index)
                || primitive.outline_edges == Some(accessor_index)
                || primitive.attributes.values().any(|&a| a == accessor_index)
        });
    if referenced {
        return;
    }

    let view_index = doc.accessors[accessor_index].buffer_view;
    doc.accessors[accessor_index].count = 0;
    if let Some(view_index) = view_index {
        let view_shared = doc
            .accessors
            .iter()
            .enumerate()
            .any(|(i, accessor)| i != accessor_index && accessor.buffer_view == Some(view_index));
        if !view_shared {
            doc.buffer_views[view_index].byte_length = 0;
        }
    }
}
