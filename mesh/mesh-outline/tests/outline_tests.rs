//! Integration tests for the outline pass.
//!
//! These build small documents by hand and verify the generated
//! coordinate attribute, vertex duplication, index rewriting, and
//! buffer reconstruction end to end.

use mesh_gltf::{Accessor, Buffer, BufferView, ComponentType, Document, Mesh, Primitive};
use mesh_outline::{add_outlines, OutlineError, OUTLINE_COORDINATES_ATTRIBUTE};

// =============================================================================
// Document construction helpers
// =============================================================================

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn u16_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Distinct per-vertex position data so tests can recognize copies.
fn grid_positions(vertex_count: usize) -> Vec<f32> {
    (0..vertex_count)
        .flat_map(|i| {
            let f = i as f32;
            [f, f * 2.0, f * 3.0]
        })
        .collect()
}

/// One mesh with one primitive: vec3 float positions, u16 triangle
/// indices, and a u16 outline edge list, each in its own buffer.
fn single_primitive_doc(vertex_count: usize, indices: &[u16], edges: &[u16]) -> Document {
    let mut doc = Document::new();

    let positions = f32_bytes(&grid_positions(vertex_count));
    let position_len = positions.len();
    let position_buffer = doc.push_buffer(Buffer::from_data(positions));
    let position_view = doc.push_buffer_view(BufferView::new(position_buffer, 0, position_len));
    let position = doc.push_accessor(Accessor::vec3_f32(position_view, vertex_count));

    let index_bytes = u16_bytes(indices);
    let index_len = index_bytes.len();
    let index_buffer = doc.push_buffer(Buffer::from_data(index_bytes));
    let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, index_len));
    let index_accessor = doc.push_accessor(Accessor::scalar(
        index_view,
        ComponentType::UnsignedShort,
        indices.len(),
    ));

    let edge_bytes = u16_bytes(edges);
    let edge_len = edge_bytes.len();
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, edge_len));
    let edge_accessor = doc.push_accessor(Accessor::scalar(
        edge_view,
        ComponentType::UnsignedShort,
        edges.len(),
    ));

    let mut primitive = Primitive::new();
    primitive.attributes.insert("POSITION".to_owned(), position);
    primitive.indices = Some(index_accessor);
    primitive.outline_edges = Some(edge_accessor);
    doc.meshes.push(Mesh {
        primitives: vec![primitive],
    });
    doc
}

// =============================================================================
// Read-back helpers
// =============================================================================

fn read_u32_indices(doc: &Document, accessor_index: usize) -> Vec<u32> {
    let accessor = &doc.accessors[accessor_index];
    let bytes = doc.accessor_bytes(accessor_index).unwrap();
    match accessor.component_type {
        ComponentType::UnsignedShort => bytes
            .chunks_exact(2)
            .map(|c| u32::from(u16::from_le_bytes([c[0], c[1]])))
            .collect(),
        ComponentType::UnsignedInt => bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
        other => panic!("unexpected index type {other:?}"),
    }
}

/// The generated outline coordinates of a primitive, one triple per vertex.
fn outline_coordinates(doc: &Document, mesh: usize, primitive: usize) -> Vec<[f32; 3]> {
    let accessor_index = doc.meshes[mesh].primitives[primitive].attributes
        [OUTLINE_COORDINATES_ATTRIBUTE];
    let bytes = doc.accessor_bytes(accessor_index).unwrap();
    bytes
        .chunks_exact(12)
        .map(|c| {
            [
                f32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                f32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                f32::from_le_bytes([c[8], c[9], c[10], c[11]]),
            ]
        })
        .collect()
}

/// The position record of a vertex, read through its (possibly
/// re-pointed) buffer view.
fn position_record(doc: &Document, mesh: usize, primitive: usize, vertex: u32) -> [u8; 12] {
    let accessor_index = doc.meshes[mesh].primitives[primitive].attributes["POSITION"];
    let accessor = &doc.accessors[accessor_index];
    let view = accessor.buffer_view.unwrap();
    let bytes = doc.view_bytes(view).unwrap();
    let start = vertex as usize * 12;
    bytes[start..start + 12].try_into().unwrap()
}

/// Whether some coordinate channel reads 1.0 at both `a` and `b` and 0.0
/// at the remaining corner - the fragment-stage pattern for "draw the
/// edge between a and b".
fn edge_drawn(coords: &[[f32; 3]], triangle: [u32; 3], a: usize, b: usize) -> bool {
    let c = 3 - a - b;
    (0..3).any(|s| {
        coords[triangle[a] as usize][s] == 1.0
            && coords[triangle[b] as usize][s] == 1.0
            && coords[triangle[c] as usize][s] == 0.0
    })
}

fn assert_views_cover_buffers(doc: &Document) {
    for (buffer_index, buffer) in doc.buffers.iter().enumerate() {
        let total: usize = doc
            .buffer_views
            .iter()
            .filter(|view| view.buffer == buffer_index)
            .map(|view| view.byte_length)
            .sum();
        assert_eq!(
            total,
            buffer.byte_length(),
            "buffer {buffer_index} has slack or overlap after compaction"
        );
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn single_triangle_single_edge() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    let summary = add_outlines(&mut doc).unwrap();

    assert_eq!(summary.primitives_processed, 1);
    assert_eq!(summary.primitives_skipped, 0);
    assert_eq!(summary.vertices_duplicated, 0);
    assert_eq!(summary.scopes_rebuilt, 1);

    let coords = outline_coordinates(&doc, 0, 0);
    assert_eq!(coords.len(), 3);
    assert!(edge_drawn(&coords, [0, 1, 2], 0, 1));
    assert!(!edge_drawn(&coords, [0, 1, 2], 1, 2));
    assert!(!edge_drawn(&coords, [0, 1, 2], 2, 0));

    // Exactly one channel carries the edge: two 1.0 entries total.
    let ones = coords
        .iter()
        .flatten()
        .filter(|&&v| (v - 1.0).abs() < f32::EPSILON)
        .count();
    assert_eq!(ones, 2);

    // Value bounds recorded on the new accessor.
    let accessor_index =
        doc.meshes[0].primitives[0].attributes[OUTLINE_COORDINATES_ATTRIBUTE];
    let accessor = &doc.accessors[accessor_index];
    assert_eq!(accessor.component_type, ComponentType::Float);
    assert_eq!(accessor.min, Some(vec![0.0; 3]));
    assert_eq!(accessor.max, Some(vec![1.0; 3]));
}

#[test]
fn zero_edges_produce_all_zero_coordinates() {
    let mut doc = single_primitive_doc(4, &[0, 1, 2, 1, 3, 2], &[]);
    let summary = add_outlines(&mut doc).unwrap();

    assert_eq!(summary.vertices_duplicated, 0);
    let coords = outline_coordinates(&doc, 0, 0);
    assert_eq!(coords.len(), 4);
    assert!(coords.iter().flatten().all(|&v| v == 0.0));
}

#[test]
fn conflicting_shared_vertex_is_duplicated() {
    // Triangles (0,1,2) and (1,3,2); outlining edges (1,2) and (3,2)
    // pins vertex 2 incompatibly between the two triangles.
    let mut doc = single_primitive_doc(4, &[0, 1, 2, 1, 3, 2], &[1, 2, 3, 2]);
    let summary = add_outlines(&mut doc).unwrap();

    assert_eq!(summary.vertices_duplicated, 1);

    // The losing triangle was rewritten to the duplicate index
    // (original vertex count + 0).
    let index_accessor = doc.meshes[0].primitives[0].indices.unwrap();
    assert_eq!(read_u32_indices(&doc, index_accessor), vec![0, 1, 2, 1, 3, 4]);

    // Attribute data was byte-copied into the new slot.
    assert_eq!(
        position_record(&doc, 0, 0, 4),
        position_record(&doc, 0, 0, 2)
    );

    // The position accessor grew with the scope.
    let position = doc.meshes[0].primitives[0].attributes["POSITION"];
    assert_eq!(doc.accessors[position].count, 5);

    // Both triangles read back their own edge booleans.
    let coords = outline_coordinates(&doc, 0, 0);
    assert_eq!(coords.len(), 5);
    assert!(!edge_drawn(&coords, [0, 1, 2], 0, 1));
    assert!(edge_drawn(&coords, [0, 1, 2], 1, 2));
    assert!(!edge_drawn(&coords, [0, 1, 2], 2, 0));
    assert!(!edge_drawn(&coords, [1, 3, 4], 0, 1));
    assert!(edge_drawn(&coords, [1, 3, 4], 1, 2)); // original (3,2)
    assert!(edge_drawn(&coords, [1, 3, 4], 2, 0)); // original (2,1)
}

#[test]
fn original_vertex_data_survives_duplication() {
    let mut doc = single_primitive_doc(4, &[0, 1, 2, 1, 3, 2], &[1, 2, 3, 2]);
    let original: Vec<[u8; 12]> = (0..4).map(|v| position_record(&doc, 0, 0, v)).collect();

    add_outlines(&mut doc).unwrap();

    for (v, expected) in original.iter().enumerate() {
        assert_eq!(
            &position_record(&doc, 0, 0, v as u32),
            expected,
            "vertex {v} attribute data changed"
        );
    }
}

#[test]
fn buffers_are_exactly_covered_after_compaction() {
    // Positions and indices share one buffer through two views, so
    // re-pointing the position view orphans bytes that compaction must
    // reclaim.
    let mut doc = Document::new();
    let positions = f32_bytes(&grid_positions(4));
    let indices = u16_bytes(&[0, 1, 2, 1, 3, 2]);
    let mut data = positions.clone();
    data.extend_from_slice(&indices);
    let shared = doc.push_buffer(Buffer::from_data(data));

    let position_view = doc.push_buffer_view(BufferView::new(shared, 0, positions.len()));
    let index_view =
        doc.push_buffer_view(BufferView::new(shared, positions.len(), indices.len()));
    let position = doc.push_accessor(Accessor::vec3_f32(position_view, 4));
    let index_accessor =
        doc.push_accessor(Accessor::scalar(index_view, ComponentType::UnsignedShort, 6));

    let edge_bytes = u16_bytes(&[1, 2, 3, 2]);
    let edge_len = edge_bytes.len();
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, edge_len));
    let edge_accessor =
        doc.push_accessor(Accessor::scalar(edge_view, ComponentType::UnsignedShort, 4));

    let mut primitive = Primitive::new();
    primitive.attributes.insert("POSITION".to_owned(), position);
    primitive.indices = Some(index_accessor);
    primitive.outline_edges = Some(edge_accessor);
    doc.meshes.push(Mesh {
        primitives: vec![primitive],
    });

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.vertices_duplicated, 1);

    // The shared buffer kept only the index view's bytes.
    assert_eq!(doc.buffers[shared].byte_length(), 12);
    assert_views_cover_buffers(&doc);

    // Rewritten indices are still readable through the compacted view.
    assert_eq!(read_u32_indices(&doc, index_accessor), vec![0, 1, 2, 1, 3, 4]);
}

#[test]
fn primitives_sharing_buffers_share_one_scope_and_accessor() {
    // Two primitives over the same position accessor: one scope, one
    // outline accessor attached to both.
    let mut doc = single_primitive_doc(4, &[0, 1, 2], &[0, 1]);

    let index_bytes = u16_bytes(&[1, 3, 2]);
    let index_len = index_bytes.len();
    let index_buffer = doc.push_buffer(Buffer::from_data(index_bytes));
    let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, index_len));
    let index_accessor = doc.push_accessor(Accessor::scalar(
        index_view,
        ComponentType::UnsignedShort,
        3,
    ));

    let edge_bytes = u16_bytes(&[1, 3]);
    let edge_len = edge_bytes.len();
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, edge_len));
    let edge_accessor = doc.push_accessor(Accessor::scalar(
        edge_view,
        ComponentType::UnsignedShort,
        2,
    ));

    let mut second = Primitive::new();
    second.attributes.insert(
        "POSITION".to_owned(),
        doc.meshes[0].primitives[0].attributes["POSITION"],
    );
    second.indices = Some(index_accessor);
    second.outline_edges = Some(edge_accessor);
    doc.meshes[0].primitives.push(second);

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.primitives_processed, 2);
    assert_eq!(summary.scopes_rebuilt, 1);

    let first_attr = doc.meshes[0].primitives[0].attributes[OUTLINE_COORDINATES_ATTRIBUTE];
    let second_attr = doc.meshes[0].primitives[1].attributes[OUTLINE_COORDINATES_ATTRIBUTE];
    assert_eq!(first_attr, second_attr);
}

#[test]
fn primitive_without_attributes_is_skipped() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    doc.meshes[0].primitives[0].attributes.clear();

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.primitives_processed, 0);
    assert_eq!(summary.primitives_skipped, 1);
    assert!(!doc.meshes[0].primitives[0]
        .attributes
        .contains_key(OUTLINE_COORDINATES_ATTRIBUTE));
}

#[test]
fn primitive_without_indices_is_skipped() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    doc.meshes[0].primitives[0].indices = None;

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.primitives_processed, 0);
    assert_eq!(summary.primitives_skipped, 1);
}

#[test]
fn conflicting_numbering_scopes_drop_the_primitive() {
    // Primitives A and B claim separate buffer views; primitive C
    // references both views at once, so its scope membership is
    // ambiguous and it is silently dropped.
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);

    // Second, independent vertex range.
    let positions = f32_bytes(&grid_positions(3));
    let position_len = positions.len();
    let buffer = doc.push_buffer(Buffer::from_data(positions));
    let view = doc.push_buffer_view(BufferView::new(buffer, 0, position_len));
    let other_position = doc.push_accessor(Accessor::vec3_f32(view, 3));

    let index_bytes = u16_bytes(&[0, 1, 2]);
    let index_buffer = doc.push_buffer(Buffer::from_data(index_bytes));
    let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, 6));
    let other_indices =
        doc.push_accessor(Accessor::scalar(index_view, ComponentType::UnsignedShort, 3));

    let edge_bytes = u16_bytes(&[0, 1]);
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, 4));
    let other_edges =
        doc.push_accessor(Accessor::scalar(edge_view, ComponentType::UnsignedShort, 2));

    let mut second = Primitive::new();
    second
        .attributes
        .insert("POSITION".to_owned(), other_position);
    second.indices = Some(other_indices);
    second.outline_edges = Some(other_edges);
    doc.meshes[0].primitives.push(second);

    let mut third = Primitive::new();
    third.attributes.insert(
        "POSITION".to_owned(),
        doc.meshes[0].primitives[0].attributes["POSITION"],
    );
    third.attributes.insert("NORMAL".to_owned(), other_position);
    third.indices = Some(other_indices);
    third.outline_edges = Some(other_edges);
    doc.meshes[0].primitives.push(third);

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.primitives_processed, 2);
    assert_eq!(summary.primitives_skipped, 1);
    assert!(!doc.meshes[0].primitives[2]
        .attributes
        .contains_key(OUTLINE_COORDINATES_ATTRIBUTE));
}

#[test]
fn sixteen_bit_indices_widen_when_duplicates_overflow() {
    // 65536 vertices exhaust the u16 index range exactly, so the first
    // duplicate lands at index 65536 and forces a 32-bit index accessor.
    let vertex_count = 65536;
    let mut doc = Document::new();

    let attribute_bytes = f32_bytes(&(0..vertex_count).map(|i| i as f32).collect::<Vec<_>>());
    let attribute_len = attribute_bytes.len();
    let buffer = doc.push_buffer(Buffer::from_data(attribute_bytes));
    let view = doc.push_buffer_view(BufferView::new(buffer, 0, attribute_len));
    let weight = doc.push_accessor(Accessor::scalar(view, ComponentType::Float, vertex_count));

    let index_bytes = u16_bytes(&[0, 1, 2, 1, 3, 2]);
    let index_buffer = doc.push_buffer(Buffer::from_data(index_bytes));
    let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, 12));
    let old_index_accessor =
        doc.push_accessor(Accessor::scalar(index_view, ComponentType::UnsignedShort, 6));

    let edge_bytes = u16_bytes(&[1, 2, 3, 2]);
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, 8));
    let edge_accessor =
        doc.push_accessor(Accessor::scalar(edge_view, ComponentType::UnsignedShort, 4));

    let mut primitive = Primitive::new();
    primitive.attributes.insert("_WEIGHT".to_owned(), weight);
    primitive.indices = Some(old_index_accessor);
    primitive.outline_edges = Some(edge_accessor);
    doc.meshes.push(Mesh {
        primitives: vec![primitive],
    });

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.vertices_duplicated, 1);
    assert_eq!(summary.index_accessors_widened, 1);

    let new_index_accessor = doc.meshes[0].primitives[0].indices.unwrap();
    assert_ne!(new_index_accessor, old_index_accessor);
    assert_eq!(
        doc.accessors[new_index_accessor].component_type,
        ComponentType::UnsignedInt
    );
    assert_eq!(
        read_u32_indices(&doc, new_index_accessor),
        vec![0, 1, 2, 1, 3, 65536]
    );

    // The superseded 16-bit accessor is retired and its storage
    // reclaimed by compaction.
    assert_eq!(doc.accessors[old_index_accessor].count, 0);
    assert_eq!(doc.buffers[index_buffer].byte_length(), 0);
    assert_views_cover_buffers(&doc);
}

#[test]
fn second_pass_on_conflict_free_document_adds_no_vertices() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    let first = add_outlines(&mut doc).unwrap();
    assert_eq!(first.vertices_duplicated, 0);

    // The existing coordinate attribute is just another per-vertex
    // attribute to a second run; it is replaced, not duplicated into.
    let second = add_outlines(&mut doc).unwrap();
    assert_eq!(second.primitives_processed, 1);
    assert_eq!(second.vertices_duplicated, 0);

    let position = doc.meshes[0].primitives[0].attributes["POSITION"];
    assert_eq!(doc.accessors[position].count, 3);
    let coords = outline_coordinates(&doc, 0, 0);
    assert!(edge_drawn(&coords, [0, 1, 2], 0, 1));
    assert!(!edge_drawn(&coords, [0, 1, 2], 1, 2));
}

#[test]
fn out_of_range_triangle_index_fails_before_mutation() {
    // The second primitive's indices reference vertex 9 of a 4-vertex
    // range. Structural validation cannot see index values, but the pass
    // must still fail whole, before the first (solvable) primitive's
    // buffers are touched.
    let mut doc = single_primitive_doc(4, &[0, 1, 2, 1, 3, 2], &[1, 2, 3, 2]);

    let index_bytes = u16_bytes(&[1, 9, 2]);
    let index_buffer = doc.push_buffer(Buffer::from_data(index_bytes));
    let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, 6));
    let bad_indices =
        doc.push_accessor(Accessor::scalar(index_view, ComponentType::UnsignedShort, 3));

    let edge_bytes = u16_bytes(&[1, 2]);
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, 4));
    let edges = doc.push_accessor(Accessor::scalar(edge_view, ComponentType::UnsignedShort, 2));

    let mut second = Primitive::new();
    second.attributes.insert(
        "POSITION".to_owned(),
        doc.meshes[0].primitives[0].attributes["POSITION"],
    );
    second.indices = Some(bad_indices);
    second.outline_edges = Some(edges);
    doc.meshes[0].primitives.push(second);

    let result = add_outlines(&mut doc);
    assert!(matches!(
        result,
        Err(OutlineError::IndexOutOfRange {
            index: 9,
            vertex_count: 4,
            ..
        })
    ));

    // The first primitive had a conflict to resolve, but nothing was
    // rewritten, duplicated, or attached.
    assert_eq!(doc.buffers[1].data, u16_bytes(&[0, 1, 2, 1, 3, 2]));
    let position = doc.meshes[0].primitives[0].attributes["POSITION"];
    assert_eq!(doc.accessors[position].count, 4);
    assert!(!doc.meshes[0].primitives[0]
        .attributes
        .contains_key(OUTLINE_COORDINATES_ATTRIBUTE));
}

#[test]
fn wider_accessor_over_shared_view_keeps_its_tail() {
    // One view holds 6 position records. The outlined primitive reads
    // the first 4, a plain primitive reads all 6. Growing the view on
    // the outlined primitive's 4-vertex grid would orphan records 4 and
    // 5, so the primitive is skipped instead.
    let mut doc = Document::new();

    let positions = f32_bytes(&grid_positions(6));
    let position_len = positions.len();
    let buffer = doc.push_buffer(Buffer::from_data(positions));
    let view = doc.push_buffer_view(BufferView::new(buffer, 0, position_len));
    let narrow = doc.push_accessor(Accessor::vec3_f32(view, 4));
    let wide = doc.push_accessor(Accessor::vec3_f32(view, 6));

    let index_bytes = u16_bytes(&[0, 1, 2, 1, 3, 2]);
    let index_buffer = doc.push_buffer(Buffer::from_data(index_bytes));
    let index_view = doc.push_buffer_view(BufferView::new(index_buffer, 0, 12));
    let indices =
        doc.push_accessor(Accessor::scalar(index_view, ComponentType::UnsignedShort, 6));

    let edge_bytes = u16_bytes(&[1, 2, 3, 2]);
    let edge_buffer = doc.push_buffer(Buffer::from_data(edge_bytes));
    let edge_view = doc.push_buffer_view(BufferView::new(edge_buffer, 0, 8));
    let edges = doc.push_accessor(Accessor::scalar(edge_view, ComponentType::UnsignedShort, 4));

    let mut outlined = Primitive::new();
    outlined.attributes.insert("POSITION".to_owned(), narrow);
    outlined.indices = Some(indices);
    outlined.outline_edges = Some(edges);

    let mut plain = Primitive::new();
    plain.attributes.insert("POSITION".to_owned(), wide);
    doc.meshes.push(Mesh {
        primitives: vec![outlined, plain],
    });

    let expected_tail: Vec<u8> = doc.view_bytes(view).unwrap()[5 * 12..6 * 12].to_vec();
    let summary = add_outlines(&mut doc).unwrap();

    assert_eq!(summary.primitives_processed, 0);
    assert_eq!(summary.primitives_skipped, 1);
    assert_eq!(summary.vertices_duplicated, 0);

    assert!(doc.validate().is_ok());
    let bytes = doc.view_bytes(view).unwrap();
    assert_eq!(bytes.len(), 6 * 12);
    assert_eq!(&bytes[5 * 12..6 * 12], expected_tail.as_slice());
    assert_eq!(doc.accessors[wide].count, 6);
    assert!(!doc.meshes[0].primitives[0]
        .attributes
        .contains_key(OUTLINE_COORDINATES_ATTRIBUTE));
}

#[test]
fn malformed_document_fails_the_batch() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    // Truncate the position buffer out from under its view.
    doc.buffers[0].data.truncate(10);

    let result = add_outlines(&mut doc);
    assert!(matches!(result, Err(OutlineError::MalformedDocument(_))));
}

#[test]
fn float_index_accessor_is_rejected() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    let index_accessor = doc.meshes[0].primitives[0].indices.unwrap();
    doc.accessors[index_accessor].component_type = ComponentType::Float;
    // Keep the document structurally valid so the pass reaches the
    // component-type check.
    let view = doc.accessors[index_accessor].buffer_view.unwrap();
    doc.buffers[doc.buffer_views[view].buffer].data.resize(12, 0);
    doc.buffer_views[view].byte_length = 12;

    let result = add_outlines(&mut doc);
    assert!(matches!(
        result,
        Err(OutlineError::UnsupportedIndexType { code: 5126, .. })
    ));
}

#[test]
fn odd_edge_list_is_rejected() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    let edge_accessor = doc.meshes[0].primitives[0].outline_edges.unwrap();
    doc.accessors[edge_accessor].count = 1;

    let result = add_outlines(&mut doc);
    assert!(matches!(
        result,
        Err(OutlineError::IndexCountNotMultiple { group: 2, .. })
    ));
}

#[test]
fn document_without_outline_lists_is_untouched() {
    let mut doc = single_primitive_doc(3, &[0, 1, 2], &[0, 1]);
    doc.meshes[0].primitives[0].outline_edges = None;
    let before_buffers = doc.buffers.len();
    let before_accessors = doc.accessors.len();

    let summary = add_outlines(&mut doc).unwrap();
    assert_eq!(summary.primitives_processed, 0);
    assert_eq!(summary.primitives_skipped, 0);
    assert_eq!(doc.buffers.len(), before_buffers);
    assert_eq!(doc.accessors.len(), before_accessors);
}
