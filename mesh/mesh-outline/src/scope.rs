//! Shared vertex numbering state for primitives that index common buffers.

use hashbrown::HashMap;

/// Location of a primitive within the document's mesh table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PrimitiveRef {
    /// Index of the mesh.
    pub mesh: usize,
    /// Index of the primitive within the mesh.
    pub primitive: usize,
}

/// Whether the scope's outline coordinate accessor has been created yet.
///
/// The accessor is built exactly once per scope, no matter how many
/// primitives share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeState {
    /// No outline coordinate accessor exists yet.
    Uncommitted,
    /// The accessor has been created and attached to every primitive.
    Committed,
}

/// One coalesced vertex-index space.
///
/// All accessors and primitives that index into a common buffer region
/// share one scope. The scope records which vertices have been duplicated
/// to resolve coordinate conflicts, the growing per-vertex coordinate
/// slots, and every accessor/primitive that must be resized or rewritten
/// when the vertex count grows.
#[derive(Debug)]
pub(crate) struct VertexNumberingScope {
    /// Vertex count before any duplication.
    vertex_count: usize,

    /// Map from a vertex index to the index of its duplicate. Keyed by
    /// the index that was replaced, which may itself be a duplicate; each
    /// key gets at most one copy.
    vertex_copies: HashMap<u32, u32>,

    /// For each appended vertex, the original vertex it duplicates.
    /// Entries always name an original (index < `vertex_count`), never
    /// another duplicate.
    extra_vertices: Vec<u32>,

    /// Three coordinate slots per vertex, original and duplicated.
    /// All three slots of a vertex are set together or not at all.
    coordinates: Vec<Option<f32>>,

    /// Attribute accessors whose element count grows with the scope.
    pub accessors: Vec<usize>,

    /// Buffer views whose vertex records must be appended to.
    pub buffer_views: Vec<usize>,

    /// Primitives that receive the outline coordinate attribute.
    pub primitives: Vec<PrimitiveRef>,

    /// One-shot guard for outline accessor creation.
    pub state: AttributeState,
}

impl VertexNumberingScope {
    /// Create a scope over `vertex_count` original vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            vertex_copies: HashMap::new(),
            extra_vertices: Vec::new(),
            coordinates: vec![None; vertex_count * 3],
            accessors: Vec::new(),
            buffer_views: Vec::new(),
            primitives: Vec::new(),
            state: AttributeState::Uncommitted,
        }
    }

    /// Vertex count before duplication.
    pub fn original_vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Vertex count including duplicates.
    pub fn total_vertex_count(&self) -> usize {
        self.vertex_count + self.extra_vertices.len()
    }

    /// Number of vertices appended by duplication.
    pub fn duplicate_count(&self) -> usize {
        self.extra_vertices.len()
    }

    /// For each appended vertex, the original vertex it duplicates.
    pub fn extra_vertices(&self) -> &[u32] {
        &self.extra_vertices
    }

    /// Resolve a possibly-duplicated index to the original vertex it
    /// ultimately copies. Identity for indices below the original count.
    pub fn resolve_original(&self, mut vertex: u32) -> u32 {
        while vertex as usize >= self.vertex_count {
            vertex = self.extra_vertices[vertex as usize - self.vertex_count];
        }
        vertex
    }

    /// The committed coordinate triple of a vertex, or `None` if the
    /// vertex is still unassigned.
    pub fn stored(&self, vertex: u32) -> Option<[f32; 3]> {
        let base = vertex as usize * 3;
        let first = self.coordinates[base]?;
        debug_assert!(
            self.coordinates[base + 1].is_some() && self.coordinates[base + 2].is_some(),
            "coordinate slots must be set together"
        );
        Some([
            first,
            self.coordinates[base + 1].unwrap_or(0.0),
            self.coordinates[base + 2].unwrap_or(0.0),
        ])
    }

    /// Commit a coordinate triple to an unassigned vertex. Committed
    /// values are never altered afterward.
    pub fn commit(&mut self, vertex: u32, values: [f32; 3]) {
        let base = vertex as usize * 3;
        debug_assert!(
            self.coordinates[base].is_none(),
            "vertex {vertex} already committed"
        );
        self.coordinates[base] = Some(values[0]);
        self.coordinates[base + 1] = Some(values[1]);
        self.coordinates[base + 2] = Some(values[2]);
    }

    /// The duplicate to use in place of `vertex`.
    ///
    /// Reuses the recorded duplicate if one exists for this exact index;
    /// otherwise appends a fresh unconstrained vertex whose lineage entry
    /// names the true original behind `vertex`.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32, so vertex counts > 4B are unsupported by design
    pub fn duplicate_vertex(&mut self, vertex: u32) -> u32 {
        if let Some(&copy) = self.vertex_copies.get(&vertex) {
            return copy;
        }
        let copy = self.total_vertex_count() as u32;
        let original = self.resolve_original(vertex);
        self.extra_vertices.push(original);
        self.coordinates.extend([None, None, None]);
        self.vertex_copies.insert(vertex, copy);
        copy
    }

    /// Record an accessor whose count must grow with this scope.
    pub fn register_accessor(&mut self, accessor: usize) {
        if !self.accessors.contains(&accessor) {
            self.accessors.push(accessor);
        }
    }

    /// Record a buffer view whose vertex records must be appended to.
    pub fn register_buffer_view(&mut self, view: usize) {
        if !self.buffer_views.contains(&view) {
            self.buffer_views.push(view);
        }
    }

    /// Record a primitive that receives the outline attribute.
    pub fn register_primitive(&mut self, mesh: usize, primitive: usize) {
        let reference = PrimitiveRef { mesh, primitive };
        if !self.primitives.contains(&reference) {
            self.primitives.push(reference);
        }
    }

    /// Flatten the coordinate slots into GPU-uploadable floats, with
    /// unset slots reading as zero.
    pub fn coordinates_f32(&self) -> Vec<f32> {
        self.coordinates
            .iter()
            .map(|slot| slot.unwrap_or(0.0))
            .collect()
    }
}
