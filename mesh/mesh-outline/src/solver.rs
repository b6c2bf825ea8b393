//! Per-triangle outline coordinate assignment.
//!
//! Each vertex of a triangle wants a 3-tuple of edge-proximity values
//! derived from which of the triangle's edges are outlined. The three
//! physical slots of a vertex carry no fixed channel identity: any of the
//! six orderings of the tuple is acceptable, as long as every triangle
//! touching the vertex agrees with the values already committed. When a
//! triangle's three vertices admit no common ordering, the most
//! constrained vertex is replaced by a duplicate and the triangle is
//! retried; a fresh duplicate accepts any ordering, so the retry loop
//! always terminates.

use crate::edges::EdgeSet;
use crate::scope::VertexNumberingScope;

/// The six orderings of a desired `(a, b, c)` triple onto the three
/// physical coordinate slots. `PERMUTATIONS[k][slot]` names the desired
/// component stored in that slot.
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Mask with one bit per entry of [`PERMUTATIONS`], all set.
const ALL_PERMUTATIONS: u8 = 0b11_1111;

/// The coordinate triples the three corners of a triangle want, given
/// which of its edges are outlined.
///
/// Component layout: corner 0 wants `(has20, has01, 0)`, corner 1 wants
/// `(0, has01, has12)`, corner 2 wants `(has20, 0, has12)`. Each outlined
/// edge thus has a component reading 1.0 at both endpoints and 0.0 at the
/// opposite corner, which is what the fragment stage looks for.
fn desired_triples(has01: bool, has12: bool, has20: bool) -> [[f32; 3]; 3] {
    let h01 = if has01 { 1.0 } else { 0.0 };
    let h12 = if has12 { 1.0 } else { 0.0 };
    let h20 = if has20 { 1.0 } else { 0.0 };
    [[h20, h01, 0.0], [0.0, h01, h12], [h20, 0.0, h12]]
}

/// Which orderings of `desired` reproduce the vertex's committed slot
/// values exactly. A vertex with no committed values accepts all six.
#[allow(clippy::float_cmp)] // slot values are exact 0.0/1.0 booleans
fn permutation_mask(stored: Option<[f32; 3]>, desired: [f32; 3]) -> u8 {
    let Some(stored) = stored else {
        return ALL_PERMUTATIONS;
    };
    let mut mask = 0u8;
    for (bit, permutation) in PERMUTATIONS.iter().enumerate() {
        if (0..3).all(|slot| stored[slot] == desired[permutation[slot]]) {
            mask |= 1 << bit;
        }
    }
    mask
}

/// Assign coordinates for one triangle, duplicating vertices as needed.
///
/// `triangle` holds three vertex indices and is rewritten in place when a
/// corner is redirected to a duplicate. Edge membership is looked up
/// through each index's original vertex, so already-rewritten triangles
/// resolve to the same edges as on first contact.
fn assign_triangle(scope: &mut VertexNumberingScope, edges: &EdgeSet, triangle: &mut [u32]) {
    let o0 = scope.resolve_original(triangle[0]);
    let o1 = scope.resolve_original(triangle[1]);
    let o2 = scope.resolve_original(triangle[2]);
    let desired = desired_triples(
        edges.is_highlighted(o0, o1),
        edges.is_highlighted(o1, o2),
        edges.is_highlighted(o2, o0),
    );

    loop {
        let masks = [
            permutation_mask(scope.stored(triangle[0]), desired[0]),
            permutation_mask(scope.stored(triangle[1]), desired[1]),
            permutation_mask(scope.stored(triangle[2]), desired[2]),
        ];
        let combined = masks[0] & masks[1] & masks[2];

        if combined != 0 {
            let permutation = PERMUTATIONS[combined.trailing_zeros() as usize];
            for corner in 0..3 {
                if scope.stored(triangle[corner]).is_none() {
                    scope.commit(
                        triangle[corner],
                        [
                            desired[corner][permutation[0]],
                            desired[corner][permutation[1]],
                            desired[corner][permutation[2]],
                        ],
                    );
                }
            }
            return;
        }

        // Most constrained corner: fewest surviving orderings, ties
        // broken toward corner 0.
        let mut constrained = 0;
        for corner in 1..3 {
            if masks[corner].count_ones() < masks[constrained].count_ones() {
                constrained = corner;
            }
        }
        triangle[constrained] = scope.duplicate_vertex(triangle[constrained]);
    }
}

/// Assign coordinates for every triangle of a primitive, in encounter
/// order. Rewrites `indices` in place where duplication redirects a
/// corner, and grows the scope's duplicate bookkeeping.
pub(crate) fn assign_primitive(
    scope: &mut VertexNumberingScope,
    edges: &EdgeSet,
    indices: &mut [u32],
) {
    for triangle in indices.chunks_exact_mut(3) {
        assign_triangle(scope, edges, triangle);
    }
}
