//! Sorted set of triangle edges designated for outlining.

/// A sorted, deduplicated collection of undirected edges.
///
/// Edges are stored as `(min, max)` vertex index pairs, sorted first by
/// `min` then by `max`, so membership is a binary search. Endpoint order
/// in queries does not matter.
///
/// # Example
///
/// ```
/// use mesh_outline::EdgeSet;
///
/// // Pairs are consumed two indices at a time.
/// let edges = EdgeSet::from_indices(&[0, 1, 2, 1]);
/// assert!(edges.is_highlighted(1, 0));
/// assert!(edges.is_highlighted(1, 2));
/// assert!(!edges.is_highlighted(0, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: Vec<(u32, u32)>,
}

/// Normalize an undirected edge to `(min, max)` form.
const fn normalize(i: u32, j: u32) -> (u32, u32) {
    if i <= j {
        (i, j)
    } else {
        (j, i)
    }
}

impl EdgeSet {
    /// Build an edge set from a flat index buffer, consuming indices two
    /// at a time. A trailing unpaired index is ignored.
    #[must_use]
    pub fn from_indices(indices: &[u32]) -> Self {
        let mut edges: Vec<(u32, u32)> = indices
            .chunks_exact(2)
            .map(|pair| normalize(pair[0], pair[1]))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        Self { edges }
    }

    /// Whether the undirected edge `(i, j)` is designated for outlining.
    #[must_use]
    pub fn is_highlighted(&self, i: u32, j: u32) -> bool {
        self.edges.binary_search(&normalize(i, j)).is_ok()
    }

    /// Number of distinct edges in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the set contains no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_highlights_nothing() {
        let edges = EdgeSet::from_indices(&[]);
        assert!(edges.is_empty());
        assert!(!edges.is_highlighted(0, 1));
    }

    #[test]
    fn direction_does_not_matter() {
        let edges = EdgeSet::from_indices(&[5, 2]);
        assert!(edges.is_highlighted(2, 5));
        assert!(edges.is_highlighted(5, 2));
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let edges = EdgeSet::from_indices(&[0, 1, 1, 0, 0, 1]);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn unsorted_input_is_searchable() {
        let edges = EdgeSet::from_indices(&[9, 3, 0, 7, 4, 4, 2, 1]);
        assert!(edges.is_highlighted(3, 9));
        assert!(edges.is_highlighted(7, 0));
        assert!(edges.is_highlighted(4, 4));
        assert!(edges.is_highlighted(1, 2));
        assert!(!edges.is_highlighted(3, 7));
    }

    #[test]
    fn trailing_unpaired_index_ignored() {
        let edges = EdgeSet::from_indices(&[0, 1, 2]);
        assert_eq!(edges.len(), 1);
        assert!(!edges.is_highlighted(2, 0));
    }
}
