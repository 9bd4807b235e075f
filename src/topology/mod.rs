pub mod weld;

pub use weld::{weld_vertices, Welded};

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GeometryError, OperationError, Result, TopologyError};
use crate::math::vector_3d::is_finite;
use crate::math::Point3;

/// An undirected edge stored as an ordered index pair `(lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: usize,
    hi: usize,
}

impl EdgeKey {
    /// Creates the key for the edge between `a` and `b`, or `None` for a
    /// self-edge.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Returns the endpoints as `(lo, hi)`.
    #[must_use]
    pub fn endpoints(self) -> (usize, usize) {
        (self.lo, self.hi)
    }
}

/// Counters describing how raw input edges mapped onto the welded graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub input_vertices: usize,
    pub input_edges: usize,
    pub merged_vertices: usize,
    pub self_edges_dropped: usize,
    pub duplicate_edges: usize,
}

/// A welded 1-D edge graph whose edges are consumed as walks claim them.
///
/// Adjacency never changes after construction; only the unused-edge set
/// shrinks. The graph lives for a single extraction call.
#[derive(Debug, Clone)]
pub struct EdgeGraph {
    positions: Vec<Point3>,
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
    unused: BTreeSet<EdgeKey>,
    stats: GraphStats,
}

impl EdgeGraph {
    /// Welds `vertices` within `merge_threshold` and builds the graph from
    /// `edges`, dropping self-edges and collapsing duplicates.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a negative or non-finite
    /// threshold, `GeometryError::NonFinite` for a vertex with a NaN or
    /// infinite coordinate, and `TopologyError::VertexOutOfRange` for an
    /// edge referencing a vertex that does not exist.
    pub fn build(
        vertices: &[Point3],
        edges: &[(usize, usize)],
        merge_threshold: f64,
    ) -> Result<Self> {
        if !merge_threshold.is_finite() || merge_threshold < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "merge threshold must be finite and non-negative, got {merge_threshold}"
            ))
            .into());
        }
        if let Some(index) = vertices.iter().position(|p| !is_finite(p)) {
            return Err(GeometryError::NonFinite { index }.into());
        }
        for (edge, &(a, b)) in edges.iter().enumerate() {
            for index in [a, b] {
                if index >= vertices.len() {
                    return Err(TopologyError::VertexOutOfRange {
                        edge,
                        index,
                        vertex_count: vertices.len(),
                    }
                    .into());
                }
            }
        }

        let welded = weld_vertices(vertices, merge_threshold);
        let mut stats = GraphStats {
            input_vertices: vertices.len(),
            input_edges: edges.len(),
            merged_vertices: welded.merged_count(),
            ..GraphStats::default()
        };

        let mut adjacency: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        let mut unused = BTreeSet::new();
        for &(a, b) in edges {
            let (wa, wb) = (welded.remap[a], welded.remap[b]);
            let Some(key) = EdgeKey::new(wa, wb) else {
                stats.self_edges_dropped += 1;
                continue;
            };
            if !unused.insert(key) {
                stats.duplicate_edges += 1;
                continue;
            }
            adjacency.entry(wa).or_default().insert(wb);
            adjacency.entry(wb).or_default().insert(wa);
        }

        tracing::debug!(
            vertices = stats.input_vertices,
            welded_vertices = welded.positions.len(),
            edges = unused.len(),
            self_edges_dropped = stats.self_edges_dropped,
            duplicate_edges = stats.duplicate_edges,
            "built edge graph"
        );

        Ok(Self {
            positions: welded.positions,
            adjacency,
            unused,
            stats,
        })
    }

    /// Position of a welded vertex.
    #[must_use]
    pub fn position(&self, vertex: usize) -> &Point3 {
        &self.positions[vertex]
    }

    /// Positions of all welded vertices.
    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Neighbors of `vertex` in ascending order.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of distinct edges incident to `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency.get(&vertex).map_or(0, BTreeSet::len)
    }

    /// Vertices of degree 1, in ascending order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<usize> {
        self.adjacency
            .keys()
            .copied()
            .filter(|&v| self.degree(v) == 1)
            .collect()
    }

    /// Total number of distinct edges after welding.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Number of edges not yet claimed by a walk.
    #[must_use]
    pub fn unused_count(&self) -> usize {
        self.unused.len()
    }

    /// Returns `true` if `key` has not been claimed yet.
    #[must_use]
    pub fn is_unused(&self, key: EdgeKey) -> bool {
        self.unused.contains(&key)
    }

    /// Claims `key`, returning `false` if it was already claimed.
    pub fn consume(&mut self, key: EdgeKey) -> bool {
        self.unused.remove(&key)
    }

    /// Claims and returns the smallest unclaimed edge.
    pub fn take_next_unused(&mut self) -> Option<EdgeKey> {
        self.unused.pop_first()
    }

    /// Construction counters.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        self.stats
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RailError;

    fn line_points(n: u32) -> Vec<Point3> {
        (0..n).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect()
    }

    #[test]
    fn edge_key_is_unordered() {
        assert_eq!(EdgeKey::new(3, 1), EdgeKey::new(1, 3));
        assert_eq!(EdgeKey::new(3, 1).unwrap().endpoints(), (1, 3));
        assert!(EdgeKey::new(2, 2).is_none());
    }

    #[test]
    fn chain_degrees() {
        let graph = EdgeGraph::build(&line_points(4), &[(0, 1), (1, 2), (2, 3)], 0.1).unwrap();
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.endpoints(), vec![0, 3]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.unused_count(), 3);
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn welding_drops_self_edges_and_duplicates() {
        let verts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.01, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.01, 0.0),
        ];
        // 0-1 collapses to a self-edge; 0-2 and 1-3 become the same edge.
        let graph = EdgeGraph::build(&verts, &[(0, 1), (0, 2), (1, 3), (2, 0)], 0.1).unwrap();
        let stats = graph.stats();
        assert_eq!(stats.merged_vertices, 2);
        assert_eq!(stats.self_edges_dropped, 1);
        assert_eq!(stats.duplicate_edges, 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.positions().len(), 2);
    }

    #[test]
    fn isolated_vertex_has_degree_zero() {
        let graph = EdgeGraph::build(&line_points(3), &[(0, 1)], 0.1).unwrap();
        assert_eq!(graph.degree(2), 0);
        assert_eq!(graph.neighbors(2).count(), 0);
    }

    #[test]
    fn consume_claims_each_edge_once() {
        let mut graph = EdgeGraph::build(&line_points(3), &[(0, 1), (1, 2)], 0.1).unwrap();
        let key = EdgeKey::new(1, 0).unwrap();
        assert!(graph.is_unused(key));
        assert!(graph.consume(key));
        assert!(!graph.consume(key));
        assert_eq!(graph.take_next_unused(), EdgeKey::new(1, 2));
        assert!(graph.take_next_unused().is_none());
        // Adjacency survives consumption.
        assert_eq!(graph.degree(1), 2);
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let err = EdgeGraph::build(&line_points(2), &[(0, 1), (1, 5)], 0.1).unwrap_err();
        assert!(matches!(
            err,
            RailError::Topology(TopologyError::VertexOutOfRange {
                edge: 1,
                index: 5,
                vertex_count: 2
            })
        ));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let verts = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(f64::NAN, 0.0, 0.0)];
        let err = EdgeGraph::build(&verts, &[(0, 1)], 0.1).unwrap_err();
        assert!(matches!(
            err,
            RailError::Geometry(GeometryError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = EdgeGraph::build(&line_points(2), &[(0, 1)], -1.0).unwrap_err();
        assert!(matches!(err, RailError::Operation(OperationError::InvalidInput(_))));
    }
}
