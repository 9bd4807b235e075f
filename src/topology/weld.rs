use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::math::Point3;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// Result of welding near-duplicate vertices.
#[derive(Debug, Clone)]
pub struct Welded {
    /// Positions of the surviving vertices, indexed by welded index.
    pub positions: Vec<Point3>,
    /// Maps each original vertex index to its welded index.
    pub remap: Vec<usize>,
}

impl Welded {
    /// Number of original vertices that were merged away.
    #[must_use]
    pub fn merged_count(&self) -> usize {
        self.remap.len() - self.positions.len()
    }
}

/// Merges every pair of vertices within `threshold` of each other.
///
/// Merging is transitive: a chain of vertices each within `threshold` of the
/// next collapses into one cluster, so surviving positions are pairwise
/// farther apart than `threshold`. Each cluster keeps the position of its
/// lowest original index, and welded indices follow the order in which
/// clusters first appear.
#[must_use]
pub fn weld_vertices(vertices: &[Point3], threshold: f64) -> Welded {
    let tree = RTree::bulk_load(
        vertices
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint::new([p.x, p.y, p.z], i))
            .collect(),
    );

    let mut clusters = DisjointSet::new(vertices.len());
    let radius_sq = threshold * threshold;
    for (i, p) in vertices.iter().enumerate() {
        for hit in tree.locate_within_distance([p.x, p.y, p.z], radius_sq) {
            if hit.data > i {
                clusters.union(i, hit.data);
            }
        }
    }

    let mut positions = Vec::new();
    let mut remap = vec![0; vertices.len()];
    for i in 0..vertices.len() {
        let root = clusters.find(i);
        if root == i {
            remap[i] = positions.len();
            positions.push(vertices[i]);
        } else {
            // Roots are the lowest index of their cluster, so already mapped.
            remap[i] = remap[root];
        }
    }

    Welded { positions, remap }
}

/// Union-find whose root is always the lowest index of its set.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_vertices_are_kept() {
        let verts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let welded = weld_vertices(&verts, 0.1);
        assert_eq!(welded.positions, verts);
        assert_eq!(welded.remap, vec![0, 1, 2]);
        assert_eq!(welded.merged_count(), 0);
    }

    #[test]
    fn near_duplicates_collapse_to_lowest_index() {
        let verts = vec![
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.05, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.02),
        ];
        let welded = weld_vertices(&verts, 0.1);
        assert_eq!(welded.positions.len(), 2);
        assert_eq!(welded.remap, vec![0, 1, 0, 1]);
        assert_eq!(welded.positions[0], Point3::new(5.0, 0.0, 0.0));
        assert_eq!(welded.positions[1], Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn chains_within_threshold_merge_transitively() {
        let verts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.08, 0.0, 0.0),
            Point3::new(0.16, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let welded = weld_vertices(&verts, 0.1);
        assert_eq!(welded.remap, vec![0, 0, 0, 1]);
        assert_eq!(welded.merged_count(), 2);
    }

    #[test]
    fn zero_threshold_merges_exact_duplicates_only() {
        let verts = vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(1.0, 2.0, 3.000_001),
        ];
        let welded = weld_vertices(&verts, 0.0);
        assert_eq!(welded.remap, vec![0, 0, 1]);
    }

    #[test]
    fn empty_input() {
        let welded = weld_vertices(&[], 0.1);
        assert!(welded.positions.is_empty());
        assert!(welded.remap.is_empty());
    }
}
