mod walk;

use crate::error::{OperationError, Result};
use crate::geometry::Polyline;
use crate::math::Point3;
use crate::topology::{EdgeGraph, EdgeKey};

use walk::walk;

/// Default turning angle, in degrees, above which a chain is split.
pub const DEFAULT_SHARP_ANGLE_DEGREES: f64 = 90.0;

/// Splits a 1-D vertex/edge graph into disjoint ordered polylines.
///
/// Vertices within `merge_threshold` are welded first. Polylines break at
/// every vertex whose degree is not 2 and at every turn sharper than the
/// sharp-angle threshold. Each welded edge ends up in exactly one polyline;
/// isolated vertices produce none.
#[derive(Debug, Clone)]
pub struct ExtractPolylines<'a> {
    vertices: &'a [Point3],
    edges: &'a [(usize, usize)],
    merge_threshold: f64,
    sharp_angle_degrees: f64,
}

impl<'a> ExtractPolylines<'a> {
    /// Creates a new extraction with the default 90 degree sharp-angle
    /// threshold.
    #[must_use]
    pub fn new(
        vertices: &'a [Point3],
        edges: &'a [(usize, usize)],
        merge_threshold: f64,
    ) -> Self {
        Self {
            vertices,
            edges,
            merge_threshold,
            sharp_angle_degrees: DEFAULT_SHARP_ANGLE_DEGREES,
        }
    }

    /// Sets the turning angle, in degrees, above which chains are split.
    #[must_use]
    pub fn with_sharp_angle(mut self, degrees: f64) -> Self {
        self.sharp_angle_degrees = degrees;
        self
    }

    /// Executes the extraction.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a NaN or negative angle
    /// threshold, and any error from [`EdgeGraph::build`] for malformed
    /// input.
    pub fn execute(&self) -> Result<Vec<Polyline>> {
        if self.sharp_angle_degrees.is_nan() || self.sharp_angle_degrees < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "sharp angle threshold must be non-negative, got {}",
                self.sharp_angle_degrees
            ))
            .into());
        }

        let mut graph = EdgeGraph::build(self.vertices, self.edges, self.merge_threshold)?;
        let paths = trace_paths(&mut graph, self.sharp_angle_degrees);

        let positions = graph.positions();
        let polylines: Vec<Polyline> = paths
            .iter()
            .map(|path| Polyline::new(path.iter().map(|&v| positions[v]).collect()))
            .collect();

        tracing::debug!(
            polylines = polylines.len(),
            closed = polylines.iter().filter(|pl| pl.is_closed()).count(),
            "extracted polylines"
        );

        Ok(polylines)
    }
}

/// Convenience wrapper around [`ExtractPolylines`].
///
/// # Errors
///
/// See [`ExtractPolylines::execute`].
pub fn extract_polylines(
    vertices: &[Point3],
    edges: &[(usize, usize)],
    merge_threshold: f64,
    sharp_angle_degrees: f64,
) -> Result<Vec<Polyline>> {
    ExtractPolylines::new(vertices, edges, merge_threshold)
        .with_sharp_angle(sharp_angle_degrees)
        .execute()
}

/// Claims every edge of `graph` into vertex-index paths.
///
/// Open chains are taken from their degree-1 ends first so they come out
/// whole. Whatever remains (closed loops, chains between branch points,
/// pieces cut off by sharp turns) is grown in both directions from the
/// smallest unclaimed edge.
fn trace_paths(graph: &mut EdgeGraph, sharp_angle_degrees: f64) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();

    for end in graph.endpoints() {
        let Some(neighbor) = graph.neighbors(end).next() else {
            continue;
        };
        let Some(key) = EdgeKey::new(end, neighbor) else {
            continue;
        };
        if graph.consume(key) {
            let mut path = vec![end];
            path.extend(walk(graph, neighbor, end, sharp_angle_degrees));
            paths.push(path);
        }
    }

    while let Some(key) = graph.take_next_unused() {
        let (a, b) = key.endpoints();
        let forward = walk(graph, b, a, sharp_angle_degrees);
        let mut path = walk(graph, a, b, sharp_angle_degrees);
        // Reversed, the backward walk ends at `a`, which `forward` continues from.
        path.reverse();
        path.extend(forward);
        paths.push(path);
    }

    debug_assert_eq!(graph.unused_count(), 0);
    debug_assert_eq!(
        paths.iter().map(|p| p.len() - 1).sum::<usize>(),
        graph.edge_count(),
        "every edge belongs to exactly one path"
    );

    paths
}
