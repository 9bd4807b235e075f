use crate::math::vector_3d::turn_angle_degrees;
use crate::topology::{EdgeGraph, EdgeKey};

/// Walks from `start`, arriving from `previous`, claiming one edge per step.
///
/// The walk continues only while `current` has exactly one neighbor other
/// than the one it came from, the edge to it is unclaimed, and the turn
/// there does not exceed `sharp_angle_degrees`. The edge that fails a test
/// stays unclaimed. Returns the visited vertices, `start` first.
pub fn walk(
    graph: &mut EdgeGraph,
    start: usize,
    previous: usize,
    sharp_angle_degrees: f64,
) -> Vec<usize> {
    let mut path = vec![start];
    let mut prev = previous;
    let mut current = start;

    loop {
        let Some(next) = sole_onward_neighbor(graph, current, prev) else {
            break;
        };
        let Some(key) = EdgeKey::new(current, next) else {
            break;
        };
        if !graph.is_unused(key) {
            break;
        }

        // Zero-length legs have no direction; they never force a split.
        if let Some(angle) = turn_angle_degrees(
            graph.position(prev),
            graph.position(current),
            graph.position(next),
        ) {
            if angle > sharp_angle_degrees {
                tracing::trace!(vertex = current, angle, "split at sharp turn");
                break;
            }
        }

        graph.consume(key);
        path.push(next);
        prev = current;
        current = next;
    }

    path
}

/// Returns the only neighbor of `vertex` besides `previous`, or `None` at an
/// endpoint or branch point.
fn sole_onward_neighbor(graph: &EdgeGraph, vertex: usize, previous: usize) -> Option<usize> {
    let mut onward = graph.neighbors(vertex).filter(|&v| v != previous);
    match (onward.next(), onward.next()) {
        (Some(next), None) => Some(next),
        _ => None,
    }
}
