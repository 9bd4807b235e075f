use crate::math::vector_3d::distance;
use crate::math::{Point3, TOLERANCE};

/// An ordered sequence of 3D points joined by straight segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Creates a polyline from its ordered vertices.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of segments (`len - 1`, or 0).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Returns the first vertex, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    /// Returns the last vertex, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Euclidean length of each segment, in order.
    #[must_use]
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| distance(&w[0], &w[1]))
            .collect()
    }

    /// Total arc length of the polyline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
    }

    /// Returns `true` if the polyline has at least one segment and its
    /// first and last vertices coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 2 => distance(a, b) < TOLERANCE,
            _ => false,
        }
    }
}

impl From<Vec<Point3>> for Polyline {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn length_of_l_shape() {
        let pl = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
        ]);
        assert_eq!(pl.segment_count(), 2);
        assert_eq!(pl.segment_lengths(), vec![3.0, 4.0]);
        assert!((pl.length() - 7.0).abs() < 1e-12);
        assert!(!pl.is_closed());
    }

    #[test]
    fn empty_and_single_point() {
        let empty = Polyline::default();
        assert!(empty.is_empty());
        assert_eq!(empty.segment_count(), 0);
        assert!(empty.length().abs() < 1e-12);

        let single = Polyline::new(vec![Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(single.segment_count(), 0);
        assert!(single.segment_lengths().is_empty());
        assert!(!single.is_closed());
    }

    #[test]
    fn triangle_loop_is_closed() {
        let pl = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        assert!(pl.is_closed());
        assert_eq!(pl.first().unwrap(), pl.last().unwrap());
    }
}
