use crate::error::{OperationError, Result};
use crate::geometry::Polyline;
use crate::math::vector_3d::reflect_through;

/// Extends a polyline by one linearly extrapolated point at each end.
///
/// `[p0, p1, ..., pk]` becomes `[2*p0 - p1, p0, p1, ..., pk, 2*pk - p(k-1)]`,
/// giving spline fitting a tangent hint beyond the true endpoints.
#[derive(Debug)]
pub struct ExtendMargins<'a> {
    polyline: &'a Polyline,
}

impl<'a> ExtendMargins<'a> {
    /// Creates a new margin extension.
    #[must_use]
    pub fn new(polyline: &'a Polyline) -> Self {
        Self { polyline }
    }

    /// Executes the extension.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the polyline has fewer
    /// than 2 points, since no direction exists to extrapolate along.
    pub fn execute(&self) -> Result<Polyline> {
        let points = &self.polyline.points;
        let n = points.len();
        if n < 2 {
            return Err(OperationError::InvalidInput(format!(
                "margin extension needs at least 2 points, got {n}"
            ))
            .into());
        }

        let mut extended = Vec::with_capacity(n + 2);
        extended.push(reflect_through(&points[0], &points[1]));
        extended.extend_from_slice(points);
        extended.push(reflect_through(&points[n - 1], &points[n - 2]));
        Ok(Polyline::new(extended))
    }
}

/// Convenience wrapper around [`ExtendMargins`].
///
/// # Errors
///
/// See [`ExtendMargins::execute`].
pub fn extend_margins(polyline: &Polyline) -> Result<Polyline> {
    ExtendMargins::new(polyline).execute()
}
