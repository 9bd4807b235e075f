use super::{Point3, Vector3, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Unit direction from `from` to `to`, or `None` if the points coincide
/// within [`TOLERANCE`].
#[must_use]
pub fn direction(from: &Point3, to: &Point3) -> Option<Vector3> {
    let d = to - from;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(d / len)
}

/// Turning angle in degrees at `current` when travelling
/// `previous -> current -> next`.
///
/// `0` means straight ahead, `180` a full reversal. Returns `None` when
/// either leg has (near) zero length, since no direction is defined there.
#[must_use]
pub fn turn_angle_degrees(previous: &Point3, current: &Point3, next: &Point3) -> Option<f64> {
    let incoming = direction(previous, current)?;
    let outgoing = direction(current, next)?;
    // atan2 stays accurate near 0 and 180 degrees, unlike acos of the dot.
    let angle = incoming.cross(&outgoing).norm().atan2(incoming.dot(&outgoing));
    Some(angle.to_degrees())
}

/// Linear interpolation `a + (b - a) * t`.
#[must_use]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Reflects `neighbor` through `anchor`: `2 * anchor - neighbor`.
#[must_use]
pub fn reflect_through(anchor: &Point3, neighbor: &Point3) -> Point3 {
    anchor + (anchor - neighbor)
}

/// Returns `true` if every coordinate of `p` is finite.
#[must_use]
pub fn is_finite(p: &Point3) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}
