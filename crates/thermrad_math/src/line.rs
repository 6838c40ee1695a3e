use crate::{about_zero, DVec3, GeometryError, GeometryResult, Triangle};

/// A parametric line `origin + t * direction` in 3D space.
///
/// Stands alone; the view factor evaluators do not use it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Line {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// The line through two points, with `at(0) == from` and `at(1) == to`.
    pub fn through(from: DVec3, to: DVec3) -> Self {
        Self::new(from, to - from)
    }

    /// Get the point along the line at parameter t.
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Parameter at which the line crosses the triangle's plane.
    ///
    /// Fails when the line runs parallel to the plane.
    pub fn distance_to_plane(&self, plane: &Triangle) -> GeometryResult<f64> {
        let normal = plane.unit_normal();
        let denom = normal.dot(self.direction);
        if about_zero(denom) {
            return Err(GeometryError::DegenerateIntersection(
                "line is parallel to the plane",
            ));
        }
        Ok(normal.dot(plane.a() - self.origin) / denom)
    }

    /// Parameter and point where the line crosses the triangle's plane.
    pub fn intersect_plane(&self, plane: &Triangle) -> GeometryResult<(f64, DVec3)> {
        let t = self.distance_to_plane(plane)?;
        Ok((t, self.at(t)))
    }

    /// Intersection point of two coplanar, non-parallel lines.
    ///
    /// Skew lines are not detected; the result is then the point on `self`
    /// closest to `other`.
    pub fn intersect_line(&self, other: &Line) -> GeometryResult<DVec3> {
        let cross = self.direction.cross(other.direction);
        let denom = cross.length_squared();
        if about_zero(denom) {
            return Err(GeometryError::DegenerateIntersection("lines are parallel"));
        }
        let t = (other.origin - self.origin).cross(other.direction).dot(cross) / denom;
        Ok(self.at(t))
    }
}
