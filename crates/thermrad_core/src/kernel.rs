//! Point-to-point radiative kernel.

use std::f64::consts::PI;

use glam::{DVec2, DVec3};
use thermrad_math::{GeometryResult, Triangle};

/// Differential view factor between two oriented area elements.
///
/// With `s = to_point - from_point` this is
/// `-(n_from . s)(n_to . s) / (pi |s|^4)`. Both normals must be unit
/// vectors. The kernel is singular for coincident points.
#[inline]
pub fn general_diff_view_factor(
    from_point: DVec3,
    from_normal: DVec3,
    to_point: DVec3,
    to_normal: DVec3,
) -> f64 {
    let s = to_point - from_point;
    let s2 = s.length_squared();
    -(from_normal.dot(s) * to_normal.dot(s)) / (PI * s2 * s2)
}

/// The kernel composed with the parametrisations of two triangles.
///
/// Integrating [`TrianglePairKernel::evaluate`] over both unit parametric
/// triangles and passing the result to [`TrianglePairKernel::finish`] gives
/// the view factor from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct TrianglePairKernel<'a> {
    from: &'a Triangle,
    to: &'a Triangle,
}

impl<'a> TrianglePairKernel<'a> {
    pub fn new(from: &'a Triangle, to: &'a Triangle) -> Self {
        Self { from, to }
    }

    /// Kernel at parametric points of each triangle, without domain checks.
    #[inline]
    pub fn evaluate(&self, from_uv: DVec2, to_uv: DVec2) -> f64 {
        general_diff_view_factor(
            self.from.point_at(from_uv),
            self.from.unit_normal(),
            self.to.point_at(to_uv),
            self.to.unit_normal(),
        )
    }

    /// Kernel at parametric points, failing outside either unit triangle.
    pub fn evaluate_checked(
        &self,
        from_xi: f64,
        from_eta: f64,
        to_xi: f64,
        to_eta: f64,
    ) -> GeometryResult<f64> {
        let from_point = self.from.surface_location(from_xi, from_eta)?;
        let to_point = self.to.surface_location(to_xi, to_eta)?;
        Ok(general_diff_view_factor(
            from_point,
            self.from.unit_normal(),
            to_point,
            self.to.unit_normal(),
        ))
    }

    /// Jacobian of both parametrisations, `4 A_from A_to`.
    pub fn scale(&self) -> f64 {
        4.0 * self.from.area() * self.to.area()
    }

    /// Convert the raw parametric integral into a view factor.
    pub fn finish(&self, raw: f64) -> f64 {
        self.scale() * raw / self.from.area()
    }
}
