//! Geometry and numerical integration for radiative view factors.
//!
//! [`Triangle`] and the [`quadrature`] and [`adaptive`] modules feed the
//! view factor evaluators. [`Line`] is a standalone utility for plane and
//! line intersections; the view factor pipeline does not use it.

// Re-export glam for convenience
pub use glam::*;

pub mod adaptive;
mod interval;
mod line;
pub mod quadrature;
mod triangle;

pub use adaptive::{AdaptiveIntegrator, Estimate};
pub use interval::Interval;
pub use line::Line;
pub use quadrature::{
    GaussLegendre, Quadrature, QuadratureError, QuadratureResult, SymmetricRule,
    TensorProductRule, TriangleRule,
};
pub use triangle::{GeometryError, GeometryResult, PointLocation, Triangle};

/// Magnitude below which geometric quantities are treated as zero.
pub const NEAR_ZERO: f64 = 1e-14;

/// True if `x` is within [`NEAR_ZERO`] of zero.
#[inline]
pub fn about_zero(x: f64) -> bool {
    x.abs() <= NEAR_ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.cross(b), DVec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_about_zero() {
        assert!(about_zero(0.0));
        assert!(about_zero(-1e-15));
        assert!(!about_zero(1e-13));
    }
}
