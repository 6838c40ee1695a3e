//! View factors between pairs of triangles.
//!
//! Two interchangeable strategies evaluate the same 4D integral:
//!
//! - [`AdaptiveViewFactor`]: nested adaptive Gauss–Kronrod integration
//! - [`FixedViewFactor`]: a fixed triangle rule applied to both triangles
//!
//! Both assume non-degenerate triangles that neither touch nor overlap.

use std::fmt;
use std::sync::Arc;

use thermrad_math::{
    AdaptiveIntegrator, GeometryError, Quadrature, QuadratureError, Triangle, TriangleRule,
};
use thiserror::Error;

use crate::kernel::TrianglePairKernel;

/// Errors that can occur while computing a view factor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewFactorError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Quadrature error: {0}")]
    Quadrature(#[from] QuadratureError),

    #[error("View factor is not finite ({0}); triangles may touch or overlap")]
    NonFinite(f64),

    #[error("Invalid dimension {name} = {value}: must be positive")]
    InvalidDimension { name: &'static str, value: f64 },
}

/// Result type for view factor computations.
pub type ViewFactorResult<T> = Result<T, ViewFactorError>;

/// A strategy for computing the view factor from one triangle to another.
pub trait ViewFactorMethod: fmt::Debug {
    /// Fraction of diffuse radiation leaving `from` that arrives at `to`.
    fn view_factor(&self, from: &Triangle, to: &Triangle) -> ViewFactorResult<f64>;
}

fn finite(value: f64) -> ViewFactorResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ViewFactorError::NonFinite(value))
    }
}

/// Nested adaptive integration over both parametric triangles.
///
/// The absolute tolerance applies to the view factor itself; it is divided
/// by `4 A_from A_to` before integrating in parametric space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdaptiveViewFactor {
    pub integrator: AdaptiveIntegrator,
}

impl AdaptiveViewFactor {
    pub fn new(abs_tol: f64, rel_tol: f64, max_subdivisions: usize) -> Self {
        Self {
            integrator: AdaptiveIntegrator::new(abs_tol, rel_tol, max_subdivisions),
        }
    }
}

impl ViewFactorMethod for AdaptiveViewFactor {
    fn view_factor(&self, from: &Triangle, to: &Triangle) -> ViewFactorResult<f64> {
        let kernel = TrianglePairKernel::new(from, to);
        let integrator = self
            .integrator
            .with_abs_tol(self.integrator.abs_tol / kernel.scale());

        let raw = integrator.integrate(0.0, 1.0, |to_eta| {
            integrator
                .integrate(0.0, 1.0 - to_eta, |to_xi| {
                    integrator
                        .integrate(0.0, 1.0, |from_eta| {
                            integrator
                                .integrate(0.0, 1.0 - from_eta, |from_xi| {
                                    Ok::<_, ViewFactorError>(kernel.evaluate_checked(
                                        from_xi, from_eta, to_xi, to_eta,
                                    )?)
                                })
                                .map(|e| e.value)
                        })
                        .map(|e| e.value)
                })
                .map(|e| e.value)
        })?;

        log::debug!(
            "adaptive view factor: raw {:e} +/- {:e} over {} segments",
            raw.value,
            raw.error,
            raw.segments
        );

        finite(kernel.finish(raw.value))
    }
}

/// A fixed triangle rule applied to both the source and the target.
///
/// The rule is shared, so one rule can serve many evaluators.
#[derive(Debug, Clone)]
pub struct FixedViewFactor<R> {
    rule: Arc<R>,
}

impl<R: TriangleRule> FixedViewFactor<R> {
    pub fn new(rule: R) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    pub fn from_shared(rule: Arc<R>) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }
}

impl<R: TriangleRule + fmt::Debug> ViewFactorMethod for FixedViewFactor<R> {
    fn view_factor(&self, from: &Triangle, to: &Triangle) -> ViewFactorResult<f64> {
        let kernel = TrianglePairKernel::new(from, to);
        let rule = self.rule.as_ref();

        // Outer sum over the target, inner over the source
        let raw = rule.compute(|to_uv| rule.compute(|from_uv| kernel.evaluate(from_uv, to_uv)));

        finite(kernel.finish(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::two_coaxial_parallel_plates;
    use thermrad_math::{SymmetricRule, TensorProductRule};

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::from_coords(a, b, c).unwrap()
    }

    /// Unit right triangle in z = 0 facing +z.
    fn base() -> Triangle {
        tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    /// The same triangle lifted to z = 1, facing -z.
    fn opposed() -> Triangle {
        tri([0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0])
    }

    /// Unit squares at z = 0 (facing +z) and z = 1 (facing -z), two triangles each.
    fn coaxial_squares() -> (Vec<Triangle>, Vec<Triangle>) {
        let lower = vec![
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
            tri([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let upper = vec![
            tri([0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]),
            tri([0.0, 0.0, 1.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]),
        ];
        (lower, upper)
    }

    /// View factor between the two squares, assembled from triangle pairs.
    fn square_view_factor(method: &dyn ViewFactorMethod) -> f64 {
        let (lower, upper) = coaxial_squares();
        let area: f64 = lower.iter().map(|t| t.area()).sum();
        let mut total = 0.0;
        for from in &lower {
            for to in &upper {
                total += from.area() * method.view_factor(from, to).unwrap();
            }
        }
        total / area
    }

    #[test]
    fn test_tensor_matches_coaxial_squares() {
        let exact = two_coaxial_parallel_plates(1.0, 1.0, 1.0).unwrap();
        let method = FixedViewFactor::new(TensorProductRule::square(10).unwrap());
        let approx = square_view_factor(&method);
        assert!((approx - exact).abs() < 1e-12, "{} != {}", approx, exact);
    }

    #[test]
    fn test_symmetric_matches_coaxial_squares() {
        let exact = two_coaxial_parallel_plates(1.0, 1.0, 1.0).unwrap();
        let method = FixedViewFactor::new(SymmetricRule::new(13).unwrap());
        let approx = square_view_factor(&method);
        assert!((approx - exact).abs() < 1e-8, "{} != {}", approx, exact);
    }

    #[test]
    fn test_adaptive_matches_coaxial_squares() {
        let exact = two_coaxial_parallel_plates(1.0, 1.0, 1.0).unwrap();
        let method = AdaptiveViewFactor::new(1e-12, 1e-10, 50);
        let approx = square_view_factor(&method);
        assert!((approx - exact).abs() < 1e-6, "{} != {}", approx, exact);
    }

    #[test]
    fn test_strategies_agree_on_opposed_triangles() {
        let (from, to) = (base(), opposed());

        let tensor = FixedViewFactor::new(TensorProductRule::square(30).unwrap())
            .view_factor(&from, &to)
            .unwrap();
        let symmetric = FixedViewFactor::new(SymmetricRule::new(13).unwrap())
            .view_factor(&from, &to)
            .unwrap();
        let adaptive = AdaptiveViewFactor::new(1e-12, 1e-10, 50)
            .view_factor(&from, &to)
            .unwrap();

        assert!((tensor - 0.115_049_228_149_609_8).abs() < 1e-12);
        assert!((symmetric - tensor).abs() < 1e-9);
        assert!((adaptive - tensor).abs() < 1e-10);
    }

    #[test]
    fn test_reciprocity_of_inclined_pair() {
        let a = base();
        let b = tri([0.0, 0.0, 0.5], [0.0, 1.0, 1.5], [1.0, 0.0, 1.5]);
        let method = FixedViewFactor::new(TensorProductRule::square(12).unwrap());

        let f_ab = method.view_factor(&a, &b).unwrap();
        let f_ba = method.view_factor(&b, &a).unwrap();

        assert!((f_ab - 0.110_126_243_794_503_75).abs() < 1e-12);
        assert!((f_ba - 0.063_581_416_499_599_1).abs() < 1e-12);
        assert!((a.area() * f_ab - b.area() * f_ba).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_pair() {
        let a = base();
        let c = tri([0.0, 0.2, 0.2], [0.0, 1.2, 0.2], [0.0, 0.2, 1.2]);

        let tensor = FixedViewFactor::new(TensorProductRule::square(12).unwrap())
            .view_factor(&a, &c)
            .unwrap();
        let adaptive = AdaptiveViewFactor::new(1e-12, 1e-10, 50)
            .view_factor(&a, &c)
            .unwrap();

        assert!((tensor - 0.097_778_962_672_851_06).abs() < 1e-12);
        assert!((adaptive - tensor).abs() < 1e-5);
    }

    #[test]
    fn test_shared_rule() {
        let rule = Arc::new(SymmetricRule::new(8).unwrap());
        let first = FixedViewFactor::from_shared(Arc::clone(&rule));
        let second = FixedViewFactor::from_shared(Arc::clone(&rule));

        let (from, to) = (base(), opposed());
        assert_eq!(
            first.view_factor(&from, &to).unwrap(),
            second.view_factor(&from, &to).unwrap()
        );
        assert_eq!(first.rule().order(), 8);
    }

    #[test]
    fn test_adaptive_budget_exhausted() {
        let near = tri([0.0, 0.0, 0.001], [0.0, 1.0, 0.001], [1.0, 0.0, 0.001]);
        let method = AdaptiveViewFactor::new(1e-14, 1e-12, 1);

        let result = method.view_factor(&base(), &near);
        assert!(matches!(
            result,
            Err(ViewFactorError::Quadrature(QuadratureError::ConvergenceFailure { limit: 1, .. }))
        ));
    }
}
