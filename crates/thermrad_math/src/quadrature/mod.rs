//! Fixed quadrature rules.
//!
//! - [`GaussLegendre`]: 1D rules on [-1, 1]
//! - [`TensorProductRule`]: Gauss–Legendre squared, collapsed onto the unit triangle
//! - [`SymmetricRule`]: fully symmetric point sets on the unit triangle
//!
//! Rules are built once from their order and are immutable afterwards, so a
//! single rule can be shared by reference across any number of evaluations.

mod gauss_legendre;
mod symmetric_tables;
mod triangle;

pub use gauss_legendre::GaussLegendre;
pub use symmetric_tables::MAX_SYMMETRIC_ORDER;
pub use triangle::{SymmetricRule, TensorProductRule, TriangleRule};

use thiserror::Error;

/// Errors raised while building or applying quadrature rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadratureError {
    #[error("Unsupported quadrature order {order} (maximum is {max})")]
    UnsupportedOrder { order: usize, max: usize },

    #[error("Invalid quadrature order {0}: at least one point is required")]
    InvalidOrder(usize),

    #[error(
        "Adaptive integration failed to converge within {limit} subdivisions \
         (estimate {estimate:e}, error {error:e})"
    )]
    ConvergenceFailure {
        estimate: f64,
        error: f64,
        limit: usize,
    },
}

pub type QuadratureResult<T> = Result<T, QuadratureError>;

/// An ordered set of quadrature points with matching weights.
pub trait Quadrature {
    /// Coordinate type of a quadrature point.
    type Point: Copy;

    fn points(&self) -> &[Self::Point];

    fn weights(&self) -> &[f64];

    fn len(&self) -> usize {
        self.weights().len()
    }

    fn is_empty(&self) -> bool {
        self.weights().is_empty()
    }

    /// Weighted sum of `f` over the quadrature points.
    fn compute<F>(&self, mut f: F) -> f64
    where
        F: FnMut(Self::Point) -> f64,
    {
        self.points()
            .iter()
            .zip(self.weights())
            .map(|(&p, &w)| w * f(p))
            .sum()
    }
}
