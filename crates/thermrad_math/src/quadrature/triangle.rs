use crate::DVec2;

use super::symmetric_tables::{orbits, MAX_SYMMETRIC_ORDER};
use super::{GaussLegendre, Quadrature, QuadratureError, QuadratureResult};

/// A quadrature rule over the unit right triangle
/// `{(xi, eta) : xi >= 0, eta >= 0, xi + eta <= 1}`.
///
/// [`Quadrature::points`] are already mapped to `(xi, eta)` and the weights
/// integrate over the triangle, so they sum to its area of one half.
pub trait TriangleRule: Quadrature<Point = DVec2> {
    /// Map a point of the rule's own reference domain to `(xi, eta)`.
    fn quad_domain_to_func_domain(&self, u: f64, v: f64) -> DVec2;

    /// Points in the rule's reference domain, before mapping.
    fn reference_points(&self) -> &[DVec2];
}

/// Tensor product of two Gauss–Legendre rules, collapsed onto the triangle.
///
/// A point `(u, v)` of [-1, 1]^2 maps to `xi = (1 + u) / 2`,
/// `eta = (1 - u)(1 + v) / 4`, so the edge `u = 1` collapses onto the vertex
/// `(1, 0)`. The Jacobian `(1 - u) / 8` is folded into the weights.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorProductRule {
    order_u: usize,
    order_v: usize,
    reference: Vec<DVec2>,
    points: Vec<DVec2>,
    weights: Vec<f64>,
}

impl TensorProductRule {
    pub fn new(order_u: usize, order_v: usize) -> QuadratureResult<Self> {
        let rule_u = GaussLegendre::new(order_u)?;
        let rule_v = GaussLegendre::new(order_v)?;

        let size = order_u * order_v;
        let mut reference = Vec::with_capacity(size);
        let mut points = Vec::with_capacity(size);
        let mut weights = Vec::with_capacity(size);

        for (&u, &wu) in rule_u.points().iter().zip(rule_u.weights()) {
            for (&v, &wv) in rule_v.points().iter().zip(rule_v.weights()) {
                reference.push(DVec2::new(u, v));
                points.push(duffy(u, v));
                weights.push(wu * wv * (1.0 - u) / 8.0);
            }
        }

        Ok(Self {
            order_u,
            order_v,
            reference,
            points,
            weights,
        })
    }

    /// Same order in both directions.
    pub fn square(order: usize) -> QuadratureResult<Self> {
        Self::new(order, order)
    }

    pub fn orders(&self) -> (usize, usize) {
        (self.order_u, self.order_v)
    }
}

#[inline]
fn duffy(u: f64, v: f64) -> DVec2 {
    DVec2::new(0.5 * (1.0 + u), 0.25 * (1.0 - u) * (1.0 + v))
}

impl Quadrature for TensorProductRule {
    type Point = DVec2;

    fn points(&self) -> &[DVec2] {
        &self.points
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl TriangleRule for TensorProductRule {
    fn quad_domain_to_func_domain(&self, u: f64, v: f64) -> DVec2 {
        duffy(u, v)
    }

    fn reference_points(&self) -> &[DVec2] {
        &self.reference
    }
}

/// Fully symmetric (Dunavant) rule on the triangle.
///
/// The reference domain is the triangle itself, so the domain map is the
/// identity.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricRule {
    order: usize,
    points: Vec<DVec2>,
    weights: Vec<f64>,
}

impl SymmetricRule {
    pub fn new(order: usize) -> QuadratureResult<Self> {
        if order == 0 {
            return Err(QuadratureError::InvalidOrder(order));
        }
        let table = orbits(order).ok_or(QuadratureError::UnsupportedOrder {
            order,
            max: MAX_SYMMETRIC_ORDER,
        })?;

        let mut points = Vec::new();
        let mut weights = Vec::new();
        for orbit in table {
            let (barycentric, weight) = orbit.expand();
            for [_, l2, l3] in barycentric {
                // (1 - xi - eta) a + xi b + eta c
                points.push(DVec2::new(l2, l3));
                weights.push(0.5 * weight);
            }
        }

        Ok(Self {
            order,
            points,
            weights,
        })
    }

    /// Requested polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }
}

impl Quadrature for SymmetricRule {
    type Point = DVec2;

    fn points(&self) -> &[DVec2] {
        &self.points
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl TriangleRule for SymmetricRule {
    fn quad_domain_to_func_domain(&self, u: f64, v: f64) -> DVec2 {
        DVec2::new(u, v)
    }

    fn reference_points(&self) -> &[DVec2] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorial(n: i32) -> f64 {
        (1..=n).map(f64::from).product()
    }

    /// Integral of xi^i eta^j over the unit right triangle.
    fn monomial_integral(i: i32, j: i32) -> f64 {
        factorial(i) * factorial(j) / factorial(i + j + 2)
    }

    fn assert_exact_to_degree<R: TriangleRule>(rule: &R, degree: i32, tol: f64) {
        for i in 0..=degree {
            for j in 0..=(degree - i) {
                let approx = rule.compute(|p| p.x.powi(i) * p.y.powi(j));
                let exact = monomial_integral(i, j);
                assert!(
                    (approx - exact).abs() < tol,
                    "xi^{} eta^{}: {} != {}",
                    i,
                    j,
                    approx,
                    exact
                );
            }
        }
    }

    fn assert_inside<R: TriangleRule>(rule: &R) {
        for p in rule.points() {
            assert!(p.x > 0.0 && p.y > 0.0 && p.x + p.y < 1.0, "{:?}", p);
        }
    }

    #[test]
    fn test_tensor_weights_sum_to_area() {
        let rule = TensorProductRule::new(4, 7).unwrap();
        assert_eq!(rule.len(), 28);
        assert_eq!(rule.orders(), (4, 7));
        assert!((rule.weights().iter().sum::<f64>() - 0.5).abs() < 1e-14);
    }

    #[test]
    fn test_tensor_points_inside() {
        assert_inside(&TensorProductRule::square(10).unwrap());
    }

    #[test]
    fn test_tensor_exactness() {
        // Degree d in (xi, eta) becomes degree d + 1 in u after the collapse
        let rule = TensorProductRule::square(3).unwrap();
        assert_exact_to_degree(&rule, 4, 1e-14);

        let rule = TensorProductRule::square(8).unwrap();
        assert_exact_to_degree(&rule, 14, 1e-14);
    }

    #[test]
    fn test_tensor_domain_map() {
        let rule = TensorProductRule::square(2).unwrap();

        assert_eq!(rule.quad_domain_to_func_domain(-1.0, -1.0), DVec2::new(0.0, 0.0));
        assert_eq!(rule.quad_domain_to_func_domain(-1.0, 1.0), DVec2::new(0.0, 1.0));
        assert_eq!(rule.quad_domain_to_func_domain(1.0, 0.3), DVec2::new(1.0, 0.0));

        for (r, p) in rule.reference_points().iter().zip(rule.points()) {
            assert_eq!(rule.quad_domain_to_func_domain(r.x, r.y), *p);
        }
    }

    #[test]
    fn test_tensor_invalid_order() {
        assert_eq!(
            TensorProductRule::new(0, 3),
            Err(QuadratureError::InvalidOrder(0))
        );
    }

    #[test]
    fn test_symmetric_exactness() {
        for order in 1..=MAX_SYMMETRIC_ORDER {
            let rule = SymmetricRule::new(order).unwrap();
            assert_eq!(rule.order(), order);
            assert_exact_to_degree(&rule, order as i32, 1e-13);
            assert_inside(&rule);
        }
    }

    #[test]
    fn test_symmetric_weights_sum_to_area() {
        let rule = SymmetricRule::new(7).unwrap();
        assert_eq!(rule.len(), 13);
        assert!((rule.weights().iter().sum::<f64>() - 0.5).abs() < 1e-13);
    }

    #[test]
    fn test_symmetric_identity_map() {
        let rule = SymmetricRule::new(5).unwrap();
        assert_eq!(rule.quad_domain_to_func_domain(0.2, 0.7), DVec2::new(0.2, 0.7));
        assert_eq!(rule.reference_points(), rule.points());
    }

    #[test]
    fn test_symmetric_order_limits() {
        assert_eq!(SymmetricRule::new(0), Err(QuadratureError::InvalidOrder(0)));
        assert_eq!(
            SymmetricRule::new(14),
            Err(QuadratureError::UnsupportedOrder { order: 14, max: 13 })
        );
    }
}
