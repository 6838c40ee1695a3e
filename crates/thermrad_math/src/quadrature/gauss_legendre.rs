use std::f64::consts::PI;

use super::{Quadrature, QuadratureError, QuadratureResult};

const NEWTON_TOLERANCE: f64 = 1e-15;
const NEWTON_MAX_STEPS: usize = 100;

/// Gauss–Legendre rule on [-1, 1].
///
/// An `n`-point rule integrates polynomials up to degree `2n - 1` exactly.
/// Abscissae are stored in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre {
    order: usize,
    points: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLegendre {
    /// Build the `n`-point rule.
    ///
    /// Roots of P_n are found by Newton iteration on the three-term
    /// recurrence, starting from the asymptotic estimate
    /// `cos(pi (i - 1/4) / (n + 1/2))`.
    pub fn new(n: usize) -> QuadratureResult<Self> {
        if n == 0 {
            return Err(QuadratureError::InvalidOrder(n));
        }

        let mut points = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        for i in 1..=n {
            let mut x = (PI * (i as f64 - 0.25) / (n as f64 + 0.5)).cos();
            for _ in 0..NEWTON_MAX_STEPS {
                let (p, dp) = legendre(n, x);
                let dx = p / dp;
                x -= dx;
                if dx.abs() < NEWTON_TOLERANCE {
                    break;
                }
            }
            let (_, dp) = legendre(n, x);
            points.push(x);
            weights.push(2.0 / ((1.0 - x * x) * dp * dp));
        }

        // The initial estimates run from +1 down to -1
        points.reverse();
        weights.reverse();

        Ok(Self {
            order: n,
            points,
            weights,
        })
    }

    /// Number of points.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Highest polynomial degree integrated exactly.
    pub fn max_poly_order(&self) -> usize {
        2 * self.order - 1
    }
}

impl Quadrature for GaussLegendre {
    type Point = f64;

    fn points(&self) -> &[f64] {
        &self.points
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// P_n(x) and P_n'(x) for |x| < 1.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for j in 1..=n {
        let p3 = p2;
        p2 = p1;
        let j = j as f64;
        p1 = ((2.0 * j - 1.0) * x * p2 - (j - 1.0) * p3) / j;
    }
    let dp = n as f64 * (x * p1 - p2) / (x * x - 1.0);
    (p1, dp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monomial_integral(k: i32) -> f64 {
        if k % 2 == 1 {
            0.0
        } else {
            2.0 / (k as f64 + 1.0)
        }
    }

    #[test]
    fn test_order_zero_rejected() {
        assert_eq!(GaussLegendre::new(0), Err(QuadratureError::InvalidOrder(0)));
    }

    #[test]
    fn test_single_point() {
        let rule = GaussLegendre::new(1).unwrap();
        assert_eq!(rule.len(), 1);
        assert!(rule.points()[0].abs() < 1e-15);
        assert!((rule.weights()[0] - 2.0).abs() < 1e-15);
        assert_eq!(rule.max_poly_order(), 1);
    }

    #[test]
    fn test_two_point_rule() {
        let rule = GaussLegendre::new(2).unwrap();

        assert!(rule.compute(|x| x.powi(3)).abs() < 1e-15);
        assert!((rule.compute(|x| x * x) - 2.0 / 3.0).abs() < 1e-15);

        // Degree 4 is beyond 2n - 1
        assert!((rule.compute(|x| x.powi(4)) - 0.4).abs() > 0.1);
    }

    #[test]
    fn test_five_point_nodes() {
        let rule = GaussLegendre::new(5).unwrap();
        let expected_points = [
            -0.906_179_845_938_664,
            -0.538_469_310_105_683_1,
            0.0,
            0.538_469_310_105_683_1,
            0.906_179_845_938_664,
        ];
        let expected_weights = [
            0.236_926_885_056_189_1,
            0.478_628_670_499_366_5,
            0.568_888_888_888_888_9,
            0.478_628_670_499_366_5,
            0.236_926_885_056_189_1,
        ];

        for (x, e) in rule.points().iter().zip(expected_points) {
            assert!((x - e).abs() < 1e-14, "node {} != {}", x, e);
        }
        for (w, e) in rule.weights().iter().zip(expected_weights) {
            assert!((w - e).abs() < 1e-14, "weight {} != {}", w, e);
        }
    }

    #[test]
    fn test_exact_up_to_max_poly_order() {
        for n in 1..=12 {
            let rule = GaussLegendre::new(n).unwrap();
            for k in 0..=rule.max_poly_order() as i32 {
                let approx = rule.compute(|x| x.powi(k));
                assert!(
                    (approx - monomial_integral(k)).abs() < 1e-13,
                    "n = {}, x^{}: {} != {}",
                    n,
                    k,
                    approx,
                    monomial_integral(k)
                );
            }
        }
    }

    #[test]
    fn test_nodes_ascending_and_inside() {
        let rule = GaussLegendre::new(20).unwrap();
        assert!(rule.points().windows(2).all(|w| w[0] < w[1]));
        assert!(rule.points().iter().all(|x| x.abs() < 1.0));
        assert!((rule.weights().iter().sum::<f64>() - 2.0).abs() < 1e-13);
    }
}
