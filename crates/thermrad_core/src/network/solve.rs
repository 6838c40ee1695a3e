use nalgebra::{DMatrix, DVector};

use super::{NetworkError, NetworkResult};

/// Pivots smaller than this fraction of the largest matrix entry are
/// treated as zero.
const SINGULAR_PIVOT_RATIO: f64 = 1e-12;

/// Solve `a x = b` by LU decomposition with partial pivoting.
///
/// `target` names the surface the system was built for and is reported
/// when the system is singular.
pub(crate) fn solve_dense(
    a: DMatrix<f64>,
    b: &DVector<f64>,
    target: &str,
) -> NetworkResult<DVector<f64>> {
    let singular = || NetworkError::SingularRadiosity {
        target: target.to_string(),
    };

    let scale = a.amax();
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(singular());
    }

    let lu = a.lu();
    let min_pivot = lu
        .u()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |acc, p| acc.min(p.abs()));
    if min_pivot <= SINGULAR_PIVOT_RATIO * scale {
        log::debug!(
            "radiosity system for {} is singular (pivot {:e}, scale {:e})",
            target,
            min_pivot,
            scale
        );
        return Err(singular());
    }

    let x = lu.solve(b).ok_or_else(singular)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(singular());
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_small_system() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![3.0, 5.0]);

        let x = solve_dense(a, &b, "t").unwrap();
        assert!((x[0] - 0.8).abs() < 1e-14);
        assert!((x[1] - 1.4).abs() < 1e-14);
    }

    #[test]
    fn test_requires_pivoting() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let b = DVector::from_vec(vec![2.0, 3.0]);

        let x = solve_dense(a, &b, "t").unwrap();
        assert_eq!(x.as_slice(), &[3.0, 2.0]);
    }

    #[test]
    fn test_singular_system() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 0.0]);

        assert_eq!(
            solve_dense(a, &b, "sink"),
            Err(NetworkError::SingularRadiosity {
                target: "sink".to_string()
            })
        );
    }

    #[test]
    fn test_zero_matrix_is_singular() {
        let a = DMatrix::zeros(1, 1);
        let b = DVector::from_vec(vec![1.0]);
        assert!(solve_dense(a, &b, "t").is_err());
    }
}
