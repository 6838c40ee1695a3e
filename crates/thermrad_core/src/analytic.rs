//! Closed-form view factors for simple configurations.
//!
//! These serve as reference values for the numerical strategies.

use std::f64::consts::PI;

use crate::view_factor::{ViewFactorError, ViewFactorResult};

fn positive(name: &'static str, value: f64) -> ViewFactorResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ViewFactorError::InvalidDimension { name, value })
    }
}

/// View factor between two parallel, infinitely long strips of widths
/// `w1` (source) and `w2` (target), centred on each other at distance `d`.
pub fn two_infinitely_long_plates(w1: f64, w2: f64, d: f64) -> ViewFactorResult<f64> {
    let b = positive("w1", w1)? / positive("d", d)?;
    let c = positive("w2", w2)? / d;

    let sum = b + c;
    let diff = c - b;
    Ok(((sum * sum + 4.0).sqrt() - (diff * diff + 4.0).sqrt()) / (2.0 * b))
}

/// View factor between two identical, directly opposed `a` x `b`
/// rectangles at distance `d`.
pub fn two_coaxial_parallel_plates(a: f64, b: f64, d: f64) -> ViewFactorResult<f64> {
    let x = positive("a", a)? / positive("d", d)?;
    let y = positive("b", b)? / d;

    let x2 = 1.0 + x * x;
    let y2 = 1.0 + y * y;
    let (sx, sy) = (x2.sqrt(), y2.sqrt());

    let bracket = (x2 * y2 / (x2 + y * y)).sqrt().ln()
        + x * sy * (x / sy).atan()
        + y * sx * (y / sx).atan()
        - x * x.atan()
        - y * y.atan();

    Ok(2.0 / (PI * x * y) * bracket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_squares_at_unit_distance() {
        let f = two_coaxial_parallel_plates(1.0, 1.0, 1.0).unwrap();
        assert!((f - 0.199_824_895_698_387_46).abs() < 1e-15);
    }

    #[test]
    fn test_coaxial_plates_limits() {
        assert!(two_coaxial_parallel_plates(1.0, 1.0, 1e-3).unwrap() > 0.99);
        assert!(two_coaxial_parallel_plates(1.0, 1.0, 1e3).unwrap() < 1e-6);
    }

    #[test]
    fn test_coaxial_plates_symmetric_in_sides() {
        let f1 = two_coaxial_parallel_plates(1.0, 2.5, 0.7).unwrap();
        let f2 = two_coaxial_parallel_plates(2.5, 1.0, 0.7).unwrap();
        assert!((f1 - f2).abs() < 1e-15);
    }

    #[test]
    fn test_equal_infinite_strips() {
        // (sqrt(1 + B^2) - 1) / B with B = 1
        let f = two_infinitely_long_plates(1.0, 1.0, 1.0).unwrap();
        assert!((f - (2.0_f64.sqrt() - 1.0)).abs() < 1e-15);
    }

    #[test]
    fn test_infinite_strips_reciprocity() {
        let f12 = two_infinitely_long_plates(1.0, 3.0, 2.0).unwrap();
        let f21 = two_infinitely_long_plates(3.0, 1.0, 2.0).unwrap();
        assert!((1.0 * f12 - 3.0 * f21).abs() < 1e-14);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            two_coaxial_parallel_plates(1.0, 1.0, 0.0),
            Err(ViewFactorError::InvalidDimension {
                name: "d",
                value: 0.0
            })
        );
        assert!(two_infinitely_long_plates(-1.0, 1.0, 1.0).is_err());
        assert!(two_coaxial_parallel_plates(1.0, f64::NAN, 1.0).is_err());
    }
}
