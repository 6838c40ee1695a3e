//! Globally adaptive 1D integration.
//!
//! Each segment is integrated with the 21-point Gauss–Kronrod rule and its
//! error estimated against the embedded 10-point Gauss rule. The segment
//! with the largest error is bisected until the summed error meets the
//! tolerance or the segment budget runs out.
//!
//! The integrand is fallible so that nested integrations can propagate both
//! their own errors and those of the innermost integrand.

use crate::quadrature::QuadratureError;
use crate::Interval;

/// Kronrod abscissae on [0, 1]; odd indices are the Gauss nodes.
const XGK: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.0,
];

const WGK: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_600_525_452_338,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821,
];

/// Gauss weights for XGK[1], XGK[3], ..., XGK[9].
const WG: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338,
];

/// Result of a converged integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
    /// Estimated absolute error
    pub error: f64,
    /// Number of segments in the final partition
    pub segments: usize,
}

/// Tolerances and budget for [`AdaptiveIntegrator::integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveIntegrator {
    /// Absolute error tolerance
    pub abs_tol: f64,
    /// Relative error tolerance
    pub rel_tol: f64,
    /// Maximum number of segments before giving up
    pub max_subdivisions: usize,
}

impl Default for AdaptiveIntegrator {
    fn default() -> Self {
        Self {
            abs_tol: 1e-14,
            rel_tol: 1e-8,
            max_subdivisions: 100,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    interval: Interval,
    value: f64,
    error: f64,
}

impl AdaptiveIntegrator {
    pub fn new(abs_tol: f64, rel_tol: f64, max_subdivisions: usize) -> Self {
        Self {
            abs_tol,
            rel_tol,
            max_subdivisions,
        }
    }

    /// Copy with a different absolute tolerance.
    pub fn with_abs_tol(self, abs_tol: f64) -> Self {
        Self { abs_tol, ..self }
    }

    /// Acceptable absolute error for an integral of the given value.
    pub fn tolerance_for(&self, value: f64) -> f64 {
        self.abs_tol.max(self.rel_tol * value.abs())
    }

    /// Integrate `f` over `[a, b]`.
    ///
    /// Fails with [`QuadratureError::ConvergenceFailure`] once the partition
    /// holds `max_subdivisions` segments, or a segment can no longer be split,
    /// without meeting the tolerance. Errors returned by `f` are passed
    /// through unchanged.
    pub fn integrate<F, E>(&self, a: f64, b: f64, mut f: F) -> Result<Estimate, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<QuadratureError>,
    {
        let limit = self.max_subdivisions.max(1);
        let mut segments = Vec::with_capacity(limit);
        segments.push(evaluate(Interval::new(a, b), &mut f)?);

        loop {
            let value: f64 = segments.iter().map(|s| s.value).sum();
            let error: f64 = segments.iter().map(|s| s.error).sum();

            if error <= self.tolerance_for(value) {
                return Ok(Estimate {
                    value,
                    error,
                    segments: segments.len(),
                });
            }

            let failure = QuadratureError::ConvergenceFailure {
                estimate: value,
                error,
                limit,
            };

            if segments.len() >= limit {
                return Err(failure.into());
            }

            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
                .map(|(i, _)| i)
                .unwrap_or(0);

            let Some((left, right)) = segments[worst].interval.bisect() else {
                return Err(failure.into());
            };

            segments[worst] = evaluate(left, &mut f)?;
            segments.push(evaluate(right, &mut f)?);
        }
    }
}

fn evaluate<F, E>(interval: Interval, f: &mut F) -> Result<Segment, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let (value, error) = gauss_kronrod_21(interval, f)?;
    Ok(Segment {
        interval,
        value,
        error,
    })
}

/// 21-point Gauss–Kronrod estimate of the integral over `interval`,
/// returned as `(value, error)`.
///
/// The error follows QUADPACK's `qk21`: the Kronrod/Gauss difference is
/// scaled against the integrand's variation and floored at the
/// floating-point resolution of the result.
pub fn gauss_kronrod_21<F, E>(interval: Interval, f: &mut F) -> Result<(f64, f64), E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let center = interval.midpoint();
    let half = interval.half_length();

    let f_center = f(center)?;
    let mut kronrod = WGK[10] * f_center;
    let mut gauss = 0.0;
    let mut abs_sum = kronrod.abs();

    let mut lower = [0.0; 10];
    let mut upper = [0.0; 10];
    for j in 0..10 {
        let dx = half * XGK[j];
        let f1 = f(center - dx)?;
        let f2 = f(center + dx)?;
        lower[j] = f1;
        upper[j] = f2;

        kronrod += WGK[j] * (f1 + f2);
        abs_sum += WGK[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            gauss += WG[j / 2] * (f1 + f2);
        }
    }

    let mean = 0.5 * kronrod;
    let mut asc = WGK[10] * (f_center - mean).abs();
    for j in 0..10 {
        asc += WGK[j] * ((lower[j] - mean).abs() + (upper[j] - mean).abs());
    }

    let value = kronrod * half;
    let abs_sum = abs_sum * half.abs();
    let asc = asc * half.abs();

    let mut error = ((kronrod - gauss) * half).abs();
    if asc != 0.0 && error != 0.0 {
        error = asc * (200.0 * error / asc).powf(1.5).min(1.0);
    }
    if abs_sum > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * abs_sum);
    }

    Ok((value, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Quadrature(QuadratureError),
        Integrand,
    }

    impl From<QuadratureError> for TestError {
        fn from(e: QuadratureError) -> Self {
            TestError::Quadrature(e)
        }
    }

    fn ok(x: f64) -> Result<f64, QuadratureError> {
        Ok(x)
    }

    #[test]
    fn test_kronrod_exact_for_polynomials() {
        let mut f = |x: f64| -> Result<f64, Infallible> { Ok(x.powi(30) - 3.0 * x.powi(7)) };
        let (value, _) = gauss_kronrod_21(Interval::SYMMETRIC, &mut f).unwrap();
        assert!((value - 2.0 / 31.0).abs() < 1e-14);
    }

    #[test]
    fn test_smooth_integral_single_segment() {
        let integrator = AdaptiveIntegrator::default();
        let estimate = integrator
            .integrate(0.0, std::f64::consts::PI, |x| ok(x.sin()))
            .unwrap();

        assert!((estimate.value - 2.0).abs() < 1e-12);
        assert_eq!(estimate.segments, 1);
    }

    #[test]
    fn test_peaked_integrand_subdivides() {
        let integrator = AdaptiveIntegrator::new(1e-12, 1e-10, 200);
        let estimate = integrator
            .integrate(0.0, 1.0, |x| ok(x.sqrt()))
            .unwrap();

        assert!((estimate.value - 2.0 / 3.0).abs() < 1e-10);
        assert!(estimate.segments > 1);
        assert!(estimate.error <= integrator.tolerance_for(estimate.value));
    }

    #[test]
    fn test_empty_range() {
        let estimate = AdaptiveIntegrator::default()
            .integrate(0.5, 0.5, |x| ok(1.0 / x))
            .unwrap();
        assert_eq!(estimate.value, 0.0);
    }

    #[test]
    fn test_convergence_failure_reports_estimate() {
        let integrator = AdaptiveIntegrator::new(1e-15, 1e-15, 3);
        let result = integrator.integrate(0.0, 1.0, |x| ok(1.0 / (x + 1e-6)));

        match result {
            Err(QuadratureError::ConvergenceFailure {
                estimate,
                error,
                limit,
            }) => {
                assert_eq!(limit, 3);
                assert!(estimate.is_finite());
                assert!(error > 0.0);
            }
            other => panic!("expected convergence failure, got {:?}", other),
        }
    }

    #[test]
    fn test_integrand_error_propagates() {
        let integrator = AdaptiveIntegrator::default();
        let result = integrator.integrate(0.0, 1.0, |x| {
            if x > 0.9 {
                Err(TestError::Integrand)
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err(TestError::Integrand));
    }

    #[test]
    fn test_nested_integration_over_triangle() {
        // Integral of x * y over the unit right triangle is 1/24
        let integrator = AdaptiveIntegrator::default();
        let estimate = integrator
            .integrate(0.0, 1.0, |y| {
                integrator
                    .integrate(0.0, 1.0 - y, |x| ok(x * y))
                    .map(|inner| inner.value)
            })
            .unwrap();

        assert!((estimate.value - 1.0 / 24.0).abs() < 1e-14);
    }
}
