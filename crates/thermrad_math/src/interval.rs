/// A closed real interval `[min, max]`.
///
/// Used for integration segments and for checking parametric coordinates
/// against the unit range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    /// Half the interval size, the scale factor of a map from [-1, 1].
    pub fn half_length(&self) -> f64 {
        0.5 * (self.max - self.min)
    }

    /// Split the interval at its midpoint.
    ///
    /// Returns `None` when the midpoint is not strictly inside the interval,
    /// which happens once the interval is a few ulps wide.
    pub fn bisect(&self) -> Option<(Interval, Interval)> {
        let mid = self.midpoint();
        if !self.surrounds(mid) {
            return None;
        }
        Some((Interval::new(self.min, mid), Interval::new(mid, self.max)))
    }

    /// The unit interval [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// The reference interval [-1, 1] of Gauss rules.
    pub const SYMMETRIC: Interval = Interval {
        min: -1.0,
        max: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);
        assert_eq!(interval.half_length(), 2.5);
        assert_eq!(interval.midpoint(), 4.5);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::UNIT;

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(1.0));
        assert!(interval.contains(0.5));

        // Outside bounds
        assert!(!interval.contains(-1e-12));
        assert!(!interval.contains(1.0 + 1e-12));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::SYMMETRIC;

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(-1.0));
        assert!(!interval.surrounds(1.0));
        assert!(interval.surrounds(0.0));
    }

    #[test]
    fn test_interval_bisect() {
        let (left, right) = Interval::new(0.0, 1.0).bisect().unwrap();
        assert_eq!(left, Interval::new(0.0, 0.5));
        assert_eq!(right, Interval::new(0.5, 1.0));
    }

    #[test]
    fn test_interval_bisect_exhausted() {
        let x = 1.0_f64;
        let next = f64::from_bits(x.to_bits() + 1);
        assert!(Interval::new(x, next).bisect().is_none());
    }
}
