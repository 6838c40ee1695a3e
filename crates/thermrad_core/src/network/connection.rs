use super::{NetworkError, NetworkResult, SurfaceId};

/// The directed view factor supplied when creating a connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GivenFactor {
    /// From the first surface to the second
    Forward(f64),
    /// From the second surface to the first
    Reverse(f64),
}

/// Radiative coupling between two surfaces.
///
/// Holds both directed view factors, kept consistent with reciprocity
/// `A_first F_forward = A_second F_reverse`. A self-connection carries the
/// same factor in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiationConnection {
    first: SurfaceId,
    second: SurfaceId,
    forward: f64,
    reverse: f64,
}

impl RadiationConnection {
    /// Create a connection from one directed factor, deriving the other.
    ///
    /// `areas` are the areas of `first` and `second`.
    pub fn new(
        first: SurfaceId,
        second: SurfaceId,
        areas: (f64, f64),
        given: GivenFactor,
    ) -> NetworkResult<Self> {
        let (area1, area2) = areas;
        let (forward, reverse) = match given {
            GivenFactor::Forward(f) => (f, f * area1 / area2),
            GivenFactor::Reverse(f) => (f * area2 / area1, f),
        };

        for factor in [forward, reverse] {
            if !(factor >= 0.0 && factor.is_finite()) {
                return Err(NetworkError::InvalidFactor(factor));
            }
        }

        Ok(Self {
            first,
            second,
            forward,
            reverse,
        })
    }

    pub fn surfaces(&self) -> (SurfaceId, SurfaceId) {
        (self.first, self.second)
    }

    pub fn is_self_connection(&self) -> bool {
        self.first == self.second
    }

    /// Factor from the first surface to the second.
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Factor from the second surface to the first.
    pub fn reverse(&self) -> f64 {
        self.reverse
    }

    /// Directed factor between the two surfaces, in either orientation.
    pub fn factor(&self, from: SurfaceId, to: SurfaceId) -> Option<f64> {
        if from == self.first && to == self.second {
            Some(self.forward)
        } else if from == self.second && to == self.first {
            Some(self.reverse)
        } else {
            None
        }
    }

    /// Sum of two partial connections between the same pair of surfaces.
    ///
    /// `other` may have either orientation; the result keeps this one's.
    pub fn merge(&self, other: &RadiationConnection) -> NetworkResult<Self> {
        let (forward, reverse) = if other.first == self.first && other.second == self.second {
            (other.forward, other.reverse)
        } else if other.first == self.second && other.second == self.first {
            (other.reverse, other.forward)
        } else {
            return Err(NetworkError::MismatchedConnection);
        };

        Ok(Self {
            forward: self.forward + forward,
            reverse: self.reverse + reverse,
            ..self.clone()
        })
    }
}
