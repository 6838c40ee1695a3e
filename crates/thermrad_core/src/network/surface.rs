use super::{NetworkError, NetworkResult};

/// Handle of a surface within a [`super::ThermalNetwork`].
///
/// Handles are assigned in insertion order and index the rows and columns
/// of every factor matrix the network produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub(crate) usize);

impl SurfaceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A grey, diffuse surface taking part in radiation exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    name: String,
    /// Area (> 0)
    area: f64,
    /// Emissivity, in (0, 1]
    emissivity: f64,
}

impl Surface {
    pub fn new(name: impl Into<String>, area: f64, emissivity: f64) -> NetworkResult<Self> {
        let name = name.into();
        if !(area > 0.0 && area.is_finite()) {
            return Err(NetworkError::InvalidSurface {
                name,
                reason: format!("area must be positive, got {}", area),
            });
        }
        if !(emissivity > 0.0 && emissivity <= 1.0) {
            return Err(NetworkError::InvalidSurface {
                name,
                reason: format!("emissivity must be in (0, 1], got {}", emissivity),
            });
        }
        Ok(Self {
            name,
            area,
            emissivity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn emissivity(&self) -> f64 {
        self.emissivity
    }

    /// Reflectivity of an opaque grey surface, `1 - emissivity`.
    pub fn reflectivity(&self) -> f64 {
        1.0 - self.emissivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_properties() {
        let surface = Surface::new("wall", 2.5, 0.8).unwrap();
        assert_eq!(surface.name(), "wall");
        assert_eq!(surface.area(), 2.5);
        assert!((surface.reflectivity() - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_black_body_has_no_reflectivity() {
        assert_eq!(Surface::new("black", 1.0, 1.0).unwrap().reflectivity(), 0.0);
    }

    #[test]
    fn test_invalid_surfaces() {
        assert!(matches!(
            Surface::new("flat", 0.0, 0.5),
            Err(NetworkError::InvalidSurface { .. })
        ));
        assert!(Surface::new("mirror", 1.0, 0.0).is_err());
        assert!(Surface::new("bright", 1.0, 1.5).is_err());
        assert!(Surface::new("nan", f64::NAN, 0.5).is_err());
    }
}
