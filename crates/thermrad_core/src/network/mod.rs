//! Grey-body radiation exchange between surfaces.
//!
//! A [`ThermalNetwork`] collects surfaces and the view factors between
//! them, then computes Gebhart factors: the fraction of energy emitted by
//! one surface that is absorbed by another after any number of diffuse
//! reflections.
//!
//! # Example
//!
//! ```
//! use thermrad_core::network::ThermalNetwork;
//!
//! // Two infinite parallel plates
//! let mut network = ThermalNetwork::new("plates");
//! network.add_surface("top", 1.0, 0.5)?;
//! network.add_surface("bottom", 1.0, 0.5)?;
//! network.add_connection("top", "bottom", 1.0)?;
//!
//! let gebhart = network.get_grey_body_factors()?;
//! assert!((gebhart.get("top", "bottom")? - 2.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), thermrad_core::network::NetworkError>(())
//! ```

mod connection;
mod factors;
mod solve;
mod surface;

pub use connection::{GivenFactor, RadiationConnection};
pub use factors::FactorMap;
pub use surface::{Surface, SurfaceId};

use std::collections::{BTreeMap, HashMap};

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::config::NetworkSpec;

/// Relative tolerance of the view factor conservation check.
const CONSERVATION_REL_TOL: f64 = 1e-9;

/// Relative tolerance of `A_1 F_12 = A_2 F_21` for inserted connections.
const RECIPROCITY_REL_TOL: f64 = 1e-12;

/// Errors that can occur while building or solving a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Unknown surface: {0}")]
    UnknownSurface(String),

    #[error("Surface already exists: {0}")]
    DuplicateSurface(String),

    #[error("Invalid surface {name}: {reason}")]
    InvalidSurface { name: String, reason: String },

    #[error("Connections join different surface pairs")]
    MismatchedConnection,

    #[error("Connection between {first} and {second} violates reciprocity with the surface areas")]
    NonReciprocal { first: String, second: String },

    #[error("Invalid view factor {0}: must be finite and non-negative")]
    InvalidFactor(f64),

    #[error("Network {0} is solved and can no longer be modified")]
    AlreadySolved(String),

    #[error("Radiosity system for target surface {target} is singular")]
    SingularRadiosity { target: String },
}

/// Result type for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Lifecycle of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Surfaces and connections may be added
    Building,
    /// Gebhart factors have been computed; the network is read-only
    Solved,
}

/// A surface whose outgoing view factors do not sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservationMismatch {
    pub surface: String,
    pub sum: f64,
}

/// Factor maps produced by [`ThermalNetwork::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub gebhart: FactorMap,
    pub radks: FactorMap,
}

/// A set of surfaces coupled by view factors.
#[derive(Debug, Clone)]
pub struct ThermalNetwork {
    name: String,
    surfaces: Vec<Surface>,
    index: HashMap<String, SurfaceId>,
    /// Keyed by the ordered pair (lower id, higher id)
    connections: BTreeMap<(SurfaceId, SurfaceId), RadiationConnection>,
    solution: Option<Solution>,
}

fn pair_key(a: SurfaceId, b: SurfaceId) -> (SurfaceId, SurfaceId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ThermalNetwork {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surfaces: Vec::new(),
            index: HashMap::new(),
            connections: BTreeMap::new(),
            solution: None,
        }
    }

    /// Build a network from its declarative description.
    pub fn from_spec(spec: &NetworkSpec) -> NetworkResult<Self> {
        let mut network = Self::new(spec.name.clone());
        for surface in &spec.surfaces {
            network.add_surface(surface.name.clone(), surface.area, surface.emissivity)?;
        }
        for connection in &spec.connections {
            network.add_connection(&connection.from, &connection.to, connection.view_factor)?;
        }
        log::info!(
            "Built network {} with {} surfaces and {} connections",
            network.name,
            network.surfaces.len(),
            network.connections.len()
        );
        Ok(network)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> NetworkState {
        if self.solution.is_some() {
            NetworkState::Solved
        } else {
            NetworkState::Building
        }
    }

    fn ensure_building(&self) -> NetworkResult<()> {
        match self.state() {
            NetworkState::Building => Ok(()),
            NetworkState::Solved => Err(NetworkError::AlreadySolved(self.name.clone())),
        }
    }

    /// Add a surface, returning its handle.
    pub fn add_surface(
        &mut self,
        name: impl Into<String>,
        area: f64,
        emissivity: f64,
    ) -> NetworkResult<SurfaceId> {
        self.ensure_building()?;
        let surface = Surface::new(name, area, emissivity)?;
        if self.index.contains_key(surface.name()) {
            return Err(NetworkError::DuplicateSurface(surface.name().to_string()));
        }

        let id = SurfaceId(self.surfaces.len());
        self.index.insert(surface.name().to_string(), id);
        self.surfaces.push(surface);
        Ok(id)
    }

    /// Add the view factor from `from` to `to`.
    ///
    /// The reverse factor follows from reciprocity. Repeated connections
    /// between the same pair accumulate.
    pub fn add_connection(&mut self, from: &str, to: &str, view_factor: f64) -> NetworkResult<()> {
        self.ensure_building()?;
        let from_id = self.surface_id(from)?;
        let to_id = self.surface_id(to)?;
        let areas = (self.surfaces[from_id.0].area(), self.surfaces[to_id.0].area());
        let connection =
            RadiationConnection::new(from_id, to_id, areas, GivenFactor::Forward(view_factor))?;
        self.insert_connection(connection)
    }

    /// Add a prebuilt connection, merging it with any existing one.
    ///
    /// The connection's factors must satisfy reciprocity with the areas
    /// stored in this network.
    pub fn insert_connection(&mut self, connection: RadiationConnection) -> NetworkResult<()> {
        self.ensure_building()?;
        let (a, b) = connection.surfaces();
        if a.0 >= self.surfaces.len() || b.0 >= self.surfaces.len() {
            return Err(NetworkError::MismatchedConnection);
        }

        let exchange_ab = self.surfaces[a.0].area() * connection.forward();
        let exchange_ba = self.surfaces[b.0].area() * connection.reverse();
        if (exchange_ab - exchange_ba).abs() > RECIPROCITY_REL_TOL * exchange_ab.max(exchange_ba) {
            return Err(NetworkError::NonReciprocal {
                first: self.surfaces[a.0].name().to_string(),
                second: self.surfaces[b.0].name().to_string(),
            });
        }

        let key = pair_key(a, b);
        let merged = match self.connections.get(&key) {
            Some(existing) => existing.merge(&connection)?,
            None => connection,
        };
        log::debug!(
            "{}: {} <-> {} now {:.6} / {:.6}",
            self.name,
            self.surfaces[a.0].name(),
            self.surfaces[b.0].name(),
            merged.factor(a, b).unwrap_or(0.0),
            merged.factor(b, a).unwrap_or(0.0)
        );
        self.connections.insert(key, merged);
        Ok(())
    }

    pub fn surface_id(&self, name: &str) -> NetworkResult<SurfaceId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownSurface(name.to_string()))
    }

    pub fn surface(&self, name: &str) -> NetworkResult<&Surface> {
        Ok(&self.surfaces[self.surface_id(name)?.0])
    }

    /// Surfaces in handle order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Every ordered pair of surfaces, including each surface with itself.
    pub fn surface_combinations(&self) -> impl Iterator<Item = (&Surface, &Surface)> + '_ {
        self.surfaces
            .iter()
            .flat_map(move |from| self.surfaces.iter().map(move |to| (from, to)))
    }

    pub fn connection(&self, from: &str, to: &str) -> NetworkResult<Option<&RadiationConnection>> {
        let key = pair_key(self.surface_id(from)?, self.surface_id(to)?);
        Ok(self.connections.get(&key))
    }

    pub fn connections(&self) -> impl Iterator<Item = &RadiationConnection> + '_ {
        self.connections.values()
    }

    fn view_factor_by_id(&self, from: SurfaceId, to: SurfaceId) -> f64 {
        self.connections
            .get(&pair_key(from, to))
            .and_then(|c| c.factor(from, to))
            .unwrap_or(0.0)
    }

    /// View factor from `from` to `to`; zero if the surfaces are not connected.
    pub fn get_view_factor(&self, from: &str, to: &str) -> NetworkResult<f64> {
        Ok(self.view_factor_by_id(self.surface_id(from)?, self.surface_id(to)?))
    }

    /// The full view factor matrix in surface order.
    pub fn view_factors(&self) -> FactorMap {
        let n = self.surfaces.len();
        let values =
            DMatrix::from_fn(n, n, |i, j| self.view_factor_by_id(SurfaceId(i), SurfaceId(j)));
        FactorMap::new(self.surface_names(), values)
    }

    /// Sum of outgoing view factors per surface, including self-view.
    pub fn view_factor_sums(&self) -> Vec<(&str, f64)> {
        let n = self.surfaces.len();
        self.surfaces
            .iter()
            .enumerate()
            .map(|(i, surface)| {
                let sum = (0..n)
                    .map(|j| self.view_factor_by_id(SurfaceId(i), SurfaceId(j)))
                    .sum();
                (surface.name(), sum)
            })
            .collect()
    }

    /// Check that every surface's view factors sum to one.
    ///
    /// Mismatches are logged as warnings and returned; they never abort.
    pub fn verify_view_factors(&self) -> Vec<ConservationMismatch> {
        let mismatches: Vec<_> = self
            .view_factor_sums()
            .into_iter()
            .filter(|(_, sum)| (sum - 1.0).abs() > CONSERVATION_REL_TOL * sum.abs().max(1.0))
            .map(|(name, sum)| ConservationMismatch {
                surface: name.to_string(),
                sum,
            })
            .collect();

        for mismatch in &mismatches {
            log::warn!(
                "{}: view factors from {} sum to {} (expected 1.0)",
                self.name,
                mismatch.surface,
                mismatch.sum
            );
        }
        mismatches
    }

    /// Radiosity system whose solution is the Gebhart factor from every
    /// surface to `to`.
    ///
    /// `A[i][j] = delta_ij - rho_i F_ij` and `b[i] = eps_to F_i,to`.
    pub fn build_gebhart_slae(&self, to: &str) -> NetworkResult<(DMatrix<f64>, DVector<f64>)> {
        let target = self.surface_id(to)?;
        Ok(self.gebhart_system(target))
    }

    fn gebhart_system(&self, target: SurfaceId) -> (DMatrix<f64>, DVector<f64>) {
        let n = self.surfaces.len();
        let a = DMatrix::from_fn(n, n, |i, j| {
            let reflected = self.surfaces[i].reflectivity()
                * self.view_factor_by_id(SurfaceId(i), SurfaceId(j));
            if i == j {
                1.0 - reflected
            } else {
                -reflected
            }
        });

        let emissivity = self.surfaces[target.0].emissivity();
        let b = DVector::from_fn(n, |i, _| {
            emissivity * self.view_factor_by_id(SurfaceId(i), target)
        });
        (a, b)
    }

    /// Gebhart factors between every pair of surfaces.
    ///
    /// Solves one dense system per target surface. When all surfaces share
    /// one emissivity the factors lie in [0, 1], rows of a closed enclosure
    /// sum to one and the radks are reciprocal. With differing emissivities
    /// this formulation gives none of these: factors may exceed one.
    pub fn get_grey_body_factors(&self) -> NetworkResult<FactorMap> {
        let n = self.surfaces.len();
        let mut values = DMatrix::zeros(n, n);

        for (j, surface) in self.surfaces.iter().enumerate() {
            let (a, b) = self.gebhart_system(SurfaceId(j));
            let column = solve::solve_dense(a, &b, surface.name())?;
            values.set_column(j, &column);
        }

        Ok(FactorMap::new(self.surface_names(), values))
    }

    /// Radiative conductances `eps_from A_from G_from,to`.
    pub fn get_radks(&self, gebhart: &FactorMap) -> NetworkResult<FactorMap> {
        let n = self.surfaces.len();
        let mut values = DMatrix::zeros(n, n);
        for (i, from) in self.surfaces.iter().enumerate() {
            for (j, to) in self.surfaces.iter().enumerate() {
                values[(i, j)] =
                    from.emissivity() * from.area() * gebhart.get(from.name(), to.name())?;
            }
        }
        Ok(FactorMap::new(self.surface_names(), values))
    }

    /// Compute and cache Gebhart factors and radks.
    ///
    /// The network becomes read-only. Solving again recomputes from the
    /// current connections.
    pub fn solve(&mut self) -> NetworkResult<&Solution> {
        self.verify_view_factors();
        let gebhart = self.get_grey_body_factors()?;
        let radks = self.get_radks(&gebhart)?;
        log::info!(
            "Solved network {} ({} surfaces)",
            self.name,
            self.surfaces.len()
        );
        Ok(self.solution.insert(Solution { gebhart, radks }))
    }

    /// Cached result of the last [`ThermalNetwork::solve`].
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    fn surface_names(&self) -> Vec<String> {
        self.surfaces.iter().map(|s| s.name().to_string()).collect()
    }
}
