//! Configuration for view factor integration and thermal networks.
//!
//! Both are plain structs that deserialize from JSON:
//!
//! ```json
//! { "strategy": { "method": "tensor_product", "order_xi": 10, "order_eta": 10 } }
//! ```

use serde::{Deserialize, Serialize};
use thermrad_math::{QuadratureError, SymmetricRule, TensorProductRule};
use thiserror::Error;

use crate::network::{NetworkError, ThermalNetwork};
use crate::view_factor::{AdaptiveViewFactor, FixedViewFactor, ViewFactorMethod};

/// Errors that can occur while reading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quadrature error: {0}")]
    Quadrature(#[from] QuadratureError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_abs_tol() -> f64 {
    1e-14
}

fn default_rel_tol() -> f64 {
    1e-8
}

fn default_max_subdivisions() -> usize {
    100
}

/// How triangle-pair view factors are integrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Strategy {
    /// Nested adaptive Gauss–Kronrod integration
    Adaptive {
        #[serde(default = "default_abs_tol")]
        abs_tol: f64,
        #[serde(default = "default_rel_tol")]
        rel_tol: f64,
        #[serde(default = "default_max_subdivisions")]
        max_subdivisions: usize,
    },
    /// Collapsed Gauss–Legendre product rule
    TensorProduct { order_xi: usize, order_eta: usize },
    /// Dunavant symmetric rule
    Symmetric { order: usize },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Adaptive {
            abs_tol: default_abs_tol(),
            rel_tol: default_rel_tol(),
            max_subdivisions: default_max_subdivisions(),
        }
    }
}

/// View factor integration settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    #[serde(default)]
    pub strategy: Strategy,
}

impl IntegrationConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the configured method, constructing any quadrature rule once.
    pub fn build(&self) -> ConfigResult<Box<dyn ViewFactorMethod>> {
        let method: Box<dyn ViewFactorMethod> = match self.strategy {
            Strategy::Adaptive {
                abs_tol,
                rel_tol,
                max_subdivisions,
            } => Box::new(AdaptiveViewFactor::new(abs_tol, rel_tol, max_subdivisions)),
            Strategy::TensorProduct {
                order_xi,
                order_eta,
            } => Box::new(FixedViewFactor::new(TensorProductRule::new(
                order_xi, order_eta,
            )?)),
            Strategy::Symmetric { order } => {
                Box::new(FixedViewFactor::new(SymmetricRule::new(order)?))
            }
        };
        log::debug!("Using view factor method {:?}", method);
        Ok(method)
    }
}

/// A surface entry of a [`NetworkSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub name: String,
    pub area: f64,
    pub emissivity: f64,
}

/// A directed view factor entry of a [`NetworkSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub from: String,
    pub to: String,
    pub view_factor: f64,
}

/// Declarative description of a thermal network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    #[serde(default)]
    pub surfaces: Vec<SurfaceSpec>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

impl NetworkSpec {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build(&self) -> ConfigResult<ThermalNetwork> {
        Ok(ThermalNetwork::from_spec(self)?)
    }
}
