//! Thermrad Core - radiative view factors and grey-body exchange.
//!
//! This crate provides:
//!
//! - **View factors**: the differential kernel and adaptive or fixed-rule
//!   integration between pairs of triangles
//! - **Analytic references**: closed-form factors for parallel plates
//! - **Radiation networks**: surfaces coupled by view factors, solved for
//!   Gebhart factors and radiative conductances
//! - **Enclosures**: triangle meshes grouped into surfaces
//!
//! # Example
//!
//! ```
//! use thermrad_core::{FixedViewFactor, ViewFactorMethod};
//! use thermrad_math::{SymmetricRule, Triangle};
//!
//! let floor = Triangle::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])?;
//! let ceiling = Triangle::from_coords([0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0])?;
//!
//! let method = FixedViewFactor::new(SymmetricRule::new(13)?);
//! let f = method.view_factor(&floor, &ceiling)?;
//! assert!((f - 0.115_049_228).abs() < 1e-8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analytic;
pub mod config;
pub mod enclosure;
pub mod kernel;
pub mod network;
pub mod view_factor;

// Re-export commonly used types
pub use config::{ConfigError, IntegrationConfig, NetworkSpec, Strategy};
pub use enclosure::{Enclosure, EnclosureError};
pub use kernel::{general_diff_view_factor, TrianglePairKernel};
pub use network::{FactorMap, NetworkError, ThermalNetwork};
pub use view_factor::{
    AdaptiveViewFactor, FixedViewFactor, ViewFactorError, ViewFactorMethod, ViewFactorResult,
};
