use std::collections::HashMap;

use nalgebra::DMatrix;

use super::{NetworkError, NetworkResult};

/// Dense from/to map of factors between named surfaces.
///
/// Rows are the emitting surface, columns the receiving one, both in the
/// network's surface order.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorMap {
    names: Vec<String>,
    index: HashMap<String, usize>,
    values: DMatrix<f64>,
}

impl FactorMap {
    pub(crate) fn new(names: Vec<String>, values: DMatrix<f64>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names,
            index,
            values,
        }
    }

    fn position(&self, name: &str) -> NetworkResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownSurface(name.to_string()))
    }

    pub fn get(&self, from: &str, to: &str) -> NetworkResult<f64> {
        Ok(self.values[(self.position(from)?, self.position(to)?)])
    }

    /// All factors leaving `from`, paired with the receiving surface.
    pub fn row(&self, from: &str) -> NetworkResult<Vec<(&str, f64)>> {
        let i = self.position(from)?;
        Ok(self
            .names
            .iter()
            .zip(self.values.row(i).iter())
            .map(|(name, &value)| (name.as_str(), value))
            .collect())
    }

    /// Sum of all factors leaving `from`.
    pub fn row_sum(&self, from: &str) -> NetworkResult<f64> {
        Ok(self.values.row(self.position(from)?).sum())
    }

    /// Every `(from, to, factor)` entry in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.names.iter().enumerate().flat_map(move |(i, from)| {
            self.names
                .iter()
                .enumerate()
                .map(move |(j, to)| (from.as_str(), to.as_str(), self.values[(i, j)]))
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
