//! Enclosures built from triangle elements.
//!
//! An [`Enclosure`] groups triangles into named surfaces, which may be
//! nested through subsurfaces. View factors are computed once per element
//! pair and then condensed into a [`ThermalNetwork`] with one network
//! surface per top-level surface.

use nalgebra::DMatrix;
use thermrad_math::{Triangle, NEAR_ZERO};
use thiserror::Error;

use crate::network::{NetworkError, ThermalNetwork};
use crate::view_factor::{ViewFactorError, ViewFactorMethod};

/// Errors that can occur while assembling or evaluating an enclosure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnclosureError {
    #[error("Unknown surface group {0:?}")]
    UnknownGroup(GroupId),

    #[error("Unknown element {0:?}")]
    UnknownElement(ElementId),

    #[error("Surface name already in use: {0}")]
    DuplicateName(String),

    #[error("Invalid emissivity {emissivity} for surface {name}: must lie in (0, 1]")]
    InvalidEmissivity { name: String, emissivity: f64 },

    #[error("Element view factors have not been calculated")]
    NotCalculated,

    #[error("View factor error: {0}")]
    ViewFactor(#[from] ViewFactorError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

/// Result type for enclosure operations.
pub type EnclosureResult<T> = Result<T, EnclosureError>;

/// Handle of a surface or subsurface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

/// Handle of a triangle element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Group {
    name: String,
    /// Inherited by subsurfaces
    emissivity: f64,
    parent: Option<GroupId>,
    children: Vec<GroupId>,
    elements: Vec<ElementId>,
}

/// A triangle belonging to a surface group.
#[derive(Debug, Clone)]
pub struct Element {
    pub triangle: Triangle,
    pub group: GroupId,
}

/// Triangle elements grouped into surfaces.
#[derive(Debug, Clone, Default)]
pub struct Enclosure {
    groups: Vec<Group>,
    elements: Vec<Element>,
    /// Element-to-element view factors, row = emitter
    factors: Option<DMatrix<f64>>,
}

impl Enclosure {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_group(
        &mut self,
        name: String,
        emissivity: f64,
        parent: Option<GroupId>,
    ) -> EnclosureResult<GroupId> {
        if self.groups.iter().any(|g| g.name == name) {
            return Err(EnclosureError::DuplicateName(name));
        }
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name,
            emissivity,
            parent,
            children: Vec::new(),
            elements: Vec::new(),
        });
        Ok(id)
    }

    /// Add a top-level surface. Its subsurfaces share `emissivity`, which
    /// must lie in (0, 1].
    pub fn add_surface(&mut self, name: impl Into<String>, emissivity: f64) -> EnclosureResult<GroupId> {
        let name = name.into();
        if !(emissivity > 0.0 && emissivity <= 1.0) {
            return Err(EnclosureError::InvalidEmissivity { name, emissivity });
        }
        self.insert_group(name, emissivity, None)
    }

    /// Add a subsurface whose elements count toward `parent`.
    pub fn add_subsurface(
        &mut self,
        parent: GroupId,
        name: impl Into<String>,
    ) -> EnclosureResult<GroupId> {
        let emissivity = self.group(parent)?.emissivity;
        let id = self.insert_group(name.into(), emissivity, Some(parent))?;
        self.groups[parent.0].children.push(id);
        Ok(id)
    }

    /// Add a triangle to a group. Previously calculated view factors are
    /// discarded.
    pub fn add_element(&mut self, group: GroupId, triangle: Triangle) -> EnclosureResult<ElementId> {
        self.group(group)?;
        let id = ElementId(self.elements.len());
        self.elements.push(Element { triangle, group });
        self.groups[group.0].elements.push(id);
        self.factors = None;
        Ok(id)
    }

    fn group(&self, id: GroupId) -> EnclosureResult<&Group> {
        self.groups.get(id.0).ok_or(EnclosureError::UnknownGroup(id))
    }

    pub fn group_name(&self, id: GroupId) -> EnclosureResult<&str> {
        Ok(&self.group(id)?.name)
    }

    pub fn element(&self, id: ElementId) -> EnclosureResult<&Element> {
        self.elements
            .get(id.0)
            .ok_or(EnclosureError::UnknownElement(id))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements of a group and all of its subsurfaces.
    pub fn elements_of(&self, id: GroupId) -> EnclosureResult<Vec<ElementId>> {
        let group = self.group(id)?;
        let mut all = group.elements.clone();
        for &child in &group.children {
            all.extend(self.elements_of(child)?);
        }
        Ok(all)
    }

    /// Total area of a group, including subsurfaces.
    pub fn area_of(&self, id: GroupId) -> EnclosureResult<f64> {
        Ok(self
            .elements_of(id)?
            .iter()
            .map(|e| self.elements[e.0].triangle.area())
            .sum())
    }

    /// The top-level surface a group belongs to.
    fn root_of(&self, mut id: GroupId) -> GroupId {
        while let Some(parent) = self.groups[id.0].parent {
            id = parent;
        }
        id
    }

    /// Compute the view factor for every pair of elements.
    ///
    /// Each unordered pair is integrated once; the reverse factor follows
    /// from reciprocity. Pairs where either triangle lies entirely on or
    /// behind the other's plane cannot exchange radiation and are skipped.
    pub fn calculate_view_factors(&mut self, method: &dyn ViewFactorMethod) -> EnclosureResult<()> {
        let n = self.elements.len();
        let mut factors = DMatrix::zeros(n, n);
        let mut culled = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                let from = &self.elements[i].triangle;
                let to = &self.elements[j].triangle;
                if !faces_each_other(from, to) {
                    culled += 1;
                    continue;
                }
                let f = method.view_factor(from, to)?;
                factors[(i, j)] = f;
                factors[(j, i)] = f * from.area() / to.area();
            }
        }

        log::info!(
            "Calculated view factors for {} elements ({} of {} pairs culled)",
            n,
            culled,
            n * n.saturating_sub(1) / 2
        );
        self.factors = Some(factors);
        Ok(())
    }

    fn factors(&self) -> EnclosureResult<&DMatrix<f64>> {
        self.factors.as_ref().ok_or(EnclosureError::NotCalculated)
    }

    pub fn element_view_factor(&self, from: ElementId, to: ElementId) -> EnclosureResult<f64> {
        self.element(from)?;
        self.element(to)?;
        Ok(self.factors()?[(from.0, to.0)])
    }

    /// Sum of all view factors leaving an element.
    pub fn element_total(&self, id: ElementId) -> EnclosureResult<f64> {
        self.element(id)?;
        Ok(self.factors()?.row(id.0).sum())
    }

    /// Condense element view factors into a network of top-level surfaces.
    ///
    /// Each element pair contributes `A_i F_ij / A_surface` to the view
    /// factor between the surfaces owning the two elements. Top-level
    /// surfaces without any elements are left out of the network.
    pub fn to_network(&self, name: impl Into<String>) -> EnclosureResult<ThermalNetwork> {
        let factors = self.factors()?;
        let mut network = ThermalNetwork::new(name);

        let mut surface_area = vec![0.0; self.groups.len()];
        for (id, group) in self.groups.iter().enumerate() {
            if group.parent.is_some() {
                continue;
            }
            if self.elements_of(GroupId(id))?.is_empty() {
                log::warn!("Surface {} has no elements; skipped", group.name);
                continue;
            }
            let area = self.area_of(GroupId(id))?;
            network.add_surface(group.name.clone(), area, group.emissivity)?;
            surface_area[id] = area;
        }

        let owners: Vec<GroupId> = self.elements.iter().map(|e| self.root_of(e.group)).collect();
        let n = self.elements.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let f = factors[(i, j)];
                if f == 0.0 {
                    continue;
                }
                let (si, sj) = (owners[i], owners[j]);
                let mut partial = self.elements[i].triangle.area() * f / surface_area[si.0];
                if si == sj {
                    // Both directions land on the same self-connection
                    partial *= 2.0;
                }
                network.add_connection(&self.groups[si.0].name, &self.groups[sj.0].name, partial)?;
            }
        }

        Ok(network)
    }
}

/// True if each triangle has some part strictly in front of the other.
fn faces_each_other(a: &Triangle, b: &Triangle) -> bool {
    let in_front = |plane: &Triangle, other: &Triangle| {
        other
            .vertices()
            .iter()
            .any(|&v| plane.signed_distance(v) > NEAR_ZERO)
    };
    in_front(a, b) && in_front(b, a)
}
