//! Oriented triangular patches.
//!
//! A triangle is the unit of surface that every view-factor integral runs
//! over. Vertices are ordered counter-clockwise about the outward normal:
//!
//! ```text
//!   eta
//!   c
//!   | \
//!   |  \
//!   |   \
//!   a____b  xi
//! ```
//!
//! so that the parametric point `(xi, eta)` maps to
//! `(1 - xi - eta) * a + xi * b + eta * c`.

use thiserror::Error;

use crate::{about_zero, DMat2, DVec2, DVec3, Interval};

/// Errors raised by geometric constructions and queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate triangle: vertices are collinear (|ab x ac| = {magnitude:e})")]
    DegenerateGeometry { magnitude: f64 },

    #[error("Parametric coordinates ({xi}, {eta}) are outside the unit triangle")]
    OutOfDomain { xi: f64, eta: f64 },

    #[error("Degenerate intersection: {0}")]
    DegenerateIntersection(&'static str),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Where a point sits relative to a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Edge,
    Vertex,
    Outside,
}

impl PointLocation {
    /// True for every location except `Outside`.
    pub fn is_on(&self) -> bool {
        !matches!(self, PointLocation::Outside)
    }
}

/// An immutable, non-degenerate triangle in 3D space.
///
/// All derived quantities are computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    a: DVec3,
    b: DVec3,
    c: DVec3,
    /// Unnormalized normal, `(b - a) x (c - a)`
    normal: DVec3,
    /// Unit normal
    unit_normal: DVec3,
    /// `|normal|`, twice the area
    magnitude: f64,
    area: f64,
    centroid: DVec3,
}

impl Triangle {
    /// Create a triangle from three vertices in counter-clockwise order.
    ///
    /// Fails with [`GeometryError::DegenerateGeometry`] when the vertices are
    /// (numerically) collinear.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<Self> {
        let normal = (b - a).cross(c - a);
        let magnitude = normal.length();

        if about_zero(magnitude) || !magnitude.is_finite() {
            return Err(GeometryError::DegenerateGeometry { magnitude });
        }

        Ok(Self {
            a,
            b,
            c,
            normal,
            unit_normal: normal / magnitude,
            magnitude,
            area: 0.5 * magnitude,
            centroid: (a + b + c) / 3.0,
        })
    }

    /// Create a triangle from raw coordinate triples.
    pub fn from_coords(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> GeometryResult<Self> {
        Self::new(DVec3::from(a), DVec3::from(b), DVec3::from(c))
    }

    #[inline]
    pub fn a(&self) -> DVec3 {
        self.a
    }

    #[inline]
    pub fn b(&self) -> DVec3 {
        self.b
    }

    #[inline]
    pub fn c(&self) -> DVec3 {
        self.c
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Edge vectors `a -> b` and `a -> c`.
    pub fn edge_vectors(&self) -> (DVec3, DVec3) {
        (self.b - self.a, self.c - self.a)
    }

    /// Unnormalized normal (cross product of the edge vectors).
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    #[inline]
    pub fn unit_normal(&self) -> DVec3 {
        self.unit_normal
    }

    /// Length of the unnormalized normal.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[inline]
    pub fn centroid(&self) -> DVec3 {
        self.centroid
    }

    /// Map parametric coordinates to a point on the triangle's plane.
    ///
    /// No domain check is made; use [`Triangle::surface_location`] unless the
    /// coordinates are known to lie in the unit triangle.
    #[inline]
    pub fn point_at(&self, uv: DVec2) -> DVec3 {
        (1.0 - uv.x - uv.y) * self.a + uv.x * self.b + uv.y * self.c
    }

    /// Map `(xi, eta)` to the corresponding point on the triangle.
    ///
    /// Requires `xi >= 0`, `eta >= 0` and `xi + eta <= 1`.
    pub fn surface_location(&self, xi: f64, eta: f64) -> GeometryResult<DVec3> {
        let in_domain = Interval::UNIT.contains(xi)
            && Interval::UNIT.contains(eta)
            && xi + eta <= 1.0;
        if !in_domain {
            return Err(GeometryError::OutOfDomain { xi, eta });
        }
        Ok(self.point_at(DVec2::new(xi, eta)))
    }

    /// Signed distance from the triangle's plane (positive on the normal side).
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.unit_normal.dot(point - self.a)
    }

    /// Project a point onto the triangle's plane by least squares.
    ///
    /// Solves the normal equations for the edge coefficients `(s, t)`
    /// minimizing `|a + s (b - a) + t (c - a) - point|`.
    pub fn project_onto(&self, point: DVec3) -> DVec3 {
        let (e1, e2) = self.edge_vectors();
        let gram = DMat2::from_cols(
            DVec2::new(e1.dot(e1), e2.dot(e1)),
            DVec2::new(e1.dot(e2), e2.dot(e2)),
        );
        let rhs = DVec2::new(e1.dot(point - self.a), e2.dot(point - self.a));
        // The Gram matrix is invertible for any non-degenerate triangle.
        let st = gram.inverse() * rhs;
        self.a + st.x * e1 + st.y * e2
    }

    /// Classify a point against the triangle.
    ///
    /// With `project_first` the point is first projected onto the plane.
    /// Otherwise off-plane points are classified by their footprint along
    /// the normal.
    ///
    /// An edge test within [`crate::NEAR_ZERO`] of zero only counts as on the
    /// boundary when the remaining tests agree in sign, so a point on the
    /// extension of an edge beyond its end is `Outside`.
    pub fn locate(&self, point: DVec3, project_first: bool) -> PointLocation {
        let point = if project_first {
            self.project_onto(point)
        } else {
            point
        };

        let tests = [
            self.edge_side(self.a, self.b, point),
            self.edge_side(self.b, self.c, point),
            self.edge_side(self.c, self.a, point),
        ];

        let zeros = tests.iter().filter(|t| about_zero(**t)).count();
        let positive = tests.iter().any(|t| !about_zero(*t) && *t > 0.0);
        let negative = tests.iter().any(|t| !about_zero(*t) && *t < 0.0);

        if positive && negative {
            return PointLocation::Outside;
        }

        match zeros {
            0 => PointLocation::Inside,
            1 => PointLocation::Edge,
            _ => PointLocation::Vertex,
        }
    }

    /// True if the point is inside the triangle or on its boundary.
    ///
    /// Points collinear with an edge but past its ends are not on the
    /// triangle; see [`Triangle::locate`].
    pub fn point_on(&self, point: DVec3, project_first: bool) -> bool {
        self.locate(point, project_first).is_on()
    }

    /// Side of the directed edge `from -> to` that `point` falls on,
    /// measured along the unit normal.
    fn edge_side(&self, from: DVec3, to: DVec3, point: DVec3) -> f64 {
        (to - from).cross(point - from).dot(self.unit_normal)
    }
}
