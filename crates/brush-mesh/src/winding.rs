//! Winding-order resolution and fan triangulation.

use std::cmp::Ordering;

use nalgebra::{Point3, Vector3};

use crate::Plane;

/// The ordered vertex ring bounding a single face's polygon.
///
/// Vertices wind clockwise when viewed from the side the face plane's
/// normal points toward. For a brush whose plane normals point into the
/// solid, that makes the ring counter-clockwise as seen from outside, so
/// triangle orientation agrees with the negated (outward) render normal
/// (see [`crate::GeometryConfig::flip_normals`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Winding {
    plane: Plane,
    points: Vec<Point3<f64>>,
}

impl Winding {
    /// Orders an unordered, coplanar point set into a vertex ring.
    ///
    /// Coincident points (within `tolerance`) are coalesced first, since
    /// more than three planes meeting at one corner produce the same vertex
    /// from several triples. Returns `None` if fewer than three distinct
    /// points remain - the face contributes no polygon, which is expected
    /// for redundant or non-binding planes.
    ///
    /// The ring starts at the first distinct input point, so the ordering is
    /// deterministic: the same input always yields the same ring.
    pub fn from_points(plane: Plane, points: Vec<Point3<f64>>, tolerance: f64) -> Option<Self> {
        let mut distinct: Vec<Point3<f64>> = Vec::with_capacity(points.len());
        for point in points {
            if !distinct.iter().any(|p| (p - point).norm() <= tolerance) {
                distinct.push(point);
            }
        }
        if distinct.len() < 3 {
            return None;
        }

        let normal = plane.normal();
        let midpoint = centroid(&distinct);
        // Anchoring the circular comparison to one fixed direction makes it
        // a strict weak ordering; comparing raw determinants alone is not
        // transitive once the points span more than half a turn.
        let reference = distinct[0] - midpoint;
        distinct.sort_by(|a, b| circular_order(&normal, &midpoint, &reference, a, b, tolerance));

        Some(Self {
            plane,
            points: distinct,
        })
    }

    /// Returns the plane this winding lies in.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the ordered boundary vertices.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consumes the winding, returning the ordered boundary vertices.
    #[inline]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// Returns the number of boundary vertices (always >= 3).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the winding has no vertices (never, for a winding
    /// produced by [`Winding::from_points`]).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fan-triangulates the ring from vertex 0: triangles `(0, i, i + 1)`
    /// for `i = 1..n-1`, giving `n - 2` triangles and `3(n - 2)` indices.
    ///
    /// Valid because a single face of a convex brush is always a convex,
    /// planar polygon.
    pub fn fan_indices(&self) -> Vec<u32> {
        let n = self.points.len() as u32;
        let mut indices = Vec::with_capacity(3 * (n as usize - 2));
        for i in 1..n - 1 {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
        indices
    }
}

/// Arithmetic mean of the points. Not the true polygon centroid, but all
/// points lie in one plane and in convex position, so the mean is interior,
/// which is all the circular comparison needs.
fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as f64)
}

/// Three-way circular comparison of `a` and `b` around `midpoint`, in the
/// plane with `normal`, anchored at the `reference` direction.
///
/// Points are ranked by the half turn they fall in (starting at `reference`,
/// clockwise as seen from the normal side) and, within a half turn, by the
/// sign of `normal · ((a - midpoint) × (b - midpoint))`: `a` precedes `b`
/// below `-tolerance`, follows above `tolerance`, and ties in between (left
/// to the stable sort). The clockwise sweep makes rings agree with the
/// negated normal handed to renderers.
fn circular_order(
    normal: &Vector3<f64>,
    midpoint: &Point3<f64>,
    reference: &Vector3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    tolerance: f64,
) -> Ordering {
    let half_a = half_turn(normal, midpoint, reference, a, tolerance);
    let half_b = half_turn(normal, midpoint, reference, b, tolerance);
    if half_a != half_b {
        return half_a.cmp(&half_b);
    }

    let det = normal.dot(&(a - midpoint).cross(&(b - midpoint)));
    if det < -tolerance {
        Ordering::Less
    } else if det > tolerance {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Which half turn around `midpoint` the point falls in: 0 for the half
/// swept clockwise from `reference`, 1 for the other.
fn half_turn(
    normal: &Vector3<f64>,
    midpoint: &Point3<f64>,
    reference: &Vector3<f64>,
    point: &Point3<f64>,
    tolerance: f64,
) -> u8 {
    let det = normal.dot(&reference.cross(&(point - midpoint)));
    if det < -tolerance {
        0
    } else if det > tolerance {
        1
    } else if reference.dot(&(point - midpoint)) >= 0.0 {
        // Collinear with the reference: same direction opens the first half
        0
    } else {
        // Opposite direction opens the second half
        1
    }
}
