//! Plane representation and triple-plane intersection.

use nalgebra::{Point3, Vector3};

/// Default tolerance for geometric comparisons.
///
/// A single constant governs parallelism detection, half-space containment
/// and plane equality. Every tolerance-sensitive operation also has a
/// variant taking the tolerance explicitly, since it decides how
/// near-degenerate brushes are handled.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-10;

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane {
    /// Creates a plane through `point` with the given normal, which need
    /// not be unit length.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Creates a plane from three non-collinear points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Collinearity is the caller's responsibility; see [`Plane::try_from_points`]
    /// for a checked variant.
    ///
    /// # Panics
    /// Panics if the points are collinear (or nearly so).
    pub fn from_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        let ab = b - a;
        let ac = c - a;
        Self::from_point_and_normal(a, ab.cross(&ac))
    }

    /// Creates a plane from three points, returning `None` if they are
    /// collinear within `tolerance`.
    pub fn try_from_points(
        a: Point3<f64>,
        b: Point3<f64>,
        c: Point3<f64>,
        tolerance: f64,
    ) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let norm = normal.norm();
        if norm <= tolerance {
            return None;
        }
        let unit_normal = normal / norm;
        Some(Self {
            offset: unit_normal.dot(&a.coords),
            normal: unit_normal,
        })
    }

    /// The plane's unit normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// How far the plane sits from the origin, measured along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signed distance from `point` to the plane: positive on the normal's
    /// side, negative on the other, zero on the plane itself.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Half-space containment test: `true` when `point` lies strictly on the
    /// far side of the plane from the normal, beyond `tolerance`.
    ///
    /// Points exactly on the plane (within tolerance) are not outside.
    #[inline]
    pub fn is_outside(&self, point: Point3<f64>, tolerance: f64) -> bool {
        self.signed_distance(point) < -tolerance
    }

    /// Checks whether two planes coincide: normals and offsets equal within
    /// `tolerance`.
    pub fn approx_eq(&self, other: &Plane, tolerance: f64) -> bool {
        (self.normal - other.normal).norm() <= tolerance
            && (self.offset - other.offset).abs() <= tolerance
    }

    /// The same plane facing the other way: normal and offset negated.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Computes the unique point lying on all three planes.
    ///
    /// Returns `None` when any two planes are parallel or the three normals
    /// are linearly dependent: the determinant of the normal matrix is
    /// within `tolerance` of zero. Solved in triple-product form,
    /// `x = (d₁(n₂ × n₃) + d₂(n₃ × n₁) + d₃(n₁ × n₂)) / det`.
    pub fn intersection(a: &Plane, b: &Plane, c: &Plane, tolerance: f64) -> Option<Point3<f64>> {
        let bc = b.normal.cross(&c.normal);
        let det = a.normal.dot(&bc);
        if det.abs() <= tolerance {
            return None;
        }
        let ca = c.normal.cross(&a.normal);
        let ab = a.normal.cross(&b.normal);
        let point = (bc * a.offset + ca * b.offset + ab * c.offset) / det;
        Some(Point3::from(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_right_hand_rule() {
        // XY plane walked counter-clockwise from +Z: normal is +Z
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(plane.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.offset(), 0.0);
    }

    #[test]
    fn try_from_points_rejects_collinear() {
        let result = Plane::try_from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            DEFAULT_TOLERANCE,
        );
        assert!(result.is_none());
    }

    #[test]
    fn signed_distance_sides() {
        let plane = Plane::from_point_and_normal(
            Point3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        assert_relative_eq!(plane.signed_distance(Point3::new(5.0, 5.0, 3.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(0.0, 0.0, 0.0)), -1.0);
        assert!(plane.is_outside(Point3::new(0.0, 0.0, 0.0), DEFAULT_TOLERANCE));
        assert!(!plane.is_outside(Point3::new(0.0, 0.0, 1.0), DEFAULT_TOLERANCE));
    }

    #[test]
    fn on_plane_point_is_not_outside() {
        let plane = Plane::from_point_and_normal(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        // Marginally behind the plane, but within tolerance
        let point = Point3::new(1.0 - 1.0e-12, 3.0, -2.0);
        assert!(!plane.is_outside(point, DEFAULT_TOLERANCE));
    }

    #[test]
    fn intersection_of_axis_planes() {
        let x = Plane::from_point_and_normal(Point3::new(2.0, 0.0, 0.0), Vector3::x());
        let y = Plane::from_point_and_normal(Point3::new(0.0, 3.0, 0.0), Vector3::y());
        let z = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 4.0), Vector3::z());

        let point = Plane::intersection(&x, &y, &z, DEFAULT_TOLERANCE).unwrap();
        assert_relative_eq!(point, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn intersection_parallel_planes() {
        let a = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 0.0), Vector3::x());
        let b = Plane::from_point_and_normal(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        let c = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 0.0), Vector3::y());

        assert!(Plane::intersection(&a, &b, &c, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn intersection_near_parallel_within_tolerance() {
        // Normals differ by less than the tolerance: treated as parallel
        let a = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 0.0), Vector3::x());
        let b = Plane::from_point_and_normal(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 5.0e-11, 0.0),
        );
        let c = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 0.0), Vector3::z());

        assert!(Plane::intersection(&a, &b, &c, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn approx_eq_and_flipped() {
        let a = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 1.0), Vector3::z());
        let b = Plane::from_points(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        assert!(a.approx_eq(&b, DEFAULT_TOLERANCE));
        assert!(!a.approx_eq(&a.flipped(), DEFAULT_TOLERANCE));
        assert_relative_eq!(a.flipped().normal(), Vector3::new(0.0, 0.0, -1.0));
    }
}
