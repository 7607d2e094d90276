//! Face-point assembly: recovering boundary polygons from a brush's planes.
//!
//! The boundary vertices of a convex polyhedron are exactly the triple-plane
//! intersections that no other bounding plane excludes - the standard
//! half-space-to-vertex dual construction. Enumeration is brute force,
//! O(n³) in the face count; brushes run single-digit to low-double-digit
//! faces, so anything cleverer would only risk changing the collected
//! point set.

use log::debug;
use nalgebra::Point3;

use crate::{Brush, Plane, Winding};

/// Computes the boundary winding of every face of `brush`.
///
/// The returned vector is parallel to `brush.faces()`. A `None` entry means
/// the face contributes no polygon: a redundant plane that never binds the
/// solid, or a brush too degenerate to have a boundary at all. Malformed
/// brushes (fewer than four faces, or no valid intersections) degrade to
/// all-`None` rather than failing, so one bad brush never takes out the
/// rest of a map.
///
/// Each surviving intersection point registers with all three faces that
/// produced it - a vertex belongs to every face it lies on. Coincident
/// duplicates from different triples are left in here and coalesced when
/// the winding is ordered.
pub fn face_windings(brush: &Brush, tolerance: f64) -> Vec<Option<Winding>> {
    let faces = brush.faces();
    let n = faces.len();
    if n < 4 {
        debug!("brush with {n} faces cannot bound a solid, producing no geometry");
    }

    // Pass 1: intersect every unordered face triple, keep the points no
    // other face of the brush excludes, and count points per face.
    let mut points: Vec<Point3<f64>> = Vec::new();
    let mut triples: Vec<[usize; 3]> = Vec::new();
    let mut counts = vec![0usize; n];

    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let Some(point) = Plane::intersection(
                    faces[i].plane(),
                    faces[j].plane(),
                    faces[k].plane(),
                    tolerance,
                ) else {
                    // Parallel or linearly dependent normals: no vertex here
                    continue;
                };
                if faces.iter().any(|f| f.plane().is_outside(point, tolerance)) {
                    // Outside the solid, not a real vertex
                    continue;
                }
                points.push(point);
                triples.push([i, j, k]);
                counts[i] += 1;
                counts[j] += 1;
                counts[k] += 1;
            }
        }
    }

    // Pass 2: fill pre-sized per-face point lists.
    let mut per_face: Vec<Vec<Point3<f64>>> =
        counts.iter().map(|&c| Vec::with_capacity(c)).collect();
    for (point, triple) in points.iter().zip(&triples) {
        for &face_index in triple {
            per_face[face_index].push(*point);
        }
    }

    per_face
        .into_iter()
        .zip(faces)
        .map(|(face_points, face)| Winding::from_points(face.plane().clone(), face_points, tolerance))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{DEFAULT_TOLERANCE, Face};
    use nalgebra::Vector3;

    /// Unit cube [0,1]³ as six faces with inward-pointing normals.
    pub(crate) fn unit_cube() -> Brush {
        let lo = Point3::new(0.0, 0.0, 0.0);
        let hi = Point3::new(1.0, 1.0, 1.0);
        Brush::new(vec![
            Face::new(Plane::from_point_and_normal(lo, Vector3::x()), "base/floor"),
            Face::new(Plane::from_point_and_normal(lo, Vector3::y()), "base/floor"),
            Face::new(Plane::from_point_and_normal(lo, Vector3::z()), "base/floor"),
            Face::new(Plane::from_point_and_normal(hi, -Vector3::x()), "base/wall"),
            Face::new(Plane::from_point_and_normal(hi, -Vector3::y()), "base/wall"),
            Face::new(Plane::from_point_and_normal(hi, -Vector3::z()), "base/ceiling"),
        ])
    }

    #[test]
    fn cube_yields_four_vertices_per_face() {
        let windings = face_windings(&unit_cube(), DEFAULT_TOLERANCE);

        assert_eq!(windings.len(), 6);
        for winding in &windings {
            assert_eq!(winding.as_ref().unwrap().len(), 4);
        }
    }

    #[test]
    fn cube_windings_lie_in_their_planes() {
        let cube = unit_cube();
        let windings = face_windings(&cube, DEFAULT_TOLERANCE);

        for (winding, face) in windings.iter().zip(cube.faces()) {
            for &point in winding.as_ref().unwrap().points() {
                assert!(
                    face.plane().signed_distance(point).abs() < 1.0e-9,
                    "winding point {point} is off its face plane"
                );
            }
        }
    }

    #[test]
    fn redundant_plane_collects_no_points() {
        let mut faces = unit_cube().faces().to_vec();
        // x = 2 with inward normal: contains the whole cube, never binds it
        faces.push(Face::new(
            Plane::from_point_and_normal(Point3::new(2.0, 0.0, 0.0), -Vector3::x()),
            "base/wall",
        ));
        let windings = face_windings(&Brush::new(faces), DEFAULT_TOLERANCE);

        assert_eq!(windings.len(), 7);
        assert!(windings[6].is_none(), "redundant plane produced geometry");
        for winding in &windings[..6] {
            assert_eq!(winding.as_ref().unwrap().len(), 4);
        }
    }

    #[test]
    fn fewer_than_four_faces_degrades_to_empty() {
        let three_faces = Brush::new(unit_cube().faces()[..3].to_vec());
        let windings = face_windings(&three_faces, DEFAULT_TOLERANCE);

        assert_eq!(windings.len(), 3);
        assert!(windings.iter().all(Option::is_none));

        let no_faces = Brush::new(vec![]);
        assert!(face_windings(&no_faces, DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn near_parallel_faces_do_not_panic() {
        let mut faces = unit_cube().faces().to_vec();
        // Nearly identical to the x = 0 face, within tolerance of parallel
        faces.push(Face::new(
            Plane::from_point_and_normal(
                Point3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 5.0e-11, 0.0),
            ),
            "base/floor",
        ));
        let windings = face_windings(&Brush::new(faces), DEFAULT_TOLERANCE);

        assert_eq!(windings.len(), 7);
        // The original six faces still resolve
        for winding in &windings[..6] {
            assert!(winding.is_some());
        }
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let cube = unit_cube();
        let first = face_windings(&cube, DEFAULT_TOLERANCE);
        let second = face_windings(&cube, DEFAULT_TOLERANCE);

        assert_eq!(first, second);
    }

    #[test]
    fn tetrahedron_yields_triangles() {
        // Three axis planes plus x + y + z = 1, all normals inward
        let diagonal = Plane::from_point_and_normal(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, -1.0, -1.0),
        );
        let origin = Point3::origin();
        let brush = Brush::new(vec![
            Face::new(Plane::from_point_and_normal(origin, Vector3::x()), "t"),
            Face::new(Plane::from_point_and_normal(origin, Vector3::y()), "t"),
            Face::new(Plane::from_point_and_normal(origin, Vector3::z()), "t"),
            Face::new(diagonal, "t"),
        ]);
        let windings = face_windings(&brush, DEFAULT_TOLERANCE);

        assert_eq!(windings.len(), 4);
        for winding in &windings {
            assert_eq!(winding.as_ref().unwrap().len(), 3);
        }
    }
}
