//! Parsed map data model: entities, brushes, faces and patches.
//!
//! These records are produced once by the (external) text parser and are
//! immutable afterwards. Ownership is tree-shaped: an entity owns its
//! brushes and patches, a brush owns its faces, nothing is shared.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::Plane;

/// One bounding plane of a brush, tagged with a texture identifier.
///
/// Faces with a hidden-surface texture still bound the solid; whether they
/// are rendered is decided later, by [`crate::GeometryConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    plane: Plane,
    texture: String,
}

impl Face {
    /// Creates a face from its bounding plane and texture identifier.
    pub fn new(plane: Plane, texture: impl Into<String>) -> Self {
        Self {
            plane,
            texture: texture.into(),
        }
    }

    /// Returns the bounding plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the texture identifier.
    #[inline]
    pub fn texture(&self) -> &str {
        &self.texture
    }
}

/// A convex solid defined as the intersection of its faces' inward
/// half-spaces.
///
/// Convexity and boundedness are assumed, not verified; the geometry
/// stages degrade to empty output on brushes that break the assumption.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    faces: Vec<Face>,
}

impl Brush {
    /// Creates a brush from its bounding faces.
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Returns the bounding faces, in parse order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

/// A bicubic-patch control grid, column-major, tagged with a texture
/// identifier. Patches are carried through untouched; no tessellation or
/// other geometric computation happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    control_points: Vec<Vec<Point3<f64>>>,
    texture: String,
}

impl Patch {
    /// Creates a patch from a column-major control grid and the column/row
    /// counts the map source declared for it.
    ///
    /// # Panics
    /// Panics if the grid does not match the declared dimensions, including
    /// ragged grids (columns of unequal height).
    pub fn new(
        columns: usize,
        rows: usize,
        control_points: Vec<Vec<Point3<f64>>>,
        texture: impl Into<String>,
    ) -> Self {
        assert!(
            control_points.len() == columns,
            "Patch declares {columns} columns but its grid has {}",
            control_points.len()
        );
        assert!(
            control_points.iter().all(|column| column.len() == rows),
            "Patch declares {rows} rows but its grid is ragged or mismatched"
        );
        Self {
            control_points,
            texture: texture.into(),
        }
    }

    /// Returns the control grid, column-major.
    #[inline]
    pub fn control_points(&self) -> &[Vec<Point3<f64>>] {
        &self.control_points
    }

    /// Returns the number of columns in the control grid.
    #[inline]
    pub fn columns(&self) -> usize {
        self.control_points.len()
    }

    /// Returns the number of rows in the control grid.
    #[inline]
    pub fn rows(&self) -> usize {
        self.control_points.first().map_or(0, Vec::len)
    }

    /// Returns the texture identifier.
    #[inline]
    pub fn texture(&self) -> &str {
        &self.texture
    }
}

/// The top-level parse unit: zero or more brushes, zero or more patches and
/// a string-keyed property map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    brushes: Vec<Brush>,
    patches: Vec<Patch>,
    properties: FxHashMap<String, String>,
}

impl Entity {
    /// Creates an entity from parser output.
    pub fn new(
        brushes: Vec<Brush>,
        patches: Vec<Patch>,
        properties: FxHashMap<String, String>,
    ) -> Self {
        Self {
            brushes,
            patches,
            properties,
        }
    }

    /// Returns the entity's brushes, in parse order.
    #[inline]
    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    /// Returns the entity's patches, in parse order.
    #[inline]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Returns the property map.
    #[inline]
    pub fn properties(&self) -> &FxHashMap<String, String> {
        &self.properties
    }

    /// Looks up a single property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns the `"classname"` property, which every well-formed entity
    /// carries (e.g. `worldspawn`, `info_player_start`).
    pub fn class_name(&self) -> Option<&str> {
        self.property("classname")
    }
}
