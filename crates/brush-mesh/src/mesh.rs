//! Renderer-facing mesh assembly.
//!
//! Turns brushes into per-face vertex rings with normals and fan indices,
//! applies the hidden-surface filter, and hands patches through untouched.
//! This is the boundary the rendering collaborator consumes; nothing here
//! touches files or global state.

use log::warn;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::{Brush, DEFAULT_TOLERANCE, Entity, GeometryError, face_windings};

/// Configuration for geometry extraction.
#[derive(Debug, Clone)]
pub struct GeometryConfig {
    /// Tolerance for all geometric comparisons: parallelism detection,
    /// half-space containment and point coalescing.
    pub tolerance: f64,
    /// Texture identifiers whose faces still bound the solid but are never
    /// handed to the renderer (caulk, clip and similar tool textures).
    pub hidden_surfaces: FxHashSet<String>,
    /// Emit each face normal negated, so it points out of the solid rather
    /// than along the face plane's (inward) normal. This is the renderer's
    /// lighting convention, not a geometric property, hence the single
    /// configurable flip.
    pub flip_normals: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            hidden_surfaces: [
                "common/caulk",
                "common/clip",
                "common/donotenter",
                "common/hint",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            flip_normals: true,
        }
    }
}

/// Renderable polygon for a single brush face: an ordered vertex ring, one
/// normal shared by every vertex of the face, fan-triangulation indices and
/// the originating texture identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMesh {
    /// Boundary vertices in winding order.
    pub positions: Vec<Point3<f64>>,
    /// Constant across the face; renderers replicate it per vertex.
    pub normal: Vector3<f64>,
    /// Fan-triangulation index list, `3(n - 2)` entries for `n` vertices.
    pub indices: Vec<u32>,
    /// Texture identifier, unresolved.
    pub texture: String,
}

impl FaceMesh {
    /// Returns the number of triangles in the fan.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A patch handed through to the renderer: the raw column-major control
/// grid and texture identifier, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchMesh {
    /// Control grid, column-major, exactly as parsed.
    pub control_points: Vec<Vec<Point3<f64>>>,
    /// Texture identifier, unresolved.
    pub texture: String,
}

/// Everything an entity contributes to the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityMeshes {
    pub faces: Vec<FaceMesh>,
    pub patches: Vec<PatchMesh>,
}

/// Reconstructs the renderable faces of one brush.
///
/// Windings are computed for every face, hidden-surface faces included -
/// they still bound the solid - but hidden faces and faces that resolve to
/// no polygon are omitted from the output.
///
/// # Errors
/// [`GeometryError::EmptyBrush`] for a brush with zero faces; that is
/// parser breakage rather than a degenerate solid, and is rejected instead
/// of silently producing nothing.
pub fn brush_meshes(
    brush: &Brush,
    config: &GeometryConfig,
) -> Result<Vec<FaceMesh>, GeometryError> {
    if brush.faces().is_empty() {
        return Err(GeometryError::EmptyBrush);
    }

    let meshes = face_windings(brush, config.tolerance)
        .into_iter()
        .zip(brush.faces())
        .filter_map(|(winding, face)| {
            let winding = winding?;
            if config.hidden_surfaces.contains(face.texture()) {
                return None;
            }
            let normal = if config.flip_normals {
                -winding.plane().normal()
            } else {
                winding.plane().normal()
            };
            Some(FaceMesh {
                indices: winding.fan_indices(),
                positions: winding.into_points(),
                normal,
                texture: face.texture().to_owned(),
            })
        })
        .collect();

    Ok(meshes)
}

/// Reconstructs everything an entity contributes to the renderer.
///
/// Brushes are independent of each other, so they are reconstructed in
/// parallel; output order still follows parse order. A brush that fails is
/// logged and skipped - one bad brush must not keep the rest of the map
/// from rendering. Patches are passed through unmodified.
pub fn entity_meshes(entity: &Entity, config: &GeometryConfig) -> EntityMeshes {
    let faces = entity
        .brushes()
        .par_iter()
        .enumerate()
        .flat_map_iter(|(index, brush)| match brush_meshes(brush, config) {
            Ok(meshes) => meshes,
            Err(err) => {
                warn!("skipping brush {index}: {err}");
                Vec::new()
            }
        })
        .collect();

    let patches = entity
        .patches()
        .iter()
        .map(|patch| PatchMesh {
            control_points: patch.control_points().to_vec(),
            texture: patch.texture().to_owned(),
        })
        .collect();

    EntityMeshes { faces, patches }
}
