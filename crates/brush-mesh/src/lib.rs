//! Brush-to-polygon surface reconstruction.
//!
//! Id-style map formats describe a convex solid (a *brush*) implicitly, as
//! the set of planes bounding it plus a texture tag per plane. This crate
//! recovers the explicit boundary: for each plane, the convex polygon that
//! is the plane's contribution to the solid's surface, as an ordered vertex
//! ring ready for fan triangulation. Bicubic-patch control grids ride along
//! untouched.
//!
//! # Example
//!
//! ```ignore
//! use brush_mesh::{brush_meshes, GeometryConfig};
//!
//! // `brush` comes from the map parser
//! let config = GeometryConfig::default();
//! for face in brush_meshes(&brush, &config)? {
//!     renderer.draw(&face.positions, &face.normal, &face.indices, &face.texture);
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`Plane`]: plane primitives and tolerant triple-plane intersection
//! - [`face_windings`]: per-face boundary points via the half-space-to-vertex
//!   dual construction
//! - [`Winding`]: circular ordering of a face's points and fan triangulation
//! - [`brush_meshes`] / [`entity_meshes`]: renderer-facing assembly with
//!   hidden-surface filtering and patch passthrough

mod brush;
mod error;
mod map;
mod mesh;
mod plane;
mod winding;

pub use brush::face_windings;
pub use error::GeometryError;
pub use map::{Brush, Entity, Face, Patch};
pub use mesh::{EntityMeshes, FaceMesh, GeometryConfig, PatchMesh, brush_meshes, entity_meshes};
pub use plane::{DEFAULT_TOLERANCE, Plane};
pub use winding::Winding;
