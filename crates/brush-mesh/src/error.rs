//! Error taxonomy for geometry extraction.

use thiserror::Error;

/// Errors produced while extracting geometry from parsed map data.
///
/// The taxonomy is deliberately narrow: degenerate plane triples, excluded
/// intersection points, faces with too few boundary points and under-planed
/// brushes are all expected and absorbed as "no geometry for this unit".
/// Only input that cannot come from a well-formed map file is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A brush with zero faces is parser breakage, not a degenerate solid.
    #[error("brush has no faces")]
    EmptyBrush,
}
