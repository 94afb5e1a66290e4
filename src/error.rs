use thiserror::Error;

/// Error returned when the input geometry does not meet the preconditions for
/// tangent generation.
///
/// Degenerate geometry (zero-area texture triangles, zero-length normals,
/// tangents parallel to the normal) is never reported here: such corners are
/// resolved locally with fallback values.
/// When an error is returned, no tangent has been written.
#[derive(Error, Clone, PartialEq, Debug)]
// Reserving the right to introduce new error variants in the future.
#[non_exhaustive]
pub enum TangentError {
    /// The mesh carries no per-corner normals.
    #[error("invalid source: no vertex normals")]
    MissingNormals,
    /// The mesh carries no per-corner texture coordinates.
    #[error("invalid source: no vertex uvs")]
    MissingTexCoords,
    /// A per-corner attribute array does not hold one entry per corner.
    #[error("invalid source: attribute `{attribute}` has {found} entries, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        found: usize,
    },
    /// A corner references a point which does not exist.
    #[error("invalid source: corner {corner} references point {point}, but there are only {points} points")]
    PointIndex {
        corner: usize,
        point: usize,
        points: usize,
    },
    /// A face is neither a triangle nor a quad.
    #[error("invalid source: face {face} has {vertices} vertices, only quads and triangles allowed")]
    UnsupportedFace { face: usize, vertices: usize },
}
