use alloc::vec::Vec;
use core::ops::Range;

use crate::{Geometry, Ops, TangentError};

/// Maps faces to contiguous ranges of corner indices.
///
/// Corner indices follow face order, so corner `offsets[f] + v` is vertex `v`
/// of face `f`.
pub(crate) struct CornerTable {
    /// Prefix sum of face arities, with one trailing entry holding the total.
    offsets: Vec<usize>,
}

impl CornerTable {
    /// Builds the table, rejecting the first face which is not a triangle or a quad.
    pub(crate) fn build<I: Geometry<O>, O: Ops>(context: &I) -> Result<Self, TangentError> {
        Self::from_arities((0..context.num_faces()).map(|f| context.num_vertices_of_face(f)))
    }

    pub(crate) fn from_arities(
        arities: impl ExactSizeIterator<Item = usize>,
    ) -> Result<Self, TangentError> {
        let mut offsets = Vec::with_capacity(arities.len() + 1);
        offsets.push(0);

        let mut total = 0;
        for (face, vertices) in arities.enumerate() {
            if !matches!(vertices, 3 | 4) {
                return Err(TangentError::UnsupportedFace { face, vertices });
            }
            total += vertices;
            offsets.push(total);
        }

        Ok(Self { offsets })
    }

    pub(crate) fn num_faces(&self) -> usize {
        self.offsets.len() - 1
    }

    pub(crate) fn num_corners(&self) -> usize {
        self.offsets[self.num_faces()]
    }

    /// The corner indices belonging to `face`.
    pub(crate) fn range(&self, face: usize) -> Range<usize> {
        self.offsets[face]..self.offsets[face + 1]
    }

    /// Iterates `(face, vert)` for every corner, in corner index order.
    pub(crate) fn face_vertices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_faces()).flat_map(move |f| (0..self.range(f).len()).map(move |v| (f, v)))
    }
}
