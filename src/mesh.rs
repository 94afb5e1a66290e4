//! An index-based mesh storing attributes in flat per-corner arrays.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    Geometry, Ops, TangentAttributes, TangentError, TangentOptions, TangentSpace,
    generate_tangents_with_options, names,
};

/// Points shared by faces, with per-corner normals and texture coordinates.
///
/// Positions live on points and are shared by every corner referencing them,
/// while normals and texture coordinates are stored per corner, in face order.
/// Normals and texture coordinates are optional so that a mesh can be built
/// incrementally; their absence is reported when generating tangents.
#[derive(Clone, Debug)]
pub struct Mesh {
    points: Vec<[f32; 3]>,
    /// Prefix sum of face arities, starting at `0`.
    face_offsets: Vec<usize>,
    /// Point referenced by each corner.
    corner_points: Vec<usize>,
    normals: Option<Vec<[f32; 3]>>,
    tex_coords: Option<Vec<[f32; 2]>>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Mesh {
    pub fn new(points: Vec<[f32; 3]>) -> Self {
        Self {
            points,
            face_offsets: alloc::vec![0],
            corner_points: Vec::new(),
            normals: None,
            tex_coords: None,
        }
    }

    /// Appends a face referencing `points` in winding order, and returns its index.
    ///
    /// Faces of any arity are accepted here; only triangles and quads are
    /// accepted by [`compute_tangents`](Mesh::compute_tangents).
    pub fn add_face(&mut self, points: &[usize]) -> usize {
        self.corner_points.extend_from_slice(points);
        self.face_offsets.push(self.corner_points.len());
        self.face_offsets.len() - 2
    }

    /// Sets one normal per corner.
    pub fn with_normals(mut self, normals: Vec<[f32; 3]>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Sets one texture coordinate per corner.
    pub fn with_tex_coords(mut self, tex_coords: Vec<[f32; 2]>) -> Self {
        self.tex_coords = Some(tex_coords);
        self
    }

    pub fn num_faces(&self) -> usize {
        self.face_offsets.len() - 1
    }

    pub fn num_corners(&self) -> usize {
        self.corner_points.len()
    }

    /// The corner indices belonging to `face`.
    pub fn face_corners(&self, face: usize) -> Range<usize> {
        self.face_offsets[face]..self.face_offsets[face + 1]
    }

    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// The point referenced by each corner.
    pub fn corner_points(&self) -> &[usize] {
        &self.corner_points
    }

    pub fn normals(&self) -> Option<&[[f32; 3]]> {
        self.normals.as_deref()
    }

    pub fn tex_coords(&self) -> Option<&[[f32; 2]]> {
        self.tex_coords.as_deref()
    }

    /// Checks every precondition of [`compute_tangents`](Mesh::compute_tangents),
    /// returning the per-corner normals and texture coordinates on success.
    pub fn validate(&self) -> Result<(&[[f32; 3]], &[[f32; 2]]), TangentError> {
        let normals = self.normals().ok_or(TangentError::MissingNormals)?;
        let tex_coords = self.tex_coords().ok_or(TangentError::MissingTexCoords)?;

        let expected = self.num_corners();
        for (attribute, found) in [
            (names::NORMAL, normals.len()),
            (names::TEX_COORD, tex_coords.len()),
        ] {
            if found != expected {
                return Err(TangentError::AttributeLength {
                    attribute,
                    expected,
                    found,
                });
            }
        }

        if let Some(corner) = self
            .corner_points
            .iter()
            .position(|&point| point >= self.points.len())
        {
            return Err(TangentError::PointIndex {
                corner,
                point: self.corner_points[corner],
                points: self.points.len(),
            });
        }

        if let Some((face, vertices)) = (0..self.num_faces())
            .map(|face| (face, self.face_corners(face).len()))
            .find(|(_, vertices)| !matches!(vertices, 3 | 4))
        {
            return Err(TangentError::UnsupportedFace { face, vertices });
        }

        Ok((normals, tex_coords))
    }

    /// Generates tangent spaces for every corner using the standard library's
    /// math backend.
    #[cfg(feature = "std")]
    pub fn compute_tangents(
        &self,
        options: &TangentOptions,
    ) -> Result<TangentAttributes, TangentError> {
        self.compute_tangents_with_ops::<crate::StdOps>(options)
    }

    /// Generates tangent spaces for every corner using the math backend `O`.
    ///
    /// On failure, nothing is allocated for the outputs.
    pub fn compute_tangents_with_ops<O: Ops>(
        &self,
        options: &TangentOptions,
    ) -> Result<TangentAttributes, TangentError> {
        let (normals, tex_coords) = self
            .validate()
            .inspect_err(|error| log::warn!("{error}"))?;

        let mut cook = Cook {
            mesh: self,
            normals,
            tex_coords,
            output: TangentAttributes::with_capacity(options.mode, self.num_corners()),
        };
        generate_tangents_with_options::<_, O>(&mut cook, options)?;

        debug_assert_eq!(cook.output.len(), self.num_corners());

        Ok(cook.output)
    }
}

/// Binds a validated [`Mesh`] to the output arrays being filled.
struct Cook<'a> {
    mesh: &'a Mesh,
    normals: &'a [[f32; 3]],
    tex_coords: &'a [[f32; 2]],
    output: TangentAttributes,
}

impl Cook<'_> {
    fn corner(&self, face: usize, vert: usize) -> usize {
        self.mesh.face_offsets[face] + vert
    }
}

impl<O: Ops> Geometry<O> for Cook<'_> {
    fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    fn num_vertices_of_face(&self, face: usize) -> usize {
        self.mesh.face_corners(face).len()
    }

    fn position(&self, face: usize, vert: usize) -> [f32; 3] {
        self.mesh.points[self.mesh.corner_points[self.corner(face, vert)]]
    }

    fn normal(&self, face: usize, vert: usize) -> [f32; 3] {
        self.normals[self.corner(face, vert)]
    }

    fn tex_coord(&self, face: usize, vert: usize) -> [f32; 2] {
        self.tex_coords[self.corner(face, vert)]
    }

    fn set_tangent(&mut self, tangent_space: TangentSpace, face: usize, vert: usize) {
        // Corners are written in face order.
        debug_assert_eq!(self.output.len(), self.corner(face, vert));
        let normal = self.normals[self.corner(face, vert)];
        self.output.push(tangent_space, normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new(alloc::vec![
            [0., 0., 0.],
            [1., 0., 0.],
            [1., 1., 0.],
            [0., 1., 0.]
        ]);
        mesh.add_face(&[0, 1, 2, 3]);
        mesh
    }

    #[test]
    fn faces_index_corners() {
        let mut mesh = quad();
        assert_eq!(mesh.add_face(&[0, 1, 2]), 1);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_corners(), 7);
        assert_eq!(mesh.face_corners(0), 0..4);
        assert_eq!(mesh.face_corners(1), 4..7);
    }

    #[test]
    fn missing_normals_reported_first() {
        let mut mesh = quad();
        mesh.add_face(&[0, 1, 2, 3, 0]);
        assert_eq!(mesh.validate().err(), Some(TangentError::MissingNormals));
    }

    #[test]
    fn missing_tex_coords() {
        let mesh = quad().with_normals(alloc::vec![[0., 0., 1.]; 4]);
        assert_eq!(mesh.validate().err(), Some(TangentError::MissingTexCoords));
    }

    #[test]
    fn short_attribute() {
        let mesh = quad()
            .with_normals(alloc::vec![[0., 0., 1.]; 4])
            .with_tex_coords(alloc::vec![[0., 0.]; 3]);
        assert_eq!(
            mesh.validate().err(),
            Some(TangentError::AttributeLength {
                attribute: names::TEX_COORD,
                expected: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn dangling_point() {
        let mut mesh = quad();
        mesh.add_face(&[0, 1, 9]);
        let mesh = mesh
            .with_normals(alloc::vec![[0., 0., 1.]; 7])
            .with_tex_coords(alloc::vec![[0., 0.]; 7]);
        assert_eq!(
            mesh.validate().err(),
            Some(TangentError::PointIndex {
                corner: 6,
                point: 9,
                points: 4,
            })
        );
    }

    #[test]
    fn unsupported_face_produces_nothing() {
        let mut mesh = quad();
        mesh.add_face(&[0, 1]);
        let mesh = mesh
            .with_normals(alloc::vec![[0., 0., 1.]; 6])
            .with_tex_coords(alloc::vec![[0., 0.]; 6]);
        assert_eq!(
            mesh.compute_tangents(&TangentOptions::full()).err(),
            Some(TangentError::UnsupportedFace {
                face: 1,
                vertices: 2,
            })
        );
    }

    #[test]
    fn empty_mesh() {
        let mesh = Mesh::new(alloc::vec![])
            .with_normals(alloc::vec![])
            .with_tex_coords(alloc::vec![]);
        let output = mesh.compute_tangents(&TangentOptions::basic()).unwrap();
        assert!(output.is_empty());
        assert_eq!(output.mode(), crate::Mode::Basic);
    }
}
