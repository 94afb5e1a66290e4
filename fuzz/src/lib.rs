use std::collections::BTreeMap;

use arbitrary::{Arbitrary, Unstructured};
use tangent_basis::{Mesh, TangentError, TangentSpace};

#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Arbitrary)]
pub enum Face {
    Triangle([usize; 3]),
    Quad([usize; 4]),
    Arbitrary(Vec<usize>),
}

impl core::ops::Deref for Face {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Triangle(inner) => &*inner,
            Self::Quad(inner) => &*inner,
            Self::Arbitrary(inner) => inner.as_slice(),
        }
    }
}

impl core::ops::DerefMut for Face {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Triangle(inner) => &mut *inner,
            Self::Quad(inner) => &mut *inner,
            Self::Arbitrary(inner) => inner.as_mut_slice(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    /// Every `set_tangent` call, keyed by corner.
    pub written: BTreeMap<(usize, usize), TangentSpace>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self, arbitrary::Error> {
        let mut value = Self {
            vertices,
            faces,
            written: BTreeMap::new(),
        };
        value.validate()?;
        Ok(value)
    }

    fn validate(&mut self) -> Result<(), arbitrary::Error> {
        let Self {
            vertices, faces, ..
        } = self;

        if vertices.is_empty() {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        for face in faces.iter_mut() {
            for vertex in face.iter_mut() {
                *vertex %= vertices.len();
            }
        }

        // Keep values where single precision is meaningful; zero is allowed.
        if vertices
            .iter()
            .flat_map(|vertex| {
                vertex
                    .position
                    .iter()
                    .copied()
                    .chain(vertex.normal)
                    .chain(vertex.tex_coord)
            })
            .any(|v| !(v == 0. || (1e-4..=1e4).contains(&v.abs())))
        {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        Ok(())
    }

    fn vertex(&self, face: usize, vert: usize) -> &Vertex {
        &self.vertices[self.faces[face][vert]]
    }

    /// The same geometry as an indexed [`Mesh`].
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(self.vertices.iter().map(|v| v.position).collect());
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        for face in &self.faces {
            mesh.add_face(face);
            for &vertex in face.iter() {
                normals.push(self.vertices[vertex].normal);
                tex_coords.push(self.vertices[vertex].tex_coord);
            }
        }
        mesh.with_normals(normals).with_tex_coords(tex_coords)
    }

    /// Checks the outcome of a generation run against the properties every
    /// result must have.
    pub fn check(&self, result: Result<(), TangentError>) {
        match result {
            Ok(()) => {
                let corners = self.faces.iter().map(|f| f.len()).sum::<usize>();
                assert_eq!(self.written.len(), corners);

                for space in self.written.values() {
                    check_space(space);
                }
            }
            Err(TangentError::UnsupportedFace { face, vertices }) => {
                assert!(self.written.is_empty());
                assert_eq!(self.faces[face].len(), vertices);
                assert!(!matches!(vertices, 3 | 4));
                assert!(self.faces[..face].iter().all(|f| matches!(f.len(), 3 | 4)));
            }
            Err(error) => panic!("unexpected error: {error}"),
        }
    }
}

/// Asserts the per-corner properties of one result.
pub fn check_space(space: &TangentSpace) {
    let tangent = space.tangent();
    assert!(tangent.iter().all(|x| x.is_finite()), "{space:?}");

    let valid = match space {
        TangentSpace::Basic(basic) => {
            assert!(basic.sign() == 1. || basic.sign() == -1.);
            tangent != [0.; 3]
        }
        TangentSpace::Full(full) => {
            assert_eq!(full.keep(), tangent != [0.; 3]);
            assert!(full.bi_tangent().iter().all(|x| x.is_finite()));
            assert!(full.tangent_magnitude() >= 0.);
            assert!(full.bi_tangent_magnitude() >= 0.);
            full.keep()
        }
    };

    if !valid {
        if let TangentSpace::Basic(basic) = space {
            assert_eq!(basic.sign(), 1.);
        }
        return;
    }

    let length = tangent.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((length - 1.).abs() < 1e-3, "{space:?}");
}

impl Arbitrary<'_> for Geometry {
    fn arbitrary(u: &mut Unstructured<'_>) -> Result<Self, arbitrary::Error> {
        Self::new(Vec::<Vertex>::arbitrary(u)?, Vec::<Face>::arbitrary(u)?)
    }
}

impl tangent_basis::Geometry for Geometry {
    fn num_faces(&self) -> usize {
        self.faces.len()
    }

    fn num_vertices_of_face(&self, face: usize) -> usize {
        self.faces[face].len()
    }

    fn position(&self, face: usize, vert: usize) -> [f32; 3] {
        self.vertex(face, vert).position
    }

    fn normal(&self, face: usize, vert: usize) -> [f32; 3] {
        self.vertex(face, vert).normal
    }

    fn tex_coord(&self, face: usize, vert: usize) -> [f32; 2] {
        self.vertex(face, vert).tex_coord
    }

    fn set_tangent(&mut self, tangent_space: TangentSpace, face: usize, vert: usize) {
        let previous = self.written.insert((face, vert), tangent_space);
        assert!(previous.is_none(), "corner ({face}, {vert}) written twice");
    }
}
