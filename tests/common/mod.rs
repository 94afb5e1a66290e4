#![allow(dead_code)]

use core::f32::consts::TAU;

use tangent_basis::Mesh;

/// Builds a [`Mesh`] from shared points and faces, evaluating per-corner
/// attributes with `normal` and `uv`, both called with `(face, vert, point)`.
pub fn build(
    points: Vec<[f32; 3]>,
    faces: &[&[usize]],
    normal: impl Fn(usize, usize, usize) -> [f32; 3],
    uv: impl Fn(usize, usize, usize) -> [f32; 2],
) -> Mesh {
    let mut mesh = Mesh::new(points);
    let mut normals = Vec::new();
    let mut tex_coords = Vec::new();
    for (f, face) in faces.iter().enumerate() {
        mesh.add_face(face);
        for (v, &p) in face.iter().enumerate() {
            normals.push(normal(f, v, p));
            tex_coords.push(uv(f, v, p));
        }
    }
    mesh.with_normals(normals).with_tex_coords(tex_coords)
}

/// The unit square in the XY plane, mapped to the unit texture.
pub fn unit_square() -> Mesh {
    let points = vec![[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]];
    build(
        points.clone(),
        &[&[0, 1, 2, 3]],
        |_, _, _| [0., 0., 1.],
        |_, _, p| [points[p][0], points[p][1]],
    )
}

/// `n * n` quads over the unit square, sharing points.
pub fn grid(n: usize) -> Mesh {
    let index = |x: usize, y: usize| y * (n + 1) + x;
    let points = (0..=n)
        .flat_map(|y| (0..=n).map(move |x| [x as f32 / n as f32, y as f32 / n as f32, 0.]))
        .collect::<Vec<_>>();
    let faces = (0..n)
        .flat_map(|y| {
            (0..n).map(move |x| {
                [
                    index(x, y),
                    index(x + 1, y),
                    index(x + 1, y + 1),
                    index(x, y + 1),
                ]
            })
        })
        .collect::<Vec<_>>();
    let faces = faces.iter().map(|f| &f[..]).collect::<Vec<_>>();

    build(
        points.clone(),
        &faces,
        |_, _, _| [0., 0., 1.],
        |_, _, p| [points[p][0], points[p][1]],
    )
}

/// An open unit cylinder along `+Z` with smooth radial normals and a texture
/// seam at `θ = 0`.
pub fn cylinder(segments: usize) -> Mesh {
    let angle = |i: usize| i as f32 / segments as f32 * TAU;
    let points = (0..2)
        .flat_map(|z| {
            (0..segments).map(move |i| {
                let (sin, cos) = angle(i).sin_cos();
                [cos, sin, z as f32]
            })
        })
        .collect::<Vec<_>>();
    let faces = (0..segments)
        .map(|i| {
            let j = (i + 1) % segments;
            [i, j, segments + j, segments + i]
        })
        .collect::<Vec<_>>();
    let faces = faces.iter().map(|f| &f[..]).collect::<Vec<_>>();

    build(
        points.clone(),
        &faces,
        |_, _, p| [points[p][0], points[p][1], 0.],
        |f, v, _| {
            let u = match v {
                0 | 3 => f,
                _ => f + 1,
            };
            let v = match v {
                0 | 1 => 0.,
                _ => 1.,
            };
            [u as f32 / segments as f32, v]
        },
    )
}

/// Index of the face in [`mixed`] whose texture coordinates all coincide.
pub const MIXED_DEGENERATE_FACE: usize = 1;

/// Triangles and quads with assorted problems: a triangle with coincident
/// texture coordinates, a non-planar quad and a mirrored triangle.
pub fn mixed() -> Mesh {
    let points = vec![
        [0., 0., 0.],
        [1., 0., 0.],
        [1., 1., 0.],
        [0., 1., 0.],
        [2., 0., 0.],
        [2., 1., 0.3],
        [3., 0., 0.],
    ];
    let faces: &[&[usize]] = &[&[0, 1, 3], &[1, 2, 3], &[1, 4, 5, 2], &[4, 6, 5]];

    build(
        points.clone(),
        faces,
        |_, _, _| [0., 0., 1.],
        |f, _, p| match f {
            MIXED_DEGENERATE_FACE => [0.25, 0.25],
            // mirrored in u
            3 => [-points[p][0], points[p][1]],
            _ => [points[p][0], points[p][1]],
        },
    )
}

pub fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn length(a: [f32; 3]) -> f32 {
    dot(a, a).sqrt()
}

pub fn normalize(a: [f32; 3]) -> [f32; 3] {
    let l = length(a);
    a.map(|x| x / l)
}

pub fn assert_close(actual: [f32; 3], expected: [f32; 3], tolerance: f32) {
    let distance = length([
        actual[0] - expected[0],
        actual[1] - expected[1],
        actual[2] - expected[2],
    ]);
    assert!(
        distance <= tolerance,
        "expected {expected:?}; found {actual:?}"
    );
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
