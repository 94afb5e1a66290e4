//! Properties which must hold for any mesh made of triangles and quads.

mod common;

use common::*;
use tangent_basis::{Mesh, Mode, QuadSplit, TangentAttributes, TangentOptions};

fn basic(mesh: &Mesh, quad_split: QuadSplit) -> (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<f32>) {
    let options = TangentOptions::basic().with_quad_split(quad_split);
    match mesh.compute_tangents(&options).unwrap() {
        TangentAttributes::Basic {
            tangent_u,
            tangent_v,
            sign,
        } => (tangent_u, tangent_v, sign),
        other => panic!("expected basic attributes; found {:?}", other.mode()),
    }
}

fn full(mesh: &Mesh, quad_split: QuadSplit) -> (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<i32>) {
    let options = TangentOptions::full().with_quad_split(quad_split);
    match mesh.compute_tangents(&options).unwrap() {
        TangentAttributes::Full {
            tangent_u,
            tangent_v,
            keep,
            ..
        } => (tangent_u, tangent_v, keep),
        other => panic!("expected full attributes; found {:?}", other.mode()),
    }
}

/// Rebuilds `mesh` with its faces in reverse order, returning the corner
/// permutation from the new mesh to the old one.
fn reversed(mesh: &Mesh) -> (Mesh, Vec<usize>) {
    let normals = mesh.normals().unwrap();
    let tex_coords = mesh.tex_coords().unwrap();

    let mut rebuilt = Mesh::new(mesh.points().to_vec());
    let mut permutation = Vec::new();
    for face in (0..mesh.num_faces()).rev() {
        let corners = mesh.face_corners(face);
        rebuilt.add_face(&mesh.corner_points()[corners.clone()]);
        permutation.extend(corners);
    }

    let rebuilt = rebuilt
        .with_normals(permutation.iter().map(|&c| normals[c]).collect())
        .with_tex_coords(permutation.iter().map(|&c| tex_coords[c]).collect());

    (rebuilt, permutation)
}

macro_rules! generate_tests {
    () => {};
    ($name:ident: $mesh:expr, $($rest:tt)*) => {
        mod $name {
            use super::*;

            const SPLITS: [QuadSplit; 3] = [QuadSplit::Fixed02, QuadSplit::Fixed13, QuadSplit::Shortest];

            #[test]
            fn one_result_per_corner() {
                init_logger();
                let mesh = $mesh;
                for mode in [Mode::Basic, Mode::Full] {
                    let output = mesh
                        .compute_tangents(&TangentOptions::default().with_mode(mode))
                        .unwrap();
                    assert_eq!(output.mode(), mode);
                    assert_eq!(output.len(), mesh.num_corners());
                    assert_eq!(output.tangent_v().len(), mesh.num_corners());
                }
            }

            #[test]
            fn tangents_are_orthonormal_to_normals() {
                let mesh = $mesh;
                let normals = mesh.normals().unwrap();
                for split in SPLITS {
                    let (tangents, _, keep) = full(&mesh, split);
                    for ((tangent, normal), keep) in tangents.iter().zip(normals).zip(keep) {
                        if keep == 0 {
                            continue;
                        }
                        assert!(dot(*tangent, normalize(*normal)).abs() < 1e-5);
                        assert!((length(*tangent) - 1.).abs() < 1e-5);
                    }
                }
            }

            #[test]
            fn sign_is_unit() {
                let mesh = $mesh;
                for split in SPLITS {
                    let (_, _, sign) = basic(&mesh, split);
                    assert!(sign.iter().all(|&s| s == 1. || s == -1.));
                }
            }

            #[test]
            fn modes_agree() {
                let mesh = $mesh;
                for split in SPLITS {
                    let (basic_tangents, basic_bi_tangents, _) = basic(&mesh, split);
                    let (full_tangents, full_bi_tangents, keep) = full(&mesh, split);

                    assert_eq!(basic_tangents, full_tangents);

                    for i in 0..keep.len() {
                        if keep[i] == 0 || length(full_bi_tangents[i]) == 0. {
                            continue;
                        }
                        // With unit normals the derived bi-tangent is the
                        // orthonormalized one.
                        assert_close(basic_bi_tangents[i], full_bi_tangents[i], 1e-4);
                    }
                }
            }

            #[test]
            fn face_order_does_not_matter() {
                let mesh = $mesh;
                let (reordered, permutation) = reversed(&mesh);
                for split in SPLITS {
                    let (tangents, bi_tangents, keep) = full(&mesh, split);
                    let (reordered_tangents, reordered_bi_tangents, reordered_keep) = full(&reordered, split);

                    for (new, &old) in permutation.iter().enumerate() {
                        assert_close(reordered_tangents[new], tangents[old], 1e-6);
                        assert_close(reordered_bi_tangents[new], bi_tangents[old], 1e-6);
                        assert_eq!(reordered_keep[new], keep[old]);
                    }
                }
            }
        }

        generate_tests! {
            $($rest)*
        }
    };
}

generate_tests! {
    unit_square: unit_square(),
    grid: grid(5),
    cylinder: cylinder(12),
    mixed: mixed(),
}
