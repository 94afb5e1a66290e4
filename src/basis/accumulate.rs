//! Per-face accumulation of unnormalized tangent and bi-tangent contributions.

use alloc::{vec, vec::Vec};
use core::cmp::Ordering;

use super::corner::CornerTable;
use crate::{Geometry, QuadSplit, TangentOptions, math::*};

/// Running sums for a single corner.
pub(super) struct Accumulator<O: Ops> {
    /// Sum of `∂p/∂u` over the triangles touching this corner.
    pub(super) s: Vec3<O>,
    /// Sum of `∂p/∂v` over the triangles touching this corner.
    pub(super) t: Vec3<O>,
    /// Number of non-degenerate triangles which contributed.
    pub(super) contributions: u8,
}

impl<O: Ops> Copy for Accumulator<O> {}

impl<O: Ops> Clone for Accumulator<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Ops> Accumulator<O> {
    pub(super) const ZERO: Self = Self {
        s: Vec3::ZERO,
        t: Vec3::ZERO,
        contributions: 0,
    };

    fn add(&mut self, contribution: TriangleDerivatives<O>) {
        self.s += contribution.s;
        self.t += contribution.t;
        self.contributions += 1;
    }
}

/// Unnormalized first order derivatives of position over one triangle.
pub(super) struct TriangleDerivatives<O: Ops> {
    pub(super) s: Vec3<O>,
    pub(super) t: Vec3<O>,
}

impl<O: Ops> Copy for TriangleDerivatives<O> {}

impl<O: Ops> Clone for TriangleDerivatives<O> {
    fn clone(&self) -> Self {
        *self
    }
}

/// Result of accumulating every face of a mesh.
pub(super) struct Accumulation<O: Ops> {
    /// One accumulator per corner, in corner index order.
    pub(super) corners: Vec<Accumulator<O>>,
    /// Triangles which were skipped as degenerate in texture space.
    pub(super) degenerate_triangles: usize,
}

const TRIANGLE: &[[usize; 3]] = &[[0, 1, 2]];
const QUAD_02: &[[usize; 3]] = &[[0, 1, 2], [0, 2, 3]];
const QUAD_13: &[[usize; 3]] = &[[0, 1, 3], [1, 2, 3]];

pub(super) fn accumulate<I: Geometry<O>, O: Ops>(
    context: &I,
    table: &CornerTable,
    options: &TangentOptions,
) -> Accumulation<O> {
    let mut corners = vec![Accumulator::ZERO; table.num_corners()];
    let mut degenerate_triangles = 0;

    for face in 0..table.num_faces() {
        // Faces only ever write to their own corners.
        let accumulators = &mut corners[table.range(face)];

        for &triangle in triangulate(context, face, accumulators.len(), options.quad_split) {
            let p = triangle.map(|v| Vec3::<O>::from(context.position(face, v)));
            let tx = triangle.map(|v| context.tex_coord(face, v));

            match triangle_derivatives(p, tx, options.uv_epsilon) {
                Some(derivatives) => {
                    for v in triangle {
                        accumulators[v].add(derivatives);
                    }
                }
                None => {
                    log::trace!("face {face}: triangle {triangle:?} is degenerate in texture space");
                    degenerate_triangles += 1;
                }
            }
        }
    }

    Accumulation {
        corners,
        degenerate_triangles,
    }
}

/// Splits a face into the triangles which contribute to its corners.
fn triangulate<I: Geometry<O>, O: Ops>(
    context: &I,
    face: usize,
    vertices: usize,
    quad_split: QuadSplit,
) -> &'static [[usize; 3]] {
    if vertices == 3 {
        return TRIANGLE;
    }

    debug_assert_eq!(vertices, 4);

    match quad_split {
        QuadSplit::Fixed02 => QUAD_02,
        QuadSplit::Fixed13 => QUAD_13,
        QuadSplit::Shortest => {
            let tx = [0, 1, 2, 3].map(|v| context.tex_coord(face, v));
            let d = [(2, 0), (3, 1)].map(|(a, b)| [0, 1].map(|i| tx[a][i] - tx[b][i]));
            let l = d.map(|d| d[0] * d[0] + d[1] * d[1]);

            let diagonal_is_02 = match l[0].partial_cmp(&l[1]) {
                Some(Ordering::Less) => true,
                Some(Ordering::Greater) => false,
                _ => {
                    let p = [0, 1, 2, 3].map(|v| context.position(face, v));
                    let d = [(2, 0), (3, 1)]
                        .map(|(a, b)| (Vec3::<O>::from(p[a]) - Vec3::from(p[b])).length_squared());
                    match d[0].partial_cmp(&d[1]) {
                        Some(Ordering::Less) => true,
                        Some(Ordering::Greater) => false,
                        // Symmetric quads: pick the diagonal owning the smallest point.
                        _ => {
                            let [d02, d13] =
                                [(0, 2), (1, 3)].map(|(a, b)| sorted_endpoints(p[a], p[b]));
                            lexicographic(&d02[0], &d13[0])
                                .then_with(|| lexicographic(&d02[1], &d13[1]))
                                .is_le()
                        }
                    }
                }
            };

            if diagonal_is_02 { QUAD_02 } else { QUAD_13 }
        }
    }
}

fn lexicographic(a: &[f32; 3], b: &[f32; 3]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| a.total_cmp(b))
        .find(|order| order.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn sorted_endpoints(a: [f32; 3], b: [f32; 3]) -> [[f32; 3]; 2] {
    if lexicographic(&a, &b).is_le() { [a, b] } else { [b, a] }
}

/// Solves the derivatives of position with respect to `u` and `v` over a
/// triangle, or returns [`None`] if the triangle is degenerate in texture space.
///
/// With edges `e1 = p1 - p0`, `e2 = p2 - p0` and texture deltas
/// `d1 = tx1 - tx0`, `d2 = tx2 - tx0`:
///
/// ```text
/// det = d1.u * d2.v - d2.u * d1.v
/// s   = (e1 * d2.v - e2 * d1.v) / det
/// t   = (e2 * d1.u - e1 * d2.u) / det
/// ```
pub(super) fn triangle_derivatives<O: Ops>(
    p: [Vec3<O>; 3],
    tx: [[f32; 2]; 3],
    uv_epsilon: f32,
) -> Option<TriangleDerivatives<O>> {
    let [d1, d2] = [1, 2].map(|t| [0, 1].map(|i| tx[t][i] - tx[0][i]));
    let [e1, e2] = [1, 2].map(|i| p[i] - p[0]);

    let det = d1[0] * d2[1] - d2[0] * d1[1];

    // Relative to the texture edge lengths, so this is a bound on the sine of
    // the angle between them.
    let scale = O::sqrt(d1[0] * d1[0] + d1[1] * d1[1]) * O::sqrt(d2[0] * d2[0] + d2[1] * d2[1]);
    if !not_zero(det) || fabsf(det) <= uv_epsilon * scale {
        return None;
    }

    let r = det.recip();
    let s = (e1 * d2[1] - e2 * d1[1]) * r;
    let t = (e2 * d1[0] - e1 * d2[0]) * r;

    (s.is_finite() && t.is_finite()).then_some(TriangleDerivatives { s, t })
}
