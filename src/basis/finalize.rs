//! Turns accumulated sums into the final per-corner tangent space.

use super::accumulate::Accumulator;
use crate::{BasicTangentSpace, FullTangentSpace, Mode, TangentSpace, math::*};

/// Orthogonalizes and normalizes one corner's sums against its `normal`.
pub(super) fn finalize<O: Ops>(
    sums: &Accumulator<O>,
    normal: Vec3<O>,
    mode: Mode,
    tangent_epsilon: f32,
) -> TangentSpace {
    let normal_length = normal.length();
    let n = if not_zero(normal_length) {
        Some(normal * normal_length.recip())
    } else {
        None
    };

    let tangent = n.and_then(|n| {
        if sums.contributions == 0 {
            return None;
        }

        // Gram-Schmidt
        let s = sums.s.reject_from(n);
        let length = s.length();
        if !not_zero(length) || length <= tangent_epsilon * sums.s.length() {
            return None;
        }

        Some((n, s * length.recip()))
    });

    match mode {
        Mode::Basic => {
            let (tangent, sign) = match tangent {
                Some((n, tangent)) => {
                    let sign = if n.cross(tangent).dot(sums.t) >= 0.0 {
                        1.0
                    } else {
                        -1.0
                    };
                    (tangent, sign)
                }
                None => (Vec3::ZERO, 1.0),
            };

            TangentSpace::Basic(BasicTangentSpace {
                tangent: tangent.into(),
                sign,
            })
        }
        Mode::Full => {
            let bi_tangent = n
                .map(|n| {
                    let t = sums.t.reject_from(n);
                    match tangent {
                        Some((_, tangent)) => t.reject_from(tangent),
                        None => t,
                    }
                })
                .map(|t| {
                    let length = t.length();
                    if not_zero(length) {
                        t * length.recip()
                    } else {
                        Vec3::ZERO
                    }
                })
                .unwrap_or(Vec3::ZERO);

            TangentSpace::Full(FullTangentSpace {
                tangent: tangent.map_or(Vec3::ZERO, |(_, tangent)| tangent).into(),
                bi_tangent: bi_tangent.into(),
                mag_s: sums.s.length(),
                mag_t: sums.t.length(),
                keep: tangent.is_some(),
            })
        }
    }
}
