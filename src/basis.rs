mod accumulate;
mod corner;
mod finalize;

use alloc::vec::Vec;

use self::{accumulate::accumulate, corner::CornerTable, finalize::finalize};
use crate::{Geometry, TangentError, TangentOptions, TangentSpace, math::*};

pub(crate) fn generate_tangent_space_and_write<I: Geometry<O>, O: Ops>(
    context: &mut I,
    options: &TangentOptions,
) -> Result<(), TangentError> {
    let table = CornerTable::build(&*context).inspect_err(|error| log::warn!("{error}"))?;

    let tangent_spaces = generate_tangent_space(&*context, &table, options);

    for ((face, vert), tangent_space) in table.face_vertices().zip(tangent_spaces) {
        context.set_tangent(tangent_space, face, vert);
    }

    Ok(())
}

/// Generate [`TangentSpace`] values for every corner in `table`.
///
/// This is separated from [`generate_tangent_space_and_write`] to highlight this
/// step does not require mutable access to the provided [`Geometry`].
fn generate_tangent_space<I: Geometry<O>, O: Ops>(
    context: &I,
    table: &CornerTable,
    options: &TangentOptions,
) -> Vec<TangentSpace> {
    let accumulation = accumulate(context, table, options);

    let tangent_spaces = table
        .face_vertices()
        .zip(accumulation.corners.iter())
        .map(|((face, vert), sums)| {
            let normal = Vec3::<O>::from(context.normal(face, vert));
            finalize(sums, normal, options.mode, options.tangent_epsilon)
        })
        .collect::<Vec<_>>();

    log::debug!(
        "generated {:?} tangent spaces: {} faces, {} corners, {} degenerate triangles, {} degenerate corners",
        options.mode,
        table.num_faces(),
        table.num_corners(),
        accumulation.degenerate_triangles,
        tangent_spaces
            .iter()
            .filter(|space| space.tangent() == [0.; 3])
            .count(),
    );

    tangent_spaces
}
