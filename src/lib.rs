//! Generates per-corner tangent space bases for triangle and quad meshes with
//! existing normals and texture coordinates, for use with normal mapping.
//!
//! # Usage
//!
//! As a preliminary step for `no_std` users, you must provide an implementation
//! for [`Ops`].
//! When the `std` feature is enabled, one is provided and automatically selected
//! as the default.
//!
//! There are two ways to drive the generator.
//!
//! The first is to implement [`Geometry`] for your own mesh representation.
//! The interface is how this crate reads positions, normals and texture
//! coordinates _and_ writes back the generated [`TangentSpace`] of every corner.
//!
//! ```ignore
//! impl Geometry for MyGeometry { /* ... */ }
//!
//! generate_tangents_with_options(&mut my_geometry, &TangentOptions::full())?;
//! ```
//!
//! The second is to build a [`Mesh`], which stores attributes in flat per-corner
//! arrays, and ask it for freshly allocated [`TangentAttributes`].
//!
//! ```
//! use tangent_basis::{Mesh, TangentAttributes, TangentOptions};
//!
//! let mut mesh = Mesh::new(vec![[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]]);
//! mesh.add_face(&[0, 1, 2, 3]);
//! let mesh = mesh
//!     .with_normals(vec![[0., 0., 1.]; 4])
//!     .with_tex_coords(vec![[0., 0.], [1., 0.], [1., 1.], [0., 1.]]);
//!
//! let TangentAttributes::Basic { tangent_u, sign, .. } =
//!     mesh.compute_tangents(&TangentOptions::basic())?
//! else {
//!     unreachable!()
//! };
//! assert_eq!(tangent_u[0], [1., 0., 0.]);
//! assert_eq!(sign[0], 1.);
//! # Ok::<(), tangent_basis::TangentError>(())
//! ```
//!
//! # Description
//!
//! Every face is split into triangles (a quad into two, see [`QuadSplit`]).
//! For each triangle, the derivatives of position with respect to the `u` and
//! `v` texture coordinates are solved from its edges and texture-space deltas,
//! and added to running sums held by every corner the triangle touches.
//! Corners are face-local: two faces meeting at a shared point never share
//! sums, so each corner's result depends only on the face it belongs to.
//!
//! Each corner's sums are then orthogonalized against its normal and
//! normalized.
//! Depending on the [`Mode`], either a handedness sign is derived from the
//! accumulated bi-tangent, or the bi-tangent is orthogonalized and normalized
//! on its own and reported together with both raw magnitudes.
//!
//! Degenerate input never aborts generation.
//! A triangle whose texture coordinates are collinear contributes nothing, and
//! a corner with a zero normal, no usable contribution, or a tangent parallel
//! to its normal receives a zero tangent (with a `+1` sign, or `keep == 0`).
//! Only unsupported faces are rejected, and they are rejected before anything
//! is written back.
//!
//! Tangents and bi-tangents are directions and should be transformed like
//! normals (by the inverse transpose of the model matrix) when the geometry is
//! transformed.
//!
//! # Features
//!
//! ## `std` (default)
//!
//! Provides access to the standard library, allowing a default implementation
//! of [`Ops`] to be provided.
//! If you disable this feature, you will need to provide a type implementing
//! [`Ops`] as the `O` parameter in the [`Geometry`] trait.
//!
//! A common backend for implementing [`Ops`] is [`libm`]:
//!
//! ```
//! # use tangent_basis::Ops;
//! # struct LibmOps;
//! impl Ops for LibmOps {
//!     fn sqrt(x: f32) -> f32 {
//!         libm::sqrtf(x)
//!     }
//! }
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted through the [`log`] facade.
//! No logger is installed by this crate.
//!
//! [`libm`]: https://docs.rs/libm
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod attributes;
mod basis;
mod error;
mod math;
mod mesh;
mod options;

#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
mod std {
    extern crate std;

    /// Implements [`Ops`](crate::Ops) using the standard library.
    /// This is the default when the `std` feature is enabled.
    pub struct StdOps;

    impl crate::Ops for StdOps {
        #[inline]
        fn sqrt(x: f32) -> f32 {
            x.sqrt()
        }
    }
}

pub use attributes::{AttributeDesc, AttributeKind, TangentAttributes, names};
pub use error::TangentError;
pub use math::Ops;
pub use mesh::Mesh;
pub use options::{Mode, QuadSplit, TangentOptions};

#[cfg(feature = "std")]
pub use std::StdOps;

/// Generates [`TangentSpace`]s in [`Mode::Basic`] with default options.
pub fn generate_tangents<I, O>(interface: &mut I) -> Result<(), TangentError>
where
    I: Geometry<O>,
    O: Ops,
{
    generate_tangents_with_options(interface, &TangentOptions::default())
}

/// Generates [`TangentSpace`]s for the provided geometry using `options`.
///
/// Every face must be a triangle or a quad.
/// If any is not, [`TangentError::UnsupportedFace`] is returned and
/// [`set_tangent`](Geometry::set_tangent) is never called.
/// Otherwise it is called exactly once for every corner of every face.
pub fn generate_tangents_with_options<I, O>(
    interface: &mut I,
    options: &TangentOptions,
) -> Result<(), TangentError>
where
    I: Geometry<O>,
    O: Ops,
{
    basis::generate_tangent_space_and_write(interface, options)
}

/// Provides an interface for reading corner information from geometry, and writing
/// back out the calculated tangent space information.
///
/// A corner is a vertex of a particular face.
/// Corners of different faces are independent, even if they share a position.
///
/// Without the `std` feature, there is no default implementation for [`Ops`]
/// provided.
/// Instead, you must also provide a type implementing [`Ops`] using an alternative
/// math backend, such as [`libm`].
///
/// [`libm`]: https://docs.rs/libm
pub trait Geometry<
    #[cfg(not(feature = "std"))] O: Ops,
    #[cfg(feature = "std")] O: Ops = std::StdOps,
>
{
    /// Returns the number of faces on the mesh to be processed.
    fn num_faces(&self) -> usize;

    /// Returns the number of vertices on face number `face`.
    /// `face` is a number in the range `0..num_faces()`.
    /// Only `3` and `4` are supported.
    fn num_vertices_of_face(&self, face: usize) -> usize;

    /// Returns the position of the referenced `face` of vertex number `vert`.
    /// `vert` is in the range `0..=2` for triangles and `0..=3` for quads.
    fn position(&self, face: usize, vert: usize) -> [f32; 3];

    /// Returns the normal of the referenced `face` of vertex number `vert`.
    /// `vert` is in the range `0..=2` for triangles and `0..=3` for quads.
    fn normal(&self, face: usize, vert: usize) -> [f32; 3];

    /// Returns the texture coordinate of the referenced `face` of vertex number `vert`.
    /// `vert` is in the range `0..=2` for triangles and `0..=3` for quads.
    fn tex_coord(&self, face: usize, vert: usize) -> [f32; 2];

    /// This function is used to return tangent space results to the application.
    ///
    /// The variant of `tangent_space` always matches the [`Mode`] generation
    /// was requested with.
    fn set_tangent(&mut self, tangent_space: TangentSpace, face: usize, vert: usize);
}

/// The result generated for a single corner.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TangentSpace {
    /// Produced by [`Mode::Basic`].
    Basic(BasicTangentSpace),
    /// Produced by [`Mode::Full`].
    Full(FullTangentSpace),
}

impl TangentSpace {
    /// Returns the normalized tangent, or zero for a degenerate corner.
    #[inline]
    pub const fn tangent(&self) -> [f32; 3] {
        match self {
            TangentSpace::Basic(basic) => basic.tangent,
            TangentSpace::Full(full) => full.tangent,
        }
    }

    /// Returns the [`Mode`] that produced this value.
    #[inline]
    pub const fn mode(&self) -> Mode {
        match self {
            TangentSpace::Basic(_) => Mode::Basic,
            TangentSpace::Full(_) => Mode::Full,
        }
    }
}

/// A normalized tangent together with the handedness of the frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BasicTangentSpace {
    pub(crate) tangent: [f32; 3],
    pub(crate) sign: f32,
}

impl BasicTangentSpace {
    /// Returns the normalized tangent as an `[x, y, z]` array.
    /// This is zero for a degenerate corner.
    #[inline]
    pub const fn tangent(&self) -> [f32; 3] {
        self.tangent
    }

    /// Returns `1.0` when `(tangent, bi-tangent, normal)` is right-handed, and
    /// `-1.0` otherwise.
    #[inline]
    pub const fn sign(&self) -> f32 {
        self.sign
    }

    /// Derives the bi-tangent as `sign * cross(normal, tangent)`.
    pub fn bi_tangent(&self, normal: [f32; 3]) -> [f32; 3] {
        let [nx, ny, nz] = normal;
        let [tx, ty, tz] = self.tangent;
        [
            self.sign * (ny * tz - nz * ty),
            self.sign * (nz * tx - nx * tz),
            self.sign * (nx * ty - ny * tx),
        ]
    }

    /// Returns the tangent with the sign encoded as the 'W' (4th) component.
    #[inline]
    pub const fn tangent_encoded(&self) -> [f32; 4] {
        [self.tangent[0], self.tangent[1], self.tangent[2], self.sign]
    }
}

/// Independently normalized tangent and bi-tangent, with their magnitudes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FullTangentSpace {
    pub(crate) tangent: [f32; 3],
    pub(crate) bi_tangent: [f32; 3],
    pub(crate) mag_s: f32,
    pub(crate) mag_t: f32,
    pub(crate) keep: bool,
}

impl FullTangentSpace {
    /// Returns the normalized tangent as an `[x, y, z]` array.
    #[inline]
    pub const fn tangent(&self) -> [f32; 3] {
        self.tangent
    }

    /// Returns the normalized bi-tangent as an `[x, y, z]` array.
    #[inline]
    pub const fn bi_tangent(&self) -> [f32; 3] {
        self.bi_tangent
    }

    /// Returns the length of the accumulated tangent before it was
    /// orthogonalized and normalized.
    #[inline]
    pub const fn tangent_magnitude(&self) -> f32 {
        self.mag_s
    }

    /// Returns the length of the accumulated bi-tangent before it was
    /// orthogonalized and normalized.
    #[inline]
    pub const fn bi_tangent_magnitude(&self) -> f32 {
        self.mag_t
    }

    /// Indicates the basis of this corner is numerically usable.
    #[inline]
    pub const fn keep(&self) -> bool {
        self.keep
    }
}
