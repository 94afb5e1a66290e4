//! Per-corner output attributes and their schema.

use alloc::vec::Vec;

use crate::{Mode, TangentSpace};

/// Attribute names used when reading from and publishing to a host mesh.
pub mod names {
    /// Per-corner normal input.
    pub const NORMAL: &str = "N";
    /// Per-corner texture coordinate input.
    pub const TEX_COORD: &str = "uv";
    /// Normalized tangent.
    pub const TANGENT_U: &str = "tangentu";
    /// Bi-tangent: derived from the sign in [`Mode::Basic`](crate::Mode::Basic),
    /// normalized independently in [`Mode::Full`](crate::Mode::Full).
    pub const TANGENT_V: &str = "tangentv";
    /// Handedness, `1.0` or `-1.0`.
    pub const SIGN: &str = "sign";
    /// Accumulated tangent magnitude.
    pub const MAG_U: &str = "magu";
    /// Accumulated bi-tangent magnitude.
    pub const MAG_V: &str = "magv";
    /// `1` if the corner's basis is usable, `0` otherwise.
    pub const KEEP: &str = "keep";
}

/// Storage class of an output attribute on the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttributeKind {
    /// A direction which must be transformed by the inverse transpose of the
    /// model matrix, like a normal.
    Normal,
    /// Plain floats.
    Float,
    /// Plain integers.
    Int,
}

/// Describes one output attribute.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AttributeDesc {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub components: usize,
}

const fn desc(name: &'static str, kind: AttributeKind, components: usize) -> AttributeDesc {
    AttributeDesc {
        name,
        kind,
        components,
    }
}

const BASIC_SCHEMA: &[AttributeDesc] = &[
    desc(names::TANGENT_U, AttributeKind::Normal, 3),
    desc(names::TANGENT_V, AttributeKind::Normal, 3),
    desc(names::SIGN, AttributeKind::Float, 1),
];

const FULL_SCHEMA: &[AttributeDesc] = &[
    desc(names::TANGENT_U, AttributeKind::Normal, 3),
    desc(names::TANGENT_V, AttributeKind::Normal, 3),
    desc(names::MAG_U, AttributeKind::Float, 1),
    desc(names::MAG_V, AttributeKind::Float, 1),
    desc(names::KEEP, AttributeKind::Int, 1),
];

impl Mode {
    /// The attributes a host must create for this mode.
    /// Switching modes replaces the whole set.
    pub const fn attribute_schema(self) -> &'static [AttributeDesc] {
        match self {
            Mode::Basic => BASIC_SCHEMA,
            Mode::Full => FULL_SCHEMA,
        }
    }
}

/// Freshly allocated per-corner outputs, indexed by corner in face order.
#[derive(Clone, PartialEq, Debug)]
pub enum TangentAttributes {
    Basic {
        tangent_u: Vec<[f32; 3]>,
        /// `sign * cross(normal, tangent_u)`, using the normal as supplied.
        tangent_v: Vec<[f32; 3]>,
        sign: Vec<f32>,
    },
    Full {
        tangent_u: Vec<[f32; 3]>,
        tangent_v: Vec<[f32; 3]>,
        mag_u: Vec<f32>,
        mag_v: Vec<f32>,
        keep: Vec<i32>,
    },
}

impl TangentAttributes {
    pub(crate) fn with_capacity(mode: Mode, corners: usize) -> Self {
        match mode {
            Mode::Basic => TangentAttributes::Basic {
                tangent_u: Vec::with_capacity(corners),
                tangent_v: Vec::with_capacity(corners),
                sign: Vec::with_capacity(corners),
            },
            Mode::Full => TangentAttributes::Full {
                tangent_u: Vec::with_capacity(corners),
                tangent_v: Vec::with_capacity(corners),
                mag_u: Vec::with_capacity(corners),
                mag_v: Vec::with_capacity(corners),
                keep: Vec::with_capacity(corners),
            },
        }
    }

    /// Appends the next corner.
    ///
    /// Corners arrive in face order, so appending keeps the arrays indexed by
    /// corner. A tangent space of the other mode is dropped.
    pub(crate) fn push(&mut self, tangent_space: TangentSpace, normal: [f32; 3]) {
        match (self, tangent_space) {
            (
                TangentAttributes::Basic {
                    tangent_u,
                    tangent_v,
                    sign,
                },
                TangentSpace::Basic(basic),
            ) => {
                tangent_u.push(basic.tangent());
                tangent_v.push(basic.bi_tangent(normal));
                sign.push(basic.sign());
            }
            (
                TangentAttributes::Full {
                    tangent_u,
                    tangent_v,
                    mag_u,
                    mag_v,
                    keep,
                },
                TangentSpace::Full(full),
            ) => {
                tangent_u.push(full.tangent());
                tangent_v.push(full.bi_tangent());
                mag_u.push(full.tangent_magnitude());
                mag_v.push(full.bi_tangent_magnitude());
                keep.push(i32::from(full.keep()));
            }
            (attributes, tangent_space) => debug_assert!(
                false,
                "{:?} tangent space pushed to {:?} attributes",
                tangent_space.mode(),
                attributes.mode(),
            ),
        }
    }

    /// The mode these attributes were generated with.
    pub const fn mode(&self) -> Mode {
        match self {
            TangentAttributes::Basic { .. } => Mode::Basic,
            TangentAttributes::Full { .. } => Mode::Full,
        }
    }

    /// Number of corners covered.
    pub fn len(&self) -> usize {
        self.tangent_u().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalized tangents, present in both modes.
    pub fn tangent_u(&self) -> &[[f32; 3]] {
        match self {
            TangentAttributes::Basic { tangent_u, .. } | TangentAttributes::Full { tangent_u, .. } => {
                tangent_u
            }
        }
    }

    /// Bi-tangents, present in both modes.
    pub fn tangent_v(&self) -> &[[f32; 3]] {
        match self {
            TangentAttributes::Basic { tangent_v, .. } | TangentAttributes::Full { tangent_v, .. } => {
                tangent_v
            }
        }
    }
}
