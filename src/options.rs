//! Configuration for [`generate_tangents_with_options`](crate::generate_tangents_with_options).

/// Selects the output schema written back for every corner.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// A normalized tangent and a handedness sign.
    /// The bi-tangent is derived by the consumer as `sign * cross(normal, tangent)`.
    #[default]
    Basic,
    /// Independently normalized tangent and bi-tangent, their accumulated
    /// magnitudes, and a flag indicating the corner's basis is usable.
    Full,
}

/// How a quad is split into two triangles before accumulation.
///
/// Both triangles contribute to the corners they touch, so the two corners on the
/// shared diagonal receive two contributions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum QuadSplit {
    /// Triangles `(0, 1, 2)` and `(0, 2, 3)`.
    #[default]
    Fixed02,
    /// Triangles `(0, 1, 3)` and `(1, 2, 3)`.
    Fixed13,
    /// Split along the shorter diagonal in texture space, falling back to the
    /// shorter diagonal in object space, then to the diagonal through the
    /// lexicographically smallest position.
    /// The choice does not depend on which corner the face starts at.
    Shortest,
}

/// Tunables for tangent generation.
///
/// ```
/// # use tangent_basis::{Mode, QuadSplit, TangentOptions};
/// let options = TangentOptions::default()
///     .with_mode(Mode::Full)
///     .with_quad_split(QuadSplit::Shortest);
/// assert_eq!(options.mode, Mode::Full);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TangentOptions {
    /// Output schema.
    pub mode: Mode,
    /// Quad triangulation used when accumulating.
    pub quad_split: QuadSplit,
    /// Relative threshold on the texture-space determinant.
    ///
    /// A triangle is treated as degenerate in texture space when
    /// `|det| <= uv_epsilon * |du1| * |du2|`, that is when the sine of the angle
    /// between its two texture-space edges falls below `uv_epsilon`.
    /// Being relative, the test does not depend on the scale of the texture
    /// coordinates.
    pub uv_epsilon: f32,
    /// Relative threshold on the orthogonalized tangent length.
    ///
    /// A corner is treated as degenerate when the accumulated tangent, once
    /// its normal component is removed, is shorter than `tangent_epsilon`
    /// times its length before removal.
    pub tangent_epsilon: f32,
}

impl Default for TangentOptions {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            quad_split: QuadSplit::default(),
            uv_epsilon: 1e-6,
            tangent_epsilon: 1e-6,
        }
    }
}

impl TangentOptions {
    /// Options for [`Mode::Basic`] with default tunables.
    pub fn basic() -> Self {
        Self::default().with_mode(Mode::Basic)
    }

    /// Options for [`Mode::Full`] with default tunables.
    pub fn full() -> Self {
        Self::default().with_mode(Mode::Full)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_quad_split(mut self, quad_split: QuadSplit) -> Self {
        self.quad_split = quad_split;
        self
    }

    pub fn with_uv_epsilon(mut self, uv_epsilon: f32) -> Self {
        self.uv_epsilon = uv_epsilon;
        self
    }

    pub fn with_tangent_epsilon(mut self, tangent_epsilon: f32) -> Self {
        self.tangent_epsilon = tangent_epsilon;
        self
    }
}
