#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tangent_basis::{Mode, QuadSplit, TangentOptions};
use tangent_basis_fuzz::Geometry;

#[derive(Debug, Arbitrary)]
struct Options {
    full: bool,
    quad_split: u8,
    uv_epsilon: f32,
    tangent_epsilon: f32,
}

impl Options {
    fn get(&self) -> TangentOptions {
        let quad_split = match self.quad_split % 3 {
            0 => QuadSplit::Fixed02,
            1 => QuadSplit::Fixed13,
            _ => QuadSplit::Shortest,
        };
        let mode = if self.full { Mode::Full } else { Mode::Basic };
        let epsilon = |e: f32| if e.is_finite() { e.abs() % 1. } else { 0. };

        TangentOptions::default()
            .with_mode(mode)
            .with_quad_split(quad_split)
            .with_uv_epsilon(epsilon(self.uv_epsilon))
            .with_tangent_epsilon(epsilon(self.tangent_epsilon))
    }
}

fuzz_target!(|input: (Geometry, Options)| {
    let (mut value, options) = input;
    let options = options.get();

    let result = tangent_basis::generate_tangents_with_options(&mut value, &options);
    value.check(result.clone());

    // The indexed path must agree corner for corner.
    let mesh = value.to_mesh();
    match (mesh.compute_tangents(&options), result) {
        (Ok(attributes), Ok(())) => {
            assert_eq!(attributes.len(), value.written.len());
            for (corner, space) in value.written.values().enumerate() {
                assert_eq!(attributes.tangent_u()[corner], space.tangent());
            }
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("mesh gave {a:?}; geometry gave {b:?}"),
    }
});
