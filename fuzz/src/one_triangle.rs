#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use tangent_basis::TangentOptions;
use tangent_basis_fuzz::{Face, Geometry, Vertex};

#[derive(Debug)]
struct OneTriangle(Geometry);

impl Arbitrary<'_> for OneTriangle {
    fn arbitrary(u: &mut Unstructured<'_>) -> Result<Self, arbitrary::Error> {
        let vertices = vec![
            Vertex::arbitrary(u)?,
            Vertex::arbitrary(u)?,
            Vertex::arbitrary(u)?,
        ];
        let faces = vec![Face::Triangle([0, 1, 2])];

        Ok(Self(Geometry::new(vertices, faces)?))
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        let (min, max) = Vertex::size_hint(depth);
        (3 * min, max.map(|max| 3 * max))
    }
}

fuzz_target!(|value: OneTriangle| {
    let OneTriangle(value) = value;

    for options in [TangentOptions::basic(), TangentOptions::full()] {
        let mut value = value.clone();
        let result = tangent_basis::generate_tangents_with_options(&mut value, &options);
        assert!(result.is_ok());
        value.check(result);
    }
});
