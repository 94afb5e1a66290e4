#![no_main]

use libfuzzer_sys::fuzz_target;
use tangent_basis::TangentOptions;
use tangent_basis_fuzz::Geometry;

fuzz_target!(|value: Geometry| {
    for options in [TangentOptions::basic(), TangentOptions::full()] {
        let mut value = value.clone();
        let result = tangent_basis::generate_tangents_with_options(&mut value, &options);
        value.check(result);
    }
});
