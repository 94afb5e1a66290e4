//! Tests that should be completed in-crate.
//! This allows using `#[cfg(test)]` within the crate to add additional checks.
//! Tests in a `tests/` folder at the repository root are treated as external
//! to the crate, and thus the crate is _not_ compiled with `test`.


pub(crate) fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
    let distance = actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e) * (a - e))
        .sum::<f32>();
    assert!(
        distance < 1e-10,
        "expected {expected:?}; found {actual:?}"
    );
}

pub(crate) fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
