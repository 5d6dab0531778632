//! Small dense-vector helpers shared by the scalarizing comparators and the
//! reference-vector-guided population.

/// Dot product of two equal-length vectors.
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have the same length");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean magnitude.
pub(crate) fn magnitude(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Returns the vector scaled to unit magnitude.
///
/// # Panics
///
/// Panics if the vector has zero magnitude.
pub(crate) fn normalize(v: &[f64]) -> Vec<f64> {
    let m = magnitude(v);
    assert!(m > 0.0, "cannot normalize a zero-magnitude vector");
    v.iter().map(|x| x / m).collect()
}
