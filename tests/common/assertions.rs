//! Assertion utilities for testing.
//!
//! Floating-point comparisons for scalars and field arrays, treating two
//! missing values as equal.

use ndarray::Array2;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f32, expected: f32, epsilon: Option<f32>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two fields have the same shape and approximately equal values.
///
/// A NaN in one array must be matched by a NaN in the other.
///
/// # Panics
///
/// Panics on a shape difference, a missing-value mismatch, or a value outside `epsilon`.
pub fn assert_field_approx_eq(actual: &Array2<f32>, expected: &Array2<f32>, epsilon: Option<f32>) {
    assert_eq!(
        actual.dim(),
        expected.dim(),
        "Fields have different shapes: actual = {:?}, expected = {:?}",
        actual.dim(),
        expected.dim()
    );

    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    for ((index, a), e) in actual.indexed_iter().zip(expected.iter()) {
        if a.is_nan() || e.is_nan() {
            assert!(
                a.is_nan() && e.is_nan(),
                "Missing values differ at {:?}: actual = {}, expected = {}",
                index,
                a,
                e
            );
            continue;
        }

        let diff = (a - e).abs();
        assert!(
            diff <= eps,
            "Fields differ at {:?}: actual = {}, expected = {}, diff = {}, epsilon = {}",
            index,
            a,
            e,
            diff,
            eps
        );
    }
}

/// Assert that every valid value of a field lies within `[min, max]`.
pub fn assert_field_in_range(field: &Array2<f32>, min: f32, max: f32) {
    for (index, value) in field.indexed_iter() {
        if value.is_nan() {
            continue;
        }
        assert!(
            *value >= min && *value <= max,
            "Value not in range at {:?}: actual = {}, min = {}, max = {}",
            index,
            value,
            min,
            max
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_field_approx_eq_with_missing() {
        let a = array![[1.0, f32::NAN], [3.0, 4.0]];
        let b = array![[1.0000001, f32::NAN], [3.0, 4.0]];
        assert_field_approx_eq(&a, &b, None);
    }

    #[test]
    #[should_panic(expected = "Missing values differ")]
    fn test_assert_field_approx_eq_missing_mismatch() {
        let a = array![[1.0, f32::NAN]];
        let b = array![[1.0, 2.0]];
        assert_field_approx_eq(&a, &b, None);
    }

    #[test]
    fn test_assert_field_in_range() {
        assert_field_in_range(&array![[0.0, 5.0], [f32::NAN, 10.0]], 0.0, 10.0);
    }
}
