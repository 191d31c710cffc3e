//! Test assertion helpers
//!
//! KB values in the report are rounded to two decimals, so comparisons against
//! byte counts go through a tolerance.

/// Assert that two floating-point values are approximately equal
///
/// # Examples
///
/// ```ignore
/// assert_approx_eq(app.size_kb, 12.85, 0.001);
/// ```
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Assert that a reported KB value matches a byte count after rounding
#[allow(dead_code)]
pub fn assert_kb_matches_bytes(actual_kb: f64, bytes: u64) {
    let expected = (bytes as f64 / 1000.0 * 100.0).round() / 100.0;
    assert_approx_eq(actual_kb, expected, 0.0051);
}
