//! Small helpers shared by message-type test modules.

/// Compares two floats for approximate equality, tolerant of the rounding
/// that scaled fixed-point fields (lat/lon, speed, course) accumulate.
pub fn f32_equal_naive(a: f32, b: f32) {
    assert!((a - b).abs() < 0.01, "{} != {}", a, b);
}
