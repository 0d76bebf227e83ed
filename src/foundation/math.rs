/// Wrap an angle in degrees into `[0, 360)`.
pub(crate) fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest distance between two angles on the circle, in `[0, 180]`.
pub(crate) fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (normalize_degrees(a) - normalize_degrees(b)).abs();
    d.min(360.0 - d)
}

pub(crate) fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
