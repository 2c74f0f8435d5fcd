//! Wind speed and direction from orthogonal components.

use std::f64::consts::PI;

/// Magnitude of the wind vector, `sqrt(u² + v²)`.
pub fn wind_speed(u: f64, v: f64) -> f64 {
    (u * u + v * v).sqrt()
}

/// Meteorological direction the wind blows *from*, in degrees within
/// `[0, 360)`. North is 0°, east is 90°.
///
/// Calm air (`u = v = 0`) yields 0°.
pub fn wind_direction(u: f64, v: f64) -> f64 {
    // Adding +0.0 turns a negated zero into +0.0 so calm maps to 0, not 180.
    let degrees = (-u + 0.0).atan2(-v + 0.0) * 180.0 / PI;
    let direction = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if direction >= 360.0 {
        0.0
    } else {
        direction
    }
}
