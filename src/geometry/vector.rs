//! Vector helpers and angle conventions.
//!
//! Bench records (element rotations, source emission angles) use the screen convention: angles are
//! measured *clockwise* from the +X axis. All internal math uses the usual counter-clockwise
//! convention. Conversion is a plain sign flip.
use nalgebra::Vector2;
use uom::si::{angle::degree, f64::Angle};

/// Vectors with a norm at or below this value are treated as zero length.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Return the unit vector of `v`.
///
/// A vector whose norm is below [`NORMALIZE_EPSILON`] is returned unchanged instead of dividing
/// by (almost) zero.
#[must_use]
pub fn normalize(v: &Vector2<f64>) -> Vector2<f64> {
    let norm = v.norm();
    if norm <= NORMALIZE_EPSILON {
        *v
    } else {
        v / norm
    }
}

/// Mirror the direction `v` on a surface with the unit normal `n`.
///
/// `n` is expected to be normalized. No check is performed.
#[must_use]
pub fn reflect(v: &Vector2<f64>, n: &Vector2<f64>) -> Vector2<f64> {
    v - 2.0 * v.dot(n) * n
}

/// Convert an angle in degrees from the clockwise screen convention to the counter-clockwise math convention.
#[must_use]
pub fn user_angle_to_math(deg: f64) -> f64 {
    -deg
}

/// Convert an angle in degrees from the math convention back to the screen convention.
///
/// The result is normalized into `[0, 360)`.
#[must_use]
pub fn math_angle_to_user(deg: f64) -> f64 {
    let user = (-deg).rem_euclid(360.0);
    // rem_euclid may round up to exactly 360.0 for tiny negative inputs
    if user >= 360.0 {
        0.0
    } else {
        user
    }
}

/// Unit direction vector for an angle given in the screen convention.
#[must_use]
pub fn direction_from_user_angle(angle: Angle) -> Vector2<f64> {
    let math = user_angle_to_math(angle.get::<degree>()).to_radians();
    Vector2::new(math.cos(), math.sin())
}

/// Rotate a vector by +90 degrees (counter-clockwise).
#[must_use]
pub fn perpendicular(v: &Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}
