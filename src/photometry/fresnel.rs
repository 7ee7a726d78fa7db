//! Snell's law and Fresnel reflectance of uncoated refractive interfaces.
use crate::geometry::{normalize, reflect};
use nalgebra::Vector2;

/// Rounding slack on `sin²` of the refraction angle at the critical angle.
const CRITICAL_SLACK: f64 = 1e-12;

/// Returns `true` if a refraction angle with the given squared sine is not possible, i.e. the ray is
/// totally reflected. The critical angle itself counts as total reflection.
#[must_use]
pub fn is_total_internal_reflection(sin2_sq: f64) -> bool {
    sin2_sq >= 1.0 - CRITICAL_SLACK
}

/// Refract the direction `v_in` on a surface with the unit normal `n` going from index `n1` to `n2`.
///
/// The normal may point to either side, it is flipped towards the incident side internally. Returns
/// the new direction together with a flag signalling total internal reflection. In case of total
/// internal reflection the mirror reflected direction is returned instead of a refracted one.
/// `None` is only returned for a zero-length input direction.
#[must_use]
pub fn snell_refract(
    v_in: &Vector2<f64>,
    n: &Vector2<f64>,
    n1: f64,
    n2: f64,
) -> (Option<Vector2<f64>>, bool) {
    let v = normalize(v_in);
    if v.norm() < 0.5 {
        return (None, false);
    }
    let n = if v.dot(n) > 0.0 { -n } else { *n };
    let cos1 = -v.dot(&n);
    let eta = n1 / n2;
    let sin2_sq = eta * eta * cos1.mul_add(-cos1, 1.0);
    if is_total_internal_reflection(sin2_sq) {
        return (Some(reflect(&v, &n)), true);
    }
    let cos2 = (1.0 - sin2_sq).sqrt();
    let refracted = eta * v + eta.mul_add(cos1, -cos2) * n;
    (Some(normalize(&refracted)), false)
}

/// Reflectance and transmittance `(R, T)` of an uncoated interface for unpolarized light.
///
/// `theta1` is the angle of incidence in radians. The result is the mean of the s- and p-polarized
/// Fresnel reflectances, `T = 1 - R`. At and beyond the critical angle `(1.0, 0.0)` is returned.
#[must_use]
pub fn fresnel_unpolarized(theta1: f64, n1: f64, n2: f64) -> (f64, f64) {
    let (sin1, cos1) = theta1.sin_cos();
    let sin2 = n1 / n2 * sin1;
    if is_total_internal_reflection(sin2 * sin2) {
        return (1.0, 0.0);
    }
    let cos2 = sin2.mul_add(-sin2, 1.0).sqrt();
    let r_s = n1.mul_add(cos1, -n2 * cos2) / n1.mul_add(cos1, n2 * cos2);
    let r_p = n2.mul_add(cos1, -n1 * cos2) / n2.mul_add(cos1, n1 * cos2);
    let reflectance = (0.5 * r_s.mul_add(r_s, r_p * r_p)).clamp(0.0, 1.0);
    (reflectance, (1.0 - reflectance).clamp(0.0, 1.0))
}
