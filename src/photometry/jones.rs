//! Jones calculus for the polarization transforming interactions.
use crate::{geometry::normalize, polarization::Polarization};
use nalgebra::{Vector2, Vector3};
use num::complex::Complex64;

/// Below this norm the s-axis of the plane of incidence is considered undefined.
const S_AXIS_EPSILON: f64 = 1e-9;

/// Components of a Jones vector along two real, orthonormal axes.
fn project(pol: &Polarization, axis: &Vector2<f64>) -> Complex64 {
    pol.ex() * axis.x + pol.ey() * axis.y
}

/// Reassemble a Jones vector from its components along two real, orthonormal axes.
fn compose(
    a: Complex64,
    axis_a: &Vector2<f64>,
    b: Complex64,
    axis_b: &Vector2<f64>,
) -> Polarization {
    Polarization::new(a * axis_a.x + b * axis_b.x, a * axis_a.y + b * axis_b.y)
}

/// s-axis (perpendicular to the plane of incidence) expressed in the Jones basis.
///
/// For rays travelling inside the bench plane the cross product of direction and normal only has an
/// out-of-plane component, so its in-plane projection vanishes and the vertical Jones axis `(0, 1)`
/// is used.
fn s_axis(v_in: &Vector2<f64>, n: &Vector2<f64>) -> Vector2<f64> {
    let cross = Vector3::new(v_in.x, v_in.y, 0.0).cross(&Vector3::new(n.x, n.y, 0.0));
    let projected = Vector2::new(cross.x, cross.y);
    if projected.norm() < S_AXIS_EPSILON {
        Vector2::new(0.0, 1.0)
    } else {
        normalize(&projected)
    }
}

/// Polarization after reflection on an ideal metal mirror.
///
/// The field is decomposed into s- and p-components with respect to the plane of incidence. The
/// mirror keeps the s-component and flips the phase of the p-component by pi (Jones matrix
/// `diag(1, -1)` in the s/p basis). No intensity is lost, a reflectivity < 1 has to be applied by
/// the caller.
#[must_use]
pub fn mirror_reflect(pol: &Polarization, v_in: &Vector2<f64>, n: &Vector2<f64>) -> Polarization {
    let s = s_axis(v_in, n);
    let p = Vector2::new(-s.y, s.x);
    let e_s = project(pol, &s);
    let e_p = project(pol, &p);
    compose(e_s, &s, -e_p, &p)
}

/// Polarization after an ideal thin lens (unchanged).
#[must_use]
pub fn lens_transmit(pol: &Polarization) -> Polarization {
    pol.clone()
}

/// Polarization after a waveplate.
///
/// The field is rotated into the basis of the fast axis (absolute angle `fast_axis_deg` from the
/// horizontal), the slow component is delayed by `phase_shift_deg` and the result is rotated back.
/// For backward traversal (`is_forward == false`) the sign of the retardance is inverted. Thus a
/// quarter wave plate turns the same linear input into right- or left-circular light depending on
/// the propagation direction.
#[must_use]
pub fn waveplate_transmit(
    pol: &Polarization,
    phase_shift_deg: f64,
    fast_axis_deg: f64,
    is_forward: bool,
) -> Polarization {
    let (sin, cos) = fast_axis_deg.to_radians().sin_cos();
    let fast = Vector2::new(cos, sin);
    let slow = Vector2::new(-sin, cos);
    let delta = if is_forward {
        phase_shift_deg.to_radians()
    } else {
        -phase_shift_deg.to_radians()
    };
    let e_fast = project(pol, &fast);
    let e_slow = project(pol, &slow) * Complex64::from_polar(1.0, delta);
    compose(e_fast, &fast, e_slow, &slow)
}

/// Polarization and intensity fraction of one output port of a beam splitter.
///
/// ## Non-polarizing mode
/// The transmitted port returns the input unchanged, the reflected port the mirror reflected
/// polarization. The returned intensity fraction is 1.0; the caller applies its configured
/// transmission / reflection ratio.
///
/// ## Polarizing mode (PBS)
/// The field is projected onto the absolute transmission axis `p = (cos θ, sin θ)` (θ =
/// `pbs_axis_deg`) and its perpendicular `s`. The transmitted port carries the p-component (intensity
/// fraction `|E_p|² / |E|²`, Malus' law), the reflected port carries the s-component with an
/// additional pi phase shift (intensity fraction `|E_s|² / |E|²`). Both fractions add up to 1.0. The
/// returned polarization is normalized to unit intensity.
#[must_use]
pub fn beamsplitter_split(
    pol: &Polarization,
    v_in: &Vector2<f64>,
    n: &Vector2<f64>,
    is_polarizing: bool,
    pbs_axis_deg: f64,
    is_transmitted: bool,
) -> (Polarization, f64) {
    if !is_polarizing {
        return if is_transmitted {
            (pol.clone(), 1.0)
        } else {
            (mirror_reflect(pol, v_in, n), 1.0)
        };
    }
    let (sin, cos) = pbs_axis_deg.to_radians().sin_cos();
    let p_axis = Vector2::new(cos, sin);
    let s_axis = Vector2::new(-sin, cos);
    let input_intensity = pol.intensity();
    if input_intensity <= 0.0 {
        let axis = if is_transmitted { p_axis } else { s_axis };
        return (
            Polarization::new(Complex64::new(axis.x, 0.0), Complex64::new(axis.y, 0.0)),
            0.0,
        );
    }
    let (component, axis, sign) = if is_transmitted {
        (project(pol, &p_axis), p_axis, 1.0)
    } else {
        (project(pol, &s_axis), s_axis, -1.0)
    };
    let fraction = component.norm_sqr() / input_intensity;
    let output = if component.norm_sqr() > 0.0 {
        Polarization::new(component * axis.x * sign, component * axis.y * sign).normalized()
    } else {
        Polarization::new(Complex64::new(axis.x, 0.0), Complex64::new(axis.y, 0.0))
    };
    (output, fraction)
}
