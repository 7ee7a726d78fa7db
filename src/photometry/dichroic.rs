//! Wavelength dependent reflectance of dichroic mirrors.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Spectral behaviour of a dichroic mirror.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PassType {
    /// wavelengths above the cutoff are transmitted, shorter ones reflected
    #[default]
    Longpass,
    /// wavelengths below the cutoff are transmitted, longer ones reflected
    Shortpass,
}

/// Reflectance and transmittance `(R, T)` of a dichroic mirror at the given wavelength.
///
/// The transition around the cutoff follows a logistic curve of width `transition_nm`:
///   - longpass: `R = 1 / (1 + exp((λ - λc) / Δλ))`, decreasing with wavelength
///   - shortpass: `R = 1 / (1 + exp(-(λ - λc) / Δλ))`, increasing with wavelength
///
/// `T = 1 - R`. A transition width <= 0.0 yields an ideal step at the cutoff (R = 0.5 exactly at
/// the cutoff).
#[must_use]
pub fn dichroic_reflectance(
    wavelength_nm: f64,
    cutoff_nm: f64,
    transition_nm: f64,
    pass_type: PassType,
) -> (f64, f64) {
    let detuning = wavelength_nm - cutoff_nm;
    let sign = match pass_type {
        PassType::Longpass => 1.0,
        PassType::Shortpass => -1.0,
    };
    let reflectance = if transition_nm > 0.0 {
        1.0 / (1.0 + (sign * detuning / transition_nm).exp())
    } else if detuning == 0.0 {
        0.5
    } else if sign * detuning > 0.0 {
        0.0
    } else {
        1.0
    };
    let reflectance = reflectance.clamp(0.0, 1.0);
    (reflectance, (1.0 - reflectance).clamp(0.0, 1.0))
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn half_at_cutoff() {
        for pass in PassType::iter() {
            let (r, t) = dichroic_reflectance(550.0, 550.0, 10.0, pass);
            assert_abs_diff_eq!(r, 0.5, epsilon = 1e-12);
            assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        }
    }
    #[test]
    fn longpass_monotonic() {
        let mut last = f64::INFINITY;
        for step in 0..200 {
            let wavelength = 400.0 + f64::from(step) * 2.0;
            let (r, t) = dichroic_reflectance(wavelength, 600.0, 15.0, PassType::Longpass);
            assert!(r <= last);
            assert_abs_diff_eq!(r + t, 1.0, epsilon = 1e-9);
            last = r;
        }
        let (r, _) = dichroic_reflectance(450.0, 600.0, 15.0, PassType::Longpass);
        assert!(r > 0.99);
    }
    #[test]
    fn shortpass_monotonic() {
        let mut last = f64::NEG_INFINITY;
        for step in 0..200 {
            let wavelength = 400.0 + f64::from(step) * 2.0;
            let (r, t) = dichroic_reflectance(wavelength, 600.0, 15.0, PassType::Shortpass);
            assert!(r >= last);
            assert_abs_diff_eq!(r + t, 1.0, epsilon = 1e-9);
            last = r;
        }
        let (r, _) = dichroic_reflectance(450.0, 600.0, 15.0, PassType::Shortpass);
        assert!(r < 0.01);
    }
    #[test]
    fn far_from_cutoff_is_clamped() {
        let (r, t) = dichroic_reflectance(10_000.0, 500.0, 0.1, PassType::Longpass);
        assert_eq!(r, 0.0);
        assert_eq!(t, 1.0);
        let (r, t) = dichroic_reflectance(10_000.0, 500.0, 0.1, PassType::Shortpass);
        assert_eq!(r, 1.0);
        assert_eq!(t, 0.0);
    }
    #[test]
    fn step_transition() {
        assert_eq!(
            dichroic_reflectance(500.0, 600.0, 0.0, PassType::Longpass),
            (1.0, 0.0)
        );
        assert_eq!(
            dichroic_reflectance(700.0, 600.0, 0.0, PassType::Longpass),
            (0.0, 1.0)
        );
        assert_eq!(
            dichroic_reflectance(600.0, 600.0, 0.0, PassType::Shortpass),
            (0.5, 0.5)
        );
    }
    #[test]
    fn pass_type_strings() {
        assert_eq!(format!("{}", PassType::Longpass), "longpass");
        assert_eq!(PassType::from_str("shortpass").unwrap(), PassType::Shortpass);
        assert!(PassType::from_str("bandpass").is_err());
    }
}
