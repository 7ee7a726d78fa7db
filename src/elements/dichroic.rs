#![warn(missing_docs)]
//! Dichroic mirror
use super::{split, SurfaceHit};
use crate::{
    error::{LbError, LbResult},
    geometry::{reflect, Geometry},
    photometry::{dichroic_reflectance, mirror_reflect, PassType},
    ray::{self, RayState},
    tracer::TraceConfig,
};
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::nanometer};

/// A mirror with a wavelength dependent reflectance.
///
/// Rays without a wavelength are split 50 / 50.
///
/// ## Properties
///   - `cutoff`: wavelength with 50% reflectance
///   - `transition`: width of the transition region (zero for an ideal edge)
///   - `pass_type`: [`PassType::Longpass`] or [`PassType::Shortpass`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dichroic {
    geometry: Geometry,
    cutoff: Length,
    transition: Length,
    #[serde(default)]
    pass_type: PassType,
}
impl Dichroic {
    /// Creates a new [`Dichroic`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the cutoff wavelength is not positive or not finite
    ///   - the transition width is negative or not finite
    pub fn new(
        geometry: Geometry,
        cutoff: Length,
        transition: Length,
        pass_type: PassType,
    ) -> LbResult<Self> {
        let dichroic = Self {
            geometry,
            cutoff,
            transition,
            pass_type,
        };
        dichroic.validate()?;
        Ok(dichroic)
    }
    /// Returns the geometry of this [`Dichroic`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Returns the cutoff wavelength of this [`Dichroic`].
    #[must_use]
    pub const fn cutoff(&self) -> Length {
        self.cutoff
    }
    /// Returns the transition width of this [`Dichroic`].
    #[must_use]
    pub const fn transition(&self) -> Length {
        self.transition
    }
    /// Returns the pass type of this [`Dichroic`].
    #[must_use]
    pub const fn pass_type(&self) -> PassType {
        self.pass_type
    }
    /// Reflectance and transmittance `(R, T)` for a ray of the given wavelength.
    ///
    /// A zero wavelength gives `(0.5, 0.5)`.
    #[must_use]
    pub fn split_ratio(&self, wavelength: Length) -> (f64, f64) {
        if !ray::is_specified(wavelength) {
            return (0.5, 0.5);
        }
        dichroic_reflectance(
            wavelength.get::<nanometer>(),
            self.cutoff.get::<nanometer>(),
            self.transition.get::<nanometer>(),
            self.pass_type,
        )
    }
    pub(super) fn validate(&self) -> LbResult<()> {
        if !self.cutoff.is_finite() || self.cutoff.get::<nanometer>() <= 0.0 {
            return Err(LbError::Element(
                "cutoff wavelength must be >0.0 and finite".into(),
            ));
        }
        if !self.transition.is_finite() || self.transition.is_sign_negative() {
            return Err(LbError::Element(
                "transition width must be >=0.0 and finite".into(),
            ));
        }
        Ok(())
    }
    pub(super) fn interact(
        &self,
        ray: &RayState,
        hit: &SurfaceHit,
        config: &TraceConfig,
    ) -> Vec<RayState> {
        let v_in = ray.direction();
        let (reflectance, transmittance) = self.split_ratio(ray.wavelength());
        split(
            ray,
            (
                v_in,
                ray.intensity() * transmittance,
                ray.polarization().clone(),
            ),
            (
                reflect(&v_in, &hit.normal),
                ray.intensity() * reflectance,
                mirror_reflect(ray.polarization(), &v_in, &hit.normal),
            ),
            config,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        elements::OpticalElement,
        nanometer,
        utils::test_helper::test_helper::interact_with_wavelength,
    };
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, Vector2};

    fn diagonal() -> Geometry {
        Geometry::segment(point![-10.0, -10.0], point![10.0, 10.0]).unwrap()
    }
    fn dichroic(pass_type: PassType) -> Dichroic {
        Dichroic::new(diagonal(), nanometer!(600.0), nanometer!(10.0), pass_type).unwrap()
    }
    #[test]
    fn new() {
        assert!(Dichroic::new(diagonal(), nanometer!(0.0), nanometer!(10.0), PassType::Longpass).is_err());
        assert!(Dichroic::new(diagonal(), nanometer!(f64::NAN), nanometer!(10.0), PassType::Longpass).is_err());
        assert!(Dichroic::new(diagonal(), nanometer!(600.0), nanometer!(-1.0), PassType::Longpass).is_err());
        assert!(Dichroic::new(diagonal(), nanometer!(600.0), nanometer!(f64::INFINITY), PassType::Longpass).is_err());
        let d = Dichroic::new(diagonal(), nanometer!(600.0), nanometer!(0.0), PassType::Shortpass).unwrap();
        assert_eq!(d.cutoff(), nanometer!(600.0));
        assert_eq!(d.transition(), nanometer!(0.0));
        assert_eq!(d.pass_type(), PassType::Shortpass);
    }
    #[test]
    fn split_ratio() {
        let longpass = dichroic(PassType::Longpass);
        assert_eq!(longpass.split_ratio(nanometer!(0.0)), (0.5, 0.5));
        let (r, t) = longpass.split_ratio(nanometer!(600.0));
        assert_abs_diff_eq!(r, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        let (r, _) = longpass.split_ratio(nanometer!(500.0));
        assert!(r > 0.99);
        let (r, _) = dichroic(PassType::Shortpass).split_ratio(nanometer!(500.0));
        assert!(r < 0.01);
    }
    #[test]
    fn energy_conservation() {
        let mut config = TraceConfig::default();
        config.set_min_intensity(0.0).unwrap();
        for pass_type in [PassType::Longpass, PassType::Shortpass] {
            let element: OpticalElement = dichroic(pass_type).into();
            for wavelength in [0.0, 400.0, 590.0, 600.0, 612.0, 900.0] {
                let outputs = interact_with_wavelength(
                    &element,
                    point![-20.0, 0.0],
                    Vector2::new(1.0, 0.0),
                    nanometer!(wavelength),
                    &config,
                );
                assert_eq!(outputs.len(), 2);
                let total: f64 = outputs.iter().map(RayState::intensity).sum();
                assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
            }
        }
    }
    #[test]
    fn longpass_routes_by_wavelength() {
        let element: OpticalElement = dichroic(PassType::Longpass).into();
        let config = TraceConfig::default();
        let red = interact_with_wavelength(
            &element,
            point![-20.0, 0.0],
            Vector2::new(1.0, 0.0),
            nanometer!(700.0),
            &config,
        );
        assert_eq!(red.len(), 1);
        assert_abs_diff_eq!(red[0].direction().x, 1.0, epsilon = 1e-12);
        let blue = interact_with_wavelength(
            &element,
            point![-20.0, 0.0],
            Vector2::new(1.0, 0.0),
            nanometer!(450.0),
            &config,
        );
        assert_eq!(blue.len(), 1);
        assert_abs_diff_eq!(blue[0].direction().y, 1.0, epsilon = 1e-12);
    }
    #[test]
    fn unspecified_wavelength_splits_evenly() {
        let element: OpticalElement = dichroic(PassType::Shortpass).into();
        let outputs = interact_with_wavelength(
            &element,
            point![-20.0, 0.0],
            Vector2::new(1.0, 0.0),
            nanometer!(0.0),
            &TraceConfig::default(),
        );
        assert_eq!(outputs.len(), 2);
        assert_abs_diff_eq!(outputs[0].intensity(), 0.5);
        assert_abs_diff_eq!(outputs[1].intensity(), 0.5);
    }
}
