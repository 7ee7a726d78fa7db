#![warn(missing_docs)]
//! Flat or curved mirror
use super::SurfaceHit;
use crate::{
    error::{LbError, LbResult},
    geometry::{reflect, Geometry},
    photometry::mirror_reflect,
    ray::RayState,
    tracer::TraceConfig,
};
use serde::{Deserialize, Serialize};

/// An infinitely thin mirror.
///
/// The mirror reflects on both sides. Its surface is flat ([`Geometry::Segment`]) or circular
/// ([`Geometry::CurvedSegment`]). Polarization is transformed like on an ideal metal surface (the
/// p-component gets a phase flip of pi).
///
/// ## Properties
///   - `reflectivity`: fraction of the incoming intensity that is reflected (`0.0..=1.0`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    geometry: Geometry,
    reflectivity: f64,
}
impl Mirror {
    /// Creates a new [`Mirror`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the reflectivity is outside `0.0..=1.0`.
    pub fn new(geometry: Geometry, reflectivity: f64) -> LbResult<Self> {
        let mirror = Self {
            geometry,
            reflectivity,
        };
        mirror.validate()?;
        Ok(mirror)
    }
    /// Creates a [`Mirror`] with a reflectivity of 100%.
    #[must_use]
    pub const fn perfect(geometry: Geometry) -> Self {
        Self {
            geometry,
            reflectivity: 1.0,
        }
    }
    /// Returns the geometry of this [`Mirror`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Returns the reflectivity of this [`Mirror`].
    #[must_use]
    pub const fn reflectivity(&self) -> f64 {
        self.reflectivity
    }
    pub(super) fn validate(&self) -> LbResult<()> {
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(LbError::Element(
                "reflectivity must be within (0.0..=1.0)".into(),
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
        let direction = reflect(&ray.direction(), &hit.normal);
        let polarization = mirror_reflect(ray.polarization(), &ray.direction(), &hit.normal);
        vec![ray.spawn(
            direction,
            ray.intensity() * self.reflectivity,
            polarization,
            config.epsilon_mm(),
        )]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        elements::OpticalElement, polarization::Polarization,
        utils::test_helper::test_helper::interact_with,
    };
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, Vector2};
    use num::complex::Complex64;

    fn vertical_segment() -> Geometry {
        Geometry::segment(point![0.0, -40.0], point![0.0, 40.0]).unwrap()
    }
    #[test]
    fn new() {
        assert!(Mirror::new(vertical_segment(), -0.1).is_err());
        assert!(Mirror::new(vertical_segment(), 1.1).is_err());
        assert!(Mirror::new(vertical_segment(), f64::NAN).is_err());
        let mirror = Mirror::new(vertical_segment(), 0.9).unwrap();
        assert_eq!(mirror.reflectivity(), 0.9);
        assert_eq!(mirror.geometry(), &vertical_segment());
        assert_eq!(Mirror::perfect(vertical_segment()).reflectivity(), 1.0);
    }
    #[test]
    fn normal_incidence() {
        let mirror: OpticalElement = Mirror::new(vertical_segment(), 0.9).unwrap().into();
        let outputs = interact_with(
            &mirror,
            point![-400.0, 0.0],
            Vector2::new(1.0, 0.0),
            Polarization::horizontal(),
            1.0,
        );
        assert_eq!(outputs.len(), 1);
        let out = &outputs[0];
        assert_abs_diff_eq!(out.direction().x, -1.0);
        assert_abs_diff_eq!(out.direction().y, 0.0);
        assert_abs_diff_eq!(out.position().x, -1e-3, epsilon = 1e-12);
        assert_abs_diff_eq!(out.intensity(), 0.9);
        assert_eq!(out.path().last(), Some(&point![0.0, 0.0]));
        assert_eq!(
            out.polarization(),
            &Polarization::new(Complex64::new(-1.0, 0.0), Complex64::new(0.0, 0.0))
        );
    }
    #[test]
    fn law_of_reflection() {
        let mirror: OpticalElement = Mirror::perfect(vertical_segment()).into();
        for angle in [-60.0_f64, -20.0, 0.0, 10.0, 45.0, 60.0] {
            let dir = Vector2::new(angle.to_radians().cos(), angle.to_radians().sin());
            let outputs = interact_with(
                &mirror,
                point![-10.0, 0.0],
                dir,
                Polarization::default(),
                1.0,
            );
            let out = outputs[0].direction();
            let normal = Vector2::new(-1.0, 0.0);
            assert_abs_diff_eq!(out.dot(&normal), -dir.dot(&normal), epsilon = 1e-12);
            assert_abs_diff_eq!(out.y, dir.y, epsilon = 1e-12);
        }
    }
    #[test]
    fn reflects_from_back_side() {
        let mirror: OpticalElement = Mirror::perfect(vertical_segment()).into();
        let outputs = interact_with(
            &mirror,
            point![10.0, 0.0],
            Vector2::new(-1.0, 0.0),
            Polarization::default(),
            1.0,
        );
        assert_abs_diff_eq!(outputs[0].direction().x, 1.0);
    }
    #[test]
    fn concave_mirror_focuses() {
        // arc of the circle with radius 100 around (-100, 0): a concave mirror facing -X
        let x = 9600.0_f64.sqrt() - 100.0;
        let geometry =
            Geometry::arc(point![x, -20.0], point![x, 20.0], point![-100.0, 0.0], 100.0).unwrap();
        let mirror: OpticalElement = Mirror::perfect(geometry).into();
        let outputs = interact_with(
            &mirror,
            point![-200.0, 5.0],
            Vector2::new(1.0, 0.0),
            Polarization::default(),
            1.0,
        );
        let out = outputs[0].direction();
        assert!(out.x < 0.0);
        assert!(out.y < 0.0);
    }
}
