#![warn(missing_docs)]
//! Ideal thin lens
use super::SurfaceHit;
use crate::{
    error::{LbError, LbResult},
    geometry::Geometry,
    photometry::lens_transmit,
    ray::RayState,
    tracer::TraceConfig,
};
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::millimeter};

/// Focal lengths below this value (mm) are treated as an afocal window.
const MIN_FOCAL_LENGTH: f64 = 1e-9;

/// An ideal thin lens.
///
/// The lens deflects a ray according to the paraxial thin lens equation: a ray hitting the lens at
/// height `y` from its center leaves with the angle `θ_out = θ_in - y / f`. Intensity and
/// polarization are not changed.
///
/// ## Properties
///   - `focal_length`: effective focal length (negative for a diverging lens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    geometry: Geometry,
    focal_length: Length,
}
impl Lens {
    /// Creates a new [`Lens`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the focal length is not finite.
    pub fn new(geometry: Geometry, focal_length: Length) -> LbResult<Self> {
        let lens = Self {
            geometry,
            focal_length,
        };
        lens.validate()?;
        Ok(lens)
    }
    /// Returns the geometry of this [`Lens`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Returns the focal length of this [`Lens`].
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    pub(super) fn validate(&self) -> LbResult<()> {
        if !self.focal_length.is_finite() {
            return Err(LbError::Element("focal length must be finite".into()));
        }
        Ok(())
    }
    pub(super) fn interact(
        &self,
        ray: &RayState,
        hit: &SurfaceHit,
        config: &TraceConfig,
    ) -> Vec<RayState> {
        let focal_length = self.focal_length.get::<millimeter>();
        let forward = -hit.normal;
        let direction = if focal_length.abs() < MIN_FOCAL_LENGTH {
            ray.direction()
        } else {
            let height = (hit.point - hit.center).dot(&hit.tangent);
            let theta_in = ray
                .direction()
                .dot(&hit.tangent)
                .atan2(ray.direction().dot(&forward));
            let theta_out = theta_in - height / focal_length;
            let (sin, cos) = theta_out.sin_cos();
            cos * forward + sin * hit.tangent
        };
        vec![ray.spawn(
            direction,
            ray.intensity(),
            lens_transmit(ray.polarization()),
            config.epsilon_mm(),
        )]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        elements::OpticalElement, millimeter, polarization::Polarization,
        utils::test_helper::test_helper::interact_with,
    };
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, Point2, Vector2};

    fn lens(focal_length: f64) -> OpticalElement {
        Lens::new(
            Geometry::segment(point![0.0, -50.0], point![0.0, 50.0]).unwrap(),
            millimeter!(focal_length),
        )
        .unwrap()
        .into()
    }
    /// y coordinate where the outgoing ray crosses the vertical line at `x`
    fn crossing_at(out: &RayState, x: f64) -> f64 {
        let t = (x - out.position().x) / out.direction().x;
        out.position().y + t * out.direction().y
    }
    fn shoot(element: &OpticalElement, origin: Point2<f64>, dir: Vector2<f64>) -> RayState {
        let mut outputs = interact_with(element, origin, dir, Polarization::vertical(), 0.7);
        assert_eq!(outputs.len(), 1);
        outputs.remove(0)
    }
    #[test]
    fn new() {
        let g = Geometry::segment(point![0.0, -1.0], point![0.0, 1.0]).unwrap();
        assert!(Lens::new(g.clone(), millimeter!(f64::NAN)).is_err());
        assert!(Lens::new(g.clone(), millimeter!(f64::INFINITY)).is_err());
        let lens = Lens::new(g, millimeter!(-100.0)).unwrap();
        assert_eq!(lens.focal_length(), millimeter!(-100.0));
    }
    #[test]
    fn on_axis_ray_undeviated() {
        let out = shoot(&lens(100.0), point![-50.0, 0.0], Vector2::new(1.0, 0.0));
        assert_abs_diff_eq!(out.direction().x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.direction().y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.intensity(), 0.7);
        assert_eq!(out.polarization(), &Polarization::vertical());
    }
    #[test]
    fn converging_lens() {
        for height in [-5.0, -1.0, 1.0, 5.0] {
            let out = shoot(&lens(100.0), point![-50.0, height], Vector2::new(1.0, 0.0));
            // leaves with the angle -h/f and crosses the axis at h / tan(h/f)
            let focus = height / (height / 100.0_f64).tan();
            assert_abs_diff_eq!(focus, 100.0, epsilon = 0.1);
            assert_abs_diff_eq!(crossing_at(&out, focus), 0.0, epsilon = 1e-9);
        }
    }
    #[test]
    fn converging_lens_both_directions() {
        for (origin, dir) in [
            (point![-50.0, 5.0], Vector2::new(1.0, 0.0)),
            (point![50.0, 5.0], Vector2::new(-1.0, 0.0)),
        ] {
            let out = shoot(&lens(100.0), origin, dir);
            assert!(out.direction().y < 0.0);
            assert_abs_diff_eq!(out.direction().x.signum(), dir.x);
        }
    }
    #[test]
    fn diverging_lens() {
        let out = shoot(&lens(-100.0), point![-50.0, 5.0], Vector2::new(1.0, 0.0));
        assert!(out.direction().y > 0.0);
        assert_abs_diff_eq!(
            out.direction().y.atan2(out.direction().x),
            0.05,
            epsilon = 1e-12
        );
    }
    #[test]
    fn afocal_window() {
        let dir = Vector2::new(1.0, 0.3).normalize();
        let out = shoot(&lens(0.0), point![-50.0, 0.0], dir);
        assert_abs_diff_eq!(out.direction().x, dir.x, epsilon = 1e-12);
        assert_abs_diff_eq!(out.direction().y, dir.y, epsilon = 1e-12);
    }
}
