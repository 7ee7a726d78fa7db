#![warn(missing_docs)]
//! Ray sources
//!
//! A [`SourceDescriptor`] describes a fan of rays emitted from a point or a finite aperture. It is
//! read only input of the tracer and creates the initial [`RayState`]s of a tracing run.
use crate::{
    color::Rgba,
    error::{LbError, LbResult},
    geometry::{direction_from_user_angle, perpendicular},
    millimeter,
    polarization::{Polarization, PolarizationPreset},
    ray::RayState,
    utils::linspace,
};
use log::warn;
use nalgebra::Point2;
use num::Zero;
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::millimeter,
};

/// Description of a ray source.
///
/// The emission angle follows the clockwise screen convention (0° = +X, 90° = -Y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    position: Point2<f64>,
    angle: Angle,
    #[serde(default = "zero_length")]
    aperture: Length,
    #[serde(default = "default_n_rays")]
    n_rays: usize,
    #[serde(default = "zero_angle")]
    spread: Angle,
    #[serde(default = "default_max_length")]
    max_length: Length,
    #[serde(default = "zero_length")]
    wavelength: Length,
    #[serde(default)]
    polarization: PolarizationPreset,
    #[serde(default)]
    color: Rgba,
}
fn zero_length() -> Length {
    Length::zero()
}
fn zero_angle() -> Angle {
    Angle::zero()
}
const fn default_n_rays() -> usize {
    1
}
fn default_max_length() -> Length {
    millimeter!(2000.0)
}
impl SourceDescriptor {
    /// Creates a new [`SourceDescriptor`] emitting a single ray from `position` along `angle`.
    ///
    /// The other parameters have the following defaults:
    ///   - aperture: `0 mm` (point source)
    ///   - number of rays: `1`
    ///   - spread: `0°`
    ///   - maximum propagation length: `2000 mm`
    ///   - wavelength: `0` (unspecified)
    ///   - polarization: horizontal
    ///   - color: opaque red
    ///
    /// # Errors
    ///
    /// This function will return an error if the position or the angle is not finite.
    pub fn new(position: Point2<f64>, angle: Angle) -> LbResult<Self> {
        let source = Self {
            position,
            angle,
            aperture: Length::zero(),
            n_rays: default_n_rays(),
            spread: Angle::zero(),
            max_length: default_max_length(),
            wavelength: Length::zero(),
            polarization: PolarizationPreset::default(),
            color: Rgba::default(),
        };
        source.validate()?;
        Ok(source)
    }
    /// Sets the aperture (width of the emitting area). This function can be used with the "builder pattern".
    ///
    /// # Errors
    ///
    /// This function will return an error if the aperture is negative or not finite.
    pub fn with_aperture(mut self, aperture: Length) -> LbResult<Self> {
        self.aperture = aperture;
        self.validate()?;
        Ok(self)
    }
    /// Sets the number of rays. This function can be used with the "builder pattern".
    #[must_use]
    pub const fn with_n_rays(mut self, n_rays: usize) -> Self {
        self.n_rays = n_rays;
        self
    }
    /// Sets the angular spread. The rays fan out over `angle ± spread`. This function can be used with the "builder pattern".
    ///
    /// # Errors
    ///
    /// This function will return an error if the spread is not finite.
    pub fn with_spread(mut self, spread: Angle) -> LbResult<Self> {
        self.spread = spread;
        self.validate()?;
        Ok(self)
    }
    /// Sets the maximum propagation length of each ray. This function can be used with the "builder pattern".
    ///
    /// # Errors
    ///
    /// This function will return an error if the length is not positive or not finite.
    pub fn with_max_length(mut self, max_length: Length) -> LbResult<Self> {
        self.max_length = max_length;
        self.validate()?;
        Ok(self)
    }
    /// Sets the wavelength (zero for unspecified). This function can be used with the "builder pattern".
    ///
    /// # Errors
    ///
    /// This function will return an error if the wavelength is negative or not finite.
    pub fn with_wavelength(mut self, wavelength: Length) -> LbResult<Self> {
        self.wavelength = wavelength;
        self.validate()?;
        Ok(self)
    }
    /// Sets the polarization. This function can be used with the "builder pattern".
    #[must_use]
    pub fn with_polarization(mut self, polarization: PolarizationPreset) -> Self {
        self.polarization = polarization;
        self
    }
    /// Sets the display color. This function can be used with the "builder pattern".
    #[must_use]
    pub const fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }
    /// Returns the position of this [`SourceDescriptor`].
    #[must_use]
    pub const fn position(&self) -> Point2<f64> {
        self.position
    }
    /// Returns the emission angle of this [`SourceDescriptor`].
    #[must_use]
    pub const fn angle(&self) -> Angle {
        self.angle
    }
    /// Returns the aperture of this [`SourceDescriptor`].
    #[must_use]
    pub const fn aperture(&self) -> Length {
        self.aperture
    }
    /// Returns the number of rays of this [`SourceDescriptor`].
    #[must_use]
    pub const fn n_rays(&self) -> usize {
        self.n_rays
    }
    /// Returns the angular spread of this [`SourceDescriptor`].
    #[must_use]
    pub const fn spread(&self) -> Angle {
        self.spread
    }
    /// Returns the maximum propagation length of this [`SourceDescriptor`].
    #[must_use]
    pub const fn max_length(&self) -> Length {
        self.max_length
    }
    /// Returns the wavelength of this [`SourceDescriptor`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Returns the polarization preset of this [`SourceDescriptor`].
    #[must_use]
    pub const fn polarization(&self) -> &PolarizationPreset {
        &self.polarization
    }
    /// Returns the display color of this [`SourceDescriptor`].
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }
    /// Check all parameters of this [`SourceDescriptor`].
    ///
    /// # Errors
    ///
    /// This function will return an error if any parameter is outside its valid range.
    pub fn validate(&self) -> LbResult<()> {
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err(LbError::Source("position must be finite".into()));
        }
        if !self.angle.is_finite() || !self.spread.is_finite() {
            return Err(LbError::Source("angles must be finite".into()));
        }
        if !self.aperture.is_finite() || self.aperture.is_sign_negative() {
            return Err(LbError::Source("aperture must be >=0.0 and finite".into()));
        }
        if !self.max_length.is_finite() || self.max_length.get::<millimeter>() <= 0.0 {
            return Err(LbError::Source(
                "maximum length must be >0.0 and finite".into(),
            ));
        }
        if !self.wavelength.is_finite() || self.wavelength.is_sign_negative() {
            return Err(LbError::Source("wavelength must be >=0.0 and finite".into()));
        }
        Ok(())
    }
    /// Generate the initial rays of this source.
    ///
    /// The ray start points are distributed evenly across the aperture (perpendicular to the
    /// emission direction). If a spread is given, the emission angles are distributed evenly over
    /// `angle - spread ..= angle + spread`, the i-th ray getting the i-th angle. A point source
    /// without spread emits a single ray regardless of the configured number of rays.
    #[must_use]
    pub fn initial_rays(&self) -> Vec<RayState> {
        if self.n_rays == 0 {
            warn!("source at ({}, {}) emits no rays", self.position.x, self.position.y);
            return Vec::new();
        }
        let aperture = self.aperture.get::<millimeter>();
        let spread = self.spread.get::<degree>();
        let angle = self.angle.get::<degree>();
        let n_rays = if aperture == 0.0 && spread == 0.0 {
            1
        } else {
            self.n_rays
        };
        let offsets = if n_rays <= 1 || aperture == 0.0 {
            vec![0.0; n_rays]
        } else {
            linspace(-0.5 * aperture, 0.5 * aperture, n_rays)
        };
        let angles = if n_rays > 1 && spread != 0.0 {
            linspace(angle - spread, angle + spread, n_rays)
        } else {
            vec![angle; n_rays]
        };
        let axis = perpendicular(&direction_from_user_angle(self.angle));
        let polarization = Polarization::from(&self.polarization);
        let max_length = self.max_length.get::<millimeter>();
        offsets
            .into_iter()
            .zip(angles)
            .map(|(offset, angle)| {
                RayState::new(
                    self.position + offset * axis,
                    direction_from_user_angle(Angle::new::<degree>(angle)),
                    1.0,
                    polarization.clone(),
                    self.wavelength,
                    max_length,
                )
                .with_color(self.color)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{degree, nanometer, utils::test_helper::test_helper::check_warnings};
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, Vector2};

    fn source() -> SourceDescriptor {
        SourceDescriptor::new(point![-400.0, 0.0], degree!(0.0)).unwrap()
    }
    #[test]
    fn new() {
        assert!(SourceDescriptor::new(point![f64::NAN, 0.0], degree!(0.0)).is_err());
        assert!(SourceDescriptor::new(point![0.0, 0.0], degree!(f64::INFINITY)).is_err());
        let s = source();
        assert_eq!(s.position(), point![-400.0, 0.0]);
        assert_eq!(s.angle(), degree!(0.0));
        assert_eq!(s.aperture(), millimeter!(0.0));
        assert_eq!(s.n_rays(), 1);
        assert_eq!(s.spread(), degree!(0.0));
        assert_eq!(s.max_length(), millimeter!(2000.0));
        assert_eq!(s.wavelength(), nanometer!(0.0));
        assert_eq!(s.polarization(), &PolarizationPreset::Horizontal);
        assert_eq!(s.color(), Rgba::default());
    }
    #[test]
    fn builder() {
        assert!(source().with_aperture(millimeter!(-1.0)).is_err());
        assert!(source().with_spread(degree!(f64::NAN)).is_err());
        assert!(source().with_max_length(millimeter!(0.0)).is_err());
        assert!(source().with_max_length(millimeter!(f64::INFINITY)).is_err());
        assert!(source().with_wavelength(nanometer!(-1.0)).is_err());
        let s = source()
            .with_aperture(millimeter!(10.0))
            .unwrap()
            .with_n_rays(5)
            .with_spread(degree!(2.0))
            .unwrap()
            .with_max_length(millimeter!(100.0))
            .unwrap()
            .with_wavelength(nanometer!(532.0))
            .unwrap()
            .with_polarization(PolarizationPreset::Vertical)
            .with_color(Rgba::new(0, 255, 0, 255));
        assert_eq!(s.aperture(), millimeter!(10.0));
        assert_eq!(s.n_rays(), 5);
        assert_eq!(s.spread(), degree!(2.0));
        assert_eq!(s.max_length(), millimeter!(100.0));
        assert_eq!(s.wavelength(), nanometer!(532.0));
        assert_eq!(s.polarization(), &PolarizationPreset::Vertical);
        assert_eq!(s.color(), Rgba::new(0, 255, 0, 255));
    }
    #[test]
    fn single_ray() {
        let rays = source()
            .with_wavelength(nanometer!(633.0))
            .unwrap()
            .initial_rays();
        assert_eq!(rays.len(), 1);
        let ray = &rays[0];
        assert_eq!(ray.position(), point![-400.0, 0.0]);
        assert_abs_diff_eq!(ray.direction().x, 1.0);
        assert_abs_diff_eq!(ray.direction().y, 0.0);
        assert_eq!(ray.intensity(), 1.0);
        assert_eq!(ray.wavelength(), nanometer!(633.0));
        assert_abs_diff_eq!(ray.remaining_length(), 2000.0, epsilon = 1e-9);
        assert_eq!(ray.polarization(), &Polarization::horizontal());
        assert_eq!(ray.color(), Rgba::default());
    }
    #[test]
    fn point_source_without_spread_collapses() {
        assert_eq!(source().with_n_rays(7).initial_rays().len(), 1);
    }
    #[test]
    fn aperture_fan() {
        let rays = source()
            .with_aperture(millimeter!(10.0))
            .unwrap()
            .with_n_rays(3)
            .initial_rays();
        assert_eq!(rays.len(), 3);
        let ys: Vec<f64> = rays.iter().map(|r| r.position().y).collect();
        assert_abs_diff_eq!(ys[0].abs(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ys[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ys[0] + ys[2], 0.0, epsilon = 1e-12);
        for ray in &rays {
            assert_abs_diff_eq!(ray.position().x, -400.0, epsilon = 1e-12);
            assert_abs_diff_eq!(ray.direction().x, 1.0, epsilon = 1e-12);
        }
    }
    #[test]
    fn angular_fan() {
        let rays = source()
            .with_n_rays(3)
            .with_spread(degree!(10.0))
            .unwrap()
            .initial_rays();
        assert_eq!(rays.len(), 3);
        // screen convention: the first ray at -10 deg points towards +Y
        assert_abs_diff_eq!(
            rays[0].direction(),
            Vector2::new(10.0_f64.to_radians().cos(), 10.0_f64.to_radians().sin()),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(rays[1].direction(), Vector2::new(1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            rays[2].direction(),
            Vector2::new(10.0_f64.to_radians().cos(), -10.0_f64.to_radians().sin()),
            epsilon = 1e-12
        );
        for ray in &rays {
            assert_eq!(ray.position(), point![-400.0, 0.0]);
        }
    }
    #[test]
    fn no_rays() {
        testing_logger::setup();
        assert!(source().with_n_rays(0).initial_rays().is_empty());
        check_warnings(vec!["source at (-400, 0) emits no rays"]);
    }
}
