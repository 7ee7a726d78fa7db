#![warn(missing_docs)]
//! Retarder plates
use super::SurfaceHit;
use crate::{
    degree,
    error::{LbError, LbResult},
    geometry::{direction_from_user_angle, Geometry},
    photometry::waveplate_transmit,
    ray::RayState,
    tracer::TraceConfig,
};
use serde::{Deserialize, Serialize};
use uom::si::{angle::degree, f64::Angle};

/// A waveplate (retarder).
///
/// The plate delays the field component along its slow axis by `phase_shift` with respect to the
/// fast axis component. Rays pass without deflection or loss.
///
/// The sign of the retardance depends on the propagation direction relative to the plate's own
/// `orientation` (given in the clockwise screen convention): rays travelling along the orientation
/// direction see `+phase_shift`, rays in the opposite direction `-phase_shift`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveplate {
    geometry: Geometry,
    phase_shift: Angle,
    fast_axis: Angle,
    orientation: Angle,
}
impl Waveplate {
    /// Creates a new [`Waveplate`].
    ///
    /// `fast_axis` is the absolute angle of the fast axis measured from the horizontal Jones axis.
    ///
    /// # Errors
    ///
    /// This function will return an error if any of the angles is not finite.
    pub fn new(
        geometry: Geometry,
        phase_shift: Angle,
        fast_axis: Angle,
        orientation: Angle,
    ) -> LbResult<Self> {
        let plate = Self {
            geometry,
            phase_shift,
            fast_axis,
            orientation,
        };
        plate.validate()?;
        Ok(plate)
    }
    /// Creates a quarter wave plate (90° retardance).
    ///
    /// # Errors
    ///
    /// This function will return an error if any of the angles is not finite.
    pub fn quarter_wave(geometry: Geometry, fast_axis: Angle, orientation: Angle) -> LbResult<Self> {
        Self::new(geometry, degree!(90.0), fast_axis, orientation)
    }
    /// Creates a half wave plate (180° retardance).
    ///
    /// # Errors
    ///
    /// This function will return an error if any of the angles is not finite.
    pub fn half_wave(geometry: Geometry, fast_axis: Angle, orientation: Angle) -> LbResult<Self> {
        Self::new(geometry, degree!(180.0), fast_axis, orientation)
    }
    /// Returns the geometry of this [`Waveplate`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Returns the retardance of this [`Waveplate`].
    #[must_use]
    pub const fn phase_shift(&self) -> Angle {
        self.phase_shift
    }
    /// Returns the fast axis angle of this [`Waveplate`].
    #[must_use]
    pub const fn fast_axis(&self) -> Angle {
        self.fast_axis
    }
    /// Returns the orientation of this [`Waveplate`].
    #[must_use]
    pub const fn orientation(&self) -> Angle {
        self.orientation
    }
    pub(super) fn validate(&self) -> LbResult<()> {
        if !self.phase_shift.is_finite() || !self.fast_axis.is_finite() || !self.orientation.is_finite()
        {
            return Err(LbError::Element("waveplate angles must be finite".into()));
        }
        Ok(())
    }
    pub(super) fn interact(
        &self,
        ray: &RayState,
        _hit: &SurfaceHit,
        config: &TraceConfig,
    ) -> Vec<RayState> {
        let forward = direction_from_user_angle(self.orientation);
        let is_forward = ray.direction().dot(&forward) >= 0.0;
        let polarization = waveplate_transmit(
            ray.polarization(),
            self.phase_shift.get::<degree>(),
            self.fast_axis.get::<degree>(),
            is_forward,
        );
        vec![ray.spawn(
            ray.direction(),
            ray.intensity(),
            polarization,
            config.epsilon_mm(),
        )]
    }
}
