#![warn(missing_docs)]
//! Intensity and polarizing beam splitters
use super::{split, SurfaceHit};
use crate::{
    error::{LbError, LbResult},
    geometry::{reflect, Geometry},
    photometry::beamsplitter_split,
    ray::RayState,
    tracer::TraceConfig,
};
use serde::{Deserialize, Serialize};
use uom::si::{angle::degree, f64::Angle};

/// An infinitely thin beam splitter.
///
/// In the default (non-polarizing) mode the incoming intensity is split into a transmitted and a
/// reflected part by the configured transmission and reflection ratios. `T + R` may be smaller than
/// one for lossy elements.
///
/// In polarizing mode (PBS) the split follows from the incoming polarization: the component along
/// the transmission axis is transmitted, the orthogonal component is reflected. The configured
/// ratios are ignored in this mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSplitter {
    geometry: Geometry,
    transmission: f64,
    reflection: f64,
    #[serde(default)]
    polarizing_axis: Option<Angle>,
}
impl BeamSplitter {
    /// Creates a new non-polarizing [`BeamSplitter`] with the given transmission and reflection
    /// fractions.
    ///
    /// # Errors
    ///
    /// This function will return an error if the fractions are outside `0.0..=1.0` or their sum
    /// exceeds one.
    pub fn new(geometry: Geometry, transmission: f64, reflection: f64) -> LbResult<Self> {
        let splitter = Self {
            geometry,
            transmission,
            reflection,
            polarizing_axis: None,
        };
        splitter.validate()?;
        Ok(splitter)
    }
    /// Creates a new non-polarizing [`BeamSplitter`] with ratios given in percent.
    ///
    /// # Errors
    ///
    /// This function will return an error if the percentages are outside `0.0..=100.0` or their sum
    /// exceeds 100.
    pub fn from_percent(geometry: Geometry, transmission: f64, reflection: f64) -> LbResult<Self> {
        Self::new(geometry, transmission / 100.0, reflection / 100.0)
    }
    /// Creates a new polarizing [`BeamSplitter`] transmitting light polarized along `axis`.
    ///
    /// The axis is measured from the horizontal Jones axis.
    ///
    /// # Errors
    ///
    /// This function will return an error if the axis angle is not finite.
    pub fn polarizing(geometry: Geometry, axis: Angle) -> LbResult<Self> {
        let splitter = Self {
            geometry,
            transmission: 1.0,
            reflection: 0.0,
            polarizing_axis: Some(axis),
        };
        splitter.validate()?;
        Ok(splitter)
    }
    /// Returns the geometry of this [`BeamSplitter`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Returns the transmission ratio of this [`BeamSplitter`].
    #[must_use]
    pub const fn transmission(&self) -> f64 {
        self.transmission
    }
    /// Returns the reflection ratio of this [`BeamSplitter`].
    #[must_use]
    pub const fn reflection(&self) -> f64 {
        self.reflection
    }
    /// Returns the transmission axis if this [`BeamSplitter`] is polarizing.
    #[must_use]
    pub const fn polarizing_axis(&self) -> Option<Angle> {
        self.polarizing_axis
    }
    pub(super) fn validate(&self) -> LbResult<()> {
        if !(0.0..=1.0).contains(&self.transmission) || !(0.0..=1.0).contains(&self.reflection) {
            return Err(LbError::Element(
                "transmission and reflection must be within (0.0..=1.0)".into(),
            ));
        }
        if self.transmission + self.reflection > 1.0 + f64::EPSILON {
            return Err(LbError::Element(
                "sum of transmission and reflection must not exceed 1.0".into(),
            ));
        }
        if self.polarizing_axis.is_some_and(|axis| !axis.is_finite()) {
            return Err(LbError::Element("polarizing axis must be finite".into()));
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
        let (is_polarizing, axis_deg) = self
            .polarizing_axis
            .map_or((false, 0.0), |axis| (true, axis.get::<degree>()));
        let (t_pol, t_fraction) = beamsplitter_split(
            ray.polarization(),
            &v_in,
            &hit.normal,
            is_polarizing,
            axis_deg,
            true,
        );
        let (r_pol, r_fraction) = beamsplitter_split(
            ray.polarization(),
            &v_in,
            &hit.normal,
            is_polarizing,
            axis_deg,
            false,
        );
        let (t_ratio, r_ratio) = if is_polarizing {
            (t_fraction, r_fraction)
        } else {
            (
                self.transmission * t_fraction,
                self.reflection * r_fraction,
            )
        };
        split(
            ray,
            (v_in, ray.intensity() * t_ratio, t_pol),
            (
                reflect(&v_in, &hit.normal),
                ray.intensity() * r_ratio,
                r_pol,
            ),
            config,
        )
    }
}
