//! Configuration of a tracing run
use crate::{
    error::{LbError, LbResult},
    millimeter,
};
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::millimeter};

/// Parameters controlling a tracing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    max_events: usize,
    epsilon: Length,
    min_intensity: f64,
    tolerance: f64,
}
impl Default for TraceConfig {
    /// Create a default config with the following parameters:
    ///   - maximum number of interactions / ray: `80`
    ///   - epsilon advance after an interaction: `1e-3 mm`
    ///   - minimum (relative) intensity / ray: `0.02`
    ///   - intersection tolerance: `1e-9`
    fn default() -> Self {
        Self {
            max_events: 80,
            epsilon: millimeter!(1e-3),
            min_intensity: 0.02,
            tolerance: 1e-9,
        }
    }
}
impl TraceConfig {
    /// Assemble a config without checking the values (default tolerance).
    pub(crate) fn from_parts(max_events: usize, epsilon: Length, min_intensity: f64) -> Self {
        Self {
            max_events,
            epsilon,
            min_intensity,
            ..Self::default()
        }
    }
    /// Returns the maximum number of interactions per ray.
    #[must_use]
    pub const fn max_events(&self) -> usize {
        self.max_events
    }
    /// Sets the maximum number of interactions per ray.
    ///
    /// # Errors
    ///
    /// This function will return an error if `max_events` is zero.
    pub fn set_max_events(&mut self, max_events: usize) -> LbResult<()> {
        if max_events == 0 {
            return Err(LbError::Config("max events must be >0".into()));
        }
        self.max_events = max_events;
        Ok(())
    }
    /// Returns the distance a ray is advanced past an interaction point.
    #[must_use]
    pub fn epsilon(&self) -> Length {
        self.epsilon
    }
    /// Returns the epsilon advance in millimeters.
    #[must_use]
    pub fn epsilon_mm(&self) -> f64 {
        self.epsilon.get::<millimeter>()
    }
    /// Sets the distance a ray is advanced past an interaction point.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given length is negative or not finite.
    pub fn set_epsilon(&mut self, epsilon: Length) -> LbResult<()> {
        if !epsilon.is_finite() || epsilon.is_sign_negative() {
            return Err(LbError::Config("epsilon must be >=0.0 and finite".into()));
        }
        self.epsilon = epsilon;
        Ok(())
    }
    /// Returns the lower intensity limit. Rays and branches below this limit are dropped.
    #[must_use]
    pub const fn min_intensity(&self) -> f64 {
        self.min_intensity
    }
    /// Sets the lower intensity limit.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given limit is negative or not finite.
    pub fn set_min_intensity(&mut self, min_intensity: f64) -> LbResult<()> {
        if !min_intensity.is_finite() || min_intensity.is_sign_negative() {
            return Err(LbError::Config(
                "minimum intensity must be >=0.0 and finite".into(),
            ));
        }
        self.min_intensity = min_intensity;
        Ok(())
    }
    /// Returns the tolerance used for the intersection tests.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
    /// Sets the tolerance used for the intersection tests.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given tolerance is not positive or not finite.
    pub fn set_tolerance(&mut self, tolerance: f64) -> LbResult<()> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(LbError::Config("tolerance must be >0.0 and finite".into()));
        }
        self.tolerance = tolerance;
        Ok(())
    }
    /// Check a config that was not built by the setters (e.g. a deserialized one).
    ///
    /// # Errors
    ///
    /// This function will return an error if any value would be rejected by its setter.
    pub fn validate(&self) -> LbResult<()> {
        let mut checked = Self::default();
        checked.set_max_events(self.max_events)?;
        checked.set_epsilon(self.epsilon)?;
        checked.set_min_intensity(self.min_intensity)?;
        checked.set_tolerance(self.tolerance)
    }
}
