#![warn(missing_docs)]
//! Terminated ray paths as returned by the tracer
use crate::{color::Rgba, polarization::Polarization};
use kahan::KahanSummator;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use uom::si::f64::Length;

/// Reason why the tracing of a ray stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Termination {
    /// no element was hit, the path was extended by the remaining propagation length
    Escaped,
    /// the ray ended on an element without any outgoing ray (beam block or pruned branches)
    Absorbed,
    /// the propagation budget was used up
    BudgetExhausted,
    /// the intensity dropped below the minimum intensity
    LowIntensity,
    /// the maximum number of interactions was reached
    EventCap,
}

/// The final, immutable result of tracing one ray (branch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayPath {
    points: Vec<Point2<f64>>,
    color: Rgba,
    polarization: Polarization,
    wavelength: Length,
    intensity: f64,
    events: usize,
    termination: Termination,
}
impl RayPath {
    pub(crate) fn new(
        points: Vec<Point2<f64>>,
        color: Rgba,
        polarization: Polarization,
        wavelength: Length,
        intensity: f64,
        events: usize,
        termination: Termination,
    ) -> Self {
        Self {
            points,
            color,
            polarization,
            wavelength,
            intensity,
            events,
            termination,
        }
    }
    /// Returns the points of this [`RayPath`] (at least two).
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }
    /// Returns the display color of this [`RayPath`]. Its alpha channel encodes the final intensity.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }
    /// Returns the alpha value (0..=255) of this [`RayPath`].
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.color.a
    }
    /// Returns the final polarization of this [`RayPath`].
    #[must_use]
    pub const fn polarization(&self) -> &Polarization {
        &self.polarization
    }
    /// Returns the wavelength of this [`RayPath`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Returns the final intensity of this [`RayPath`].
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }
    /// Returns the number of element interactions along this [`RayPath`].
    #[must_use]
    pub const fn events(&self) -> usize {
        self.events
    }
    /// Returns the [`Termination`] reason of this [`RayPath`].
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }
    /// Unit direction of the last segment of this [`RayPath`].
    ///
    /// Returns `None` if the last two points coincide.
    #[must_use]
    pub fn final_direction(&self) -> Option<Vector2<f64>> {
        let [.., second_last, last] = self.points.as_slice() else {
            return None;
        };
        (last - second_last).try_normalize(f64::EPSILON)
    }
    /// Geometric length of this [`RayPath`] in millimeters.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Sum of the final intensities of all given paths.
///
/// If `termination` is given, only paths with this termination reason are taken into account.
/// Compensated (Kahan) summation is used since large benches produce many small contributions.
#[must_use]
pub fn total_intensity(paths: &[RayPath], termination: Option<Termination>) -> f64 {
    let intensities: Vec<f64> = paths
        .iter()
        .filter(|p| termination.map_or(true, |t| p.termination == t))
        .map(RayPath::intensity)
        .collect();
    let kahan_sum: kahan::KahanSum<f64> = intensities.iter().kahan_sum();
    kahan_sum.sum()
}
