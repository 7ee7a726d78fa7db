#![warn(missing_docs)]
//! Polarization state of a ray
//!
//! The polarization is stored as a Jones vector `[Ex, Ey]` in the fixed lab frame. `Ex` is the field
//! component lying in the bench plane, `Ey` the component perpendicular to it.
use nalgebra::Vector2;
use num::{complex::Complex64, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt::Display;
use uom::si::{angle::degree, f64::Angle};

/// A Jones vector describing a fully polarized field.
///
/// The vector is not required to be normalized. Its squared norm is returned by
/// [`Polarization::intensity`]. Every optical interaction creates a new [`Polarization`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polarization {
    jones: Vector2<Complex64>,
}
impl Default for Polarization {
    /// Horizontal (in-plane) linear polarization with unit intensity.
    fn default() -> Self {
        Self::horizontal()
    }
}
impl Polarization {
    /// Create a new [`Polarization`] from its two complex field components.
    #[must_use]
    pub fn new(ex: Complex64, ey: Complex64) -> Self {
        Self {
            jones: Vector2::new(ex, ey),
        }
    }
    /// Horizontal linear polarization `[1, 0]`.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Complex64::new(1.0, 0.0), Complex64::zero())
    }
    /// Vertical linear polarization `[0, 1]`.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Complex64::zero(), Complex64::new(1.0, 0.0))
    }
    /// Linear polarization at the given angle (in degrees) from the horizontal axis.
    #[must_use]
    pub fn linear(angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self::new(Complex64::new(cos, 0.0), Complex64::new(sin, 0.0))
    }
    /// Right circular polarization `[1, -i] / sqrt(2)`.
    #[must_use]
    pub fn right_circular() -> Self {
        Self::new(
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(0.0, -FRAC_1_SQRT_2),
        )
    }
    /// Left circular polarization `[1, i] / sqrt(2)`.
    #[must_use]
    pub fn left_circular() -> Self {
        Self::new(
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(0.0, FRAC_1_SQRT_2),
        )
    }
    /// Returns the horizontal field component.
    #[must_use]
    pub fn ex(&self) -> Complex64 {
        self.jones.x
    }
    /// Returns the vertical field component.
    #[must_use]
    pub fn ey(&self) -> Complex64 {
        self.jones.y
    }
    /// Returns the Jones vector of this [`Polarization`].
    #[must_use]
    pub const fn jones(&self) -> &Vector2<Complex64> {
        &self.jones
    }
    /// Returns the intensity (squared norm) of this [`Polarization`].
    #[must_use]
    pub fn intensity(&self) -> f64 {
        self.jones.x.norm_sqr() + self.jones.y.norm_sqr()
    }
    /// Returns a unit-intensity copy of this [`Polarization`].
    ///
    /// A zero field is returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = self.intensity().sqrt();
        if norm.is_zero() {
            self.clone()
        } else {
            Self::new(self.jones.x / norm, self.jones.y / norm)
        }
    }
    /// Returns a copy with both field components multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: Complex64) -> Self {
        Self::new(self.jones.x * factor, self.jones.y * factor)
    }
    /// Phase insensitive overlap `|<self|other>|^2 / (|self|^2 |other|^2)`.
    ///
    /// This is 1.0 for states that only differ by a global phase and 0.0 for orthogonal states.
    /// Returns 0.0 if one of the states has zero intensity.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> f64 {
        let denominator = self.intensity() * other.intensity();
        if denominator.is_zero() {
            return 0.0;
        }
        let inner = self.jones.x.conj() * other.jones.x + self.jones.y.conj() * other.jones.y;
        inner.norm_sqr() / denominator
    }
    /// Returns the orientation angle (degrees, in `(-90, 90]`) of the polarization ellipse.
    #[must_use]
    pub fn linear_angle(&self) -> f64 {
        // Stokes parameters S1, S2
        let s1 = self.jones.x.norm_sqr() - self.jones.y.norm_sqr();
        let s2 = 2.0 * (self.jones.x.conj() * self.jones.y).re;
        0.5 * s2.atan2(s1).to_degrees()
    }
}
impl Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.4}{:+.4}i, {:.4}{:+.4}i]",
            self.jones.x.re, self.jones.x.im, self.jones.y.re, self.jones.y.im
        )
    }
}

/// Named polarization states a source can emit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, strum::Display)]
pub enum PolarizationPreset {
    /// horizontal (in-plane) linear polarization
    #[default]
    Horizontal,
    /// vertical (out-of-plane) linear polarization
    Vertical,
    /// linear polarization at +45 degrees
    Diagonal,
    /// linear polarization at -45 degrees
    AntiDiagonal,
    /// right circular polarization
    RightCircular,
    /// left circular polarization
    LeftCircular,
    /// linear polarization at an arbitrary angle from the horizontal axis
    Linear(Angle),
    /// arbitrary Jones vector
    Custom {
        /// horizontal field component
        ex: Complex64,
        /// vertical field component
        ey: Complex64,
    },
}
impl From<&PolarizationPreset> for Polarization {
    fn from(preset: &PolarizationPreset) -> Self {
        match preset {
            PolarizationPreset::Horizontal => Self::horizontal(),
            PolarizationPreset::Vertical => Self::vertical(),
            PolarizationPreset::Diagonal => Self::linear(45.0),
            PolarizationPreset::AntiDiagonal => Self::linear(-45.0),
            PolarizationPreset::RightCircular => Self::right_circular(),
            PolarizationPreset::LeftCircular => Self::left_circular(),
            PolarizationPreset::Linear(angle) => Self::linear(angle.get::<degree>()),
            PolarizationPreset::Custom { ex, ey } => Self::new(*ex, *ey),
        }
    }
}
