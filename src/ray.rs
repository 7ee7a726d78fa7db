#![warn(missing_docs)]
//! State of a ray in flight
use crate::{
    color::Rgba,
    elements::ElementId,
    geometry::normalize,
    polarization::Polarization,
    ray_path::{RayPath, Termination},
    utils::intensity_to_alpha,
};
use nalgebra::{Point2, Vector2};
use num::Zero;
use std::fmt::Display;
use uom::si::{f64::Length, length::nanometer};

/// Returns `false` for the zero wavelength, which marks rays without a wavelength.
#[must_use]
pub fn is_specified(wavelength: Length) -> bool {
    !wavelength.is_zero()
}

/// The state of one ray segment while it is traced.
///
/// A [`RayState`] is never modified in place by an optical interaction. Each interaction derives new
/// states from the incoming one. Positions and lengths are given in millimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct RayState {
    /// current start position of the ray
    position: Point2<f64>,
    /// unit propagation direction
    direction: Vector2<f64>,
    /// relative intensity in `0.0..=1.0`
    intensity: f64,
    polarization: Polarization,
    /// wavelength of the ray, zero if unspecified
    wavelength: Length,
    /// all recorded points of the path so far (emission point and interaction points)
    path: Vec<Point2<f64>>,
    /// remaining propagation budget in millimeters
    remaining_length: f64,
    /// number of interactions so far
    events: usize,
    /// the element this ray left last
    last_element: Option<ElementId>,
    /// display color of the source
    color: Rgba,
}
impl RayState {
    /// Creates a new [`RayState`] starting at `position`.
    ///
    /// The direction vector is normalized and the start position becomes the first point of the
    /// path.
    #[must_use]
    pub fn new(
        position: Point2<f64>,
        direction: Vector2<f64>,
        intensity: f64,
        polarization: Polarization,
        wavelength: Length,
        max_length: f64,
    ) -> Self {
        let mut path = Vec::with_capacity(16);
        path.push(position);
        Self {
            position,
            direction: normalize(&direction),
            intensity,
            polarization,
            wavelength,
            path,
            remaining_length: max_length,
            events: 0,
            last_element: None,
            color: Rgba::default(),
        }
    }
    /// Modifies the display color of this [`RayState`]. This function can be used with the "builder pattern".
    #[must_use]
    pub const fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }
    /// Returns the position of this [`RayState`].
    #[must_use]
    pub const fn position(&self) -> Point2<f64> {
        self.position
    }
    /// Returns the (unit) direction of this [`RayState`].
    #[must_use]
    pub const fn direction(&self) -> Vector2<f64> {
        self.direction
    }
    /// Returns the relative intensity of this [`RayState`].
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }
    /// Returns the polarization of this [`RayState`].
    #[must_use]
    pub const fn polarization(&self) -> &Polarization {
        &self.polarization
    }
    /// Returns the wavelength of this [`RayState`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Returns `true` if a wavelength was given for this ray.
    ///
    /// A zero wavelength means "display color only". Wavelength dependent elements then fall back to
    /// a neutral behaviour.
    #[must_use]
    pub fn has_wavelength(&self) -> bool {
        is_specified(self.wavelength)
    }
    /// Returns the recorded path points of this [`RayState`].
    #[must_use]
    pub fn path(&self) -> &[Point2<f64>] {
        &self.path
    }
    /// Returns the remaining propagation budget (mm) of this [`RayState`].
    #[must_use]
    pub const fn remaining_length(&self) -> f64 {
        self.remaining_length
    }
    /// Returns the number of interactions of this [`RayState`].
    #[must_use]
    pub const fn events(&self) -> usize {
        self.events
    }
    /// Returns the element this ray left last.
    #[must_use]
    pub const fn last_element(&self) -> Option<ElementId> {
        self.last_element
    }
    /// Returns the display color of this [`RayState`].
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }
    /// State of this ray right at an element interaction.
    ///
    /// The hit point is appended to the path and becomes the new position, the budget is reduced by
    /// the travelled `distance`, the event counter is incremented and `element` is remembered as the
    /// last element.
    #[must_use]
    pub(crate) fn arrive_at(&self, hit_point: Point2<f64>, distance: f64, element: ElementId) -> Self {
        let mut arrived = self.clone();
        arrived.path.push(hit_point);
        arrived.position = hit_point;
        arrived.remaining_length -= distance;
        arrived.events += 1;
        arrived.last_element = Some(element);
        arrived
    }
    /// Derive an outgoing ray from this (arrived) state.
    ///
    /// The new ray starts `epsilon` past the current position along the new direction so that the
    /// next intersection search does not find the surface it is leaving at `t≈0`. Path, budget,
    /// event count, last element, wavelength and color are inherited.
    #[must_use]
    pub fn spawn(
        &self,
        direction: Vector2<f64>,
        intensity: f64,
        polarization: Polarization,
        epsilon: f64,
    ) -> Self {
        let direction = normalize(&direction);
        Self {
            position: self.position + epsilon * direction,
            direction,
            intensity,
            polarization,
            wavelength: self.wavelength,
            path: self.path.clone(),
            remaining_length: self.remaining_length,
            events: self.events,
            last_element: self.last_element,
            color: self.color,
        }
    }
    /// Append an end point to the path (e.g. when the ray leaves the bench).
    pub(crate) fn push_point(&mut self, point: Point2<f64>) {
        self.path.push(point);
    }
    /// Turn this ray into a renderable [`RayPath`].
    ///
    /// Returns `None` if less than two points were recorded (the ray never moved).
    #[must_use]
    pub fn into_path(self, termination: Termination) -> Option<RayPath> {
        if self.path.len() < 2 {
            return None;
        }
        Some(RayPath::new(
            self.path,
            self.color.with_alpha(intensity_to_alpha(self.intensity)),
            self.polarization,
            self.wavelength,
            self.intensity,
            self.events,
            termination,
        ))
    }
}
impl Display for RayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nm = Length::format_args(nanometer, uom::fmt::DisplayStyle::Abbreviation);
        write!(
            f,
            "pos: ({:.3} mm, {:.3} mm), dir: ({:.4}, {:.4}), intensity: {:.4}, wavelength: {:.1}, events: {}",
            self.position.x,
            self.position.y,
            self.direction.x,
            self.direction.y,
            self.intensity,
            nm.with(self.wavelength),
            self.events
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nanometer;
    use approx::assert_abs_diff_eq;
    use nalgebra::point;

    fn ray() -> RayState {
        RayState::new(
            point![0.0, 0.0],
            Vector2::new(2.0, 0.0),
            1.0,
            Polarization::default(),
            nanometer!(633.0),
            100.0,
        )
    }
    #[test]
    fn new() {
        let ray = ray();
        assert_eq!(ray.position(), point![0.0, 0.0]);
        assert_eq!(ray.direction(), Vector2::new(1.0, 0.0));
        assert_eq!(ray.intensity(), 1.0);
        assert_eq!(ray.path(), &[point![0.0, 0.0]]);
        assert_eq!(ray.remaining_length(), 100.0);
        assert_eq!(ray.events(), 0);
        assert_eq!(ray.last_element(), None);
        assert_eq!(ray.color(), Rgba::default());
        assert!(ray.has_wavelength());
    }
    #[test]
    fn unspecified_wavelength() {
        let ray = RayState::new(
            point![0.0, 0.0],
            Vector2::new(1.0, 0.0),
            1.0,
            Polarization::default(),
            nanometer!(0.0),
            100.0,
        );
        assert!(!ray.has_wavelength());
        assert!(!is_specified(nanometer!(0.0)));
        assert!(is_specified(nanometer!(1064.0)));
    }
    #[test]
    fn with_color() {
        let ray = ray().with_color(Rgba::new(1, 2, 3, 4));
        assert_eq!(ray.color(), Rgba::new(1, 2, 3, 4));
    }
    #[test]
    fn arrive_and_spawn() {
        let arrived = ray().arrive_at(point![10.0, 0.0], 10.0, ElementId(3));
        assert_eq!(arrived.path(), &[point![0.0, 0.0], point![10.0, 0.0]]);
        assert_eq!(arrived.remaining_length(), 90.0);
        assert_eq!(arrived.events(), 1);
        assert_eq!(arrived.last_element(), Some(ElementId(3)));
        let child = arrived.spawn(
            Vector2::new(0.0, -3.0),
            0.5,
            Polarization::vertical(),
            1e-3,
        );
        assert_abs_diff_eq!(child.position().x, 10.0);
        assert_abs_diff_eq!(child.position().y, -1e-3);
        assert_eq!(child.direction(), Vector2::new(0.0, -1.0));
        assert_eq!(child.intensity(), 0.5);
        assert_eq!(child.path(), arrived.path());
        assert_eq!(child.events(), 1);
        assert_eq!(child.remaining_length(), 90.0);
        assert_eq!(child.last_element(), Some(ElementId(3)));
        assert_eq!(child.polarization(), &Polarization::vertical());
    }
    #[test]
    fn into_path_requires_two_points() {
        assert!(ray().into_path(Termination::Escaped).is_none());
        let mut moved = ray();
        moved.push_point(point![5.0, 0.0]);
        let path = moved.into_path(Termination::Escaped).unwrap();
        assert_eq!(path.points().len(), 2);
        assert_eq!(path.color().a, 255);
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", ray()),
            "pos: (0.000 mm, 0.000 mm), dir: (1.0000, 0.0000), intensity: 1.0000, wavelength: 633.0 nm, events: 0"
        );
    }
}
