#![warn(missing_docs)]
//! The optical elements of a bench.
//!
//! Every element owns exactly one [`Geometry`] and some variant specific optical properties. The
//! [`OpticalElement`] enum bundles all variants and dispatches the intersection and interaction
//! calls of the tracer.
//!
//! An interaction receives the ray state right *at* the hit point (the hit point is already the last
//! point of its path) together with a [`SurfaceHit`] and returns zero, one or two outgoing rays. An
//! empty list means the ray was absorbed.
mod beam_block;
mod beam_splitter;
mod dichroic;
mod lens;
mod mirror;
mod refractive;
mod waveplate;

pub use beam_block::BeamBlock;
pub use beam_splitter::BeamSplitter;
pub use dichroic::Dichroic;
pub use lens::Lens;
pub use mirror::Mirror;
pub use refractive::RefractiveInterface;
pub use waveplate::Waveplate;

use crate::{
    error::LbResult,
    geometry::{Geometry, Hit},
    polarization::Polarization,
    ray::RayState,
    tracer::TraceConfig,
};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::IntoStaticStr;

/// Identifier of an element during a tracing run (its index in the element list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Local surface data at an intersection point as seen by the incoming ray.
///
/// `normal` always opposes the incoming ray direction, `tangent` is flipped together with it.
/// `reversed` records whether this required flipping the stored surface normal, i.e. whether the ray
/// travels from side "2" to side "1" of the element.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceHit {
    /// intersection point
    pub point: Point2<f64>,
    /// unit normal facing the incoming ray
    pub normal: Vector2<f64>,
    /// unit tangent
    pub tangent: Vector2<f64>,
    /// center of the element (segment midpoint or chord midpoint of an arc)
    pub center: Point2<f64>,
    /// `true` if the ray propagates along the stored surface normal
    pub reversed: bool,
}
impl SurfaceHit {
    /// Canonicalize a geometric [`Hit`] for a ray travelling along `direction`.
    #[must_use]
    pub fn facing(hit: &Hit, direction: &Vector2<f64>) -> Self {
        let reversed = direction.dot(&hit.normal) > 0.0;
        let (normal, tangent) = if reversed {
            (-hit.normal, -hit.tangent)
        } else {
            (hit.normal, hit.tangent)
        };
        Self {
            point: hit.point,
            normal,
            tangent,
            center: hit.center,
            reversed,
        }
    }
}

/// All available optical elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
pub enum OpticalElement {
    /// flat or curved mirror
    Mirror(Mirror),
    /// ideal thin lens
    Lens(Lens),
    /// boundary between two media
    RefractiveInterface(RefractiveInterface),
    /// intensity or polarizing beam splitter
    BeamSplitter(BeamSplitter),
    /// retarder plate
    Waveplate(Waveplate),
    /// wavelength dependent mirror
    Dichroic(Dichroic),
    /// absorber
    BeamBlock(BeamBlock),
}
impl OpticalElement {
    /// Returns the [`Geometry`] of this element.
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        match self {
            Self::Mirror(e) => e.geometry(),
            Self::Lens(e) => e.geometry(),
            Self::RefractiveInterface(e) => e.geometry(),
            Self::BeamSplitter(e) => e.geometry(),
            Self::Waveplate(e) => e.geometry(),
            Self::Dichroic(e) => e.geometry(),
            Self::BeamBlock(e) => e.geometry(),
        }
    }
    /// Returns the type name of this element (e.g. `"Mirror"`).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
    /// Axis aligned bounding box `(min, max)` spanned by the endpoints of the element geometry.
    #[must_use]
    pub fn bounding_box(&self) -> (Point2<f64>, Point2<f64>) {
        self.geometry().bounding_box()
    }
    /// Intersect a ray with this element.
    #[must_use]
    pub fn intersect(&self, origin: &Point2<f64>, dir: &Vector2<f64>, tol: f64) -> Option<Hit> {
        self.geometry().intersect(origin, dir, tol)
    }
    /// Check the geometry and the optical parameters of this element.
    ///
    /// The constructors of all elements perform the same checks. This function is needed for elements
    /// coming from deserialization.
    ///
    /// # Errors
    ///
    /// This function will return an error if the geometry is degenerate or any parameter is outside
    /// its valid range.
    pub fn validate(&self) -> LbResult<()> {
        self.geometry().validate()?;
        match self {
            Self::Mirror(e) => e.validate(),
            Self::Lens(e) => e.validate(),
            Self::RefractiveInterface(e) => e.validate(),
            Self::BeamSplitter(e) => e.validate(),
            Self::Waveplate(e) => e.validate(),
            Self::Dichroic(e) => e.validate(),
            Self::BeamBlock(_) => Ok(()),
        }
    }
    /// Compute the outgoing rays of an incoming (arrived) ray.
    #[must_use]
    pub fn interact(&self, ray: &RayState, hit: &SurfaceHit, config: &TraceConfig) -> Vec<RayState> {
        match self {
            Self::Mirror(e) => e.interact(ray, hit, config),
            Self::Lens(e) => e.interact(ray, hit, config),
            Self::RefractiveInterface(e) => e.interact(ray, hit, config),
            Self::BeamSplitter(e) => e.interact(ray, hit, config),
            Self::Waveplate(e) => e.interact(ray, hit, config),
            Self::Dichroic(e) => e.interact(ray, hit, config),
            Self::BeamBlock(e) => e.interact(ray, hit, config),
        }
    }
}
macro_rules! impl_from_element {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for OpticalElement {
                fn from(element: $variant) -> Self {
                    Self::$variant(element)
                }
            }
        )*
    };
}
impl_from_element!(
    Mirror,
    Lens,
    RefractiveInterface,
    BeamSplitter,
    Waveplate,
    Dichroic,
    BeamBlock
);

/// Split an arrived ray into a transmitted and a reflected branch.
///
/// A branch is created if its intensity reaches the configured minimum (inclusive), so a floor of
/// zero keeps even empty branches.
fn split(
    ray: &RayState,
    transmitted: (Vector2<f64>, f64, Polarization),
    reflected: (Vector2<f64>, f64, Polarization),
    config: &TraceConfig,
) -> Vec<RayState> {
    [transmitted, reflected]
        .into_iter()
        .filter(|(_, intensity, _)| *intensity >= config.min_intensity())
        .map(|(direction, intensity, polarization)| {
            ray.spawn(direction, intensity, polarization, config.epsilon_mm())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::LbError;
    use crate::utils::test_helper::test_helper::interact_with;
    use nalgebra::point;

    fn block() -> OpticalElement {
        BeamBlock::new(Geometry::segment(point![0.0, -1.0], point![0.0, 1.0]).unwrap()).into()
    }
    #[test]
    fn element_id_display() {
        assert_eq!(format!("{}", ElementId(7)), "#7");
    }
    #[test]
    fn facing_flips_normal() {
        let geometry = Geometry::segment(point![0.0, 1.0], point![0.0, -1.0]).unwrap();
        let hit = geometry
            .intersect(&point![-5.0, 0.0], &Vector2::new(1.0, 0.0), 1e-9)
            .unwrap();
        assert_eq!(hit.normal, Vector2::new(-1.0, 0.0));
        let facing = SurfaceHit::facing(&hit, &Vector2::new(1.0, 0.0));
        assert!(!facing.reversed);
        assert_eq!(facing.normal, hit.normal);
        let hit = geometry
            .intersect(&point![5.0, 0.0], &Vector2::new(-1.0, 0.0), 1e-9)
            .unwrap();
        let facing = SurfaceHit::facing(&hit, &Vector2::new(-1.0, 0.0));
        assert!(facing.reversed);
        assert_eq!(facing.normal, Vector2::new(1.0, 0.0));
        assert_eq!(facing.tangent, -hit.tangent);
    }
    #[test]
    fn kind() {
        assert_eq!(block().kind(), "BeamBlock");
    }
    #[test]
    fn bounding_box() {
        assert_eq!(
            block().bounding_box(),
            (point![0.0, -1.0], point![0.0, 1.0])
        );
    }
    #[test]
    fn validate() {
        assert!(block().validate().is_ok());
        let mirror = OpticalElement::Mirror(
            serde_yaml::from_str(
                "geometry: !Segment\n  p1: [0.0, 0.0]\n  p2: [0.0, 1.0]\nreflectivity: 1.5\n",
            )
            .unwrap(),
        );
        assert!(mirror.validate().is_err());
        let lens = OpticalElement::Lens(
            serde_yaml::from_str(
                "geometry: !Segment\n  p1: [0.0, 0.0]\n  p2: [0.0, 0.0]\nfocal_length: 0.1\n",
            )
            .unwrap(),
        );
        assert_eq!(
            lens.validate(),
            Err(LbError::Element("endpoints must not coincide".into()))
        );
    }
    #[test]
    fn block_absorbs() {
        let outputs = interact_with(
            &block(),
            point![-10.0, 0.0],
            Vector2::new(1.0, 0.0),
            Polarization::default(),
            1.0,
        );
        assert!(outputs.is_empty());
    }
}
