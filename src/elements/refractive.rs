#![warn(missing_docs)]
//! Boundary between two homogeneous media
use super::{split, SurfaceHit};
use crate::{
    error::{LbError, LbResult},
    geometry::{reflect, Geometry},
    photometry::{fresnel_unpolarized, mirror_reflect, snell_refract},
    ray::RayState,
    tracer::TraceConfig,
};
use serde::{Deserialize, Serialize};

/// A flat or curved interface between a medium with index `n1` and one with index `n2`.
///
/// Medium `n1` lies on the side the surface normal points to (for a [`Geometry::Segment`] from `p1`
/// to `p2` this is the left side looking from `p1` to `p2`, for a [`Geometry::CurvedSegment`] it is
/// the outside of the circle).
///
/// A ray is split into a refracted and a reflected branch with the unpolarized Fresnel ratios. The
/// transmitted branch keeps its polarization, the reflected one is transformed like on a mirror.
/// Beyond the critical angle the ray is totally reflected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefractiveInterface {
    geometry: Geometry,
    n1: f64,
    n2: f64,
}
impl RefractiveInterface {
    /// Creates a new [`RefractiveInterface`].
    ///
    /// # Errors
    ///
    /// This function will return an error if one of the refractive indices is not positive or not
    /// finite.
    pub fn new(geometry: Geometry, n1: f64, n2: f64) -> LbResult<Self> {
        let interface = Self { geometry, n1, n2 };
        interface.validate()?;
        Ok(interface)
    }
    /// Returns the geometry of this [`RefractiveInterface`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    /// Returns the refractive index on the normal side of this [`RefractiveInterface`].
    #[must_use]
    pub const fn n1(&self) -> f64 {
        self.n1
    }
    /// Returns the refractive index on the back side of this [`RefractiveInterface`].
    #[must_use]
    pub const fn n2(&self) -> f64 {
        self.n2
    }
    pub(super) fn validate(&self) -> LbResult<()> {
        if !self.n1.is_finite() || self.n1 <= 0.0 || !self.n2.is_finite() || self.n2 <= 0.0 {
            return Err(LbError::Element(
                "refractive index must be >0.0 and finite".into(),
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
        let (n_in, n_out) = if hit.reversed {
            (self.n2, self.n1)
        } else {
            (self.n1, self.n2)
        };
        let v_in = ray.direction();
        let (Some(direction), is_tir) = snell_refract(&v_in, &hit.normal, n_in, n_out) else {
            return Vec::new();
        };
        let reflected_pol = mirror_reflect(ray.polarization(), &v_in, &hit.normal);
        if is_tir {
            return vec![ray.spawn(
                direction,
                ray.intensity(),
                reflected_pol,
                config.epsilon_mm(),
            )];
        }
        let theta1 = (-v_in.dot(&hit.normal)).clamp(-1.0, 1.0).acos();
        let (reflectance, transmittance) = fresnel_unpolarized(theta1, n_in, n_out);
        split(
            ray,
            (
                direction,
                ray.intensity() * transmittance,
                ray.polarization().clone(),
            ),
            (
                reflect(&v_in, &hit.normal),
                ray.intensity() * reflectance,
                reflected_pol,
            ),
            config,
        )
    }
}
