//! Absorber
use super::SurfaceHit;
use crate::{geometry::Geometry, ray::RayState, tracer::TraceConfig};
use serde::{Deserialize, Serialize};

/// A beam block absorbing every ray hitting it from either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamBlock {
    geometry: Geometry,
}
impl BeamBlock {
    /// Creates a new [`BeamBlock`].
    #[must_use]
    pub const fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }
    /// Returns the geometry of this [`BeamBlock`].
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    #[allow(clippy::unused_self)]
    pub(super) fn interact(
        &self,
        _ray: &RayState,
        _hit: &SurfaceHit,
        _config: &TraceConfig,
    ) -> Vec<RayState> {
        Vec::new()
    }
}
