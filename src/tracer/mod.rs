#![warn(missing_docs)]
//! The tracing engine
//!
//! Rays are traced with an explicit stack of pending [`RayState`]s. For every popped ray the
//! following steps are performed:
//!   1. termination checks (budget, event cap, minimum intensity)
//!   2. search of the nearest element hit ahead of the ray (skipping the element the ray just left)
//!   3. no hit: the ray escapes, its path is extended by the remaining budget
//!   4. hit: the element creates 0..2 new rays which are pushed onto the stack
//!
//! Terminated rays are turned into [`RayPath`]s.
mod config;

pub use config::TraceConfig;

use crate::{
    elements::{ElementId, OpticalElement, SurfaceHit},
    geometry::Hit,
    millimeter,
    ray::RayState,
    ray_path::{RayPath, Termination},
    source::SourceDescriptor,
};
use log::{debug, info};
use rayon::prelude::*;
use strum::IntoEnumIterator;

/// Traces rays from sources through a fixed set of optical elements.
///
/// The element list is borrowed immutably for the lifetime of the tracer. Distinct rays do not
/// share any state, so [`Tracer::trace_parallel`] can distribute them over a thread pool.
#[derive(Debug, Clone)]
pub struct Tracer<'a> {
    elements: &'a [OpticalElement],
    config: TraceConfig,
}
impl<'a> Tracer<'a> {
    /// Creates a new [`Tracer`].
    #[must_use]
    pub const fn new(elements: &'a [OpticalElement], config: TraceConfig) -> Self {
        Self { elements, config }
    }
    /// Returns the configuration of this [`Tracer`].
    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }
    /// Returns the elements of this [`Tracer`].
    #[must_use]
    pub const fn elements(&self) -> &[OpticalElement] {
        self.elements
    }
    /// Trace all rays of the given sources and return the resulting paths.
    #[must_use]
    pub fn trace(&self, sources: &[SourceDescriptor]) -> Vec<RayPath> {
        let mut stack = self.initial_rays(sources);
        // the first emitted ray is traced first
        stack.reverse();
        let paths = self.run(stack);
        log_summary(&paths);
        paths
    }
    /// Same as [`Tracer::trace`] but each initial ray is traced as an independent task on the
    /// `rayon` thread pool.
    ///
    /// The per-ray results are concatenated in emission order, so the result equals the one of the
    /// sequential trace.
    #[must_use]
    pub fn trace_parallel(&self, sources: &[SourceDescriptor]) -> Vec<RayPath> {
        let paths: Vec<RayPath> = self
            .initial_rays(sources)
            .into_par_iter()
            .flat_map_iter(|ray| self.run(vec![ray]))
            .collect();
        log_summary(&paths);
        paths
    }
    /// Trace a single ray (including all its branches).
    #[must_use]
    pub fn trace_ray(&self, ray: RayState) -> Vec<RayPath> {
        self.run(vec![ray])
    }
    fn initial_rays(&self, sources: &[SourceDescriptor]) -> Vec<RayState> {
        let rays: Vec<RayState> = sources
            .iter()
            .flat_map(SourceDescriptor::initial_rays)
            .collect();
        info!(
            "tracing {} rays of {} sources through {} elements",
            rays.len(),
            sources.len(),
            self.elements.len()
        );
        rays
    }
    fn run(&self, mut stack: Vec<RayState>) -> Vec<RayPath> {
        let mut paths = Vec::new();
        while let Some(mut ray) = stack.pop() {
            if let Some(termination) = self.termination(&ray) {
                paths.extend(ray.into_path(termination));
                continue;
            }
            let Some((id, hit)) = self.nearest_hit(&ray) else {
                let end = ray.position() + ray.remaining_length() * ray.direction();
                ray.push_point(end);
                paths.extend(ray.into_path(Termination::Escaped));
                continue;
            };
            let element = &self.elements[id.0];
            let surface_hit = SurfaceHit::facing(&hit, &ray.direction());
            let distance = hit.t * ray.direction().norm();
            let arrived = ray.arrive_at(hit.point, distance, id);
            let outputs = element.interact(&arrived, &surface_hit, &self.config);
            if outputs.is_empty() {
                paths.extend(arrived.into_path(Termination::Absorbed));
            } else {
                stack.extend(outputs.into_iter().rev());
            }
        }
        paths
    }
    fn termination(&self, ray: &RayState) -> Option<Termination> {
        if ray.remaining_length() <= 0.0 {
            Some(Termination::BudgetExhausted)
        } else if ray.events() >= self.config.max_events() {
            Some(Termination::EventCap)
        } else if ray.intensity() < self.config.min_intensity() {
            Some(Termination::LowIntensity)
        } else {
            None
        }
    }
    /// Nearest element hit within the remaining budget of the ray.
    fn nearest_hit(&self, ray: &RayState) -> Option<(ElementId, Hit)> {
        let position = ray.position();
        let direction = ray.direction();
        let dir_norm = direction.norm();
        self.elements
            .iter()
            .enumerate()
            .map(|(idx, element)| (ElementId(idx), element))
            .filter(|(id, _)| ray.last_element() != Some(*id))
            .filter_map(|(id, element)| {
                element
                    .intersect(&position, &direction, self.config.tolerance())
                    .map(|hit| (id, hit))
            })
            .filter(|(_, hit)| hit.t * dir_norm <= ray.remaining_length())
            .min_by(|a, b| a.1.t.total_cmp(&b.1.t))
    }
}

/// Trace all rays of `sources` through `elements`.
///
/// `epsilon` is given in millimeters. The values are not checked, use a [`Tracer`] with a validated
/// [`TraceConfig`] instead if they come from user input.
#[must_use]
pub fn trace(
    elements: &[OpticalElement],
    sources: &[SourceDescriptor],
    max_events: usize,
    epsilon: f64,
    min_intensity: f64,
) -> Vec<RayPath> {
    let config = TraceConfig::from_parts(max_events, millimeter!(epsilon), min_intensity);
    Tracer::new(elements, config).trace(sources)
}

fn log_summary(paths: &[RayPath]) {
    let counts: Vec<String> = Termination::iter()
        .map(|t| {
            let count = paths.iter().filter(|p| p.termination() == t).count();
            format!("{t}: {count}")
        })
        .collect();
    debug!("{} ray paths ({})", paths.len(), counts.join(", "));
}
