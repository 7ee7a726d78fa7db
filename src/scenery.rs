#![warn(missing_docs)]
//! Bench files
//!
//! A [`Scenery`] bundles the elements, the sources and the [`TraceConfig`] of an optical bench. It
//! can be read from and written to YAML and traces itself. The resulting ray paths can be exported
//! as CSV (one row per path vertex).
use crate::{
    elements::OpticalElement,
    error::{LbError, LbResult},
    ray_path::RayPath,
    source::SourceDescriptor,
    tracer::{TraceConfig, Tracer},
};
use serde::{Deserialize, Serialize};
use std::{fs, io::Write, path::Path};
use uom::si::length::nanometer;

/// An optical bench: elements, sources and tracer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    #[serde(default)]
    config: TraceConfig,
    #[serde(default)]
    elements: Vec<OpticalElement>,
    #[serde(default)]
    sources: Vec<SourceDescriptor>,
}
impl Scenery {
    /// Creates a new, empty [`Scenery`] with a default [`TraceConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Add an optical element to this [`Scenery`].
    pub fn add_element(&mut self, element: impl Into<OpticalElement>) {
        self.elements.push(element.into());
    }
    /// Add a ray source to this [`Scenery`].
    pub fn add_source(&mut self, source: SourceDescriptor) {
        self.sources.push(source);
    }
    /// Returns the elements of this [`Scenery`].
    #[must_use]
    pub fn elements(&self) -> &[OpticalElement] {
        &self.elements
    }
    /// Returns the sources of this [`Scenery`].
    #[must_use]
    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }
    /// Returns the tracer configuration of this [`Scenery`].
    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }
    /// Sets the tracer configuration of this [`Scenery`].
    pub fn set_config(&mut self, config: TraceConfig) {
        self.config = config;
    }
    /// Parse a [`Scenery`] from a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the string cannot be parsed or any element or source
    /// parameter is invalid.
    pub fn from_yaml(yaml: &str) -> LbResult<Self> {
        let scenery: Self = serde_yaml::from_str(yaml)
            .map_err(|e| LbError::Scenery(format!("parsing of bench failed: {e}")))?;
        scenery
            .config
            .validate()
            .map_err(|e| LbError::Scenery(format!("config: {e}")))?;
        for (idx, element) in scenery.elements.iter().enumerate() {
            element
                .validate()
                .map_err(|e| LbError::Scenery(format!("element #{idx}: {e}")))?;
        }
        for (idx, source) in scenery.sources.iter().enumerate() {
            source
                .validate()
                .map_err(|e| LbError::Scenery(format!("source #{idx}: {e}")))?;
        }
        Ok(scenery)
    }
    /// Serialize this [`Scenery`] into a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml(&self) -> LbResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LbError::Scenery(format!("serialization of bench failed: {e}")))
    }
    /// Read a [`Scenery`] from a YAML file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> LbResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LbError::Scenery(format!("cannot read file {} : {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }
    /// Write this [`Scenery`] to a YAML file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> LbResult<()> {
        fs::write(path, self.to_yaml()?).map_err(|e| {
            LbError::Scenery(format!("cannot write file {} : {}", path.display(), e))
        })
    }
    /// Trace all sources of this [`Scenery`].
    #[must_use]
    pub fn trace(&self, parallel: bool) -> Vec<RayPath> {
        let tracer = Tracer::new(&self.elements, self.config.clone());
        if parallel {
            tracer.trace_parallel(&self.sources)
        } else {
            tracer.trace(&self.sources)
        }
    }
}

/// One row of the CSV export.
#[derive(Debug, Serialize)]
struct VertexRecord {
    path: usize,
    vertex: usize,
    x: f64,
    y: f64,
    intensity: f64,
    color: String,
    wavelength_nm: f64,
    termination: String,
}

/// Write the vertices of all `paths` as CSV into `writer`.
///
/// Columns: `path,vertex,x,y,intensity,color,wavelength_nm,termination`.
///
/// # Errors
///
/// This function will return an error if writing fails.
pub fn write_csv<W: Write>(paths: &[RayPath], writer: W) -> LbResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (path_idx, path) in paths.iter().enumerate() {
        for (vertex_idx, point) in path.points().iter().enumerate() {
            csv_writer
                .serialize(VertexRecord {
                    path: path_idx,
                    vertex: vertex_idx,
                    x: point.x,
                    y: point.y,
                    intensity: path.intensity(),
                    color: path.color().to_string(),
                    wavelength_nm: path.wavelength().get::<nanometer>(),
                    termination: path.termination().to_string(),
                })
                .map_err(|e| LbError::Scenery(format!("writing csv failed: {e}")))?;
        }
    }
    csv_writer
        .flush()
        .map_err(|e| LbError::Scenery(format!("writing csv failed: {e}")))
}
