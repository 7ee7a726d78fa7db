//! This is the documentation for the **lightbench** package, a 2D ray tracer for optical benches.
//!
//! Rays emitted by [`SourceDescriptor`]s are traced through flat or curved
//! [`OpticalElement`](elements::OpticalElement)s (mirrors, thin lenses, refractive interfaces,
//! beam splitters, waveplates, dichroic mirrors and beam blocks). Each ray carries a Jones vector,
//! a wavelength and a relative intensity. The result of a trace is a list of [`RayPath`]s.
//!
//! ```
//! use lightbench::{
//!     degree, elements::Mirror, geometry::Geometry, source::SourceDescriptor, tracer::trace,
//! };
//! use nalgebra::point;
//!
//! let mirror = Mirror::perfect(Geometry::segment(point![0.0, -40.0], point![0.0, 40.0]).unwrap());
//! let source = SourceDescriptor::new(point![-400.0, 0.0], degree!(0.0)).unwrap();
//! let paths = trace(&[mirror.into()], &[source], 80, 1e-3, 0.02);
//! assert_eq!(paths.len(), 1);
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod console;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod photometry;
pub mod polarization;
pub mod ray;
pub mod ray_path;
pub mod scenery;
pub mod source;
pub mod tracer;
pub mod utils;

pub use ray_path::RayPath;
pub use scenery::Scenery;
pub use source::SourceDescriptor;
pub use tracer::{trace, TraceConfig, Tracer};
