#![warn(missing_docs)]
//! Photometric and polarization kernel
//!
//! Pure functions transforming a [`Polarization`](crate::polarization::Polarization) and / or
//! returning intensity fractions for the different interaction types:
//!   - [`jones`]: mirror reflection, lens and waveplate transmission, (polarizing) beam splitting
//!   - [`fresnel`]: Snell's law and the unpolarized Fresnel reflectance of refractive interfaces
//!   - [`dichroic`]: wavelength dependent reflectance of dichroic mirrors
pub mod dichroic;
pub mod fresnel;
pub mod jones;

pub use dichroic::{dichroic_reflectance, PassType};
pub use fresnel::{fresnel_unpolarized, snell_refract};
pub use jones::{beamsplitter_split, lens_transmit, mirror_reflect, waveplate_transmit};
