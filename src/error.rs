#![warn(missing_docs)]
//! Lightbench specific error structures
use std::{error::Error, fmt::Display};

/// Lightbench specific Result type
pub type LbResult<T> = std::result::Result<T, LbError>;

/// Errors that can be returned while setting up a bench.
///
/// **Note**: The tracing itself never fails. Degenerate geometry or runaway bounce chains are
/// handled by the tracer as regular termination conditions. Errors only occur while constructing
/// elements, sources or configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LbError {
    /// invalid parameters of an optical element
    Element(String),
    /// invalid parameters of a ray source
    Source(String),
    /// invalid tracer configuration values
    Config(String),
    /// errors while reading or writing a bench file
    Scenery(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for LbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element(m) => {
                write!(f, "Element:{m}")
            }
            Self::Source(m) => {
                write!(f, "Source:{m}")
            }
            Self::Config(m) => {
                write!(f, "Config:{m}")
            }
            Self::Scenery(m) => {
                write!(f, "Scenery:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Lightbench Error:Other:{m}"),
        }
    }
}
impl Error for LbError {}

impl std::convert::From<String> for LbError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
