//! Extraction of ordered rail centerlines from 1-D edge graphs, arc-length
//! resampling, and shaping of the resulting splines into a rail asset.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use config::RailExportParams;
pub use error::{RailError, Result};
