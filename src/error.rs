use thiserror::Error;

/// Top-level error type for rail extraction and export.
#[derive(Debug, Error)]
pub enum RailError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to input coordinates.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("vertex {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Errors related to the vertex/edge graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("edge {edge} references vertex {index}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Errors related to extraction and resampling operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to shaping the exported asset.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize asset: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("serialized asset is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Errors related to export parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid parameter {parameter} = {value}: {reason}")]
    Invalid {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Convenience type alias for results using [`RailError`].
pub type Result<T> = std::result::Result<T, RailError>;
