use thiserror::Error;

/// Top-level error type for the Geolis SVG exporter.
#[derive(Debug, Error)]
pub enum GeolisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("unable to approximate spline within {tolerance} using {max_segments} segments")]
    ApproximationFailed { tolerance: f64, max_segments: usize },
}

/// Errors related to topological operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Consecutive edges of a group do not share an endpoint.
    #[error("edges not ordered (edge {index} does not touch its predecessor)")]
    EdgesNotOrdered { index: usize },
}

/// Errors raised while building path data.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path must start with moveto")]
    MissingMoveTo,

    /// A Bezier decomposition produced a segment the path syntax cannot express.
    #[error("wrong degree for bezier segment: {0}")]
    UnsupportedBezierDegree(usize),
}

/// Errors related to stroke and fill styles.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("stroke width must be finite and non-negative, got {0}")]
    InvalidStrokeWidth(f64),
}

/// Errors related to the draft parameter store.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown parameter name {0}")]
    UnknownParameter(String),

    #[error("parameter {name} has a different value type")]
    WrongType { name: &'static str },

    #[error("invalid parameter document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`GeolisError`].
pub type Result<T> = std::result::Result<T, GeolisError>;
