use thiserror::Error;
use vector_data::color::ColorError;
use vector_data::PathDataError;

/// Construction-time failures. Nothing here is raised while drawing.
#[derive(Error, Debug)]
pub enum VectorError {
    #[error("Malformed path data: {0}")]
    MalformedPathData(#[from] PathDataError),
    #[error("Viewport size must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("Intrinsic size must be positive, got {width}x{height}")]
    InvalidIntrinsicSize { width: f32, height: f32 },
    #[error("Vector has no paths or clip paths")]
    MissingRequiredGeometry,
    #[error("Animation target not found: {0}")]
    UnresolvedAnimationTarget(String),
    #[error("Unbalanced groups: {0}")]
    UnbalancedGroups(&'static str),
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
    #[error("Unknown animated property: {0}")]
    UnknownProperty(String),
    #[error("Property '{property}' cannot be applied to a {node} node")]
    PropertyMismatch {
        property: &'static str,
        node: &'static str,
    },
    #[error("Value for '{property}' has the wrong type")]
    InvalidPropertyValue { property: &'static str },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
