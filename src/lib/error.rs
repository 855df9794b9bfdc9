use super::token::GeometryKind;
use thiserror::Error;

/// Failures of the flatten/unflatten codec. None of them are transient,
/// they all point at input that will never decode.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("unsupported geometry type \"{tag}\"")]
    UnsupportedGeometry { tag: String },

    #[error("malformed token \"{token}\" at position {index}")]
    MalformedToken { index: usize, token: String },

    #[error("truncated {kind} geometry, expected at least {needed} more token(s)")]
    TruncatedInput { kind: GeometryKind, needed: usize },

    #[error("{count} unexpected token(s) after {kind} geometry")]
    TrailingTokens { kind: GeometryKind, count: usize },

    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected a Feature or FeatureCollection, found {found}")]
    UnexpectedDocument { found: String },
}

pub type Result<T> = std::result::Result<T, Error>;
