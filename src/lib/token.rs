use super::error::CodecError;
use super::geojson::Position;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Joins the components of a point token.
pub const POSITION_SEPARATOR: &str = ", ";

/// Terminates every ring of a flattened polygon.
pub const RING_SEPARATOR: &str = "||";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = CodecError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Point" => Ok(GeometryKind::Point),
            "LineString" => Ok(GeometryKind::LineString),
            "Polygon" => Ok(GeometryKind::Polygon),
            _ => Err(CodecError::UnsupportedGeometry { tag: tag.into() }),
        }
    }
}

/// One element of a flattened geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Tag(GeometryKind),
    Position(Position),
    RingEnd,
}

impl Token {
    /// `index` is the token's offset in the flattened sequence and only used
    /// for error reporting.
    pub fn decode(token: &str, index: usize) -> Result<Self, CodecError> {
        if token == RING_SEPARATOR {
            return Ok(Token::RingEnd);
        }
        if let Ok(kind) = token.parse() {
            return Ok(Token::Tag(kind));
        }
        decode_position(token, index).map(Token::Position)
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        match self {
            Token::Tag(kind) => Ok(kind.as_str().into()),
            Token::Position(position) => encode_position(*position),
            Token::RingEnd => Ok(RING_SEPARATOR.into()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Tag(kind) => write!(f, "{}", kind),
            Token::Position((x, y)) => write!(f, "{}{}{}", x, POSITION_SEPARATOR, y),
            Token::RingEnd => f.write_str(RING_SEPARATOR),
        }
    }
}

/// Renders a coordinate pair as a point token, e.g. `(102.0, 0.5)` becomes
/// `"102, 0.5"`. `f64`'s `Display` yields the shortest text that parses back
/// to the same value, so decoding is exact.
pub fn encode_position(position: Position) -> Result<String, CodecError> {
    let (x, y) = position;
    if !x.is_finite() || !y.is_finite() {
        return Err(CodecError::NonFiniteCoordinate { x, y });
    }
    Ok([x, y].iter().join(POSITION_SEPARATOR))
}

pub fn decode_position(token: &str, index: usize) -> Result<Position, CodecError> {
    let malformed = || CodecError::MalformedToken {
        index,
        token: token.into(),
    };
    let components: Vec<f64> = token
        .split(POSITION_SEPARATOR)
        .map(|component| component.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect::<Option<_>>()
        .ok_or_else(malformed)?;
    match components.as_slice() {
        [x, y] => Ok((*x, *y)),
        _ => Err(malformed()),
    }
}
