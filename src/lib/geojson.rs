use super::token::GeometryKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Position = (f64, f64);

pub type Properties = Map<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::LineString { .. } => GeometryKind::LineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
        }
    }
}

/// The `type` member shared by features and their flattened form.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Feature,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Option<Properties>) -> Self {
        Feature {
            feature_type: FeatureType::Feature,
            id: None,
            geometry,
            properties,
        }
    }
}

/// A feature whose geometry has been flattened into a token sequence.
///
/// The first token is the geometry type tag, followed by one `"x, y"` token
/// per coordinate pair. Polygon rings are each terminated by `"||"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlattenedFeature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Vec<String>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
pub enum Entity<F> {
    FeatureCollection { features: Vec<F> },
}
