use super::error::CodecError;
use super::geojson::{Geometry, Position};
use geo_types::{Coordinate, LineString, Point, Polygon};
use std::convert::TryFrom;

fn to_line_string(positions: &[Position]) -> LineString<f64> {
    positions.to_vec().into()
}

fn to_positions(line_string: &LineString<f64>) -> Vec<Position> {
    line_string
        .0
        .iter()
        .map(|&Coordinate { x, y }| (x, y))
        .collect()
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point { coordinates: (x, y) } => Point::new(*x, *y).into(),
            Geometry::LineString { coordinates } => to_line_string(coordinates).into(),
            Geometry::Polygon { coordinates } => {
                let mut rings = coordinates.iter().map(|ring| to_line_string(ring));
                let exterior = rings.next().unwrap_or_else(|| LineString(vec![]));
                Polygon::new(exterior, rings.collect()).into()
            }
        }
    }
}

fn kind_name(geometry: &geo_types::Geometry<f64>) -> &'static str {
    match geometry {
        geo_types::Geometry::Point(_) => "Point",
        geo_types::Geometry::LineString(_) => "LineString",
        geo_types::Geometry::Polygon(_) => "Polygon",
        geo_types::Geometry::Line(_) => "Line",
        geo_types::Geometry::MultiPoint(_) => "MultiPoint",
        geo_types::Geometry::MultiLineString(_) => "MultiLineString",
        geo_types::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo_types::Geometry::GeometryCollection(_) => "GeometryCollection",
        #[allow(unreachable_patterns)]
        _ => "Geometry",
    }
}

impl TryFrom<geo_types::Geometry<f64>> for Geometry {
    type Error = CodecError;

    fn try_from(geometry: geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        match geometry {
            geo_types::Geometry::Point(point) => Ok(Geometry::Point {
                coordinates: (point.x(), point.y()),
            }),
            geo_types::Geometry::LineString(line_string) => Ok(Geometry::LineString {
                coordinates: to_positions(&line_string),
            }),
            geo_types::Geometry::Polygon(polygon) => {
                let exterior = polygon.exterior();
                let interiors = polygon.interiors();
                let coordinates = if exterior.0.is_empty() && interiors.is_empty() {
                    vec![]
                } else {
                    std::iter::once(exterior)
                        .chain(interiors)
                        .map(to_positions)
                        .collect()
                };
                Ok(Geometry::Polygon { coordinates })
            }
            other => Err(CodecError::UnsupportedGeometry {
                tag: kind_name(&other).into(),
            }),
        }
    }
}
