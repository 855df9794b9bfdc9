use super::error::CodecError;
use super::geojson::{Feature, FlattenedFeature, Geometry, Position};
use super::token::{GeometryKind, Token};
use log::trace;
use std::mem;

/// Typed token sequence of a geometry, starting with its type tag.
pub fn tokens(geometry: &Geometry) -> Vec<Token> {
    let mut tokens = vec![Token::Tag(geometry.kind())];
    match geometry {
        Geometry::Point { coordinates } => tokens.push(Token::Position(*coordinates)),
        Geometry::LineString { coordinates } => {
            tokens.extend(coordinates.iter().copied().map(Token::Position))
        }
        Geometry::Polygon { coordinates } => {
            for ring in coordinates {
                tokens.extend(ring.iter().copied().map(Token::Position));
                tokens.push(Token::RingEnd);
            }
        }
    }
    tokens
}

/// Flatten a feature's geometry into a one-dimensional token sequence.
///
/// `id` and `properties` are copied over untouched.
///
/// # Example
///
/// ```
/// use geo_flatten::{flatten, Feature, Geometry};
///
/// let geometry = Geometry::Point { coordinates: (102.0, 0.5) };
/// let flat = flatten(&Feature::new(geometry, None)).unwrap();
/// assert_eq!(flat.geometry, vec!["Point", "102, 0.5"]);
/// ```
pub fn flatten(feature: &Feature) -> Result<FlattenedFeature, CodecError> {
    let geometry = tokens(&feature.geometry)
        .iter()
        .map(Token::encode)
        .collect::<Result<Vec<_>, _>>()?;
    trace!(
        "flattened {} into {} tokens",
        feature.geometry.kind(),
        geometry.len()
    );
    Ok(FlattenedFeature {
        feature_type: feature.feature_type,
        id: feature.id.clone(),
        geometry,
        properties: feature.properties.clone(),
    })
}

/// Inverse of [`flatten`].
///
/// Decoding is all-or-nothing, a single bad token fails the whole feature.
pub fn unflatten(flat: &FlattenedFeature) -> Result<Feature, CodecError> {
    let geometry = decode_geometry(&flat.geometry)?;
    trace!(
        "unflattened {} tokens into {}",
        flat.geometry.len(),
        geometry.kind()
    );
    Ok(Feature {
        feature_type: flat.feature_type,
        id: flat.id.clone(),
        geometry,
        properties: flat.properties.clone(),
    })
}

fn decode_geometry(tokens: &[String]) -> Result<Geometry, CodecError> {
    let (tag, rest) = tokens
        .split_first()
        .ok_or_else(|| CodecError::UnsupportedGeometry { tag: String::new() })?;
    let geometry = match tag.parse::<GeometryKind>()? {
        GeometryKind::Point => decode_point(rest)?,
        GeometryKind::LineString => Geometry::LineString {
            coordinates: numbered(rest)
                .map(|(index, token)| expect_position(token, index))
                .collect::<Result<_, _>>()?,
        },
        GeometryKind::Polygon => decode_polygon(rest)?,
    };
    Ok(geometry)
}

// tokens after the tag, paired with their offset in the full sequence
fn numbered(rest: &[String]) -> impl Iterator<Item = (usize, &str)> {
    rest.iter()
        .enumerate()
        .map(|(i, token)| (i + 1, token.as_str()))
}

fn expect_position(token: &str, index: usize) -> Result<Position, CodecError> {
    match Token::decode(token, index)? {
        Token::Position(position) => Ok(position),
        _ => Err(CodecError::MalformedToken {
            index,
            token: token.into(),
        }),
    }
}

fn decode_point(rest: &[String]) -> Result<Geometry, CodecError> {
    match rest {
        [] => Err(CodecError::TruncatedInput {
            kind: GeometryKind::Point,
            needed: 1,
        }),
        [token] => Ok(Geometry::Point {
            coordinates: expect_position(token, 1)?,
        }),
        [_, trailing @ ..] => Err(CodecError::TrailingTokens {
            kind: GeometryKind::Point,
            count: trailing.len(),
        }),
    }
}

fn decode_polygon(rest: &[String]) -> Result<Geometry, CodecError> {
    let mut rings = vec![];
    let mut ring = vec![];
    for (index, token) in numbered(rest) {
        match Token::decode(token, index)? {
            Token::Position(position) => ring.push(position),
            Token::RingEnd => rings.push(mem::take(&mut ring)),
            Token::Tag(_) => {
                return Err(CodecError::MalformedToken {
                    index,
                    token: token.into(),
                })
            }
        }
    }

    // every ring is terminated, so leftovers mean the sequence was cut off
    if !ring.is_empty() {
        return Err(CodecError::TruncatedInput {
            kind: GeometryKind::Polygon,
            needed: 1,
        });
    }

    Ok(Geometry::Polygon { coordinates: rings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::{FeatureType, Properties};
    use crate::token::RING_SEPARATOR;
    use serde_json::json;

    fn properties(value: serde_json::Value) -> Option<Properties> {
        value.as_object().cloned()
    }

    fn flat(tokens: &[&str]) -> FlattenedFeature {
        FlattenedFeature {
            feature_type: FeatureType::Feature,
            id: None,
            geometry: tokens.iter().map(|t| (*t).to_string()).collect(),
            properties: None,
        }
    }

    fn square() -> Vec<Position> {
        vec![
            (100.0, 0.0),
            (101.0, 0.0),
            (101.0, 1.0),
            (100.0, 1.0),
            (100.0, 0.0),
        ]
    }

    #[test]
    fn point() {
        let geometry = Geometry::Point {
            coordinates: (102.0, 0.5),
        };
        let feature = Feature::new(geometry, properties(json!({ "prop0": "value0" })));
        let flattened = flatten(&feature).unwrap();
        assert_eq!(flattened.geometry, vec!["Point", "102, 0.5"]);
        assert_eq!(flattened.properties, feature.properties);
        assert_eq!(unflatten(&flattened).unwrap(), feature);
    }

    #[test]
    fn line_string() {
        let geometry = Geometry::LineString {
            coordinates: vec![(102.0, 0.0), (103.0, 1.0), (104.0, 0.0), (105.0, 1.0)],
        };
        let props = properties(json!({ "prop0": "value0", "prop1": 0.0 }));
        let feature = Feature::new(geometry, props);
        let flattened = flatten(&feature).unwrap();
        assert_eq!(
            flattened.geometry,
            vec!["LineString", "102, 0", "103, 1", "104, 0", "105, 1"]
        );
        assert_eq!(unflatten(&flattened).unwrap(), feature);
    }

    #[test]
    fn polygon_single_ring() {
        let geometry = Geometry::Polygon {
            coordinates: vec![square()],
        };
        let props = properties(json!({ "prop0": "value0", "prop1": { "this": "that" } }));
        let feature = Feature::new(geometry, props);
        let flattened = flatten(&feature).unwrap();
        assert_eq!(
            flattened.geometry,
            vec![
                "Polygon", "100, 0", "101, 0", "101, 1", "100, 1", "100, 0", "||"
            ]
        );
        assert_eq!(unflatten(&flattened).unwrap(), feature);
    }

    #[test]
    fn polygon_ring_separators() {
        let hole = vec![(100.2, 0.2), (100.8, 0.2), (100.8, 0.8), (100.2, 0.2)];
        let geometry = Geometry::Polygon {
            coordinates: vec![square(), hole, vec![]],
        };
        let feature = Feature::new(geometry, None);
        let flattened = flatten(&feature).unwrap();

        let separators: Vec<usize> = flattened
            .geometry
            .iter()
            .enumerate()
            .filter(|(_, token)| *token == RING_SEPARATOR)
            .map(|(i, _)| i)
            .collect();
        // tag + 5 points, 4 points, empty ring
        assert_eq!(separators, vec![6, 11, 12]);
        assert_eq!(flattened.geometry.len(), 13);

        assert_eq!(unflatten(&flattened).unwrap(), feature);
    }

    #[test]
    fn empty_ring() {
        let geometry = Geometry::Polygon {
            coordinates: vec![vec![]],
        };
        let feature = Feature::new(geometry, None);
        let flattened = flatten(&feature).unwrap();
        assert_eq!(flattened.geometry, vec!["Polygon", "||"]);
        assert_eq!(unflatten(&flattened).unwrap(), feature);
    }

    #[test]
    fn empty_geometries() {
        let line_string = Feature::new(
            Geometry::LineString {
                coordinates: vec![],
            },
            None,
        );
        let polygon = Feature::new(
            Geometry::Polygon {
                coordinates: vec![],
            },
            None,
        );
        for feature in vec![line_string, polygon] {
            let flattened = flatten(&feature).unwrap();
            assert_eq!(flattened.geometry.len(), 1);
            assert_eq!(unflatten(&flattened).unwrap(), feature);
        }
    }

    #[test]
    fn tag_comes_first() {
        let geometries = vec![
            Geometry::Point {
                coordinates: (1.0, 2.0),
            },
            Geometry::LineString {
                coordinates: vec![(1.0, 2.0)],
            },
            Geometry::Polygon {
                coordinates: vec![vec![(1.0, 2.0)]],
            },
        ];
        for geometry in geometries {
            let kind = geometry.kind();
            let flattened = flatten(&Feature::new(geometry, None)).unwrap();
            assert_eq!(flattened.geometry[0], kind.as_str());
        }
    }

    #[test]
    fn id_and_properties_pass_through() {
        let mut feature = Feature::new(
            Geometry::Point {
                coordinates: (-3.5, 40.25),
            },
            properties(json!({ "nested": [1, { "a": null }], "name": "x" })),
        );
        feature.id = Some(json!("feature-1"));
        let flattened = flatten(&feature).unwrap();
        assert_eq!(flattened.id, Some(json!("feature-1")));
        assert_eq!(flattened.properties, feature.properties);
        assert_eq!(unflatten(&flattened).unwrap(), feature);
    }

    #[test]
    fn non_finite_coordinate() {
        let feature = Feature::new(
            Geometry::LineString {
                coordinates: vec![(1.0, 2.0), (f64::NAN, 0.0)],
            },
            None,
        );
        assert!(matches!(
            flatten(&feature),
            Err(CodecError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn truncated_point() {
        assert_eq!(
            unflatten(&flat(&["Point"])),
            Err(CodecError::TruncatedInput {
                kind: GeometryKind::Point,
                needed: 1
            })
        );
    }

    #[test]
    fn trailing_point_tokens() {
        assert_eq!(
            unflatten(&flat(&["Point", "1, 2", "3, 4", "5, 6"])),
            Err(CodecError::TrailingTokens {
                kind: GeometryKind::Point,
                count: 2
            })
        );
    }

    #[test]
    fn unsupported_tag() {
        assert_eq!(
            unflatten(&flat(&["MultiPoint", "1, 2"])),
            Err(CodecError::UnsupportedGeometry {
                tag: "MultiPoint".into()
            })
        );
    }

    #[test]
    fn missing_tag() {
        assert_eq!(
            unflatten(&flat(&[])),
            Err(CodecError::UnsupportedGeometry { tag: "".into() })
        );
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(
            unflatten(&flat(&["LineString", "1, 2", "1; 2"])),
            Err(CodecError::MalformedToken {
                index: 2,
                token: "1; 2".into()
            })
        );
        assert_eq!(
            unflatten(&flat(&["LineString", "1, 2", "||"])),
            Err(CodecError::MalformedToken {
                index: 2,
                token: "||".into()
            })
        );
        assert_eq!(
            unflatten(&flat(&["Point", "||"])),
            Err(CodecError::MalformedToken {
                index: 1,
                token: "||".into()
            })
        );
        assert_eq!(
            unflatten(&flat(&["Polygon", "1, 2", "Point", "||"])),
            Err(CodecError::MalformedToken {
                index: 2,
                token: "Point".into()
            })
        );
    }

    #[test]
    fn unterminated_ring() {
        assert_eq!(
            unflatten(&flat(&["Polygon", "1, 2", "||", "3, 4"])),
            Err(CodecError::TruncatedInput {
                kind: GeometryKind::Polygon,
                needed: 1
            })
        );
    }

    #[test]
    fn typed_tokens() {
        let geometry = Geometry::Polygon {
            coordinates: vec![vec![(1.0, 2.0)], vec![]],
        };
        assert_eq!(
            tokens(&geometry),
            vec![
                Token::Tag(GeometryKind::Polygon),
                Token::Position((1.0, 2.0)),
                Token::RingEnd,
                Token::RingEnd,
            ]
        );
    }
}
