use super::error::{Error, Result};
use super::geojson::{Feature, FlattenedFeature};
use super::token::GeometryKind;
use serde::de::DeserializeOwned;
use serde_json::{from_value, Deserializer, Value};
use std::io::Read;

fn type_of(value: &Value) -> Option<&str> {
    value.get("type")?.as_str()
}

fn describe(value: &Value) -> String {
    match type_of(value) {
        Some(name) => format!("type \"{}\"", name),
        None => match value {
            Value::Object(_) => "an object without type".into(),
            Value::Array(_) => "an array".into(),
            _ => value.to_string(),
        },
    }
}

/// Walks a stream of JSON values, which may be a single document or
/// newline separated ones, and hands every feature object to `read`.
fn read_documents<T>(
    reader: impl Read,
    read: impl Fn(Value) -> Result<T>,
) -> Result<Vec<T>> {
    let mut features = vec![];
    for value in Deserializer::from_reader(reader).into_iter::<Value>() {
        let mut value = value?;
        let kind = type_of(&value).map(str::to_owned);
        match kind.as_deref() {
            Some("FeatureCollection") => {
                let list = match value.get_mut("features").map(Value::take) {
                    Some(Value::Array(list)) => list,
                    _ => {
                        return Err(Error::UnexpectedDocument {
                            found: "a FeatureCollection without features".into(),
                        })
                    }
                };
                for feature in list {
                    features.push(read(feature)?);
                }
            }
            Some("Feature") => features.push(read(value)?),
            _ => {
                return Err(Error::UnexpectedDocument {
                    found: describe(&value),
                })
            }
        }
    }
    Ok(features)
}

fn read_feature(value: Value) -> Result<Feature> {
    // name unsupported kinds instead of failing with a serde "unknown variant"
    if let Some(tag) = value.get("geometry").and_then(type_of) {
        tag.parse::<GeometryKind>()?;
    }
    parse(value)
}

fn parse<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(from_value(value)?)
}

/// Read GeoJSON features from a `FeatureCollection`, a single `Feature` or
/// a sequence of either.
pub fn read_features(reader: impl Read) -> Result<Vec<Feature>> {
    read_documents(reader, read_feature)
}

/// Read flattened features, laid out the same way as in [`read_features`].
pub fn read_flattened(reader: impl Read) -> Result<Vec<FlattenedFeature>> {
    read_documents(reader, parse::<FlattenedFeature>)
}
