use super::codec::{flatten, unflatten};
use super::error::CodecError;
use super::geojson::Feature;
use super::token::GeometryKind;
use serde::{Deserialize, Serialize};

/// Outcome of flattening a feature and restoring it again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoundTrip {
    pub index: usize,
    pub kind: GeometryKind,
    pub tokens: usize,
    pub equal: bool,
}

pub fn round_trip(index: usize, feature: &Feature) -> Result<RoundTrip, CodecError> {
    let flattened = flatten(feature)?;
    let restored = unflatten(&flattened)?;
    Ok(RoundTrip {
        index,
        kind: feature.geometry.kind(),
        tokens: flattened.geometry.len(),
        equal: restored == *feature,
    })
}

pub fn check(features: &[Feature]) -> Result<Vec<RoundTrip>, CodecError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| round_trip(index, feature))
        .collect()
}
