use log::{debug, info, warn};
use output::Output;
use serde_json::to_string;
use std::io::{Read, Write};

pub use check::{check, round_trip, RoundTrip};
pub use codec::{flatten, tokens, unflatten};
pub use error::{CodecError, Error, Result};
pub use geojson::{Feature, FeatureType, FlattenedFeature, Geometry, Position, Properties};
pub use input::{read_features, read_flattened};
pub use token::{GeometryKind, Token, POSITION_SEPARATOR, RING_SEPARATOR};

mod check;
mod codec;
pub mod error;
pub mod geo;
pub mod geojson;
mod input;
pub mod output;
pub mod token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One `FeatureCollection` document.
    GeoJson,
    /// One feature per line.
    JsonLines,
}

fn write(output: &impl Output, writer: &mut dyn Write, format: Format) -> Result<()> {
    match format {
        Format::GeoJson => output.write_geojson(writer),
        Format::JsonLines => output.write_json_lines(writer),
    }
}

/// Read GeoJSON features and write them with flattened geometries.
///
/// Nothing is written unless every feature could be flattened.
pub fn flatten_stream(reader: impl Read, writer: &mut dyn Write, format: Format) -> Result<()> {
    let features = read_features(reader)?;
    info!("flattening {} features", features.len());
    let flattened = features
        .iter()
        .enumerate()
        .map(|(idx, feature)| {
            debug!("flattening feature {} ({})", idx, feature.geometry.kind());
            flatten(feature)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    write(&flattened, writer, format)
}

/// Read flattened features and write them as regular GeoJSON features.
pub fn unflatten_stream(reader: impl Read, writer: &mut dyn Write, format: Format) -> Result<()> {
    let flattened = read_flattened(reader)?;
    info!("unflattening {} features", flattened.len());
    let features = flattened
        .iter()
        .enumerate()
        .map(|(idx, flat)| {
            debug!("unflattening feature {}", idx);
            unflatten(flat)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    write(&features, writer, format)
}

/// Round trip every feature through the codec and write one report per line.
///
/// Returns `true` if all features came back unchanged.
pub fn check_stream(reader: impl Read, writer: &mut dyn Write) -> Result<bool> {
    let features = read_features(reader)?;
    let reports = check(&features)?;
    for report in reports.iter() {
        if !report.equal {
            warn!("feature {} ({}) changed in round trip", report.index, report.kind);
        }
        writeln!(writer, "{}", to_string(report)?)?;
    }
    let passed = reports.iter().filter(|report| report.equal).count();
    info!("{} of {} features round tripped", passed, reports.len());
    Ok(passed == reports.len())
}
