use super::error::Result;
use super::geojson::{Entity, Feature, FlattenedFeature};
use serde::Serialize;
use serde_json::to_string;
use std::io::Write;

pub trait Output {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()>;
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()>;
}

fn write_collection<T: Serialize>(features: &[T], writer: &mut dyn Write) -> Result<()> {
    let features: Vec<&T> = features.iter().collect();
    let feature_collection = Entity::FeatureCollection { features };
    let string = to_string(&feature_collection)?;
    writeln!(writer, "{}", string)?;
    Ok(())
}

fn write_lines<T: Serialize>(features: &[T], writer: &mut dyn Write) -> Result<()> {
    for feature in features {
        let json = to_string(feature)?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

impl Output for Vec<Feature> {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()> {
        write_collection(self, writer)
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()> {
        write_lines(self, writer)
    }
}

impl Output for Vec<FlattenedFeature> {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()> {
        write_collection(self, writer)
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()> {
        write_lines(self, writer)
    }
}
