//! Canton boundary GeoJSON reader.

use geojson::{Feature, GeoJson};
use log::info;
use serde_json::Value as JsonValue;
use std::io::Read;

use super::error::{StoreError, StoreResult};
use crate::models::{BoundaryCollection, CantonBoundary};

/// Feature property holding the canton code in the georef canton dataset.
pub const DEFAULT_CODE_PROPERTY: &str = "kan_code";

/// Canton code of a feature. Strings and numbers are accepted, and a list
/// contributes its first element.
fn feature_code(feature: &Feature, code_property: &str) -> Option<String> {
    fn scalar(value: &JsonValue) -> Option<String> {
        match value {
            JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    match feature.property(code_property)? {
        JsonValue::Array(items) => items.first().and_then(scalar),
        other => scalar(other),
    }
}

/// Read a canton boundary FeatureCollection, preserving feature order.
///
/// # Errors
/// [`StoreError::DataLoad`] if the source is not valid GeoJSON or is not a
/// FeatureCollection.
pub fn read_boundaries<R: Read>(
    reader: R,
    source_name: &str,
    code_property: &str,
) -> StoreResult<BoundaryCollection> {
    let geojson = GeoJson::from_reader(reader)
        .map_err(|e| StoreError::data_load(source_name, format!("invalid GeoJSON: {}", e)))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) | GeoJson::Geometry(_) => {
            return Err(StoreError::data_load(
                source_name,
                "expected a FeatureCollection at the top level",
            ))
        }
    };

    let boundaries: Vec<CantonBoundary> = collection
        .features
        .into_iter()
        .map(|feature| CantonBoundary {
            canton_code: feature_code(&feature, code_property),
            feature,
        })
        .collect();

    info!("Loaded {} canton boundaries from {}", boundaries.len(), source_name);
    Ok(BoundaryCollection::new(boundaries))
}
