//! Conversion from raw API records to canonical GeoJSON features.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::Value;
use tracing::warn;

use super::types::RawFeature;

/// Geometry type assumed when a record carries no `type` tag.
pub const DEFAULT_GEOMETRY_KIND: &str = "Point";

/// Error normalizing a single record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// Record has no geometry
    #[error("feature has no geometry")]
    MissingGeometry,

    /// Geometry payload does not match its type
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Normalize one record.
///
/// The geometry type tag is made explicit (defaulting to
/// [`DEFAULT_GEOMETRY_KIND`]) and the coordinates are validated against it.
/// Missing properties become an empty object. Feature ids are dropped.
pub fn normalize_feature(raw: RawFeature) -> Result<Feature, NormalizeError> {
    let raw_geometry = raw.geometry.ok_or(NormalizeError::MissingGeometry)?;

    let kind = raw_geometry
        .kind
        .unwrap_or_else(|| DEFAULT_GEOMETRY_KIND.to_string());

    let mut object = JsonObject::new();
    object.insert("type".to_string(), Value::String(kind));
    object.insert("coordinates".to_string(), raw_geometry.coordinates);

    let geometry = Geometry::try_from(object)
        .map_err(|e| NormalizeError::InvalidGeometry(e.to_string()))?;

    Ok(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(raw.properties.unwrap_or_default()),
        foreign_members: None,
    })
}

/// Normalize a batch of records into a collection, preserving order.
///
/// Records that fail to normalize are logged and skipped rather than
/// failing the whole collection.
pub fn normalize_features(raw: Vec<RawFeature>) -> FeatureCollection {
    let mut features = Vec::with_capacity(raw.len());

    for (index, record) in raw.into_iter().enumerate() {
        match normalize_feature(record) {
            Ok(feature) => features.push(feature),
            Err(e) => warn!(index, error = %e, "skipping feature"),
        }
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
