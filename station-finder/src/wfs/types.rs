//! Feature API response DTOs.
//!
//! These map the GeoJSON documents returned by `GetFeature` with
//! `outputFormat=GEOJSON`. Only `features` is required; a response without
//! it is treated as a parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of results.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    /// Features on this page, in server order.
    pub features: Vec<RawFeature>,

    /// Total number of features matching the query, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_matched: Option<u64>,

    /// Number of features on this page, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_returned: Option<u64>,
}

/// A feature record as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawFeature {
    #[serde(default)]
    pub geometry: Option<RawGeometry>,

    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
}

/// Raw geometry: an optional type tag and an unvalidated coordinate payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawGeometry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub coordinates: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_page_with_counts() {
        let json = r#"{
            "type": "FeatureCollection",
            "numberMatched": 2,
            "numberReturned": 1,
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-0.14, 51.53] },
                    "properties": { "Name": "Camden Road" }
                }
            ]
        }"#;

        let page: RawPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.number_matched, Some(2));
        assert_eq!(page.number_returned, Some(1));
        assert_eq!(page.features.len(), 1);

        let geometry = page.features[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.kind.as_deref(), Some("Point"));
        assert_eq!(geometry.coordinates, serde_json::json!([-0.14, 51.53]));
    }

    #[test]
    fn missing_properties_and_geometry_are_none() {
        let page: RawPage = serde_json::from_str(r#"{"features": [{}]}"#).unwrap();
        assert_eq!(page.features[0].geometry, None);
        assert_eq!(page.features[0].properties, None);
        assert_eq!(page.number_matched, None);
    }

    #[test]
    fn missing_features_is_an_error() {
        let result: Result<RawPage, _> = serde_json::from_str(r#"{"type": "FeatureCollection"}"#);
        assert!(result.is_err());
    }
}
