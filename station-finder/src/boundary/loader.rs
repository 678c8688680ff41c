//! Boundary document parsing.

use std::path::Path;

use geojson::{GeoJson, Geometry, Value};
use serde::Deserialize;
use tracing::{debug, trace};

use super::area::{AreaOfInterest, LonLat};
use super::error::BoundaryError;

/// A GeoJSON ring: positions of `[lon, lat, ...]`.
type Ring = Vec<Vec<f64>>;

/// Simplified boundary export: features carry polygon coordinates directly,
/// without `type` tags or geometry wrappers.
#[derive(Debug, Deserialize)]
struct SimplifiedBoundaries {
    #[serde(default)]
    features: Vec<SimplifiedFeature>,
}

#[derive(Debug, Deserialize)]
struct SimplifiedFeature {
    coordinates: Vec<Ring>,
}

/// Read and parse the boundary file at `path`.
pub fn load_boundaries(path: impl AsRef<Path>) -> Result<Vec<AreaOfInterest>, BoundaryError> {
    let path = path.as_ref();
    debug!(?path, "reading boundary file");

    let contents = std::fs::read_to_string(path).map_err(|source| BoundaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let areas = parse_boundaries(&contents)?;
    debug!(?path, areas = areas.len(), "loaded boundaries");
    Ok(areas)
}

/// Parse a boundary document.
///
/// Standard GeoJSON (geometry, feature or feature collection) is tried
/// first; anything else must match the simplified `{"features": [{
/// "coordinates": [...] }]}` shape. Only outer rings of `Polygon` and
/// `MultiPolygon` geometries are kept. A document with no polygons yields
/// an empty list, not an error.
pub fn parse_boundaries(json: &str) -> Result<Vec<AreaOfInterest>, BoundaryError> {
    if let Ok(doc) = json.parse::<GeoJson>() {
        trace!("boundary document is GeoJSON");
        return Ok(areas_from_geojson(doc));
    }

    let doc: SimplifiedBoundaries =
        serde_json::from_str(json).map_err(|e| BoundaryError::Json {
            message: e.to_string(),
        })?;

    Ok(doc
        .features
        .into_iter()
        .filter_map(|f| f.coordinates.into_iter().next())
        .map(area_from_ring)
        .collect())
}

fn areas_from_geojson(doc: GeoJson) -> Vec<AreaOfInterest> {
    let geometries = match doc {
        GeoJson::Geometry(g) => vec![g],
        GeoJson::Feature(f) => f.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(fc) => {
            fc.features.into_iter().filter_map(|f| f.geometry).collect()
        }
    };

    outer_rings(geometries)
        .into_iter()
        .map(area_from_ring)
        .collect()
}

fn outer_rings(geometries: Vec<Geometry>) -> Vec<Ring> {
    geometries
        .into_iter()
        .flat_map(|g| match g.value {
            Value::Polygon(rings) => rings.into_iter().take(1).collect(),
            Value::MultiPolygon(polygons) => polygons
                .into_iter()
                .filter_map(|rings| rings.into_iter().next())
                .collect(),
            Value::GeometryCollection(inner) => outer_rings(inner),
            _ => {
                debug!("skipping non-polygon boundary geometry");
                Vec::new()
            }
        })
        .collect()
}

fn area_from_ring(ring: Ring) -> AreaOfInterest {
    AreaOfInterest::new(
        ring.iter()
            .filter_map(|p| LonLat::from_position(p))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SIMPLIFIED: &str = r#"{
        "features": [
            { "coordinates": [[[-0.2, 51.5], [-0.1, 51.5], [-0.1, 51.6], [-0.2, 51.5]]] }
        ]
    }"#;

    #[test]
    fn parses_simplified_shape() {
        let areas = parse_boundaries(SIMPLIFIED).unwrap();

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].ring().len(), 4);
        assert_eq!(areas[0].ring()[0], LonLat::new(-0.2, 51.5));
        assert!(areas[0].is_closed());
    }

    #[test]
    fn parses_geojson_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [
                            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]],
                            [[0.2, 0.2], [0.3, 0.2], [0.3, 0.3], [0.2, 0.2]]
                        ]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [5.0, 5.0] }
                }
            ]
        }"#;

        let areas = parse_boundaries(json).unwrap();

        // Holes and points are dropped
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].ring()[1], LonLat::new(1.0, 0.0));
    }

    #[test]
    fn parses_multipolygon_geometry() {
        let json = r#"{
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]
            ]
        }"#;

        let areas = parse_boundaries(json).unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].ring()[0], LonLat::new(2.0, 2.0));
    }

    #[test]
    fn empty_features_is_not_an_error() {
        assert!(parse_boundaries(r#"{"features": []}"#).unwrap().is_empty());
        assert!(parse_boundaries("{}").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = parse_boundaries("not json");
        assert!(matches!(result, Err(BoundaryError::Json { .. })));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SIMPLIFIED.as_bytes()).unwrap();

        let areas = load_boundaries(file.path()).unwrap();
        assert_eq!(areas.len(), 1);
    }

    #[test]
    fn bundled_camden_boundary() {
        let areas = load_boundaries("data/camden-simplified.json").unwrap();

        assert_eq!(areas.len(), 1);
        assert!(areas[0].is_closed());
        let bounds = areas[0].bounds().unwrap();
        assert!(bounds.min_lon < -0.2 && bounds.max_lon > -0.11);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_boundaries("/nonexistent/boundary.json");
        assert!(matches!(result, Err(BoundaryError::Io { .. })));
    }
}
