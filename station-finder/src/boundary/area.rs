//! Area of interest polygon types.

use geojson::{Feature, Geometry, JsonObject, Value};

/// A `(longitude, latitude)` pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Parse a GeoJSON position. Extra dimensions (altitude) are ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }
}

/// Axis-aligned bounding box of an area, as used for viewport fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// GeoJSON `bbox` member order: west, south, east, north.
    pub fn to_bbox(&self) -> Vec<f64> {
        vec![self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

/// The polygon boundary used to scope a station search.
///
/// Holds the outer ring only. The ring is expected to be closed (first
/// point equal to the last) but this is not enforced: a malformed ring is
/// carried through to the remote query unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOfInterest {
    ring: Vec<LonLat>,
}

impl AreaOfInterest {
    pub fn new(ring: Vec<LonLat>) -> Self {
        Self { ring }
    }

    /// The outer ring, in source order.
    pub fn ring(&self) -> &[LonLat] {
        &self.ring
    }

    /// Whether the ring is non-empty and its first point equals its last.
    pub fn is_closed(&self) -> bool {
        match (self.ring.first(), self.ring.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Bounding box of the ring, or `None` for an empty ring.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.ring.first()?;
        let init = Bounds {
            min_lon: first.lon,
            min_lat: first.lat,
            max_lon: first.lon,
            max_lat: first.lat,
        };

        Some(self.ring.iter().fold(init, |b, p| Bounds {
            min_lon: b.min_lon.min(p.lon),
            min_lat: b.min_lat.min(p.lat),
            max_lon: b.max_lon.max(p.lon),
            max_lat: b.max_lat.max(p.lat),
        }))
    }

    /// Render as a GeoJSON Polygon feature with its bounding box attached.
    pub fn to_feature(&self) -> Feature {
        let ring: Vec<Vec<f64>> = self.ring.iter().map(|p| vec![p.lon, p.lat]).collect();

        Feature {
            bbox: self.bounds().map(|b| b.to_bbox()),
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        }
    }
}
