//! OGC spatial filter construction.
//!
//! The feature API takes its spatial constraint as an XML filter fragment
//! in a query parameter. The polygon ring is embedded as a GML
//! `coordinates` list: pairs separated by spaces, the two values of a pair
//! separated by a comma.

use std::str::FromStr;

use crate::boundary::{AreaOfInterest, LonLat};

/// Default geometry property on OS feature types.
pub const DEFAULT_GEOMETRY_PROPERTY: &str = "SHAPE";

/// Default spatial reference for filter coordinates.
pub const DEFAULT_SRS_NAME: &str = "EPSG:4326";

/// Axis order the remote API expects for filter coordinates.
///
/// Boundaries are stored longitude first. EPSG:4326 as interpreted by WFS
/// 2.0 servers is latitude first, so the OS API needs [`LatLon`].
///
/// [`LatLon`]: CoordinateOrder::LatLon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinateOrder {
    /// Serialize as `lon,lat` (same as storage order).
    LonLat,
    /// Serialize as `lat,lon` (axes flipped).
    #[default]
    LatLon,
}

impl CoordinateOrder {
    fn pair(self, p: &LonLat) -> (f64, f64) {
        match self {
            CoordinateOrder::LonLat => (p.lon, p.lat),
            CoordinateOrder::LatLon => (p.lat, p.lon),
        }
    }
}

impl FromStr for CoordinateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lon-lat" | "lonlat" => Ok(CoordinateOrder::LonLat),
            "lat-lon" | "latlon" => Ok(CoordinateOrder::LatLon),
            _ => Err(format!("expected lon-lat or lat-lon, got {s:?}")),
        }
    }
}

/// Builder for an `ogc:Within` containment filter.
#[derive(Debug, Clone, PartialEq)]
pub struct WithinFilter {
    pub geometry_property: String,
    pub srs_name: String,
    pub order: CoordinateOrder,
}

impl Default for WithinFilter {
    fn default() -> Self {
        Self {
            geometry_property: DEFAULT_GEOMETRY_PROPERTY.to_string(),
            srs_name: DEFAULT_SRS_NAME.to_string(),
            order: CoordinateOrder::default(),
        }
    }
}

impl WithinFilter {
    pub fn with_order(mut self, order: CoordinateOrder) -> Self {
        self.order = order;
        self
    }

    /// Render the filter for `area`.
    ///
    /// The ring is not validated. An empty or unclosed ring is serialized
    /// as-is.
    pub fn build(&self, area: &AreaOfInterest) -> String {
        format!(
            "<ogc:Filter>\
             <ogc:Within>\
             <ogc:PropertyName>{property}</ogc:PropertyName>\
             <gml:Polygon srsName=\"{srs}\">\
             <gml:outerBoundaryIs>\
             <gml:LinearRing>\
             <gml:coordinates>{coords}</gml:coordinates>\
             </gml:LinearRing>\
             </gml:outerBoundaryIs>\
             </gml:Polygon>\
             </ogc:Within>\
             </ogc:Filter>",
            property = self.geometry_property,
            srs = self.srs_name,
            coords = serialize_ring(area.ring(), self.order),
        )
    }
}

/// Serialize a ring as a GML coordinates list in the given axis order.
pub fn serialize_ring(ring: &[LonLat], order: CoordinateOrder) -> String {
    ring.iter()
        .map(|p| {
            let (a, b) = order.pair(p);
            format!("{a},{b}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
