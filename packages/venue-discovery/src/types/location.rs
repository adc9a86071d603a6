//! Coordinates and reachability polygons.
//!
//! Requests and the isochrone provider speak GeoJSON, so polygon rings are
//! `[lng, lat]`. [`Coordinates`] is `{lat, lng}` on the wire; conversions to
//! `geo` types always go through [`Coordinates::to_lng_lat`].

use geo::{Coord, Intersects, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude within -90..=90 and longitude within -180..=180.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// GeoJSON position order.
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// A GeoJSON `Polygon` geometry: exterior ring first, then holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoJsonPolygon {
    pub fn new(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: rings,
        }
    }

    /// Validate and convert into a containment-ready region.
    pub fn to_region(&self) -> Result<ReachabilityRegion> {
        if self.kind != "Polygon" {
            return Err(DiscoveryError::validation(format!(
                "isochronePolygon must be a Polygon, got {}",
                self.kind
            )));
        }

        let mut rings = self.coordinates.iter();
        let exterior = rings
            .next()
            .ok_or_else(|| DiscoveryError::validation("isochronePolygon has no rings"))?;

        let exterior = to_line_string(exterior)?;
        let interiors = rings.map(|r| to_line_string(r)).collect::<Result<Vec<_>>>()?;

        Ok(ReachabilityRegion {
            polygon: Polygon::new(exterior, interiors),
        })
    }
}

fn to_line_string(ring: &[[f64; 2]]) -> Result<LineString<f64>> {
    if ring.len() < 4 {
        return Err(DiscoveryError::validation(format!(
            "isochronePolygon ring needs at least 4 positions, got {}",
            ring.len()
        )));
    }
    if ring
        .iter()
        .any(|[lng, lat]| !Coordinates::new(*lat, *lng).is_valid())
    {
        return Err(DiscoveryError::validation(
            "isochronePolygon contains an out-of-range position",
        ));
    }
    Ok(LineString::from(
        ring.iter().map(|[lng, lat]| (*lng, *lat)).collect::<Vec<_>>(),
    ))
}

/// The area reachable within the drive-time budget.
#[derive(Debug, Clone)]
pub struct ReachabilityRegion {
    polygon: Polygon<f64>,
}

impl ReachabilityRegion {
    /// Point-in-polygon test. Points on the boundary count as inside; points
    /// inside a hole do not.
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.polygon.intersects(&point.to_coord())
    }
}
