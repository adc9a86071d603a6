use serde::Deserialize;

/// A `[longitude, latitude]` position, GeoJSON order.
pub type Position = [f64; 2];

/// Isochrone API response: one feature per requested contour.
#[derive(Debug, Clone, Deserialize)]
pub struct IsochroneResponse {
    #[serde(default)]
    pub features: Vec<IsochroneFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IsochroneFeature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: ContourProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContourProperties {
    /// Contour value in minutes.
    pub contour: Option<u32>,
}

/// The geometry shapes the isochrone endpoint can return. `polygons=true`
/// yields `Polygon`; without it the contour comes back as a `LineString`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    LineString { coordinates: Vec<Position> },
}

impl IsochroneResponse {
    /// Rings of the first polygon feature, if any.
    pub fn first_polygon(&self) -> Option<&[Vec<Position>]> {
        self.features.iter().find_map(|f| match &f.geometry {
            Geometry::Polygon { coordinates } => Some(coordinates.as_slice()),
            Geometry::LineString { .. } => None,
        })
    }
}

/// Directions API response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Route {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}
