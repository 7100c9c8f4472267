//! Geographic bounding box for map viewport filtering.

use serde::Deserialize;

/// A lat/lng rectangle. All four corners must be present for the filter to
/// apply; partial bounds are ignored by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Build a box from optional query parameters; `None` unless all four
    /// are present.
    pub fn from_parts(
        min_lat: Option<f64>,
        max_lat: Option<f64>,
        min_lng: Option<f64>,
        max_lng: Option<f64>,
    ) -> Option<Self> {
        match (min_lat, max_lat, min_lng, max_lng) {
            (Some(min_lat), Some(max_lat), Some(min_lng), Some(max_lng)) => Some(Self {
                min_lat,
                max_lat,
                min_lng,
                max_lng,
            }),
            _ => None,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}
