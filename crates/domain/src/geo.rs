use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius (IUGG), in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        Self::validate(lat, lng)?;
        Ok(Self { lat, lng })
    }

    pub fn validate(lat: f64, lng: f64) -> Result<(), DomainError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(DomainError::InvalidCoordinates(
                "latitude and longitude must be finite".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude {} out of range [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidCoordinates(format!(
                "longitude {} out of range [-180, 180]",
                lng
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        distance_meters(*self, *other)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = DomainError;

    /// Parses `"lat,lng"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidCoordinates(format!("expected lat,lng: {}", s)))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinates(format!("bad latitude: {}", lat)))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinates(format!("bad longitude: {}", lng)))?;
        Coordinates::new(lat, lng)
    }
}

/// Great-circle (haversine) distance between two points, in meters.
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    if a.lat == b.lat && a.lng == b.lng {
        return 0.0;
    }

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    // rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
