use crate::error::{Result, S2CoverError};
use geo::{Distance, Haversine};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Latitude beyond which a location is treated as polar.
pub const NEAR_POLE_LATITUDE: f64 = 85.0;

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and [`Geolocation`].
/// Following GeoJSON and `geo_types`, x is the longitude and y is the latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Geolocation {
    fn x(&self) -> f64 {
        self.longitude
    }
    fn y(&self) -> f64 {
        self.latitude
    }
}

/// A validated WGS84 latitude/longitude pair in degrees.
///
/// # Example
///
/// ```
/// use s2cover_rs::Geolocation;
///
/// # fn main() -> Result<(), s2cover_rs::S2CoverError> {
/// let london = Geolocation::new(51.5074, -0.1278)?;
/// let paris = Geolocation::new(48.8566, 2.3522)?;
/// assert!((london.distance_km(&paris) - 343.5).abs() < 2.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geolocation {
    /// Creates a location, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_lat_lon(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a location from anything implementing [`Coordinate`] (x = lon, y = lat).
    pub fn from_coordinate(coord: &impl Coordinate) -> Result<Self> {
        Self::new(coord.y(), coord.x())
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &Geolocation) -> f64 {
        Haversine.distance(self.to_point(), other.to_point()) / 1000.0
    }

    /// True when the location is beyond ±85° latitude.
    pub fn is_near_pole(&self) -> bool {
        self.latitude.abs() > NEAR_POLE_LATITUDE
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

pub(crate) fn validate_lat_lon(latitude: f64, longitude: f64) -> Result<()> {
    let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
    let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(S2CoverError::InvalidCoordinate {
            latitude,
            longitude,
        })
    }
}
