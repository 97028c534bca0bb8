use crate::coord::{Geolocation, validate_lat_lon};
use crate::error::{Result, S2CoverError};
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A latitude/longitude rectangle given by its southwest and northeast corners.
///
/// When `southwest.longitude > northeast.longitude` the box crosses the
/// antimeridian and covers `[west, 180] ∪ [-180, east]`.
///
/// # Example
///
/// ```
/// use s2cover_rs::{BoundingBox, Geolocation};
///
/// # fn main() -> Result<(), s2cover_rs::S2CoverError> {
/// let fiji = BoundingBox::new(Geolocation::new(-19.0, 177.0)?, Geolocation::new(-16.0, -179.0)?)?;
/// assert!(fiji.crosses_date_line());
/// assert!(fiji.contains(&Geolocation::new(-17.5, 179.9)?));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub southwest: Geolocation,
    pub northeast: Geolocation,
}

impl BoundingBox {
    /// Creates a box. The southern edge may not lie north of the northern edge.
    pub fn new(southwest: Geolocation, northeast: Geolocation) -> Result<Self> {
        validate_lat_lon(southwest.latitude, southwest.longitude)?;
        validate_lat_lon(northeast.latitude, northeast.longitude)?;
        if southwest.latitude > northeast.latitude {
            return Err(S2CoverError::InvalidCoordinate {
                latitude: southwest.latitude,
                longitude: southwest.longitude,
            });
        }
        Ok(Self {
            southwest,
            northeast,
        })
    }

    /// Creates a box from raw `(min_lat, min_lon, max_lat, max_lon)` degrees.
    pub fn from_degrees(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        Self::new(
            Geolocation::new(min_lat, min_lon)?,
            Geolocation::new(max_lat, max_lon)?,
        )
    }

    /// Smallest box containing every point within `radius_km` of `center`.
    ///
    /// Caps that reach a pole, or whose longitude extent would be 180° or more,
    /// span the full longitude range.
    pub fn from_center_radius(center: &Geolocation, radius_km: f64) -> Result<Self> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(S2CoverError::InvalidRadius(radius_km));
        }

        let angular = radius_km / EARTH_RADIUS_KM;
        let delta_lat = angular.to_degrees();
        let south = center.latitude - delta_lat;
        let north = center.latitude + delta_lat;

        let (south, north, west, east) = if south <= -90.0 || north >= 90.0 {
            (south.max(-90.0), north.min(90.0), -180.0, 180.0)
        } else {
            let delta_lon = (angular.sin() / center.latitude.to_radians().cos()).asin();
            if delta_lon.is_nan() {
                (south, north, -180.0, 180.0)
            } else {
                let mut west = center.longitude - delta_lon.to_degrees();
                let mut east = center.longitude + delta_lon.to_degrees();
                if west < -180.0 {
                    west += 360.0;
                }
                if east > 180.0 {
                    east -= 360.0;
                }
                (south, north, west, east)
            }
        };

        Self::new(Geolocation::new(south, west)?, Geolocation::new(north, east)?)
    }

    pub fn west(&self) -> f64 {
        self.southwest.longitude
    }

    pub fn east(&self) -> f64 {
        self.northeast.longitude
    }

    pub fn south(&self) -> f64 {
        self.southwest.latitude
    }

    pub fn north(&self) -> f64 {
        self.northeast.latitude
    }

    pub fn crosses_date_line(&self) -> bool {
        self.west() > self.east()
    }

    /// Splits a date-line-crossing box into its western (`west..180`) and
    /// eastern (`-180..east`) halves. `None` if the box does not cross.
    pub fn split_at_date_line(&self) -> Option<(BoundingBox, BoundingBox)> {
        if !self.crosses_date_line() {
            return None;
        }
        let western = BoundingBox {
            southwest: self.southwest,
            northeast: Geolocation {
                latitude: self.north(),
                longitude: 180.0,
            },
        };
        let eastern = BoundingBox {
            southwest: Geolocation {
                latitude: self.south(),
                longitude: -180.0,
            },
            northeast: self.northeast,
        };
        Some((western, eastern))
    }

    pub fn includes_pole(&self) -> bool {
        self.north() >= 90.0 || self.south() <= -90.0
    }

    pub fn contains(&self, point: &Geolocation) -> bool {
        if point.latitude < self.south() || point.latitude > self.north() {
            return false;
        }
        if self.crosses_date_line() {
            point.longitude >= self.west() || point.longitude <= self.east()
        } else {
            point.longitude >= self.west() && point.longitude <= self.east()
        }
    }

    /// Longitude extent in degrees, measured eastward from the west edge.
    pub fn longitude_span(&self) -> f64 {
        if self.crosses_date_line() {
            360.0 - (self.west() - self.east())
        } else {
            self.east() - self.west()
        }
    }

    /// Midpoint; longitude is taken along the eastward span, so a box crossing
    /// the antimeridian has its center near ±180.
    pub fn center(&self) -> Geolocation {
        let latitude = (self.south() + self.north()) / 2.0;
        let mut longitude = self.west() + self.longitude_span() / 2.0;
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        Geolocation {
            latitude,
            longitude,
        }
    }

    /// Surface area of the spherical rectangle in square kilometres.
    pub fn area_km2(&self) -> f64 {
        let lat_term = self.north().to_radians().sin() - self.south().to_radians().sin();
        EARTH_RADIUS_KM * EARTH_RADIUS_KM * self.longitude_span().to_radians() * lat_term
    }

    /// Planar rectangle in (lon, lat). Only meaningful for boxes that do not
    /// cross the antimeridian; split those first.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west(), y: self.south() },
            coord! { x: self.east(), y: self.north() },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}
