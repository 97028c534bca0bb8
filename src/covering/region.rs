use crate::coord::{Geolocation, validate_lat_lon};
use crate::error::{Result, S2CoverError};
use crate::geom::{BoundingBox, EARTH_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Approximate edge length of a level-0 cell per unit of cell-space, in km.
///
/// Cell-space spans `[-1, 1]` across a face, so a level-`L` cell edge is about
/// `2 * 4651 / 2^L` km.
pub const CELL_EDGE_KM_LEVEL_0: f64 = 4651.0;

/// A query region for a covering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    /// All points within `radius_km` of `center`.
    Circle { center: Geolocation, radius_km: f64 },
    /// A latitude/longitude rectangle, possibly crossing the antimeridian.
    Rect(BoundingBox),
}

impl Region {
    /// Circle region; the radius must be finite and positive.
    pub fn circle(center: Geolocation, radius_km: f64) -> Result<Self> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(S2CoverError::InvalidRadius(radius_km));
        }
        Ok(Region::Circle { center, radius_km })
    }

    /// Re-checks a region whose fields were set directly: coordinates in range,
    /// a positive radius, and a box whose south edge is not north of its north edge.
    pub fn validate(&self) -> Result<()> {
        match self {
            Region::Circle { center, radius_km } => {
                validate_lat_lon(center.latitude, center.longitude)?;
                Region::circle(*center, *radius_km).map(|_| ())
            }
            Region::Rect(bbox) => BoundingBox::new(bbox.southwest, bbox.northeast).map(|_| ()),
        }
    }

    /// The point distances are measured from.
    pub fn center(&self) -> Geolocation {
        match self {
            Region::Circle { center, .. } => *center,
            Region::Rect(bbox) => bbox.center(),
        }
    }

    /// Rectangle cells are tested against during the flood fill.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        match self {
            Region::Circle { center, radius_km } => {
                BoundingBox::from_center_radius(center, *radius_km)
            }
            Region::Rect(bbox) => Ok(*bbox),
        }
    }

    /// Surface area in km² (spherical cap or spherical rectangle).
    pub fn area_km2(&self) -> f64 {
        match self {
            Region::Circle { radius_km, .. } => {
                let angular = (radius_km / EARTH_RADIUS_KM).min(PI);
                2.0 * PI * EARTH_RADIUS_KM * EARTH_RADIUS_KM * (1.0 - angular.cos())
            }
            Region::Rect(bbox) => bbox.area_km2(),
        }
    }
}

impl From<BoundingBox> for Region {
    fn from(bbox: BoundingBox) -> Self {
        Region::Rect(bbox)
    }
}

/// Approximate edge length of cells at `level`, in km.
pub fn cell_edge_km(level: u8) -> f64 {
    2.0 * CELL_EDGE_KM_LEVEL_0 / 2f64.powi(i32::from(level))
}

/// Rough number of cells at `level` needed to cover `region`.
///
/// Region area divided by the area of one cell. Used as a pre-flight cost check,
/// not for correctness; never returns less than 1.
///
/// ```
/// use s2cover_rs::{Geolocation, Region, estimate_cell_count};
///
/// # fn main() -> Result<(), s2cover_rs::S2CoverError> {
/// let region = Region::circle(Geolocation::new(51.5, -0.12)?, 10.0)?;
/// let coarse = estimate_cell_count(&region, 10);
/// let fine = estimate_cell_count(&region, 12);
/// assert!(fine > coarse * 10);
/// # Ok(())
/// # }
/// ```
pub fn estimate_cell_count(region: &Region, level: u8) -> u64 {
    let edge = cell_edge_km(level);
    let estimate = (region.area_km2() / (edge * edge)).ceil();
    // Float-to-int casts saturate
    (estimate as u64).max(1)
}
