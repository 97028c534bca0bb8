use crate::coord::Geolocation;
use crate::geom::bbox::BoundingBox;
use geo_types::{LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Latitude/longitude rectangle enclosing a cell.
///
/// Bounds are conservative. Cells touching a pole, and cells whose corners
/// straddle the antimeridian, report the full `[-180, 180]` longitude range, so
/// they are only fit for overlap tests, never for exact containment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl CellBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn is_full_longitude_span(&self) -> bool {
        self.min_lon <= -180.0 && self.max_lon >= 180.0
    }

    /// True when the longitude range runs eastward across ±180.
    pub fn wraps_date_line(&self) -> bool {
        self.min_lon > self.max_lon
    }

    pub fn contains(&self, point: &Geolocation) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && lon_in_range(point.longitude, self.min_lon, self.max_lon)
    }

    /// Rectangle overlap with a query box.
    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        if self.max_lat < bbox.south() || self.min_lat > bbox.north() {
            return false;
        }
        lon_ranges_overlap(self.min_lon, self.max_lon, bbox.west(), bbox.east())
    }

    /// Closed ring in (lon, lat) order.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let ring = LineString::from(vec![
            (self.min_lon, self.min_lat),
            (self.max_lon, self.min_lat),
            (self.max_lon, self.max_lat),
            (self.min_lon, self.max_lat),
            (self.min_lon, self.min_lat),
        ]);
        Polygon::new(ring, vec![])
    }
}

fn lon_in_range(lon: f64, west: f64, east: f64) -> bool {
    if west > east {
        lon >= west || lon <= east
    } else {
        lon >= west && lon <= east
    }
}

/// Overlap of two longitude intervals, either of which may wrap the antimeridian.
fn lon_ranges_overlap(a_west: f64, a_east: f64, b_west: f64, b_east: f64) -> bool {
    let a_wraps = a_west > a_east;
    let b_wraps = b_west > b_east;
    match (a_wraps, b_wraps) {
        (false, false) => a_west <= b_east && b_west <= a_east,
        (true, false) => b_east >= a_west || b_west <= a_east,
        (false, true) => a_east >= b_west || a_west <= b_east,
        // Both contain the antimeridian
        (true, true) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn test_overlap_neither_wraps() {
        assert!(lon_ranges_overlap(0.0, 10.0, 5.0, 15.0));
        assert!(lon_ranges_overlap(0.0, 10.0, 10.0, 15.0));
        assert!(!lon_ranges_overlap(0.0, 10.0, 11.0, 15.0));
    }

    #[test]
    fn test_overlap_one_wraps() {
        // [170, 180] u [-180, -170]
        assert!(lon_ranges_overlap(170.0, -170.0, 175.0, 176.0));
        assert!(lon_ranges_overlap(170.0, -170.0, -175.0, -174.0));
        assert!(!lon_ranges_overlap(170.0, -170.0, 0.0, 10.0));
        assert!(lon_ranges_overlap(175.0, 176.0, 170.0, -170.0));
        assert!(!lon_ranges_overlap(-100.0, -90.0, 170.0, -170.0));
    }

    #[test]
    fn test_overlap_both_wrap() {
        assert!(lon_ranges_overlap(179.0, -179.0, 170.0, -170.0));
    }

    #[test]
    fn test_intersects_box() -> Result<()> {
        let bounds = CellBounds::new(0.0, 1.0, 0.0, 1.0);
        assert!(bounds.intersects_box(&BoundingBox::from_degrees(0.5, 0.5, 2.0, 2.0)?));
        assert!(!bounds.intersects_box(&BoundingBox::from_degrees(1.5, 0.5, 2.0, 2.0)?));

        let full = CellBounds::new(89.0, 90.0, -180.0, 180.0);
        assert!(full.is_full_longitude_span());
        assert!(full.intersects_box(&BoundingBox::from_degrees(89.5, 170.0, 90.0, -170.0)?));
        Ok(())
    }

    #[test]
    fn test_contains() -> Result<()> {
        let bounds = CellBounds::new(10.0, 20.0, 170.0, -170.0);
        assert!(bounds.wraps_date_line());
        assert!(bounds.contains(&Geolocation::new(15.0, 179.0)?));
        assert!(bounds.contains(&Geolocation::new(15.0, -175.0)?));
        assert!(!bounds.contains(&Geolocation::new(15.0, 0.0)?));
        assert!(!bounds.contains(&Geolocation::new(25.0, 179.0)?));
        Ok(())
    }

    #[test]
    fn test_to_polygon_is_closed() {
        let polygon = CellBounds::new(0.0, 1.0, 0.0, 1.0).to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
    }
}
