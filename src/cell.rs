use crate::coord::{Coordinate, Geolocation};
use crate::error::{Result, S2CoverError};
use crate::geom::CellBounds;
use crate::index::{CellId, MAX_LEVEL, cell_bounds, cell_center, encode_id, neighbor_ids};
use geo_types::Polygon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single cell in the hierarchical cube-face grid.
///
/// A `Cell` is an immutable value: its token, level and bounds are derived once
/// at construction and never change. Build one from a token or from a location
/// and level.
///
/// # Example
///
/// ```
/// use s2cover_rs::Cell;
///
/// # fn main() -> Result<(), s2cover_rs::S2CoverError> {
/// // Longitude first, like geo_types points
/// let cell = Cell::from_location(&(-0.1278, 51.5074), 14)?;
/// println!("Cell token: {}", cell.token());
///
/// let parent = cell.parent()?;
/// assert_eq!(parent.level(), 13);
///
/// let restored = Cell::from_token(cell.token())?;
/// assert_eq!(cell, restored);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cell {
    id: CellId,
    token: String,
    level: u8,
    bounds: CellBounds,
}

impl Cell {
    pub(crate) fn from_id(id: CellId) -> Self {
        Self {
            id,
            token: id.to_token(),
            level: id.level(),
            bounds: cell_bounds(id),
        }
    }

    /// Create a Cell from its token.
    ///
    /// The stored token is canonical (lowercase, trailing zeros stripped), so
    /// `"89C25"` and `"89c250"` both yield token `"89c25"`.
    pub fn from_token(token: &str) -> Result<Self> {
        Ok(Self::from_id(CellId::from_token(token)?))
    }

    /// Create the Cell at `level` containing a location (x = longitude, y = latitude).
    ///
    /// # Example
    /// ```
    /// use s2cover_rs::{Cell, Geolocation};
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), s2cover_rs::S2CoverError> {
    /// let a = Cell::from_location(&(151.2093, -33.8688), 10)?;
    /// let b = Cell::from_location(&Point::new(151.2093, -33.8688), 10)?;
    /// let c = Cell::from_location(&Geolocation::new(-33.8688, 151.2093)?, 10)?;
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_location(location: &impl Coordinate, level: u8) -> Result<Self> {
        if level > MAX_LEVEL {
            return Err(S2CoverError::InvalidLevel(level));
        }
        Ok(Self::from_id(encode_id(location.y(), location.x(), level)?))
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn bounds(&self) -> &CellBounds {
        &self.bounds
    }

    /// Decoded center of the cell.
    pub fn center(&self) -> Geolocation {
        let (latitude, longitude) = cell_center(self.id);
        Geolocation {
            latitude,
            longitude,
        }
    }

    /// Exact test: the location encodes to this cell at this cell's level.
    pub fn contains(&self, location: &impl Coordinate) -> bool {
        encode_id(location.y(), location.x(), self.level)
            .map(|id| id == self.id)
            .unwrap_or(false)
    }

    /// The enclosing cell one level up.
    ///
    /// Found by re-encoding this cell's center rather than by shifting bits.
    ///
    /// # Errors
    ///
    /// [`S2CoverError::NoParent`] for level-0 cells.
    pub fn parent(&self) -> Result<Cell> {
        if self.level == 0 {
            return Err(S2CoverError::NoParent(self.token.clone()));
        }
        let center = self.center();
        Cell::from_location(&center, self.level - 1)
    }

    /// The four cells one level down, in Hilbert order.
    ///
    /// Children are built by moving the sentinel two bits down and filling in each
    /// of the four 2-bit child positions. A candidate that does not form a valid
    /// identifier is left out of the result instead of failing the call.
    ///
    /// # Errors
    ///
    /// [`S2CoverError::NoChildren`] for level-30 cells.
    pub fn children(&self) -> Result<Vec<Cell>> {
        if self.level == MAX_LEVEL {
            return Err(S2CoverError::NoChildren(self.token.clone()));
        }

        let lsb = self.id.lsb();
        let child_lsb = lsb >> 2;
        let child_shift = child_lsb.trailing_zeros() + 1;
        let base = self.id.id() & !lsb;

        let children = (0..4u64)
            .map(|position| base | (position << child_shift) | child_lsb)
            .filter_map(|raw| match CellId::new(raw) {
                Ok(id) => Some(Cell::from_id(id)),
                Err(e) => {
                    tracing::trace!(parent = %self.token, error = %e, "Skipping child candidate");
                    None
                }
            })
            .collect();

        Ok(children)
    }

    /// Tokens of the eight same-level neighbors.
    pub fn neighbors(&self) -> [String; 8] {
        neighbor_ids(self.id).map(|id| id.to_token())
    }

    /// Converts the cell bounds to a rectangle polygon in (lon, lat).
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Cell bounds as a WKT `POLYGON`.
    pub fn to_wkt(&self) -> String {
        use wkt::ToWkt;
        self.to_polygon().wkt_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl FromStr for Cell {
    type Err = S2CoverError;

    fn from_str(s: &str) -> Result<Self> {
        Cell::from_token(s)
    }
}

impl TryFrom<String> for Cell {
    type Error = S2CoverError;

    fn try_from(token: String) -> Result<Self> {
        Cell::from_token(&token)
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;

    #[test]
    fn test_from_location_tuple() -> Result<()> {
        let cell = Cell::from_location(&(-74.0060, 40.7128), 12)?;

        assert_eq!(cell.level(), 12);
        assert!(!cell.token().is_empty());
        assert!(cell.bounds().contains(&Geolocation::new(40.7128, -74.0060)?));
        Ok(())
    }

    #[test]
    fn test_tuple_and_point_same_result() -> Result<()> {
        let from_tuple = Cell::from_location(&(-2.248, 53.481), 16)?;
        let from_point = Cell::from_location(&Point::new(-2.248, 53.481), 16)?;
        assert_eq!(from_tuple, from_point);
        Ok(())
    }

    #[test]
    fn test_from_location_rejects_level() {
        let result = Cell::from_location(&(0.0, 0.0), 31);
        assert!(matches!(result, Err(S2CoverError::InvalidLevel(31))));
    }

    #[test]
    fn test_from_token_canonicalises() -> Result<()> {
        let cell = Cell::from_location(&(-74.0060, 40.7128), 10)?;
        let padded = format!("{}00", cell.token().to_uppercase());
        let restored = Cell::from_token(&padded)?;
        assert_eq!(restored, cell);
        assert_eq!(restored.token(), cell.token());
        Ok(())
    }

    #[test]
    fn test_from_token_invalid() {
        assert!(matches!(
            Cell::from_token("zz"),
            Err(S2CoverError::InvalidToken(_))
        ));
        assert!(Cell::from_token("").is_err());
    }

    #[test]
    fn test_parent_level_and_containment() -> Result<()> {
        let cell = Cell::from_location(&(151.2093, -33.8688), 18)?;
        let parent = cell.parent()?;

        assert_eq!(parent.level(), 17);
        assert!(parent.id().contains(&cell.id()));
        assert!(parent.contains(&cell.center()));
        Ok(())
    }

    #[test]
    fn test_parent_of_face_fails() -> Result<()> {
        let face = Cell::from_token("1")?;
        assert!(matches!(face.parent(), Err(S2CoverError::NoParent(_))));
        Ok(())
    }

    #[test]
    fn test_children() -> Result<()> {
        let cell = Cell::from_location(&(2.3522, 48.8566), 9)?;
        let children = cell.children()?;

        assert_eq!(children.len(), 4);
        for child in &children {
            assert_eq!(child.level(), 10);
            assert!(cell.id().contains(&child.id()));
            assert_eq!(child.parent()?, cell);
        }
        // Children are in curve order
        assert!(children.windows(2).all(|w| w[0].id() < w[1].id()));
        Ok(())
    }

    #[test]
    fn test_children_of_face_cell() -> Result<()> {
        let face = Cell::from_token("5")?;
        let children = face.children()?;
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|c| c.level() == 1 && c.id().face() == 2));
        Ok(())
    }

    #[test]
    fn test_children_of_leaf_fails() -> Result<()> {
        let leaf = Cell::from_location(&(0.0, 0.0), 30)?;
        assert!(matches!(leaf.children(), Err(S2CoverError::NoChildren(_))));
        Ok(())
    }

    #[test]
    fn test_neighbors_delegate_to_codec() -> Result<()> {
        let cell = Cell::from_location(&(10.0, 10.0), 11)?;
        let neighbors = cell.neighbors();
        assert_eq!(neighbors, crate::index::get_neighbors(cell.token())?);
        for token in &neighbors {
            assert_eq!(Cell::from_token(token)?.level(), 11);
        }
        Ok(())
    }

    #[test]
    fn test_contains() -> Result<()> {
        let cell = Cell::from_location(&(-0.1278, 51.5074), 8)?;
        assert!(cell.contains(&(-0.1278, 51.5074)));
        assert!(!cell.contains(&(100.0, -20.0)));
        Ok(())
    }

    #[test]
    fn test_to_polygon_and_wkt() -> Result<()> {
        let cell = Cell::from_location(&(10.0, 10.0), 6)?;
        let polygon = cell.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        assert!(cell.to_wkt().starts_with("POLYGON"));
        Ok(())
    }

    #[test]
    fn test_serde_as_token() -> Result<()> {
        let cell = Cell::from_location(&(10.0, 10.0), 6)?;
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, format!("\"{}\"", cell.token()));

        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
        assert!(serde_json::from_str::<Cell>("\"nothex\"").is_err());
        Ok(())
    }
}
