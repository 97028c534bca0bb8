//! # s2cover-rs
//!
//! Hierarchical, sortable cell identifiers for latitude/longitude points, and
//! bounded region coverings built from them.
//!
//! The sphere is projected onto the six faces of a cube, each face is warped
//! quadratically and subdivided 30 times, and cells are numbered along a
//! Hilbert curve. A cell identifier is a `u64`; its token is the lowercase hex
//! form with trailing zeros stripped, and is meant to be used as a sortable key
//! component in an ordered key-value store.
//!
//! There are three main entry points.
//!
//! ### 1. Codec functions - tokens from points and back
//!
//! ```
//! use s2cover_rs::{decode, decode_bounds, encode, get_neighbors};
//!
//! # fn main() -> Result<(), s2cover_rs::S2CoverError> {
//! let token = encode(51.5074, -0.1278, 14)?;
//! let (lat, lon) = decode(&token)?;
//! let bounds = decode_bounds(&token)?;
//! assert!(lat >= bounds.min_lat && lat <= bounds.max_lat);
//! assert!(lon >= bounds.min_lon && lon <= bounds.max_lon);
//!
//! let neighbors = get_neighbors(&token)?;
//! assert_eq!(neighbors.len(), 8);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Cell` - a single cell with derived geometry
//!
//! ```
//! use s2cover_rs::Cell;
//!
//! # fn main() -> Result<(), s2cover_rs::S2CoverError> {
//! let cell = Cell::from_location(&(-0.1278, 51.5074), 12)?;
//! let parent = cell.parent()?;
//! let children = cell.children()?;
//! assert_eq!(parent.level(), 11);
//! assert_eq!(children.len(), 4);
//! println!("{}", cell.to_wkt());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Coverings - query regions to range-query tokens
//!
//! ```
//! use s2cover_rs::{BoundingBox, CoveringOptions, Geolocation, cells_for_bounding_box, cells_for_radius};
//!
//! # fn main() -> Result<(), s2cover_rs::S2CoverError> {
//! let options = CoveringOptions::new(12).max_cells(50);
//!
//! let center = Geolocation::new(40.7128, -74.0060)?;
//! let near_me = cells_for_radius(&center, 2.0, &options)?;
//!
//! // Crosses the antimeridian; both sides are covered
//! let fiji = BoundingBox::from_degrees(-17.0, 179.5, -16.9, -179.5)?;
//! let tokens = cells_for_bounding_box(&fiji, &options)?;
//! assert!(!near_me.is_empty() && !tokens.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! Cell collections can be exported in memory with [`CellsToGeoJson`] and
//! [`CellsToArrow`].

pub mod cell;
pub mod coord;
pub mod covering;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use cell::Cell;
pub use coord::{Coordinate, Geolocation, NEAR_POLE_LATITUDE};
pub use covering::{
    ABSOLUTE_MAX_CELLS, CELL_EDGE_KM_LEVEL_0, CoveredCell, CoveringOptions, DEFAULT_LEVEL,
    DEFAULT_MAX_CELLS, Region, cell_edge_km, cells_for_bounding_box, cells_for_radius,
    cover_bounding_box, cover_radius, cover_region, estimate_cell_count,
};
pub use error::{Result, S2CoverError};
pub use geom::{BoundingBox, CellBounds, EARTH_RADIUS_KM};
pub use index::{
    CellId, MAX_LEVEL, NUM_FACES, POLE_BOUNDS_LATITUDE, TOKEN_LENGTH, decode, decode_bounds,
    encode, encode_id, get_neighbors,
};
pub use io::{CellsToArrow, CellsToGeoJson};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
