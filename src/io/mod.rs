//! In-memory exports of cell collections.

pub mod arrow;
pub mod geojson;

pub use self::arrow::CellsToArrow;
pub use self::geojson::CellsToGeoJson;
