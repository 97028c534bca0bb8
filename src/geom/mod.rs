mod bbox;
mod bounds;

pub use bbox::{BoundingBox, EARTH_RADIUS_KM};
pub use bounds::CellBounds;
